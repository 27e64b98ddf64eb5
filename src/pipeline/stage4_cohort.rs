use anyhow::Result;
use tracing::info;

use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::query::{self, TimeFilter};

pub struct Stage4Cohort;

impl Stage4Cohort {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage4Cohort {
    fn name(&self) -> &'static str {
        "stage4_cohort"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let baseline = ctx.cohort.with_time(TimeFilter::Exact(0));
        let subsets = query::subset_counts(ctx.store()?, &baseline);
        info!(
            baseline_samples = subsets.baseline_samples.len(),
            projects = subsets.samples_by_project.len(),
            "baseline_cohort_summarized"
        );

        ctx.subsets = Some(subsets);
        Ok(())
    }
}
