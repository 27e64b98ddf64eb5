use anyhow::Result;
use tracing::info;

use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::stats;

pub struct Stage5Stats;

impl Stage5Stats {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage5Stats {
    fn name(&self) -> &'static str {
        "stage5_stats"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let results = stats::compare_all(ctx.store()?, ctx.frequencies()?, &ctx.cohort);
        for stratum in &results {
            info!(
                stratum = stratum.stratum.label(),
                populations = stratum.rows.len(),
                skipped = stratum.skipped.len(),
                "stratum_compared"
            );
        }

        ctx.stratum_stats = results;
        Ok(())
    }
}
