use anyhow::Result;
use tracing::info;

use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::store::CohortStore;

pub struct Stage2Normalize;

impl Stage2Normalize {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage2Normalize {
    fn name(&self) -> &'static str {
        "stage2_normalize"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        // All-or-nothing: a conflict or validation error here leaves the
        // prior store untouched.
        let store = CohortStore::from_records(&ctx.records)?;
        info!(
            subjects = store.subject_count(),
            samples = store.sample_count(),
            cell_counts = store.cell_count_rows(),
            "schema_store_loaded"
        );

        ctx.report.input_meta.subjects = Some(store.subject_count() as u64);
        ctx.report.input_meta.samples = Some(store.sample_count() as u64);
        ctx.store = Some(store);
        ctx.records.clear();
        Ok(())
    }
}
