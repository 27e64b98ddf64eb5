use anyhow::Result;
use tracing::{info, warn};

use crate::ctx::Ctx;
use crate::freq;
use crate::pipeline::Stage;

pub struct Stage3Frequency;

impl Stage3Frequency {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage3Frequency {
    fn name(&self) -> &'static str {
        "stage3_frequency"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let table = freq::derive(ctx.store()?);
        info!(rows = table.rows.len(), "frequencies_derived");

        for sample_id in &table.zero_total_samples {
            warn!(sample_id = %sample_id, "zero total count; sample excluded");
            ctx.warnings.push(format!(
                "sample '{}' has zero total count and was excluded from frequencies",
                sample_id
            ));
        }

        ctx.frequencies = Some(table);
        Ok(())
    }
}
