use anyhow::Result;
use tracing::info;

use crate::ctx::Ctx;
use crate::io::csv_reader;
use crate::pipeline::Stage;

pub struct Stage1Input;

impl Stage1Input {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage1Input {
    fn name(&self) -> &'static str {
        "stage1_input"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let records = csv_reader::read_records(&ctx.input)?;
        info!(rows = records.len(), input = %ctx.input.display(), "input_loaded");

        ctx.report.input_meta.rows = Some(records.len() as u64);
        ctx.records = records;
        Ok(())
    }
}
