use anyhow::Result;
use tracing::info;

use crate::ctx::Ctx;
use crate::io::{json_writer, table_writer};
use crate::pipeline::Stage;

pub struct Stage6Output;

impl Stage6Output {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage6Output {
    fn name(&self) -> &'static str {
        "stage6_output"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let report = json_writer::build_report(ctx)?;
        ctx.report = report;

        let out_dir = ctx.output.out_dir.clone();
        let frequencies = ctx.frequencies()?;
        table_writer::write_relative_frequencies(
            &out_dir.join("relative_frequencies.csv"),
            &frequencies.rows,
        )?;

        for stratum in &ctx.stratum_stats {
            let filename = format!("population_stats_{}.csv", stratum.stratum.label());
            table_writer::write_population_stats(&out_dir.join(filename), &stratum.rows)?;
        }

        if let Some(subsets) = &ctx.subsets {
            table_writer::write_baseline_samples(
                &out_dir.join("baseline_samples.csv"),
                &subsets.baseline_samples,
            )?;
            table_writer::write_group_counts(
                &out_dir.join("project_sample_counts.csv"),
                "project",
                "sample_count",
                &subsets.samples_by_project,
            )?;
            table_writer::write_group_counts(
                &out_dir.join("response_subject_counts.csv"),
                "response",
                "subject_count",
                &subsets.subjects_by_response,
            )?;
            table_writer::write_group_counts(
                &out_dir.join("sex_subject_counts.csv"),
                "sex",
                "subject_count",
                &subsets.subjects_by_sex,
            )?;
        }

        if ctx.write_json {
            json_writer::write_json(&ctx.output.json_path, &ctx.report)?;
        }

        info!(out_dir = %out_dir.display(), "export_tables_ready");
        Ok(())
    }
}
