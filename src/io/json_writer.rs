use std::path::Path;

use anyhow::{Context, Result};

use crate::ctx::Ctx;
use crate::schema::v1::{
    CohortEcho, CohortReportV1, GroupCount, PopulationStatRow, SkippedPopulationRow,
    StratumReport, SubsetReport,
};
use crate::stats;

pub fn build_report(ctx: &Ctx) -> Result<CohortReportV1> {
    let strata = ctx
        .stratum_stats
        .iter()
        .map(|stratum| {
            let mut rows = stratum.rows.clone();
            stats::sort_by_p_value(&mut rows);
            StratumReport {
                stratum: stratum.stratum.label().to_string(),
                stats: rows
                    .iter()
                    .map(|row| PopulationStatRow {
                        population: row.population.to_string(),
                        responder_mean: row.responder_mean,
                        non_responder_mean: row.non_responder_mean,
                        t_statistic: row.t_statistic,
                        p_value: row.p_value,
                        significant: stats::is_significant(row.p_value),
                    })
                    .collect(),
                skipped: stratum
                    .skipped
                    .iter()
                    .map(|skip| SkippedPopulationRow {
                        population: skip.population.to_string(),
                        reason: skip.reason.as_str().to_string(),
                    })
                    .collect(),
            }
        })
        .collect();

    let subsets = ctx.subsets.as_ref().map(|subsets| SubsetReport {
        baseline_samples: subsets.baseline_samples.clone(),
        samples_by_project: group_counts(&subsets.samples_by_project),
        subjects_by_response: group_counts(&subsets.subjects_by_response),
        subjects_by_sex: group_counts(&subsets.subjects_by_sex),
    });

    Ok(CohortReportV1 {
        tool: "cytostat".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        schema_version: "v1".to_string(),
        input_meta: ctx.report.input_meta.clone(),
        cohort: CohortEcho {
            condition: ctx.cohort.condition.clone(),
            treatment: ctx.cohort.treatment.clone(),
            sample_type: ctx.cohort.sample_type.clone(),
        },
        strata,
        subsets,
        warnings: ctx.warnings.clone(),
    })
}

pub fn write_json(path: &Path, report: &CohortReportV1) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}

fn group_counts(rows: &[(String, u64)]) -> Vec<GroupCount> {
    rows.iter()
        .map(|(key, count)| GroupCount {
            key: key.clone(),
            count: *count,
        })
        .collect()
}
