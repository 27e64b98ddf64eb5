use cytostat::ctx::Ctx;
use cytostat::io::json_writer;
use cytostat::query::{CohortFilter, SubsetCounts};
use cytostat::stats::{PopulationStat, Stratum, StratumStats};
use cytostat::store::Population;
use std::path::PathBuf;

fn sample_ctx() -> Ctx {
    let cohort = CohortFilter {
        condition: Some("melanoma".to_string()),
        treatment: Some("miraclib".to_string()),
        sample_type: Some("PBMC".to_string()),
        time: None,
    };
    let mut ctx = Ctx::new(
        PathBuf::from("input.csv"),
        PathBuf::from("out"),
        cohort,
        true,
        "0.0.0-test",
    );
    ctx.report.input_meta.rows = Some(12);
    ctx.report.input_meta.subjects = Some(4);
    ctx.report.input_meta.samples = Some(12);
    ctx.stratum_stats = vec![StratumStats {
        stratum: Stratum::Baseline,
        rows: vec![
            PopulationStat {
                population: Population::BCell,
                responder_mean: 42.0,
                non_responder_mean: 11.0,
                t_statistic: 13.86,
                p_value: 0.02,
            },
            PopulationStat {
                population: Population::NkCell,
                responder_mean: 10.0,
                non_responder_mean: 11.0,
                t_statistic: -0.5,
                p_value: 0.64,
            },
        ],
        skipped: vec![],
    }];
    ctx.subsets = Some(SubsetCounts {
        baseline_samples: vec!["a".to_string(), "b".to_string()],
        samples_by_project: vec![("prj1".to_string(), 2)],
        subjects_by_response: vec![("no".to_string(), 1), ("yes".to_string(), 1)],
        subjects_by_sex: vec![("F".to_string(), 2)],
    });
    ctx.warnings.push("sample 'z' has zero total count".to_string());
    ctx
}

#[test]
fn report_carries_run_facts() {
    let ctx = sample_ctx();
    let report = json_writer::build_report(&ctx).unwrap();

    assert_eq!(report.tool, "cytostat");
    assert_eq!(report.schema_version, "v1");
    assert_eq!(report.input_meta.subjects, Some(4));
    assert_eq!(report.cohort.condition.as_deref(), Some("melanoma"));
    assert_eq!(report.warnings.len(), 1);
}

#[test]
fn report_stats_sorted_and_marked() {
    let ctx = sample_ctx();
    let report = json_writer::build_report(&ctx).unwrap();

    let stratum = &report.strata[0];
    assert_eq!(stratum.stratum, "time0");
    assert_eq!(stratum.stats[0].population, "b_cell");
    assert!(stratum.stats[0].significant);
    assert_eq!(stratum.stats[1].population, "nk_cell");
    assert!(!stratum.stats[1].significant);
}

#[test]
fn report_round_trips_through_json() {
    let ctx = sample_ctx();
    let report = json_writer::build_report(&ctx).unwrap();

    let text = serde_json::to_string(&report).unwrap();
    let parsed: cytostat::schema::v1::CohortReportV1 = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed.strata.len(), 1);
    assert_eq!(parsed.subsets.unwrap().baseline_samples.len(), 2);
}
