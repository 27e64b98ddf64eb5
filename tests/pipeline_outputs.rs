use std::fs;
use std::path::PathBuf;

use cytostat::ctx::Ctx;
use cytostat::pipeline::stage0_scaffold::Stage0Scaffold;
use cytostat::pipeline::stage1_input::Stage1Input;
use cytostat::pipeline::stage2_normalize::Stage2Normalize;
use cytostat::pipeline::stage3_frequency::Stage3Frequency;
use cytostat::pipeline::stage4_cohort::Stage4Cohort;
use cytostat::pipeline::stage5_stats::Stage5Stats;
use cytostat::pipeline::stage6_output::Stage6Output;
use cytostat::pipeline::Pipeline;
use cytostat::query::CohortFilter;
use tempfile::TempDir;

const HEADER: &str = "project,subject,condition,age,sex,treatment,response,sample,sample_type,time_from_treatment_start,b_cell,cd8_t_cell,cd4_t_cell,nk_cell,monocyte";

fn write_input(tmp: &TempDir) -> PathBuf {
    // Two responders and two non-responders, each sampled at days 0, 7, 14.
    let mut body = String::new();
    let subjects = [
        ("s1", "F", "yes", [40u64, 20, 20, 10, 10]),
        ("s2", "M", "yes", [44, 18, 18, 10, 10]),
        ("s3", "F", "no", [10, 20, 20, 25, 25]),
        ("s4", "M", "no", [12, 22, 22, 22, 22]),
    ];
    for (subject, sex, response, counts) in subjects {
        for time in [0, 7, 14] {
            body.push_str(&format!(
                "prj1,{subject},melanoma,60,{sex},miraclib,{response},{subject}_t{time},PBMC,{time},{},{},{},{},{}\n",
                counts[0], counts[1], counts[2], counts[3], counts[4]
            ));
        }
    }
    let path = tmp.path().join("cell-count.csv");
    fs::write(&path, format!("{}\n{}", HEADER, body)).unwrap();
    path
}

fn melanoma_cohort() -> CohortFilter {
    CohortFilter {
        condition: Some("melanoma".to_string()),
        treatment: Some("miraclib".to_string()),
        sample_type: Some("PBMC".to_string()),
        time: None,
    }
}

fn full_pipeline() -> Pipeline {
    Pipeline::new(vec![
        Box::new(Stage0Scaffold::new()),
        Box::new(Stage1Input::new()),
        Box::new(Stage2Normalize::new()),
        Box::new(Stage3Frequency::new()),
        Box::new(Stage4Cohort::new()),
        Box::new(Stage5Stats::new()),
        Box::new(Stage6Output::new()),
    ])
}

#[test]
fn run_writes_all_export_tables() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(&tmp);
    let out_dir = tmp.path().join("out");

    let mut ctx = Ctx::new(input, out_dir.clone(), melanoma_cohort(), true, "0.0.0-test");
    full_pipeline().run(&mut ctx).unwrap();

    for name in [
        "relative_frequencies.csv",
        "population_stats_time0.csv",
        "population_stats_time7.csv",
        "population_stats_time14.csv",
        "population_stats_post_baseline.csv",
        "baseline_samples.csv",
        "project_sample_counts.csv",
        "response_subject_counts.csv",
        "sex_subject_counts.csv",
        "cohort_report.json",
    ] {
        assert!(out_dir.join(name).exists(), "missing {}", name);
    }
}

#[test]
fn export_tables_keep_column_contract() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(&tmp);
    let out_dir = tmp.path().join("out");

    let mut ctx = Ctx::new(input, out_dir.clone(), melanoma_cohort(), false, "0.0.0-test");
    full_pipeline().run(&mut ctx).unwrap();

    let frequencies = fs::read_to_string(out_dir.join("relative_frequencies.csv")).unwrap();
    assert!(frequencies.starts_with("sample_id,population,count,total_count,percentage\n"));
    // 12 samples, five populations each, plus the header.
    assert_eq!(frequencies.lines().count(), 61);

    let stats = fs::read_to_string(out_dir.join("population_stats_time0.csv")).unwrap();
    assert!(stats.starts_with(
        "population,responder_mean,non_responder_mean,t_statistic,p_value,significant\n"
    ));
    assert_eq!(stats.lines().count(), 6);

    let baseline = fs::read_to_string(out_dir.join("baseline_samples.csv")).unwrap();
    assert!(baseline.starts_with("sample_id\n"));
    assert_eq!(baseline.lines().count(), 5);

    let projects = fs::read_to_string(out_dir.join("project_sample_counts.csv")).unwrap();
    assert!(projects.starts_with("project,sample_count\n"));
    assert!(projects.contains("prj1,4"));
}

#[test]
fn every_stratum_is_compared() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(&tmp);
    let out_dir = tmp.path().join("out");

    let mut ctx = Ctx::new(input, out_dir, melanoma_cohort(), false, "0.0.0-test");
    full_pipeline().run(&mut ctx).unwrap();

    assert_eq!(ctx.stratum_stats.len(), 4);
    for stratum in &ctx.stratum_stats {
        // Two observations per group at each day, four pooled post-baseline.
        assert_eq!(stratum.rows.len(), 5, "stratum {}", stratum.stratum.label());
        assert!(stratum.skipped.is_empty());
    }

    let labels: Vec<&str> = ctx
        .stratum_stats
        .iter()
        .map(|s| s.stratum.label())
        .collect();
    assert_eq!(labels, vec!["time0", "time7", "time14", "post_baseline"]);
}

#[test]
fn failed_load_writes_no_artifacts() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("cell-count.csv");
    fs::write(
        &path,
        format!(
            "{}\nprj1,s1,melanoma,64,F,miraclib,yes,a,PBMC,0,-5,20,20,10,10\n",
            HEADER
        ),
    )
    .unwrap();
    let out_dir = tmp.path().join("out");

    let mut ctx = Ctx::new(path, out_dir.clone(), melanoma_cohort(), true, "0.0.0-test");
    let err = full_pipeline().run(&mut ctx);
    assert!(err.is_err());

    assert!(!out_dir.join("relative_frequencies.csv").exists());
    assert!(!out_dir.join("cohort_report.json").exists());
}
