use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

const HEADER: &str = "project,subject,condition,age,sex,treatment,response,sample,sample_type,time_from_treatment_start,b_cell,cd8_t_cell,cd4_t_cell,nk_cell,monocyte";

#[test]
fn validate_reports_schema_counts() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("cell-count.csv");
    fs::write(
        &path,
        format!(
            "{}\nprj1,s1,melanoma,64,F,miraclib,yes,a,PBMC,0,40,20,20,10,10\n\
             prj1,s2,melanoma,58,M,miraclib,no,b,PBMC,0,10,20,20,25,25\n",
            HEADER
        ),
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("cytostat").unwrap();
    cmd.arg("validate").arg("--input").arg(&path);
    let assert = cmd.assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("cytostat validate ok"));
    assert!(stdout.contains("subjects: 2"));
    assert!(stdout.contains("samples: 2"));
    assert!(stdout.contains("cell count rows: 10"));
}

#[test]
fn validate_fails_on_conflicting_subject() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("cell-count.csv");
    fs::write(
        &path,
        format!(
            "{}\nprj1,s1,melanoma,64,F,miraclib,yes,a,PBMC,0,40,20,20,10,10\n\
             prj1,s1,melanoma,65,F,miraclib,yes,b,PBMC,7,40,20,20,10,10\n",
            HEADER
        ),
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("cytostat").unwrap();
    cmd.arg("validate").arg("--input").arg(&path);
    cmd.assert().failure();
}
