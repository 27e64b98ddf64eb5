use assert_cmd::Command;

#[test]
fn cli_help_smoke() {
    let mut cmd = Command::cargo_bin("cytostat").unwrap();
    cmd.arg("--help");
    cmd.assert().success();
}

#[test]
fn run_requires_input() {
    let mut cmd = Command::cargo_bin("cytostat").unwrap();
    cmd.arg("run");
    cmd.assert().failure();
}
