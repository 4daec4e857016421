use assert_cmd::Command;

#[test]
fn cli_help_runs() {
    let mut cmd = Command::cargo_bin("trial-bias").expect("binary exists");
    cmd.arg("--help").assert().success();
}

#[test]
fn sample_report_prints() {
    let mut cmd = Command::cargo_bin("trial-bias").expect("binary exists");
    let output = cmd
        .args(["report", "--dataset", "attrition"])
        .env("RUST_LOG", "off")
        .output()
        .expect("report runs");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Low Income"));
    assert!(stdout.contains("51.5%"));
}

#[test]
fn patient_records_from_stdin() {
    let records = r#"[
        {"patientId":"P1","age":30,"gender":"Male","incomeLevel":"High","weeksInStudy":12,"completed":true,"remission":true},
        {"patientId":"P2","age":41,"gender":"Female","incomeLevel":"Low","weeksInStudy":3,"completed":false,"remission":false}
    ]"#;
    let mut cmd = Command::cargo_bin("trial-bias").expect("binary exists");
    let output = cmd
        .args(["--log-format", "json", "report", "--patients", "-", "--weeks", "4", "--json"])
        .env("RUST_LOG", "off")
        .write_stdin(records)
        .output()
        .expect("report runs");
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json report");
    assert_eq!(report["groups"][1]["group"], "Low");
    assert_eq!(report["dropoutTimeline"][2]["newDropouts"], 1);
    assert_eq!(report["hiddenPopulation"]["totalDropped"], 1);
}

#[test]
fn report_needs_a_source() {
    let mut cmd = Command::cargo_bin("trial-bias").expect("binary exists");
    cmd.arg("report").assert().failure();
}
