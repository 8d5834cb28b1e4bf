use predicates::str::contains;
use std::fs;

mod common;
use common::TestEnv;

#[test]
fn test_export_csv_daily_series() {
    let env = TestEnv::new();
    let out = env.out("machine12.csv");

    env.cmd()
        .args(["export", "--format", "csv", "--file", &out, "--machine", "12"])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("read exported csv");
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some(
            "machine_id,machine_name,month,status,hours_remaining,day,date,fuel_liters,real_rate,ideal_rate"
        )
    );
    assert_eq!(
        lines.next(),
        Some("12,Excavator CAT 320,2025-06,DUE_SOON,50.0,2,2025-06-02,200.0,10.5,9.0")
    );
    assert_eq!(
        lines.next(),
        Some("12,Excavator CAT 320,2025-06,DUE_SOON,50.0,5,2025-06-05,150.0,10.0,8.0")
    );
    assert_eq!(lines.next(), None);
}

#[test]
fn test_export_csv_keeps_gaps_empty() {
    let env = TestEnv::new();
    let out = env.out("machine3.csv");

    env.cmd()
        .args(["export", "--file", &out, "--machine", "3"])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.contains("4,2025-06-04,50.0,,"));
}

#[test]
fn test_export_json_report() {
    let env = TestEnv::new();
    let out = env.out("machine12.json");

    env.cmd()
        .args([
            "export", "--format", "json", "--file", &out, "--machine", "12", "--month", "2025-06",
            "--exclude-site", "Sur",
        ])
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).expect("read json")).expect("parse json");

    assert_eq!(json["machine_id"], "12");
    assert_eq!(json["status"], "DUE_SOON");
    assert_eq!(json["hours_remaining"], 50.0);
    assert_eq!(json["sites"], serde_json::json!(["Norte"]));
    assert_eq!(json["days"].as_array().map(|d| d.len()), Some(1));
    assert_eq!(json["days"][0]["fuel_liters"], 120.0);
}

#[test]
fn test_export_xlsx_and_pdf() {
    let env = TestEnv::new();
    let xlsx = env.out("machine12.xlsx");
    let pdf = env.out("machine12.pdf");

    env.cmd()
        .args(["export", "--format", "xlsx", "--file", &xlsx, "--machine", "12"])
        .assert()
        .success();
    env.cmd()
        .args(["export", "--format", "pdf", "--file", &pdf, "--machine", "12"])
        .assert()
        .success();

    let bytes = fs::read(&xlsx).expect("read xlsx");
    assert!(bytes.starts_with(b"PK"));
    let bytes = fs::read(&pdf).expect("read pdf");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_export_empty_selection_still_writes_file() {
    let env = TestEnv::new();
    let out = env.out("empty.csv");

    env.cmd()
        .args(["export", "--file", &out, "--machine", "12", "--month", "2024-01"])
        .assert()
        .success()
        .stdout(contains("exporting metrics only"));

    let content = fs::read_to_string(&out).expect("read exported csv");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2, "header plus one metrics line");
    assert_eq!(lines[1], "12,Excavator CAT 320,2024-01,DUE_SOON,50.0,,,,,");
}

#[test]
fn test_export_requires_absolute_path() {
    let env = TestEnv::new();

    env.cmd()
        .args(["export", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_export_asks_before_overwriting() {
    let env = TestEnv::new();
    let out = env.out("existing.csv");
    fs::write(&out, "keep me").expect("write existing");

    env.cmd()
        .args(["export", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("existing file not overwritten"));
    assert_eq!(fs::read_to_string(&out).expect("read"), "keep me");

    env.cmd()
        .args(["export", "--file", &out])
        .write_stdin("yes\n")
        .assert()
        .success();
    assert_ne!(fs::read_to_string(&out).expect("read"), "keep me");

    env.cmd()
        .args(["export", "--file", &out, "--force"])
        .assert()
        .success();
}

#[test]
fn test_export_is_audited() {
    let env = TestEnv::new();
    let out = env.out("audited.json");

    env.cmd()
        .args(["export", "--format", "json", "--file", &out])
        .assert()
        .success();

    env.cmd()
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("export"));
}
