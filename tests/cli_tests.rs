use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{FixtureSheet, TestEnv, V, mdash, standard_sheets, workbook_bytes};

#[test]
fn test_dashboard_machine_due_soon() {
    let env = TestEnv::new();

    env.cmd()
        .args(["dashboard", "--machine", "12"])
        .assert()
        .success()
        .stdout(contains("DUE_SOON"))
        .stdout(contains("Excavator CAT 320"))
        .stdout(contains("[x] Norte"))
        .stdout(contains("[x] Sur"))
        .stdout(contains("Daily fuel consumption (liters)"))
        .stdout(contains("Data updated to: 2025-06-05"));
}

#[test]
fn test_dashboard_defaults_to_first_machine() {
    let env = TestEnv::new();

    env.cmd()
        .arg("dashboard")
        .assert()
        .success()
        .stdout(contains("Haul truck"))
        .stdout(contains("using default interval of 500 h"))
        .stdout(contains("1 maintenance row(s) skipped"));
}

#[test]
fn test_dashboard_excluded_site_is_unchecked() {
    let env = TestEnv::new();

    env.cmd()
        .args(["dashboard", "--machine", "12", "--exclude-site", "Sur"])
        .assert()
        .success()
        .stdout(contains("[ ] Sur"))
        .stdout(contains("[x] Norte"));
}

#[test]
fn test_dashboard_empty_month_shows_no_data() {
    let env = TestEnv::new();

    env.cmd()
        .args(["dashboard", "--machine", "12", "--month", "2024-01"])
        .assert()
        .success()
        .stdout(contains("No data for the selected filters."))
        .stdout(contains("DUE_SOON"));
}

#[test]
fn test_dashboard_rejects_unknown_machine_and_bad_month() {
    let env = TestEnv::new();

    env.cmd()
        .args(["dashboard", "--machine", "404"])
        .assert()
        .failure()
        .stderr(contains("Unknown machine: 404"));

    env.cmd()
        .args(["dashboard", "--month", "2025-13"])
        .assert()
        .failure()
        .stderr(contains("Invalid month"));
}

#[test]
fn test_bad_credentials_are_rejected_and_audited() {
    let env = TestEnv::new();

    env.cmd_as("operator", "nope")
        .arg("dashboard")
        .assert()
        .failure()
        .stderr(contains("invalid username or password"))
        .stdout(contains("DUE_SOON").not());

    env.cmd_as("ghost", "nope")
        .arg("machines")
        .assert()
        .failure()
        .stderr(contains("invalid username or password"));

    env.cmd()
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("login_failed"));
}

#[test]
fn test_credentials_from_environment() {
    let env = TestEnv::new();

    let mut cmd = mdash();
    cmd.arg("--config")
        .arg(&env.config)
        .arg("--db")
        .arg(&env.db)
        .env("MACHDASH_USER", common::USER)
        .env("MACHDASH_PASSWORD", common::PASSWORD)
        .arg("machines")
        .assert()
        .success()
        .stdout(contains("OVERDUE"));
}

#[test]
fn test_machines_overview() {
    let env = TestEnv::new();

    env.cmd()
        .arg("machines")
        .assert()
        .success()
        .stdout(contains("OVERDUE"))
        .stdout(contains("DUE_SOON"))
        .stdout(contains("OK"))
        .stdout(contains("(default interval)"));
}

#[test]
fn test_months_listing() {
    let env = TestEnv::new();

    env.cmd()
        .args(["months", "--machine", "12"])
        .assert()
        .success()
        .stdout(contains("2025-05"))
        .stdout(contains("2025-06"))
        .stdout(contains("June 2025"));
}

#[test]
fn test_schema_error_is_fatal() {
    let mut sheets: Vec<FixtureSheet> = standard_sheets();
    sheets[0].rows[0][6] = V::S("RENDIMIENTO");
    let env = TestEnv::with_workbook(&workbook_bytes(&sheets));

    env.cmd()
        .arg("dashboard")
        .assert()
        .failure()
        .stderr(contains("has no column 'RENDIMIENTO_HORA'"));

    env.cmd()
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("fetch_failed"));
}

#[test]
fn test_missing_workbook_file_fails() {
    let env = TestEnv::new();
    fs::remove_file(&env.workbook).expect("remove workbook");

    env.cmd()
        .arg("dashboard")
        .assert()
        .failure()
        .stderr(contains("cannot read workbook"));
}

#[test]
fn test_source_override() {
    let env = TestEnv::new();
    let other = env.dir.path().join("other.xlsx");
    fs::copy(&env.workbook, &other).expect("copy workbook");
    fs::remove_file(&env.workbook).expect("remove workbook");

    env.cmd()
        .arg("--source")
        .arg(&other)
        .arg("machines")
        .assert()
        .success()
        .stdout(contains("Loader 950"));
}

#[test]
fn test_log_records_session_activity() {
    let env = TestEnv::new();

    env.cmd().arg("machines").assert().success();

    env.cmd()
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("login"))
        .stdout(contains("fetch"))
        .stdout(contains("6 operational"));
}

#[test]
fn test_init_creates_config_and_database() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("conf").join("machdash.conf");
    let db = dir.path().join("data").join("audit.sqlite");

    mdash()
        .arg("--config")
        .arg(&config)
        .arg("--db")
        .arg(&db)
        .arg("init")
        .assert()
        .success()
        .stdout(contains("initialization completed"))
        .stdout(contains("No users configured yet"));

    assert!(config.exists());
    assert!(db.exists());

    let yaml = fs::read_to_string(&config).expect("read config");
    assert!(yaml.contains("fetch_timeout_secs: 30"));
    assert!(yaml.contains("BASE DE DATOS"));

    mdash()
        .arg("--config")
        .arg(&config)
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("MANTENIMIENTOS"));
}

#[test]
fn test_missing_source_is_a_config_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("machdash.conf");
    let db = dir.path().join("audit.sqlite");

    mdash()
        .arg("--config")
        .arg(&config)
        .arg("--db")
        .arg(&db)
        .args(["--user", "a", "--password", "b", "dashboard"])
        .env_remove("MACHDASH_USER")
        .assert()
        .failure()
        .stderr(contains("no workbook configured"));
}

#[test]
fn test_hash_password_command() {
    mdash()
        .args(["hash-password", "hunter2"])
        .assert()
        .success()
        .stdout(contains("$argon2id$"));

    mdash()
        .arg("hash-password")
        .write_stdin("from-stdin\n")
        .assert()
        .success()
        .stdout(contains("$argon2id$"));
}

#[test]
fn test_shell_session() {
    let env = TestEnv::new();

    env.cmd()
        .arg("shell")
        .write_stdin("machine 7\nmachine 404\ntoggle Norte\nsites\nmonth 2025-05\nrefresh\nbogus\nquit\n")
        .assert()
        .success()
        .stdout(contains("Logged in as operator"))
        .stdout(contains("OVERDUE"))
        .stdout(contains("[ ] Norte"))
        .stdout(contains("No data for the selected filters."))
        .stdout(contains("Workbook reloaded"))
        .stdout(contains("Unknown command 'bogus'"))
        .stdout(contains("Session closed."))
        .stderr(contains("Unknown machine: 404"));

    env.cmd()
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("refresh"));
}

#[test]
fn test_shell_ends_at_end_of_input() {
    let env = TestEnv::new();

    env.cmd()
        .arg("shell")
        .write_stdin("show\n")
        .assert()
        .success()
        .stdout(contains("Session closed."));
}
