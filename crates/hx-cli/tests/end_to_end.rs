// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use assert_cmd::cargo::cargo_bin_cmd;
use hx_test_utils::HamsterFixture;
use std::path::Path;

fn fixture() -> HamsterFixture {
    let fixture = HamsterFixture::new().unwrap();
    fixture
        .add_fact("coding", "Work", "2024-03-11 09:00:00", Some("2024-03-11 10:30:00"))
        .unwrap();
    fixture
}

fn hamster_xls(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("hamster-xls");
    cmd.env("HAMSTER_XLS_HOME", home).env_remove("RUST_LOG");
    cmd
}

#[test]
fn writes_workbook_and_reports_path() {
    let fixture = fixture();
    let home = tempfile::tempdir().unwrap();
    let out = home.path().join("week.xlsx");

    let output = hamster_xls(home.path())
        .args(["-s", "2024-03-11", "-e", "2024-03-17", "-d"])
        .arg(fixture.path())
        .arg(&out)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    assert!(stdout.contains("week.xlsx"), "{stdout}");
    assert!(stdout.contains("1 facts, 1.50 h"), "{stdout}");
    assert_eq!(&std::fs::read(&out).unwrap()[0..2], b"PK");
}

#[test]
fn user_config_supplies_database_and_unit() {
    let fixture = fixture();
    let home = tempfile::tempdir().unwrap();
    std::fs::write(
        home.path().join("config.toml"),
        format!(
            "database = {:?}\nunit = \"minutes\"\n",
            fixture.path().display().to_string()
        ),
    )
    .unwrap();

    let output = hamster_xls(home.path())
        .args(["--dry-run", "-s", "2024-03-11", "-e", "2024-03-11"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    assert!(stdout.contains("Total: 90 min"), "{stdout}");
}

#[test]
fn show_config_reports_origins() {
    let home = tempfile::tempdir().unwrap();

    let output = hamster_xls(home.path())
        .env("HAMSTER_XLS_DAY_START", "04:30")
        .args(["--show-config", "--unit", "minutes"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    assert!(stdout.contains("day-start=\"04:30\" (from environment)"), "{stdout}");
    assert!(stdout.contains("unit=\"minutes\" (from command line)"), "{stdout}");
}

#[test]
fn errors_exit_with_status_one() {
    let home = tempfile::tempdir().unwrap();

    let assert = hamster_xls(home.path())
        .args(["-n", "-d"])
        .arg(home.path().join("missing.db"))
        .assert()
        .failure()
        .code(1);
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("missing.db"), "{stderr}");
}

#[test]
fn unknown_config_keys_are_rejected() {
    let home = tempfile::tempdir().unwrap();
    std::fs::write(home.path().join("config.toml"), "colour = \"blue\"\n").unwrap();

    hamster_xls(home.path()).arg("-n").assert().failure().code(1);
}

#[test]
fn missing_config_file_is_an_error() {
    let home = tempfile::tempdir().unwrap();

    let assert = hamster_xls(home.path())
        .args(["-n", "--config"])
        .arg(home.path().join("extra.toml"))
        .assert()
        .failure();
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("extra.toml"), "{stderr}");
}
