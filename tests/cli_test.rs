//! Integration tests for the serene binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn serene(data: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("serene"));
    cmd.env_remove("SERENE_HOME")
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(data.path());
    cmd
}

fn json_output(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.arg("--output").arg("json").output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("serene"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("meditation timer"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("serene"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn timer_session_is_recorded() {
    let data = TempDir::new().unwrap();

    let report = json_output(serene(&data).args(["timer", "5s", "--tick-ms", "0"]));
    assert_eq!(report["completed"], true);
    assert_eq!(report["elapsedSeconds"], 5);
    assert_eq!(report["todaySeconds"], 5);
    assert_eq!(report["sessionCount"], 1);
    assert_eq!(report["streakDays"], 1);
    assert_eq!(report["newAchievements"][0], "firstSession");

    let summary = json_output(serene(&data).arg("stats"));
    assert_eq!(summary["todaySeconds"], 5);
    assert_eq!(summary["totalSeconds"], 5);
    assert_eq!(summary["streak"]["current"], 1);
}

#[test]
fn timer_stopped_early_gets_partial_credit() {
    let data = TempDir::new().unwrap();

    let report = json_output(serene(&data).args([
        "timer",
        "10m",
        "--tick-ms",
        "0",
        "--stop-after",
        "90",
    ]));
    assert_eq!(report["completed"], false);
    assert_eq!(report["elapsedSeconds"], 90);
    assert_eq!(report["todaySeconds"], 90);
    assert_eq!(report["sessionCount"], 0);
}

#[test]
fn timer_rejects_bad_duration() {
    let data = TempDir::new().unwrap();
    serene(&data)
        .args(["timer", "0", "--tick-ms", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"))
        .stderr(predicate::str::contains("invalid duration"));
}

#[test]
fn breathing_session_is_recorded() {
    let data = TempDir::new().unwrap();

    let report = json_output(serene(&data).args(["breathe", "-p", "coherent", "--tick-ms", "0"]));
    assert_eq!(report["completed"], true);
    assert_eq!(report["pattern"], "coherent");
    assert_eq!(report["durationSeconds"], 50);
    assert_eq!(report["todaySessions"], 1);
    assert_eq!(report["newAchievements"][0], "firstBreath");

    let usage = json_output(serene(&data).args(["stats", "patterns"]));
    assert_eq!(usage["coherent"], 1);

    let patterns = json_output(serene(&data).args(["pattern", "list"]));
    assert_eq!(patterns["selected"], "coherent");
}

#[test]
fn unknown_pattern_fails() {
    let data = TempDir::new().unwrap();
    serene(&data)
        .args(["breathe", "-p", "square-dance", "--tick-ms", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("square-dance"));
}

#[test]
fn custom_pattern_validation() {
    let data = TempDir::new().unwrap();

    serene(&data)
        .args(["pattern", "custom", "--inhale", "0", "--exhale", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"));

    let saved = json_output(serene(&data).args([
        "pattern", "custom", "--inhale", "3", "--hold", "1", "--exhale", "5", "--select",
    ]));
    assert_eq!(saved["id"], "custom");
    assert_eq!(saved["inhale"], 3);
    assert_eq!(saved["exhale"], 5);
    assert_eq!(saved["selected"], true);
}

#[test]
fn settings_persist() {
    let data = TempDir::new().unwrap();

    serene(&data).args(["settings", "goal", "20"]).assert().success();
    serene(&data).args(["settings", "theme", "dark"]).assert().success();
    serene(&data)
        .args(["settings", "sound", "rain", "--volume", "2.5"])
        .arg("--output")
        .arg("json")
        .assert()
        .success();

    let settings = json_output(serene(&data).arg("settings"));
    assert_eq!(settings["dailyGoalMinutes"], 20);
    assert_eq!(settings["theme"], "dark");
    assert_eq!(settings["backgroundSound"], "rain");
    assert_eq!(settings["volume"], 1.0);
}

#[test]
fn corrupt_config_is_an_error() {
    let data = TempDir::new().unwrap();
    fs::write(data.path().join("config.yaml"), "timer: [unclosed").unwrap();

    serene(&data)
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn config_sets_default_duration() {
    let data = TempDir::new().unwrap();
    fs::write(
        data.path().join("config.yaml"),
        "timer:\n  default_duration_minutes: 1\n  tick_interval_ms: 0\n",
    )
    .unwrap();

    let report = json_output(serene(&data).arg("timer"));
    assert_eq!(report["durationSeconds"], 60);
    assert_eq!(report["completed"], true);
}

#[test]
fn reset_requires_force() {
    let data = TempDir::new().unwrap();
    json_output(serene(&data).args(["timer", "3s", "--tick-ms", "0"]));

    serene(&data)
        .arg("reset")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    serene(&data)
        .args(["reset", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("deleted"));

    let summary = json_output(serene(&data).arg("stats"));
    assert_eq!(summary["totalSeconds"], 0);
}

#[test]
fn stats_views_render() {
    let data = TempDir::new().unwrap();
    json_output(serene(&data).args(["timer", "2m", "--tick-ms", "0"]));

    serene(&data)
        .args(["stats", "week"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Active days: 1/7"));
    serene(&data)
        .args(["stats", "heatmap"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mon"));
    serene(&data)
        .args(["stats", "achievements"])
        .assert()
        .success()
        .stdout(predicate::str::contains("First Sit"));
}

#[test]
fn completions_generate() {
    let data = TempDir::new().unwrap();
    serene(&data)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("serene"));
}
