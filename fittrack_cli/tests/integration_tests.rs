//! Integration tests for the fittrack binary.
//!
//! These tests verify end-to-end behavior including:
//! - Calculator subcommands
//! - Interactive session commands driving one in-memory store
//! - Settings validation at the form boundary
//! - Simulated step feed and mock meal analysis
//! - Config file overrides and `init-config`

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("fittrack"))
}

/// Helper to write a config with fast feeds so sessions finish quickly
fn fast_config(temp_dir: &TempDir, extra: &str) -> PathBuf {
    let path = temp_dir.path().join("config.toml");
    let contents = format!(
        "[sensor]\nupdate_interval_ms = 1\n\n[analysis]\ndelay_ms = 1\n\n{}",
        extra
    );
    fs::write(&path, contents).expect("Failed to write config");
    path
}

fn session(temp_dir: &TempDir) -> Command {
    let mut cmd = cli();
    cmd.arg("session")
        .arg("--config")
        .arg(fast_config(temp_dir, ""));
    cmd
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Fitness tracking: steps, calories, meals and goals",
        ));
}

#[test]
fn test_bmr_command() {
    cli()
        .args(["bmr", "--weight", "70", "--height", "175", "--age", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BMR: 1702 kcal/day"));

    cli()
        .args(["bmr", "--weight", "60", "--height", "165", "--age", "25", "--female"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BMR: 1417 kcal/day"));
}

#[test]
fn test_needs_unknown_activity_falls_back_to_moderate() {
    cli()
        .args(["needs", "--bmr", "1500", "--activity", "unknownLevel"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(moderate): 2325 kcal"));
}

#[test]
fn test_macros_defaults() {
    cli()
        .args(["macros", "--calories", "2000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Protein: 150 g"))
        .stdout(predicate::str::contains("Carbs:   200 g"))
        .stdout(predicate::str::contains("Fat:     67 g"));
}

#[test]
fn test_calculators_ignore_config_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let broken = fast_config(&temp_dir, "[goals]\ndaily_steps = 0\n");

    cli()
        .args(["needs", "--bmr", "1600", "--activity", "light"])
        .arg("--config")
        .arg(&broken)
        .assert()
        .success()
        .stdout(predicate::str::contains("(light): 2200 kcal"));

    cli()
        .arg("progress")
        .arg("--config")
        .arg(&broken)
        .env("XDG_CONFIG_HOME", temp_dir.path())
        .assert()
        .success();
}

#[test]
fn test_predict_deficit_is_negative() {
    cli()
        .args(["predict", "--balance", "-1100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-1.00 kg"));
}

#[test]
fn test_status_json_defaults() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output = cli()
        .arg("status")
        .arg("--json")
        .arg("--config")
        .arg(fast_config(&temp_dir, ""))
        .output()
        .expect("Failed to run status");
    assert!(output.status.success());

    let summary: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("status --json is not JSON");
    assert_eq!(summary["steps"], 0);
    assert_eq!(summary["daily_steps_goal"], 10000);
    assert_eq!(summary["calories_remaining"], 2000);
    assert_eq!(summary["weight"], 70.0);
    assert_eq!(summary["stride_length"], 0.762);
}

#[test]
fn test_config_overrides_profile() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = fast_config(&temp_dir, "[profile]\nweight_kg = 80.0\n");

    cli()
        .arg("status")
        .arg("--config")
        .arg(config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Weight: 80 kg (target 70 kg)"))
        .stdout(predicate::str::contains("10.0 kg to lose"));
}

#[test]
fn test_invalid_config_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = fast_config(&temp_dir, "[goals]\ndaily_steps = 0\n");

    cli()
        .arg("status")
        .arg("--config")
        .arg(config)
        .assert()
        .failure();
}

#[test]
fn test_session_steps_and_meals() {
    let temp_dir = tempfile::tempdir().unwrap();

    session(&temp_dir)
        .write_stdin("steps 100\nmeal 350 Salad\nstatus\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Steps: 100 (3 kcal burned)"))
        .stdout(predicate::str::contains("✓ Logged Salad (350 kcal)"))
        .stdout(predicate::str::contains("Calories Consumed: 350"))
        .stdout(predicate::str::contains("Calories Remaining: 1653"))
        .stdout(predicate::str::contains("Meals Logged: 1"));
}

#[test]
fn test_session_reset_keeps_meals() {
    let temp_dir = tempfile::tempdir().unwrap();

    session(&temp_dir)
        .write_stdin("steps 15000\nmeal 200 Toast\nstatus\nreset\nstatus\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Steps: 15000 / 10000 (100%)"))
        .stdout(predicate::str::contains("Steps: 0 / 10000 (0%)"))
        .stdout(predicate::str::contains("Calories Consumed: 200"));
}

#[test]
fn test_session_settings_saved() {
    let temp_dir = tempfile::tempdir().unwrap();

    session(&temp_dir)
        .write_stdin("settings 75 0.8 8000 1800 72\nstatus\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Settings Saved"))
        .stdout(predicate::str::contains("Steps: 0 / 8000"))
        .stdout(predicate::str::contains("Weight: 75 kg (target 72 kg)"))
        .stdout(predicate::str::contains("3.0 kg to lose"));
}

#[test]
fn test_session_settings_rejected_changes_nothing() {
    let temp_dir = tempfile::tempdir().unwrap();

    session(&temp_dir)
        .write_stdin("settings 75 0.8 abc 1800 72\nstatus\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "✗ Invalid Steps Goal: Please enter a valid daily steps goal.",
        ))
        .stdout(predicate::str::contains("Weight: 70 kg (target 70 kg)"))
        .stdout(predicate::str::contains("Steps: 0 / 10000"));
}

#[test]
fn test_session_analyze_and_confirm() {
    let temp_dir = tempfile::tempdir().unwrap();

    session(&temp_dir)
        .write_stdin("analyze\ny\nstatus\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Chicken Salad with Quinoa"))
        .stdout(predicate::str::contains("✓ Meal added"))
        .stdout(predicate::str::contains("Calories Consumed: 520"));
}

#[test]
fn test_session_analyze_discard() {
    let temp_dir = tempfile::tempdir().unwrap();

    session(&temp_dir)
        .write_stdin("analyze\nn\nstatus\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Discarded"))
        .stdout(predicate::str::contains("Calories Consumed: 0"));
}

#[test]
fn test_session_without_camera() {
    let temp_dir = tempfile::tempdir().unwrap();

    session(&temp_dir)
        .arg("--no-camera")
        .write_stdin("analyze\nstatus\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No access to camera"))
        .stdout(predicate::str::contains("Meals Logged: 0"));
}

#[test]
fn test_session_simulated_walk() {
    let temp_dir = tempfile::tempdir().unwrap();

    session(&temp_dir)
        .arg("--demo-steps")
        .arg("10")
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Simulated walk: 5 steps"));
}

#[test]
fn test_suggestions_by_category() {
    cli()
        .args(["suggestions", "--category", "highProtein"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Steak with Roasted Brussels Sprouts"))
        .stdout(predicate::str::contains("Grilled Chicken Salad").not());
}

#[test]
fn test_suggestions_unknown_category_fails() {
    cli()
        .args(["suggestions", "--category", "keto"])
        .assert()
        .failure();
}

#[test]
fn test_progress_overview() {
    cli()
        .arg("progress")
        .assert()
        .success()
        .stdout(predicate::str::contains("Average steps: 7771"))
        .stdout(predicate::str::contains("Best day: Sat (10200 steps)"))
        .stdout(predicate::str::contains("Weight change: -2.0 kg"));
}

#[test]
fn test_session_progress_includes_today() {
    let temp_dir = tempfile::tempdir().unwrap();

    session(&temp_dir)
        .write_stdin("steps 4000\nmeal 650 Dinner\nprogress\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Today"))
        .stdout(predicate::str::contains("+543"))
        // (54400 + 4000) / 8
        .stdout(predicate::str::contains("Average steps: 7300"))
        // 70.0 now against 75.2 in week 1
        .stdout(predicate::str::contains("Weight change: -5.2 kg"));
}

#[test]
fn test_steps_saturate_instead_of_crashing() {
    let temp_dir = tempfile::tempdir().unwrap();

    session(&temp_dir)
        .write_stdin("steps 9223372036854775807\nsteps 1\nstatus\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Steps: 9223372036854775807 / 10000 (100%)"));
}

#[test]
fn test_analyze_command() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output = cli()
        .args(["analyze", "--json", "--config"])
        .arg(fast_config(&temp_dir, ""))
        .output()
        .expect("Failed to run analyze");
    assert!(output.status.success());

    let estimate: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("analyze --json is not JSON");
    assert_eq!(estimate["name"], "Chicken Salad with Quinoa");
    assert_eq!(estimate["calories"], 520);
}

#[test]
fn test_analyze_without_camera_fails() {
    let temp_dir = tempfile::tempdir().unwrap();

    cli()
        .args(["analyze", "--no-camera", "--config"])
        .arg(fast_config(&temp_dir, ""))
        .assert()
        .failure()
        .stderr(predicate::str::contains("PermissionDenied"));
}

fn init_config(path: &std::path::Path, steps_goal: &str) -> Command {
    let mut cmd = cli();
    cmd.arg("init-config")
        .arg("--config")
        .arg(path)
        .args(["--weight", "80", "--stride-length", "0.7"])
        .args(["--steps-goal", steps_goal, "--calorie-goal", "2400"])
        .args(["--target-weight", "75"]);
    cmd
}

#[test]
fn test_init_config_seeds_status() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("fittrack").join("config.toml");

    init_config(&path, "12000")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Wrote"));

    cli()
        .arg("status")
        .arg("--config")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Steps: 0 / 12000"))
        .stdout(predicate::str::contains("Weight: 80 kg (target 75 kg)"));

    // Existing files are only replaced with --force
    init_config(&path, "9000").assert().failure();
    init_config(&path, "9000").arg("--force").assert().success();
    assert!(fs::read_to_string(&path).unwrap().contains("daily_steps = 9000"));
}

#[test]
fn test_init_config_rejects_invalid_settings() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("config.toml");

    init_config(&path, "8000.5")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DailyStepsGoal"));
    assert!(!path.exists());
}
