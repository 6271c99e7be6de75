#![allow(deprecated)] // Command::cargo_bin

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

/// Command isolated from the caller's credentials and settings files
fn astroform(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("astroform").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home)
        .env_remove("ASTRONOMER_API_TOKEN")
        .env_remove("ASTRONOMER_ORGANIZATION_ID")
        .env_remove("ASTRONOMER_API_URL")
        .env_remove("ASTROFORM_CONFIG_PATH");
    cmd
}

/// Credentials pointing at a port nothing listens on
const OFFLINE: [&str; 6] = [
    "--token",
    "test-token",
    "--organization",
    "org-1",
    "--api-url",
    "http://127.0.0.1:9/organizations",
];

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("astroform").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("import"))
        .stdout(predicate::str::contains("org"))
        .stdout(predicate::str::contains("--token"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("astroform").unwrap();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("astroform"));
}

#[test]
fn test_invalid_command() {
    let mut cmd = Command::cargo_bin("astroform").unwrap();
    cmd.arg("invalid-command").assert().failure();
}

#[test]
fn test_unknown_kind() {
    let mut cmd = Command::cargo_bin("astroform").unwrap();
    cmd.args(["import", "pipeline", "p-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_missing_token() {
    let home = TempDir::new().unwrap();
    astroform(home.path())
        .args(["org", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no API token configured"));
}

#[test]
fn test_missing_organization() {
    let home = TempDir::new().unwrap();
    astroform(home.path())
        .env("ASTRONOMER_API_TOKEN", "from-env")
        .args(["org", "get"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no organization configured"));
}

#[test]
fn test_org_list_needs_no_organization() {
    let home = TempDir::new().unwrap();
    astroform(home.path())
        .args(["--token", "test-token", "--api-url", "http://127.0.0.1:9/organizations"])
        .args(["org", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to list organizations"))
        .stderr(predicate::str::contains("no organization configured").not());
}

#[test]
fn test_org_get_by_id_needs_no_organization() {
    let home = TempDir::new().unwrap();
    astroform(home.path())
        .env("ASTRONOMER_API_TOKEN", "from-env")
        .args(["--api-url", "http://127.0.0.1:9/organizations"])
        .args(["org", "get", "org-2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read organization"))
        .stderr(predicate::str::contains("no organization configured").not());
}

#[test]
fn test_config_path_must_exist() {
    let home = TempDir::new().unwrap();
    astroform(home.path())
        .env("ASTROFORM_CONFIG_PATH", home.path().join("absent.yaml"))
        .args(["org", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn test_unknown_settings_key() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("astroform.yaml"), "tokn: abc\n").unwrap();
    astroform(home.path())
        .args(["org", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse"));
}

#[test]
fn test_missing_model_file() {
    let home = TempDir::new().unwrap();
    astroform(home.path())
        .args(OFFLINE)
        .args(["create", "cluster", "absent.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unable to read model file"));
}

#[test]
fn test_invalid_plan_is_rejected_before_sending() {
    let home = TempDir::new().unwrap();
    let plan = home.path().join("deployment.json");
    std::fs::write(
        &plan,
        r#"{
            "name": "etl",
            "workspace_id": "ws-1",
            "astro_runtime_version": "9.1.0",
            "type": "STANDARD",
            "executor": "CELERY",
            "scheduler_size": "SMALL",
            "cloud_provider": "AWS",
            "region": "us-east-1"
        }"#,
    )
    .unwrap();

    astroform(home.path())
        .args(OFFLINE)
        .arg("create")
        .arg("deployment")
        .arg(&plan)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to create deployment"))
        .stderr(predicate::str::contains("default worker queue"));
}

#[test]
fn test_read_requires_id() {
    let home = TempDir::new().unwrap();
    let state = home.path().join("workspace.json");
    std::fs::write(&state, r#"{"name": "analytics"}"#).unwrap();

    astroform(home.path())
        .args(OFFLINE)
        .arg("read")
        .arg("workspace")
        .arg(&state)
        .assert()
        .failure()
        .stderr(predicate::str::contains("workspace has no id"));
}

#[test]
fn test_malformed_model() {
    let home = TempDir::new().unwrap();
    let plan = home.path().join("cluster.json");
    std::fs::write(&plan, r#"{"name": "prod", "cloud_provider": "IBM"}"#).unwrap();

    astroform(home.path())
        .args(OFFLINE)
        .arg("create")
        .arg("cluster")
        .arg(&plan)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid model"));
}
