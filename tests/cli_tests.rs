//! Integration tests for CLI functionality

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get path to compiled binary
fn ibmctl_bin() -> &'static std::path::Path {
    assert_cmd::cargo::cargo_bin!("ibmctl")
}

/// Command isolated from the user's config file and API key variables
fn ibmctl(home: &TempDir) -> Command {
    let mut cmd = Command::new(ibmctl_bin());
    cmd.env("HOME", home.path())
        .env_remove("IBMCLOUD_API_KEY")
        .env_remove("IC_API_KEY")
        .env_remove("IBMCTL_CONTEXT");
    cmd
}

#[test]
fn test_help_flag() {
    let home = TempDir::new().unwrap();
    ibmctl(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Manage IBM Cloud App Configuration and CIS firewall access rules",
        ));
}

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    ibmctl(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ibmctl"));
}

#[test]
fn test_invalid_output_format() {
    let home = TempDir::new().unwrap();
    ibmctl(&home)
        .args(["get", "env", "-o", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'xml'"));
}

#[test]
fn test_feature_requires_env() {
    let home = TempDir::new().unwrap();
    ibmctl(&home)
        .args(["get", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--env"));
}

#[test]
fn test_missing_guid() {
    let home = TempDir::new().unwrap();
    ibmctl(&home)
        .args(["get", "env", "--apikey", "dummy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("App Configuration instance GUID"));
}

#[test]
fn test_missing_zone_for_rules() {
    let home = TempDir::new().unwrap();
    ibmctl(&home)
        .args(["get", "rules", "--crn", "crn:v1", "--apikey", "dummy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--zone"));
}

#[test]
fn test_missing_apikey() {
    let home = TempDir::new().unwrap();
    ibmctl(&home)
        .args(["get", "env", "--guid", "g-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No IBM Cloud API key found"));
}

#[test]
fn test_unknown_context() {
    let home = TempDir::new().unwrap();
    ibmctl(&home)
        .args(["get", "env", "--context", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Context 'nowhere' not found"));
}

#[test]
fn test_config_lifecycle() {
    let home = TempDir::new().unwrap();

    ibmctl(&home)
        .args(["config", "get-contexts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No contexts configured"));

    ibmctl(&home)
        .args([
            "config",
            "set-context",
            "prod",
            "--region",
            "eu-de",
            "--guid",
            "guid-123",
            "--apikey",
            "abcdefgh1234",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created context 'prod'"));

    assert!(home.path().join(".ibmctl").join("config.json").exists());

    ibmctl(&home)
        .args(["config", "current-context"])
        .assert()
        .success()
        .stdout(predicate::str::contains("prod"))
        .stdout(predicate::str::contains("guid-123"));

    ibmctl(&home)
        .args(["config", "view"])
        .assert()
        .success()
        .stdout(predicate::str::contains("****1234"))
        .stdout(predicate::str::contains("abcdefgh1234").not());

    ibmctl(&home)
        .args(["config", "delete-context", "prod"])
        .assert()
        .success();

    ibmctl(&home)
        .args(["config", "use-context", "prod"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_set_context_requires_instance() {
    let home = TempDir::new().unwrap();
    ibmctl(&home)
        .args(["config", "set-context", "empty", "--region", "us-east"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--guid or --crn is required"));
}
