//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use similar_asserts::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn confmerge() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("confmerge"));
    // Keep host environment out of the captured overrides
    cmd.env_remove("MY_VAR").env_remove("MY_LBDNS");
    cmd
}

fn seed_handoff(dir: &Path) {
    fs::write(dir.join("1.json"), "db.example.com\n").expect("write 1.json");
    fs::write(dir.join("2.json"), "lb.example.com\n").expect("write 2.json");
    fs::write(
        dir.join("splunk_config.json"),
        r#"{"splunk_search_password":"s1","splunk_delete_password":"d1","splunk_event_collector_token":"tok1"}"#,
    )
    .expect("write splunk_config.json");
    fs::write(dir.join("response.json"), r#"{"foo":"bar"}"#).expect("write response.json");
}

#[test]
fn test_cli_version() {
    let mut cmd = confmerge();
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains("confmerge"));
}

#[test]
fn test_cli_help() {
    let mut cmd = confmerge();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Merge provisioning handoff files"))
        .stdout(predicate::str::contains("merge"))
        .stdout(predicate::str::contains("inspect"));
}

#[test]
fn test_merge_writes_all_five_keys() {
    let tmp = TempDir::new().expect("tmp");
    seed_handoff(tmp.path());

    confmerge().current_dir(tmp.path()).arg("merge").assert().success();

    let merged: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(tmp.path().join("response.json")).expect("read"))
            .expect("json");
    assert_eq!(merged["foo"], "bar");
    assert_eq!(merged["splunk_search_password"], "s1");
    assert_eq!(merged["splunk_delete_password"], "d1");
    assert_eq!(merged["splunk_event_collector_token"], "tok1");
    assert_eq!(merged["external_db_location"], "db.example.com");
    assert_eq!(merged["haproxy_server"], "lb.example.com");
}

#[test]
fn test_merge_output_is_four_space_indented() {
    let tmp = TempDir::new().expect("tmp");
    seed_handoff(tmp.path());

    confmerge().current_dir(tmp.path()).arg("merge").assert().success();

    let content = fs::read_to_string(tmp.path().join("response.json")).expect("read");
    assert!(content.starts_with("{\n    \""), "expected 4-space indent, got:\n{content}");
}

#[test]
fn test_merge_is_idempotent() {
    let tmp = TempDir::new().expect("tmp");
    seed_handoff(tmp.path());

    confmerge().current_dir(tmp.path()).arg("merge").assert().success();
    let first = fs::read_to_string(tmp.path().join("response.json")).expect("read first");

    confmerge().current_dir(tmp.path()).arg("merge").assert().success();
    let second = fs::read_to_string(tmp.path().join("response.json")).expect("read second");

    assert_eq!(first, second);
}

#[test]
fn test_merge_aborts_on_invalid_credentials_without_touching_response() {
    let tmp = TempDir::new().expect("tmp");
    seed_handoff(tmp.path());
    fs::write(tmp.path().join("splunk_config.json"), "{broken").expect("corrupt");
    let before = fs::read_to_string(tmp.path().join("response.json")).expect("read before");

    confmerge()
        .current_dir(tmp.path())
        .arg("merge")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid JSON"));

    let after = fs::read_to_string(tmp.path().join("response.json")).expect("read after");
    assert_eq!(before, after);
}

#[test]
fn test_merge_aborts_when_response_is_missing() {
    let tmp = TempDir::new().expect("tmp");
    seed_handoff(tmp.path());
    fs::remove_file(tmp.path().join("response.json")).expect("remove");

    confmerge()
        .current_dir(tmp.path())
        .arg("merge")
        .assert()
        .failure()
        .stderr(predicate::str::contains("response.json"));

    assert!(!tmp.path().join("response.json").exists());
}

#[test]
fn test_merge_dry_run_prints_without_writing() {
    let tmp = TempDir::new().expect("tmp");
    seed_handoff(tmp.path());
    let before = fs::read_to_string(tmp.path().join("response.json")).expect("read before");

    confmerge()
        .current_dir(tmp.path())
        .args(["merge", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"external_db_location\": \"db.example.com\""));

    let after = fs::read_to_string(tmp.path().join("response.json")).expect("read after");
    assert_eq!(before, after);
}

#[test]
fn test_merge_env_values_are_not_applied() {
    let tmp = TempDir::new().expect("tmp");
    seed_handoff(tmp.path());

    confmerge()
        .current_dir(tmp.path())
        .env("MY_VAR", "env-db.example.com")
        .env("MY_LBDNS", "env-lb.example.com")
        .arg("merge")
        .assert()
        .success();

    let content = fs::read_to_string(tmp.path().join("response.json")).expect("read");
    assert!(!content.contains("env-db.example.com"));
    let merged: serde_json::Value = serde_json::from_str(&content).expect("json");
    assert_eq!(merged["external_db_location"], "db.example.com");
}

#[test]
fn test_merge_respects_path_flags() {
    let tmp = TempDir::new().expect("tmp");
    seed_handoff(tmp.path());
    fs::rename(tmp.path().join("response.json"), tmp.path().join("deploy.json"))
        .expect("rename");

    confmerge()
        .current_dir(tmp.path())
        .args(["merge", "--response-file", "deploy.json"])
        .assert()
        .success();

    let merged: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(tmp.path().join("deploy.json")).expect("read"))
            .expect("json");
    assert_eq!(merged["haproxy_server"], "lb.example.com");
}

#[test]
fn test_merge_reads_confmerge_toml() {
    let tmp = TempDir::new().expect("tmp");
    seed_handoff(tmp.path());
    fs::rename(tmp.path().join("splunk_config.json"), tmp.path().join("creds.json"))
        .expect("rename");
    fs::write(tmp.path().join("confmerge.toml"), "credentials_file = 'creds.json'\n")
        .expect("write config");

    confmerge().current_dir(tmp.path()).arg("merge").assert().success();

    let merged: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(tmp.path().join("response.json")).expect("read"))
            .expect("json");
    assert_eq!(merged["splunk_event_collector_token"], "tok1");
}

#[test]
fn test_inspect_reports_without_secrets_or_writes() {
    let tmp = TempDir::new().expect("tmp");
    seed_handoff(tmp.path());
    fs::write(
        tmp.path().join("splunk_config.json"),
        r#"{"splunk_search_password":"super-secret-search-pw","splunk_delete_password":"super-secret-delete-pw","splunk_event_collector_token":"super-secret-hec-token"}"#,
    )
    .expect("reseed credentials");
    let before = fs::read_to_string(tmp.path().join("response.json")).expect("read before");

    confmerge()
        .current_dir(tmp.path())
        .args(["inspect", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("external_db_location: db.example.com"))
        .stdout(predicate::str::contains("splunk_search_password: set"))
        .stdout(predicate::str::contains("super-secret").not());

    let after = fs::read_to_string(tmp.path().join("response.json")).expect("read after");
    assert_eq!(before, after);
}
