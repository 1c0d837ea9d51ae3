//! Binary tests for the `wfstudio` commands

mod common;

use assert_cmd::Command;
use common::fixtures::CI_WORKFLOW;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn wfstudio() -> Command {
    Command::cargo_bin("wfstudio").unwrap()
}

#[test]
fn test_help_lists_commands() {
    wfstudio()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("publish"))
        .stdout(predicate::str::contains("generate"));
}

#[test]
fn test_parse_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ci.yml");
    fs::write(&path, CI_WORKFLOW).unwrap();

    wfstudio()
        .arg("parse")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""displayName": "ci""#))
        .stdout(predicate::str::contains(r#""uses": "actions/checkout@v4""#))
        .stdout(predicate::str::contains(r#""run": "npm test""#));
}

#[test]
fn test_parse_stdin_garbage_yields_no_steps() {
    wfstudio()
        .args(["parse", "-"])
        .write_stdin("garbage\nlines\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""steps": []"#));
}

#[test]
fn test_generate_from_step_array() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("steps.json");
    fs::write(
        &path,
        r#"[{"name": "Checkout", "uses": "actions/checkout@v4"}, {"name": "Test", "run": "npm test"}]"#,
    )
    .unwrap();

    wfstudio()
        .arg("generate")
        .arg(&path)
        .args(["--name", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("name: demo\non:\n"))
        .stdout(predicate::str::ends_with(
            "      - name: Checkout\n        uses: actions/checkout@v4\n      - name: Test\n        run: npm test\n",
        ));
}

#[test]
fn test_generate_empty_document_emits_placeholder() {
    wfstudio()
        .args(["generate", "-"])
        .write_stdin(r#"{"displayName": "empty", "steps": []}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "      - name: Hello\n        run: echo \"Hello from workflow-studio\"\n",
        ));
}

#[test]
fn test_generate_rejects_bad_json() {
    wfstudio()
        .args(["generate", "-"])
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected a workflow document"));
}

#[test]
fn test_parse_missing_file_fails() {
    wfstudio()
        .args(["parse", "/nonexistent/ci.yml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn test_publish_failure_reports_error_once() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/repos/acme/widgets")
        .with_status(401)
        .with_body(r#"{"message": "Bad credentials"}"#)
        .create();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ci.yml");
    fs::write(&path, CI_WORKFLOW).unwrap();
    let empty_path = dir.path().join("bin");
    fs::create_dir(&empty_path).unwrap();

    let assert = wfstudio()
        .args(["publish", "--repo", "https://github.com/acme/widgets", "--file"])
        .arg(&path)
        .env("PATH", &empty_path)
        .env("GITHUB_TOKEN", "test-token")
        .env("GITHUB_API_URL", server.url())
        .env_remove("GH_HOST")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Publish failed"));

    mock.assert();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert_eq!(stderr.matches("Bad credentials").count(), 1, "{stderr}");
}
