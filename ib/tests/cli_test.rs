//! CLI tests for the `ib` binary

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `ib` with config, data and working directories isolated in a temp dir
fn ib(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ib").expect("ib binary");
    cmd.current_dir(temp.path())
        .env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join("config"))
        .env("XDG_DATA_HOME", temp.path().join("data"))
        .env_remove("INTENTBRIDGE_API_BASE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let temp = TempDir::new().unwrap();
    ib(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("ask"))
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("INTENTBRIDGE_API_BASE"));
}

#[test]
fn test_no_command_prints_help() {
    let temp = TempDir::new().unwrap();
    ib(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_render_file_as_outline() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("plan.json");
    fs::write(
        &path,
        r#"{"architecture": {"frontend": "React"}, "timeline": "6 weeks"}"#,
    )
    .unwrap();

    ib(&temp)
        .arg("render")
        .arg(&path)
        .assert()
        .success()
        .stdout("== Architecture ==\n  Frontend:\n    React\n\n== Timeline ==\n  6 weeks\n");
}

#[test]
fn test_render_stdin_as_json() {
    let temp = TempDir::new().unwrap();
    ib(&temp)
        .args(["render", "-", "--format", "json"])
        .write_stdin(r#"{"nextSteps": ["Design", null]}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"Next Steps\""))
        .stdout(predicate::str::contains("Design • —"));
}

#[test]
fn test_render_rejects_non_object() {
    let temp = TempDir::new().unwrap();
    ib(&temp)
        .args(["render", "-"])
        .write_stdin("[1, 2, 3]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Plan must be a JSON object"));
}

#[test]
fn test_ask_unreachable_service_reports_error() {
    let temp = TempDir::new().unwrap();
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    ib(&temp)
        .args(["ask", "Build a todo app", "--api-base"])
        .arg(format!("http://127.0.0.1:{}/api/v1", port))
        .assert()
        .failure()
        .stdout(predicate::str::contains("Error connecting to the bridge."));
}

#[test]
fn test_ask_rejects_bad_base_url() {
    let temp = TempDir::new().unwrap();
    ib(&temp)
        .args(["ask", "hi", "--api-base", "ftp://nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("http:// or https://"));
}

#[test]
fn test_config_file_is_used() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(".intentbridge.yml"),
        "api:\n  base-url: not-a-url\n",
    )
    .unwrap();

    ib(&temp)
        .args(["ask", "hi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not-a-url"));
}
