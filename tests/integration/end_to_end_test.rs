//! End-to-end integration tests for runflow
//!
//! These tests load environment and template files from disk, run them
//! against wiremock servers, and drive the `runflow` binary itself.

use runflow::config::RunnerConfig;
use runflow::environment::load_env_file;
use runflow::executor::{StepError, StepExecutor};
use runflow::template::{load_template, Template, WorkStep};
use serde_json::json;
use std::process::Command;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{config_for, executor_for, init_test_env, write_file};

const ENV_FILE: &str = "\
# staging controller
director: 10.0.0.1
templateName : branch-tmpl
url: http://example.com
";

fn three_step_template() -> &'static str {
    r#"{
        "VersaPostStagingTemplate": [
            {"apiName": "one", "apiEndpoint": "steps/1", "apiType": "GET",
             "expectedResponseStatus": "200", "apiIndex": 1},
            {"apiName": "two", "apiEndpoint": "steps/2", "apiType": "POST",
             "expectedResponseStatus": "201", "apiIndex": 2,
             "apiPayload": {"name": "$*templateName$"}},
            {"apiName": "three", "apiEndpoint": "steps/3", "apiType": "PUT",
             "expectedResponseStatus": "200", "apiIndex": 3,
             "apiPayload": {"director": "$*director$"}}
        ]
    }"#
}

async fn mount_ok(server: &MockServer, http_method: &str, route: &str, status: u16) {
    Mock::given(method(http_method))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({"ok": true})))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_run_from_files_executes_steps_in_order() {
    let server = MockServer::start().await;
    mount_ok(&server, "GET", "/steps/1", 200).await;
    mount_ok(&server, "POST", "/steps/2", 201).await;
    mount_ok(&server, "PUT", "/steps/3", 200).await;

    let dir = TempDir::new().unwrap();
    let env_path = write_file(&dir, "staging.env", ENV_FILE);
    let template_path = write_file(&dir, "template.json", three_step_template());

    let store = load_env_file(&env_path).unwrap();
    assert_eq!(store.get("templateName"), Some("branch-tmpl"));
    assert!(!store.contains("url"));

    let template = load_template(&template_path).unwrap();
    let mut executor = executor_for(&server, store);
    let report = executor.run(&template).await;

    assert!(report.all_passed());
    assert_eq!(report.executed(), 3);

    let received = server.received_requests().await.unwrap();
    let paths: Vec<&str> = received.iter().map(|r| r.url.path()).collect();
    assert_eq!(paths, vec!["/steps/1", "/steps/2", "/steps/3"]);

    assert_eq!(received[1].body, br#"{"name":"branch-tmpl"}"#.to_vec());
    assert_eq!(received[2].body, br#"{"director":"10.0.0.1"}"#.to_vec());
}

#[tokio::test]
async fn test_status_mismatch_does_not_stop_the_run() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/first"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&server)
        .await;
    mount_ok(&server, "GET", "/second", 200).await;

    let mut executor = executor_for(&server, Default::default());
    let template = Template::new(vec![
        WorkStep::new("first", "POST", "first", "200").with_payload(Default::default()),
        WorkStep::new("second", "GET", "second", "200"),
    ]);

    let report = executor.run(&template).await;

    assert_eq!(report.executed(), 2);
    assert!(matches!(
        report.outcomes[0].error(),
        Some(StepError::StatusMismatch {
            expected: 200,
            actual: 500
        })
    ));
    assert!(report.outcomes[1].passed());
}

#[tokio::test]
async fn test_non_numeric_expected_status_fails_and_continues() {
    let server = MockServer::start().await;
    mount_ok(&server, "GET", "/first", 200).await;
    mount_ok(&server, "GET", "/second", 200).await;

    let mut executor = executor_for(&server, Default::default());
    let template = Template::new(vec![
        WorkStep::new("first", "GET", "first", "ok"),
        WorkStep::new("second", "GET", "second", "200"),
    ]);

    let report = executor.run(&template).await;

    assert_eq!(report.failed(), 1);
    assert!(matches!(
        report.outcomes[0].error(),
        Some(StepError::InvalidExpectedStatus(_))
    ));
    assert!(report.outcomes[0].error().is_some_and(StepError::request_sent));
    assert!(report.outcomes[1].passed());
}

#[tokio::test]
async fn test_fail_fast_halts_after_first_failure() {
    let server = MockServer::start().await;
    mount_ok(&server, "GET", "/first", 404).await;
    Mock::given(method("GET"))
        .and(path("/second"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    init_test_env();
    let config = config_for(&server).with_fail_fast(true);
    let mut executor = StepExecutor::new(config, Default::default()).unwrap();
    let template = Template::new(vec![
        WorkStep::new("first", "GET", "first", "200"),
        WorkStep::new("second", "GET", "second", "200"),
    ]);

    let report = executor.run(&template).await;

    assert!(report.halted);
    assert_eq!(report.executed(), 1);
    assert_eq!(report.total_steps, 2);
}

#[tokio::test]
async fn test_unreachable_server_fails_every_step() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    init_test_env();
    let mut executor =
        StepExecutor::new(RunnerConfig::new("127.0.0.1", port), Default::default()).unwrap();
    let template = Template::new(vec![
        WorkStep::new("first", "GET", "first", "200"),
        WorkStep::new("second", "GET", "second", "200"),
    ]);

    let report = executor.run(&template).await;

    assert_eq!(report.executed(), 2);
    assert_eq!(report.failed(), 2);
    assert!(report
        .failures()
        .all(|o| matches!(o.error(), Some(StepError::Request(_)))));
}

#[test]
fn test_binary_help_exits_zero() {
    let output = Command::new(env!("CARGO_BIN_EXE_runflow"))
        .arg("--help")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("--template"));
}

#[test]
fn test_binary_missing_arguments_exit_one() {
    let output = Command::new(env!("CARGO_BIN_EXE_runflow"))
        .args(["-e", "a.env", "-t", "t.json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_binary_missing_env_file_exits_one() {
    let dir = TempDir::new().unwrap();
    let template_path = write_file(&dir, "template.json", three_step_template());

    let output = Command::new(env!("CARGO_BIN_EXE_runflow"))
        .arg("-e")
        .arg(dir.path().join("missing.env"))
        .arg("-t")
        .arg(&template_path)
        .args(["-s", "127.0.0.1", "-p", "9182"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot load environment"));
}

#[test]
fn test_binary_malformed_template_exits_one() {
    let dir = TempDir::new().unwrap();
    let env_path = write_file(&dir, "staging.env", ENV_FILE);
    let template_path = write_file(&dir, "template.json", "{ not json");

    let output = Command::new(env!("CARGO_BIN_EXE_runflow"))
        .arg("-e")
        .arg(&env_path)
        .arg("-t")
        .arg(&template_path)
        .args(["-s", "127.0.0.1", "-p", "9182"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
}

#[tokio::test]
async fn test_binary_exits_zero_when_steps_fail() {
    let server = MockServer::start().await;
    mount_ok(&server, "GET", "/steps/1", 500).await;
    mount_ok(&server, "POST", "/steps/2", 201).await;
    mount_ok(&server, "PUT", "/steps/3", 200).await;

    let dir = TempDir::new().unwrap();
    let env_path = write_file(&dir, "staging.env", ENV_FILE);
    let template_path = write_file(&dir, "template.json", three_step_template());
    let port = server.address().port().to_string();

    let output = tokio::task::spawn_blocking(move || {
        Command::new(env!("CARGO_BIN_EXE_runflow"))
            .arg("-e")
            .arg(&env_path)
            .arg("-t")
            .arg(&template_path)
            .args(["-s", "127.0.0.1", "-p", port.as_str()])
            .env("RUST_LOG", "info")
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success());
    let log = String::from_utf8_lossy(&output.stderr);
    assert!(log.contains("executing step 3 of 3"));
    assert!(log.contains("response code 500 is not 200"));
    assert!(log.contains("2 passed, 1 failed"));

    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}
