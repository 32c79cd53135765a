//! Step chaining integration tests
//!
//! These tests verify that values captured from one step's response are
//! substituted into the addresses and payloads of later steps.

use runflow::environment::EnvironmentStore;
use runflow::template::parse_template;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::executor_for;

#[tokio::test]
async fn test_endpoint_substitution_from_environment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping/10.0.0.1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut store = EnvironmentStore::new();
    store.load_initial("host: 10.0.0.1\n");
    let mut executor = executor_for(&server, store);

    let template = parse_template(
        r#"{"VersaPostStagingTemplate": [
            {"apiName": "ping", "apiEndpoint": "ping/$*host$", "apiType": "GET",
             "expectedResponseStatus": "200", "apiIndex": 1}
        ]}"#,
    )
    .unwrap();

    let report = executor.run(&template).await;

    assert!(report.all_passed());
    assert_eq!(
        report.outcomes[0].url.as_deref(),
        Some(format!("{}/ping/10.0.0.1", server.uri()).as_str())
    );
}

#[tokio::test]
async fn test_extracted_value_flows_into_later_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/vnms/sdwan/workflow/templates/template"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "abc123", "meta": {"version": 4}})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/vnms/sdwan/workflow/templates/template/abc123"))
        .and(body_json(json!({
            "templateId": "abc123",
            "revision": "4",
            "name": "branch-tmpl"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut store = EnvironmentStore::new();
    store.set("templateName", "branch-tmpl");
    let mut executor = executor_for(&server, store);

    let template = parse_template(
        r#"{"VersaPostStagingTemplate": [
            {
                "apiName": "Create template",
                "apiEndpoint": "vnms/sdwan/workflow/templates/template",
                "apiType": "POST",
                "expectedResponseStatus": "200",
                "apiIndex": 1,
                "apiPayload": {"name": "$*templateName$"},
                "respVar": [
                    {"name": "ID", "jsonPath": "id", "apiType": "string"},
                    {"name": "REV", "jsonPath": "meta.version", "apiType": "number"}
                ]
            },
            {
                "apiName": "Deploy template",
                "apiEndpoint": "vnms/sdwan/workflow/templates/template/$*ID$",
                "apiType": "PUT",
                "expectedResponseStatus": 200,
                "apiIndex": 2,
                "apiPayload": {"templateId": "$*ID$", "revision": "$*REV$", "name": "$*templateName$"}
            }
        ]}"#,
    )
    .unwrap();

    let report = executor.run(&template).await;

    assert!(report.all_passed(), "failures: {:?}", report.failures().collect::<Vec<_>>());
    assert_eq!(executor.store().get("ID"), Some("abc123"));
    assert_eq!(executor.store().get("REV"), Some("4"));
}

#[tokio::test]
async fn test_missing_path_sets_empty_value() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 0})))
        .mount(&server)
        .await;

    let mut store = EnvironmentStore::new();
    store.set("deviceId", "stale");
    let mut executor = executor_for(&server, store);

    let template = parse_template(
        r#"{"VersaPostStagingTemplate": [
            {"apiName": "list", "apiEndpoint": "devices", "apiType": "GET",
             "expectedResponseStatus": "200",
             "respVar": [{"name": "deviceId", "jsonPath": "devices[0].id"}]}
        ]}"#,
    )
    .unwrap();

    let report = executor.run(&template).await;

    assert!(report.all_passed());
    assert_eq!(executor.store().get("deviceId"), Some(""));
}

#[tokio::test]
async fn test_array_paths_and_counts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organizations": [
                {"name": "tenant-a", "uuid": "u-1"},
                {"name": "tenant-b", "uuid": "u-2"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/organizations/u-2/count/2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut executor = executor_for(&server, EnvironmentStore::new());

    let template = parse_template(
        r#"{"VersaPostStagingTemplate": [
            {"apiName": "list orgs", "apiEndpoint": "organizations", "apiType": "GET",
             "expectedResponseStatus": "200",
             "respVar": [
                {"name": "ORG", "jsonPath": "$.organizations[1].uuid"},
                {"name": "ORGS", "jsonPath": "organizations.#"},
                {"name": "FIRST", "jsonPath": "organizations.0"}
             ]},
            {"apiName": "use org", "apiEndpoint": "organizations/$*ORG$/count/$*ORGS$",
             "apiType": "GET", "expectedResponseStatus": "200"}
        ]}"#,
    )
    .unwrap();

    let report = executor.run(&template).await;

    assert!(report.all_passed());
    assert_eq!(
        executor.store().get("FIRST"),
        Some(r#"{"name":"tenant-a","uuid":"u-1"}"#)
    );
}

#[tokio::test]
async fn test_failed_step_does_not_bind_and_placeholder_stays_literal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"token": "nope"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/profile"))
        .and(body_json(json!({"token": "$*TOKEN$"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut executor = executor_for(&server, EnvironmentStore::new());

    let template = parse_template(
        r#"{"VersaPostStagingTemplate": [
            {"apiName": "login", "apiEndpoint": "login", "apiType": "POST",
             "expectedResponseStatus": "200", "apiPayload": {},
             "respVar": [{"name": "TOKEN", "jsonPath": "token"}]},
            {"apiName": "profile", "apiEndpoint": "profile", "apiType": "POST",
             "expectedResponseStatus": "200", "apiPayload": {"token": "$*TOKEN$"}}
        ]}"#,
    )
    .unwrap();

    let report = executor.run(&template).await;

    assert_eq!(report.failed(), 1);
    assert!(report.outcomes[1].passed());
    assert!(!executor.store().contains("TOKEN"));
}
