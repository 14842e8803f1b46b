mod common;

use axum::http::{header, StatusCode};
use serde_json::{json, Value};

use common::TestEnv;

#[tokio::test]
async fn integrations_healthy_when_everything_is_configured() {
    let env = TestEnv::start();
    env.content
        .publish("siteSettings", json!({ "companyName": "IIS" }));
    let server = env.server();

    let response = server.get("/api/health/integrations").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.header(header::CACHE_CONTROL),
        "no-cache, no-store, must-revalidate"
    );

    let body: Value = response.json();
    assert_eq!(body["healthy"], true);
    assert_eq!(body["sanity"]["connected"], true);
    assert_eq!(body["sanity"]["message"], "Connected");
    assert!(body["sanity"]["responseTime"].is_u64());
    assert_eq!(body["apis"], json!({ "navigation": true, "footer": true, "siteSettings": true }));
    assert_eq!(body["email"]["message"], "SMTP configured");
}

#[tokio::test]
async fn integrations_unavailable_without_settings_document() {
    let env = TestEnv::start();
    let server = env.server();

    let response = server.get("/api/health/integrations").await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["healthy"], false);
    assert_eq!(body["sanity"]["message"], "No data");

    let logs: Value = server.get("/api/health/logs").await.json();
    assert_eq!(logs["entries"][0]["scope"], "health");
    assert_eq!(logs["entries"][0]["level"], "warn");
}

#[tokio::test]
async fn integrations_report_store_errors() {
    let (server, _log_buffer) = common::server_with_unreachable_store();

    let response = server.get("/api/health/integrations").await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["sanity"]["connected"], false);
    assert!(body["sanity"]["message"]
        .as_str()
        .unwrap()
        .contains("HTTP 503"));
}

#[tokio::test]
async fn logs_are_newest_first_and_limited() {
    let env = TestEnv::start();
    for i in 0..5 {
        env.log_buffer.info("test", format!("entry {i}"));
    }
    let server = env.server();

    let body: Value = server
        .get("/api/health/logs")
        .add_query_param("limit", 2)
        .await
        .json();
    let entries = body["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["message"], "entry 4");
    assert_eq!(entries[1]["message"], "entry 3");
}

#[tokio::test]
async fn vitals_are_recorded_by_rating() {
    let env = TestEnv::start();
    let server = env.server();

    let response = server
        .post("/api/metrics/vitals")
        .json(&json!({ "type": "core-web-vital", "name": "CLS", "value": 0.4, "rating": "poor", "page": "/" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "ok": true }));

    let entries = env.log_buffer.entries(1);
    assert_eq!(entries[0].message, "CLS: 0.4");
    assert_eq!(entries[0].scope, "web-vitals");
    assert_eq!(entries[0].context.as_ref().unwrap()["page"], "/");
}

#[tokio::test]
async fn vitals_reject_malformed_payload() {
    let env = TestEnv::start();
    let server = env.server();

    let response = server
        .post("/api/metrics/vitals")
        .text("{not json")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>(), json!({ "ok": false }));
    assert_eq!(env.log_buffer.len(), 1);
}
