mod common;

use axum::http::{header, HeaderValue, StatusCode};
use serde_json::json;

use common::{TestEnv, PREVIEW_SECRET};
use iis_web::cms::client::Perspective;
use iis_web::logging::buffer::LogLevel;
use iis_web::preview::draft_mode::DRAFT_COOKIE_NAME;

async fn preview_location(server: &axum_test::TestServer, params: &[(&str, &str)]) -> String {
    let mut request = server.get("/api/preview");
    for (key, value) in params {
        request = request.add_query_param(key, value);
    }
    let response = request.await;
    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
    response
        .header(header::LOCATION)
        .to_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn preview_redirects_to_resolved_paths() {
    let env = TestEnv::start();
    let server = env.server();

    let cases: [(&[(&str, &str)], &str); 6] = [
        (&[("global", "homepage")], "/"),
        (&[("global", "unknown-key")], "/"),
        (&[("global", "supplier-requirements")], "/compliance/supplier-requirements"),
        (&[("collection", "services"), ("slug", "abc")], "/services/abc"),
        (&[("collection", "industries"), ("slug", "aerospace")], "/industries/aerospace"),
        (
            &[("collection", "resources"), ("slug", "xyz")],
            "/resources/manufacturing-processes/xyz",
        ),
    ];

    for (params, expected) in cases {
        let mut with_secret = vec![("secret", PREVIEW_SECRET)];
        with_secret.extend_from_slice(params);
        assert_eq!(preview_location(&server, &with_secret).await, expected, "{params:?}");
    }
}

#[tokio::test]
async fn preview_resource_category_is_kept() {
    let env = TestEnv::start();
    let server = env.server();

    let location = preview_location(
        &server,
        &[
            ("secret", PREVIEW_SECRET),
            ("collection", "resources"),
            ("category", "quality-control"),
            ("slug", "cmm-basics"),
        ],
    )
    .await;
    assert_eq!(location, "/resources/quality-control/cmm-basics");
}

#[tokio::test]
async fn preview_wrong_secret_is_unauthorized() {
    let env = TestEnv::start();
    let server = env.server();

    let well_formed: [&[(&str, &str)]; 3] = [
        &[("global", "homepage")],
        &[("collection", "services"), ("slug", "abc")],
        &[],
    ];
    for params in well_formed {
        let mut request = server.get("/api/preview").add_query_param("secret", "nope");
        for (key, value) in params {
            request = request.add_query_param(key, value);
        }
        let response = request.await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED, "{params:?}");
        assert!(response.maybe_cookie(DRAFT_COOKIE_NAME).is_none());
    }

    let response = server
        .get("/api/preview")
        .add_query_param("global", "homepage")
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn preview_missing_parameters_is_bad_request() {
    let env = TestEnv::start();
    let server = env.server();

    let response = server
        .get("/api/preview")
        .add_query_param("secret", PREVIEW_SECRET)
        .add_query_param("collection", "services")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Missing required parameters");
}

#[tokio::test]
async fn preview_without_configured_secret_is_server_error() {
    let env = TestEnv::with_config(common::test_config(None));
    let server = env.server();

    let response = server
        .get("/api/preview")
        .add_query_param("secret", "anything")
        .add_query_param("global", "homepage")
        .await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

    let entries = env.log_buffer.entries(1);
    assert_eq!(entries[0].level, LogLevel::Error);
    assert_eq!(entries[0].scope, "preview");
}

#[tokio::test]
async fn draft_content_visible_only_while_preview_is_on() {
    let env = TestEnv::start();
    env.content
        .publish("siteSettings", json!({ "companyName": "IIS" }));
    env.content
        .save_draft("siteSettings", json!({ "companyName": "IIS (draft)" }));
    let server = env.server();

    let body: serde_json::Value = server.get("/api/cms/site-settings").await.json();
    assert_eq!(body["companyName"], "IIS");

    preview_location(&server, &[("secret", PREVIEW_SECRET), ("global", "homepage")]).await;
    let body: serde_json::Value = server.get("/api/cms/site-settings").await.json();
    assert_eq!(body["companyName"], "IIS (draft)");

    let response = server.get("/api/exit-preview").await;
    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header(header::LOCATION), "/");

    let body: serde_json::Value = server.get("/api/cms/site-settings").await.json();
    assert_eq!(body["companyName"], "IIS");

    let perspectives: Vec<Perspective> = env
        .content
        .reads()
        .into_iter()
        .map(|(_, perspective)| perspective)
        .collect();
    assert_eq!(
        perspectives,
        vec![
            Perspective::Published,
            Perspective::PreviewDrafts,
            Perspective::Published
        ]
    );
}

#[tokio::test]
async fn exit_preview_redirect_stays_on_site() {
    let env = TestEnv::start();
    let server = env.server();

    let response = server
        .get("/api/exit-preview")
        .add_query_param("redirect", "/services/cmm")
        .await;
    assert_eq!(response.header(header::LOCATION), "/services/cmm");

    let response = server
        .get("/api/exit-preview")
        .add_query_param("redirect", "https://evil.example")
        .await;
    assert_eq!(response.header(header::LOCATION), "/");
}

#[tokio::test]
async fn preview_allows_studio_origin_with_credentials() {
    let env = TestEnv::start();
    let server = env.server();

    let response = server
        .get("/api/exit-preview")
        .add_header(header::ORIGIN, HeaderValue::from_static("https://studio.example.com"))
        .await;
    assert_eq!(
        response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN),
        "https://studio.example.com"
    );
    assert_eq!(response.header(header::ACCESS_CONTROL_ALLOW_CREDENTIALS), "true");
}
