#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use mockall::mock;
use serde_json::Value;

use iis_web::cms::client::{ContentClient, Perspective};
use iis_web::cms::queries::GroqQuery;
use iis_web::config::SiteConfig;
use iis_web::error::AppError;
use iis_web::logging::buffer::ServerLogBuffer;
use iis_web::state::AppState;

pub const PREVIEW_SECRET: &str = "test-preview-secret";

#[derive(Debug, Clone, Default)]
struct StoredDoc {
    published: Value,
    draft: Option<Value>,
}

/// In-memory content store keyed by query name.
///
/// Drafts are only visible to `previewDrafts` reads, like the real store.
#[derive(Default)]
pub struct InMemoryContent {
    docs: Mutex<HashMap<String, StoredDoc>>,
    reads: Mutex<Vec<(String, Perspective)>>,
}

impl InMemoryContent {
    pub fn publish(&self, query_name: &str, value: Value) {
        let mut docs = self.docs.lock().unwrap();
        docs.entry(query_name.to_string()).or_default().published = value;
    }

    pub fn save_draft(&self, query_name: &str, value: Value) {
        let mut docs = self.docs.lock().unwrap();
        docs.entry(query_name.to_string()).or_default().draft = Some(value);
    }

    /// Perspectives used so far, in order.
    pub fn reads(&self) -> Vec<(String, Perspective)> {
        self.reads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentClient for InMemoryContent {
    async fn fetch(&self, query: &GroqQuery, perspective: Perspective) -> Result<Value, AppError> {
        self.reads
            .lock()
            .unwrap()
            .push((query.name().to_string(), perspective));

        let docs = self.docs.lock().unwrap();
        let Some(doc) = docs.get(query.name()) else {
            return Ok(Value::Null);
        };
        let value = match (perspective, &doc.draft) {
            (Perspective::PreviewDrafts, Some(draft)) => draft.clone(),
            _ => doc.published.clone(),
        };
        Ok(value)
    }
}

mock! {
    pub Content {}

    #[async_trait]
    impl ContentClient for Content {
        async fn fetch(&self, query: &GroqQuery, perspective: Perspective) -> Result<Value, AppError>;
    }
}

/// A content client whose every read fails.
pub fn unreachable_content() -> MockContent {
    let mut mock = MockContent::new();
    mock.expect_fetch()
        .returning(|query, _| Err(AppError::Content(format!("Query '{}' returned HTTP 503", query.name()))));
    mock
}

pub fn test_config(preview_secret: Option<&str>) -> SiteConfig {
    let mut config = SiteConfig::new("testproj", "production", preview_secret);
    config.smtp_host = Some("smtp.example.com".into());
    config.smtp_user = Some("mailer".into());
    config.smtp_pass = Some("secret".into());
    config
}

/// Router and shared handles for the HTTP endpoints (no SSR pages).
pub struct TestEnv {
    pub router: Router,
    pub content: Arc<InMemoryContent>,
    pub log_buffer: Arc<ServerLogBuffer>,
}

impl TestEnv {
    pub fn start() -> Self {
        Self::with_config(test_config(Some(PREVIEW_SECRET)))
    }

    pub fn with_config(config: SiteConfig) -> Self {
        let content = Arc::new(InMemoryContent::default());
        let state = build_state(content.clone(), config);
        Self {
            router: build_router(state.clone()),
            log_buffer: state.log_buffer.clone(),
            content,
        }
    }

    /// Build an `axum_test::TestServer` that keeps cookies between requests.
    pub fn server(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .save_cookies()
            .build(self.router.clone())
    }
}

pub fn build_state(client: Arc<dyn ContentClient>, config: SiteConfig) -> AppState {
    let leptos_options = leptos::prelude::LeptosOptions::builder()
        .output_name("iis-web")
        .build();
    AppState::new(client, config, leptos_options)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(iis_web::preview::handlers::routes())
        .merge(iis_web::api::cms::routes())
        .merge(iis_web::api::health::routes())
        .merge(iis_web::api::metrics::routes())
        .with_state(state)
}

/// A permissive server over a store that is down.
pub fn server_with_unreachable_store() -> (axum_test::TestServer, Arc<ServerLogBuffer>) {
    let state = build_state(Arc::new(unreachable_content()), test_config(Some(PREVIEW_SECRET)));
    let log_buffer = state.log_buffer.clone();
    let server = axum_test::TestServer::builder()
        .build(build_router(state));
    (server, log_buffer)
}
