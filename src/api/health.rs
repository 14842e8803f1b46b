use std::time::Instant;

use axum::extract::{Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cms::client::{ContentClient, Perspective};
use crate::cms::queries;
use crate::config::SiteConfig;
use crate::logging::buffer::{LogEntry, DEFAULT_LOG_LIMIT};
use crate::state::AppState;

const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentStoreCheck {
    pub connected: bool,
    pub message: String,
    pub response_time: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigChecks {
    pub navigation: bool,
    pub footer: bool,
    pub site_settings: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailCheck {
    pub configured: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationReport {
    pub timestamp: DateTime<Utc>,
    pub sanity: ContentStoreCheck,
    pub apis: ConfigChecks,
    pub email: EmailCheck,
    pub healthy: bool,
}

/// Probe the content store with a site-settings read and report on the
/// configuration the site depends on.
pub async fn check_integrations(client: &dyn ContentClient, config: &SiteConfig) -> IntegrationReport {
    let started = Instant::now();
    let sanity = match queries::get_site_settings(client, Perspective::Published).await {
        Ok(settings) => ContentStoreCheck {
            connected: settings.is_some(),
            message: if settings.is_some() { "Connected" } else { "No data" }.to_string(),
            response_time: started.elapsed().as_millis() as u64,
        },
        Err(e) => ContentStoreCheck {
            connected: false,
            message: e.to_string(),
            response_time: started.elapsed().as_millis() as u64,
        },
    };

    let missing = config.missing_smtp();
    let email = EmailCheck {
        configured: missing.is_empty(),
        message: if missing.is_empty() {
            "SMTP configured".to_string()
        } else {
            format!("Missing: {}", missing.join(" "))
        },
    };

    let apis = ConfigChecks {
        navigation: config.has_project_id(),
        footer: config.has_dataset(),
        site_settings: sanity.connected,
    };

    let healthy =
        sanity.connected && email.configured && apis.navigation && apis.footer && apis.site_settings;

    IntegrationReport {
        timestamp: Utc::now(),
        sanity,
        apis,
        email,
        healthy,
    }
}

/// `GET /api/health/integrations`: 200 when every check passes, 503 otherwise.
pub async fn integrations_handler(State(state): State<AppState>) -> Response {
    let report = check_integrations(state.content_client.as_ref(), &state.config).await;
    if !report.healthy {
        state.log_buffer.warn(
            "health",
            "Integration check failed",
            serde_json::to_value(&report).ok(),
        );
    }

    let status = if report.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let mut response = (status, Json(report)).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static(NO_CACHE));
    response
}

#[derive(Debug, Default, Deserialize)]
pub struct LogsQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogsResponse {
    pub entries: Vec<LogEntry>,
}

/// `GET /api/health/logs?limit=N`, newest first.
pub async fn logs_handler(
    State(state): State<AppState>,
    Query(query): Query<LogsQuery>,
) -> impl IntoResponse {
    let entries = state
        .log_buffer
        .entries(query.limit.unwrap_or(DEFAULT_LOG_LIMIT));
    (
        [(header::CACHE_CONTROL, HeaderValue::from_static(NO_CACHE))],
        Json(LogsResponse { entries }),
    )
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/health/integrations", get(integrations_handler))
        .route("/api/health/logs", get(logs_handler))
}
