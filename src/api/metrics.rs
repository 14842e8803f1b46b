use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::logging::buffer::LogLevel;
use crate::state::AppState;

/// A web-vitals or custom performance beacon sent by the browser.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VitalsEvent {
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub name: Option<String>,
    pub value: Option<serde_json::Value>,
    pub rating: Option<String>,
    pub page: Option<String>,
    pub details: Option<serde_json::Value>,
}

impl VitalsEvent {
    /// Poor core web vitals are warnings, everything else is informational.
    pub fn level(&self) -> LogLevel {
        if self.event_type.as_deref() == Some("core-web-vital") && self.rating.as_deref() == Some("poor") {
            LogLevel::Warn
        } else {
            LogLevel::Info
        }
    }

    pub fn message(&self) -> String {
        let value = match &self.value {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Null) | None => "undefined".to_string(),
            Some(other) => other.to_string(),
        };
        format!(
            "{}: {}",
            self.name.as_deref().filter(|n| !n.is_empty()).unwrap_or("metric"),
            value
        )
    }
}

/// `POST /api/metrics/vitals`
pub async fn vitals_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let event: VitalsEvent = match serde_json::from_slice::<Option<VitalsEvent>>(&body) {
        Ok(event) => event.unwrap_or_default(),
        Err(e) => {
            state
                .log_buffer
                .error("web-vitals", format!("Invalid vitals payload: {e}"), None);
            return (StatusCode::BAD_REQUEST, Json(json!({ "ok": false }))).into_response();
        }
    };

    state.log_buffer.record(
        event.level(),
        "web-vitals",
        event.message(),
        serde_json::to_value(&event).ok(),
    );
    Json(json!({ "ok": true })).into_response()
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/metrics/vitals", post(vitals_handler))
}
