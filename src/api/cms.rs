//! Read-through JSON proxies over the content store for client-side chrome.
//!
//! Failure handling differs per endpoint and is decided here, once:
//! navigation and UI text fail loudly, the rest degrade to an empty value.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::cms::navigation::normalize;
use crate::cms::queries;
use crate::error::AppError;
use crate::preview::draft_mode::DraftMode;
use crate::state::AppState;

fn record_failure(state: &AppState, endpoint: &str, err: &AppError) {
    state.log_buffer.warn(
        "cms-proxy",
        format!("{endpoint} read failed: {err}"),
        Some(json!({ "endpoint": endpoint })),
    );
}

/// `GET /api/cms/navigation`
pub async fn navigation_handler(State(state): State<AppState>, draft: DraftMode) -> Response {
    match queries::get_navigation(state.content_client.as_ref(), draft.perspective()).await {
        Ok(nav) => Json(normalize(nav)).into_response(),
        Err(e) => {
            record_failure(&state, "navigation", &e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to load navigation" })),
            )
                .into_response()
        }
    }
}

/// `GET /api/cms/footer`, `null` when missing or unreadable.
pub async fn footer_handler(State(state): State<AppState>, draft: DraftMode) -> Response {
    match queries::get_footer(state.content_client.as_ref(), draft.perspective()).await {
        Ok(footer) => Json(footer).into_response(),
        Err(e) => {
            record_failure(&state, "footer", &e);
            Json(serde_json::Value::Null).into_response()
        }
    }
}

/// `GET /api/cms/site-settings`, `null` when missing or unreadable.
pub async fn site_settings_handler(State(state): State<AppState>, draft: DraftMode) -> Response {
    match queries::get_site_settings(state.content_client.as_ref(), draft.perspective()).await {
        Ok(settings) => Json(settings).into_response(),
        Err(e) => {
            record_failure(&state, "site-settings", &e);
            Json(serde_json::Value::Null).into_response()
        }
    }
}

/// `GET /api/cms/team-members`, `[]` when unreadable.
pub async fn team_members_handler(State(state): State<AppState>, draft: DraftMode) -> Response {
    match queries::get_team_members(state.content_client.as_ref(), draft.perspective()).await {
        Ok(members) => Json(members).into_response(),
        Err(e) => {
            record_failure(&state, "team-members", &e);
            Json(json!([])).into_response()
        }
    }
}

/// `GET /api/cms/ui-text`. The document is passed through untyped.
pub async fn ui_text_handler(State(state): State<AppState>, draft: DraftMode) -> Response {
    let result = state
        .content_client
        .fetch(&queries::ui_text(), draft.perspective())
        .await;
    match result {
        Ok(serde_json::Value::Null) => Json(json!({})).into_response(),
        Ok(text) => Json(text).into_response(),
        Err(e) => {
            record_failure(&state, "ui-text", &e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({}))).into_response()
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/cms/navigation", get(navigation_handler))
        .route("/api/cms/footer", get(footer_handler))
        .route("/api/cms/site-settings", get(site_settings_handler))
        .route("/api/cms/team-members", get(team_members_handler))
        .route("/api/cms/ui-text", get(ui_text_handler))
}
