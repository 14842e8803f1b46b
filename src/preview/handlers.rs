use axum::extract::{Query, State};
use axum::http::{header, Method};
use axum::response::Redirect;
use axum::routing::get;
use axum::Router;
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Deserialize;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::error::AppError;
use crate::logging::buffer::LogLevel;
use crate::preview::draft_mode;
use crate::preview::resolver::{process_preview, safe_redirect_path, PreviewRequest};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ExitPreviewQuery {
    pub redirect: Option<String>,
}

/// `GET /api/preview`: validate a preview link, set the draft flag and
/// redirect to the document.
pub async fn preview_handler(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Query(request): Query<PreviewRequest>,
) -> Result<(SignedCookieJar, Redirect), AppError> {
    let target = match process_preview(state.config.preview_secret(), &request) {
        Ok(target) => target,
        Err(e) => {
            let level = match e {
                AppError::Config(_) => LogLevel::Error,
                _ => LogLevel::Warn,
            };
            state.log_buffer.record(level, "preview", format!("Preview rejected: {e}"), None);
            return Err(e);
        }
    };

    state.log_buffer.record(
        LogLevel::Info,
        "preview",
        format!("Draft mode enabled, redirecting to {target}"),
        None,
    );
    Ok((draft_mode::enable(jar), Redirect::temporary(&target)))
}

/// `GET /api/exit-preview`: clear the draft flag.
pub async fn exit_preview_handler(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Query(query): Query<ExitPreviewQuery>,
) -> (SignedCookieJar, Redirect) {
    let target = safe_redirect_path(query.redirect.as_deref());
    state.log_buffer.info("preview", format!("Draft mode disabled, redirecting to {target}"));
    (draft_mode::disable(jar), Redirect::temporary(&target))
}

/// Lets the Studio origin call the draft endpoints with credentials.
pub fn studio_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/preview", get(preview_handler))
        .route("/api/exit-preview", get(exit_preview_handler))
        .layer(studio_cors())
}
