use std::sync::Arc;

use axum_extra::extract::cookie::Key;

use crate::cms::client::ContentClient;
use crate::config::SiteConfig;
use crate::logging::buffer::ServerLogBuffer;

/// Shared server state handed to every handler and server function.
#[derive(Clone)]
pub struct AppState {
    pub content_client: Arc<dyn ContentClient>,
    pub config: Arc<SiteConfig>,
    pub log_buffer: Arc<ServerLogBuffer>,
    pub cookie_key: Key,
    pub leptos_options: leptos::prelude::LeptosOptions,
}

impl AppState {
    pub fn new(
        content_client: Arc<dyn ContentClient>,
        config: SiteConfig,
        leptos_options: leptos::prelude::LeptosOptions,
    ) -> Self {
        let cookie_key = crate::preview::draft_mode::cookie_key(&config);
        Self {
            content_client,
            config: Arc::new(config),
            log_buffer: Arc::new(ServerLogBuffer::default()),
            cookie_key,
            leptos_options,
        }
    }
}

impl axum::extract::FromRef<AppState> for leptos::prelude::LeptosOptions {
    fn from_ref(state: &AppState) -> Self {
        state.leptos_options.clone()
    }
}

impl axum::extract::FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
