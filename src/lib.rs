pub mod app;
pub mod chrome;
pub mod config;
pub mod error;
pub mod pages;
pub mod cms {
    pub mod client;
    pub mod models;
    pub mod navigation;
    pub mod queries;
}
pub mod rendering {
    pub mod html;
    pub mod markdown;
}
pub mod sections {
    pub mod composer;
    pub mod model;
    pub mod portable_text;
    pub mod styles;
}
pub mod preview {
    pub mod resolver;
    #[cfg(feature = "ssr")]
    pub mod draft_mode;
    #[cfg(feature = "ssr")]
    pub mod handlers;
}
#[cfg(feature = "ssr")]
pub mod logging {
    pub mod buffer;
}
pub mod components {
    pub mod admin_edit_button;
    pub mod page_sections;
    pub mod preview_banner;
    pub mod site_chrome;
}
pub mod api {
    pub mod errors;
    #[cfg(feature = "ssr")]
    pub mod cms;
    #[cfg(feature = "ssr")]
    pub mod health;
    #[cfg(feature = "ssr")]
    pub mod metrics;
}
#[cfg(feature = "ssr")]
pub mod state;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(app::App);
}
