use serde::Deserialize;

use crate::chrome::is_admin_route;
use crate::error::AppError;

pub const DEFAULT_RESOURCE_CATEGORY: &str = "manufacturing-processes";

/// Singleton pages editors can preview, as `(global key, site path)`.
pub const GLOBAL_PAGES: &[(&str, &str)] = &[
    ("homepage", "/"),
    ("about", "/about"),
    ("contact", "/contact"),
    ("careers", "/careers"),
    ("terms", "/compliance/terms"),
    ("supplier-requirements", "/compliance/supplier-requirements"),
];

/// Query string of a preview link.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreviewRequest {
    pub secret: Option<String>,
    pub global: Option<String>,
    pub collection: Option<String>,
    pub slug: Option<String>,
    pub category: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Site path for a singleton page key. Unknown keys land on the homepage.
pub fn global_path(global: &str) -> &'static str {
    GLOBAL_PAGES
        .iter()
        .find(|(key, _)| *key == global)
        .map(|(_, path)| *path)
        .unwrap_or("/")
}

/// Site path for a collection document. Unknown collections land on the
/// homepage.
pub fn collection_path(collection: &str, slug: &str, category: Option<&str>) -> String {
    match collection {
        "services" => format!("/services/{}", segment(slug)),
        "industries" => format!("/industries/{}", segment(slug)),
        "resources" => format!(
            "/resources/{}/{}",
            segment(category.filter(|c| !c.is_empty()).unwrap_or(DEFAULT_RESOURCE_CATEGORY)),
            segment(slug)
        ),
        _ => "/".to_string(),
    }
}

/// Compute the redirect target for a preview link, `None` when the request
/// names neither a global page nor a collection document.
pub fn resolve_preview_path(request: &PreviewRequest) -> Option<String> {
    if let Some(global) = non_empty(&request.global) {
        return Some(global_path(global).to_string());
    }
    match (non_empty(&request.collection), non_empty(&request.slug)) {
        (Some(collection), Some(slug)) => Some(collection_path(
            collection,
            slug,
            non_empty(&request.category),
        )),
        _ => None,
    }
}

/// Validate a preview link and return where to send the editor.
///
/// Runs every check before anything is changed, in this order: secret
/// configured, secret matches, target resolvable.
pub fn process_preview(configured_secret: Option<&str>, request: &PreviewRequest) -> Result<String, AppError> {
    let Some(expected) = configured_secret.filter(|s| !s.is_empty()) else {
        return Err(AppError::Config(
            "Preview mode not configured. Set PREVIEW_SECRET_TOKEN.".into(),
        ));
    };

    if request.secret.as_deref() != Some(expected) {
        return Err(AppError::Auth("Invalid preview secret".into()));
    }

    resolve_preview_path(request)
        .ok_or_else(|| AppError::BadRequest("Missing required parameters".into()))
}

/// Accept only same-site relative paths for the post-exit redirect.
pub fn safe_redirect_path(redirect: Option<&str>) -> String {
    match redirect {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(char::is_control) =>
        {
            path.to_string()
        }
        _ => "/".to_string(),
    }
}

/// Studio URL for editing the document behind a site path, `None` on admin
/// routes.
pub fn admin_edit_url(studio_url: &str, path: &str) -> Option<String> {
    if path.is_empty() || is_admin_route(path) {
        return None;
    }
    let base = studio_url.trim_end_matches('/');

    if let Some((global, _)) = GLOBAL_PAGES.iter().find(|(_, p)| *p == path) {
        return Some(format!("{}/structure/{}", base, global));
    }

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let filtered = |collection: &str, slug: &str| {
        format!(
            "{}/structure/{};slug={}",
            base,
            collection,
            urlencoding::encode(slug)
        )
    };

    let url = match segments.as_slice() {
        ["services", slug, ..] => filtered("service", *slug),
        ["industries", slug, ..] => filtered("industry", *slug),
        ["resources", _, slug, ..] => filtered("resource", *slug),
        ["resources", ..] => format!("{}/structure/resource", base),
        _ => base.to_string(),
    };
    Some(url)
}
