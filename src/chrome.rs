//! Data shared by every site page: header navigation, footer and settings.

use serde::{Deserialize, Serialize};

use crate::cms::models::{Footer, SiteSettings};
use crate::cms::navigation::NormalizedNavigation;
#[cfg(feature = "ssr")]
use crate::{
    cms::client::{ContentClient, Perspective},
    cms::navigation::normalize,
    cms::queries,
    error::AppError,
    logging::buffer::ServerLogBuffer,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteChromeData {
    pub navigation: Option<NormalizedNavigation>,
    pub footer: Option<Footer>,
    pub site_settings: Option<SiteSettings>,
}

/// Routes rendered without the site header and footer.
pub fn is_admin_route(path: &str) -> bool {
    path.starts_with("/admin") || path.starts_with("/studio")
}

#[cfg(feature = "ssr")]
fn degrade<T>(part: &str, result: Result<Option<T>, AppError>, log: Option<&ServerLogBuffer>) -> Option<T> {
    match result {
        Ok(value) => value,
        Err(e) => {
            match log {
                Some(log) => {
                    log.warn("chrome", format!("Failed to load {part}: {e}"), None);
                }
                None => tracing::warn!("Failed to load {part}: {e}"),
            }
            None
        }
    }
}

/// Fetch navigation, footer and site settings concurrently. Each part
/// degrades to `None` on its own when its read fails.
#[cfg(feature = "ssr")]
pub async fn load_chrome(
    client: &dyn ContentClient,
    perspective: Perspective,
    log: Option<&ServerLogBuffer>,
) -> SiteChromeData {
    let (navigation, footer, site_settings) = futures::join!(
        queries::get_navigation(client, perspective),
        queries::get_footer(client, perspective),
        queries::get_site_settings(client, perspective),
    );

    SiteChromeData {
        navigation: degrade("navigation", navigation, log).map(|nav| normalize(Some(nav))),
        footer: degrade("footer", footer, log),
        site_settings: degrade("site settings", site_settings, log),
    }
}
