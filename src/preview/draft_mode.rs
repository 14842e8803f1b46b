//! Signed-cookie draft flag.

use std::convert::Infallible;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};

use crate::cms::client::Perspective;
use crate::config::SiteConfig;

pub const DRAFT_COOKIE_NAME: &str = "iis_draft_mode";

/// Shortest master key `Key::derive_from` accepts.
const MIN_KEY_LEN: usize = 32;

/// Cookie signing key from configuration, or a per-process random key
/// when none (or one that is too short) is configured.
pub fn cookie_key(config: &SiteConfig) -> Key {
    match config.draft_cookie_key.as_deref().map(str::trim) {
        Some(material) if material.len() >= MIN_KEY_LEN => Key::derive_from(material.as_bytes()),
        Some(_) => {
            tracing::warn!(
                "DRAFT_COOKIE_KEY is shorter than {} bytes; using a random key",
                MIN_KEY_LEN
            );
            Key::generate()
        }
        None => {
            tracing::info!("DRAFT_COOKIE_KEY not set; draft cookies will not survive a restart");
            Key::generate()
        }
    }
}

pub fn is_enabled(jar: &SignedCookieJar) -> bool {
    jar.get(DRAFT_COOKIE_NAME).is_some()
}

/// Set the draft flag. `SameSite=None` lets the Studio's preview iframe
/// carry it.
pub fn enable(jar: SignedCookieJar) -> SignedCookieJar {
    let cookie = Cookie::build((DRAFT_COOKIE_NAME, "1"))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None);
    jar.add(cookie)
}

pub fn disable(jar: SignedCookieJar) -> SignedCookieJar {
    jar.remove(Cookie::build(DRAFT_COOKIE_NAME).path("/"))
}

/// Extractor for the current draft-mode state. A missing, tampered or
/// unsigned cookie reads as disabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DraftMode(pub bool);

impl DraftMode {
    pub fn enabled(&self) -> bool {
        self.0
    }

    pub fn perspective(&self) -> Perspective {
        Perspective::for_draft_mode(self.0)
    }
}

impl<S> FromRequestParts<S> for DraftMode
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = SignedCookieJar::<Key>::from_request_parts(parts, state).await?;
        Ok(DraftMode(is_enabled(&jar)))
    }
}
