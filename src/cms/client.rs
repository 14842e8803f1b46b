use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::cms::queries::GroqQuery;
use crate::error::AppError;

/// Which revision of each document a query should see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Perspective {
    /// Only published documents.
    Published,
    /// Drafts where they exist, published documents otherwise.
    PreviewDrafts,
}

impl Perspective {
    /// Pick the perspective for the current draft-mode state.
    pub fn for_draft_mode(enabled: bool) -> Self {
        if enabled {
            Perspective::PreviewDrafts
        } else {
            Perspective::Published
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Perspective::Published => "published",
            Perspective::PreviewDrafts => "previewDrafts",
        }
    }
}

/// Read access to the remote content store.
///
/// Abstracted as a trait so tests can run against an in-memory store.
#[async_trait]
pub trait ContentClient: Send + Sync {
    /// Run a query and return its `result` payload.
    ///
    /// A query that matches nothing returns `Value::Null`, not an error.
    async fn fetch(
        &self,
        query: &GroqQuery,
        perspective: Perspective,
    ) -> Result<serde_json::Value, AppError>;
}

/// Build the HTTP query endpoint URL for a GROQ query.
///
/// Parameters are sent as `$name=<json>` pairs, as the Sanity HTTP API expects.
pub fn build_query_url(
    project_id: &str,
    api_version: &str,
    dataset: &str,
    query: &GroqQuery,
    perspective: Perspective,
) -> Result<url::Url, AppError> {
    if project_id.trim().is_empty() {
        return Err(AppError::Config("SANITY_PROJECT_ID not set".into()));
    }

    let base = format!(
        "https://{}.api.sanity.io/v{}/data/query/{}",
        project_id,
        api_version.trim_start_matches('v'),
        dataset
    );
    let mut url = url::Url::parse(&base)
        .map_err(|e| AppError::Config(format!("Invalid Sanity endpoint '{}': {}", base, e)))?;

    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("query", query.groq());
        for (name, value) in query.params() {
            pairs.append_pair(&format!("${}", name), &value.to_string());
        }
        pairs.append_pair("perspective", perspective.as_str());
    }

    Ok(url)
}

#[cfg(feature = "ssr")]
#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: serde_json::Value,
}

/// Sanity implementation of the ContentClient over its HTTP query API.
#[cfg(feature = "ssr")]
pub struct SanityClient {
    http: reqwest::Client,
    config: crate::config::SiteConfig,
}

#[cfg(feature = "ssr")]
impl SanityClient {
    pub fn new(config: crate::config::SiteConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Drafts need a token with read access to them; fall back to the read token.
    fn token_for(&self, perspective: Perspective) -> Option<&str> {
        match perspective {
            Perspective::PreviewDrafts => self
                .config
                .write_token()
                .or_else(|| self.config.read_token()),
            Perspective::Published => self.config.read_token(),
        }
    }
}

#[cfg(feature = "ssr")]
#[async_trait]
impl ContentClient for SanityClient {
    async fn fetch(
        &self,
        query: &GroqQuery,
        perspective: Perspective,
    ) -> Result<serde_json::Value, AppError> {
        let url = build_query_url(
            &self.config.sanity_project_id,
            &self.config.sanity_api_version,
            &self.config.sanity_dataset,
            query,
            perspective,
        )?;

        let mut request = self.http.get(url);
        match self.token_for(perspective) {
            Some(token) => request = request.bearer_auth(token),
            None if perspective == Perspective::PreviewDrafts => {
                tracing::warn!(query = query.name(), "Draft read without a token; drafts will not be visible");
            }
            None => {}
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Content(format!("Query '{}' failed: {}", query.name(), e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Content(format!(
                "Query '{}' returned HTTP {}",
                query.name(),
                status
            )));
        }

        let body: QueryResponse = response
            .json()
            .await
            .map_err(|e| AppError::Content(format!("Query '{}' returned invalid JSON: {}", query.name(), e)))?;

        tracing::debug!(query = query.name(), perspective = perspective.as_str(), "Content query completed");
        Ok(body.result)
    }
}
