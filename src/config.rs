use serde::Deserialize;

use crate::error::AppError;

/// Site configuration read from the process environment.
///
/// Field names follow the environment variable names, lowercased, so that
/// `config::Environment` can map them directly (`SANITY_DATASET` →
/// `sanity_dataset`). Only presence or absence of the optional values
/// toggles behaviour; their contents are never branched on.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteConfig {
    /// Sanity project identifier. Empty when unset.
    #[serde(default)]
    pub sanity_project_id: String,
    /// Dataset name (e.g. `production`).
    #[serde(default = "default_dataset")]
    pub sanity_dataset: String,
    /// Dated API version used in the query URL.
    #[serde(default = "default_api_version")]
    pub sanity_api_version: String,
    /// Token for published reads (optional for public datasets).
    #[serde(default)]
    pub sanity_api_read_token: Option<String>,
    /// Token with draft access, used for the `previewDrafts` perspective.
    #[serde(default)]
    pub sanity_api_write_token: Option<String>,
    /// Shared secret that preview links must carry.
    #[serde(default)]
    pub preview_secret_token: Option<String>,
    /// Master key material (at least 32 bytes) for signing the draft cookie.
    #[serde(default)]
    pub draft_cookie_key: Option<String>,
    /// Where the Studio is mounted, used by the edit button.
    #[serde(default = "default_studio_url")]
    pub sanity_studio_url: String,
    #[serde(default)]
    pub smtp_host: Option<String>,
    #[serde(default)]
    pub smtp_user: Option<String>,
    #[serde(default)]
    pub smtp_pass: Option<String>,
}

fn default_dataset() -> String {
    "production".to_string()
}

fn default_api_version() -> String {
    "2024-01-01".to_string()
}

fn default_studio_url() -> String {
    "/studio".to_string()
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl SiteConfig {
    /// Build the configuration from environment variables.
    ///
    /// Recognized variables:
    /// - `SANITY_PROJECT_ID`, `SANITY_DATASET`, `SANITY_API_VERSION`
    /// - `SANITY_API_READ_TOKEN`, `SANITY_API_WRITE_TOKEN`
    /// - `PREVIEW_SECRET_TOKEN`, `DRAFT_COOKIE_KEY`, `SANITY_STUDIO_URL`
    /// - `SMTP_HOST`, `SMTP_USER`, `SMTP_PASS`
    #[cfg(feature = "ssr")]
    pub fn from_env() -> Result<Self, AppError> {
        let settings = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .map_err(|e| AppError::Config(format!("Failed to read environment: {e}")))?;

        settings
            .try_deserialize::<SiteConfig>()
            .map_err(|e| AppError::Config(format!("Invalid configuration: {e}")))
    }

    /// Build with explicit Sanity values (useful for testing).
    pub fn new(project_id: &str, dataset: &str, preview_secret: Option<&str>) -> Self {
        Self {
            sanity_project_id: project_id.to_string(),
            sanity_dataset: dataset.to_string(),
            sanity_api_version: default_api_version(),
            preview_secret_token: preview_secret.map(str::to_string),
            sanity_studio_url: default_studio_url(),
            ..Default::default()
        }
    }

    /// The configured preview secret, treating blank values as unset.
    pub fn preview_secret(&self) -> Option<&str> {
        present(&self.preview_secret_token)
    }

    pub fn read_token(&self) -> Option<&str> {
        present(&self.sanity_api_read_token)
    }

    pub fn write_token(&self) -> Option<&str> {
        present(&self.sanity_api_write_token)
    }

    pub fn has_project_id(&self) -> bool {
        !self.sanity_project_id.trim().is_empty()
    }

    pub fn has_dataset(&self) -> bool {
        !self.sanity_dataset.trim().is_empty()
    }

    /// Names of the SMTP variables that are missing, in declaration order.
    pub fn missing_smtp(&self) -> Vec<&'static str> {
        [
            ("SMTP_HOST", &self.smtp_host),
            ("SMTP_USER", &self.smtp_user),
            ("SMTP_PASS", &self.smtp_pass),
        ]
        .into_iter()
        .filter(|(_, value)| present(value).is_none())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn smtp_configured(&self) -> bool {
        self.missing_smtp().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_defaults() {
        let config = SiteConfig::new("abc123", "production", Some("s3cret"));
        assert_eq!(config.sanity_api_version, "2024-01-01");
        assert_eq!(config.sanity_studio_url, "/studio");
        assert_eq!(config.preview_secret(), Some("s3cret"));
        assert!(config.has_project_id());
    }

    #[test]
    fn test_blank_secret_is_unset() {
        let config = SiteConfig::new("abc123", "production", Some("  "));
        assert_eq!(config.preview_secret(), None);
    }

    #[test]
    fn test_missing_smtp() {
        let mut config = SiteConfig::default();
        assert_eq!(config.missing_smtp(), vec!["SMTP_HOST", "SMTP_USER", "SMTP_PASS"]);
        assert!(!config.smtp_configured());

        config.smtp_host = Some("smtp.example.com".into());
        config.smtp_pass = Some("pw".into());
        assert_eq!(config.missing_smtp(), vec!["SMTP_USER"]);

        config.smtp_user = Some("mailer".into());
        assert!(config.smtp_configured());
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let config: SiteConfig =
            serde_json::from_value(serde_json::json!({ "sanity_project_id": "p1" })).unwrap();
        assert_eq!(config.sanity_dataset, "production");
        assert_eq!(config.sanity_api_version, "2024-01-01");
        assert!(config.preview_secret().is_none());
    }
}
