//! Named GROQ queries and their typed fetchers.
//!
//! Each query is a pure data-shape contract: the projection decides which
//! fields reach the application, and the matching model in
//! [`crate::cms::models`] decides how missing fields default.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::cms::client::{ContentClient, Perspective};
use crate::cms::models::{
    Footer, Homepage, Industry, Navigation, Page, Resource, Service, SiteSettings, TeamMember,
};
use crate::error::AppError;

/// A named GROQ query plus its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroqQuery {
    name: String,
    groq: String,
    params: Vec<(String, serde_json::Value)>,
}

impl GroqQuery {
    pub fn new(name: &str, groq: &str) -> Self {
        Self {
            name: name.to_string(),
            groq: groq.to_string(),
            params: Vec::new(),
        }
    }

    /// Bind `$name` to a JSON value.
    pub fn param(mut self, name: &str, value: impl Into<serde_json::Value>) -> Self {
        self.params.push((name.to_string(), value.into()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn groq(&self) -> &str {
        &self.groq
    }

    pub fn params(&self) -> &[(String, serde_json::Value)] {
        &self.params
    }

    /// Look up a bound parameter by name.
    pub fn param_value(&self, name: &str) -> Option<&serde_json::Value> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

const SEO_PROJECTION: &str = "seo { metaTitle, metaDescription, \"ogImageUrl\": ogImage.asset->url, \"noIndex\": coalesce(noIndex, noindex) }";

const SECTIONS_PROJECTION: &str = "sections[] { ..., \"backgroundImageUrl\": backgroundImage.asset->url, content[] { ..., _type == \"image\" => { ..., \"url\": asset->url } } }";

// ============================================================================
// GLOBALS
// ============================================================================

pub fn navigation() -> GroqQuery {
    GroqQuery::new(
        "navigation",
        "*[_type == \"navigation\"][0] { topBar, menuItems, cta, styles }",
    )
}

pub fn footer() -> GroqQuery {
    GroqQuery::new(
        "footer",
        "*[_type == \"footer\"][0] { company, servicesHeading, resourcesHeading, quickLinksHeading, contactHeading, social, servicesLinks, resourcesLinks, quickLinks, contact, copyright }",
    )
}

pub fn site_settings() -> GroqQuery {
    GroqQuery::new(
        "siteSettings",
        "*[_type == \"siteSettings\"][0] { companyName, tagline, description, contactEmail, contactPhone, address, socialMedia, announcement, \"logoUrl\": logo.asset->url, defaultSEO }",
    )
}

pub fn ui_text() -> GroqQuery {
    GroqQuery::new("uiText", "*[_type == \"uiText\"][0] { buttons, headings }")
}

pub fn homepage() -> GroqQuery {
    GroqQuery::new(
        "homepage",
        &format!(
            "*[_type == \"homepage\"][0] {{ _id, hero {{ ..., \"_type\": \"heroSection\", \"backgroundImageUrl\": backgroundImage.asset->url }}, {}, cta {{ ..., \"_type\": \"ctaSection\" }}, {} }}",
            SECTIONS_PROJECTION, SEO_PROJECTION
        ),
    )
}

/// Singleton pages addressed by the `global` preview key.
pub fn global_page(doc_type: &str) -> GroqQuery {
    GroqQuery::new(
        doc_type,
        &format!(
            "*[_type == $docType][0] {{ _id, _type, title, {}, {} }}",
            SECTIONS_PROJECTION, SEO_PROJECTION
        ),
    )
    .param("docType", doc_type)
}

pub fn page_by_slug(slug: &str) -> GroqQuery {
    GroqQuery::new(
        "pageBySlug",
        &format!(
            "*[_type == \"page\" && slug.current == $slug && published != false][0] {{ _id, _type, title, slug, {}, {} }}",
            SECTIONS_PROJECTION, SEO_PROJECTION
        ),
    )
    .param("slug", slug)
}

// ============================================================================
// SERVICES
// ============================================================================

const DETAIL_HERO_PROJECTION: &str = "hero { badge, subtitle, \"backgroundImageUrl\": backgroundImage.asset->url }";

const SERVICE_FIELDS: &str = "_id, _type, title, slug, shortDescription, description, order, highlight, \"imageUrl\": image.asset->url, capabilities";

pub fn service_by_slug(slug: &str) -> GroqQuery {
    GroqQuery::new(
        "serviceBySlug",
        &format!(
            "*[_type == \"service\" && slug.current == $slug][0] {{ {}, {}, {} }}",
            SERVICE_FIELDS, DETAIL_HERO_PROJECTION, SEO_PROJECTION
        ),
    )
    .param("slug", slug)
}

// ============================================================================
// INDUSTRIES
// ============================================================================

const INDUSTRY_FIELDS: &str = "_id, _type, title, slug, shortDescription, description, order, \"imageUrl\": image.asset->url, features, capabilities";

pub fn industry_by_slug(slug: &str) -> GroqQuery {
    GroqQuery::new(
        "industryBySlug",
        &format!(
            "*[_type == \"industry\" && slug.current == $slug][0] {{ {}, {}, {} }}",
            INDUSTRY_FIELDS, DETAIL_HERO_PROJECTION, SEO_PROJECTION
        ),
    )
    .param("slug", slug)
}

// ============================================================================
// RESOURCES
// ============================================================================

const RESOURCE_FIELDS: &str = "_id, _type, title, slug, excerpt, category, difficulty, readTime, publishDate, author, featured, tags";

pub fn resource_by_slug(slug: &str) -> GroqQuery {
    GroqQuery::new(
        "resourceBySlug",
        &format!(
            "*[_type == \"resource\" && slug.current == $slug][0] {{ {}, content[] {{ ..., _type == \"image\" => {{ ..., \"url\": asset->url }} }}, {} }}",
            RESOURCE_FIELDS, SEO_PROJECTION
        ),
    )
    .param("slug", slug)
}

// ============================================================================
// TEAM
// ============================================================================

pub fn team_members() -> GroqQuery {
    GroqQuery::new(
        "teamMembers",
        "*[_type == \"teamMember\"] | order(order asc) { _id, name, title, bio, \"photoUrl\": photo.asset->url, order, linkedin, email }",
    )
}

// ============================================================================
// TYPED FETCHERS
// ============================================================================

/// Fetch a single projected document. `null` results become `None`.
pub async fn fetch_one<T: DeserializeOwned>(
    client: &dyn ContentClient,
    query: &GroqQuery,
    perspective: Perspective,
) -> Result<Option<T>, AppError> {
    let value = client.fetch(query, perspective).await?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_value(value)?))
}

/// Fetch a list of projected documents. `null` results become an empty list.
pub async fn fetch_many<T: DeserializeOwned>(
    client: &dyn ContentClient,
    query: &GroqQuery,
    perspective: Perspective,
) -> Result<Vec<T>, AppError> {
    let value = client.fetch(query, perspective).await?;
    if value.is_null() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_value(value)?)
}

pub async fn get_navigation(
    client: &dyn ContentClient,
    perspective: Perspective,
) -> Result<Option<Navigation>, AppError> {
    fetch_one(client, &navigation(), perspective).await
}

pub async fn get_footer(
    client: &dyn ContentClient,
    perspective: Perspective,
) -> Result<Option<Footer>, AppError> {
    fetch_one(client, &footer(), perspective).await
}

pub async fn get_site_settings(
    client: &dyn ContentClient,
    perspective: Perspective,
) -> Result<Option<SiteSettings>, AppError> {
    fetch_one(client, &site_settings(), perspective).await
}

pub async fn get_homepage(
    client: &dyn ContentClient,
    perspective: Perspective,
) -> Result<Option<Homepage>, AppError> {
    fetch_one(client, &homepage(), perspective).await
}

pub async fn get_page_by_slug(
    client: &dyn ContentClient,
    slug: &str,
    perspective: Perspective,
) -> Result<Option<Page>, AppError> {
    fetch_one(client, &page_by_slug(slug), perspective).await
}

pub async fn get_global_page(
    client: &dyn ContentClient,
    doc_type: &str,
    perspective: Perspective,
) -> Result<Option<Page>, AppError> {
    fetch_one(client, &global_page(doc_type), perspective).await
}

pub async fn get_service_by_slug(
    client: &dyn ContentClient,
    slug: &str,
    perspective: Perspective,
) -> Result<Option<Service>, AppError> {
    fetch_one(client, &service_by_slug(slug), perspective).await
}

pub async fn get_industry_by_slug(
    client: &dyn ContentClient,
    slug: &str,
    perspective: Perspective,
) -> Result<Option<Industry>, AppError> {
    fetch_one(client, &industry_by_slug(slug), perspective).await
}

pub async fn get_resource_by_slug(
    client: &dyn ContentClient,
    slug: &str,
    perspective: Perspective,
) -> Result<Option<Resource>, AppError> {
    fetch_one(client, &resource_by_slug(slug), perspective).await
}

pub async fn get_team_members(
    client: &dyn ContentClient,
    perspective: Perspective,
) -> Result<Vec<TeamMember>, AppError> {
    fetch_many(client, &team_members(), perspective).await
}
