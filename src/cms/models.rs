use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize a field that the content store may send as `null`.
///
/// Projections return `null` for fields a document never set, so missing
/// and `null` must both land on the type's default.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize an optional presentation field, falling back to the
/// default when the value has the wrong shape.
///
/// Editors can leave style objects half-filled or with stale types after a
/// schema change; a bad color must not cost the whole section.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_else(|e| {
        tracing::debug!("Ignoring malformed style field: {e}");
        T::default()
    }))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slug {
    #[serde(default, deserialize_with = "nullable")]
    pub current: String,
}

/// Per-document SEO metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seo {
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub og_image_url: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub no_index: bool,
}

// ============================================================================
// GLOBALS
// ============================================================================

/// Raw navigation singleton. Menu items stay loosely typed because the
/// Studio allows both plain items and `navGroup` objects; see
/// [`crate::cms::navigation`] for normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Navigation {
    pub top_bar: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "nullable")]
    pub menu_items: Vec<serde_json::Value>,
    pub cta: Option<NavCta>,
    pub styles: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavCta {
    #[serde(default, deserialize_with = "nullable")]
    pub text: String,
    #[serde(default, deserialize_with = "nullable")]
    pub href: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FooterLink {
    pub text: Option<String>,
    pub label: Option<String>,
    pub href: Option<String>,
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FooterContact {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FooterSocial {
    #[serde(default, deserialize_with = "nullable")]
    pub linkedin: String,
    #[serde(default, deserialize_with = "nullable")]
    pub twitter: String,
    #[serde(default, deserialize_with = "nullable")]
    pub facebook: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Footer {
    pub company: Option<serde_json::Value>,
    pub services_heading: Option<String>,
    pub resources_heading: Option<String>,
    pub quick_links_heading: Option<String>,
    pub contact_heading: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub social: FooterSocial,
    #[serde(default, deserialize_with = "nullable")]
    pub services_links: Vec<FooterLink>,
    #[serde(default, deserialize_with = "nullable")]
    pub resources_links: Vec<FooterLink>,
    #[serde(default, deserialize_with = "nullable")]
    pub quick_links: Vec<FooterLink>,
    #[serde(default, deserialize_with = "nullable")]
    pub contact: FooterContact,
    pub copyright: Option<String>,
}

impl Footer {
    /// Enabled links as `(label, href)`, preferring `text` over `label`.
    pub fn visible_links(links: &[FooterLink]) -> Vec<(String, String)> {
        links
            .iter()
            .filter(|link| link.enabled != Some(false))
            .map(|link| {
                let label = link
                    .text
                    .clone()
                    .filter(|t| !t.is_empty())
                    .or_else(|| link.label.clone())
                    .unwrap_or_default();
                let href = link
                    .href
                    .clone()
                    .filter(|h| !h.is_empty())
                    .unwrap_or_else(|| "#".to_string());
                (label, href)
            })
            .collect()
    }

    /// `tel:` link for the contact phone. Numbers without a leading `+`
    /// are treated as North American.
    pub fn phone_link(&self) -> Option<String> {
        let phone = self.contact.phone.as_deref()?.trim();
        if phone.starts_with('+') {
            let normalized: String = phone
                .chars()
                .filter(|c| !matches!(c, '(' | ')' | '-') && !c.is_whitespace())
                .collect();
            return Some(format!("tel:{}", normalized));
        }
        let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            None
        } else {
            Some(format!("tel:+1{}", digits))
        }
    }

    /// Copyright line with `{year}` substituted.
    pub fn copyright_for_year(&self, year: i32) -> Option<String> {
        self.copyright
            .as_ref()
            .map(|c| c.replace("{year}", &year.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    #[serde(default, deserialize_with = "nullable")]
    pub enabled: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub text: String,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    #[serde(default, deserialize_with = "nullable")]
    pub company_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub tagline: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub address: Option<serde_json::Value>,
    pub social_media: Option<serde_json::Value>,
    pub announcement: Option<Announcement>,
    pub logo_url: Option<String>,
    #[serde(rename = "defaultSEO")]
    pub default_seo: Option<Seo>,
}

// ============================================================================
// PAGES
// ============================================================================

/// A page built from ordered sections (`page` documents and singletons).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    #[serde(rename = "_id", default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(rename = "_type", default, deserialize_with = "nullable")]
    pub doc_type: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    pub slug: Option<Slug>,
    #[serde(default, deserialize_with = "crate::sections::model::deserialize_sections")]
    pub sections: Option<Vec<crate::sections::model::PageSection>>,
    pub seo: Option<Seo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Homepage {
    #[serde(rename = "_id", default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "crate::sections::model::deserialize_section")]
    pub hero: Option<crate::sections::model::PageSection>,
    #[serde(default, deserialize_with = "crate::sections::model::deserialize_sections")]
    pub sections: Option<Vec<crate::sections::model::PageSection>>,
    #[serde(default, deserialize_with = "crate::sections::model::deserialize_section")]
    pub cta: Option<crate::sections::model::PageSection>,
    pub seo: Option<Seo>,
}

impl Homepage {
    /// Hero first, then the body sections, then the closing call to action.
    pub fn all_sections(&self) -> Vec<crate::sections::model::PageSection> {
        self.hero
            .iter()
            .cloned()
            .chain(self.sections.iter().flatten().cloned())
            .chain(self.cta.iter().cloned())
            .collect()
    }
}

// ============================================================================
// COLLECTIONS
// ============================================================================

/// Hero overrides carried by service and industry documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailHero {
    pub badge: Option<String>,
    pub subtitle: Option<String>,
    pub background_image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(rename = "_id", default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    pub slug: Option<Slug>,
    #[serde(default, deserialize_with = "nullable")]
    pub short_description: String,
    /// Portable Text body.
    #[serde(default, deserialize_with = "nullable")]
    pub description: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub hero: Option<DetailHero>,
    /// Studio sort key; any number, not only integers.
    #[serde(default, deserialize_with = "lenient")]
    pub order: Option<f64>,
    #[serde(default, deserialize_with = "nullable")]
    pub highlight: bool,
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub capabilities: Vec<serde_json::Value>,
    pub seo: Option<Seo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Industry {
    #[serde(rename = "_id", default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    pub slug: Option<Slug>,
    #[serde(default, deserialize_with = "nullable")]
    pub short_description: String,
    /// Portable Text body.
    #[serde(default, deserialize_with = "nullable")]
    pub description: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub hero: Option<DetailHero>,
    #[serde(default, deserialize_with = "lenient")]
    pub order: Option<f64>,
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub features: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "nullable")]
    pub capabilities: Vec<serde_json::Value>,
    pub seo: Option<Seo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    #[serde(rename = "_id", default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    pub slug: Option<Slug>,
    #[serde(default, deserialize_with = "nullable")]
    pub excerpt: String,
    /// Portable Text body.
    #[serde(default, deserialize_with = "nullable")]
    pub content: Vec<serde_json::Value>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub read_time: Option<serde_json::Value>,
    pub publish_date: Option<String>,
    pub author: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub featured: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub tags: Vec<String>,
    pub seo: Option<Seo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    #[serde(rename = "_id", default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub order: Option<f64>,
    pub linkedin: Option<String>,
    pub email: Option<String>,
}

/// Slug string of an optional slug object, empty when absent.
pub fn slug_str(slug: &Option<Slug>) -> &str {
    slug.as_ref().map(|s| s.current.as_str()).unwrap_or("")
}
