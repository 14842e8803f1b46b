//! Site path to page content.
//!
//! Every page is delivered as a list of composed sections. Section-built
//! documents (homepage, singletons, custom pages) go through the composer
//! as-is; collection documents are turned into a hero plus a rich-text
//! body first.

use serde::{Deserialize, Serialize};

use crate::cms::client::{ContentClient, Perspective};
use crate::cms::models::{DetailHero, Industry, Page, Resource, Seo, Service};
use crate::cms::queries;
use crate::error::AppError;
#[cfg(feature = "ssr")]
use crate::logging::buffer::ServerLogBuffer;
use crate::sections::composer::{compose_sections, RenderedSection};
use crate::sections::model::{HeroHeight, HeroSection, PageSection, RichTextSection};

/// Singleton pages served at fixed paths, as `(path, document type)`.
pub const GLOBAL_ROUTES: &[(&str, &str)] = &[
    ("/about", "about"),
    ("/contact", "contact"),
    ("/careers", "careers"),
    ("/compliance/terms", "terms"),
    ("/compliance/supplier-requirements", "supplierRequirements"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRoute {
    Home,
    Global(&'static str),
    Service(String),
    Industry(String),
    Resource { category: String, slug: String },
    Custom(String),
}

impl PageRoute {
    /// Match a request path. `None` for paths no page template serves.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let trimmed = if path.len() > 1 { path.trim_end_matches('/') } else { path };

        if trimmed.is_empty() || trimmed == "/" {
            return Some(PageRoute::Home);
        }
        if let Some((_, doc_type)) = GLOBAL_ROUTES.iter().find(|(p, _)| *p == trimmed) {
            return Some(PageRoute::Global(*doc_type));
        }

        let segments: Vec<String> = trimmed
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| {
                urlencoding::decode(s)
                    .map(|d| d.into_owned())
                    .unwrap_or_else(|_| s.to_string())
            })
            .collect();

        match segments.as_slice() {
            [section, slug] if section == "services" => Some(PageRoute::Service(slug.clone())),
            [section, slug] if section == "industries" => Some(PageRoute::Industry(slug.clone())),
            [section, category, slug] if section == "resources" => Some(PageRoute::Resource {
                category: category.clone(),
                slug: slug.clone(),
            }),
            [slug] => Some(PageRoute::Custom(slug.clone())),
            _ => None,
        }
    }
}

/// Everything a page template needs, serializable across the server
/// function boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageView {
    pub title: String,
    pub seo: Option<Seo>,
    pub sections: Vec<RenderedSection>,
}

fn from_page(page: Page) -> PageView {
    PageView {
        sections: compose_sections(page.sections.as_deref()),
        title: page.title,
        seo: page.seo,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Hero plus rich-text body for a collection document. The document's own
/// `hero` object wins over its summary and listing image.
fn detail_view(
    title: String,
    summary: String,
    hero: Option<DetailHero>,
    image_url: Option<String>,
    body: Vec<serde_json::Value>,
    seo: Option<Seo>,
) -> PageView {
    let hero = hero.unwrap_or_default();
    let hero = PageSection::Hero(HeroSection {
        image_alt: title.clone(),
        title: title.clone(),
        badge: hero.badge.unwrap_or_default(),
        description: non_empty(hero.subtitle).unwrap_or(summary),
        background_image_url: non_empty(hero.background_image_url)
            .or(image_url)
            .unwrap_or_default(),
        height: HeroHeight::Medium,
        ..Default::default()
    });
    let body = PageSection::RichText(RichTextSection {
        content: body,
        ..Default::default()
    });
    let sections = [hero, body];

    PageView {
        title,
        seo,
        sections: compose_sections(Some(&sections[..])),
    }
}

fn service_view(service: Service) -> PageView {
    detail_view(
        service.title,
        service.short_description,
        service.hero,
        service.image_url,
        service.description,
        service.seo,
    )
}

fn industry_view(industry: Industry) -> PageView {
    detail_view(
        industry.title,
        industry.short_description,
        industry.hero,
        industry.image_url,
        industry.description,
        industry.seo,
    )
}

fn resource_view(resource: Resource) -> PageView {
    detail_view(resource.title, resource.excerpt, None, None, resource.content, resource.seo)
}

/// Load and compose the page for a route. `Ok(None)` means not found.
pub async fn load_page_view(
    client: &dyn ContentClient,
    route: &PageRoute,
    perspective: Perspective,
) -> Result<Option<PageView>, AppError> {
    let view = match route {
        PageRoute::Home => queries::get_homepage(client, perspective).await?.map(|home| {
            let sections = home.all_sections();
            PageView {
                title: home
                    .seo
                    .as_ref()
                    .and_then(|s| s.meta_title.clone())
                    .unwrap_or_default(),
                sections: compose_sections(Some(sections.as_slice())),
                seo: home.seo,
            }
        }),
        PageRoute::Global(doc_type) => queries::get_global_page(client, doc_type, perspective)
            .await?
            .map(from_page),
        PageRoute::Custom(slug) => queries::get_page_by_slug(client, slug, perspective)
            .await?
            .map(from_page),
        PageRoute::Service(slug) => queries::get_service_by_slug(client, slug, perspective)
            .await?
            .map(service_view),
        PageRoute::Industry(slug) => queries::get_industry_by_slug(client, slug, perspective)
            .await?
            .map(industry_view),
        PageRoute::Resource { slug, .. } => queries::get_resource_by_slug(client, slug, perspective)
            .await?
            .map(resource_view),
    };
    Ok(view)
}

/// Like [`load_page_view`], but a failed read degrades to an empty page
/// instead of an error. The failure is recorded in the log buffer once.
/// `None` still means the document does not exist.
#[cfg(feature = "ssr")]
pub async fn load_page_view_or_empty(
    client: &dyn ContentClient,
    route: &PageRoute,
    perspective: Perspective,
    log_buffer: &ServerLogBuffer,
) -> Option<PageView> {
    match load_page_view(client, route, perspective).await {
        Ok(view) => view,
        Err(e) => {
            log_buffer.error(
                "pages",
                format!("Failed to load {:?}: {}", route, e),
                None,
            );
            Some(PageView::default())
        }
    }
}
