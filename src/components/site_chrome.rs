use leptos::prelude::*;
use leptos_router::hooks::use_location;
use serde::{Deserialize, Serialize};

use crate::chrome::{is_admin_route, SiteChromeData};
use crate::cms::models::Footer;
use crate::cms::navigation::NavItem;
use crate::components::admin_edit_button::AdminEditButton;
use crate::components::preview_banner::PreviewBanner;

/// Chrome data plus the request state the layout needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChromeView {
    pub chrome: SiteChromeData,
    pub draft_mode: bool,
    pub studio_url: String,
    pub copyright: Option<String>,
}

#[server]
pub async fn get_site_chrome() -> Result<ChromeView, ServerFnError> {
    use chrono::Datelike;

    use crate::chrome::load_chrome;
    use crate::preview::draft_mode::DraftMode;
    use crate::state::AppState;

    let state = use_context::<AppState>()
        .ok_or_else(|| ServerFnError::new("AppState not found in context"))?;
    let draft: DraftMode = leptos_axum::extract_with_state(&state)
        .await
        .unwrap_or_default();

    let chrome = load_chrome(
        state.content_client.as_ref(),
        draft.perspective(),
        Some(&state.log_buffer),
    )
    .await;
    let copyright = chrome
        .footer
        .as_ref()
        .and_then(|f| f.copyright_for_year(chrono::Utc::now().year()));

    Ok(ChromeView {
        chrome,
        draft_mode: draft.enabled(),
        studio_url: state.config.sanity_studio_url.clone(),
        copyright,
    })
}

/// Header, footer and preview controls around the page body. Admin
/// routes get the body alone.
#[component]
pub fn SiteChrome(children: Children) -> impl IntoView {
    let pathname = use_location().pathname;
    let admin = move || is_admin_route(&pathname.get());
    let chrome = Resource::new(|| (), |_| get_site_chrome());

    let view_data = move || {
        chrome
            .get()
            .map(|res| res.unwrap_or_default())
    };

    view! {
        <Show when=move || !admin()>
            <Suspense fallback=|| ()>
                {move || view_data().map(|data| {
                    let draft_mode = data.draft_mode;
                    let studio_url = data.studio_url.clone();
                    view! {
                        <PreviewBanner enabled=draft_mode/>
                        <SiteHeader data=data.chrome.clone()/>
                        <Show when=move || draft_mode>
                            <AdminEditButton studio_url=studio_url.clone()/>
                        </Show>
                    }
                })}
            </Suspense>
        </Show>
        <main id="main-content" class="min-h-screen">{children()}</main>
        <Show when=move || !admin()>
            <Suspense fallback=|| ()>
                {move || view_data().map(|data| {
                    view! { <SiteFooter footer=data.chrome.footer.clone() copyright=data.copyright.clone()/> }
                })}
            </Suspense>
        </Show>
    }
}

fn nav_link(item: NavItem) -> impl IntoView {
    let target = item.open_in_new_tab.then_some("_blank");
    let rel = item.open_in_new_tab.then_some("noopener noreferrer");
    let children = item
        .children
        .into_iter()
        .filter(|c| c.show_in_header)
        .map(|child| {
            view! { <li><a href=child.href class="nav-child">{child.name}</a></li> }
        })
        .collect_view();

    view! {
        <li class=format!("nav-item nav-{}", item.style.variant)>
            <a href=item.href target=target rel=rel>{item.name}</a>
            {item.style.badge_text.map(|badge| view! { <span class="nav-badge">{badge}</span> })}
            <ul class="nav-children">{children}</ul>
        </li>
    }
}

#[component]
fn SiteHeader(data: SiteChromeData) -> impl IntoView {
    let company = data
        .site_settings
        .as_ref()
        .map(|s| s.company_name.clone())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "Integrated Inspection Systems".to_string());
    let announcement = data
        .site_settings
        .as_ref()
        .and_then(|s| s.announcement.clone())
        .filter(|a| a.enabled && !a.text.is_empty());
    let navigation = data.navigation.unwrap_or_default();
    let items = navigation
        .menu_items
        .into_iter()
        .filter(|item| item.show_in_header)
        .map(nav_link)
        .collect_view();

    view! {
        {announcement.map(|a| {
            let href = a.link.unwrap_or_else(|| "#".to_string());
            view! {
                <div class="announcement bg-blue-600 text-white text-center text-sm py-2">
                    <a href=href>{a.text}</a>
                </div>
            }
        })}
        <header class="site-header">
            <nav class="container mx-auto flex items-center justify-between">
                <a href="/" class="font-bold text-lg">{company}</a>
                <ul class="nav-items flex gap-6">{items}</ul>
                {navigation.cta.filter(|c| !c.text.is_empty()).map(|cta| view! {
                    <a href=cta.href class="btn btn-primary">{cta.text}</a>
                })}
            </nav>
        </header>
    }
}

#[component]
fn SiteFooter(footer: Option<Footer>, copyright: Option<String>) -> impl IntoView {
    let footer = footer.unwrap_or_default();
    let column = |heading: Option<String>, fallback: &str, links: Vec<(String, String)>| {
        let heading = heading.unwrap_or_else(|| fallback.to_string());
        let links = links
            .into_iter()
            .map(|(label, href)| view! { <li><a href=href>{label}</a></li> })
            .collect_view();
        view! {
            <div class="footer-column">
                <h3 class="font-semibold mb-3">{heading}</h3>
                <ul class="space-y-2">{links}</ul>
            </div>
        }
    };

    let services = column(
        footer.services_heading.clone(),
        "Services",
        Footer::visible_links(&footer.services_links),
    );
    let resources = column(
        footer.resources_heading.clone(),
        "Resources",
        Footer::visible_links(&footer.resources_links),
    );
    let quick_links = column(
        footer.quick_links_heading.clone(),
        "Quick Links",
        Footer::visible_links(&footer.quick_links),
    );
    let phone = footer
        .contact
        .phone
        .clone()
        .zip(footer.phone_link())
        .map(|(label, href)| view! { <li><a href=href>{label}</a></li> });
    let email = footer.contact.email.clone().map(|email| {
        let href = format!("mailto:{email}");
        view! { <li><a href=href>{email}</a></li> }
    });
    let address = footer
        .contact
        .address
        .clone()
        .map(|address| view! { <li class="whitespace-pre-line">{address}</li> });
    let contact_heading = footer
        .contact_heading
        .clone()
        .unwrap_or_else(|| "Contact".to_string());

    view! {
        <footer class="site-footer bg-slate-950 text-slate-300">
            <div class="container mx-auto grid gap-8 md:grid-cols-4 py-16">
                {services}
                {resources}
                {quick_links}
                <div class="footer-column">
                    <h3 class="font-semibold mb-3">{contact_heading}</h3>
                    <ul class="space-y-2">{phone}{email}{address}</ul>
                </div>
            </div>
            {copyright.map(|c| view! { <p class="text-center text-sm py-6">{c}</p> })}
        </footer>
    }
}
