use serde::{Deserialize, Serialize};

use crate::cms::models::Navigation;

/// A menu entry after normalization, as served by the navigation proxy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub name: String,
    pub href: String,
    pub description: String,
    pub link_type: String,
    pub open_in_new_tab: bool,
    pub icon_name: Option<String>,
    pub show_in_header: bool,
    pub show_in_mobile: bool,
    pub style: NavItemStyle,
    pub children: Vec<NavItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItemStyle {
    pub variant: String,
    pub badge_text: Option<String>,
}

/// Navigation payload with every menu item normalized.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedNavigation {
    pub top_bar: Option<serde_json::Value>,
    pub cta: Option<crate::cms::models::NavCta>,
    pub styles: Option<serde_json::Value>,
    pub menu_items: Vec<NavItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNavItem {
    #[serde(rename = "_type")]
    item_type: Option<String>,
    group_title: Option<String>,
    items: Option<Vec<serde_json::Value>>,
    name: Option<String>,
    href: Option<String>,
    description: Option<String>,
    link_type: Option<String>,
    open_in_new_tab: Option<bool>,
    icon_preset: Option<String>,
    icon_name: Option<String>,
    show_in_header: Option<bool>,
    show_in_mobile: Option<bool>,
    style: Option<RawNavStyle>,
    children: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNavStyle {
    variant: Option<String>,
    badge_text: Option<String>,
}

/// Use the authored href, or infer one from the item name when it is
/// empty or a bare `#`.
pub fn normalize_href(name: &str, href: Option<&str>) -> String {
    let h = href.unwrap_or("").trim();
    if !h.is_empty() && h != "#" {
        return h.to_string();
    }

    let n = name.to_lowercase();
    let inferred = if n.contains("about") {
        "/about"
    } else if n.contains("contact") {
        "/contact"
    } else if n.contains("service") {
        "/services"
    } else if n.contains("industr") {
        "/industries"
    } else if n.contains("resource") {
        "/resources"
    } else if n.contains("career") || n.contains("job") {
        "/careers"
    } else {
        "/"
    };
    inferred.to_string()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn map_children(values: Option<Vec<serde_json::Value>>) -> Vec<NavItem> {
    values
        .unwrap_or_default()
        .iter()
        .filter_map(map_item)
        .collect()
}

/// Normalize one raw menu item. `null` and non-object entries are dropped.
pub fn map_item(value: &serde_json::Value) -> Option<NavItem> {
    if !value.is_object() {
        return None;
    }
    let raw: RawNavItem = match serde_json::from_value(value.clone()) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::debug!("Skipping malformed navigation item: {e}");
            return None;
        }
    };

    if raw.item_type.as_deref() == Some("navGroup") {
        return Some(NavItem {
            name: non_empty(raw.group_title).unwrap_or_else(|| "Group".to_string()),
            href: String::new(),
            description: String::new(),
            link_type: "internal".to_string(),
            open_in_new_tab: false,
            icon_name: None,
            show_in_header: true,
            show_in_mobile: true,
            style: NavItemStyle {
                variant: "link".to_string(),
                badge_text: None,
            },
            children: map_children(raw.items),
        });
    }

    let name = raw.name.unwrap_or_default();
    let href = normalize_href(&name, raw.href.as_deref());
    let icon_name = match raw.icon_preset.as_deref() {
        Some(preset) if !preset.is_empty() && preset != "custom" && preset != "none" => {
            Some(preset.to_string())
        }
        _ => non_empty(raw.icon_name),
    };
    let style = raw.style.unwrap_or_default();

    Some(NavItem {
        name,
        href,
        description: raw.description.unwrap_or_default(),
        link_type: non_empty(raw.link_type).unwrap_or_else(|| "internal".to_string()),
        open_in_new_tab: raw.open_in_new_tab.unwrap_or(false),
        icon_name,
        show_in_header: raw.show_in_header != Some(false),
        show_in_mobile: raw.show_in_mobile != Some(false),
        style: NavItemStyle {
            variant: non_empty(style.variant).unwrap_or_else(|| "link".to_string()),
            badge_text: non_empty(style.badge_text),
        },
        children: map_children(raw.children),
    })
}

/// Normalize a navigation singleton. A missing document yields an empty menu.
pub fn normalize(nav: Option<Navigation>) -> NormalizedNavigation {
    let nav = nav.unwrap_or_default();
    NormalizedNavigation {
        top_bar: nav.top_bar,
        cta: nav.cta,
        styles: nav.styles,
        menu_items: nav.menu_items.iter().filter_map(map_item).collect(),
    }
}
