use serde::{Deserialize, Serialize};

use crate::rendering::html::{escape_attr, escape_html, safe_href, style_attr};
use crate::sections::model::{
    ButtonVariant, CtaSection, CtaVariant, HeroButtonStyles, HeroSection, PageSection,
    RichTextSection,
};
use crate::sections::portable_text::{render_portable_text, RichTextStyles};
use crate::sections::styles::{background_css, button_css, color_style_to_css, overlay_css};

/// One composed section, ready to be injected into the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedSection {
    /// Position of the section in the source list.
    pub key: usize,
    pub kind: String,
    pub html: String,
}

/// Render an ordered section list.
///
/// `None` and an empty list both render nothing. Unknown section types are
/// skipped without shifting the keys of the sections around them.
pub fn compose_sections(sections: Option<&[PageSection]>) -> Vec<RenderedSection> {
    let Some(sections) = sections else {
        return Vec::new();
    };

    sections
        .iter()
        .enumerate()
        .filter_map(|(key, section)| {
            render_section(section).map(|html| RenderedSection {
                key,
                kind: section.kind().to_string(),
                html,
            })
        })
        .collect()
}

/// Render a single section, `None` for types with no renderer.
pub fn render_section(section: &PageSection) -> Option<String> {
    match section {
        PageSection::Hero(hero) => Some(render_hero(hero)),
        PageSection::RichText(rich_text) => Some(render_rich_text(rich_text)),
        PageSection::Cta(cta) => Some(render_cta(cta)),
        PageSection::Unknown => None,
    }
}

fn color_decl(property: &str, color: Option<String>) -> String {
    color
        .map(|c| format!("{}: {}", property, c))
        .unwrap_or_default()
}

fn hero_button_style(styles: Option<&HeroButtonStyles>, secondary: bool) -> String {
    let style = styles.and_then(|s| {
        if secondary {
            s.secondary_button.as_ref()
        } else {
            s.primary_button.as_ref()
        }
    });
    button_css(style)
}

pub fn render_hero(hero: &HeroSection) -> String {
    let mut html = format!(
        "<section class=\"relative flex items-center overflow-hidden {}\">",
        hero.height.class()
    );

    if !hero.background_image_url.is_empty() {
        html.push_str(&format!(
            "<div class=\"absolute inset-0\"><img src=\"{}\" alt=\"{}\" class=\"w-full h-full object-cover\"></div>",
            escape_attr(&hero.background_image_url),
            escape_attr(&hero.image_alt)
        ));
    }
    if let Some(overlay) = overlay_css(hero.overlay.as_ref()) {
        html.push_str(&format!("<div{}></div>", style_attr(&overlay)));
    }

    html.push_str(&format!(
        "<div class=\"container relative z-10\"><div class=\"flex flex-col {}\">",
        hero.alignment.class()
    ));

    if !hero.badge.is_empty() {
        html.push_str(&format!(
            "<span class=\"inline-flex items-center px-4 py-2 rounded-full text-xs font-medium bg-slate-800/50 text-slate-300 border border-slate-700/50 backdrop-blur-sm\">{}</span>",
            escape_html(&hero.badge)
        ));
    }

    let highlight = hero
        .title_highlight
        .as_deref()
        .filter(|h| !h.is_empty())
        .map(|h| {
            format!(
                "<span style=\"color: {}\">{}</span>",
                escape_attr(hero.title_highlight_hex()),
                escape_html(h)
            )
        })
        .unwrap_or_default();
    html.push_str(&format!(
        "<h1 class=\"text-5xl md:text-7xl font-bold tracking-tight mb-6\"><span style=\"color: {}\">{} {}</span></h1>",
        escape_attr(hero.title_hex()),
        escape_html(&hero.title),
        highlight
    ));

    if !hero.description.is_empty() {
        let color = color_decl("color", color_style_to_css(hero.description_color.as_ref()));
        html.push_str(&format!(
            "<p class=\"text-lg md:text-xl text-slate-300 max-w-3xl mb-10\"{}>{}</p>",
            style_attr(&color),
            escape_html(&hero.description)
        ));
    }

    if !hero.buttons.is_empty() {
        html.push_str("<div class=\"flex flex-col sm:flex-row gap-4\">");
        for button in &hero.buttons {
            let secondary = button.variant == ButtonVariant::Secondary;
            html.push_str(&format!(
                "<a href=\"{}\" class=\"btn btn-{}\"{}>{}</a>",
                escape_attr(&safe_href(&button.href)),
                button.variant.as_str(),
                style_attr(&hero_button_style(hero.button_styles.as_ref(), secondary)),
                escape_html(&button.label)
            ));
        }
        html.push_str("</div>");
    }

    html.push_str("</div></div></section>");
    html
}

pub fn render_rich_text(section: &RichTextSection) -> String {
    let body = render_portable_text(&section.content, &RichTextStyles::from_section(section));
    format!(
        "<section class=\"{}\"{}><div class=\"container {} mx-auto\">{}</div></section>",
        section.padding.class(),
        style_attr(&background_css(section.theme.as_ref())),
        section.container.class(),
        body
    )
}

pub fn render_cta(cta: &CtaSection) -> String {
    let padding = cta.padding.map(|p| p.class()).unwrap_or("py-24");
    let background = background_css(cta.theme.as_ref());
    let background_class = if background.is_empty() { " bg-slate-950" } else { "" };

    let mut html = format!(
        "<section class=\"relative overflow-hidden {}{}\"{}><div class=\"container relative z-10\"><div class=\"max-w-4xl mx-auto text-center\">",
        padding,
        background_class,
        style_attr(&background)
    );

    html.push_str(&format!(
        "<h2 class=\"text-4xl md:text-5xl font-bold mb-4 text-white\"{}>{}</h2>",
        style_attr(&color_decl("color", color_style_to_css(cta.title_color.as_ref()))),
        escape_html(&cta.title)
    ));
    html.push_str(&format!(
        "<p class=\"text-lg text-slate-400 mb-10 max-w-2xl mx-auto\"{}>{}</p>",
        style_attr(&color_decl("color", color_style_to_css(cta.subtitle_color.as_ref()))),
        escape_html(&cta.subtitle)
    ));

    if !cta.buttons.is_empty() {
        html.push_str("<div class=\"flex flex-col sm:flex-row gap-4 justify-center mb-12\">");
        for button in &cta.buttons {
            let secondary = button.variant == CtaVariant::Secondary;
            html.push_str(&format!(
                "<a href=\"{}\" class=\"btn btn-lg btn-{}\"{}>{}</a>",
                escape_attr(&safe_href(&button.href)),
                button.variant.as_str(),
                style_attr(&hero_button_style(cta.button_styles.as_ref(), secondary)),
                escape_html(&button.text)
            ));
        }
        html.push_str("</div>");
    }

    html.push_str("</div></div></section>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sections(values: serde_json::Value) -> Vec<PageSection> {
        values
            .as_array()
            .unwrap()
            .iter()
            .cloned()
            .map(PageSection::from_value)
            .collect()
    }

    #[test]
    fn test_none_and_empty_render_nothing() {
        assert!(compose_sections(None).is_empty());
        let empty: Vec<PageSection> = Vec::new();
        assert!(compose_sections(Some(empty.as_slice())).is_empty());
    }

    #[test]
    fn test_unknown_sections_do_not_change_count() {
        let with_unknown = sections(json!([
            { "_type": "heroSection", "title": "Precision" },
            { "_type": "mysteryBlock" },
            { "_type": "ctaSection" }
        ]));
        let without_unknown = sections(json!([
            { "_type": "heroSection", "title": "Precision" },
            { "_type": "ctaSection" }
        ]));
        let a = compose_sections(Some(with_unknown.as_slice()));
        let b = compose_sections(Some(without_unknown.as_slice()));
        assert_eq!(a.len(), b.len());
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn test_keys_are_source_indices() {
        let list = sections(json!([
            { "_type": "mysteryBlock" },
            { "_type": "richTextSection" },
            { "_type": "ctaSection" }
        ]));
        let rendered = compose_sections(Some(list.as_slice()));
        let keys: Vec<usize> = rendered.iter().map(|r| r.key).collect();
        assert_eq!(keys, vec![1, 2]);
        assert_eq!(rendered[0].kind, "richTextSection");
    }

    #[test]
    fn test_rich_text_default_container() {
        let list = sections(json!([{ "_type": "richTextSection", "content": [] }]));
        let rendered = compose_sections(Some(list.as_slice()));
        assert!(rendered[0].html.contains("container max-w-4xl mx-auto"));
        assert!(rendered[0].html.contains("py-12 md:py-16"));
    }

    #[test]
    fn test_hero_rendering_defaults() {
        let list = sections(json!([{
            "_type": "heroSection",
            "title": "Precision",
            "titleHighlight": "Machining",
            "buttons": [{ "label": "Quote", "href": "/contact" }]
        }]));
        let html = &compose_sections(Some(list.as_slice()))[0].html;
        assert!(html.contains("min-h-[85vh]"));
        assert!(html.contains("text-center items-center"));
        assert!(html.contains("color: #ffffff"));
        assert!(html.contains("<span style=\"color: #60a5fa\">Machining</span>"));
        assert!(html.contains("btn-primary"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_hero_escapes_title() {
        let list = sections(json!([{ "_type": "heroSection", "title": "<b>x</b>" }]));
        let html = &compose_sections(Some(list.as_slice()))[0].html;
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
    }

    #[test]
    fn test_cta_defaults_rendered() {
        let list = sections(json!([{ "_type": "ctaSection" }]));
        let html = &compose_sections(Some(list.as_slice()))[0].html;
        assert!(html.contains("Start Your Precision Manufacturing Project"));
        assert!(html.contains("href=\"/contact\""));
        assert!(html.contains("href=\"/compliance/supplier-requirements\""));
        assert!(html.contains("bg-slate-950"));
    }

    #[test]
    fn test_cta_theme_replaces_default_background() {
        let list = sections(json!([{
            "_type": "ctaSection",
            "padding": "small",
            "theme": { "backgroundColor": { "color": { "hex": "#1e3a8a" } } }
        }]));
        let html = &compose_sections(Some(list.as_slice()))[0].html;
        assert!(html.contains("background-color: #1e3a8a"));
        assert!(html.contains("py-8 md:py-12"));
        assert!(!html.contains("bg-slate-950"));
    }
}
