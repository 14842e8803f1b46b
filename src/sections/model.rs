use serde::{Deserialize, Deserializer, Serialize};

use crate::cms::models::{lenient, nullable};
use crate::sections::styles::{
    BlockquoteStyle, ButtonStyle, CodeStyle, ColorStyle, HeadingStyles, LinkStyle, Overlay,
    Padding, SectionTheme, TypographyStyle,
};

pub const DEFAULT_TITLE_COLOR: &str = "#ffffff";
pub const DEFAULT_TITLE_HIGHLIGHT_COLOR: &str = "#60a5fa";

pub const DEFAULT_CTA_TITLE: &str = "Start Your Precision Manufacturing Project";
pub const DEFAULT_CTA_SUBTITLE: &str = "From prototype to production, we deliver AS9100D-certified precision components with tolerances to ±0.0001\" for aerospace, defense, and medical applications.";

/// One entry of a page's `sections` array, dispatched on `_type`.
///
/// Unrecognized types deserialize to [`PageSection::Unknown`] and render
/// nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type")]
pub enum PageSection {
    #[serde(rename = "heroSection")]
    Hero(HeroSection),
    #[serde(rename = "richTextSection")]
    RichText(RichTextSection),
    #[serde(rename = "ctaSection")]
    Cta(CtaSection),
    #[serde(other)]
    Unknown,
}

impl PageSection {
    pub fn kind(&self) -> &'static str {
        match self {
            PageSection::Hero(_) => "heroSection",
            PageSection::RichText(_) => "richTextSection",
            PageSection::Cta(_) => "ctaSection",
            PageSection::Unknown => "unknown",
        }
    }

    /// Lenient conversion from raw content. Anything that is not a
    /// well-formed known section becomes `Unknown`.
    pub fn from_value(value: serde_json::Value) -> Self {
        if !value.is_object() {
            return PageSection::Unknown;
        }
        match serde_json::from_value(value) {
            Ok(section) => section,
            Err(e) => {
                tracing::debug!("Treating malformed section as unknown: {e}");
                PageSection::Unknown
            }
        }
    }
}

/// `sections` field deserializer: `null` stays `None`, a non-array value is
/// treated as absent, and each element goes through [`PageSection::from_value`].
pub fn deserialize_sections<'de, D>(deserializer: D) -> Result<Option<Vec<PageSection>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::Array(items)) => {
            Some(items.into_iter().map(PageSection::from_value).collect())
        }
        _ => None,
    })
}

/// Single-section field deserializer (homepage `hero` and `cta`).
pub fn deserialize_section<'de, D>(deserializer: D) -> Result<Option<PageSection>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .filter(|v| !v.is_null())
        .map(PageSection::from_value))
}

// ============================================================================
// HERO
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeroHeight {
    Full,
    Medium,
    #[default]
    #[serde(other)]
    Large,
}

impl HeroHeight {
    pub fn class(&self) -> &'static str {
        match self {
            HeroHeight::Full => "min-h-screen",
            HeroHeight::Large => "min-h-[85vh]",
            HeroHeight::Medium => "min-h-[70vh]",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Right,
    #[default]
    #[serde(other)]
    Center,
}

impl Alignment {
    pub fn class(&self) -> &'static str {
        match self {
            Alignment::Left => "text-left items-start",
            Alignment::Center => "text-center items-center",
            Alignment::Right => "text-right items-end",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    Secondary,
    #[default]
    #[serde(other)]
    Primary,
}

impl ButtonVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => "primary",
            ButtonVariant::Secondary => "secondary",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeroButton {
    #[serde(default, deserialize_with = "nullable")]
    pub label: String,
    #[serde(default, deserialize_with = "nullable")]
    pub href: String,
    #[serde(default, deserialize_with = "lenient")]
    pub variant: ButtonVariant,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroButtonStyles {
    pub primary_button: Option<ButtonStyle>,
    pub secondary_button: Option<ButtonStyle>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSection {
    #[serde(default, deserialize_with = "nullable")]
    pub background_image_url: String,
    #[serde(default, deserialize_with = "nullable")]
    pub image_alt: String,
    #[serde(default, deserialize_with = "nullable")]
    pub badge: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    pub title_highlight: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub title_color: Option<ColorStyle>,
    #[serde(default, deserialize_with = "lenient")]
    pub title_highlight_color: Option<ColorStyle>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient")]
    pub description_color: Option<ColorStyle>,
    #[serde(default, deserialize_with = "nullable")]
    pub buttons: Vec<HeroButton>,
    #[serde(default, deserialize_with = "lenient")]
    pub height: HeroHeight,
    #[serde(default, deserialize_with = "lenient")]
    pub alignment: Alignment,
    #[serde(default, deserialize_with = "lenient")]
    pub overlay: Option<Overlay>,
    #[serde(default, deserialize_with = "lenient")]
    pub button_styles: Option<HeroButtonStyles>,
}

impl HeroSection {
    pub fn title_hex(&self) -> &str {
        self.title_color
            .as_ref()
            .and_then(|c| c.hex())
            .unwrap_or(DEFAULT_TITLE_COLOR)
    }

    pub fn title_highlight_hex(&self) -> &str {
        self.title_highlight_color
            .as_ref()
            .and_then(|c| c.hex())
            .unwrap_or(DEFAULT_TITLE_HIGHLIGHT_COLOR)
    }
}

// ============================================================================
// RICH TEXT
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerWidth {
    Narrow,
    Wide,
    Full,
    #[default]
    #[serde(other)]
    Default,
}

impl ContainerWidth {
    pub fn class(&self) -> &'static str {
        match self {
            ContainerWidth::Narrow => "max-w-2xl",
            ContainerWidth::Wide => "max-w-6xl",
            ContainerWidth::Full => "max-w-full",
            ContainerWidth::Default => "max-w-4xl",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichTextSection {
    /// Portable Text blocks.
    #[serde(default, deserialize_with = "nullable")]
    pub content: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub container: ContainerWidth,
    #[serde(default, deserialize_with = "lenient")]
    pub padding: Padding,
    #[serde(default, deserialize_with = "lenient")]
    pub theme: Option<SectionTheme>,
    #[serde(default, deserialize_with = "lenient")]
    pub heading_styles: Option<HeadingStyles>,
    #[serde(default, deserialize_with = "lenient")]
    pub body_text_style: Option<TypographyStyle>,
    #[serde(default, deserialize_with = "lenient")]
    pub link_style: Option<LinkStyle>,
    #[serde(default, deserialize_with = "lenient")]
    pub blockquote_style: Option<BlockquoteStyle>,
    #[serde(default, deserialize_with = "lenient")]
    pub code_style: Option<CodeStyle>,
}

// ============================================================================
// CALL TO ACTION
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CtaVariant {
    Secondary,
    #[default]
    #[serde(other)]
    Default,
}

impl CtaVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            CtaVariant::Default => "default",
            CtaVariant::Secondary => "secondary",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CtaButton {
    #[serde(default, deserialize_with = "nullable")]
    pub text: String,
    #[serde(default, deserialize_with = "nullable")]
    pub href: String,
    #[serde(default, deserialize_with = "lenient")]
    pub variant: CtaVariant,
    pub enabled: Option<bool>,
}

impl CtaButton {
    fn new(text: &str, href: &str, variant: CtaVariant) -> Self {
        Self {
            text: text.to_string(),
            href: href.to_string(),
            variant,
            enabled: None,
        }
    }
}

pub fn default_cta_buttons() -> Vec<CtaButton> {
    vec![
        CtaButton::new("Get Quote", "/contact", CtaVariant::Default),
        CtaButton::new(
            "Technical Specifications",
            "/compliance/supplier-requirements",
            CtaVariant::Secondary,
        ),
    ]
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCtaSection {
    title: Option<String>,
    subtitle: Option<String>,
    buttons: Option<Vec<CtaButton>>,
    #[serde(default, deserialize_with = "lenient")]
    title_color: Option<ColorStyle>,
    #[serde(default, deserialize_with = "lenient")]
    subtitle_color: Option<ColorStyle>,
    #[serde(default, deserialize_with = "lenient")]
    button_styles: Option<HeroButtonStyles>,
    #[serde(default, deserialize_with = "lenient")]
    theme: Option<SectionTheme>,
    #[serde(default, deserialize_with = "lenient")]
    padding: Option<Padding>,
}

/// Closing call to action. Defaults are filled in while deserializing: an
/// empty title or subtitle falls back to the stock copy and a missing
/// `buttons` list to the two stock buttons. An explicit empty list stays
/// empty. Disabled buttons are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCtaSection", rename_all = "camelCase")]
pub struct CtaSection {
    pub title: String,
    pub subtitle: String,
    pub buttons: Vec<CtaButton>,
    pub title_color: Option<ColorStyle>,
    pub subtitle_color: Option<ColorStyle>,
    pub button_styles: Option<HeroButtonStyles>,
    pub theme: Option<SectionTheme>,
    pub padding: Option<Padding>,
}

impl From<RawCtaSection> for CtaSection {
    fn from(raw: RawCtaSection) -> Self {
        let title = raw
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_CTA_TITLE.to_string());
        let subtitle = raw
            .subtitle
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_CTA_SUBTITLE.to_string());
        let buttons = raw
            .buttons
            .unwrap_or_else(default_cta_buttons)
            .into_iter()
            .filter(|b| b.enabled != Some(false))
            .collect();

        Self {
            title,
            subtitle,
            buttons,
            title_color: raw.title_color,
            subtitle_color: raw.subtitle_color,
            button_styles: raw.button_styles,
            theme: raw.theme,
            padding: raw.padding,
        }
    }
}

impl Default for CtaSection {
    fn default() -> Self {
        RawCtaSection {
            title: None,
            subtitle: None,
            buttons: None,
            title_color: None,
            subtitle_color: None,
            button_styles: None,
            theme: None,
            padding: None,
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_type_is_unknown() {
        let section = PageSection::from_value(json!({ "_type": "testimonialCarousel", "items": [] }));
        assert_eq!(section, PageSection::Unknown);
    }

    #[test]
    fn test_missing_type_and_null_are_unknown() {
        assert_eq!(PageSection::from_value(json!({ "title": "x" })), PageSection::Unknown);
        assert_eq!(PageSection::from_value(json!(null)), PageSection::Unknown);
        assert_eq!(PageSection::from_value(json!("heroSection")), PageSection::Unknown);
    }

    #[test]
    fn test_hero_defaults() {
        let PageSection::Hero(hero) = PageSection::from_value(json!({ "_type": "heroSection" })) else {
            panic!("expected hero");
        };
        assert_eq!(hero.background_image_url, "");
        assert_eq!(hero.image_alt, "");
        assert_eq!(hero.badge, "");
        assert_eq!(hero.height, HeroHeight::Large);
        assert_eq!(hero.alignment, Alignment::Center);
        assert_eq!(hero.title_hex(), "#ffffff");
        assert_eq!(hero.title_highlight_hex(), "#60a5fa");
        assert!(hero.buttons.is_empty());
    }

    #[test]
    fn test_hero_nulls_and_lenient_enums() {
        let PageSection::Hero(hero) = PageSection::from_value(json!({
            "_type": "heroSection",
            "backgroundImageUrl": null,
            "height": "gigantic",
            "alignment": "left",
            "buttons": [{ "label": "Quote", "href": "/contact", "variant": null }]
        })) else {
            panic!("expected hero");
        };
        assert_eq!(hero.background_image_url, "");
        assert_eq!(hero.height, HeroHeight::Large);
        assert_eq!(hero.alignment, Alignment::Left);
        assert_eq!(hero.buttons[0].variant, ButtonVariant::Primary);
    }

    #[test]
    fn test_unrecognized_enum_values_use_default() {
        let hero_height = |v: &str| serde_json::from_value::<HeroHeight>(json!(v)).unwrap();
        assert_eq!(hero_height("medium"), HeroHeight::Medium);
        assert_eq!(hero_height("tiny"), HeroHeight::Large);

        let alignment = |v: &str| serde_json::from_value::<Alignment>(json!(v)).unwrap();
        assert_eq!(alignment("right"), Alignment::Right);
        assert_eq!(alignment("justify"), Alignment::Center);

        let button = |v: &str| serde_json::from_value::<ButtonVariant>(json!(v)).unwrap();
        assert_eq!(button("secondary"), ButtonVariant::Secondary);
        assert_eq!(button("ghost"), ButtonVariant::Primary);

        let cta = |v: &str| serde_json::from_value::<CtaVariant>(json!(v)).unwrap();
        assert_eq!(cta("secondary"), CtaVariant::Secondary);
        assert_eq!(cta("outline"), CtaVariant::Default);

        let padding = |v: &str| serde_json::from_value::<Padding>(json!(v)).unwrap();
        assert_eq!(padding("xlarge"), Padding::Xlarge);
        assert_eq!(padding("none"), Padding::None);
        assert_eq!(padding("huge"), Padding::Medium);
    }

    #[test]
    fn test_bad_style_fields_keep_section() {
        let PageSection::Hero(hero) = PageSection::from_value(json!({
            "_type": "heroSection",
            "title": "Metrology",
            "titleColor": "#ff0000",
            "overlay": { "enabled": "yes" },
            "height": 3,
            "buttons": [{ "label": "Quote", "variant": 7 }]
        })) else {
            panic!("expected hero");
        };
        assert_eq!(hero.title, "Metrology");
        assert_eq!(hero.title_color, None);
        assert_eq!(hero.title_hex(), DEFAULT_TITLE_COLOR);
        assert_eq!(hero.overlay, None);
        assert_eq!(hero.height, HeroHeight::Large);
        assert_eq!(hero.buttons[0].variant, ButtonVariant::Primary);

        let PageSection::Cta(cta) = PageSection::from_value(json!({
            "_type": "ctaSection",
            "title": "Talk to us",
            "padding": { "size": "large" },
            "theme": "dark"
        })) else {
            panic!("expected cta");
        };
        assert_eq!(cta.title, "Talk to us");
        assert_eq!(cta.padding, None);
        assert_eq!(cta.theme, None);
    }

    #[test]
    fn test_rich_text_container_default() {
        let PageSection::RichText(rt) = PageSection::from_value(json!({ "_type": "richTextSection" })) else {
            panic!("expected rich text");
        };
        assert_eq!(rt.container.class(), "max-w-4xl");
        assert_eq!(rt.padding, Padding::Medium);
        assert!(rt.content.is_empty());

        let PageSection::RichText(rt) =
            PageSection::from_value(json!({ "_type": "richTextSection", "container": "narrow" }))
        else {
            panic!("expected rich text");
        };
        assert_eq!(rt.container.class(), "max-w-2xl");
    }

    #[test]
    fn test_cta_defaults() {
        let PageSection::Cta(cta) = PageSection::from_value(json!({ "_type": "ctaSection", "title": "" })) else {
            panic!("expected cta");
        };
        assert_eq!(cta.title, DEFAULT_CTA_TITLE);
        assert_eq!(cta.subtitle, DEFAULT_CTA_SUBTITLE);
        assert_eq!(cta.buttons.len(), 2);
        assert_eq!(cta.buttons[0].text, "Get Quote");
        assert_eq!(cta.buttons[1].variant, CtaVariant::Secondary);
        assert_eq!(cta, CtaSection::default());
    }

    #[test]
    fn test_cta_filters_disabled_and_keeps_empty_list() {
        let PageSection::Cta(cta) = PageSection::from_value(json!({
            "_type": "ctaSection",
            "buttons": [
                { "text": "Call", "href": "tel:1", "enabled": false },
                { "text": "Email", "href": "/contact" }
            ]
        })) else {
            panic!("expected cta");
        };
        assert_eq!(cta.buttons.len(), 1);
        assert_eq!(cta.buttons[0].text, "Email");

        let PageSection::Cta(cta) = PageSection::from_value(json!({ "_type": "ctaSection", "buttons": [] })) else {
            panic!("expected cta");
        };
        assert!(cta.buttons.is_empty());
    }

    #[test]
    fn test_deserialize_sections_field() {
        #[derive(Deserialize)]
        struct Holder {
            #[serde(default, deserialize_with = "deserialize_sections")]
            sections: Option<Vec<PageSection>>,
        }

        let holder: Holder = serde_json::from_value(json!({ "sections": null })).unwrap();
        assert!(holder.sections.is_none());

        let holder: Holder = serde_json::from_value(json!({})).unwrap();
        assert!(holder.sections.is_none());

        let holder: Holder = serde_json::from_value(json!({
            "sections": [{ "_type": "heroSection" }, { "_type": "mystery" }, 42]
        }))
        .unwrap();
        let kinds: Vec<&str> = holder.sections.unwrap().iter().map(|s| s.kind()).collect();
        assert_eq!(kinds, vec!["heroSection", "unknown", "unknown"]);
    }
}
