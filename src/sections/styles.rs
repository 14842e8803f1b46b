//! Studio style objects and their CSS/class translations.

use serde::{Deserialize, Serialize};

use crate::cms::models::nullable;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorValue {
    pub hex: Option<String>,
}

/// A color picked in the Studio plus an opacity percentage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorStyle {
    pub color: Option<ColorValue>,
    pub opacity: Option<f64>,
}

impl ColorStyle {
    pub fn hex(&self) -> Option<&str> {
        self.color
            .as_ref()
            .and_then(|c| c.hex.as_deref())
            .filter(|h| !h.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyStyle {
    pub text_color: Option<ColorStyle>,
    pub font_size: Option<String>,
    pub font_weight: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundGradient {
    #[serde(default, deserialize_with = "nullable")]
    pub enabled: bool,
    pub from_color: Option<ColorStyle>,
    pub to_color: Option<ColorStyle>,
    pub direction: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionTheme {
    pub background_color: Option<ColorStyle>,
    pub background_gradient: Option<BackgroundGradient>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonStyle {
    pub text_color: Option<ColorStyle>,
    pub background_color: Option<ColorStyle>,
    pub border_color: Option<ColorStyle>,
    pub hover_text_color: Option<ColorStyle>,
    pub hover_background_color: Option<ColorStyle>,
    pub hover_border_color: Option<ColorStyle>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    #[serde(default, deserialize_with = "nullable")]
    pub enabled: bool,
    pub color: Option<ColorStyle>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadingStyles {
    pub h1: Option<TypographyStyle>,
    pub h2: Option<TypographyStyle>,
    pub h3: Option<TypographyStyle>,
    pub h4: Option<TypographyStyle>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStyle {
    pub color: Option<ColorStyle>,
    pub hover_color: Option<ColorStyle>,
    pub underline: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockquoteStyle {
    pub text_color: Option<ColorStyle>,
    pub border_color: Option<ColorStyle>,
    pub background_color: Option<ColorStyle>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeStyle {
    pub text_color: Option<ColorStyle>,
    pub background_color: Option<ColorStyle>,
}

/// Vertical padding options shared by sections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Padding {
    None,
    Small,
    Large,
    Xlarge,
    #[default]
    #[serde(other)]
    Medium,
}

impl Padding {
    pub fn class(&self) -> &'static str {
        match self {
            Padding::None => "py-0",
            Padding::Small => "py-8 md:py-12",
            Padding::Medium => "py-12 md:py-16",
            Padding::Large => "py-16 md:py-24",
            Padding::Xlarge => "py-24 md:py-32",
        }
    }
}

/// Convert a color style to a CSS color.
///
/// Full opacity keeps the hex value; anything lower becomes `rgba()`.
pub fn color_style_to_css(style: Option<&ColorStyle>) -> Option<String> {
    let style = style?;
    let hex = style.hex()?;
    let opacity = style.opacity.unwrap_or(100.0);

    if (opacity - 100.0).abs() < f64::EPSILON {
        return Some(hex.to_string());
    }

    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|part| u8::from_str_radix(part, 16).ok())
    };
    match (channel(1..3), channel(3..5), channel(5..7)) {
        (Some(r), Some(g), Some(b)) => Some(format!("rgba({}, {}, {}, {})", r, g, b, opacity / 100.0)),
        _ => Some(hex.to_string()),
    }
}

pub fn font_size_class(font_size: Option<&str>) -> &'static str {
    match font_size {
        Some("xs") => "text-xs",
        Some("sm") => "text-sm",
        Some("lg") => "text-lg",
        Some("xl") => "text-xl",
        Some("2xl") => "text-2xl",
        Some("3xl") => "text-3xl",
        Some("4xl") => "text-4xl",
        Some("5xl") => "text-5xl",
        Some("6xl") => "text-6xl",
        _ => "text-base",
    }
}

pub fn font_weight_class(font_weight: Option<&str>) -> &'static str {
    match font_weight {
        Some("medium") => "font-medium",
        Some("semibold") => "font-semibold",
        Some("bold") => "font-bold",
        Some("extrabold") => "font-extrabold",
        _ => "font-normal",
    }
}

/// Classes for the typography fields that are actually set.
pub fn typography_classes(style: Option<&TypographyStyle>) -> String {
    let Some(style) = style else {
        return String::new();
    };
    let mut classes = Vec::new();
    if style.font_size.is_some() {
        classes.push(font_size_class(style.font_size.as_deref()));
    }
    if style.font_weight.is_some() {
        classes.push(font_weight_class(style.font_weight.as_deref()));
    }
    classes.join(" ")
}

fn gradient_direction(direction: Option<&str>) -> &'static str {
    match direction {
        Some("to-t") => "to top",
        Some("to-r") => "to right",
        Some("to-l") => "to left",
        Some("to-tr") => "to top right",
        Some("to-tl") => "to top left",
        Some("to-br") => "to bottom right",
        Some("to-bl") => "to bottom left",
        _ => "to bottom",
    }
}

/// Background declarations for a section theme.
///
/// An enabled gradient with both stops wins over a solid background color.
pub fn background_css(theme: Option<&SectionTheme>) -> String {
    let Some(theme) = theme else {
        return String::new();
    };

    if let Some(gradient) = theme
        .background_gradient
        .as_ref()
        .filter(|g| g.enabled && g.from_color.is_some() && g.to_color.is_some())
    {
        let from = color_style_to_css(gradient.from_color.as_ref());
        let to = color_style_to_css(gradient.to_color.as_ref());
        return match (from, to) {
            (Some(from), Some(to)) => format!(
                "background-image: linear-gradient({}, {}, {})",
                gradient_direction(gradient.direction.as_deref()),
                from,
                to
            ),
            _ => String::new(),
        };
    }

    color_style_to_css(theme.background_color.as_ref())
        .map(|color| format!("background-color: {}", color))
        .unwrap_or_default()
}

/// Inline declarations for a button. Hover colors are exposed as custom
/// properties for the stylesheet to pick up.
pub fn button_css(style: Option<&ButtonStyle>) -> String {
    let Some(style) = style else {
        return String::new();
    };
    let mut declarations = Vec::new();

    if let Some(color) = color_style_to_css(style.text_color.as_ref()) {
        declarations.push(format!("color: {}", color));
    }
    if let Some(color) = color_style_to_css(style.background_color.as_ref()) {
        declarations.push(format!("background-color: {}", color));
    }
    if let Some(color) = color_style_to_css(style.border_color.as_ref()) {
        declarations.push("border-width: 1px".to_string());
        declarations.push("border-style: solid".to_string());
        declarations.push(format!("border-color: {}", color));
    }
    if let Some(color) = color_style_to_css(style.hover_text_color.as_ref()) {
        declarations.push(format!("--hover-color: {}", color));
    }
    if let Some(color) = color_style_to_css(style.hover_background_color.as_ref()) {
        declarations.push(format!("--hover-background-color: {}", color));
    }
    if let Some(color) = color_style_to_css(style.hover_border_color.as_ref()) {
        declarations.push(format!("--hover-border-color: {}", color));
    }

    declarations.join("; ")
}

/// Full-bleed overlay declarations, or `None` when disabled or colorless.
pub fn overlay_css(overlay: Option<&Overlay>) -> Option<String> {
    let overlay = overlay.filter(|o| o.enabled)?;
    let color = color_style_to_css(overlay.color.as_ref())?;
    Some(format!(
        "background-color: {}; position: absolute; top: 0; left: 0; right: 0; bottom: 0; z-index: 1",
        color
    ))
}
