//! Portable Text to HTML.
//!
//! Covers the block styles, marks, lists and custom block types the Studio
//! schema allows in rich-text fields. Unknown block types and marks are
//! skipped. All text is escaped and the final fragment is sanitized.

use serde::Deserialize;
use serde_json::Value;

use crate::cms::models::nullable;
use crate::rendering::html::{escape_attr, escape_html, safe_href, sanitize_html, style_attr};
use crate::rendering::markdown::render_markdown;
use crate::sections::model::RichTextSection;
use crate::sections::styles::{
    color_style_to_css, typography_classes, BlockquoteStyle, CodeStyle, HeadingStyles, LinkStyle,
    TypographyStyle,
};

const DEFAULT_BLOCKQUOTE_BORDER: &str = "#2563eb";

/// Per-section style overrides for rich text. Everything is optional and
/// absent values fall back to the stylesheet classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct RichTextStyles<'a> {
    pub heading_styles: Option<&'a HeadingStyles>,
    pub body_text_style: Option<&'a TypographyStyle>,
    pub link_style: Option<&'a LinkStyle>,
    pub blockquote_style: Option<&'a BlockquoteStyle>,
    pub code_style: Option<&'a CodeStyle>,
}

impl<'a> RichTextStyles<'a> {
    pub fn from_section(section: &'a RichTextSection) -> Self {
        Self {
            heading_styles: section.heading_styles.as_ref(),
            body_text_style: section.body_text_style.as_ref(),
            link_style: section.link_style.as_ref(),
            blockquote_style: section.blockquote_style.as_ref(),
            code_style: section.code_style.as_ref(),
        }
    }

    fn heading(&self, level: u8) -> Option<&'a TypographyStyle> {
        let headings = self.heading_styles?;
        match level {
            1 => headings.h1.as_ref(),
            2 => headings.h2.as_ref(),
            3 => headings.h3.as_ref(),
            _ => headings.h4.as_ref(),
        }
    }

    fn body_color(&self) -> Option<String> {
        color_style_to_css(self.body_text_style.and_then(|s| s.text_color.as_ref()))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextBlock {
    #[serde(default, deserialize_with = "nullable")]
    style: String,
    list_item: Option<String>,
    level: Option<usize>,
    #[serde(default, deserialize_with = "nullable")]
    children: Vec<Span>,
    #[serde(default, deserialize_with = "nullable")]
    mark_defs: Vec<MarkDef>,
}

#[derive(Debug, Default, Deserialize)]
struct Span {
    #[serde(rename = "_type", default, deserialize_with = "nullable")]
    span_type: String,
    #[serde(default, deserialize_with = "nullable")]
    text: String,
    #[serde(default, deserialize_with = "nullable")]
    marks: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct MarkDef {
    #[serde(rename = "_key", default, deserialize_with = "nullable")]
    key: String,
    #[serde(rename = "_type", default, deserialize_with = "nullable")]
    def_type: String,
    href: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Bullet,
    Number,
}

impl ListKind {
    fn parse(value: &str) -> Self {
        if value == "number" {
            ListKind::Number
        } else {
            ListKind::Bullet
        }
    }

    fn tag(&self) -> &'static str {
        match self {
            ListKind::Bullet => "ul",
            ListKind::Number => "ol",
        }
    }

    fn class(&self) -> &'static str {
        match self {
            ListKind::Bullet => "list-disc list-inside space-y-2 mb-4 text-slate-700 dark:text-slate-300",
            ListKind::Number => "list-decimal list-inside space-y-2 mb-4 text-slate-700 dark:text-slate-300",
        }
    }
}

/// Open lists as `(kind, level)`, innermost last. Each open list also has
/// an open `<li>`.
struct ListStack {
    open: Vec<(ListKind, usize)>,
}

impl ListStack {
    fn new() -> Self {
        Self { open: Vec::new() }
    }

    fn push_item(&mut self, out: &mut String, kind: ListKind, level: usize, styles: &RichTextStyles) {
        while let Some(&(top_kind, top_level)) = self.open.last() {
            if top_level > level || (top_level == level && top_kind != kind) {
                self.close_one(out);
            } else {
                break;
            }
        }

        match self.open.last() {
            Some(&(_, top_level)) if top_level == level => out.push_str("</li><li class=\"ml-4\">"),
            _ => {
                let style = styles
                    .body_color()
                    .map(|c| format!("color: {}", c))
                    .unwrap_or_default();
                out.push_str(&format!(
                    "<{} class=\"{}\"{}><li class=\"ml-4\">",
                    kind.tag(),
                    kind.class(),
                    style_attr(&style)
                ));
                self.open.push((kind, level));
            }
        }
    }

    fn close_one(&mut self, out: &mut String) {
        if let Some((kind, _)) = self.open.pop() {
            out.push_str(&format!("</li></{}>", kind.tag()));
        }
    }

    fn close_all(&mut self, out: &mut String) {
        while !self.open.is_empty() {
            self.close_one(out);
        }
    }
}

/// Render Portable Text blocks to a sanitized HTML fragment.
pub fn render_portable_text(blocks: &[Value], styles: &RichTextStyles) -> String {
    let mut out = String::new();
    let mut lists = ListStack::new();

    for value in blocks {
        let block_type = value.get("_type").and_then(Value::as_str).unwrap_or("");

        if block_type == "block" {
            let block: TextBlock = match serde_json::from_value(value.clone()) {
                Ok(block) => block,
                Err(e) => {
                    tracing::debug!("Skipping malformed text block: {e}");
                    continue;
                }
            };
            let inner = render_spans(&block, styles);

            if let Some(list_item) = block.list_item.as_deref().filter(|l| !l.is_empty()) {
                let level = block.level.unwrap_or(1).max(1);
                lists.push_item(&mut out, ListKind::parse(list_item), level, styles);
                out.push_str(&inner);
                continue;
            }

            lists.close_all(&mut out);
            out.push_str(&render_text_block(&block.style, &inner, styles));
            continue;
        }

        lists.close_all(&mut out);
        if let Some(html) = render_custom_block(block_type, value) {
            out.push_str(&html);
        }
    }
    lists.close_all(&mut out);

    sanitize_html(&out)
}

fn render_text_block(style: &str, inner: &str, styles: &RichTextStyles) -> String {
    let heading = |level: u8, base: &str| {
        let typography = styles.heading(level);
        let class = format!("{} {}", base, typography_classes(typography));
        let color = color_style_to_css(typography.and_then(|t| t.text_color.as_ref()))
            .map(|c| format!("color: {}", c))
            .unwrap_or_default();
        format!(
            "<h{lvl} class=\"{}\"{}>{}</h{lvl}>",
            class.trim_end(),
            style_attr(&color),
            inner,
            lvl = level
        )
    };

    match style {
        "h1" => heading(1, "text-4xl font-bold mt-8 mb-4 text-slate-900 dark:text-white"),
        "h2" => heading(2, "text-3xl font-bold mt-8 mb-4 text-slate-900 dark:text-white"),
        "h3" => heading(3, "text-2xl font-bold mt-6 mb-3 text-slate-900 dark:text-white"),
        "h4" => heading(4, "text-xl font-bold mt-6 mb-3 text-slate-900 dark:text-white"),
        "blockquote" => {
            let quote = styles.blockquote_style;
            let border = color_style_to_css(quote.and_then(|q| q.border_color.as_ref()))
                .unwrap_or_else(|| DEFAULT_BLOCKQUOTE_BORDER.to_string());
            let mut declarations = vec![format!("border-color: {}", border)];
            if let Some(color) = color_style_to_css(quote.and_then(|q| q.text_color.as_ref())) {
                declarations.push(format!("color: {}", color));
            }
            if let Some(bg) = color_style_to_css(quote.and_then(|q| q.background_color.as_ref())) {
                declarations.push(format!("background-color: {}", bg));
            }
            format!(
                "<blockquote class=\"border-l-4 pl-4 my-4 italic text-slate-600 dark:text-slate-400\"{}>{}</blockquote>",
                style_attr(&declarations.join("; ")),
                inner
            )
        }
        _ => {
            let class = format!(
                "leading-relaxed mb-4 text-slate-700 dark:text-slate-300 {}",
                typography_classes(styles.body_text_style)
            );
            let color = styles
                .body_color()
                .map(|c| format!("color: {}", c))
                .unwrap_or_default();
            format!("<p class=\"{}\"{}>{}</p>", class.trim_end(), style_attr(&color), inner)
        }
    }
}

fn render_spans(block: &TextBlock, styles: &RichTextStyles) -> String {
    let mut out = String::new();
    for span in block.children.iter().filter(|s| s.span_type.is_empty() || s.span_type == "span") {
        let mut text = escape_html(&span.text).replace('\n', "<br/>");
        for mark in &span.marks {
            text = apply_mark(mark, text, &block.mark_defs, styles);
        }
        out.push_str(&text);
    }
    out
}

fn apply_mark(mark: &str, inner: String, defs: &[MarkDef], styles: &RichTextStyles) -> String {
    match mark {
        "strong" => format!("<strong class=\"font-bold text-slate-900 dark:text-white\">{}</strong>", inner),
        "em" => format!("<em class=\"italic\">{}</em>", inner),
        "underline" => format!("<span class=\"underline\">{}</span>", inner),
        "strike-through" => format!("<del>{}</del>", inner),
        "code" => {
            let code = styles.code_style;
            let mut declarations = Vec::new();
            if let Some(bg) = color_style_to_css(code.and_then(|c| c.background_color.as_ref())) {
                declarations.push(format!("background-color: {}", bg));
            }
            if let Some(color) = color_style_to_css(code.and_then(|c| c.text_color.as_ref())) {
                declarations.push(format!("color: {}", color));
            }
            format!(
                "<code class=\"px-1 py-0.5 rounded text-sm bg-slate-100 dark:bg-slate-800 text-slate-800 dark:text-slate-200\"{}>{}</code>",
                style_attr(&declarations.join("; ")),
                inner
            )
        }
        key => match defs.iter().find(|d| d.key == key && d.def_type == "link") {
            Some(def) => render_link(def.href.as_deref().unwrap_or(""), inner, styles),
            None => inner,
        },
    }
}

fn render_link(href: &str, inner: String, styles: &RichTextStyles) -> String {
    let href = safe_href(href);
    let target = if href.starts_with("http") {
        " target=\"_blank\""
    } else {
        ""
    };
    let link = styles.link_style;
    let underline = if link.and_then(|l| l.underline) != Some(false) {
        " underline"
    } else {
        ""
    };
    let color = color_style_to_css(link.and_then(|l| l.color.as_ref()))
        .map(|c| format!("color: {}", c))
        .unwrap_or_default();
    format!(
        "<a href=\"{}\"{} class=\"transition-colors text-blue-600 dark:text-blue-400 hover:text-blue-800 dark:hover:text-blue-300{}\"{}>{}</a>",
        escape_attr(&href),
        target,
        underline,
        style_attr(&color),
        inner
    )
}

fn str_field<'v>(value: &'v Value, key: &str) -> Option<&'v str> {
    value.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn render_custom_block(block_type: &str, value: &Value) -> Option<String> {
    match block_type {
        "image" => {
            let url = str_field(value, "url")
                .or_else(|| value.get("asset").and_then(|a| str_field(a, "url")))?;
            let alt = str_field(value, "alt").unwrap_or("Resource image");
            let caption = str_field(value, "caption")
                .map(|c| format!("<p class=\"text-sm text-slate-500 mt-2 text-center\">{}</p>", escape_html(c)))
                .unwrap_or_default();
            Some(format!(
                "<div class=\"my-8\"><img src=\"{}\" alt=\"{}\" width=\"1200\" height=\"800\" class=\"rounded-lg w-full\">{}</div>",
                escape_attr(url),
                escape_attr(alt),
                caption
            ))
        }
        "calloutBox" => {
            let kind = match str_field(value, "type") {
                Some(kind @ ("info" | "warning" | "success" | "error" | "tip")) => kind,
                _ => "info",
            };
            let title = str_field(value, "title")
                .map(|t| format!("<p class=\"callout-title font-semibold mb-2\">{}</p>", escape_html(t)))
                .unwrap_or_default();
            let body = str_field(value, "content").map(render_markdown).unwrap_or_default();
            Some(format!(
                "<div class=\"my-6\"><div class=\"callout callout-{} rounded-lg border p-4\">{}{}</div></div>",
                kind, title, body
            ))
        }
        "codeBlock" => {
            let code = str_field(value, "code")?;
            let language = str_field(value, "language").unwrap_or("text");
            let language: String = language
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '+')
                .collect();
            Some(format!(
                "<div class=\"my-6\"><pre class=\"rounded-lg text-sm p-4 overflow-x-auto\"><code class=\"language-{}\">{}</code></pre></div>",
                language,
                escape_html(code)
            ))
        }
        "ctaButton" => {
            let href = str_field(value, "href")?;
            let text = str_field(value, "text")?;
            let variant = match str_field(value, "variant") {
                Some("secondary") => "secondary",
                Some("outline") => "outline",
                _ => "primary",
            };
            Some(format!(
                "<div class=\"my-8 flex justify-center\"><a href=\"{}\" class=\"btn btn-{}\">{}</a></div>",
                escape_attr(&safe_href(href)),
                variant,
                escape_html(text)
            ))
        }
        other => {
            tracing::debug!("Skipping unsupported rich text block type '{other}'");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::styles::{ColorStyle, ColorValue};
    use serde_json::json;

    fn block(style: &str, text: &str) -> Value {
        json!({
            "_type": "block",
            "style": style,
            "markDefs": [],
            "children": [{ "_type": "span", "text": text, "marks": [] }]
        })
    }

    fn render(blocks: Vec<Value>) -> String {
        render_portable_text(&blocks, &RichTextStyles::default())
    }

    #[test]
    fn test_paragraph_and_heading() {
        let html = render(vec![block("h2", "Capabilities"), block("normal", "Five-axis milling")]);
        assert!(html.contains("<h2 class=\"text-3xl font-bold mt-8 mb-4 text-slate-900 dark:text-white\">Capabilities</h2>"));
        assert!(html.contains(">Five-axis milling</p>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let html = render(vec![block("normal", "<script>alert(1)</script> & more")]);
        assert!(!html.contains("<script"));
        assert!(html.contains("&amp; more"));
    }

    #[test]
    fn test_marks_and_link() {
        let html = render(vec![json!({
            "_type": "block",
            "style": "normal",
            "markDefs": [{ "_key": "l1", "_type": "link", "href": "https://example.com" }],
            "children": [
                { "_type": "span", "text": "bold", "marks": ["strong"] },
                { "_type": "span", "text": " site", "marks": ["l1"] },
                { "_type": "span", "text": " odd", "marks": ["mystery"] }
            ]
        })]);
        assert!(html.contains("<strong class=\"font-bold text-slate-900 dark:text-white\">bold</strong>"));
        assert!(html.contains("href=\"https://example.com\""));
        assert!(html.contains("target=\"_blank\""));
        assert!(html.contains(" odd</p>"));
    }

    #[test]
    fn test_javascript_link_neutralized() {
        let html = render(vec![json!({
            "_type": "block",
            "markDefs": [{ "_key": "x", "_type": "link", "href": "javascript:alert(1)" }],
            "children": [{ "_type": "span", "text": "click", "marks": ["x"] }]
        })]);
        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn test_lists_are_grouped() {
        let item = |text: &str, kind: &str, level: usize| {
            json!({
                "_type": "block",
                "style": "normal",
                "listItem": kind,
                "level": level,
                "children": [{ "_type": "span", "text": text }]
            })
        };
        let html = render(vec![
            item("Aluminum", "bullet", 1),
            item("6061", "bullet", 2),
            item("Titanium", "bullet", 1),
            item("Step", "number", 1),
            block("normal", "after"),
        ]);
        assert_eq!(html.matches("<ul").count(), 2);
        assert_eq!(html.matches("<ol").count(), 1);
        assert_eq!(html.matches("<li").count(), 4);
        assert!(html.ends_with(">after</p>"));
    }

    #[test]
    fn test_custom_blocks() {
        let html = render(vec![
            json!({ "_type": "image", "asset": { "url": "https://cdn.sanity.io/a.jpg" }, "caption": "Part" }),
            json!({ "_type": "image", "alt": "no url" }),
            json!({ "_type": "codeBlock", "code": "G01 X1.0 <Y>", "language": "gcode" }),
            json!({ "_type": "ctaButton", "text": "Quote", "href": "/contact" }),
            json!({ "_type": "ctaButton", "text": "No href" }),
            json!({ "_type": "calloutBox", "type": "warning", "title": "Note", "content": "**ITAR** controlled" }),
            json!({ "_type": "toleranceTable", "title": "skip me" }),
        ]);
        assert_eq!(html.matches("<img").count(), 1);
        assert!(html.contains("alt=\"Resource image\""));
        assert!(html.contains("G01 X1.0 &lt;Y&gt;"));
        assert!(html.contains("class=\"language-gcode\""));
        assert!(html.contains(">Quote</a>"));
        assert!(!html.contains("No href"));
        assert!(html.contains("callout-warning"));
        assert!(html.contains("<strong>ITAR</strong>"));
        assert!(!html.contains("skip me"));
    }

    #[test]
    fn test_heading_style_override() {
        let headings = HeadingStyles {
            h1: Some(TypographyStyle {
                text_color: Some(ColorStyle {
                    color: Some(ColorValue {
                        hex: Some("#111827".into()),
                    }),
                    opacity: None,
                }),
                font_size: Some("5xl".into()),
                font_weight: None,
            }),
            ..Default::default()
        };
        let styles = RichTextStyles {
            heading_styles: Some(&headings),
            ..Default::default()
        };
        let html = render_portable_text(&[block("h1", "Title")], &styles);
        assert!(html.contains("text-5xl"));
        assert!(html.contains("color: #111827"));
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(render(vec![]), "");
    }
}
