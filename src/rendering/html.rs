//! Small helpers for building HTML fragments by hand.

/// Escape HTML special characters in text content.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Escape a value placed inside a double-quoted attribute.
pub fn escape_attr(input: &str) -> String {
    escape_html(input)
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
}

/// ` style="…"` for non-empty declarations, nothing otherwise.
pub fn style_attr(declarations: &str) -> String {
    if declarations.trim().is_empty() {
        String::new()
    } else {
        format!(" style=\"{}\"", escape_attr(declarations))
    }
}

/// Neutralize script-capable URL schemes coming from content.
pub fn safe_href(href: &str) -> String {
    let trimmed = href.trim();
    let lower = trimmed.to_ascii_lowercase();
    if trimmed.is_empty()
        || lower.starts_with("javascript:")
        || lower.starts_with("data:")
        || lower.starts_with("vbscript:")
    {
        "#".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Sanitize generated rich-text HTML, keeping presentation attributes.
pub fn sanitize_html(html: &str) -> String {
    ammonia::Builder::default()
        .add_generic_attributes(&["class", "style"])
        .add_tag_attributes("a", &["target"])
        .clean(html)
        .to_string()
}
