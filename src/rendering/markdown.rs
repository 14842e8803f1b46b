use pulldown_cmark::{html, Options, Parser};

use crate::rendering::html::sanitize_html;

/// Render a raw Markdown string to sanitized HTML.
///
/// Used for free-text bodies the Studio stores as plain strings, such as
/// callout boxes. Supports tables, strikethrough and smart punctuation.
pub fn render_markdown(raw: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_SMART_PUNCTUATION;

    let parser = Parser::new_ext(raw, options);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    sanitize_html(&html_output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_paragraph() {
        let result = render_markdown("Hello, world!");
        assert_eq!(result.trim(), "<p>Hello, world!</p>");
    }

    #[test]
    fn test_bold_and_italic() {
        let result = render_markdown("**Tolerance** and *finish*");
        assert!(result.contains("<strong>Tolerance</strong>"));
        assert!(result.contains("<em>finish</em>"));
    }

    #[test]
    fn test_table() {
        let input = "| Grade | Ra |\n|---|---|\n| 6061 | 0.8 |";
        let result = render_markdown(input);
        assert!(result.contains("<table>"));
        assert!(result.contains("<td>6061</td>"));
    }

    #[test]
    fn test_raw_html_is_sanitized() {
        let result = render_markdown("Note <script>alert(1)</script>");
        assert!(!result.contains("<script"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render_markdown(""), "");
    }
}
