//! HTML backend for page content.
//!
//! Produces the fragments embedded in page views: `<p>` paragraphs,
//! `<pre><code>` code blocks and disabled checkbox labels.

use crate::backend::{RenderBackend, write_blocks};
use crate::block::Block;
use crate::renderer::render;

/// HTML render backend.
///
/// Fragments are joined with newlines. Code lines end with their own newline
/// so `<pre>` keeps one source line per display line.
pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    const SEPARATOR: &'static str = "\n";

    fn paragraph(text: &str, out: &mut String) {
        out.push_str("<p>");
        out.push_str(text);
        out.push_str("</p>");
    }

    fn code_block_start(out: &mut String) {
        out.push_str("<pre><code>");
    }

    fn code_line(text: &str, out: &mut String) {
        out.push_str(text);
        out.push('\n');
    }

    fn code_block_end(out: &mut String) {
        out.push_str("</code></pre>");
    }

    fn checklist_item(text: &str, checked: bool, out: &mut String) {
        if checked {
            out.push_str(r#"<label><input type="checkbox" checked disabled> "#);
        } else {
            out.push_str(r#"<label><input type="checkbox" disabled> "#);
        }
        out.push_str(text);
        out.push_str("</label><br>");
    }
}

/// Render blocks to HTML.
pub fn to_html(blocks: &[Block]) -> String {
    write_blocks::<HtmlBackend>(blocks)
}

/// Render raw page content straight to HTML.
///
/// # Examples
///
/// ```
/// use folio_renderer::render_html;
///
/// assert_eq!(
///     render_html(Some("- [ ] buy milk")),
///     r#"<label><input type="checkbox" disabled> buy milk</label><br>"#
/// );
/// ```
pub fn render_html(raw: Option<&str>) -> String {
    to_html(&render(raw))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_paragraph() {
        assert_eq!(render_html(Some("hello")), "<p>hello</p>");
    }

    #[test]
    fn test_empty_line_paragraph() {
        assert_eq!(render_html(Some("a\n\nb")), "<p>a</p>\n<p></p>\n<p>b</p>");
    }

    #[test]
    fn test_unchecked_item() {
        assert_eq!(
            render_html(Some("- [ ] buy milk")),
            r#"<label><input type="checkbox" disabled> buy milk</label><br>"#
        );
    }

    #[test]
    fn test_checked_item() {
        assert_eq!(
            render_html(Some("- [X] done")),
            r#"<label><input type="checkbox" checked disabled> done</label><br>"#
        );
    }

    #[test]
    fn test_code_block() {
        assert_eq!(
            render_html(Some("```\ncode here\n```")),
            "<pre><code>\ncode here\n\n</code></pre>"
        );
    }

    #[test]
    fn test_unterminated_code_block_is_closed() {
        assert_eq!(
            render_html(Some("```\nx")),
            "<pre><code>\nx\n\n</code></pre>"
        );
    }

    #[test]
    fn test_escapes_text() {
        assert_eq!(
            render_html(Some("<img src=x onerror='y'>")),
            "<p>&lt;img src=x onerror=&#39;y&#39;&gt;</p>"
        );
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(render_html(Some("")), "");
        assert_eq!(render_html(None), "");
    }
}
