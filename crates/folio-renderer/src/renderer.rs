//! Line-by-line markup interpreter.

use crate::block::Block;
use crate::escape::escape_html;

/// Marker that opens and closes a code fence.
pub const FENCE_MARKER: &str = "```";

const UNCHECKED_PREFIX: &str = "- [ ] ";
const CHECKED_PREFIXES: [&str; 2] = ["- [x] ", "- [X] "];

/// Renderer state between lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FenceState {
    /// Outside any code fence; lines are paragraphs or checklist items.
    #[default]
    Normal,
    /// Inside an open code fence; lines are copied verbatim.
    InCodeFence,
}

/// Render raw page content into structural blocks.
///
/// Processes the input in a single pass over `\n`-separated lines. A trailing
/// `\r` on each line is dropped so CRLF text from browser forms renders the
/// same as LF text. `None` and empty input both produce no blocks.
///
/// A fence left open at end of input is not closed: the returned sequence
/// simply ends after the last [`Block::CodeLine`].
///
/// # Examples
///
/// ```
/// use folio_renderer::{Block, render};
///
/// let blocks = render(Some("```\ncode here\n```"));
/// assert_eq!(
///     blocks,
///     vec![
///         Block::CodeBlockStart,
///         Block::CodeLine { text: "code here".to_owned() },
///         Block::CodeBlockEnd,
///     ]
/// );
/// assert!(render(None).is_empty());
/// ```
pub fn render(raw: Option<&str>) -> Vec<Block> {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return Vec::new();
    };

    let mut state = FenceState::Normal;
    let mut blocks = Vec::new();

    for line in raw.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);

        if line.trim().starts_with(FENCE_MARKER) {
            state = match state {
                FenceState::Normal => {
                    blocks.push(Block::CodeBlockStart);
                    FenceState::InCodeFence
                }
                FenceState::InCodeFence => {
                    blocks.push(Block::CodeBlockEnd);
                    FenceState::Normal
                }
            };
            continue;
        }

        let block = match state {
            FenceState::InCodeFence => Block::CodeLine {
                text: escape_html(line),
            },
            FenceState::Normal => render_text_line(line),
        };
        blocks.push(block);
    }

    blocks
}

/// Classify a line outside of code fences.
fn render_text_line(line: &str) -> Block {
    if let Some(label) = line.strip_prefix(UNCHECKED_PREFIX) {
        return Block::ChecklistItem {
            text: escape_html(label),
            checked: false,
        };
    }

    if let Some(label) = CHECKED_PREFIXES
        .iter()
        .find_map(|prefix| line.strip_prefix(prefix))
    {
        return Block::ChecklistItem {
            text: escape_html(label),
            checked: true,
        };
    }

    Block::Paragraph {
        text: escape_html(line),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn paragraph(text: &str) -> Block {
        Block::Paragraph {
            text: text.to_owned(),
        }
    }

    fn code(text: &str) -> Block {
        Block::CodeLine {
            text: text.to_owned(),
        }
    }

    fn item(text: &str, checked: bool) -> Block {
        Block::ChecklistItem {
            text: text.to_owned(),
            checked,
        }
    }

    #[test]
    fn test_render_empty_input() {
        assert!(render(Some("")).is_empty());
    }

    #[test]
    fn test_render_absent_input() {
        assert!(render(None).is_empty());
    }

    #[test]
    fn test_render_unchecked_item() {
        assert_eq!(render(Some("- [ ] buy milk")), vec![item("buy milk", false)]);
    }

    #[test]
    fn test_render_checked_item_lowercase() {
        assert_eq!(render(Some("- [x] done")), vec![item("done", true)]);
    }

    #[test]
    fn test_render_checked_item_uppercase() {
        assert_eq!(render(Some("- [X] done")), vec![item("done", true)]);
    }

    #[test]
    fn test_render_checklist_requires_trailing_space() {
        assert_eq!(render(Some("- [ ]")), vec![paragraph("- [ ]")]);
        assert_eq!(render(Some("- [x]done")), vec![paragraph("- [x]done")]);
    }

    #[test]
    fn test_render_checklist_with_empty_label() {
        assert_eq!(render(Some("- [ ] ")), vec![item("", false)]);
    }

    #[test]
    fn test_render_indented_checklist_is_paragraph() {
        assert_eq!(render(Some("  - [ ] nested")), vec![paragraph("  - [ ] nested")]);
    }

    #[test]
    fn test_render_code_block() {
        assert_eq!(
            render(Some("```\ncode here\n```")),
            vec![Block::CodeBlockStart, code("code here"), Block::CodeBlockEnd]
        );
    }

    #[test]
    fn test_render_fence_with_language_and_indent() {
        assert_eq!(
            render(Some("  ```rust\nfn main() {}\n```")),
            vec![Block::CodeBlockStart, code("fn main() {}"), Block::CodeBlockEnd]
        );
    }

    #[test]
    fn test_render_code_preserves_whitespace_and_escapes() {
        assert_eq!(
            render(Some("```\n    if a < b && c {\n```")),
            vec![
                Block::CodeBlockStart,
                code("    if a &lt; b &amp;&amp; c {"),
                Block::CodeBlockEnd
            ]
        );
    }

    #[test]
    fn test_render_checklist_inside_fence_is_code() {
        assert_eq!(
            render(Some("```\n- [ ] not a task\n```")),
            vec![Block::CodeBlockStart, code("- [ ] not a task"), Block::CodeBlockEnd]
        );
    }

    #[test]
    fn test_render_unterminated_fence_stays_open() {
        assert_eq!(
            render(Some("intro\n```\nline one\nline two")),
            vec![
                paragraph("intro"),
                Block::CodeBlockStart,
                code("line one"),
                code("line two"),
            ]
        );
    }

    #[test]
    fn test_render_blank_lines_become_empty_paragraphs() {
        assert_eq!(
            render(Some("a\n\nb\n")),
            vec![paragraph("a"), paragraph(""), paragraph("b"), paragraph("")]
        );
    }

    #[test]
    fn test_render_crlf_input() {
        assert_eq!(
            render(Some("- [ ] one\r\n```\r\nx\r\n```\r\ntext")),
            vec![
                item("one", false),
                Block::CodeBlockStart,
                code("x"),
                Block::CodeBlockEnd,
                paragraph("text"),
            ]
        );
    }

    #[test]
    fn test_render_escapes_paragraph_and_label() {
        assert_eq!(
            render(Some("<script>\n- [ ] a & b")),
            vec![paragraph("&lt;script&gt;"), item("a &amp; b", false)]
        );
    }

    #[test]
    fn test_render_mixed_document() {
        let raw = "Shopping\n- [ ] milk\n- [x] eggs\n```\nlet x = 1;\n```\nThanks";
        assert_eq!(
            render(Some(raw)),
            vec![
                paragraph("Shopping"),
                item("milk", false),
                item("eggs", true),
                Block::CodeBlockStart,
                code("let x = 1;"),
                Block::CodeBlockEnd,
                paragraph("Thanks"),
            ]
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let raw = "a\n```\nb\n- [x] c";
        assert_eq!(render(Some(raw)), render(Some(raw)));
    }

    #[test]
    fn test_render_multiple_fences() {
        assert_eq!(
            render(Some("```\na\n```\n```\nb\n```")),
            vec![
                Block::CodeBlockStart,
                code("a"),
                Block::CodeBlockEnd,
                Block::CodeBlockStart,
                code("b"),
                Block::CodeBlockEnd,
            ]
        );
    }
}
