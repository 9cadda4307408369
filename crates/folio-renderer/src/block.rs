//! Structural blocks produced by the renderer.

/// One structural unit of rendered page content.
///
/// Text carried by a block is already HTML-escaped, so backends can emit it
/// directly. Code lines are bracketed by [`Block::CodeBlockStart`] and
/// [`Block::CodeBlockEnd`], except when the source ends inside an open fence:
/// then the closing marker is missing and backends must cope with it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Block {
    /// A plain line of text. May be empty.
    Paragraph {
        /// Escaped line content.
        text: String,
    },
    /// Opening fence of a verbatim code block.
    CodeBlockStart,
    /// A single line inside a code block.
    CodeLine {
        /// Escaped line content, whitespace preserved.
        text: String,
    },
    /// Closing fence of a verbatim code block.
    CodeBlockEnd,
    /// A checkbox line.
    ChecklistItem {
        /// Escaped label text.
        text: String,
        /// Whether the box is ticked.
        checked: bool,
    },
}
