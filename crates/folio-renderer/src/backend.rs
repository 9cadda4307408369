//! Render backend trait for format-specific output.
//!
//! The renderer only decides *what* each line is. Backends decide how each
//! [`Block`] looks in the target format, so a new output format does not need
//! to touch the line interpreter.

use crate::block::Block;

/// Backend trait for format-specific block rendering.
///
/// Each method appends one fragment to `out`. Fragments are joined with
/// [`SEPARATOR`](RenderBackend::SEPARATOR) by [`write_blocks`].
pub trait RenderBackend {
    /// Text placed between consecutive fragments.
    const SEPARATOR: &'static str;

    /// Render a paragraph. `text` is already escaped.
    fn paragraph(text: &str, out: &mut String);

    /// Render the opening of a code block.
    fn code_block_start(out: &mut String);

    /// Render one line of a code block. `text` is already escaped.
    fn code_line(text: &str, out: &mut String);

    /// Render the closing of a code block.
    fn code_block_end(out: &mut String);

    /// Render a checklist item. `text` is already escaped.
    fn checklist_item(text: &str, checked: bool, out: &mut String);
}

/// Render a block sequence with the given backend.
///
/// A code block left open at the end of the sequence is closed with
/// [`RenderBackend::code_block_end`] so the output stays well formed.
pub fn write_blocks<B: RenderBackend>(blocks: &[Block]) -> String {
    let mut out = String::with_capacity(blocks.len() * 32);
    let mut open_code = false;

    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            out.push_str(B::SEPARATOR);
        }
        match block {
            Block::Paragraph { text } => B::paragraph(text, &mut out),
            Block::CodeBlockStart => {
                open_code = true;
                B::code_block_start(&mut out);
            }
            Block::CodeLine { text } => B::code_line(text, &mut out),
            Block::CodeBlockEnd => {
                open_code = false;
                B::code_block_end(&mut out);
            }
            Block::ChecklistItem { text, checked } => B::checklist_item(text, *checked, &mut out),
        }
    }

    if open_code {
        out.push_str(B::SEPARATOR);
        B::code_block_end(&mut out);
    }

    out
}
