//! Line-oriented markup renderer for Folio page content.
//!
//! Page content is a restricted dialect, interpreted one line at a time:
//!
//! - ```` ``` ```` fence lines open and close verbatim code blocks
//! - `- [ ] task` and `- [x] task` lines become checklist items
//! - every other line (including blank ones) becomes a paragraph
//!
//! # Architecture
//!
//! Rendering happens in two steps:
//! - [`render`] turns raw text into a flat sequence of structural [`Block`]s.
//!   All literal text inside the blocks is already escaped with [`escape_html`].
//! - A [`RenderBackend`] turns blocks into output markup. [`HtmlBackend`]
//!   produces the HTML fragments shown on page views.
//!
//! # Example
//!
//! ```
//! use folio_renderer::{Block, HtmlBackend, render, render_html};
//!
//! let blocks = render(Some("- [x] ship it"));
//! assert_eq!(
//!     blocks,
//!     vec![Block::ChecklistItem { text: "ship it".to_owned(), checked: true }]
//! );
//!
//! let html = render_html(Some("hello"));
//! assert_eq!(html, "<p>hello</p>");
//! ```

mod backend;
mod block;
mod escape;
mod html;
mod renderer;

pub use backend::{RenderBackend, write_blocks};
pub use block::Block;
pub use escape::escape_html;
pub use html::{HtmlBackend, render_html, to_html};
pub use renderer::{FENCE_MARKER, FenceState, render};
