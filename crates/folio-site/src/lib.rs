//! Page store and workspace services for Folio.
//!
//! This crate provides:
//! - [`Workspace`]: the page store, with write-through persistence
//! - [`build_forest`]: reconstruction of the page tree from flat child references
//! - [`SettingsStore`]: persisted user preferences
//! - [`Assistant`]: placeholder chat assistant
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use folio_site::Workspace;
//! use folio_storage::JsonFile;
//!
//! let repository = Arc::new(JsonFile::new("pages.json"));
//! let workspace = Workspace::open(repository)?;
//!
//! let id = workspace.create("Meeting notes", None);
//! let forest = workspace.forest()?;
//! # Ok(())
//! # }
//! ```

mod assistant;
mod database;
mod error;
mod settings_store;
mod tree;
mod workspace;

pub use assistant::{Assistant, ChatHistory, ChatMessage, Role};
pub use database::{build_row, columns};
pub use error::SiteError;
pub use settings_store::SettingsStore;
pub use tree::{DEFAULT_MAX_DEPTH, ForestBuilder, TreeError, TreeNode, build_forest, root_ids};
pub use workspace::{HOME_TITLE, SearchHit, UNTITLED, WELCOME_CONTENT, Workspace, normalize_title};
