//! Page records and persistence backends for Folio.
//!
//! This crate owns the on-disk shape of a workspace and the [`Repository`]
//! trait that hides where it lives. This enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Write-through persistence** owned by the caller, not by global state
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Page`], [`PageId`], [`PageMap`]: the page collection, in insertion order
//! - [`Settings`] and [`Theme`]: user-facing preferences
//! - [`Repository`] trait with `load()` and `save()`
//! - [`JsonFile`] implementation storing pretty-printed JSON with atomic replace
//! - [`MockRepository`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), folio_storage::StorageError> {
//! use folio_storage::{JsonFile, PageMap, Repository};
//!
//! let repo = JsonFile::new("pages.json");
//! let pages: Option<PageMap> = repo.load()?;
//! # Ok(())
//! # }
//! ```

mod json;
#[cfg(feature = "mock")]
mod mock;
mod page;
mod settings;
mod storage;

pub use json::JsonFile;
#[cfg(feature = "mock")]
pub use mock::MockRepository;
pub use page::{DatabaseRow, Page, PageId, PageMap};
pub use settings::{Settings, Theme};
pub use storage::{Repository, StorageError, StorageErrorKind};
