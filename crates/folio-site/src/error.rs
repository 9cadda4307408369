//! Error types for workspace operations.

use folio_storage::{PageId, StorageError};

use crate::tree::TreeError;

/// Error returned by [`Workspace`](crate::Workspace) and
/// [`SettingsStore`](crate::SettingsStore) operations.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// No page with this id exists.
    #[error("Page not found: {0}")]
    NotFound(PageId),
    /// The page tree could not be built.
    #[error(transparent)]
    Tree(#[from] TreeError),
    /// The persistence backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
