//! Mock repository implementation for testing.
//!
//! Provides [`MockRepository`] for unit testing without filesystem access.

use std::sync::{PoisonError, RwLock};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::storage::{Repository, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// In-memory repository for testing.
///
/// Holds at most one stored value. Use the builder methods to preload data,
/// simulate a corrupt store, or make saves fail.
///
/// # Example
///
/// ```ignore
/// use folio_storage::{MockRepository, Repository, Settings};
///
/// let repo = MockRepository::new().with_value(Settings::default());
/// repo.save(&Settings::default()).unwrap();
/// assert_eq!(repo.save_count(), 1);
/// ```
#[derive(Debug)]
pub struct MockRepository<T> {
    value: RwLock<Option<T>>,
    corrupt: bool,
    fail_saves: AtomicBool,
    saves: AtomicUsize,
}

impl<T> Default for MockRepository<T> {
    fn default() -> Self {
        Self {
            value: RwLock::new(None),
            corrupt: false,
            fail_saves: AtomicBool::new(false),
            saves: AtomicUsize::new(0),
        }
    }
}

impl<T> MockRepository<T> {
    /// Create an empty mock repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload a stored value.
    #[must_use]
    pub fn with_value(self, value: T) -> Self {
        *self.value.write().unwrap_or_else(PoisonError::into_inner) = Some(value);
        self
    }

    /// Make `load()` report corrupt data.
    #[must_use]
    pub fn corrupt(mut self) -> Self {
        self.corrupt = true;
        self
    }

    /// Make subsequent saves fail (or succeed again).
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl<T: Clone> MockRepository<T> {
    /// Currently stored value.
    pub fn stored(&self) -> Option<T> {
        self.value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<T> Repository<T> for MockRepository<T>
where
    T: Clone + Send + Sync,
{
    fn load(&self) -> Result<Option<T>, StorageError> {
        if self.corrupt {
            return Err(StorageError::new(StorageErrorKind::Corrupt).with_backend(BACKEND));
        }
        Ok(self.stored())
    }

    fn save(&self, value: &T) -> Result<(), StorageError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StorageError::new(StorageErrorKind::Other)
                .with_backend(BACKEND)
                .with_source(std::io::Error::other("simulated write failure")));
        }
        *self.value.write().unwrap_or_else(PoisonError::into_inner) = Some(value.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
