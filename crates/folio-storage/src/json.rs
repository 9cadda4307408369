//! JSON file repository.
//!
//! Provides [`JsonFile`], which stores one value as pretty-printed JSON.
//! Saves go through a temporary file in the same directory that is renamed
//! over the target, so a crash mid-write never leaves a truncated file.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

use crate::storage::{Repository, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Json";

/// Repository backed by a single JSON file.
///
/// # Example
///
/// ```no_run
/// use folio_storage::{JsonFile, Repository, Settings};
///
/// let repo = JsonFile::new("settings.json");
/// repo.save(&Settings::default()).unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    /// Create a repository for the file at `path`.
    ///
    /// The file does not need to exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn io_error(&self, err: std::io::Error) -> StorageError {
        StorageError::io(err, Some(self.path.clone())).with_backend(BACKEND)
    }
}

impl<T> Repository<T> for JsonFile
where
    T: Serialize + DeserializeOwned,
{
    fn load(&self) -> Result<Option<T>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        serde_json::from_str(&content).map(Some).map_err(|e| {
            StorageError::new(StorageErrorKind::Corrupt)
                .with_backend(BACKEND)
                .with_path(&self.path)
                .with_source(e)
        })
    }

    fn save(&self, value: &T) -> Result<(), StorageError> {
        let dir = self.dir();
        fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;

        let tmp = NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            serde_json::to_writer_pretty(&mut writer, value).map_err(|e| {
                StorageError::new(StorageErrorKind::Serialize)
                    .with_backend(BACKEND)
                    .with_path(&self.path)
                    .with_source(e)
            })?;
            writer.write_all(b"\n").map_err(|e| self.io_error(e))?;
            writer.flush().map_err(|e| self.io_error(e))?;
        }
        tmp.as_file().sync_all().map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;

        tracing::debug!(path = %self.path.display(), "Saved JSON document");
        Ok(())
    }
}
