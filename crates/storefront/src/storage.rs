//! Persistence port for the cart.
//!
//! Durable local storage is modelled as an explicit injected capability
//! rather than an ambient global: the cart store receives a
//! [`CartStorage`] and never touches the filesystem itself. The payload is
//! an opaque string (the cart store encodes JSON into it); there is no
//! versioning or migration - a payload that no longer parses is discarded.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

/// Errors from the storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("cart storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Capability interface for the persisted cart payload.
///
/// Writes are last-writer-wins; all writers live in the same
/// single-threaded context, so no coordination is needed beyond that.
pub trait CartStorage: Send + Sync {
    /// Read the stored payload, `None` if nothing was ever stored.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read.
    fn get(&self) -> Result<Option<String>, StorageError>;

    /// Replace the stored payload.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be written.
    fn set(&self, payload: &str) -> Result<(), StorageError>;

    /// Remove the stored payload entirely.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be written.
    fn clear(&self) -> Result<(), StorageError>;
}

/// File-backed storage used by the CLI.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Create a storage backed by the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CartStorage for FileStorage {
    fn get(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, payload: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, payload)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory storage for tests.
///
/// Clones share the same underlying cell, which lets a test hand "the same
/// storage" to a re-initialised store to simulate a reload.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    /// Create an empty in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the storage with a payload (e.g. a corrupted one).
    #[must_use]
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Some(payload.into()))),
        }
    }

    fn cell(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CartStorage for MemoryStorage {
    fn get(&self) -> Result<Option<String>, StorageError> {
        Ok(self.cell().clone())
    }

    fn set(&self, payload: &str) -> Result<(), StorageError> {
        *self.cell() = Some(payload.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.cell() = None;
        Ok(())
    }
}
