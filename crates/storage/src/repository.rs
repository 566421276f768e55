use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    /// The backend rejected a write for lack of space. Surfaced to the
    /// user once as a recoverable notice; never retried.
    #[error("storage is out of space")]
    Capacity,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Key-value contract for the persisted practice-log document.
///
/// The whole log lives as one JSON document under one fixed key. The
/// repository deals in the raw document, not decoded types: the
/// decode-and-fall-back-to-empty policy belongs to the caller, the same
/// split a browser's `getItem`/`setItem` imposes.
#[async_trait]
pub trait PracticeLogRepository: Send + Sync {
    /// Fetch the persisted document, or `None` when nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn load_document(&self) -> Result<Option<String>, StorageError>;

    /// Overwrite the persisted document in full.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Capacity` when the write is rejected for
    /// space, or other storage errors.
    async fn save_document(&self, document: &str) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    document: Arc<Mutex<Option<String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PracticeLogRepository for InMemoryRepository {
    async fn load_document(&self) -> Result<Option<String>, StorageError> {
        let guard = self
            .document
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save_document(&self, document: &str) -> Result<(), StorageError> {
        let mut guard = self
            .document
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(document.to_owned());
        Ok(())
    }
}

/// Aggregates the repository behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub practice_log: Arc<dyn PracticeLogRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            practice_log: Arc::new(InMemoryRepository::new()),
        }
    }
}
