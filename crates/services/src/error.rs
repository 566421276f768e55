//! Shared error types for the services crate.

use thiserror::Error;

use fretlog_core::DecodeError;
use storage::repository::StorageError;

/// Errors emitted by `PracticeService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PracticeServiceError {
    #[error("no assignment at position {index}")]
    UnknownAssignment { index: usize },

    #[error("could not encode practice log: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by the snapshot exporter/importer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SnapshotError {
    /// The selected file does not decode as a practice log. The live
    /// store is untouched when this is returned.
    #[error("snapshot does not decode: {0}")]
    Malformed(#[source] DecodeError),

    #[error("could not encode practice log: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
