use thiserror::Error;

/// Failure decoding a persisted or imported practice-log document.
///
/// Callers recover locally: the loader falls back to an empty log, the
/// importer aborts and leaves the live store untouched.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("not a JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document root is not an object")]
    NotAnObject,
}
