#![forbid(unsafe_code)]

pub mod error;
pub mod practice_service;
pub mod snapshot;

pub use fretlog_core::Clock;

pub use error::{PracticeServiceError, SnapshotError};
pub use practice_service::PracticeService;
pub use snapshot::{ImportPreview, export_snapshot, read_snapshot};
