use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use fretlog_core::Clock;
use fretlog_core::model::PracticeLog;

use crate::error::SnapshotError;

/// Decoded snapshot waiting for the caller's overwrite confirmation.
///
/// Reading a snapshot never touches the live store; committing it is the
/// caller's second step (`PracticeService::replace_all`), taken only
/// after the user confirms the destructive overwrite.
#[derive(Debug, Clone)]
pub struct ImportPreview {
    log: PracticeLog,
    date_count: usize,
}

impl ImportPreview {
    /// Number of recorded dates in the snapshot, for the confirmation
    /// prompt.
    #[must_use]
    pub fn date_count(&self) -> usize {
        self.date_count
    }

    #[must_use]
    pub fn into_log(self) -> PracticeLog {
        self.log
    }
}

/// Filename for a snapshot exported on `date`.
#[must_use]
pub fn snapshot_filename(date: NaiveDate) -> String {
    format!("guitar_homework_{}.json", date.format("%Y-%m-%d"))
}

/// Write the full log as a pretty-printed snapshot into `dir`.
///
/// No filtering and no partial export; the document mirrors the
/// persisted structure exactly. Returns the written path.
///
/// # Errors
///
/// Returns `SnapshotError::Encode` or `SnapshotError::Io`.
pub async fn export_snapshot(
    log: &PracticeLog,
    dir: &Path,
    clock: &Clock,
) -> Result<PathBuf, SnapshotError> {
    let path = dir.join(snapshot_filename(clock.today()));
    let document = log.to_json_pretty()?;
    tokio::fs::write(&path, document).await?;
    tracing::debug!(path = %path.display(), "snapshot exported");
    Ok(path)
}

/// Read and decode a snapshot file without touching the live store.
///
/// Each attempt opens the file fresh, so re-importing the same file is
/// always possible.
///
/// # Errors
///
/// Returns `SnapshotError::Io` if the file cannot be read and
/// `SnapshotError::Malformed` if it does not decode.
pub async fn read_snapshot(path: &Path) -> Result<ImportPreview, SnapshotError> {
    let contents = tokio::fs::read_to_string(path).await?;
    let log = PracticeLog::from_json_str(&contents).map_err(SnapshotError::Malformed)?;
    Ok(ImportPreview {
        date_count: log.date_count(),
        log,
    })
}
