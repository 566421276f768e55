use std::sync::Arc;

use fretlog_core::history::{self, HistoryLimit, HistorySummary};
use fretlog_core::model::{AssignmentCatalog, DateKey, DayLog, PracticeLog};
use fretlog_core::stats::{DayStats, day_stats};
use storage::repository::PracticeLogRepository;

use crate::error::PracticeServiceError;

/// Owns the in-memory practice log and keeps it in sync with storage.
///
/// The log is read once at startup; every mutation rewrites the whole
/// document (no dirty-tracking, no batching). Reads never create rows;
/// the mutators materialize a day on demand.
pub struct PracticeService {
    catalog: AssignmentCatalog,
    repo: Arc<dyn PracticeLogRepository>,
    log: PracticeLog,
}

impl PracticeService {
    /// Load the persisted log, or start empty.
    ///
    /// A missing document and a document that fails to decode both yield
    /// an empty log; the decode failure is logged, never propagated.
    ///
    /// # Errors
    ///
    /// Returns `PracticeServiceError::Storage` only if the backend cannot
    /// be read at all.
    pub async fn load(
        catalog: AssignmentCatalog,
        repo: Arc<dyn PracticeLogRepository>,
    ) -> Result<Self, PracticeServiceError> {
        let log = match repo.load_document().await? {
            Some(document) => match PracticeLog::from_json_str(&document) {
                Ok(log) => log,
                Err(err) => {
                    tracing::warn!(error = %err, "stored practice log does not decode, starting empty");
                    PracticeLog::new()
                }
            },
            None => PracticeLog::new(),
        };
        Ok(Self { catalog, repo, log })
    }

    #[must_use]
    pub fn catalog(&self) -> &AssignmentCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn log(&self) -> &PracticeLog {
        &self.log
    }

    /// Records for a date; never-seen dates read as an empty day.
    #[must_use]
    pub fn day(&self, date: &DateKey) -> DayLog {
        self.log.day(date).cloned().unwrap_or_default()
    }

    /// Set completion for one assignment on one date, then persist.
    ///
    /// # Errors
    ///
    /// Returns `UnknownAssignment` for an index outside the catalog, or
    /// `Storage`/`Encode` if persisting fails. The in-memory mutation
    /// stands even when the persist fails; the failure is reported once
    /// and never retried.
    pub async fn set_completion(
        &mut self,
        date: &DateKey,
        index: usize,
        completed: bool,
    ) -> Result<(), PracticeServiceError> {
        self.check_index(index)?;
        self.log.set_completed(date, index, completed);
        self.persist().await
    }

    /// Set the memo for one assignment on one date, then persist.
    ///
    /// # Errors
    ///
    /// Same conditions as [`PracticeService::set_completion`].
    pub async fn set_memo(
        &mut self,
        date: &DateKey,
        index: usize,
        memo: impl Into<String>,
    ) -> Result<(), PracticeServiceError> {
        self.check_index(index)?;
        self.log.set_memo(date, index, memo);
        self.persist().await
    }

    /// Replace the whole log and persist it. Import path; no merge, and
    /// no structural validation beyond what decoding already did.
    ///
    /// # Errors
    ///
    /// Returns `Storage`/`Encode` if persisting fails.
    pub async fn replace_all(&mut self, new_log: PracticeLog) -> Result<(), PracticeServiceError> {
        self.log = new_log;
        self.persist().await
    }

    #[must_use]
    pub fn stats(&self, date: &DateKey) -> DayStats {
        day_stats(&self.log, &self.catalog, date)
    }

    #[must_use]
    pub fn history(&self, limit: HistoryLimit) -> HistorySummary {
        history::summarize(&self.log, &self.catalog, limit)
    }

    fn check_index(&self, index: usize) -> Result<(), PracticeServiceError> {
        if index < self.catalog.len() {
            Ok(())
        } else {
            Err(PracticeServiceError::UnknownAssignment { index })
        }
    }

    async fn persist(&self) -> Result<(), PracticeServiceError> {
        let document = self.log.to_json_compact()?;
        self.repo.save_document(&document).await?;
        tracing::debug!(bytes = document.len(), "practice log persisted");
        Ok(())
    }
}
