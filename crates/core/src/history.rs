use crate::model::{AssignmentCatalog, DateKey, PracticeLog};

/// Default number of history rows surfaced before the "more" affordance.
pub const DEFAULT_RECENT: usize = 10;

/// How much of the history to surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryLimit {
    All,
    Recent(usize),
}

impl Default for HistoryLimit {
    fn default() -> Self {
        Self::Recent(DEFAULT_RECENT)
    }
}

/// One row of the practice history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub date: DateKey,
    pub completed_count: usize,
    pub total_count: usize,
}

/// Reverse-chronological digest of recorded practice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistorySummary {
    entries: Vec<HistoryEntry>,
    total_dates: usize,
}

impl HistorySummary {
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Raw count of date keys in the log, before filtering.
    ///
    /// This is what the "show more" affordance reports, deliberately
    /// including inactive dates.
    #[must_use]
    pub fn total_dates(&self) -> usize {
        self.total_dates
    }

    /// No date key was ever recorded.
    #[must_use]
    pub fn never_recorded(&self) -> bool {
        self.total_dates == 0
    }

    /// Dates exist, but every one was filtered out as inactive.
    ///
    /// Kept distinct from [`HistorySummary::never_recorded`] so callers
    /// can render different empty states.
    #[must_use]
    pub fn all_filtered(&self) -> bool {
        self.total_dates > 0 && self.entries.is_empty()
    }
}

/// Summarize recorded practice, most recent date first.
///
/// Dates with no activity (zero in-range completions and no non-empty
/// memo anywhere in the day) are dropped before the limit applies, so
/// `HistoryLimit::Recent(n)` yields the `n` most recent *active* dates.
#[must_use]
pub fn summarize(
    log: &PracticeLog,
    catalog: &AssignmentCatalog,
    limit: HistoryLimit,
) -> HistorySummary {
    let total = catalog.len();
    let active = log
        .days_desc()
        .filter(|(_, day)| day.has_activity(total))
        .map(|(date, day)| HistoryEntry {
            date: date.clone(),
            completed_count: day.completed_count(total),
            total_count: total,
        });

    let entries = match limit {
        HistoryLimit::All => active.collect(),
        HistoryLimit::Recent(n) => active.take(n).collect(),
    };

    HistorySummary {
        entries,
        total_dates: log.date_count(),
    }
}
