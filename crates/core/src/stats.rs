use crate::model::{AssignmentCatalog, DateKey, PracticeLog};

/// Completion tally for a single date, useful for the day view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayStats {
    pub completed: usize,
    pub total: usize,
    pub percent: u32,
}

/// Compute the completion tally for `date`.
///
/// `total` is always the catalog length; missing records count as not
/// completed and only catalog-range indices are considered.
#[must_use]
pub fn day_stats(log: &PracticeLog, catalog: &AssignmentCatalog, date: &DateKey) -> DayStats {
    let total = catalog.len();
    let completed = log.day(date).map_or(0, |day| day.completed_count(total));
    DayStats {
        completed,
        total,
        percent: percent_of(completed, total),
    }
}

// The catalog constructor guarantees total > 0.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn percent_of(completed: usize, total: usize) -> u32 {
    (completed as f64 / total as f64 * 100.0).round() as u32
}
