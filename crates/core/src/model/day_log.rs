use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::PracticeRecord;

/// Per-assignment records for a single calendar date.
///
/// The map is sparse: only touched assignments have an entry. Keys are
/// kept as the raw strings of the JSON document, so entries with
/// non-numeric or out-of-range keys found in imported data survive
/// round-trips; the typed accessors simply never surface them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DayLog {
    entries: BTreeMap<String, PracticeRecord>,
}

impl DayLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn record(&self, index: usize) -> Option<&PracticeRecord> {
        self.entries.get(index.to_string().as_str())
    }

    #[must_use]
    pub fn is_completed(&self, index: usize) -> bool {
        self.record(index).is_some_and(|record| record.completed)
    }

    #[must_use]
    pub fn memo(&self, index: usize) -> &str {
        self.record(index).map_or("", |record| record.memo.as_str())
    }

    /// Record for an index, created as the default if absent.
    pub fn ensure(&mut self, index: usize) -> &mut PracticeRecord {
        self.entries.entry(index.to_string()).or_default()
    }

    /// Completed count over the catalog range; junk keys never count.
    #[must_use]
    pub fn completed_count(&self, catalog_len: usize) -> usize {
        (0..catalog_len).filter(|&index| self.is_completed(index)).count()
    }

    /// Whether this day shows up in history.
    ///
    /// True when any in-range record is completed, or when any physical
    /// entry (junk keys included) carries a non-empty memo.
    #[must_use]
    pub fn has_activity(&self, catalog_len: usize) -> bool {
        (0..catalog_len).any(|index| self.is_completed(index))
            || self.entries.values().any(PracticeRecord::has_memo)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn insert_raw(&mut self, key: String, record: PracticeRecord) {
        self.entries.insert(key, record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_record_reads_as_default() {
        let day = DayLog::new();
        assert!(day.record(0).is_none());
        assert!(!day.is_completed(0));
        assert_eq!(day.memo(0), "");
    }

    #[test]
    fn ensure_materializes_a_default_record() {
        let mut day = DayLog::new();
        day.ensure(3).completed = true;
        assert!(day.is_completed(3));
        assert_eq!(day.memo(3), "");
        assert_eq!(day.entry_count(), 1);
    }

    #[test]
    fn completed_count_ignores_out_of_range_entries() {
        let mut day = DayLog::new();
        day.ensure(0).completed = true;
        day.insert_raw("42".into(), PracticeRecord::new(true, ""));
        day.insert_raw("banjo".into(), PracticeRecord::new(true, ""));
        assert_eq!(day.completed_count(7), 1);
    }

    #[test]
    fn activity_counts_memos_on_any_physical_entry() {
        let mut day = DayLog::new();
        day.insert_raw("42".into(), PracticeRecord::new(false, "stray memo"));
        assert!(day.has_activity(7));
    }

    #[test]
    fn day_without_completions_or_memos_is_inactive() {
        let mut day = DayLog::new();
        day.ensure(1);
        assert!(!day.has_activity(7));
        assert!(!day.is_empty());
    }
}
