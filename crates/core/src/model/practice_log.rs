use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::DecodeError;
use crate::model::{DateKey, DayLog, PracticeRecord};

/// The entire persisted collection of day logs, keyed by calendar date.
///
/// This is the sole unit of persisted state. Reads are side-effect-free;
/// only the mutators materialize a day entry, so querying a never-seen
/// date leaves the keyspace untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PracticeLog {
    days: BTreeMap<DateKey, DayLog>,
}

impl PracticeLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn day(&self, date: &DateKey) -> Option<&DayLog> {
        self.days.get(date)
    }

    /// Set completion for one assignment on one date.
    ///
    /// Ensure-then-overwrite: a missing record is created as the default
    /// before `completed` is written.
    pub fn set_completed(&mut self, date: &DateKey, index: usize, completed: bool) {
        self.days.entry(date.clone()).or_default().ensure(index).completed = completed;
    }

    /// Set the memo for one assignment on one date.
    pub fn set_memo(&mut self, date: &DateKey, index: usize, memo: impl Into<String>) {
        self.days.entry(date.clone()).or_default().ensure(index).memo = memo.into();
    }

    /// Raw count of date keys, including dates with no activity.
    #[must_use]
    pub fn date_count(&self) -> usize {
        self.days.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Day logs in descending date order (most recent first).
    pub fn days_desc(&self) -> impl Iterator<Item = (&DateKey, &DayLog)> {
        self.days.iter().rev()
    }

    /// Encode as the compact persisted document.
    ///
    /// # Errors
    ///
    /// Returns the underlying encoder error; the structural encoding
    /// itself cannot produce one for a well-formed log.
    pub fn to_json_compact(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Encode as the pretty-printed snapshot document.
    ///
    /// # Errors
    ///
    /// Same as [`PracticeLog::to_json_compact`].
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Decode a persisted or imported document.
    ///
    /// Only the top level is enforced: the input must be a JSON object.
    /// Inner shapes are accepted leniently: a day value that is not an
    /// object decodes as an empty day, records decode field by field with
    /// defaults, and junk index keys are kept as-is. No schema or version
    /// field is checked; this boundary is where a future migration shim
    /// would live.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError` when the input is not JSON or the root is
    /// not an object.
    pub fn from_json_str(input: &str) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_str(input)?;
        let Value::Object(days) = value else {
            return Err(DecodeError::NotAnObject);
        };

        let mut log = Self::new();
        for (date, day_value) in days {
            let mut day = DayLog::new();
            if let Value::Object(entries) = day_value {
                for (key, record_value) in entries {
                    day.insert_raw(key, PracticeRecord::from_value_lenient(&record_value));
                }
            }
            log.days.insert(DateKey::from_raw(date), day);
        }
        Ok(log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(raw: &str) -> DateKey {
        DateKey::from_raw(raw)
    }

    #[test]
    fn reads_do_not_materialize_days() {
        let log = PracticeLog::new();
        assert!(log.day(&date("2024-03-01")).is_none());
        assert_eq!(log.date_count(), 0);
    }

    #[test]
    fn mutators_materialize_and_overwrite() {
        let mut log = PracticeLog::new();
        let day = date("2024-03-01");

        log.set_completed(&day, 2, true);
        assert!(log.day(&day).unwrap().is_completed(2));

        log.set_memo(&day, 2, "watch the thumb");
        let record = log.day(&day).unwrap().record(2).unwrap();
        assert!(record.completed);
        assert_eq!(record.memo, "watch the thumb");

        log.set_completed(&day, 2, false);
        let record = log.day(&day).unwrap().record(2).unwrap();
        assert!(!record.completed);
        assert_eq!(record.memo, "watch the thumb");
    }

    #[test]
    fn encode_matches_the_structural_shape() {
        let mut log = PracticeLog::new();
        log.set_completed(&date("2024-03-01"), 0, true);
        let json = log.to_json_compact().unwrap();
        assert_eq!(
            json,
            r#"{"2024-03-01":{"0":{"completed":true,"memo":""}}}"#
        );
    }

    #[test]
    fn decode_encode_round_trips_well_formed_logs() {
        let mut log = PracticeLog::new();
        log.set_completed(&date("2024-03-01"), 0, true);
        log.set_memo(&date("2024-03-02"), 5, "barre cleanly");
        log.set_completed(&date("2023-12-31"), 6, false);

        let decoded = PracticeLog::from_json_str(&log.to_json_pretty().unwrap()).unwrap();
        assert_eq!(decoded, log);
    }

    #[test]
    fn decode_rejects_non_object_documents() {
        assert!(matches!(
            PracticeLog::from_json_str("[1, 2, 3]"),
            Err(DecodeError::NotAnObject)
        ));
        assert!(matches!(
            PracticeLog::from_json_str("not json at all"),
            Err(DecodeError::Json(_))
        ));
    }

    #[test]
    fn decode_tolerates_junk_inner_shapes() {
        let input = r#"{
            "2024-03-01": {"0": {"completed": true, "memo": ""}, "oops": "junk"},
            "2024-03-02": 7,
            "someday": {"3": {"completed": "yes"}}
        }"#;
        let log = PracticeLog::from_json_str(input).unwrap();

        assert_eq!(log.date_count(), 3);
        assert!(log.day(&date("2024-03-01")).unwrap().is_completed(0));
        // Non-object day value decodes as an empty day that still exists.
        assert!(log.day(&date("2024-03-02")).unwrap().is_empty());
        // Mistyped record fields fall back to defaults.
        assert!(!log.day(&date("someday")).unwrap().is_completed(3));
    }

    #[test]
    fn junk_keys_survive_re_encoding() {
        let input = r#"{"2024-03-01": {"banjo": {"completed": true, "memo": "x"}}}"#;
        let log = PracticeLog::from_json_str(input).unwrap();
        let round_tripped = PracticeLog::from_json_str(&log.to_json_compact().unwrap()).unwrap();
        assert_eq!(round_tripped, log);
        assert_eq!(log.day(&date("2024-03-01")).unwrap().entry_count(), 1);
    }
}
