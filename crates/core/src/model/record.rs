use serde::Serialize;
use serde_json::Value;

/// Completion state and memo for one assignment on one date.
///
/// This is the persisted shape: the JSON encoding of a record is exactly
/// `{"completed": ..., "memo": ...}`. A missing record reads as the
/// default (not completed, empty memo).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PracticeRecord {
    pub completed: bool,
    pub memo: String,
}

impl PracticeRecord {
    #[must_use]
    pub fn new(completed: bool, memo: impl Into<String>) -> Self {
        Self {
            completed,
            memo: memo.into(),
        }
    }

    #[must_use]
    pub fn has_memo(&self) -> bool {
        !self.memo.is_empty()
    }

    /// Decode a record from an arbitrary JSON value, field by field.
    ///
    /// Imported documents are not schema-checked: a missing or mistyped
    /// field falls back to its default, and a value that is not an object
    /// at all decodes as the default record.
    #[must_use]
    pub(crate) fn from_value_lenient(value: &Value) -> Self {
        let completed = value
            .get("completed")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let memo = value
            .get("memo")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();
        Self { completed, memo }
    }
}
