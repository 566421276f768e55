use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// Calendar-date key for the practice log, `YYYY-MM-DD`.
///
/// Ordering is plain string ordering, which for well-formed keys matches
/// chronological ordering. Keys read back from persisted or imported
/// documents are wrapped unchecked via [`DateKey::from_raw`]; only the
/// input layer validates.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DateKey(String);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DateKeyError {
    #[error("not a calendar date: {raw}")]
    NotADate { raw: String },

    #[error("{raw} is after today")]
    InFuture { raw: String },
}

impl DateKey {
    /// Validate user input: an ISO calendar date no later than `today`.
    ///
    /// The stored form is normalized (zero-padded month and day).
    ///
    /// # Errors
    ///
    /// Returns `DateKeyError::NotADate` for unparseable input and
    /// `DateKeyError::InFuture` for dates after `today`.
    pub fn parse(input: &str, today: NaiveDate) -> Result<Self, DateKeyError> {
        let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
            DateKeyError::NotADate {
                raw: input.to_owned(),
            }
        })?;
        if date > today {
            return Err(DateKeyError::InFuture {
                raw: input.to_owned(),
            });
        }
        Ok(Self::from_date(date))
    }

    /// Wrap a key found in a persisted or imported document, unvalidated.
    ///
    /// The store tolerates arbitrary key strings after an import; they
    /// sort and round-trip like any other key.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m-%d").to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
