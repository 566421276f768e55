mod catalog;
mod date_key;
mod day_log;
mod practice_log;
mod record;

pub use catalog::{AssignmentCatalog, CatalogError, DEFAULT_ASSIGNMENTS};
pub use date_key::{DateKey, DateKeyError};
pub use day_log::DayLog;
pub use practice_log::PracticeLog;
pub use record::PracticeRecord;
