use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

use crate::repository::{PracticeLogRepository, StorageError};

use super::SqliteRepository;

/// Fixed key under which the whole practice-log document is stored.
pub const PRACTICE_LOG_KEY: &str = "guitar_homework_data";

// SQLITE_FULL (13): database or disk is full.
fn map_write_error(err: sqlx::Error) -> StorageError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("13") {
            return StorageError::Capacity;
        }
    }
    StorageError::Connection(err.to_string())
}

#[async_trait]
impl PracticeLogRepository for SqliteRepository {
    async fn load_document(&self) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?1")
            .bind(PRACTICE_LOG_KEY)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let value: String = row
            .try_get("value")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        Ok(Some(value))
    }

    async fn save_document(&self, document: &str) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(PRACTICE_LOG_KEY)
        .bind(document)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }
}
