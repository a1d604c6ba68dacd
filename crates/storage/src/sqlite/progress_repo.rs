use async_trait::async_trait;
use chrono::Utc;
use learn_core::model::LearnerProgress;
use sqlx::Row;

use crate::record::{PROGRESS_STORAGE_KEY, ProgressRecord};
use crate::repository::{ProgressRepository, StorageError};

use super::SqliteRepository;

#[async_trait]
impl ProgressRepository for SqliteRepository {
    async fn load_progress(&self) -> Result<Option<LearnerProgress>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT payload
            FROM learner_progress
            WHERE storage_key = ?1
            ",
        )
        .bind(PROGRESS_STORAGE_KEY)
        .fetch_optional(self.pool())
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let payload: String = row
            .try_get("payload")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        let record = ProgressRecord::decode(&payload)?;
        Ok(Some(record.into_progress()))
    }

    async fn save_progress(&self, progress: &LearnerProgress) -> Result<(), StorageError> {
        let payload = ProgressRecord::from_progress(progress).encode()?;

        sqlx::query(
            r"
            INSERT INTO learner_progress (storage_key, payload, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(storage_key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at
            ",
        )
        .bind(PROGRESS_STORAGE_KEY)
        .bind(payload)
        .bind(Utc::now())
        .execute(self.pool())
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        tracing::debug!(key = PROGRESS_STORAGE_KEY, "stored learner progress");
        Ok(())
    }

    async fn clear_progress(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM learner_progress WHERE storage_key = ?1")
            .bind(PROGRESS_STORAGE_KEY)
            .execute(self.pool())
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }
}
