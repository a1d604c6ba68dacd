use async_trait::async_trait;
use learn_core::model::LearnerProgress;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::record::{PROGRESS_STORAGE_KEY, ProgressRecord};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Durable home of the learner's progress record.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Load the stored progress, or `None` if nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for a malformed record, or other
    /// storage errors if the backend cannot be read.
    async fn load_progress(&self) -> Result<Option<LearnerProgress>, StorageError>;

    /// Replace the stored progress with `progress`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be written.
    async fn save_progress(&self, progress: &LearnerProgress) -> Result<(), StorageError>;

    /// Remove the stored record entirely.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn clear_progress(&self) -> Result<(), StorageError>;
}

/// Simple in-memory key-value repository for testing and prototyping.
///
/// Stores the encoded JSON payload, so it goes through the same codec as the
/// durable backends.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    entries: Arc<Mutex<HashMap<String, String>>>,
    saves: Arc<AtomicUsize>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            saves: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Store a raw payload under the progress key, bypassing encoding.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn put_raw(&self, payload: impl Into<String>) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(PROGRESS_STORAGE_KEY.to_owned(), payload.into());
        Ok(())
    }

    /// The raw payload under the progress key, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn raw(&self) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(PROGRESS_STORAGE_KEY).cloned())
    }

    /// Number of successful `save_progress` calls so far.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn load_progress(&self) -> Result<Option<LearnerProgress>, StorageError> {
        match self.raw()? {
            Some(payload) => Ok(Some(ProgressRecord::decode(&payload)?.into_progress())),
            None => Ok(None),
        }
    }

    async fn save_progress(&self, progress: &LearnerProgress) -> Result<(), StorageError> {
        let payload = ProgressRecord::from_progress(progress).encode()?;
        self.put_raw(payload)?;
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn clear_progress(&self) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(PROGRESS_STORAGE_KEY);
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let progress: Arc<dyn ProgressRepository> = Arc::new(InMemoryRepository::new());
        Self { progress }
    }
}
