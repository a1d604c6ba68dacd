#![forbid(unsafe_code)]

pub mod record;
pub mod repository;
pub mod sqlite;

pub use record::{PROGRESS_STORAGE_KEY, ProgressRecord};
pub use repository::{InMemoryRepository, ProgressRepository, Storage, StorageError};
