//! Shared error types for the services crate.

use thiserror::Error;

use learn_core::ConfigError;
use learn_core::model::{CatalogError, LessonId, ModuleId, QuestionId, QuizError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Reasons `ProgressStore` refuses an operation. Progress is left unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("unknown module: {0}")]
    UnknownModule(ModuleId),
    #[error("unknown lesson: {0}")]
    UnknownLesson(LessonId),
    #[error("question {question} does not belong to module {module}")]
    UnknownQuestion {
        module: ModuleId,
        question: QuestionId,
    },
    #[error("option {option} is out of range for question {question} ({options} options)")]
    OptionOutOfRange {
        question: QuestionId,
        option: usize,
        options: usize,
    },
    #[error(transparent)]
    Quiz(#[from] QuizError),
}

/// Errors emitted by the auth session boundary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("auth provider unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
