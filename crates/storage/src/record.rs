use std::collections::BTreeMap;

use learn_core::model::{LearnerProgress, LessonId, ModuleId, QuestionId};
use serde::{Deserialize, Serialize};

use crate::repository::StorageError;

/// Fixed key the progress record is stored under.
pub const PROGRESS_STORAGE_KEY: &str = "fin_course_progress";

/// Persisted shape of `LearnerProgress`.
///
/// Field names follow the JSON layout written by earlier clients, so records
/// stay readable across versions. Missing collections decode as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    #[serde(default)]
    pub completed_lessons: Vec<LessonId>,
    #[serde(default)]
    pub module_scores: BTreeMap<ModuleId, u32>,
    #[serde(default)]
    pub current_quiz_answers: BTreeMap<QuestionId, usize>,
    #[serde(default)]
    pub quiz_submitted: BTreeMap<ModuleId, bool>,
}

impl ProgressRecord {
    #[must_use]
    pub fn from_progress(progress: &LearnerProgress) -> Self {
        Self {
            completed_lessons: progress.completed_lessons().iter().cloned().collect(),
            module_scores: progress.module_scores().clone(),
            current_quiz_answers: progress.current_quiz_answers().clone(),
            quiz_submitted: progress.quiz_submitted().clone(),
        }
    }

    #[must_use]
    pub fn into_progress(self) -> LearnerProgress {
        LearnerProgress::from_parts(
            self.completed_lessons,
            self.module_scores,
            self.current_quiz_answers,
            self.quiz_submitted,
        )
    }

    /// Serialize to the JSON payload stored under `PROGRESS_STORAGE_KEY`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if encoding fails.
    pub fn encode(&self) -> Result<String, StorageError> {
        serde_json::to_string(self).map_err(|err| StorageError::Serialization(err.to_string()))
    }

    /// Parse a stored JSON payload.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for malformed payloads.
    pub fn decode(payload: &str) -> Result<Self, StorageError> {
        serde_json::from_str(payload).map_err(|err| StorageError::Serialization(err.to_string()))
    }
}
