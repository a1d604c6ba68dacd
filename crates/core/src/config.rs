use std::time::Duration;

use thiserror::Error;

use crate::model::QuizPolicy;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("pass threshold must be > 0")]
    InvalidPassThreshold,

    #[error("persist debounce must be at most {max_ms} ms")]
    InvalidPersistDebounce { max_ms: u64 },
}

/// Tunables for the Learning Center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LearningConfig {
    quiz: QuizPolicy,
    persist_debounce: Duration,
}

impl LearningConfig {
    /// Quiet period before a burst of progress changes is written out.
    pub const DEFAULT_PERSIST_DEBOUNCE: Duration = Duration::from_millis(500);

    /// Upper bound on the debounce so progress is never held back for long.
    pub const MAX_PERSIST_DEBOUNCE: Duration = Duration::from_secs(60);

    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the threshold is zero or the debounce exceeds
    /// `MAX_PERSIST_DEBOUNCE`.
    pub fn new(pass_threshold: u32, persist_debounce: Duration) -> Result<Self, ConfigError> {
        let quiz = QuizPolicy::new(pass_threshold)?;
        if persist_debounce > Self::MAX_PERSIST_DEBOUNCE {
            return Err(ConfigError::InvalidPersistDebounce {
                max_ms: u64::try_from(Self::MAX_PERSIST_DEBOUNCE.as_millis()).unwrap_or(u64::MAX),
            });
        }
        Ok(Self {
            quiz,
            persist_debounce,
        })
    }

    #[must_use]
    pub fn quiz(&self) -> QuizPolicy {
        self.quiz
    }

    #[must_use]
    pub fn persist_debounce(&self) -> Duration {
        self.persist_debounce
    }
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            quiz: QuizPolicy::default(),
            persist_debounce: Self::DEFAULT_PERSIST_DEBOUNCE,
        }
    }
}
