use std::collections::BTreeMap;

use thiserror::Error;

use crate::model::curriculum::Question;
use crate::model::ids::{ModuleId, QuestionId};

/// Reasons a quiz transition is refused. The progress state is left untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz for module {0} is already submitted")]
    Submitted(ModuleId),

    #[error("quiz for module {module} has {answered} of {total} questions answered")]
    Incomplete {
        module: ModuleId,
        answered: usize,
        total: usize,
    },
}

/// Where a module's quiz stands for the current learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    Unanswered,
    InProgress { answered: usize, total: usize },
    ReadyToSubmit,
    Submitted,
}

impl QuizState {
    /// Derives the state from the answered count and submission flag.
    #[must_use]
    pub fn derive(answered: usize, total: usize, submitted: bool) -> Self {
        if submitted {
            Self::Submitted
        } else if answered == 0 {
            Self::Unanswered
        } else if answered < total {
            Self::InProgress { answered, total }
        } else {
            Self::ReadyToSubmit
        }
    }

    #[must_use]
    pub fn accepts_selection(self) -> bool {
        !matches!(self, Self::Submitted)
    }

    #[must_use]
    pub fn accepts_submit(self) -> bool {
        matches!(self, Self::ReadyToSubmit)
    }
}

/// Number of questions whose recorded answer matches the correct option.
#[must_use]
pub fn score_answers(answers: &BTreeMap<QuestionId, usize>, questions: &[Question]) -> u32 {
    let correct = questions
        .iter()
        .filter(|question| {
            answers
                .get(question.id())
                .is_some_and(|&selected| question.is_correct(selected))
        })
        .count();
    u32::try_from(correct).unwrap_or(u32::MAX)
}

/// Pass/fail rule applied to a module's best score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizPolicy {
    pass_threshold: u32,
}

impl QuizPolicy {
    /// Four of five correct, matching the bundled curriculum.
    pub const DEFAULT_PASS_THRESHOLD: u32 = 4;

    /// Creates a policy with a custom threshold.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPassThreshold` if the threshold is zero.
    pub fn new(pass_threshold: u32) -> Result<Self, crate::config::ConfigError> {
        if pass_threshold == 0 {
            return Err(crate::config::ConfigError::InvalidPassThreshold);
        }
        Ok(Self { pass_threshold })
    }

    #[must_use]
    pub fn pass_threshold(&self) -> u32 {
        self.pass_threshold
    }

    /// A module without a recorded score has not been passed.
    #[must_use]
    pub fn is_passed(&self, best_score: Option<u32>) -> bool {
        best_score.is_some_and(|score| score >= self.pass_threshold)
    }
}

impl Default for QuizPolicy {
    fn default() -> Self {
        Self {
            pass_threshold: Self::DEFAULT_PASS_THRESHOLD,
        }
    }
}
