use std::collections::{BTreeMap, BTreeSet};

use crate::model::curriculum::{Module, Question};
use crate::model::ids::{LessonId, ModuleId, QuestionId};
use crate::model::quiz::{QuizError, QuizState, score_answers};

/// Everything a learner has done in the Learning Center.
///
/// Completions only grow, best scores only rise, and a submitted quiz is frozen
/// until it is retried. Callers mutate it through the methods below; there is
/// no way to remove a completion or lower a score.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LearnerProgress {
    completed_lessons: BTreeSet<LessonId>,
    module_scores: BTreeMap<ModuleId, u32>,
    current_quiz_answers: BTreeMap<QuestionId, usize>,
    quiz_submitted: BTreeMap<ModuleId, bool>,
}

impl LearnerProgress {
    /// Empty progress: nothing completed, scored, answered or submitted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds progress from persisted collections.
    #[must_use]
    pub fn from_parts(
        completed_lessons: impl IntoIterator<Item = LessonId>,
        module_scores: BTreeMap<ModuleId, u32>,
        current_quiz_answers: BTreeMap<QuestionId, usize>,
        quiz_submitted: BTreeMap<ModuleId, bool>,
    ) -> Self {
        Self {
            completed_lessons: completed_lessons.into_iter().collect(),
            module_scores,
            current_quiz_answers,
            quiz_submitted,
        }
    }

    //
    // ─── MUTATIONS ─────────────────────────────────────────────────────────────
    //

    /// Marks a lesson complete. Returns `false` if it already was.
    pub fn complete_lesson(&mut self, lesson_id: LessonId) -> bool {
        self.completed_lessons.insert(lesson_id)
    }

    /// Records the learner's choice for a question of `module_id`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Submitted` while the module's quiz is submitted.
    pub fn select_quiz_option(
        &mut self,
        module_id: &ModuleId,
        question_id: QuestionId,
        option_index: usize,
    ) -> Result<(), QuizError> {
        if self.is_quiz_submitted(module_id) {
            return Err(QuizError::Submitted(module_id.clone()));
        }
        self.current_quiz_answers.insert(question_id, option_index);
        Ok(())
    }

    /// Scores the current answers, keeps the best score and locks the quiz.
    ///
    /// Returns the score of this attempt, which may be lower than the best.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Submitted` if the quiz is already locked and
    /// `QuizError::Incomplete` unless every question has an answer.
    pub fn submit_quiz(
        &mut self,
        module_id: &ModuleId,
        questions: &[Question],
    ) -> Result<u32, QuizError> {
        match self.quiz_state(module_id, questions) {
            QuizState::ReadyToSubmit => {}
            QuizState::Submitted => return Err(QuizError::Submitted(module_id.clone())),
            QuizState::Unanswered | QuizState::InProgress { .. } => {
                return Err(QuizError::Incomplete {
                    module: module_id.clone(),
                    answered: self.answered_count(questions),
                    total: questions.len(),
                });
            }
        }

        let score = score_answers(&self.current_quiz_answers, questions);
        let best = self.module_scores.entry(module_id.clone()).or_insert(0);
        *best = (*best).max(score);
        self.quiz_submitted.insert(module_id.clone(), true);
        Ok(score)
    }

    /// Unlocks the quiz and clears the answers of `questions` only.
    ///
    /// Answers to other modules' questions and the best score are kept.
    pub fn retry_quiz(&mut self, module_id: &ModuleId, questions: &[Question]) {
        self.quiz_submitted.insert(module_id.clone(), false);
        for question in questions {
            self.current_quiz_answers.remove(question.id());
        }
    }

    //
    // ─── QUERIES ───────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn completed_lessons(&self) -> &BTreeSet<LessonId> {
        &self.completed_lessons
    }

    #[must_use]
    pub fn module_scores(&self) -> &BTreeMap<ModuleId, u32> {
        &self.module_scores
    }

    #[must_use]
    pub fn current_quiz_answers(&self) -> &BTreeMap<QuestionId, usize> {
        &self.current_quiz_answers
    }

    #[must_use]
    pub fn quiz_submitted(&self) -> &BTreeMap<ModuleId, bool> {
        &self.quiz_submitted
    }

    #[must_use]
    pub fn is_lesson_complete(&self, lesson_id: &LessonId) -> bool {
        self.completed_lessons.contains(lesson_id)
    }

    /// Best score ever recorded for the module, if the quiz was ever submitted.
    #[must_use]
    pub fn module_score(&self, module_id: &ModuleId) -> Option<u32> {
        self.module_scores.get(module_id).copied()
    }

    #[must_use]
    pub fn answer(&self, question_id: &QuestionId) -> Option<usize> {
        self.current_quiz_answers.get(question_id).copied()
    }

    #[must_use]
    pub fn is_quiz_submitted(&self, module_id: &ModuleId) -> bool {
        self.quiz_submitted.get(module_id).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn answered_count(&self, questions: &[Question]) -> usize {
        questions
            .iter()
            .filter(|question| self.current_quiz_answers.contains_key(question.id()))
            .count()
    }

    #[must_use]
    pub fn quiz_state(&self, module_id: &ModuleId, questions: &[Question]) -> QuizState {
        QuizState::derive(
            self.answered_count(questions),
            questions.len(),
            self.is_quiz_submitted(module_id),
        )
    }

    /// Completed lessons belonging to `module`.
    #[must_use]
    pub fn module_completed_lessons(&self, module: &Module) -> usize {
        module
            .lessons()
            .iter()
            .filter(|lesson| self.is_lesson_complete(lesson.id()))
            .count()
    }

    /// Whole-course completion, rounded half-up to a percentage.
    ///
    /// `completed` is the number of completed lessons that exist in the catalog.
    #[must_use]
    pub fn progress_percent(completed: usize, total_lessons: usize) -> u8 {
        if total_lessons == 0 {
            return 0;
        }
        let completed = completed.min(total_lessons);
        let percent = (completed * 200 + total_lessons) / (total_lessons * 2);
        u8::try_from(percent).unwrap_or(100)
    }
}
