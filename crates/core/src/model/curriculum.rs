use std::collections::HashSet;

use thiserror::Error;

use crate::model::ids::{LessonId, ModuleId, QuestionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog must contain at least one module")]
    Empty,

    #[error("duplicate module id: {0}")]
    DuplicateModule(ModuleId),

    #[error("module {0} has no lessons")]
    NoLessons(ModuleId),

    #[error("module {0} has no quiz questions")]
    NoQuestions(ModuleId),

    #[error("duplicate lesson id: {0}")]
    DuplicateLesson(LessonId),

    #[error("duplicate question id: {0}")]
    DuplicateQuestion(QuestionId),

    #[error("question {0} must offer at least two options")]
    TooFewOptions(QuestionId),

    #[error("question {id} marks option {correct_index} correct but has {options} options")]
    CorrectIndexOutOfRange {
        id: QuestionId,
        correct_index: usize,
        options: usize,
    },
}

//
// ─── LESSON ────────────────────────────────────────────────────────────────────
//

/// Lesson body as markdown. Only the presentation layer interprets it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonContent(String);

impl LessonContent {
    #[must_use]
    pub fn markdown(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    id: LessonId,
    title: String,
    duration: String,
    content: LessonContent,
}

impl Lesson {
    #[must_use]
    pub fn new(
        id: impl Into<LessonId>,
        title: impl Into<String>,
        duration: impl Into<String>,
        content: LessonContent,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            duration: duration.into(),
            content,
        }
    }

    #[must_use]
    pub fn id(&self) -> &LessonId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Estimated reading time, e.g. "15 min".
    #[must_use]
    pub fn duration(&self) -> &str {
        &self.duration
    }

    #[must_use]
    pub fn content(&self) -> &LessonContent {
        &self.content
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: Vec<String>,
    correct_index: usize,
    explanation: String,
}

impl Question {
    #[must_use]
    pub fn new(
        id: impl Into<QuestionId>,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            options,
            correct_index,
            explanation: explanation.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn is_correct(&self, option_index: usize) -> bool {
        option_index == self.correct_index
    }
}

//
// ─── MODULE ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    id: ModuleId,
    title: String,
    description: String,
    lessons: Vec<Lesson>,
    quiz: Vec<Question>,
}

impl Module {
    #[must_use]
    pub fn new(
        id: impl Into<ModuleId>,
        title: impl Into<String>,
        description: impl Into<String>,
        lessons: Vec<Lesson>,
        quiz: Vec<Question>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            lessons,
            quiz,
        }
    }

    #[must_use]
    pub fn id(&self) -> &ModuleId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Title prefix before the first colon ("Module 1" for "Module 1: The Economic Engine").
    #[must_use]
    pub fn short_title(&self) -> &str {
        self.title
            .split_once(':')
            .map_or(self.title.as_str(), |(head, _)| head.trim())
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    #[must_use]
    pub fn quiz(&self) -> &[Question] {
        &self.quiz
    }

    #[must_use]
    pub fn first_lesson(&self) -> Option<&Lesson> {
        self.lessons.first()
    }

    #[must_use]
    pub fn lesson(&self, id: &LessonId) -> Option<&Lesson> {
        self.lessons.iter().find(|lesson| lesson.id() == id)
    }

    #[must_use]
    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.quiz.iter().find(|question| question.id() == id)
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Immutable, ordered curriculum supplied whole at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    modules: Vec<Module>,
}

impl Catalog {
    /// Validates and wraps an ordered list of modules.
    ///
    /// Lesson and question ids must be unique across the whole catalog because
    /// learner progress tracks them in flat collections.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` when the catalog is empty, ids collide, a module
    /// lacks lessons or questions, or a question's correct option does not exist.
    pub fn new(modules: Vec<Module>) -> Result<Self, CatalogError> {
        if modules.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut module_ids = HashSet::new();
        let mut lesson_ids = HashSet::new();
        let mut question_ids = HashSet::new();

        for module in &modules {
            if !module_ids.insert(module.id()) {
                return Err(CatalogError::DuplicateModule(module.id().clone()));
            }
            if module.lessons().is_empty() {
                return Err(CatalogError::NoLessons(module.id().clone()));
            }
            if module.quiz().is_empty() {
                return Err(CatalogError::NoQuestions(module.id().clone()));
            }
            for lesson in module.lessons() {
                if !lesson_ids.insert(lesson.id()) {
                    return Err(CatalogError::DuplicateLesson(lesson.id().clone()));
                }
            }
            for question in module.quiz() {
                if !question_ids.insert(question.id()) {
                    return Err(CatalogError::DuplicateQuestion(question.id().clone()));
                }
                if question.options().len() < 2 {
                    return Err(CatalogError::TooFewOptions(question.id().clone()));
                }
                if question.correct_index() >= question.options().len() {
                    return Err(CatalogError::CorrectIndexOutOfRange {
                        id: question.id().clone(),
                        correct_index: question.correct_index(),
                        options: question.options().len(),
                    });
                }
            }
        }

        Ok(Self { modules })
    }

    #[must_use]
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// The first module. A validated catalog always has one.
    #[must_use]
    pub fn first_module(&self) -> &Module {
        &self.modules[0]
    }

    #[must_use]
    pub fn module(&self, id: &ModuleId) -> Option<&Module> {
        self.modules.iter().find(|module| module.id() == id)
    }

    #[must_use]
    pub fn module_for_lesson(&self, id: &LessonId) -> Option<&Module> {
        self.modules
            .iter()
            .find(|module| module.lesson(id).is_some())
    }

    #[must_use]
    pub fn module_for_question(&self, id: &QuestionId) -> Option<&Module> {
        self.modules
            .iter()
            .find(|module| module.question(id).is_some())
    }

    #[must_use]
    pub fn lesson(&self, id: &LessonId) -> Option<&Lesson> {
        self.modules.iter().find_map(|module| module.lesson(id))
    }

    #[must_use]
    pub fn contains_lesson(&self, id: &LessonId) -> bool {
        self.lesson(id).is_some()
    }

    #[must_use]
    pub fn total_lessons(&self) -> usize {
        self.modules.iter().map(|module| module.lessons().len()).sum()
    }
}
