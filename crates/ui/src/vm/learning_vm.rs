use learn_core::model::{
    Catalog, LearnerProgress, LessonId, Module, ModuleId, QuestionId, QuizPolicy, QuizState,
};
use services::{NavigationController, ProgressError, ProgressStore};

use crate::vm::markdown_to_html;

/// User actions on the Learning Center.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LearningIntent {
    SelectModule(ModuleId),
    SelectLesson(LessonId),
    OpenQuiz,
    CompleteLesson(LessonId),
    SelectOption {
        module: ModuleId,
        question: QuestionId,
        option: usize,
    },
    SubmitQuiz(ModuleId),
    RetryQuiz(ModuleId),
}

/// Applies one intent to navigation or the progress store.
///
/// # Errors
///
/// Returns `ProgressError` when the store rejects the change; nothing is
/// modified in that case.
pub fn apply_intent(
    store: &ProgressStore,
    nav: &mut NavigationController,
    intent: LearningIntent,
) -> Result<(), ProgressError> {
    match intent {
        LearningIntent::SelectModule(id) => {
            nav.select_module(&id);
        }
        LearningIntent::SelectLesson(id) => {
            nav.select_lesson(&id);
        }
        LearningIntent::OpenQuiz => nav.open_quiz(),
        LearningIntent::CompleteLesson(id) => {
            store.complete_lesson(&id)?;
        }
        LearningIntent::SelectOption {
            module,
            question,
            option,
        } => store.select_quiz_option(&module, &question, option)?,
        LearningIntent::SubmitQuiz(module) => {
            store.submit_quiz(&module)?;
        }
        LearningIntent::RetryQuiz(module) => store.retry_quiz(&module)?,
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleItemVm {
    pub id: ModuleId,
    pub title: String,
    pub description: String,
    pub lesson_count: usize,
    pub passed: bool,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonItemVm {
    pub id: LessonId,
    pub title: String,
    pub completed: bool,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonPageVm {
    pub id: LessonId,
    pub module_label: String,
    pub title: String,
    pub duration: String,
    pub body_html: String,
    pub completed: bool,
}

impl LessonPageVm {
    #[must_use]
    pub fn status_line(&self) -> &'static str {
        if self.completed {
            "✓ Lesson completed"
        } else {
            "Read the material to complete this lesson"
        }
    }
}

/// How an option is highlighted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionMark {
    Plain,
    Selected,
    Correct,
    Incorrect,
}

impl OptionMark {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            OptionMark::Plain => "quiz-option",
            OptionMark::Selected => "quiz-option selected",
            OptionMark::Correct => "quiz-option correct",
            OptionMark::Incorrect => "quiz-option incorrect",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub label: String,
    pub mark: OptionMark,
}

/// Feedback shown under an answered question once the quiz is submitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub correct: bool,
    pub explanation: String,
}

impl FeedbackVm {
    #[must_use]
    pub fn heading(&self) -> &'static str {
        if self.correct { "✓ Correct!" } else { "✗ Incorrect." }
    }

    #[must_use]
    pub fn class(&self) -> &'static str {
        if self.correct {
            "quiz-feedback correct"
        } else {
            "quiz-feedback incorrect"
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub id: QuestionId,
    pub number: usize,
    pub prompt: String,
    pub options: Vec<OptionVm>,
    pub feedback: Option<FeedbackVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizPageVm {
    pub module_id: ModuleId,
    pub title: String,
    pub questions: Vec<QuestionVm>,
    pub state: QuizState,
    pub passed: bool,
    /// Best score so far; shown after submission.
    pub best_score: u32,
    pub total: usize,
}

impl QuizPageVm {
    #[must_use]
    pub fn locked(&self) -> bool {
        self.state == QuizState::Submitted
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.state.accepts_submit()
    }

    #[must_use]
    pub fn score_label(&self) -> String {
        format!("{}/{}", self.best_score, self.total)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageVm {
    Lesson(LessonPageVm),
    Quiz(QuizPageVm),
    Empty,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LearningVm {
    pub percent: u8,
    pub modules: Vec<ModuleItemVm>,
    pub lessons: Vec<LessonItemVm>,
    pub quiz_selected: bool,
    pub page: PageVm,
}

impl LearningVm {
    #[must_use]
    pub fn percent_label(&self) -> String {
        format!("{}% Complete", self.percent)
    }
}

#[must_use]
pub fn map_learning_vm(
    catalog: &Catalog,
    progress: &LearnerProgress,
    nav: &NavigationController,
    policy: QuizPolicy,
) -> LearningVm {
    let active = nav.active_module();
    let completed: usize = catalog
        .modules()
        .iter()
        .map(|module| progress.module_completed_lessons(module))
        .sum();

    let modules = catalog
        .modules()
        .iter()
        .map(|module| ModuleItemVm {
            id: module.id().clone(),
            title: module.title().to_owned(),
            description: module.description().to_owned(),
            lesson_count: module.lessons().len(),
            passed: policy.is_passed(progress.module_score(module.id())),
            active: module.id() == active.id(),
        })
        .collect();

    let selected_lesson = nav.active_lesson().map(|lesson| lesson.id().clone());
    let lessons = active
        .lessons()
        .iter()
        .map(|lesson| LessonItemVm {
            id: lesson.id().clone(),
            title: lesson.title().to_owned(),
            completed: progress.is_lesson_complete(lesson.id()),
            selected: selected_lesson.as_ref() == Some(lesson.id()),
        })
        .collect();

    let page = if nav.is_quiz_mode() {
        PageVm::Quiz(map_quiz_page(active, progress, policy))
    } else if let Some(lesson) = nav.active_lesson() {
        PageVm::Lesson(LessonPageVm {
            id: lesson.id().clone(),
            module_label: active.short_title().to_owned(),
            title: lesson.title().to_owned(),
            duration: lesson.duration().to_owned(),
            body_html: markdown_to_html(lesson.content().as_str()),
            completed: progress.is_lesson_complete(lesson.id()),
        })
    } else {
        PageVm::Empty
    };

    LearningVm {
        percent: LearnerProgress::progress_percent(completed, catalog.total_lessons()),
        modules,
        lessons,
        quiz_selected: nav.is_quiz_mode(),
        page,
    }
}

fn map_quiz_page(module: &Module, progress: &LearnerProgress, policy: QuizPolicy) -> QuizPageVm {
    let state = progress.quiz_state(module.id(), module.quiz());
    let submitted = state == QuizState::Submitted;

    let questions = module
        .quiz()
        .iter()
        .enumerate()
        .map(|(idx, question)| {
            let selected = progress.answer(question.id());
            let options = question
                .options()
                .iter()
                .enumerate()
                .map(|(option_idx, label)| {
                    let is_selected = selected == Some(option_idx);
                    let mark = if submitted && question.is_correct(option_idx) {
                        OptionMark::Correct
                    } else if submitted && is_selected {
                        OptionMark::Incorrect
                    } else if is_selected && !submitted {
                        OptionMark::Selected
                    } else {
                        OptionMark::Plain
                    };
                    OptionVm {
                        index: option_idx,
                        label: label.clone(),
                        mark,
                    }
                })
                .collect();
            let feedback = selected.filter(|_| submitted).map(|option| FeedbackVm {
                correct: question.is_correct(option),
                explanation: question.explanation().to_owned(),
            });
            QuestionVm {
                id: question.id().clone(),
                number: idx + 1,
                prompt: question.prompt().to_owned(),
                options,
                feedback,
            }
        })
        .collect();

    let best_score = progress.module_score(module.id());
    QuizPageVm {
        module_id: module.id().clone(),
        title: module.title().to_owned(),
        questions,
        state,
        passed: policy.is_passed(best_score),
        best_score: best_score.unwrap_or(0),
        total: module.quiz().len(),
    }
}
