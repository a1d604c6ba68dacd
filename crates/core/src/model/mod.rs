mod curriculum;
mod ids;
mod progress;
mod quiz;

pub use ids::{LessonId, ModuleId, QuestionId};

pub use curriculum::{Catalog, CatalogError, Lesson, LessonContent, Module, Question};
pub use progress::LearnerProgress;
pub use quiz::{QuizError, QuizPolicy, QuizState, score_answers};
