mod learning_vm;
mod markdown_vm;
mod shell_vm;

pub use learning_vm::{
    FeedbackVm, LearningIntent, LearningVm, LessonItemVm, LessonPageVm, ModuleItemVm, OptionMark,
    OptionVm, PageVm, QuestionVm, QuizPageVm, apply_intent, map_learning_vm,
};
pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use shell_vm::{
    MarketClockVm, MarketStatus, Theme, TopbarVm, map_market_clock, map_topbar, market_status,
};
