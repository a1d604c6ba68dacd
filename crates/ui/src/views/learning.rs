use dioxus::prelude::*;
use services::NavigationController;

use crate::context::AppContext;
use crate::vm::{
    LearningIntent, LessonItemVm, LessonPageVm, ModuleItemVm, PageVm, QuizPageVm, apply_intent,
    map_learning_vm,
};

#[component]
pub fn LearningView() -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();
    let store = ctx.progress();
    let nav_catalog = ctx.catalog();
    let mut nav = use_signal(move || NavigationController::new(nav_catalog));
    let snapshot_store = ctx.progress();
    let mut snapshot = use_signal(move || snapshot_store.snapshot());

    let dispatch = use_callback(move |intent: LearningIntent| {
        tracing::debug!(?intent, "learning intent");
        if let Err(err) = apply_intent(&store, &mut nav.write(), intent) {
            tracing::debug!(error = %err, "learning intent ignored");
            return;
        }
        snapshot.set(store.snapshot());
    });

    let vm = map_learning_vm(&catalog, &snapshot.read(), &nav.read(), ctx.policy());
    let percent_label = vm.percent_label();
    let percent_style = format!("width: {}%", vm.percent);

    rsx! {
        div { class: "page learning-page",
            header { class: "view-header learning-header",
                div {
                    h2 { class: "view-title", "Learning Center" }
                    p { class: "view-subtitle", "Master the theory of markets before you trade." }
                }
                div { class: "progress-summary",
                    p { class: "progress-label", "{percent_label}" }
                    div { class: "progress-track",
                        div { class: "progress-fill", style: "{percent_style}" }
                    }
                }
            }
            div { class: "learning-grid",
                aside { class: "module-list",
                    {vm.modules.into_iter().map(|module| {
                        let active = module.active;
                        let key = module.id.to_string();
                        rsx! {
                            ModuleEntry { key: "{key}", module, dispatch }
                            if active {
                                LessonList {
                                    lessons: vm.lessons.clone(),
                                    quiz_selected: vm.quiz_selected,
                                    dispatch,
                                }
                            }
                        }
                    })}
                }
                section { class: "learning-content",
                    match vm.page {
                        PageVm::Lesson(page) => rsx! { LessonPage { page, dispatch } },
                        PageVm::Quiz(page) => rsx! { QuizPage { page, dispatch } },
                        PageVm::Empty => rsx! {},
                    }
                }
            }
        }
    }
}

#[component]
fn ModuleEntry(module: ModuleItemVm, dispatch: Callback<LearningIntent>) -> Element {
    let class = if module.active {
        "module-entry active"
    } else {
        "module-entry"
    };
    let id = module.id.clone();
    rsx! {
        button {
            class: "{class}",
            r#type: "button",
            onclick: move |_| dispatch.call(LearningIntent::SelectModule(id.clone())),
            div { class: "module-entry-text",
                h3 { "{module.title}" }
                p { class: "module-entry-description", "{module.description}" }
                p { class: "module-entry-meta", "{module.lesson_count} lessons" }
            }
            if module.passed {
                span { class: "badge badge-passed", "Passed" }
            }
        }
    }
}

#[component]
fn LessonList(
    lessons: Vec<LessonItemVm>,
    quiz_selected: bool,
    dispatch: Callback<LearningIntent>,
) -> Element {
    let quiz_class = if quiz_selected {
        "lesson-entry quiz-entry selected"
    } else {
        "lesson-entry quiz-entry"
    };
    rsx! {
        div { class: "lesson-list",
            {lessons.into_iter().map(|lesson| {
                let class = if lesson.selected { "lesson-entry selected" } else { "lesson-entry" };
                let mark = if lesson.completed { "✓" } else { "○" };
                let id = lesson.id.clone();
                rsx! {
                    button {
                        key: "{lesson.id}",
                        class: "{class}",
                        r#type: "button",
                        onclick: move |_| dispatch.call(LearningIntent::SelectLesson(id.clone())),
                        span { class: "lesson-mark", "{mark}" }
                        span { class: "lesson-title", "{lesson.title}" }
                    }
                }
            })}
            button {
                class: "{quiz_class}",
                r#type: "button",
                onclick: move |_| dispatch.call(LearningIntent::OpenQuiz),
                "Module Quiz"
            }
        }
    }
}

#[component]
fn LessonPage(page: LessonPageVm, dispatch: Callback<LearningIntent>) -> Element {
    let id = page.id.clone();
    let button_label = if page.completed { "Completed" } else { "Mark Complete" };
    rsx! {
        article { class: "lesson-page",
            div { class: "lesson-meta",
                span { class: "module-tag", "{page.module_label}" }
                span { "{page.duration} read" }
            }
            h1 { class: "lesson-heading", "{page.title}" }
            div { class: "lesson-body", dangerous_inner_html: "{page.body_html}" }
            footer { class: "lesson-footer",
                p { class: "lesson-status", "{page.status_line()}" }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: page.completed,
                    onclick: move |_| dispatch.call(LearningIntent::CompleteLesson(id.clone())),
                    "{button_label}"
                }
            }
        }
    }
}

#[component]
fn QuizPage(page: QuizPageVm, dispatch: Callback<LearningIntent>) -> Element {
    let locked = page.locked();
    let can_submit = page.can_submit();
    let score_label = page.score_label();
    let score_class = if page.passed { "score pass" } else { "score fail" };
    let question_count = page.total;
    let submit_module = page.module_id.clone();
    let retry_module = page.module_id.clone();
    let module_id = page.module_id.clone();

    rsx! {
        div { class: "quiz-page",
            div { class: "quiz-header",
                div {
                    h2 { "{page.title}" }
                    p { class: "view-subtitle", "Test your knowledge ({question_count} questions)" }
                }
                if page.passed {
                    span { class: "badge badge-passed", "Passed" }
                }
            }
            {page.questions.into_iter().map(|question| {
                let card_class = match &question.feedback {
                    Some(feedback) if feedback.correct => "quiz-question correct",
                    Some(_) => "quiz-question incorrect",
                    None => "quiz-question",
                };
                let module_id = module_id.clone();
                rsx! {
                    div { key: "{question.id}", class: "{card_class}",
                        h4 {
                            span { class: "question-number", "{question.number}." }
                            " {question.prompt}"
                        }
                        div { class: "quiz-options",
                            {question.options.into_iter().map(|option| {
                                let module = module_id.clone();
                                let question_id = question.id.clone();
                                let index = option.index;
                                rsx! {
                                    button {
                                        key: "{index}",
                                        class: "{option.mark.class()}",
                                        r#type: "button",
                                        disabled: locked,
                                        onclick: move |_| dispatch.call(LearningIntent::SelectOption {
                                            module: module.clone(),
                                            question: question_id.clone(),
                                            option: index,
                                        }),
                                        "{option.label}"
                                    }
                                }
                            })}
                        }
                        if let Some(feedback) = question.feedback {
                            div { class: "{feedback.class()}",
                                strong { "{feedback.heading()}" }
                                p { "{feedback.explanation}" }
                            }
                        }
                    }
                }
            })}
            div { class: "quiz-actions",
                if locked {
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| dispatch.call(LearningIntent::RetryQuiz(retry_module.clone())),
                        "Retry"
                    }
                    p { class: "quiz-score",
                        "Score: "
                        span { class: "{score_class}", "{score_label}" }
                    }
                } else {
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: !can_submit,
                        onclick: move |_| dispatch.call(LearningIntent::SubmitQuiz(submit_module.clone())),
                        "Submit Quiz"
                    }
                }
            }
        }
    }
}
