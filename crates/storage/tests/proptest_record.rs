//! Any progress state the learner can reach survives the persisted record.

use learn_core::model::{LearnerProgress, LessonId, ModuleId, Question, QuestionId};
use proptest::prelude::*;
use storage::ProgressRecord;
use storage::repository::{InMemoryRepository, ProgressRepository};

const MODULES: [&str; 2] = ["m1", "m2"];
const QUESTIONS_PER_MODULE: usize = 3;

fn quiz(module: usize) -> Vec<Question> {
    (0..QUESTIONS_PER_MODULE)
        .map(|idx| {
            Question::new(
                format!("q{}-{}", module + 1, idx + 1),
                "?",
                vec!["a".into(), "b".into(), "c".into(), "d".into()],
                idx % 4,
                "",
            )
        })
        .collect()
}

#[derive(Debug, Clone)]
enum Action {
    Complete { module: usize, lesson: usize },
    Select { module: usize, question: usize, option: usize },
    Submit { module: usize },
    Retry { module: usize },
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        2 => (0usize..2, 0usize..3).prop_map(|(module, lesson)| Action::Complete { module, lesson }),
        4 => (0usize..2, 0usize..QUESTIONS_PER_MODULE, 0usize..4)
            .prop_map(|(module, question, option)| Action::Select { module, question, option }),
        1 => (0usize..2).prop_map(|module| Action::Submit { module }),
        1 => (0usize..2).prop_map(|module| Action::Retry { module }),
    ]
}

/// Replays `actions` the way the store would, skipping the ones it rejects.
fn reachable(actions: &[Action]) -> LearnerProgress {
    let quizzes = [quiz(0), quiz(1)];
    let mut progress = LearnerProgress::new();
    for action in actions {
        match *action {
            Action::Complete { module, lesson } => {
                progress.complete_lesson(LessonId::new(format!("l{}-{}", module + 1, lesson + 1)));
            }
            Action::Select { module, question, option } => {
                let _ = progress.select_quiz_option(
                    &ModuleId::from(MODULES[module]),
                    QuestionId::new(format!("q{}-{}", module + 1, question + 1)),
                    option,
                );
            }
            Action::Submit { module } => {
                let _ = progress.submit_quiz(&ModuleId::from(MODULES[module]), &quizzes[module]);
            }
            Action::Retry { module } => {
                progress.retry_quiz(&ModuleId::from(MODULES[module]), &quizzes[module]);
            }
        }
    }
    progress
}

proptest! {
    #[test]
    fn record_codec_preserves_reachable_progress(
        actions in prop::collection::vec(arb_action(), 0..50)
    ) {
        let progress = reachable(&actions);

        let payload = ProgressRecord::from_progress(&progress).encode().unwrap();
        let decoded = ProgressRecord::decode(&payload).unwrap().into_progress();

        prop_assert_eq!(decoded, progress);
    }

    #[test]
    fn in_memory_repository_preserves_reachable_progress(
        actions in prop::collection::vec(arb_action(), 0..50)
    ) {
        let progress = reachable(&actions);
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();

        let loaded = runtime.block_on(async {
            let repo = InMemoryRepository::new();
            repo.save_progress(&progress).await.unwrap();
            repo.load_progress().await.unwrap()
        });

        prop_assert_eq!(loaded, Some(progress));
    }
}
