use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use learn_core::LearningConfig;
use learn_core::model::{LearnerProgress, LessonId, ModuleId, QuestionId};
use services::clock::fixed_clock;
use services::{
    AppServices, AuthError, AuthSession, LocalSessionProvider, NavigationController,
    ProgressStore, Selection, SessionProvider, SignOutService, finance_curriculum,
};
use storage::repository::{InMemoryRepository, ProgressRepository, Storage, StorageError};

/// Repository whose writes always fail; loads report nothing stored.
#[derive(Default)]
struct FailingRepository {
    attempts: AtomicUsize,
}

#[async_trait]
impl ProgressRepository for FailingRepository {
    async fn load_progress(&self) -> Result<Option<LearnerProgress>, StorageError> {
        Err(StorageError::Connection("offline".into()))
    }

    async fn save_progress(&self, _progress: &LearnerProgress) -> Result<(), StorageError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::Connection("offline".into()))
    }

    async fn clear_progress(&self) -> Result<(), StorageError> {
        Err(StorageError::Connection("offline".into()))
    }
}

struct UnreachableProvider;

#[async_trait]
impl SessionProvider for UnreachableProvider {
    async fn current_session(&self) -> Result<Option<AuthSession>, AuthError> {
        Err(AuthError::Unavailable("no network".into()))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        Err(AuthError::Unavailable("no network".into()))
    }
}

fn storage_over(repo: &InMemoryRepository) -> Storage {
    Storage {
        progress: Arc::new(repo.clone()),
    }
}

async fn services_over(repo: &InMemoryRepository) -> AppServices {
    let sessions: Arc<dyn SessionProvider> =
        Arc::new(LocalSessionProvider::new("Learner", fixed_clock()));
    AppServices::from_parts(storage_over(repo), LearningConfig::default(), sessions)
        .await
        .expect("services")
}

fn answer_all(store: &ProgressStore, module: &str, options: [usize; 5]) {
    let module_id = ModuleId::from(module);
    let prefix = module.replacen('m', "q", 1);
    for (idx, option) in options.into_iter().enumerate() {
        store
            .select_quiz_option(&module_id, &QuestionId::new(format!("{prefix}-{}", idx + 1)), option)
            .expect("selection accepted");
    }
}

#[tokio::test(start_paused = true)]
async fn completing_lessons_and_passing_a_quiz_survives_restart() {
    let repo = InMemoryRepository::new();
    {
        let services = services_over(&repo).await;
        let store = services.progress();
        for lesson in ["l1-1", "l1-2", "l1-3"] {
            assert_eq!(store.complete_lesson(&LessonId::from(lesson)), Ok(true));
        }
        answer_all(&store, "m1", [1, 2, 1, 2, 1]);
        assert_eq!(store.submit_quiz(&ModuleId::from("m1")), Ok(5));
        assert_eq!(store.progress_percent(), 18);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    let services = services_over(&repo).await;
    let store = services.progress();
    assert_eq!(store.progress_percent(), 18);
    assert!(store.is_passed(&ModuleId::from("m1")));
    assert!(!store.is_passed(&ModuleId::from("m2")));
}

#[tokio::test(start_paused = true)]
async fn legacy_record_hydrates_before_first_mutation() {
    let repo = InMemoryRepository::new();
    repo.put_raw(
        r#"{"completedLessons":["l1-1","l1-2"],"moduleScores":{"m1":5},"currentQuizAnswers":{},"quizSubmitted":{"m1":true}}"#,
    )
    .unwrap();

    let services = services_over(&repo).await;
    let store = services.progress();
    store.complete_lesson(&LessonId::from("l2-1")).unwrap();
    store.flush().await;

    let stored = repo.load_progress().await.unwrap().expect("written");
    assert_eq!(stored.completed_lessons().len(), 3);
    assert_eq!(stored.module_score(&ModuleId::from("m1")), Some(5));
    assert!(stored.is_quiz_submitted(&ModuleId::from("m1")));
}

#[tokio::test(start_paused = true)]
async fn write_failures_keep_in_memory_progress() {
    let repo = Arc::new(FailingRepository::default());
    let catalog = Arc::new(finance_curriculum().unwrap());
    let store = ProgressStore::open(
        catalog,
        Arc::clone(&repo) as Arc<dyn ProgressRepository>,
        &LearningConfig::default(),
    )
    .await;

    store.complete_lesson(&LessonId::from("l3-1")).unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(repo.attempts.load(Ordering::SeqCst), 1);

    store.complete_lesson(&LessonId::from("l3-2")).unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(repo.attempts.load(Ordering::SeqCst), 2);

    let progress = store.snapshot();
    assert!(progress.is_lesson_complete(&LessonId::from("l3-1")));
    assert!(progress.is_lesson_complete(&LessonId::from("l3-2")));
}

#[tokio::test(start_paused = true)]
async fn sign_out_ends_session_and_wipes_progress() {
    let repo = InMemoryRepository::new();
    let services = services_over(&repo).await;
    let store = services.progress();
    store.complete_lesson(&LessonId::from("l1-1")).unwrap();
    store.flush().await;
    assert!(repo.raw().unwrap().is_some());

    services.sign_out().sign_out().await.unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert!(services.sessions().current_session().await.unwrap().is_none());
    assert_eq!(store.snapshot(), LearnerProgress::new());
    assert!(repo.raw().unwrap().is_none());
}

#[tokio::test(start_paused = true)]
async fn failed_provider_sign_out_keeps_progress() {
    let repo = InMemoryRepository::new();
    let services = services_over(&repo).await;
    let store = services.progress();
    store.complete_lesson(&LessonId::from("l1-1")).unwrap();

    let sign_out = SignOutService::new(Arc::new(UnreachableProvider), Arc::clone(&store));
    let err = sign_out.sign_out().await.unwrap_err();

    assert!(matches!(err, AuthError::Unavailable(_)));
    assert!(store.snapshot().is_lesson_complete(&LessonId::from("l1-1")));
}

#[tokio::test(start_paused = true)]
async fn navigation_follows_the_bundled_course() {
    let services = AppServices::in_memory(LearningConfig::default(), "Ada Lovelace", fixed_clock())
        .await
        .expect("in-memory services");
    let session = services
        .sessions()
        .current_session()
        .await
        .unwrap()
        .expect("local learner signed in");
    assert_eq!(session.display_name, "Ada Lovelace");
    assert_eq!(services.progress().progress_percent(), 0);

    let mut nav = NavigationController::new(services.catalog());

    assert_eq!(nav.selection(), &Selection::Lesson(LessonId::from("l1-1")));
    assert!(nav.select_module(&ModuleId::from("m6")));
    assert_eq!(nav.selection(), &Selection::Lesson(LessonId::from("l6-1")));
    nav.open_quiz();
    assert!(nav.is_quiz_mode());
    assert_eq!(nav.active_module().quiz().len(), 5);
}
