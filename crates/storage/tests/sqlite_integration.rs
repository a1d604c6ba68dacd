use learn_core::model::{LearnerProgress, LessonId, ModuleId, Question, QuestionId};
use storage::repository::{ProgressRepository, StorageError};
use storage::sqlite::SqliteRepository;

fn quiz() -> Vec<Question> {
    (1..=5)
        .map(|idx| {
            Question::new(
                format!("q1-{idx}"),
                "?",
                vec!["a".into(), "b".into(), "c".into(), "d".into()],
                1,
                "",
            )
        })
        .collect()
}

fn submitted_progress() -> LearnerProgress {
    let m1 = ModuleId::from("m1");
    let questions = quiz();
    let mut progress = LearnerProgress::new();
    progress.complete_lesson(LessonId::from("l1-1"));
    progress.complete_lesson(LessonId::from("l1-3"));
    for question in &questions {
        progress
            .select_quiz_option(&m1, question.id().clone(), 1)
            .unwrap();
    }
    progress.submit_quiz(&m1, &questions).unwrap();
    progress
}

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn sqlite_roundtrip_preserves_every_collection() {
    let repo = connect("memdb_progress_roundtrip").await;
    let progress = submitted_progress();

    repo.save_progress(&progress).await.unwrap();
    let loaded = repo.load_progress().await.unwrap().expect("stored record");

    assert_eq!(loaded.completed_lessons(), progress.completed_lessons());
    assert_eq!(loaded.module_scores(), progress.module_scores());
    assert_eq!(loaded.current_quiz_answers(), progress.current_quiz_answers());
    assert_eq!(loaded.quiz_submitted(), progress.quiz_submitted());
    assert_eq!(loaded.module_score(&ModuleId::from("m1")), Some(5));
}

#[tokio::test]
async fn sqlite_save_overwrites_previous_record() {
    let repo = connect("memdb_progress_overwrite").await;
    repo.save_progress(&submitted_progress()).await.unwrap();

    let mut newer = submitted_progress();
    newer.complete_lesson(LessonId::from("l2-1"));
    newer.retry_quiz(&ModuleId::from("m1"), &quiz());
    repo.save_progress(&newer).await.unwrap();

    let loaded = repo.load_progress().await.unwrap().expect("stored record");
    assert_eq!(loaded, newer);
    assert!(loaded.answer(&QuestionId::from("q1-1")).is_none());
    assert_eq!(loaded.module_score(&ModuleId::from("m1")), Some(5));
}

#[tokio::test]
async fn sqlite_missing_and_cleared_records_load_as_none() {
    let repo = connect("memdb_progress_clear").await;
    assert!(repo.load_progress().await.unwrap().is_none());

    repo.save_progress(&submitted_progress()).await.unwrap();
    repo.clear_progress().await.unwrap();
    assert!(repo.load_progress().await.unwrap().is_none());
}

#[tokio::test]
async fn sqlite_malformed_payload_is_reported() {
    let repo = connect("memdb_progress_malformed").await;
    sqlx_insert_raw(&repo, "{\"completedLessons\": 42}").await;

    let err = repo.load_progress().await.unwrap_err();
    assert!(matches!(err, StorageError::Serialization(_)));
}

#[tokio::test]
async fn sqlite_migrations_are_idempotent() {
    let repo = connect("memdb_progress_migrate_twice").await;
    repo.migrate().await.expect("second migrate");
    repo.save_progress(&LearnerProgress::new()).await.unwrap();
    assert_eq!(
        repo.load_progress().await.unwrap(),
        Some(LearnerProgress::new())
    );
}

async fn sqlx_insert_raw(repo: &SqliteRepository, payload: &str) {
    sqlx::query(
        "INSERT INTO learner_progress (storage_key, payload, updated_at) VALUES (?1, ?2, ?3)",
    )
    .bind(storage::PROGRESS_STORAGE_KEY)
    .bind(payload)
    .bind("2023-11-14T22:13:20Z")
    .execute(repo.pool())
    .await
    .expect("insert raw payload");
}

#[tokio::test]
async fn sqlite_records_latest_schema_version() {
    let repo = connect("memdb_progress_schema_version").await;
    let version: i64 = sqlx::query_scalar("SELECT MAX(version) FROM schema_migrations")
        .fetch_one(repo.pool())
        .await
        .expect("schema version");
    assert_eq!(version, storage::sqlite::LATEST_SCHEMA_VERSION);
}
