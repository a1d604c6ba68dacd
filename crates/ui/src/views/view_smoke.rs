use std::sync::Arc;

use learn_core::model::ModuleId;
use services::LocalSessionProvider;
use storage::repository::InMemoryRepository;

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_sessions};

#[tokio::test(flavor = "current_thread")]
async fn learning_view_smoke_renders_first_lesson() {
    let mut harness = setup_view_harness(ViewKind::Learning, InMemoryRepository::new()).await;
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Learning Center"), "missing title in {html}");
    assert!(html.contains("0% Complete"), "missing percent in {html}");
    assert!(html.contains("Module 1: The Economic Engine"), "missing module in {html}");
    assert!(
        html.contains("Deep dive into Stocks, Bonds, ETFs"),
        "missing module description in {html}"
    );
    assert!(html.contains("The Silent Thief"), "missing lesson body in {html}");
    assert!(html.contains("Mark Complete"), "missing complete button in {html}");
    assert!(html.contains("Module Quiz"), "missing quiz entry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn learning_view_smoke_reflects_hydrated_progress() {
    let repo = InMemoryRepository::new();
    repo.put_raw(r#"{"completedLessons":["l1-1"],"moduleScores":{"m1":5},"quizSubmitted":{"m1":true}}"#)
        .unwrap();

    let mut harness = setup_view_harness(ViewKind::Learning, repo).await;
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("6% Complete"), "missing percent in {html}");
    assert!(html.contains("Passed"), "missing passed badge in {html}");
    assert!(html.contains("Lesson completed"), "missing completion status in {html}");
    assert!(
        harness
            .services
            .progress()
            .is_passed(&ModuleId::from("m1"))
    );
}

#[tokio::test(flavor = "current_thread")]
async fn shell_smoke_renders_signed_in_user() {
    let mut harness = setup_view_harness(ViewKind::Shell, InMemoryRepository::new()).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("Test Learner"), "missing user name in {html}");
    assert!(html.contains("Sign out"), "missing sign out in {html}");
    assert!(html.contains("Learning Center"), "missing nav item in {html}");
    assert!(html.contains("Course progress: 0%"), "missing dashboard in {html}");
    assert!(html.contains("MARKET CLOSED"), "missing market status in {html}");
    assert!(html.contains("NOV . 14 . 2023"), "missing market date in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn shell_smoke_renders_signed_out_notice() {
    let mut harness = setup_view_harness_with_sessions(
        ViewKind::Shell,
        InMemoryRepository::new(),
        Arc::new(LocalSessionProvider::signed_out()),
    )
    .await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("You are signed out"), "missing notice in {html}");
    assert!(!html.contains("Sign out"), "unexpected sign out in {html}");
    assert!(harness.repo.raw().unwrap().is_none());
}
