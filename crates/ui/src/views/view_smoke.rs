use chrono::NaiveDate;
use planner_core::model::TaskDraft;
use storage::records::PLANNER_TASKS_KEY;
use storage::repository::Storage;

use super::session_changed;
use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_storage};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_signed_out_offers_sign_in() {
    let mut harness = setup_view_harness(ViewKind::Home).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Sign in"), "missing sign in link in {html}");
    assert!(html.contains("Create account"), "missing register link in {html}");
    assert!(!html.contains("Go to planner"), "unexpected planner link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_signed_in_offers_planner() {
    let mut harness = setup_view_harness(ViewKind::Home).await;
    harness
        .services
        .auth()
        .sign_in_demo()
        .await
        .expect("sign in");
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Welcome back, Demo User."), "missing greeting in {html}");
    assert!(html.contains("Go to planner"), "missing planner link in {html}");
    assert!(html.contains("Sign out"), "missing sign out in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn login_view_smoke_prefills_demo_account() {
    let mut harness = setup_view_harness(ViewKind::Login).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("demo@gran.com"), "missing demo email in {html}");
    assert!(html.contains("Use demo account"), "missing demo button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn register_view_smoke_renders_form() {
    let mut harness = setup_view_harness(ViewKind::Register).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Create account"), "missing title in {html}");
    assert!(html.contains("Sign up"), "missing submit in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn planner_view_smoke_lists_tasks_by_date() {
    let mut harness = setup_view_harness(ViewKind::Planner).await;
    let planner = harness.services.planner_store();
    planner
        .add_task(TaskDraft::new("Review Lesson 1").due(date(2025, 1, 10)))
        .await
        .expect("add");
    planner
        .add_task(TaskDraft::new("Truth tables").due(date(2025, 1, 5)))
        .await
        .expect("add");

    harness.rebuild();
    let html = harness.render();
    let first = html.find("Truth tables").expect("first task");
    let second = html.find("Review Lesson 1").expect("second task");
    assert!(first < second, "tasks not sorted by date in {html}");
    assert!(html.contains("05/01/2025"), "missing formatted date in {html}");
    assert!(html.contains("due-future"), "missing due class in {html}");
    assert!(html.contains("Clear completed"), "missing clear button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn planner_view_smoke_malformed_storage_shows_empty_board() {
    let storage = Storage::in_memory();
    storage
        .local
        .set_item(PLANNER_TASKS_KEY, "{not json")
        .await
        .expect("seed garbage");

    let mut harness = setup_view_harness_with_storage(ViewKind::Planner, storage).await;
    harness.rebuild();
    let html = harness.render();
    assert!(
        html.contains("Nothing here for this filter."),
        "missing empty state in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn study_view_smoke_renders_buckets_and_lessons() {
    let mut harness = setup_view_harness(ViewKind::Study).await;
    let study = harness.services.study_store();
    let lessons = harness.services.lessons();
    let truth_tables = lessons.lessons()[1].clone();
    study
        .add_from_lesson(&truth_tables, planner_core::model::Column::Review)
        .await
        .expect("add lesson");

    harness.rebuild();
    let html = harness.render();
    for label in ["To-Do", "Review", "Exercises"] {
        assert!(html.contains(label), "missing bucket {label} in {html}");
    }
    assert!(html.contains("Logic diagrams"), "missing lesson list in {html}");
    assert!(html.contains("55 min"), "missing column minutes in {html}");
    assert!(html.contains("Drag lessons here..."), "missing empty bucket in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn gated_planner_smoke_requires_session() {
    let mut harness = setup_view_harness(ViewKind::GatedPlanner).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Sign in required"), "missing gate in {html}");
    assert!(!html.contains("Study planner"), "planner leaked in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn gated_planner_smoke_renders_for_signed_in_user() {
    let mut harness = setup_view_harness(ViewKind::GatedPlanner).await;
    harness
        .services
        .auth()
        .sign_in_demo()
        .await
        .expect("sign in");
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Signed in as Demo User"), "missing session in {html}");
    assert!(html.contains("Study planner"), "missing planner in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn gated_planner_closes_after_sign_out() {
    let mut harness = setup_view_harness(ViewKind::GatedPlanner).await;
    harness
        .services
        .auth()
        .sign_in_demo()
        .await
        .expect("sign in");
    harness.settle().await;
    assert!(harness.render().contains("Study planner"));

    harness.services.auth().sign_out().await.expect("sign out");
    harness.dom.in_runtime(session_changed);
    harness.drive().await;

    let html = harness.render();
    assert!(html.contains("Sign in required"), "gate stayed open in {html}");
    assert!(!html.contains("Study planner"), "planner leaked in {html}");
}
