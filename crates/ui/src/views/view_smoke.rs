use quiz_core::model::{AppSettingsDraft, Chunk, Choice, Question, QuestionBank, QuizSession};
use quiz_core::time::fixed_now;
use storage::repository::{AppSettingsRepository, ChunkRepository, NewChunk, Storage};

use super::test_harness::{COLLECTION, ViewKind, setup_view_harness, setup_view_harness_with_storage};

fn started_session() -> QuizSession {
    let mut bank = QuestionBank::new();
    bank.try_push(
        Question::new(
            "What do plants absorb?",
            vec![
                Choice::new("A", "Light"),
                Choice::new("B", "Water"),
                Choice::new("C", "Soil"),
                Choice::new("D", "Wind"),
            ],
            "A",
            "Plants capture light.",
        )
        .unwrap(),
    )
    .unwrap();
    let mut session = QuizSession::new();
    session.start(bank);
    session
}

#[tokio::test(flavor = "current_thread")]
async fn builder_view_smoke_renders_form() {
    let mut harness = setup_view_harness(ViewKind::Builder, QuizSession::new());
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Quiz Builder"), "missing title in {html}");
    assert!(html.contains("Topic for Generative Quiz"), "missing topic in {html}");
    assert!(html.contains("Number of Questions"), "missing count in {html}");
    assert!(html.contains("Submit"), "missing submit in {html}");
    assert!(html.contains("One PDF path per line."), "missing hint in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn builder_view_smoke_offers_stored_collection() {
    let storage = Storage::in_memory();
    let chunks: Vec<NewChunk> = ["Chlorophyll absorbs light.", "Leaves are green."]
        .into_iter()
        .map(|text| NewChunk {
            chunk: Chunk {
                source: "biology.pdf".into(),
                page: 1,
                text: text.into(),
            },
            embedding: vec![1.0, 0.0],
        })
        .collect();
    storage
        .chunks
        .replace_collection(COLLECTION, &chunks, fixed_now())
        .await
        .expect("seed collection");

    let mut harness = setup_view_harness_with_storage(ViewKind::Builder, QuizSession::new(), storage);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("(2 chunks)"), "missing collection hint in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_labelled_choices() {
    let mut harness = setup_view_harness(ViewKind::Quiz, started_session());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("1. What do plants absorb?"), "missing question in {html}");
    assert!(html.contains("A) Light"), "missing choice label in {html}");
    assert!(html.contains("D) Wind"), "missing choice label in {html}");
    assert!(html.contains("Question 1 of 1"), "missing position in {html}");
    assert!(html.contains("Submit Answer"), "missing submit in {html}");
    assert!(html.contains("Next Question"), "missing next in {html}");
    assert!(!html.contains("Explanation:"), "feedback shown too early in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_shows_feedback_after_answer() {
    let mut session = started_session();
    session.submit_answer("B").unwrap();
    let mut harness = setup_view_harness(ViewKind::Quiz, session);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Incorrect!"), "missing feedback in {html}");
    assert!(html.contains("Explanation: Plants capture light."), "missing explanation in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_without_quiz_points_to_builder() {
    let mut harness = setup_view_harness(ViewKind::Quiz, QuizSession::new());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("No quiz yet"), "missing message in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn settings_view_smoke_loads_saved_values() {
    let storage = Storage::in_memory();
    let settings = AppSettingsDraft {
        provider: Some("vertex-ai".into()),
        project: Some("quizify-demo".into()),
        ..AppSettingsDraft::default()
    }
    .validate()
    .unwrap();
    storage
        .app_settings
        .save_settings(&settings)
        .await
        .expect("save settings");

    let mut harness = setup_view_harness_with_storage(ViewKind::Settings, QuizSession::new(), storage);
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("AI provider"), "missing title in {html}");
    assert!(html.contains("quizify-demo"), "missing saved project in {html}");
    assert!(html.contains("Save"), "missing save button in {html}");
}
