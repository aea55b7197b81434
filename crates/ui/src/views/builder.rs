use dioxus::prelude::*;
use dioxus_router::use_navigator;
use quiz_core::model::{QuestionCount, QuizSession, Screen};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{BuilderForm, build_summary};

#[derive(Clone, Debug, PartialEq, Eq)]
enum BuildState {
    Idle,
    Building,
    Done(String),
    Error(ViewError),
}

#[component]
pub fn BuilderView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let session = use_context::<Signal<QuizSession>>();
    let quiz_service = ctx.quiz_service();
    let quiz_service_for_resource = quiz_service.clone();

    let mut form = use_signal(BuilderForm::default);
    let build_state = use_signal(|| BuildState::Idle);

    let collection = use_resource(move || {
        let quiz_service = quiz_service_for_resource.clone();
        async move {
            quiz_service
                .collection_info()
                .await
                .map_err(|_| ViewError::Unknown)
        }
    });
    let collection_state = view_state_from_resource(collection);

    let form_value = form();
    let is_building = build_state() == BuildState::Building;
    let document_hint = match &collection_state {
        ViewState::Ready(Some(info)) if info.chunk_count > 0 => format!(
            "Leave empty to reuse \"{}\" ({} chunks).",
            info.name, info.chunk_count
        ),
        _ => "One PDF path per line.".to_string(),
    };
    let count_options = QuestionCount::all().map(|count| {
        let value = count.value();
        rsx! {
            option {
                value: "{value}",
                selected: value == form_value.num_questions,
                "{value}"
            }
        }
    });

    rsx! {
        div { class: "page builder-page",
            header { class: "view-header",
                h2 { class: "view-title", "Quiz Builder" }
                p { class: "view-subtitle",
                    "Select PDFs for ingestion, the topic for the quiz, and click Submit!"
                }
            }
            div { class: "view-divider" }

            div { class: "builder-form",
                label { class: "builder-field",
                    span { class: "builder-label", "Documents" }
                    textarea {
                        class: "builder-input builder-documents",
                        rows: "4",
                        placeholder: "/path/to/notes.pdf",
                        value: "{form_value.documents}",
                        oninput: move |evt| {
                            let mut next = form();
                            next.documents = evt.value();
                            form.set(next);
                        },
                    }
                    span { class: "view-hint", "{document_hint}" }
                }
                label { class: "builder-field",
                    span { class: "builder-label", "Topic for Generative Quiz" }
                    input {
                        class: "builder-input",
                        r#type: "text",
                        placeholder: "Enter the topic of the document",
                        value: "{form_value.topic}",
                        oninput: move |evt| {
                            let mut next = form();
                            next.topic = evt.value();
                            form.set(next);
                        },
                    }
                }
                label { class: "builder-field",
                    span { class: "builder-label", "Number of Questions" }
                    select {
                        class: "builder-input builder-count",
                        onchange: move |evt| {
                            if let Ok(value) = evt.value().parse::<u32>() {
                                let mut next = form();
                                next.num_questions = value;
                                form.set(next);
                            }
                        },
                        {count_options}
                    }
                }

                div { class: "builder-actions",
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: is_building,
                        onclick: move |_| {
                            let request = form().to_request();
                            let quiz_service = quiz_service.clone();
                            let mut build_state = build_state;
                            let mut session = session;
                            let mut collection = collection;
                            spawn(async move {
                                build_state.set(BuildState::Building);
                                match quiz_service.build_quiz(request).await {
                                    Ok(outcome) => {
                                        let summary = build_summary(&outcome.quiz.report);
                                        session.write().start(outcome.quiz.bank);
                                        collection.restart();
                                        if session.read().screen() == Screen::Quiz {
                                            build_state.set(BuildState::Done(summary));
                                            let _ = navigator.push(Route::Quiz {});
                                        } else {
                                            build_state.set(BuildState::Error(ViewError::Action(
                                                format!("{summary}. Try again or change the topic."),
                                            )));
                                        }
                                    }
                                    Err(err) => {
                                        tracing::warn!(error = %err, "quiz build failed");
                                        build_state.set(BuildState::Error(ViewError::from(&err)));
                                    }
                                }
                            });
                        },
                        "Submit"
                    }
                    match build_state() {
                        BuildState::Idle => rsx! {},
                        BuildState::Building => rsx! {
                            p { class: "builder-status",
                                "Generating {form_value.num_questions} questions..."
                            }
                        },
                        BuildState::Done(summary) => rsx! {
                            p { class: "builder-status", "{summary}" }
                        },
                        BuildState::Error(err) => rsx! {
                            p { class: "builder-error", "{err.message()}" }
                        },
                    }
                }
            }

            if let ViewState::Error(err) = collection_state {
                p { class: "builder-error", "{err.message()}" }
            }
        }
    }
}
