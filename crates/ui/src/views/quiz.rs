use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use quiz_core::model::{Direction, QuizSession, key_from_label};

use crate::routes::Route;
use crate::vm::QuizVm;

#[component]
pub fn QuizView() -> Element {
    let navigator = use_navigator();
    let session = use_context::<Signal<QuizSession>>();
    let selected = use_signal(|| None::<String>);

    let vm = session.read().quiz().and_then(QuizVm::from_state);
    let Some(vm) = vm else {
        return rsx! {
            div { class: "page quiz-page",
                header { class: "view-header",
                    h2 { class: "view-title", "Quiz" }
                }
                p { class: "view-hint", "No quiz yet. Build one from your documents first." }
                Link { class: "btn btn-secondary", to: Route::Builder {}, "Open the quiz builder" }
            }
        };
    };

    let navigate = move |direction: Direction| {
        let mut session = session;
        let mut selected = selected;
        if let Err(err) = session.write().advance(direction) {
            tracing::warn!(error = %err, "cannot move through the quiz");
        }
        selected.set(None);
    };

    let choices = vm.choices.iter().map(|choice| {
        let label = choice.label.clone();
        let is_checked = selected().as_deref() == Some(choice.key.as_str());
        let mut selected = selected;
        rsx! {
            label { class: "quiz-choice",
                input {
                    r#type: "radio",
                    name: "quiz-choice",
                    value: "{choice.label}",
                    checked: is_checked,
                    onchange: move |_| selected.set(Some(key_from_label(&label).to_string())),
                }
                span { "{choice.label}" }
            }
        }
    });

    rsx! {
        div { class: "page quiz-page",
            header { class: "view-header",
                h2 { class: "view-title", "Generated Quiz Question:" }
                p { class: "view-subtitle", "{vm.position_label()}" }
            }
            div { class: "view-divider" }

            div { class: "quiz-card",
                p { class: "quiz-question", "{vm.heading}" }
                fieldset { class: "quiz-choices",
                    legend { "Choose an answer" }
                    {choices}
                }

                if let Some(feedback) = vm.feedback.as_ref() {
                    div { class: feedback_class(feedback.correct),
                        p { class: "quiz-feedback-result", "{feedback.message}" }
                        p { class: "quiz-feedback-explanation", "Explanation: {feedback.explanation}" }
                    }
                }

                div { class: "quiz-actions",
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: selected().is_none(),
                        onclick: move |_| {
                            let Some(key) = selected() else {
                                return;
                            };
                            let mut session = session;
                            match session.write().submit_answer(&key) {
                                Ok(correct) => tracing::debug!(key = %key, correct, "answer submitted"),
                                Err(err) => tracing::warn!(error = %err, "cannot submit answer"),
                            }
                        },
                        "Submit Answer"
                    }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| navigate(Direction::Previous),
                        "Previous Question"
                    }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| navigate(Direction::Next),
                        "Next Question"
                    }
                    button {
                        class: "btn",
                        r#type: "button",
                        onclick: move |_| {
                            let mut session = session;
                            session.write().end();
                            let _ = navigator.push(Route::Builder {});
                        },
                        "New quiz"
                    }
                }
            }
        }
    }
}

fn feedback_class(correct: bool) -> &'static str {
    if correct {
        "quiz-feedback quiz-feedback--correct"
    } else {
        "quiz-feedback quiz-feedback--incorrect"
    }
}
