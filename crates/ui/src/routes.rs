use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};
use quiz_core::model::QuizSession;

use crate::views::{BuilderView, QuizView, SettingsView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Shell)]
        #[route("/", BuilderView)] Builder {},
        #[route("/quiz", QuizView)] Quiz {},
        #[route("/settings", SettingsView)] Settings {},
}

#[component]
fn Shell() -> Element {
    let session = use_context::<Signal<QuizSession>>();
    let progress = quiz_progress(&session.read());

    rsx! {
        div { class: "app",
            nav { class: "sidebar",
                h1 { "Quizify" }
                ul {
                    li {
                        Link { to: Route::Builder {}, active_class: "active", "Quiz Builder" }
                    }
                    li {
                        Link { to: Route::Quiz {}, active_class: "active",
                            "Quiz"
                            if let Some(progress) = progress {
                                span { class: "sidebar-badge", "{progress}" }
                            }
                        }
                    }
                    li {
                        Link { to: Route::Settings {}, active_class: "active", "Settings" }
                    }
                }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

/// "current/total" while a non-empty quiz is running.
fn quiz_progress(session: &QuizSession) -> Option<String> {
    session
        .quiz()
        .filter(|quiz| !quiz.is_empty())
        .map(|quiz| format!("{}/{}", quiz.current_index() + 1, quiz.len()))
}
