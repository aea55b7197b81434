use dioxus::prelude::*;
use dioxus_router::Router;
use quiz_core::model::QuizSession;

use crate::routes::Route;

#[component]
pub fn App() -> Element {
    // One quiz per window; views mutate it only through `QuizSession` methods.
    use_context_provider(|| Signal::new(QuizSession::new()));

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "Quizify" }

        ErrorBoundary {
            handle_error: |errors: ErrorContext| {
                tracing::error!(?errors, "view crashed");
                rsx! {
                    section { class: "fatal",
                        h1 { "Quizify hit an unexpected error" }
                        p { "Restart the app. Your document collection is kept on disk." }
                        pre { "{errors:?}" }
                    }
                }
            },
            Router::<Route> {}
        }
    }
}
