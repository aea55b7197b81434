use dioxus::prelude::*;
use services::{IndexError, ProviderError, QuizServiceError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    /// A failure the user can act on, with the text to show.
    Action(String),
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            ViewError::Unknown => "Something went wrong. Please try again.",
            ViewError::Action(message) => message,
        }
    }
}

impl From<&QuizServiceError> for ViewError {
    fn from(err: &QuizServiceError) -> Self {
        let message = match err {
            QuizServiceError::Provider(ProviderError::Disabled) => {
                "No AI provider is configured. Add an API key on the Settings screen.".to_string()
            }
            QuizServiceError::Index(IndexError::NoDocuments) => {
                "No documents found! Add at least one PDF path.".to_string()
            }
            other => other.to_string(),
        };
        ViewError::Action(message)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
