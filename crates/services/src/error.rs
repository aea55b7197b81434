//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{AppSettingsError, BankError, QuestionCountError, QuestionError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Failures of an external capability: embeddings, language model, or the
/// vector store behind a retriever. Never retried.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProviderError {
    #[error("AI provider is not configured")]
    Disabled,
    #[error("AI provider setting {0} is missing")]
    MissingSetting(&'static str),
    #[error("{service} request failed with status {status}")]
    HttpStatus {
        service: &'static str,
        status: reqwest::StatusCode,
    },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("{0} returned an empty response")]
    EmptyResponse(&'static str),
    #[error("malformed provider response: {0}")]
    Malformed(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Why a single generation attempt contributed no question. Recoverable:
/// the generation loop logs it and moves on.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("model reply is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] QuestionError),
    #[error(transparent)]
    Duplicate(#[from] BankError),
}

/// Errors emitted by `QuizGenerator`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizGeneratorError {
    #[error(transparent)]
    Configuration(#[from] QuestionCountError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Errors emitted while loading documents.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to extract text from {name}: {message}")]
    Pdf { name: String, message: String },
    #[error("document loading stopped: {0}")]
    Interrupted(#[from] tokio::task::JoinError),
}

/// Errors emitted by `CollectionService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IndexError {
    #[error("no documents found")]
    NoDocuments,
    #[error("documents contain no extractable text")]
    NoText,
    #[error("collection has not been created")]
    MissingCollection,
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Configuration(#[from] QuestionCountError),
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl From<QuizGeneratorError> for QuizServiceError {
    fn from(err: QuizGeneratorError) -> Self {
        match err {
            QuizGeneratorError::Configuration(err) => Self::Configuration(err),
            QuizGeneratorError::Provider(err) => Self::Provider(err),
        }
    }
}

/// Errors emitted by `AppSettingsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppSettingsServiceError {
    #[error(transparent)]
    Validation(#[from] AppSettingsError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
