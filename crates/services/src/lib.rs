#![forbid(unsafe_code)]

pub mod ai;
pub mod app_services;
pub mod app_settings_service;
pub mod collection_service;
pub mod error;
pub mod ingest;
pub mod quiz_generator;
pub mod quiz_service;

pub use quiz_core::Clock;

pub use ai::{
    AiConfig, AiProviders, EmbeddingProvider, HttpEmbeddingClient, HttpLanguageModel,
    LanguageModel, SettingsAiProviders, StaticAiProviders,
};
pub use app_services::AppServices;
pub use app_settings_service::AppSettingsService;
pub use collection_service::{CollectionService, DEFAULT_TOP_K, Retriever, VectorRetriever};
pub use error::{
    AppServicesError, AppSettingsServiceError, GenerationError, IndexError, IngestError,
    ProviderError, QuizGeneratorError, QuizServiceError,
};
pub use ingest::{DocumentSource, PdfDocumentSource};
pub use quiz_generator::{GeneratedQuiz, GenerationReport, QuizGenerator};
pub use quiz_service::{QuizBuildOutcome, QuizBuildRequest, QuizService};
