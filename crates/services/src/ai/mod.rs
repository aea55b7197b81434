//! External AI capabilities: embeddings and text generation.

pub mod config;
mod embeddings;
mod language_model;
mod providers;
mod wire;

use async_trait::async_trait;

use crate::error::ProviderError;

pub use config::AiConfig;
pub use embeddings::HttpEmbeddingClient;
pub use language_model::HttpLanguageModel;
pub use providers::{AiProviders, SettingsAiProviders, StaticAiProviders};

/// Turns text into vectors. Implementations must return one vector per
/// input, in input order.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns `ProviderError` when the embedding service is unavailable.
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ProviderError>;

    /// # Errors
    ///
    /// Returns `ProviderError` when the embedding service is unavailable.
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        let mut vectors = self.embed_documents(&[text.to_string()]).await?;
        vectors
            .pop()
            .ok_or(ProviderError::EmptyResponse("embedding service"))
    }
}

/// Single prompt in, single completion out. No streaming.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// # Errors
    ///
    /// Returns `ProviderError` when the model call fails.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}
