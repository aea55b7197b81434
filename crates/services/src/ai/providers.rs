use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use storage::repository::AppSettingsRepository;

use super::{AiConfig, EmbeddingProvider, HttpEmbeddingClient, HttpLanguageModel, LanguageModel};
use crate::error::ProviderError;

/// Hands out capability clients for the current configuration.
#[async_trait]
pub trait AiProviders: Send + Sync {
    /// # Errors
    ///
    /// Returns `ProviderError::Disabled` when no provider is configured.
    async fn embeddings(&self) -> Result<Arc<dyn EmbeddingProvider>, ProviderError>;

    /// # Errors
    ///
    /// Returns `ProviderError::Disabled` when no provider is configured.
    async fn language_model(&self) -> Result<Arc<dyn LanguageModel>, ProviderError>;
}

/// Builds HTTP clients from persisted settings on every call, so edits on
/// the settings screen apply to the next quiz without a restart.
#[derive(Clone)]
pub struct SettingsAiProviders {
    client: Client,
    settings: Arc<dyn AppSettingsRepository>,
}

impl SettingsAiProviders {
    #[must_use]
    pub fn new(settings: Arc<dyn AppSettingsRepository>) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    async fn config(&self) -> Result<AiConfig, ProviderError> {
        let settings = self.settings.get_settings().await?.unwrap_or_default();
        AiConfig::resolve(&settings)
    }
}

#[async_trait]
impl AiProviders for SettingsAiProviders {
    async fn embeddings(&self) -> Result<Arc<dyn EmbeddingProvider>, ProviderError> {
        let config = self.config().await?;
        Ok(Arc::new(HttpEmbeddingClient::new(self.client.clone(), config)))
    }

    async fn language_model(&self) -> Result<Arc<dyn LanguageModel>, ProviderError> {
        let config = self.config().await?;
        Ok(Arc::new(HttpLanguageModel::new(self.client.clone(), config)))
    }
}

/// Fixed capability clients, for tests and embedding the services elsewhere.
#[derive(Clone)]
pub struct StaticAiProviders {
    embeddings: Arc<dyn EmbeddingProvider>,
    language_model: Arc<dyn LanguageModel>,
}

impl StaticAiProviders {
    #[must_use]
    pub fn new(
        embeddings: Arc<dyn EmbeddingProvider>,
        language_model: Arc<dyn LanguageModel>,
    ) -> Self {
        Self {
            embeddings,
            language_model,
        }
    }
}

#[async_trait]
impl AiProviders for StaticAiProviders {
    async fn embeddings(&self) -> Result<Arc<dyn EmbeddingProvider>, ProviderError> {
        Ok(Arc::clone(&self.embeddings))
    }

    async fn language_model(&self) -> Result<Arc<dyn LanguageModel>, ProviderError> {
        Ok(Arc::clone(&self.language_model))
    }
}
