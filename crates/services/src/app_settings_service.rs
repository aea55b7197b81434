use std::sync::Arc;

use quiz_core::model::{AppSettings, AppSettingsDraft};
use storage::repository::AppSettingsRepository;

use crate::ai::AiConfig;
use crate::error::{AppSettingsServiceError, ProviderError};

/// Reads and writes the persisted AI provider settings.
#[derive(Clone)]
pub struct AppSettingsService {
    repo: Arc<dyn AppSettingsRepository>,
}

impl AppSettingsService {
    #[must_use]
    pub fn new(repo: Arc<dyn AppSettingsRepository>) -> Self {
        Self { repo }
    }

    /// Stored settings; every field is empty on a fresh database.
    ///
    /// # Errors
    ///
    /// Returns `AppSettingsServiceError::Storage` when the row cannot be read.
    pub async fn load(&self) -> Result<AppSettings, AppSettingsServiceError> {
        Ok(self.repo.get_settings().await?.unwrap_or_default())
    }

    /// Validate `draft` and overwrite the stored settings with it. Blank
    /// fields are stored as unset and fall back to the environment.
    ///
    /// # Errors
    ///
    /// Returns `AppSettingsServiceError::Validation` for an unknown provider
    /// or malformed base URL, before anything is written.
    pub async fn save(
        &self,
        draft: AppSettingsDraft,
    ) -> Result<AppSettings, AppSettingsServiceError> {
        let settings = draft.validate()?;
        self.repo.save_settings(&settings).await?;
        tracing::info!(
            provider = settings.provider().map(|p| p.as_str()),
            "saved AI settings"
        );
        Ok(settings)
    }

    /// Provider configuration that a quiz build would use right now.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Disabled` or `ProviderError::MissingSetting`
    /// when the configuration is incomplete.
    pub async fn effective_config(&self) -> Result<AiConfig, ProviderError> {
        let settings = self.repo.get_settings().await?.unwrap_or_default();
        AiConfig::resolve(&settings)
    }
}
