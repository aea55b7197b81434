use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

/// Hosted API family used for embeddings and generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AiProvider {
    #[default]
    VertexAi,
    OpenAi,
}

impl AiProvider {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::VertexAi => "vertex-ai",
            Self::OpenAi => "openai",
        }
    }

    #[must_use]
    pub fn all() -> [Self; 2] {
        [Self::VertexAi, Self::OpenAi]
    }
}

impl fmt::Display for AiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AiProvider {
    type Err = AppSettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vertex-ai" | "vertexai" | "vertex" => Ok(Self::VertexAi),
            "openai" | "open-ai" => Ok(Self::OpenAi),
            other => Err(AppSettingsError::UnknownProvider(other.to_string())),
        }
    }
}

/// Persisted AI provider configuration. Every field is optional; missing
/// values are filled from the environment or defaults when a client is built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppSettings {
    provider: Option<AiProvider>,
    project: Option<String>,
    location: Option<String>,
    embedding_model: Option<String>,
    chat_model: Option<String>,
    api_key: Option<String>,
    api_base_url: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct AppSettingsDraft {
    pub provider: Option<String>,
    pub project: Option<String>,
    pub location: Option<String>,
    pub embedding_model: Option<String>,
    pub chat_model: Option<String>,
    pub api_key: Option<String>,
    pub api_base_url: Option<String>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AppSettingsError {
    #[error("invalid base URL")]
    InvalidBaseUrl,
    #[error("unknown AI provider: {0}")]
    UnknownProvider(String),
}

impl AppSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and normalize the draft into persisted settings.
    ///
    /// # Errors
    ///
    /// Returns `AppSettingsError` if the base URL is present but invalid, or
    /// the provider name is not recognised.
    pub fn validate(self) -> Result<AppSettings, AppSettingsError> {
        let provider = normalize_optional(self.provider)
            .map(|raw| raw.parse::<AiProvider>())
            .transpose()?;
        let api_base_url = normalize_optional(self.api_base_url);

        if let Some(url) = api_base_url.as_ref() {
            if Url::parse(url).is_err() {
                return Err(AppSettingsError::InvalidBaseUrl);
            }
        }

        Ok(AppSettings {
            provider,
            project: normalize_optional(self.project),
            location: normalize_optional(self.location),
            embedding_model: normalize_optional(self.embedding_model),
            chat_model: normalize_optional(self.chat_model),
            api_key: normalize_optional(self.api_key),
            api_base_url,
        })
    }
}

impl AppSettings {
    /// Rebuild settings from stored columns.
    ///
    /// # Errors
    ///
    /// Returns `AppSettingsError` if the stored values no longer validate.
    pub fn from_persisted(draft: AppSettingsDraft) -> Result<Self, AppSettingsError> {
        draft.validate()
    }

    /// Editable copy, used by the settings form.
    #[must_use]
    pub fn to_draft(&self) -> AppSettingsDraft {
        AppSettingsDraft {
            provider: self.provider.map(|p| p.as_str().to_string()),
            project: self.project.clone(),
            location: self.location.clone(),
            embedding_model: self.embedding_model.clone(),
            chat_model: self.chat_model.clone(),
            api_key: self.api_key.clone(),
            api_base_url: self.api_base_url.clone(),
        }
    }

    #[must_use]
    pub fn provider(&self) -> Option<AiProvider> {
        self.provider
    }

    #[must_use]
    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    #[must_use]
    pub fn embedding_model(&self) -> Option<&str> {
        self.embedding_model.as_deref()
    }

    #[must_use]
    pub fn chat_model(&self) -> Option<&str> {
        self.chat_model.as_deref()
    }

    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    #[must_use]
    pub fn api_base_url(&self) -> Option<&str> {
        self.api_base_url.as_deref()
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}
