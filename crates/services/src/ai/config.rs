use std::env;

use quiz_core::model::{AiProvider, AppSettings};

use crate::error::ProviderError;

const VERTEX_DEFAULT_LOCATION: &str = "us-central1";
const VERTEX_EMBEDDING_MODEL: &str = "textembedding-gecko@003";
const VERTEX_CHAT_MODEL: &str = "gemini-pro";
const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const OPENAI_EMBEDDING_MODEL: &str = "text-embedding-3-small";
const OPENAI_CHAT_MODEL: &str = "gpt-4o-mini";

/// Fully resolved provider configuration used to build HTTP clients.
#[derive(Clone, Debug, PartialEq)]
pub struct AiConfig {
    pub provider: AiProvider,
    pub project: Option<String>,
    pub location: String,
    pub embedding_model: String,
    pub chat_model: String,
    pub api_key: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl AiConfig {
    /// Resolve from persisted settings, then `QUIZIFY_*` environment
    /// variables, then provider defaults.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Disabled` without an API key, or
    /// `ProviderError::MissingSetting` when Vertex AI has no project.
    pub fn resolve(settings: &AppSettings) -> Result<Self, ProviderError> {
        Self::resolve_with(settings, |key| env::var(key).ok())
    }

    /// Same as `resolve`, reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// See `resolve`.
    pub fn resolve_with(
        settings: &AppSettings,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ProviderError> {
        let from_env = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let pick = |stored: Option<&str>, key: &str| stored.map(str::to_string).or_else(|| from_env(key));

        let provider = match settings.provider() {
            Some(provider) => provider,
            None => from_env("QUIZIFY_AI_PROVIDER")
                .map(|raw| provider_from_env(&raw))
                .unwrap_or_default(),
        };

        let api_key = pick(settings.api_key(), "QUIZIFY_API_KEY").ok_or(ProviderError::Disabled)?;
        let project = pick(settings.project(), "QUIZIFY_PROJECT");
        let location = pick(settings.location(), "QUIZIFY_LOCATION")
            .unwrap_or_else(|| VERTEX_DEFAULT_LOCATION.to_string());

        let (default_embedding, default_chat) = match provider {
            AiProvider::VertexAi => (VERTEX_EMBEDDING_MODEL, VERTEX_CHAT_MODEL),
            AiProvider::OpenAi => (OPENAI_EMBEDDING_MODEL, OPENAI_CHAT_MODEL),
        };
        let embedding_model = pick(settings.embedding_model(), "QUIZIFY_EMBEDDING_MODEL")
            .unwrap_or_else(|| default_embedding.to_string());
        let chat_model = pick(settings.chat_model(), "QUIZIFY_CHAT_MODEL")
            .unwrap_or_else(|| default_chat.to_string());

        let base_url = pick(settings.api_base_url(), "QUIZIFY_BASE_URL").unwrap_or_else(|| {
            match provider {
                AiProvider::VertexAi => format!("https://{location}-aiplatform.googleapis.com/v1"),
                AiProvider::OpenAi => OPENAI_BASE_URL.to_string(),
            }
        });

        if provider == AiProvider::VertexAi && project.is_none() {
            return Err(ProviderError::MissingSetting("project"));
        }

        Ok(Self {
            provider,
            project,
            location,
            embedding_model,
            chat_model,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            temperature: 0.8,
            max_output_tokens: 500,
        })
    }

    /// Vertex AI publisher-model endpoint for `model` and `method`
    /// (`predict`, `generateContent`).
    #[must_use]
    pub fn vertex_model_url(&self, model: &str, method: &str) -> String {
        format!(
            "{}/projects/{}/locations/{}/publishers/google/models/{model}:{method}",
            self.base_url,
            self.project.as_deref().unwrap_or_default(),
            self.location,
        )
    }

    #[must_use]
    pub fn openai_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Unknown names fall back to the default provider.
fn provider_from_env(raw: &str) -> AiProvider {
    raw.parse().unwrap_or_else(|err| {
        let fallback = AiProvider::default();
        tracing::warn!(value = raw, error = %err, fallback = %fallback, "ignoring QUIZIFY_AI_PROVIDER");
        fallback
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::AppSettingsDraft;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn disabled_without_api_key() {
        let err = AiConfig::resolve_with(&AppSettings::default(), env_of(&[])).unwrap_err();
        assert!(matches!(err, ProviderError::Disabled));
    }

    #[test]
    fn vertex_needs_a_project() {
        let err = AiConfig::resolve_with(
            &AppSettings::default(),
            env_of(&[("QUIZIFY_API_KEY", "token")]),
        )
        .unwrap_err();
        assert!(matches!(err, ProviderError::MissingSetting("project")));
    }

    #[test]
    fn vertex_defaults_follow_location() {
        let config = AiConfig::resolve_with(
            &AppSettings::default(),
            env_of(&[
                ("QUIZIFY_API_KEY", "token"),
                ("QUIZIFY_PROJECT", "quizify-428719"),
                ("QUIZIFY_LOCATION", "europe-west2"),
            ]),
        )
        .unwrap();
        assert_eq!(config.provider, AiProvider::VertexAi);
        assert_eq!(config.embedding_model, "textembedding-gecko@003");
        assert_eq!(config.chat_model, "gemini-pro");
        assert_eq!(
            config.vertex_model_url("gemini-pro", "generateContent"),
            "https://europe-west2-aiplatform.googleapis.com/v1/projects/quizify-428719/locations/europe-west2/publishers/google/models/gemini-pro:generateContent"
        );
    }

    #[test]
    fn stored_settings_win_over_environment() {
        let settings = AppSettingsDraft {
            provider: Some("openai".into()),
            api_key: Some("stored".into()),
            chat_model: Some("gpt-4o".into()),
            api_base_url: Some("http://localhost:8080/v1/".into()),
            ..AppSettingsDraft::default()
        }
        .validate()
        .unwrap();
        let config = AiConfig::resolve_with(
            &settings,
            env_of(&[("QUIZIFY_API_KEY", "env"), ("QUIZIFY_CHAT_MODEL", "other")]),
        )
        .unwrap();
        assert_eq!(config.api_key, "stored");
        assert_eq!(config.chat_model, "gpt-4o");
        assert_eq!(config.embedding_model, "text-embedding-3-small");
        assert_eq!(config.openai_url("/embeddings"), "http://localhost:8080/v1/embeddings");
    }

    #[test]
    fn unknown_env_provider_falls_back_to_vertex() {
        assert_eq!(provider_from_env("openai"), AiProvider::OpenAi);
        assert_eq!(provider_from_env("watsonx"), AiProvider::VertexAi);

        let err = AiConfig::resolve_with(
            &AppSettings::default(),
            env_of(&[("QUIZIFY_AI_PROVIDER", "watsonx"), ("QUIZIFY_API_KEY", "token")]),
        )
        .unwrap_err();
        assert!(matches!(err, ProviderError::MissingSetting("project")));
    }
}
