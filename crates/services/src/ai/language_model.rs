use async_trait::async_trait;
use quiz_core::model::AiProvider;
use reqwest::Client;

use super::config::AiConfig;
use super::wire::{
    ChatMessage, ChatRequest, ChatResponse, Content, GenerateContentRequest,
    GenerateContentResponse, GenerationConfig, Part,
};
use super::LanguageModel;
use crate::error::ProviderError;

#[derive(Clone)]
pub struct HttpLanguageModel {
    client: Client,
    config: AiConfig,
}

impl HttpLanguageModel {
    #[must_use]
    pub fn new(client: Client, config: AiConfig) -> Self {
        Self { client, config }
    }

    async fn generate_vertex(&self, prompt: &str) -> Result<String, ProviderError> {
        let url = self
            .config
            .vertex_model_url(&self.config.chat_model, "generateContent");
        let payload = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
            },
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ProviderError::HttpStatus {
                service: "language model",
                status: response.status(),
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        let text: String = body
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();
        if text.trim().is_empty() {
            return Err(ProviderError::EmptyResponse("language model"));
        }
        Ok(text)
    }

    async fn generate_openai(&self, prompt: &str) -> Result<String, ProviderError> {
        let payload = ChatRequest {
            model: &self.config.chat_model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_output_tokens,
        };

        let response = self
            .client
            .post(self.config.openai_url("chat/completions"))
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ProviderError::HttpStatus {
                service: "language model",
                status: response.status(),
            });
        }

        let body: ChatResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(ProviderError::EmptyResponse("language model"))
    }
}

#[async_trait]
impl LanguageModel for HttpLanguageModel {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        tracing::debug!(
            provider = %self.config.provider,
            model = %self.config.chat_model,
            "requesting completion"
        );
        match self.config.provider {
            AiProvider::VertexAi => self.generate_vertex(prompt).await,
            AiProvider::OpenAi => self.generate_openai(prompt).await,
        }
    }
}
