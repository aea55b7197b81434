use async_trait::async_trait;
use quiz_core::model::AiProvider;
use reqwest::Client;

use super::config::AiConfig;
use super::wire::{EmbeddingsRequest, EmbeddingsResponse, PredictInstance, PredictRequest, PredictResponse};
use super::EmbeddingProvider;
use crate::error::ProviderError;

/// Vertex AI accepts at most this many instances per `:predict` call.
const VERTEX_BATCH_SIZE: usize = 5;

#[derive(Clone)]
pub struct HttpEmbeddingClient {
    client: Client,
    config: AiConfig,
}

impl HttpEmbeddingClient {
    #[must_use]
    pub fn new(client: Client, config: AiConfig) -> Self {
        Self { client, config }
    }

    async fn embed_vertex(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
        let url = self
            .config
            .vertex_model_url(&self.config.embedding_model, "predict");
        let mut vectors = Vec::with_capacity(texts.len());

        for batch in texts.chunks(VERTEX_BATCH_SIZE) {
            let payload = PredictRequest {
                instances: batch
                    .iter()
                    .map(|text| PredictInstance { content: text })
                    .collect(),
            };
            let response = self
                .client
                .post(&url)
                .bearer_auth(&self.config.api_key)
                .json(&payload)
                .send()
                .await?;
            if !response.status().is_success() {
                return Err(ProviderError::HttpStatus {
                    service: "embedding service",
                    status: response.status(),
                });
            }

            let body: PredictResponse = response.json().await?;
            if body.predictions.len() != batch.len() {
                return Err(ProviderError::Malformed(format!(
                    "expected {} embeddings, got {}",
                    batch.len(),
                    body.predictions.len()
                )));
            }
            vectors.extend(body.predictions.into_iter().map(|p| p.embeddings.values));
        }

        Ok(vectors)
    }

    async fn embed_openai(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
        let payload = EmbeddingsRequest {
            model: &self.config.embedding_model,
            input: texts,
        };
        let response = self
            .client
            .post(self.config.openai_url("embeddings"))
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ProviderError::HttpStatus {
                service: "embedding service",
                status: response.status(),
            });
        }

        let mut body: EmbeddingsResponse = response.json().await?;
        if body.data.len() != texts.len() {
            return Err(ProviderError::Malformed(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                body.data.len()
            )));
        }
        body.data.sort_by_key(|item| item.index);
        Ok(body.data.into_iter().map(|item| item.embedding).collect())
    }
}

#[async_trait]
impl EmbeddingProvider for HttpEmbeddingClient {
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        tracing::debug!(
            provider = %self.config.provider,
            model = %self.config.embedding_model,
            count = texts.len(),
            "embedding texts"
        );
        match self.config.provider {
            AiProvider::VertexAi => self.embed_vertex(texts).await,
            AiProvider::OpenAi => self.embed_openai(texts).await,
        }
    }
}
