use std::sync::Arc;

use async_trait::async_trait;
use quiz_core::Clock;
use quiz_core::chunking::TextSplitter;
use quiz_core::model::Page;
use storage::repository::{ChunkRepository, CollectionInfo, NewChunk, ScoredChunk, StorageError};

use crate::ai::EmbeddingProvider;
use crate::error::{IndexError, ProviderError};

/// Snippets returned per retrieval.
pub const DEFAULT_TOP_K: usize = 4;

/// Maps a text query to ordered context snippets, most relevant first.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// # Errors
    ///
    /// Returns `ProviderError` if embedding or the vector store fails.
    async fn retrieve(&self, query: &str) -> Result<Vec<String>, ProviderError>;
}

/// Builds and queries one named collection.
#[derive(Clone)]
pub struct CollectionService {
    name: String,
    clock: Clock,
    splitter: TextSplitter,
    chunks: Arc<dyn ChunkRepository>,
    embeddings: Arc<dyn EmbeddingProvider>,
}

impl CollectionService {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        clock: Clock,
        chunks: Arc<dyn ChunkRepository>,
        embeddings: Arc<dyn EmbeddingProvider>,
    ) -> Self {
        Self {
            name: name.into(),
            clock,
            splitter: TextSplitter::default(),
            chunks,
            embeddings,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Split, embed, and store `pages`, replacing whatever the collection held.
    ///
    /// # Errors
    ///
    /// Returns `IndexError::NoDocuments` for an empty page list,
    /// `IndexError::NoText` when nothing survives splitting, or provider and
    /// storage failures.
    pub async fn create_collection(&self, pages: &[Page]) -> Result<CollectionInfo, IndexError> {
        if pages.is_empty() {
            return Err(IndexError::NoDocuments);
        }

        let chunks = self.splitter.split_pages(pages);
        if chunks.is_empty() {
            return Err(IndexError::NoText);
        }

        let texts: Vec<String> = chunks.iter().map(|chunk| chunk.text.clone()).collect();
        let vectors = self.embeddings.embed_documents(&texts).await?;
        if vectors.len() != chunks.len() {
            return Err(ProviderError::Malformed(format!(
                "expected {} embeddings, got {}",
                chunks.len(),
                vectors.len()
            ))
            .into());
        }

        let records: Vec<NewChunk> = chunks
            .into_iter()
            .zip(vectors)
            .map(|(chunk, embedding)| NewChunk { chunk, embedding })
            .collect();
        let info = self
            .chunks
            .replace_collection(&self.name, &records, self.clock.now())
            .await?;

        tracing::info!(
            collection = %info.name,
            pages = pages.len(),
            chunks = info.chunk_count,
            "created collection"
        );
        Ok(info)
    }

    /// Best matching chunk for `text`, if the collection has any.
    ///
    /// # Errors
    ///
    /// Returns `IndexError::MissingCollection` if the collection was never
    /// created, or provider and storage failures.
    pub async fn query(&self, text: &str) -> Result<Option<ScoredChunk>, IndexError> {
        match self.search(text, 1).await {
            Ok(hits) => Ok(hits.into_iter().next()),
            Err(ProviderError::Storage(StorageError::NotFound)) => Err(IndexError::MissingCollection),
            Err(err) => Err(err.into()),
        }
    }

    #[must_use]
    pub fn retriever(&self) -> VectorRetriever {
        VectorRetriever {
            collection: self.clone(),
            top_k: DEFAULT_TOP_K,
        }
    }

    async fn search(&self, text: &str, limit: usize) -> Result<Vec<ScoredChunk>, ProviderError> {
        let query = self.embeddings.embed_query(text).await?;
        Ok(self.chunks.search(&self.name, &query, limit).await?)
    }
}

/// Top-k cosine retrieval over a `CollectionService`.
#[derive(Clone)]
pub struct VectorRetriever {
    collection: CollectionService,
    top_k: usize,
}

#[async_trait]
impl Retriever for VectorRetriever {
    async fn retrieve(&self, query: &str) -> Result<Vec<String>, ProviderError> {
        let hits = self.collection.search(query, self.top_k).await?;
        tracing::debug!(query, snippets = hits.len(), "retrieved context");
        Ok(hits.into_iter().map(|hit| hit.chunk.text).collect())
    }
}
