use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quiz_core::model::{AppSettings, Chunk};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::vector::{cosine_similarity, top_k};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("embedding has {got} dimensions, collection expects {expected}")]
    DimensionMismatch { expected: usize, got: usize },
}

/// A chunk paired with its embedding, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewChunk {
    pub chunk: Chunk,
    pub embedding: Vec<f32>,
}

/// A stored chunk returned by similarity search.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    /// Cosine similarity with the query vector.
    pub score: f32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionInfo {
    pub name: String,
    pub chunk_count: u64,
    pub dimensions: usize,
    pub created_at: DateTime<Utc>,
}

/// Vector store contract: named collections of embedded chunks.
#[async_trait]
pub trait ChunkRepository: Send + Sync {
    /// Drop whatever the collection held and store `chunks` in its place.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::DimensionMismatch` if the embeddings do not all
    /// share one length, or other storage errors.
    async fn replace_collection(
        &self,
        name: &str,
        chunks: &[NewChunk],
        created_at: DateTime<Utc>,
    ) -> Result<CollectionInfo, StorageError>;

    /// Best `limit` chunks by cosine similarity, highest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the collection does not exist,
    /// `StorageError::DimensionMismatch` if the query length is wrong, or
    /// other storage errors.
    async fn search(
        &self,
        name: &str,
        query: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredChunk>, StorageError>;

    /// Metadata for a collection, `None` if it was never created.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn collection_info(&self, name: &str) -> Result<Option<CollectionInfo>, StorageError>;
}

#[async_trait]
pub trait AppSettingsRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn get_settings(&self) -> Result<Option<AppSettings>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn save_settings(&self, settings: &AppSettings) -> Result<(), StorageError>;
}

/// Ensure every embedding has the same length and return it.
pub(crate) fn uniform_dimensions(chunks: &[NewChunk]) -> Result<usize, StorageError> {
    let Some(first) = chunks.first() else {
        return Ok(0);
    };
    let expected = first.embedding.len();
    for item in chunks {
        if item.embedding.len() != expected {
            return Err(StorageError::DimensionMismatch {
                expected,
                got: item.embedding.len(),
            });
        }
    }
    Ok(expected)
}

#[derive(Debug, Clone)]
struct MemoryCollection {
    info: CollectionInfo,
    chunks: Vec<NewChunk>,
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    collections: Arc<Mutex<HashMap<String, MemoryCollection>>>,
    settings: Arc<Mutex<Option<AppSettings>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChunkRepository for InMemoryRepository {
    async fn replace_collection(
        &self,
        name: &str,
        chunks: &[NewChunk],
        created_at: DateTime<Utc>,
    ) -> Result<CollectionInfo, StorageError> {
        let dimensions = uniform_dimensions(chunks)?;
        let info = CollectionInfo {
            name: name.to_string(),
            chunk_count: chunks.len() as u64,
            dimensions,
            created_at,
        };
        let mut guard = self
            .collections
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(
            name.to_string(),
            MemoryCollection {
                info: info.clone(),
                chunks: chunks.to_vec(),
            },
        );
        Ok(info)
    }

    async fn search(
        &self,
        name: &str,
        query: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredChunk>, StorageError> {
        let guard = self
            .collections
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let collection = guard.get(name).ok_or(StorageError::NotFound)?;
        if collection.info.chunk_count > 0 && query.len() != collection.info.dimensions {
            return Err(StorageError::DimensionMismatch {
                expected: collection.info.dimensions,
                got: query.len(),
            });
        }

        let scored = collection
            .chunks
            .iter()
            .map(|item| (cosine_similarity(query, &item.embedding), &item.chunk))
            .collect();
        Ok(top_k(scored, limit)
            .into_iter()
            .map(|(score, chunk)| ScoredChunk {
                chunk: chunk.clone(),
                score,
            })
            .collect())
    }

    async fn collection_info(&self, name: &str) -> Result<Option<CollectionInfo>, StorageError> {
        let guard = self
            .collections
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(name).map(|c| c.info.clone()))
    }
}

#[async_trait]
impl AppSettingsRepository for InMemoryRepository {
    async fn get_settings(&self) -> Result<Option<AppSettings>, StorageError> {
        let guard = self
            .settings
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save_settings(&self, settings: &AppSettings) -> Result<(), StorageError> {
        let mut guard = self
            .settings
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(settings.clone());
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub chunks: Arc<dyn ChunkRepository>,
    pub app_settings: Arc<dyn AppSettingsRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let chunks: Arc<dyn ChunkRepository> = Arc::new(repo.clone());
        let app_settings: Arc<dyn AppSettingsRepository> = Arc::new(repo);
        Self {
            chunks,
            app_settings,
        }
    }
}
