use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::repository::{
    ChunkRepository, CollectionInfo, NewChunk, ScoredChunk, StorageError, uniform_dimensions,
};
use crate::vector::{cosine_similarity, encode_embedding, top_k};

use super::SqliteRepository;
use super::mapping::{conn, map_chunk_row, map_collection_row, usize_to_i64};

#[async_trait]
impl ChunkRepository for SqliteRepository {
    async fn replace_collection(
        &self,
        name: &str,
        chunks: &[NewChunk],
        created_at: DateTime<Utc>,
    ) -> Result<CollectionInfo, StorageError> {
        let dimensions = uniform_dimensions(chunks)?;
        let mut tx = self.pool.begin().await.map_err(conn)?;

        sqlx::query("DELETE FROM chunks WHERE collection = ?1")
            .bind(name)
            .execute(&mut *tx)
            .await
            .map_err(conn)?;

        sqlx::query(
            r"
            INSERT INTO collections (name, dimensions, created_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(name) DO UPDATE SET
                dimensions = excluded.dimensions,
                created_at = excluded.created_at
            ",
        )
        .bind(name)
        .bind(usize_to_i64("dimensions", dimensions)?)
        .bind(created_at)
        .execute(&mut *tx)
        .await
        .map_err(conn)?;

        for (position, item) in chunks.iter().enumerate() {
            sqlx::query(
                r"
                INSERT INTO chunks (collection, position, source, page, content, embedding)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                ",
            )
            .bind(name)
            .bind(usize_to_i64("position", position)?)
            .bind(&item.chunk.source)
            .bind(i64::from(item.chunk.page))
            .bind(&item.chunk.text)
            .bind(encode_embedding(&item.embedding))
            .execute(&mut *tx)
            .await
            .map_err(conn)?;
        }

        tx.commit().await.map_err(conn)?;
        tracing::debug!(collection = name, chunks = chunks.len(), "replaced collection");

        Ok(CollectionInfo {
            name: name.to_string(),
            chunk_count: chunks.len() as u64,
            dimensions,
            created_at,
        })
    }

    async fn search(
        &self,
        name: &str,
        query: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredChunk>, StorageError> {
        let info = self
            .collection_info(name)
            .await?
            .ok_or(StorageError::NotFound)?;
        if info.chunk_count > 0 && query.len() != info.dimensions {
            return Err(StorageError::DimensionMismatch {
                expected: info.dimensions,
                got: query.len(),
            });
        }

        let rows = sqlx::query(
            r"
            SELECT source, page, content, embedding
            FROM chunks
            WHERE collection = ?1
            ORDER BY position
            ",
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let mut scored = Vec::with_capacity(rows.len());
        for row in &rows {
            let (chunk, embedding) = map_chunk_row(row)?;
            scored.push((cosine_similarity(query, &embedding), chunk));
        }

        Ok(top_k(scored, limit)
            .into_iter()
            .map(|(score, chunk)| ScoredChunk { chunk, score })
            .collect())
    }

    async fn collection_info(&self, name: &str) -> Result<Option<CollectionInfo>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT
                c.name,
                c.dimensions,
                c.created_at,
                (SELECT COUNT(*) FROM chunks WHERE collection = c.name) AS chunk_count
            FROM collections c
            WHERE c.name = ?1
            ",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_collection_row).transpose()
    }
}
