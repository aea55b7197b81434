use chrono::{DateTime, Utc};
use quiz_core::model::Chunk;
use sqlx::Row;

use crate::repository::{CollectionInfo, StorageError};
use crate::vector::decode_embedding;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

pub(crate) fn usize_to_i64(field: &'static str, v: usize) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

fn i64_to_u32(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

fn i64_to_usize(field: &'static str, v: i64) -> Result<usize, StorageError> {
    usize::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

pub(crate) fn map_chunk_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<(Chunk, Vec<f32>), StorageError> {
    let page: i64 = row.try_get("page").map_err(ser)?;
    let chunk = Chunk {
        source: row.try_get("source").map_err(ser)?,
        page: i64_to_u32("page", page)?,
        text: row.try_get("content").map_err(ser)?,
    };
    let blob: Vec<u8> = row.try_get("embedding").map_err(ser)?;
    Ok((chunk, decode_embedding(&blob)?))
}

pub(crate) fn map_collection_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<CollectionInfo, StorageError> {
    let dimensions: i64 = row.try_get("dimensions").map_err(ser)?;
    let chunk_count: i64 = row.try_get("chunk_count").map_err(ser)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(ser)?;
    Ok(CollectionInfo {
        name: row.try_get("name").map_err(ser)?,
        chunk_count: u64::try_from(chunk_count)
            .map_err(|_| StorageError::Serialization(format!("invalid chunk_count: {chunk_count}")))?,
        dimensions: i64_to_usize("dimensions", dimensions)?,
        created_at,
    })
}
