use chrono::Utc;
use sqlx::SqlitePool;

use super::SqliteInitError;

struct Migration {
    version: i64,
    statements: &'static [&'static str],
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    statements: &[
        r"
        CREATE TABLE IF NOT EXISTS collections (
            name TEXT PRIMARY KEY,
            dimensions INTEGER NOT NULL CHECK (dimensions >= 0),
            created_at TEXT NOT NULL
        )
        ",
        r"
        CREATE TABLE IF NOT EXISTS chunks (
            id INTEGER PRIMARY KEY,
            collection TEXT NOT NULL REFERENCES collections(name) ON DELETE CASCADE,
            position INTEGER NOT NULL CHECK (position >= 0),
            source TEXT NOT NULL,
            page INTEGER NOT NULL CHECK (page >= 0),
            content TEXT NOT NULL,
            embedding BLOB NOT NULL
        )
        ",
        r"
        CREATE INDEX IF NOT EXISTS idx_chunks_collection_position
            ON chunks (collection, position)
        ",
        r"
        CREATE TABLE IF NOT EXISTS app_settings (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            provider TEXT,
            project TEXT,
            location TEXT,
            embedding_model TEXT,
            chat_model TEXT,
            api_key TEXT,
            api_base_url TEXT
        )
        ",
    ],
}];

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteInitError> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS schema_migrations (version INTEGER PRIMARY KEY, applied_at TEXT NOT NULL)",
    )
    .execute(pool)
    .await?;

    let current: Option<i64> = sqlx::query_scalar("SELECT MAX(version) FROM schema_migrations")
        .fetch_one(pool)
        .await?;
    let current = current.unwrap_or(0);

    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        apply(pool, migration)
            .await
            .map_err(|source| SqliteInitError::Migration {
                version: migration.version,
                source,
            })?;
        tracing::info!(version = migration.version, "applied sqlite migration");
    }

    Ok(())
}

async fn apply(pool: &SqlitePool, migration: &Migration) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for statement in migration.statements {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    sqlx::query("INSERT INTO schema_migrations (version, applied_at) VALUES (?1, ?2)")
        .bind(migration.version)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;
    tx.commit().await
}
