use async_trait::async_trait;
use sqlx::Row;

use crate::repository::{AppSettingsRepository, StorageError};
use quiz_core::model::{AppSettings, AppSettingsDraft};

use super::SqliteRepository;
use super::mapping::{conn, ser};

#[async_trait]
impl AppSettingsRepository for SqliteRepository {
    async fn get_settings(&self) -> Result<Option<AppSettings>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT
                provider,
                project,
                location,
                embedding_model,
                chat_model,
                api_key,
                api_base_url
            FROM app_settings
            WHERE id = 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let draft = AppSettingsDraft {
            provider: row.try_get("provider").map_err(ser)?,
            project: row.try_get("project").map_err(ser)?,
            location: row.try_get("location").map_err(ser)?,
            embedding_model: row.try_get("embedding_model").map_err(ser)?,
            chat_model: row.try_get("chat_model").map_err(ser)?,
            api_key: row.try_get("api_key").map_err(ser)?,
            api_base_url: row.try_get("api_base_url").map_err(ser)?,
        };

        AppSettings::from_persisted(draft).map(Some).map_err(ser)
    }

    async fn save_settings(&self, settings: &AppSettings) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO app_settings (
                id,
                provider,
                project,
                location,
                embedding_model,
                chat_model,
                api_key,
                api_base_url
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(id) DO UPDATE SET
                provider = excluded.provider,
                project = excluded.project,
                location = excluded.location,
                embedding_model = excluded.embedding_model,
                chat_model = excluded.chat_model,
                api_key = excluded.api_key,
                api_base_url = excluded.api_base_url
            ",
        )
        .bind(1_i64)
        .bind(settings.provider().map(|p| p.as_str()))
        .bind(settings.project())
        .bind(settings.location())
        .bind(settings.embedding_model())
        .bind(settings.chat_model())
        .bind(settings.api_key())
        .bind(settings.api_base_url())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }
}
