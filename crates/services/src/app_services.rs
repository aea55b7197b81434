use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::ai::{AiProviders, SettingsAiProviders};
use crate::app_settings_service::AppSettingsService;
use crate::error::AppServicesError;
use crate::quiz_service::QuizService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    quiz: Arc<QuizService>,
    app_settings: Arc<AppSettingsService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and HTTP AI providers.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        collection: &str,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let providers: Arc<dyn AiProviders> =
            Arc::new(SettingsAiProviders::new(Arc::clone(&storage.app_settings)));
        Ok(Self::from_storage(&storage, collection, clock, providers))
    }

    /// Build services over an existing storage aggregate.
    #[must_use]
    pub fn from_storage(
        storage: &Storage,
        collection: &str,
        clock: Clock,
        providers: Arc<dyn AiProviders>,
    ) -> Self {
        let quiz = Arc::new(QuizService::new(
            collection,
            clock,
            Arc::clone(&storage.chunks),
            providers,
        ));
        let app_settings = Arc::new(AppSettingsService::new(Arc::clone(&storage.app_settings)));
        Self { quiz, app_settings }
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn app_settings(&self) -> Arc<AppSettingsService> {
        Arc::clone(&self.app_settings)
    }
}
