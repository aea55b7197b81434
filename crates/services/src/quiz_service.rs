use std::path::PathBuf;
use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::Page;
use storage::repository::{ChunkRepository, CollectionInfo};

use crate::ai::AiProviders;
use crate::collection_service::CollectionService;
use crate::error::{IndexError, IngestError, QuizServiceError};
use crate::ingest::{DocumentSource, PdfDocumentSource};
use crate::quiz_generator::{GeneratedQuiz, QuizGenerator};

/// One submission of the quiz builder form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuizBuildRequest {
    /// PDF files to index. Empty means "reuse the stored collection".
    pub documents: Vec<PathBuf>,
    pub topic: String,
    pub num_questions: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizBuildOutcome {
    pub quiz: GeneratedQuiz,
    pub collection: CollectionInfo,
}

/// Ingest, index, and generate in one call.
#[derive(Clone)]
pub struct QuizService {
    collection_name: String,
    clock: Clock,
    chunks: Arc<dyn ChunkRepository>,
    providers: Arc<dyn AiProviders>,
}

impl QuizService {
    #[must_use]
    pub fn new(
        collection_name: impl Into<String>,
        clock: Clock,
        chunks: Arc<dyn ChunkRepository>,
        providers: Arc<dyn AiProviders>,
    ) -> Self {
        Self {
            collection_name: collection_name.into(),
            clock,
            chunks,
            providers,
        }
    }

    #[must_use]
    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    /// Metadata of the stored collection, if any.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Index` on storage failures.
    pub async fn collection_info(&self) -> Result<Option<CollectionInfo>, QuizServiceError> {
        self.chunks
            .collection_info(&self.collection_name)
            .await
            .map_err(|err| IndexError::from(err).into())
    }

    /// Build a quiz from PDF paths.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Configuration` for a bad count before any
    /// file is read, or the first ingest, index, or provider failure.
    pub async fn build_quiz(
        &self,
        request: QuizBuildRequest,
    ) -> Result<QuizBuildOutcome, QuizServiceError> {
        let generator = QuizGenerator::new(&request.topic, request.num_questions)?;
        let source = PdfDocumentSource::new(request.documents);
        if source.is_empty() {
            return self.build_from_pages(&generator, None).await;
        }

        // PDF extraction is CPU-bound; keep it off the UI executor.
        let pages = tokio::task::spawn_blocking(move || source.load_pages())
            .await
            .map_err(IngestError::from)??;
        self.build_from_pages(&generator, Some(pages)).await
    }

    /// Build a quiz from any document source; `None` reuses the stored
    /// collection.
    ///
    /// # Errors
    ///
    /// See `build_quiz`.
    pub async fn build_with_source(
        &self,
        generator: &QuizGenerator,
        source: Option<&dyn DocumentSource>,
    ) -> Result<QuizBuildOutcome, QuizServiceError> {
        let pages = source.map(|source| source.load_pages()).transpose()?;
        self.build_from_pages(generator, pages).await
    }

    /// `None` means no documents were given; `Some` holds whatever the
    /// source produced, possibly nothing.
    async fn build_from_pages(
        &self,
        generator: &QuizGenerator,
        pages: Option<Vec<Page>>,
    ) -> Result<QuizBuildOutcome, QuizServiceError> {
        let given = pages.is_some();
        let pages = pages.unwrap_or_default();

        let reused = if pages.is_empty() {
            let existing = if given {
                None
            } else {
                self.collection_info().await?
            };
            match existing {
                Some(info) if info.chunk_count > 0 => Some(info),
                _ => return Err(IndexError::NoDocuments.into()),
            }
        } else {
            None
        };

        let embeddings = self.providers.embeddings().await?;
        let collection = CollectionService::new(
            self.collection_name.clone(),
            self.clock,
            Arc::clone(&self.chunks),
            embeddings,
        );
        let info = match reused {
            Some(info) => {
                tracing::info!(
                    collection = %info.name,
                    chunks = info.chunk_count,
                    "reusing stored collection"
                );
                info
            }
            None => collection.create_collection(&pages).await?,
        };

        let model = self.providers.language_model().await?;
        let quiz = generator
            .generate_quiz(&collection.retriever(), model.as_ref())
            .await?;

        Ok(QuizBuildOutcome {
            quiz,
            collection: info,
        })
    }
}
