//! Document loading: files in, page texts out.

use std::fs;
use std::path::{Path, PathBuf};

use quiz_core::model::Page;

use crate::error::IngestError;

/// Anything that can produce page texts for indexing.
pub trait DocumentSource: Send + Sync {
    /// # Errors
    ///
    /// Returns `IngestError` naming the document that could not be read.
    fn load_pages(&self) -> Result<Vec<Page>, IngestError>;
}

/// PDF files on disk, read in the order given.
#[derive(Clone, Debug, Default)]
pub struct PdfDocumentSource {
    paths: Vec<PathBuf>,
}

impl PdfDocumentSource {
    #[must_use]
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl DocumentSource for PdfDocumentSource {
    fn load_pages(&self) -> Result<Vec<Page>, IngestError> {
        let mut pages = Vec::new();
        for path in &self.paths {
            let bytes = fs::read(path).map_err(|source| IngestError::Io {
                path: path.display().to_string(),
                source,
            })?;
            let loaded = pdf_pages(&display_name(path), &bytes)?;
            tracing::info!(document = %path.display(), pages = loaded.len(), "loaded document");
            pages.extend(loaded);
        }
        Ok(pages)
    }
}

/// Extract one `Page` per PDF page from in-memory bytes, dropping blank pages.
///
/// # Errors
///
/// Returns `IngestError::Pdf` if the bytes are not a readable PDF.
pub fn pdf_pages(name: &str, bytes: &[u8]) -> Result<Vec<Page>, IngestError> {
    let texts = pdf_extract::extract_text_from_mem_by_pages(bytes).map_err(|err| {
        IngestError::Pdf {
            name: name.to_string(),
            message: err.to_string(),
        }
    })?;

    Ok(texts
        .into_iter()
        .zip(1_u32..)
        .map(|(text, number)| Page::new(name, number, text))
        .filter(|page| !page.is_blank())
        .collect())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}
