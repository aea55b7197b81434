//! Character-based text splitting with overlap.

use std::collections::VecDeque;

use thiserror::Error;

use crate::model::{Chunk, Page};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SplitterError {
    #[error("chunk size must be > 0")]
    ZeroChunkSize,
    #[error("chunk overlap ({overlap}) must be smaller than chunk size ({size})")]
    OverlapTooLarge { overlap: usize, size: usize },
}

/// Splits text on a literal separator and packs the pieces into chunks of at
/// most `chunk_size` characters, carrying up to `chunk_overlap` characters of
/// trailing pieces into the next chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSplitter {
    separator: String,
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Default for TextSplitter {
    fn default() -> Self {
        Self {
            separator: "\n\n".to_string(),
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

impl TextSplitter {
    /// # Errors
    ///
    /// Returns `SplitterError` if `chunk_size` is zero or not larger than
    /// `chunk_overlap`.
    pub fn new(
        separator: impl Into<String>,
        chunk_size: usize,
        chunk_overlap: usize,
    ) -> Result<Self, SplitterError> {
        if chunk_size == 0 {
            return Err(SplitterError::ZeroChunkSize);
        }
        if chunk_overlap >= chunk_size {
            return Err(SplitterError::OverlapTooLarge {
                overlap: chunk_overlap,
                size: chunk_size,
            });
        }
        Ok(Self {
            separator: separator.into(),
            chunk_size,
            chunk_overlap,
        })
    }

    /// Split one text into chunks.
    #[must_use]
    pub fn split_text(&self, text: &str) -> Vec<String> {
        let pieces: Vec<&str> = if self.separator.is_empty() {
            vec![text]
        } else {
            text.split(self.separator.as_str()).collect()
        };
        let pieces: Vec<&str> = pieces.into_iter().filter(|p| !p.is_empty()).collect();
        self.merge(&pieces)
    }

    /// Split every page, keeping the page's source and number on each chunk.
    #[must_use]
    pub fn split_pages(&self, pages: &[Page]) -> Vec<Chunk> {
        pages
            .iter()
            .flat_map(|page| {
                self.split_text(&page.text)
                    .into_iter()
                    .map(move |text| Chunk {
                        source: page.source.clone(),
                        page: page.number,
                        text,
                    })
            })
            .collect()
    }

    fn merge(&self, pieces: &[&str]) -> Vec<String> {
        let sep_len = self.separator.chars().count();
        let mut chunks = Vec::new();
        let mut window: VecDeque<(&str, usize)> = VecDeque::new();
        let mut total = 0usize;

        for &piece in pieces {
            let len = piece.chars().count();
            let joiner = if window.is_empty() { 0 } else { sep_len };

            if total + len + joiner > self.chunk_size {
                if total > self.chunk_size {
                    tracing::warn!(
                        size = total,
                        limit = self.chunk_size,
                        "created a chunk longer than the limit"
                    );
                }
                if !window.is_empty() {
                    if let Some(chunk) = self.join(&window) {
                        chunks.push(chunk);
                    }
                    while total > self.chunk_overlap
                        || (total > 0
                            && total + len + if window.is_empty() { 0 } else { sep_len }
                                > self.chunk_size)
                    {
                        let Some((_, first_len)) = window.pop_front() else {
                            break;
                        };
                        let dropped_sep = if window.is_empty() { 0 } else { sep_len };
                        total = total.saturating_sub(first_len + dropped_sep);
                    }
                }
            }

            window.push_back((piece, len));
            total += len + if window.len() > 1 { sep_len } else { 0 };
        }

        if let Some(chunk) = self.join(&window) {
            chunks.push(chunk);
        }
        chunks
    }

    fn join(&self, window: &VecDeque<(&str, usize)>) -> Option<String> {
        let joined = window
            .iter()
            .map(|(piece, _)| *piece)
            .collect::<Vec<_>>()
            .join(&self.separator);
        let trimmed = joined.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}
