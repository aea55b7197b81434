use serde::{Deserialize, Serialize};

/// Text of one page of an ingested document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub source: String,
    /// 1-based page number within `source`.
    pub number: u32,
    pub text: String,
}

impl Page {
    #[must_use]
    pub fn new(source: impl Into<String>, number: u32, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            number,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A bounded slice of page text, ready to be embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub source: String,
    pub page: u32,
    pub text: String,
}
