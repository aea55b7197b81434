#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use quiz_core::model::Page;
use services::{DocumentSource, EmbeddingProvider, IngestError, LanguageModel, ProviderError};

const VOCABULARY: [&str; 6] = ["photosynthesis", "light", "mitochondria", "energy", "cell", "war"];

/// Bag-of-words embeddings over a tiny fixed vocabulary.
#[derive(Default)]
pub struct KeywordEmbeddings {
    calls: AtomicUsize,
}

impl KeywordEmbeddings {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub fn keyword_vector(text: &str) -> Vec<f32> {
    let lower = text.to_lowercase();
    VOCABULARY
        .iter()
        .map(|word| lower.matches(word).count() as f32)
        .collect()
}

#[async_trait]
impl EmbeddingProvider for KeywordEmbeddings {
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|text| keyword_vector(text)).collect())
    }
}

/// Replays canned replies in order and records every prompt.
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn repeating(reply: &str, times: usize) -> Self {
        Self::new(std::iter::repeat_n(reply, times))
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(ProviderError::EmptyResponse("language model"))
    }
}

pub struct FailingModel;

#[async_trait]
impl LanguageModel for FailingModel {
    async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
        Err(ProviderError::Disabled)
    }
}

pub struct StaticPages(pub Vec<Page>);

impl DocumentSource for StaticPages {
    fn load_pages(&self) -> Result<Vec<Page>, IngestError> {
        Ok(self.0.clone())
    }
}

pub fn biology_pages() -> Vec<Page> {
    vec![
        Page::new("biology.pdf", 1, "Photosynthesis turns light into sugar."),
        Page::new("biology.pdf", 2, "Mitochondria release energy inside the cell."),
        Page::new("history.pdf", 1, "The war ended in 1945."),
    ]
}

pub fn question_json(text: &str, answer: &str) -> String {
    format!(
        r#"{{"question": "{text}", "choices": [{{"key": "A", "value": "Light"}}, {{"key": "B", "value": "Water"}}, {{"key": "C", "value": "Soil"}}, {{"key": "D", "value": "Wind"}}], "answer": "{answer}", "explanation": "Plants capture light."}}"#
    )
}

pub fn shared<T>(value: T) -> Arc<T> {
    Arc::new(value)
}
