use quiz_core::model::{QuestionBank, QuestionCount, QuestionDraft};
use quiz_core::prompt::{effective_topic, join_context, render_quiz_prompt};

use crate::ai::LanguageModel;
use crate::collection_service::Retriever;
use crate::error::{GenerationError, QuizGeneratorError};

/// Tally of one generation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub requested: u32,
    pub accepted: u32,
    pub parse_failures: u32,
    pub invalid: u32,
    pub duplicates: u32,
}

impl GenerationReport {
    #[must_use]
    pub fn rejected(&self) -> u32 {
        self.parse_failures + self.invalid + self.duplicates
    }

    fn record(&mut self, err: &GenerationError) {
        match err {
            GenerationError::Parse(_) => self.parse_failures += 1,
            GenerationError::Invalid(_) => self.invalid += 1,
            GenerationError::Duplicate(_) => self.duplicates += 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedQuiz {
    pub bank: QuestionBank,
    pub report: GenerationReport,
}

/// Prompts a language model once per requested question and keeps the
/// replies that parse, validate, and are not duplicates.
#[derive(Clone, Debug)]
pub struct QuizGenerator {
    topic: String,
    count: QuestionCount,
}

impl QuizGenerator {
    /// # Errors
    ///
    /// Returns `QuizGeneratorError::Configuration` when `num_questions` is
    /// outside `1..=10`.
    pub fn new(topic: &str, num_questions: u32) -> Result<Self, QuizGeneratorError> {
        let count = QuestionCount::new(num_questions)?;
        Ok(Self {
            topic: effective_topic(topic).to_string(),
            count,
        })
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn count(&self) -> QuestionCount {
        self.count
    }

    /// Run `count` attempts. The bank may end up shorter than requested.
    ///
    /// # Errors
    ///
    /// Returns `QuizGeneratorError::Provider` as soon as retrieval or the
    /// model call fails; nothing generated so far is returned.
    pub async fn generate_quiz(
        &self,
        retriever: &dyn Retriever,
        model: &dyn LanguageModel,
    ) -> Result<GeneratedQuiz, QuizGeneratorError> {
        let mut bank = QuestionBank::new();
        let mut report = GenerationReport {
            requested: self.count.value(),
            ..GenerationReport::default()
        };

        for attempt in 1..=self.count.value() {
            let snippets = retriever.retrieve(&self.topic).await?;
            let prompt = render_quiz_prompt(&self.topic, &join_context(&snippets));
            let reply = model.generate(&prompt).await?;

            match accept_reply(&mut bank, &reply) {
                Ok(()) => report.accepted += 1,
                Err(err) => {
                    tracing::warn!(attempt, error = %err, "discarding generated question");
                    report.record(&err);
                }
            }
        }

        tracing::info!(
            topic = %self.topic,
            requested = report.requested,
            accepted = report.accepted,
            "quiz generated"
        );
        Ok(GeneratedQuiz { bank, report })
    }
}

fn accept_reply(bank: &mut QuestionBank, reply: &str) -> Result<(), GenerationError> {
    let draft: QuestionDraft = serde_json::from_str(strip_code_fence(reply))?;
    let question = draft.validate()?;
    bank.try_push(question)?;
    Ok(())
}

/// Unwrap a reply of the form ```` ```json\n{...}\n``` ````; anything else is
/// returned trimmed.
fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = body.strip_suffix("```") else {
        return trimmed;
    };
    // Info string (`json`), with or without a newline after it.
    body.trim_start_matches(|c: char| c.is_ascii_alphabetic()).trim()
}
