use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyQuestion,

    #[error("question must offer at least one choice")]
    NoChoices,

    #[error("choice key cannot be empty")]
    EmptyChoiceKey,

    #[error("choice key {0:?} appears more than once")]
    DuplicateChoiceKey(String),

    #[error("answer {0:?} does not match any choice key")]
    UnknownAnswer(String),
}

//
// ─── CHOICE ────────────────────────────────────────────────────────────────────
//

/// One labelled option of a multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    key: String,
    value: String,
}

impl Choice {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Display label used by the quiz screen, e.g. `"B) Paris"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}{CHOICE_LABEL_SEPARATOR}{}", self.key, self.value)
    }
}

/// Separator between a choice key and its text in a rendered label.
pub const CHOICE_LABEL_SEPARATOR: &str = ") ";

/// Recover the choice key from a rendered label (`"B) Paris"` -> `"B"`).
///
/// A label without the separator is returned unchanged.
#[must_use]
pub fn key_from_label(label: &str) -> &str {
    label
        .split_once(CHOICE_LABEL_SEPARATOR)
        .map_or(label, |(key, _)| key)
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A validated multiple-choice question.
///
/// The question text is non-empty, choice keys are non-empty and unique, and
/// the answer names exactly one choice key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    question: String,
    choices: Vec<Choice>,
    answer: String,
    explanation: String,
}

impl Question {
    /// Build a question, enforcing the question invariants.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the text is blank, there are no choices,
    /// a choice key is blank or repeated, or the answer is not a choice key.
    pub fn new(
        question: impl Into<String>,
        choices: Vec<Choice>,
        answer: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let question = question.into();
        let answer = answer.into();

        if question.trim().is_empty() {
            return Err(QuestionError::EmptyQuestion);
        }
        if choices.is_empty() {
            return Err(QuestionError::NoChoices);
        }
        for (idx, choice) in choices.iter().enumerate() {
            if choice.key.trim().is_empty() {
                return Err(QuestionError::EmptyChoiceKey);
            }
            if choices[..idx].iter().any(|prev| prev.key == choice.key) {
                return Err(QuestionError::DuplicateChoiceKey(choice.key.clone()));
            }
        }
        if !choices.iter().any(|choice| choice.key == answer) {
            return Err(QuestionError::UnknownAnswer(answer));
        }

        Ok(Self {
            question,
            choices,
            answer,
            explanation: explanation.into(),
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.question
    }

    /// Question text with surrounding whitespace removed; the dedup key.
    #[must_use]
    pub fn normalized_text(&self) -> &str {
        self.question.trim()
    }

    #[must_use]
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Exact, case-sensitive comparison against the answer key.
    #[must_use]
    pub fn is_correct(&self, key: &str) -> bool {
        self.answer == key
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Loosely-typed question as returned by a language model.
///
/// Every field is optional so that a reply with a missing key still parses and
/// is rejected by validation instead of by the JSON decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QuestionDraft {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl QuestionDraft {
    /// Validate the draft into a `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the draft breaks a question invariant.
    pub fn validate(self) -> Result<Question, QuestionError> {
        let question = self.question.ok_or(QuestionError::EmptyQuestion)?;
        let answer = self.answer.unwrap_or_default();
        Question::new(
            question,
            self.choices,
            answer,
            self.explanation.unwrap_or_default(),
        )
    }
}
