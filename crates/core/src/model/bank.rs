use thiserror::Error;

use crate::model::question::Question;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BankError {
    #[error("question {0:?} is already in the bank")]
    Duplicate(String),
}

/// Ordered, de-duplicated collection of questions for one quiz.
///
/// Two questions are duplicates when their trimmed texts are equal
/// (exact, case-sensitive). Reworded questions are not detected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a question unless its text is already present.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Duplicate` and leaves the bank unchanged when the
    /// trimmed question text matches an existing entry.
    pub fn try_push(&mut self, question: Question) -> Result<(), BankError> {
        if self.contains_text(question.normalized_text()) {
            return Err(BankError::Duplicate(question.normalized_text().to_string()));
        }
        self.questions.push(question);
        Ok(())
    }

    #[must_use]
    pub fn contains_text(&self, text: &str) -> bool {
        let text = text.trim();
        self.questions.iter().any(|q| q.normalized_text() == text)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}

impl<'a> IntoIterator for &'a QuestionBank {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::question::Choice;

    fn question(text: &str) -> Question {
        Question::new(
            text,
            vec![Choice::new("A", "yes"), Choice::new("B", "no")],
            "A",
            "",
        )
        .unwrap()
    }

    #[test]
    fn rejects_trimmed_duplicates() {
        let mut bank = QuestionBank::new();
        bank.try_push(question("What is Rust?")).unwrap();

        let err = bank.try_push(question("  What is Rust?\n")).unwrap_err();
        assert_eq!(err, BankError::Duplicate("What is Rust?".into()));
        assert_eq!(bank.len(), 1);
    }

    #[test]
    fn keeps_case_variants() {
        let mut bank = QuestionBank::new();
        bank.try_push(question("What is Rust?")).unwrap();
        bank.try_push(question("what is rust?")).unwrap();
        assert_eq!(bank.len(), 2);
    }

    #[test]
    fn preserves_insertion_order() {
        let mut bank = QuestionBank::new();
        for text in ["Q1", "Q2", "Q3"] {
            bank.try_push(question(text)).unwrap();
        }
        let texts: Vec<_> = bank.iter().map(Question::text).collect();
        assert_eq!(texts, ["Q1", "Q2", "Q3"]);
    }
}
