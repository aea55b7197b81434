use thiserror::Error;

use crate::model::bank::QuestionBank;
use crate::model::question::Question;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizStateError {
    #[error("empty question bank")]
    EmptyBank,
}

/// Navigation step through a quiz.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    #[must_use]
    pub fn offset(self) -> i64 {
        match self {
            Self::Next => 1,
            Self::Previous => -1,
        }
    }
}

/// Quiz progress over an immutable question bank.
///
/// Indices wrap around the bank length in both directions. Every accessor
/// fails with `QuizStateError::EmptyBank` instead of dividing by zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizState {
    questions: QuestionBank,
    current_index: usize,
    last_result: Option<bool>,
}

impl QuizState {
    #[must_use]
    pub fn new(questions: QuestionBank) -> Self {
        Self {
            questions,
            current_index: 0,
            last_result: None,
        }
    }

    #[must_use]
    pub fn questions(&self) -> &QuestionBank {
        &self.questions
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
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Outcome of the last submitted answer, cleared on navigation.
    #[must_use]
    pub fn last_result(&self) -> Option<bool> {
        self.last_result
    }

    /// Question at `index mod len`.
    ///
    /// # Errors
    ///
    /// Returns `QuizStateError::EmptyBank` when there are no questions.
    pub fn get(&self, index: i64) -> Result<&Question, QuizStateError> {
        let slot = self.wrap(index)?;
        self.questions.get(slot).ok_or(QuizStateError::EmptyBank)
    }

    /// # Errors
    ///
    /// Returns `QuizStateError::EmptyBank` when there are no questions.
    pub fn current(&self) -> Result<&Question, QuizStateError> {
        self.questions
            .get(self.current_index)
            .ok_or(QuizStateError::EmptyBank)
    }

    /// Move one question forward or back, wrapping at either end.
    ///
    /// Returns the new index.
    ///
    /// # Errors
    ///
    /// Returns `QuizStateError::EmptyBank` when there are no questions.
    pub fn advance(&mut self, direction: Direction) -> Result<usize, QuizStateError> {
        let current = i64::try_from(self.current_index).unwrap_or(i64::MAX);
        let next = self.wrap(current.saturating_add(direction.offset()))?;
        self.current_index = next;
        self.last_result = None;
        Ok(next)
    }

    /// Compare `key` with the current question's answer key.
    ///
    /// # Errors
    ///
    /// Returns `QuizStateError::EmptyBank` when there are no questions.
    pub fn check_answer(&self, key: &str) -> Result<bool, QuizStateError> {
        Ok(self.current()?.is_correct(key))
    }

    /// Check `key` and remember the outcome as `last_result`.
    ///
    /// # Errors
    ///
    /// Returns `QuizStateError::EmptyBank` when there are no questions.
    pub fn submit_answer(&mut self, key: &str) -> Result<bool, QuizStateError> {
        let correct = self.check_answer(key)?;
        self.last_result = Some(correct);
        Ok(correct)
    }

    fn wrap(&self, index: i64) -> Result<usize, QuizStateError> {
        let len = i64::try_from(self.questions.len()).unwrap_or(i64::MAX);
        if len == 0 {
            return Err(QuizStateError::EmptyBank);
        }
        let slot = index.rem_euclid(len);
        usize::try_from(slot).map_err(|_| QuizStateError::EmptyBank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::question::Choice;

    fn abcd() -> Vec<Choice> {
        vec![
            Choice::new("A", "x"),
            Choice::new("B", "y"),
            Choice::new("C", "z"),
            Choice::new("D", "w"),
        ]
    }

    fn bank(texts: &[&str]) -> QuestionBank {
        let mut bank = QuestionBank::new();
        for text in texts {
            bank.try_push(Question::new(*text, abcd(), "B", "e").unwrap())
                .unwrap();
        }
        bank
    }

    #[test]
    fn single_question_bank_wraps_every_index() {
        let state = QuizState::new(bank(&["Q1"]));
        assert_eq!(state.get(0).unwrap().text(), "Q1");
        assert_eq!(state.get(5).unwrap().text(), "Q1");
        assert_eq!(state.get(-3).unwrap().text(), "Q1");
    }

    #[test]
    fn get_obeys_wrap_around_law() {
        let state = QuizState::new(bank(&["Q1", "Q2", "Q3"]));
        let len = 3_i64;
        for index in -7..7 {
            for k in -3..=3 {
                assert_eq!(
                    state.get(index).unwrap(),
                    state.get(index + k * len).unwrap(),
                    "index {index}, k {k}"
                );
            }
        }
    }

    #[test]
    fn next_then_previous_round_trips() {
        let mut state = QuizState::new(bank(&["Q1", "Q2", "Q3"]));
        for start in 0..3 {
            while state.current_index() != start {
                state.advance(Direction::Next).unwrap();
            }
            state.advance(Direction::Next).unwrap();
            state.advance(Direction::Previous).unwrap();
            assert_eq!(state.current_index(), start);
        }
    }

    #[test]
    fn previous_from_first_wraps_to_last() {
        let mut state = QuizState::new(bank(&["Q1", "Q2", "Q3"]));
        assert_eq!(state.advance(Direction::Previous).unwrap(), 2);
        assert_eq!(state.current().unwrap().text(), "Q3");
        assert_eq!(state.advance(Direction::Next).unwrap(), 0);
    }

    #[test]
    fn check_answer_is_exact_match() {
        let state = QuizState::new(bank(&["Q1"]));
        assert!(state.check_answer("B").unwrap());
        assert!(!state.check_answer("A").unwrap());
        assert!(!state.check_answer("b").unwrap());
    }

    #[test]
    fn navigation_clears_last_result() {
        let mut state = QuizState::new(bank(&["Q1", "Q2"]));
        assert!(state.submit_answer("B").unwrap());
        assert_eq!(state.last_result(), Some(true));
        state.advance(Direction::Next).unwrap();
        assert_eq!(state.last_result(), None);
    }

    #[test]
    fn empty_bank_fails_cleanly() {
        let mut state = QuizState::new(QuestionBank::new());
        assert_eq!(state.get(0).unwrap_err(), QuizStateError::EmptyBank);
        assert_eq!(
            state.advance(Direction::Next).unwrap_err(),
            QuizStateError::EmptyBank
        );
        assert_eq!(state.check_answer("A").unwrap_err(), QuizStateError::EmptyBank);
        assert_eq!(state.current_index(), 0);
    }
}
