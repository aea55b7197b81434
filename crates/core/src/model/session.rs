use crate::model::bank::QuestionBank;
use crate::model::question::Question;
use crate::model::quiz_state::{Direction, QuizState, QuizStateError};

/// Which screen the UI should show for a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Builder,
    Quiz,
}

/// Session-scoped quiz state.
///
/// Created when a user session starts and mutated only through `start`,
/// `advance`, `submit_answer` and `end`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizSession {
    quiz: Option<QuizState>,
}

impl QuizSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any running quiz with a fresh one at index 0.
    pub fn start(&mut self, bank: QuestionBank) {
        tracing::debug!(questions = bank.len(), "starting quiz");
        self.quiz = Some(QuizState::new(bank));
    }

    pub fn end(&mut self) {
        self.quiz = None;
    }

    #[must_use]
    pub fn quiz(&self) -> Option<&QuizState> {
        self.quiz.as_ref()
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        match &self.quiz {
            Some(quiz) if !quiz.is_empty() => Screen::Quiz,
            _ => Screen::Builder,
        }
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.quiz.as_ref().and_then(|quiz| quiz.current().ok())
    }

    /// # Errors
    ///
    /// Returns `QuizStateError::EmptyBank` when no quiz with questions is running.
    pub fn advance(&mut self, direction: Direction) -> Result<usize, QuizStateError> {
        self.quiz
            .as_mut()
            .ok_or(QuizStateError::EmptyBank)?
            .advance(direction)
    }

    /// # Errors
    ///
    /// Returns `QuizStateError::EmptyBank` when no quiz with questions is running.
    pub fn submit_answer(&mut self, key: &str) -> Result<bool, QuizStateError> {
        self.quiz
            .as_mut()
            .ok_or(QuizStateError::EmptyBank)?
            .submit_answer(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::question::Choice;

    fn bank(texts: &[&str]) -> QuestionBank {
        let mut bank = QuestionBank::new();
        for text in texts {
            let q = Question::new(
                *text,
                vec![Choice::new("A", "one"), Choice::new("B", "two")],
                "A",
                "",
            )
            .unwrap();
            bank.try_push(q).unwrap();
        }
        bank
    }

    #[test]
    fn starts_on_builder_screen() {
        let session = QuizSession::new();
        assert_eq!(session.screen(), Screen::Builder);
        assert!(session.current_question().is_none());
    }

    #[test]
    fn new_bank_resets_index() {
        let mut session = QuizSession::new();
        session.start(bank(&["Q1", "Q2", "Q3"]));
        session.advance(Direction::Next).unwrap();
        session.advance(Direction::Next).unwrap();
        assert_eq!(session.quiz().unwrap().current_index(), 2);

        session.start(bank(&["R1", "R2"]));
        assert_eq!(session.quiz().unwrap().current_index(), 0);
        assert_eq!(session.current_question().unwrap().text(), "R1");
        assert_eq!(session.screen(), Screen::Quiz);
    }

    #[test]
    fn empty_bank_stays_on_builder() {
        let mut session = QuizSession::new();
        session.start(QuestionBank::new());
        assert_eq!(session.screen(), Screen::Builder);
        assert_eq!(
            session.submit_answer("A").unwrap_err(),
            QuizStateError::EmptyBank
        );
    }

    #[test]
    fn submit_records_result() {
        let mut session = QuizSession::new();
        session.start(bank(&["Q1"]));
        assert!(!session.submit_answer("B").unwrap());
        assert_eq!(session.quiz().unwrap().last_result(), Some(false));
        session.end();
        assert!(session.quiz().is_none());
    }
}
