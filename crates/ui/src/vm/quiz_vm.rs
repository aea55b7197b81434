use quiz_core::model::QuizState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceVm {
    pub key: String,
    /// Rendered as `"{key}) {value}"`.
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub correct: bool,
    pub message: &'static str,
    pub explanation: String,
}

/// Everything the quiz screen renders for the current question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizVm {
    pub index: usize,
    pub total: usize,
    pub heading: String,
    pub choices: Vec<ChoiceVm>,
    pub feedback: Option<FeedbackVm>,
}

impl QuizVm {
    /// `None` when the quiz has no questions.
    #[must_use]
    pub fn from_state(state: &QuizState) -> Option<Self> {
        let question = state.current().ok()?;
        let index = state.current_index();
        let choices = question
            .choices()
            .iter()
            .map(|choice| ChoiceVm {
                key: choice.key().to_string(),
                label: choice.label(),
            })
            .collect();
        let feedback = state.last_result().map(|correct| FeedbackVm {
            correct,
            message: if correct { "Correct!" } else { "Incorrect!" },
            explanation: question.explanation().to_string(),
        });

        Some(Self {
            index,
            total: state.len(),
            heading: format!("{}. {}", index + 1, question.text()),
            choices,
            feedback,
        })
    }

    #[must_use]
    pub fn position_label(&self) -> String {
        format!("Question {} of {}", self.index + 1, self.total)
    }
}
