mod app_settings;
mod bank;
mod count;
mod document;
mod question;
mod quiz_state;
mod session;

pub use app_settings::{AiProvider, AppSettings, AppSettingsDraft, AppSettingsError};
pub use bank::{BankError, QuestionBank};
pub use count::{QuestionCount, QuestionCountError};
pub use document::{Chunk, Page};
pub use question::{
    CHOICE_LABEL_SEPARATOR, Choice, Question, QuestionDraft, QuestionError, key_from_label,
};
pub use quiz_state::{Direction, QuizState, QuizStateError};
pub use session::{QuizSession, Screen};
