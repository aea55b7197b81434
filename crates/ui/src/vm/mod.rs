mod builder_vm;
mod quiz_vm;

pub use builder_vm::{BuilderForm, build_summary, parse_document_paths};
pub use quiz_vm::{ChoiceVm, FeedbackVm, QuizVm};
