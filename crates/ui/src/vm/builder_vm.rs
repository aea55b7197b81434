use std::path::PathBuf;

use quiz_core::model::QuestionCount;
use services::{GenerationReport, QuizBuildRequest};

/// Raw builder form input, kept as typed by the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuilderForm {
    pub documents: String,
    pub topic: String,
    pub num_questions: u32,
}

impl Default for BuilderForm {
    fn default() -> Self {
        Self {
            documents: String::new(),
            topic: String::new(),
            num_questions: QuestionCount::default().value(),
        }
    }
}

impl BuilderForm {
    #[must_use]
    pub fn to_request(&self) -> QuizBuildRequest {
        QuizBuildRequest {
            documents: parse_document_paths(&self.documents),
            topic: self.topic.trim().to_string(),
            num_questions: self.num_questions,
        }
    }
}

/// One path per line; blank lines are skipped and surrounding quotes (as
/// left by "copy as path" in file managers) are removed.
#[must_use]
pub fn parse_document_paths(raw: &str) -> Vec<PathBuf> {
    raw.lines()
        .map(str::trim)
        .map(|line| {
            line.strip_prefix('"')
                .and_then(|rest| rest.strip_suffix('"'))
                .or_else(|| line.strip_prefix('\'').and_then(|rest| rest.strip_suffix('\'')))
                .unwrap_or(line)
                .trim()
        })
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Status line shown after a build, e.g. "Generated 3 of 5 questions".
#[must_use]
pub fn build_summary(report: &GenerationReport) -> String {
    let noun = if report.requested == 1 { "question" } else { "questions" };
    if report.accepted == report.requested {
        format!("Generated {} {noun}", report.accepted)
    } else {
        format!(
            "Generated {} of {} {noun} ({} discarded)",
            report.accepted,
            report.requested,
            report.rejected()
        )
    }
}
