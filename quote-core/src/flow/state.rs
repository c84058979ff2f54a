use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calculations::QuoteSummary;
use crate::{AnswerRecord, Field, Step, ValidationErrors, calculate_quote};

pub const SAVED_MESSAGE: &str = "Progress saved successfully!";
pub const SUBMITTED_MESSAGE: &str =
    "Quote request submitted successfully! Our team will contact you shortly.";
pub const EXPORT_FAILED_MESSAGE: &str = "Failed to generate the quote document. Please try again.";
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save progress. Please try again.";
pub const CLEAR_FAILED_MESSAGE: &str = "Failed to clear saved progress.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    Success,
    Info,
    Error,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn emailed_to(email: &str) -> Self {
        Self::info(format!("Quote would be emailed to {email}"))
    }

    pub fn exported_to(path: &Path) -> Self {
        Self::success(format!("Quote document saved to {}", path.display()))
    }

    /// `field` was edited while another step is on screen.
    pub fn answered_on_other_step(field: Field) -> Self {
        Self::error(format!(
            "{} is answered on {}; go there to change it.",
            field.label(),
            field.step()
        ))
    }
}

impl fmt::Display for Notice {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Everything the form shows at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub step: Step,
    pub record: AnswerRecord,

    /// Errors from the last failed attempt to leave the current step.
    pub errors: ValidationErrors,
    pub notice: Option<Notice>,

    /// Set while a document export is running.
    pub exporting: bool,
}

impl FormState {
    /// Annual premium for the current answers.
    pub fn quote(&self) -> String {
        calculate_quote(&self.record)
    }

    pub fn summary(&self) -> QuoteSummary {
        QuoteSummary::from_quote(&self.quote())
    }
}
