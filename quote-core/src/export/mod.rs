//! Quote document export.
//!
//! The core only describes what gets exported and how the file is named.
//! Rendering and writing live with the concrete [`QuoteExporter`].

use std::path::PathBuf;
use std::sync::LazyLock;

use async_trait::async_trait;
use chrono::NaiveDate;
use regex::Regex;
use thiserror::Error;

use crate::calculations::QuoteSummary;
use crate::{AnswerRecord, calculate_quote};

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Path separators, characters reserved on common file systems, and control
/// characters.
static RESERVED_CHAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[/\\:*?"<>|\p{Cc}]"#).expect("reserved character pattern is valid")
});

const FILE_NAME_PREFIX: &str = "Motor-Insurance-Quote";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to render quote document: {0}")]
    Render(String),

    #[error("invalid export request: {0}")]
    InvalidRequest(String),
}

/// Everything a quote document shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub record: AnswerRecord,

    /// Annual premium as returned by [`calculate_quote`].
    pub quote: String,
    pub summary: QuoteSummary,
    pub generated_on: NaiveDate,
}

impl ExportRequest {
    /// Snapshots `record` and derives the premium figures from it.
    pub fn new(
        record: AnswerRecord,
        generated_on: NaiveDate,
    ) -> Self {
        let quote = calculate_quote(&record);
        let summary = QuoteSummary::from_quote(&quote);

        Self {
            record,
            quote,
            summary,
            generated_on,
        }
    }

    /// File name for this request with the given extension.
    pub fn file_name(
        &self,
        extension: &str,
    ) -> String {
        export_file_name(&self.record.full_name, self.generated_on, extension)
    }

    /// # Errors
    ///
    /// [`ExportError::InvalidRequest`] when the full name is blank, since it
    /// names the file.
    pub fn validate(&self) -> Result<(), ExportError> {
        if self.record.full_name.trim().is_empty() {
            return Err(ExportError::InvalidRequest(
                "full name is required to name the document".to_string(),
            ));
        }
        Ok(())
    }
}

/// Renders an [`ExportRequest`] to a document and returns where it went.
#[async_trait]
pub trait QuoteExporter: Send + Sync {
    async fn export(
        &self,
        request: &ExportRequest,
    ) -> Result<PathBuf, ExportError>;
}

/// `Motor-Insurance-Quote-{name}-{YYYY-MM-DD}.{extension}`.
///
/// Every run of whitespace in `full_name` becomes a single hyphen, and so
/// does each path separator, reserved character (`\ : * ? " < > |`) or
/// control character, so the result is always one plain file name.
pub fn export_file_name(
    full_name: &str,
    date: NaiveDate,
    extension: &str,
) -> String {
    let name = WHITESPACE_RUN.replace_all(full_name, "-");
    let name = RESERVED_CHAR.replace_all(&name, "-");
    format!(
        "{FILE_NAME_PREFIX}-{name}-{}.{extension}",
        date.format("%Y-%m-%d")
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::Field;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn file_name_hyphenates_whitespace_runs() {
        assert_eq!(
            export_file_name("Watu  Mwila\tMatuze", date(), "pdf"),
            "Motor-Insurance-Quote-Watu-Mwila-Matuze-2024-03-09.pdf"
        );
    }

    #[test]
    fn file_name_keeps_leading_and_trailing_runs() {
        assert_eq!(
            export_file_name(" Watu ", date(), "txt"),
            "Motor-Insurance-Quote--Watu--2024-03-09.txt"
        );
    }

    #[test]
    fn file_name_replaces_path_separators() {
        assert_eq!(
            export_file_name("AC/DC Transport", date(), "txt"),
            "Motor-Insurance-Quote-AC-DC-Transport-2024-03-09.txt"
        );
        assert_eq!(
            export_file_name("../../etc/passwd", date(), "txt"),
            "Motor-Insurance-Quote-..-..-etc-passwd-2024-03-09.txt"
        );
    }

    #[test]
    fn file_name_replaces_reserved_and_control_characters() {
        assert_eq!(
            export_file_name("a\\b:c*d?e\"f<g>h|i\u{7}j", date(), "txt"),
            "Motor-Insurance-Quote-a-b-c-d-e-f-g-h-i-j-2024-03-09.txt"
        );
    }

    #[test]
    fn request_derives_quote_and_summary() {
        let record = AnswerRecord::new()
            .with(Field::FullName, "Watu Matuze")
            .with(Field::CoverageType, "comprehensive")
            .with(Field::VehicleValue, "0")
            .with(Field::VehicleUsage, "commercial");

        let request = ExportRequest::new(record, date());

        assert_eq!(request.quote, "1950.00");
        assert_eq!(request.summary.monthly, dec!(162.5));
        assert_eq!(
            request.file_name("txt"),
            "Motor-Insurance-Quote-Watu-Matuze-2024-03-09.txt"
        );
        assert!(request.validate().is_ok());
    }

    #[test]
    fn blank_name_is_an_invalid_request() {
        let request = ExportRequest::new(AnswerRecord::new().with(Field::FullName, "  "), date());

        assert!(matches!(
            request.validate(),
            Err(ExportError::InvalidRequest(_))
        ));
    }
}
