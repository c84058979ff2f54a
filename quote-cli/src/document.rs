//! Quote document rendering from the embedded Tera template.

use std::collections::HashMap;
use std::error::Error as _;

use quote_core::calculations::common::{format_amount, parse_lenient_decimal};
use quote_core::{AnswerRecord, ExportError, ExportRequest, QuoteSummary};
use rust_decimal::Decimal;
use serde::Serialize;
use tera::{Context, Tera, Value};

use crate::render::{CURRENCY, coverage_title, usage_title};

pub const TEMPLATE_NAME: &str = "quote_document.txt";

const TEMPLATE: &str = include_str!("../templates/quote_document.txt.tera");

/// Registers the filters the quote template uses.
///
/// - `money`: two-decimal amount, e.g. `summary.monthly | money`
pub fn register_template_filters(tera: &mut Tera) {
    tera.register_filter("money", money_filter);
}

/// Accepts numbers and numeric strings; `null` renders as `0.00`.
fn money_filter(
    value: &Value,
    _args: &HashMap<String, Value>,
) -> tera::Result<Value> {
    let amount = match value {
        Value::String(s) => parse_lenient_decimal(s),
        Value::Number(n) => parse_lenient_decimal(&n.to_string()),
        Value::Null => Decimal::ZERO,
        other => {
            return Err(tera::Error::msg(format!(
                "money filter expects a number, got {other}"
            )));
        }
    };
    Ok(Value::String(format_amount(amount)))
}

/// What the template sees.
#[derive(Debug, Serialize)]
struct DocumentView<'a> {
    record: &'a AnswerRecord,
    coverage: &'a str,
    usage: &'a str,
    quote: &'a str,
    summary: &'a QuoteSummary,
    generated_on: String,
    currency: &'static str,
}

impl<'a> From<&'a ExportRequest> for DocumentView<'a> {
    fn from(request: &'a ExportRequest) -> Self {
        Self {
            record: &request.record,
            coverage: coverage_title(&request.record),
            usage: usage_title(&request.record),
            quote: &request.quote,
            summary: &request.summary,
            generated_on: request.generated_on.format("%Y-%m-%d").to_string(),
            currency: CURRENCY,
        }
    }
}

/// Flattens a Tera error and its causes into one line.
fn render_error(err: tera::Error) -> ExportError {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    ExportError::Render(message)
}

#[derive(Debug, Clone)]
pub struct DocumentRenderer {
    tera: Tera,
}

impl DocumentRenderer {
    /// Loads the embedded quote template.
    ///
    /// # Errors
    ///
    /// [`ExportError::Render`] if the template does not parse.
    pub fn new() -> Result<Self, ExportError> {
        Self::with_template(TEMPLATE)
    }

    fn with_template(template: &str) -> Result<Self, ExportError> {
        let mut tera = Tera::default();
        register_template_filters(&mut tera);
        tera.add_raw_template(TEMPLATE_NAME, template)
            .map_err(render_error)?;
        Ok(Self { tera })
    }

    pub fn render(
        &self,
        request: &ExportRequest,
    ) -> Result<String, ExportError> {
        let context = Context::from_serialize(DocumentView::from(request)).map_err(render_error)?;
        self.tera.render(TEMPLATE_NAME, &context).map_err(render_error)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use quote_core::Field;

    use super::*;

    fn request() -> ExportRequest {
        let record = AnswerRecord::new()
            .with(Field::FullName, "Watu Matuze")
            .with(Field::VehicleMake, "Toyota")
            .with(Field::VehicleModel, "Corolla")
            .with(Field::YearOfManufacture, "2020")
            .with(Field::CoverageType, "third-party-fire-theft")
            .with(Field::VehicleValue, "10000")
            .with(Field::VehicleUsage, "commercial");
        ExportRequest::new(record, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap())
    }

    #[test]
    fn document_has_date_answers_and_figures() {
        let doc = DocumentRenderer::new().unwrap().render(&request()).unwrap();

        assert!(doc.starts_with("MOTOR INSURANCE QUOTE\nGenerated: 2024-12-01\n"));
        assert!(doc.contains("Name:           Watu Matuze"));
        assert!(doc.contains("Vehicle:        Toyota Corolla (2020)"));
        assert!(doc.contains("Type:           Third Party + Fire & Theft"));
        assert!(doc.contains("Usage:          Commercial Use"));
        // (800 + 500) × 1.3
        assert!(doc.contains("Annual Premium:   ZMW 1690.00"));
        assert!(doc.contains("Monthly:          ZMW 140.83"));
        assert!(doc.contains("You save ZMW 253.50 compared to standard rates"));
    }

    #[test]
    fn text_is_not_html_escaped() {
        let mut request = request();
        request.record.full_name = "O'Brien & <Sons>".to_string();

        let doc = DocumentRenderer::new().unwrap().render(&request).unwrap();

        assert!(doc.contains("Name:           O'Brien & <Sons>"));
    }

    #[test]
    fn money_filter_formats_two_decimals() {
        let args = HashMap::new();

        assert_eq!(
            money_filter(&Value::String("162.5".to_string()), &args).unwrap(),
            Value::String("162.50".to_string())
        );
        assert_eq!(
            money_filter(&serde_json::json!(1690), &args).unwrap(),
            Value::String("1690.00".to_string())
        );
        assert_eq!(
            money_filter(&Value::Null, &args).unwrap(),
            Value::String("0.00".to_string())
        );
        assert!(money_filter(&serde_json::json!([1]), &args).is_err());
    }

    #[test]
    fn broken_template_is_a_render_error() {
        let result = DocumentRenderer::with_template("{{ record.fullName ");

        assert!(matches!(result, Err(ExportError::Render(_))));
    }

    #[test]
    fn missing_variable_is_a_render_error() {
        let renderer = DocumentRenderer::with_template("{{ premium_total }}").unwrap();

        match renderer.render(&request()) {
            Err(ExportError::Render(message)) => assert!(message.contains("premium_total")),
            other => panic!("expected a render error, got {other:?}"),
        }
    }
}
