use quote_core::Field;
use thiserror::Error;

/// Error returned when a `name=value` pair cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssignmentError {
    #[error("expected <field>=<value>, got '{0}'")]
    MissingEquals(String),

    #[error("unknown field '{name}'; expected one of: {known}")]
    UnknownField { name: String, known: String },
}

fn known_fields() -> String {
    Field::ALL
        .iter()
        .map(|f| f.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parses `fieldName=value`.
///
/// The field name is trimmed; the value is kept exactly as typed, so
/// `vehicleMake=  ` stores two spaces. Only the first `=` splits.
pub fn parse_assignment(s: &str) -> Result<(Field, String), AssignmentError> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| AssignmentError::MissingEquals(s.to_string()))?;

    let name = name.trim();
    let field = Field::parse(name).ok_or_else(|| AssignmentError::UnknownField {
        name: name.to_string(),
        known: known_fields(),
    })?;

    Ok((field, value.to_string()))
}
