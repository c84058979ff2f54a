//! Per-step validation of the quotation form.
//!
//! Each input step has a fixed set of rules. The controller may only move
//! forward when [`validate_step`] returns an empty [`ValidationErrors`].
//! Most presence checks trim the value first; vehicle make, year and value
//! are checked as entered, so a whitespace-only make passes. Year and value
//! are presence-checked only.

use std::sync::LazyLock;

use regex::Regex;

use crate::{AnswerRecord, Field, Step, ValidationErrors};

/// Three non-whitespace runs joined by `@` and `.`.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Invalid email";
pub const PHONE_REQUIRED: &str = "Phone is required";
pub const ID_NUMBER_REQUIRED: &str = "ID number is required";
pub const VEHICLE_MAKE_REQUIRED: &str = "Vehicle make is required";
pub const MODEL_REQUIRED: &str = "Model is required";
pub const YEAR_REQUIRED: &str = "Year is required";
pub const REGISTRATION_REQUIRED: &str = "Registration is required";
pub const VALUE_REQUIRED: &str = "Value is required";
pub const COVERAGE_REQUIRED: &str = "Select coverage type";
pub const USAGE_REQUIRED: &str = "Select usage type";

/// Validates the fields collected on `step`.
///
/// The summary step has nothing to validate and always yields an empty map.
pub fn validate_step(
    step: Step,
    record: &AnswerRecord,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    match step {
        Step::Personal => validate_personal(record, &mut errors),
        Step::Vehicle => validate_vehicle(record, &mut errors),
        Step::Coverage => validate_coverage(record, &mut errors),
        Step::Summary => {}
    }

    errors
}

/// [`validate_step`] for a raw step number; numbers outside 1–4 have no rules.
pub fn validate_step_number(
    step: u8,
    record: &AnswerRecord,
) -> ValidationErrors {
    Step::from_number(step)
        .map(|step| validate_step(step, record))
        .unwrap_or_default()
}

/// `true` if `email` contains something shaped like `local@domain.tld`.
pub fn is_plausible_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

fn validate_personal(
    record: &AnswerRecord,
    errors: &mut ValidationErrors,
) {
    require_trimmed(record, Field::FullName, NAME_REQUIRED, errors);

    if is_blank(&record.email) {
        errors.set(Field::Email, EMAIL_REQUIRED);
    } else if !is_plausible_email(&record.email) {
        errors.set(Field::Email, EMAIL_INVALID);
    }

    require_trimmed(record, Field::Phone, PHONE_REQUIRED, errors);
    require_trimmed(record, Field::IdNumber, ID_NUMBER_REQUIRED, errors);
}

fn validate_vehicle(
    record: &AnswerRecord,
    errors: &mut ValidationErrors,
) {
    require_present(record, Field::VehicleMake, VEHICLE_MAKE_REQUIRED, errors);
    require_trimmed(record, Field::VehicleModel, MODEL_REQUIRED, errors);
    require_present(record, Field::YearOfManufacture, YEAR_REQUIRED, errors);
    require_trimmed(record, Field::RegistrationNumber, REGISTRATION_REQUIRED, errors);
    require_present(record, Field::VehicleValue, VALUE_REQUIRED, errors);
}

fn validate_coverage(
    record: &AnswerRecord,
    errors: &mut ValidationErrors,
) {
    require_present(record, Field::CoverageType, COVERAGE_REQUIRED, errors);
    require_present(record, Field::VehicleUsage, USAGE_REQUIRED, errors);
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Fails when the value is empty after trimming.
fn require_trimmed(
    record: &AnswerRecord,
    field: Field,
    message: &str,
    errors: &mut ValidationErrors,
) {
    if is_blank(record.get(field)) {
        errors.set(field, message);
    }
}

/// Fails only when the value is the empty string.
fn require_present(
    record: &AnswerRecord,
    field: Field,
    message: &str,
    errors: &mut ValidationErrors,
) {
    if record.get(field).is_empty() {
        errors.set(field, message);
    }
}
