//! Plain-text rendering of the form screens.

use std::fmt::{self, Write};

use quote_core::flow::{FormState, NoticeKind};
use quote_core::{AnswerRecord, CoverageType, Field, QuoteSummary, Step, VehicleUsage};

pub const CURRENCY: &str = "ZMW";

const RULE: &str = "────────────────────────────────────────────────────────";

/// The current screen: heading, answers for the step, errors and notice.
pub fn render_screen(state: &FormState) -> String {
    let mut out = String::new();
    // Writing to a String never fails.
    let _ = write_screen(&mut out, state);
    out
}

fn write_screen(
    out: &mut String,
    state: &FormState,
) -> fmt::Result {
    writeln!(out, "{RULE}")?;
    writeln!(out, "{}", state.step)?;
    writeln!(out, "{RULE}")?;

    match state.step {
        Step::Summary => write_summary(out, &state.record, &state.summary())?,
        step => {
            for field in Field::for_step(step) {
                write_field(out, state, field)?;
            }
            if step == Step::Coverage {
                write_options(out)?;
            }
        }
    }

    if let Some(notice) = &state.notice {
        let tag = match notice.kind {
            NoticeKind::Success => "ok",
            NoticeKind::Info => "info",
            NoticeKind::Error => "error",
        };
        writeln!(out)?;
        writeln!(out, "[{tag}] {notice}")?;
    }
    if state.exporting {
        writeln!(out, "Generating quote document...")?;
    }
    Ok(())
}

fn write_field(
    out: &mut String,
    state: &FormState,
    field: Field,
) -> fmt::Result {
    let value = state.record.get(field);
    writeln!(out, "  {:<22} {:<28} ({})", field.label(), value, field.name())?;
    if let Some(message) = state.errors.get(field) {
        writeln!(out, "  {:<22} ! {message}", "")?;
    }
    Ok(())
}

fn write_options(out: &mut String) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "  Coverage options:")?;
    for coverage in CoverageType::ALL {
        writeln!(
            out,
            "    {:<24} {} ({})",
            coverage.as_str(),
            coverage.title(),
            coverage.description()
        )?;
    }
    writeln!(out, "  Usage options:")?;
    for usage in VehicleUsage::ALL {
        writeln!(out, "    {:<24} {}", usage.as_str(), usage.title())?;
    }
    Ok(())
}

pub(crate) fn coverage_title(record: &AnswerRecord) -> &str {
    record
        .coverage()
        .map(|c| c.title())
        .unwrap_or(record.coverage_type.as_str())
}

pub(crate) fn usage_title(record: &AnswerRecord) -> &str {
    record
        .usage()
        .map(|u| u.title())
        .unwrap_or(record.vehicle_usage.as_str())
}

fn write_summary(
    out: &mut String,
    record: &AnswerRecord,
    summary: &QuoteSummary,
) -> fmt::Result {
    writeln!(out, "Personal Details")?;
    writeln!(out, "  Name:           {}", record.full_name)?;
    writeln!(out, "  Email:          {}", record.email)?;
    writeln!(out, "  Phone:          {}", record.phone)?;
    writeln!(out, "  ID / License:   {}", record.id_number)?;
    writeln!(out)?;
    writeln!(out, "Vehicle Details")?;
    writeln!(
        out,
        "  Vehicle:        {} {} ({})",
        record.vehicle_make, record.vehicle_model, record.year_of_manufacture
    )?;
    writeln!(out, "  Registration:   {}", record.registration_number)?;
    writeln!(out, "  Value:          {CURRENCY} {}", record.vehicle_value)?;
    writeln!(out)?;
    writeln!(out, "Coverage")?;
    writeln!(out, "  Type:           {}", coverage_title(record))?;
    writeln!(out, "  Usage:          {}", usage_title(record))?;
    writeln!(out)?;
    writeln!(out, "Annual Premium:   {CURRENCY} {}", summary.annual_display())?;
    writeln!(out, "Monthly:          {CURRENCY} {}", summary.monthly_display())?;
    writeln!(
        out,
        "You save {CURRENCY} {} compared to standard rates",
        summary.savings_display()
    )
}
