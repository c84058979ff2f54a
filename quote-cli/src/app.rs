use std::fmt::Write;

use anyhow::{Context, Result};
use quote_core::calculations::{QuoteSummary, validate_step_number};
use quote_core::storage::{
    DraftStoreRegistry, MemoryDraftStoreFactory, SavedDraft, StoreConfig, clear_draft, load_draft,
};
use quote_core::{AnswerRecord, DraftStore, Field, Step, calculate_quote, validate_step};
use quote_store_sqlite::SqliteDraftStoreFactory;
use tracing::debug;

/// Registry with every backend this binary ships.
pub fn build_registry() -> DraftStoreRegistry {
    let mut registry = DraftStoreRegistry::new();
    registry.register(Box::new(SqliteDraftStoreFactory));
    registry.register(Box::new(MemoryDraftStoreFactory));
    registry
}

pub async fn open_store(config: &StoreConfig) -> Result<Box<dyn DraftStore>> {
    debug!(backend = %config.backend, "opening draft store");
    build_registry()
        .create(config)
        .await
        .with_context(|| format!("cannot open {} draft store", config.backend))
}

/// Premium line for the `quote` command.
pub fn quote_report(
    record: &AnswerRecord,
    with_summary: bool,
) -> String {
    let quote = calculate_quote(record);
    if !with_summary {
        return quote;
    }

    let summary = QuoteSummary::from_quote(&quote);
    format!(
        "annual:  {}\nmonthly: {}\nsavings: {}",
        summary.annual_display(),
        summary.monthly_display(),
        summary.savings_display()
    )
}

/// Error map for `step` as pretty JSON; `{}` when the step passes.
pub fn validation_report(
    step: u8,
    record: &AnswerRecord,
) -> Result<String> {
    let errors = validate_step_number(step, record);
    serde_json::to_string_pretty(&errors).context("cannot serialise validation errors")
}

/// One row of `batch` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchQuote {
    /// 1-based data row.
    pub row: usize,
    pub full_name: String,
    pub coverage_type: String,
    pub quote: String,

    /// Fields that would block the form, in form order.
    pub missing: Vec<Field>,
}

pub fn quote_batch(records: &[AnswerRecord]) -> Vec<BatchQuote> {
    records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let missing = [Step::Personal, Step::Vehicle, Step::Coverage]
                .into_iter()
                .flat_map(|step| {
                    validate_step(step, record)
                        .iter()
                        .map(|(field, _)| field)
                        .collect::<Vec<_>>()
                })
                .collect();

            BatchQuote {
                row: idx + 1,
                full_name: record.full_name.clone(),
                coverage_type: record.coverage_type.clone(),
                quote: calculate_quote(record),
                missing,
            }
        })
        .collect()
}

pub fn render_batch(quotes: &[BatchQuote]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:<24} {:<24} {:>12}  status",
        "row", "name", "coverage", "premium"
    );
    for q in quotes {
        let status = if q.missing.is_empty() {
            "complete".to_string()
        } else {
            let names: Vec<_> = q.missing.iter().map(|f| f.name()).collect();
            format!("missing: {}", names.join(", "))
        };
        let _ = writeln!(
            out,
            "{:>4}  {:<24} {:<24} {:>12}  {status}",
            q.row, q.full_name, q.coverage_type, q.quote
        );
    }
    out
}

pub async fn show_draft<S: DraftStore + ?Sized>(store: &S) -> Result<String> {
    let draft = load_draft(store)
        .await
        .context("cannot read the saved draft")?;

    Ok(match draft {
        Some(SavedDraft { record, step }) => format!("Saved on {step}\n\n{record}"),
        None => "No saved draft.".to_string(),
    })
}

pub async fn discard_draft<S: DraftStore + ?Sized>(store: &S) -> Result<()> {
    clear_draft(store)
        .await
        .context("cannot clear the saved draft")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quote_core::storage::{MemoryDraftStore, save_draft};

    use super::*;

    fn complete() -> AnswerRecord {
        AnswerRecord::new()
            .with(Field::FullName, "Watu")
            .with(Field::Email, "w@x.io")
            .with(Field::Phone, "1")
            .with(Field::IdNumber, "2")
            .with(Field::VehicleMake, "Mazda")
            .with(Field::VehicleModel, "Demio")
            .with(Field::YearOfManufacture, "2015")
            .with(Field::RegistrationNumber, "ABX 1")
            .with(Field::VehicleValue, "8000")
            .with(Field::CoverageType, "third-party")
            .with(Field::VehicleUsage, "personal")
    }

    #[test]
    fn registry_knows_both_backends() {
        assert_eq!(build_registry().available_backends(), vec!["memory", "sqlite"]);
    }

    #[tokio::test]
    async fn unknown_backend_fails_with_context() {
        let config = StoreConfig {
            backend: "redis".to_string(),
            connection_string: String::new(),
        };

        let err = open_store(&config).await.err().unwrap();

        assert!(format!("{err:#}").contains("unknown backend 'redis'"));
    }

    #[test]
    fn quote_report_plain_and_with_summary() {
        let record = complete();

        assert_eq!(quote_report(&record, false), "900.00");
        assert_eq!(
            quote_report(&record, true),
            "annual:  900.00\nmonthly: 75.00\nsavings: 135.00"
        );
    }

    #[test]
    fn validation_report_is_json() {
        let json = validation_report(3, &AnswerRecord::new().with(Field::CoverageType, "comprehensive"))
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value, serde_json::json!({ "vehicleUsage": "Select usage type" }));
        assert_eq!(validation_report(4, &AnswerRecord::new()).unwrap(), "{}");
    }

    #[test]
    fn batch_flags_incomplete_rows() {
        let records = vec![complete(), AnswerRecord::new().with(Field::VehicleValue, "20000")];

        let quotes = quote_batch(&records);

        assert_eq!(quotes[0].quote, "900.00");
        assert!(quotes[0].missing.is_empty());
        assert_eq!(quotes[1].row, 2);
        assert_eq!(quotes[1].quote, "1000.00");
        assert_eq!(quotes[1].missing.len(), 10);

        let table = render_batch(&quotes);
        assert!(table.contains("complete"));
        assert!(table.contains("missing: fullName, email"));
    }

    #[tokio::test]
    async fn draft_show_and_discard() {
        let store = MemoryDraftStore::new();
        assert_eq!(show_draft(&store).await.unwrap(), "No saved draft.");

        save_draft(&store, &complete(), Step::Coverage).await.unwrap();
        let shown = show_draft(&store).await.unwrap();
        assert!(shown.starts_with("Saved on Step 3 of 4: Coverage Type"));
        assert!(shown.contains("Mazda"));

        discard_draft(&store).await.unwrap();
        assert_eq!(show_draft(&store).await.unwrap(), "No saved draft.");
    }
}
