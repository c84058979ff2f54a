//! Loader and batch quoting against an on-disk fixture.

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use quote_cli::{app, csv_loader};
use quote_core::Field;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("sample_answers.csv")
}

#[test]
fn fixture_loads_every_row() {
    let records =
        csv_loader::load_from_file(&fixture_path()).expect("fixture file should load without error");

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].full_name, "Watu Matuze");
    assert_eq!(records[1].registration_number, "ALB 4321");
    assert_eq!(records[2].email, "");
}

#[test]
fn fixture_quotes() {
    let records = csv_loader::load_from_file(&fixture_path()).unwrap();

    let quotes = app::quote_batch(&records);

    // 1500 + 2500
    assert_eq!(quotes[0].quote, "4000.00");
    // (800 + 1500) × 1.3
    assert_eq!(quotes[1].quote, "2990.00");
    // unparseable value, no usage
    assert_eq!(quotes[2].quote, "500.00");
}

#[test]
fn fixture_incomplete_row_is_flagged() {
    let records = csv_loader::load_from_file(&fixture_path()).unwrap();

    let quotes = app::quote_batch(&records);

    assert!(quotes[0].missing.is_empty());
    assert!(quotes[1].missing.is_empty());
    assert_eq!(
        quotes[2].missing,
        vec![Field::Email, Field::IdNumber, Field::VehicleUsage]
    );
}
