//! CSV loader for batch quoting.
//!
//! ## CSV Format
//!
//! Headers are the camelCase field names used everywhere else. Column order
//! does not matter and every column is optional; a missing column reads as
//! an empty answer. Values are trimmed.
//!
//! | Column               | Used for                |
//! |----------------------|-------------------------|
//! | `fullName`           | display                 |
//! | `email`              | display                 |
//! | `phone`              |                         |
//! | `idNumber`           |                         |
//! | `vehicleMake`        |                         |
//! | `vehicleModel`       |                         |
//! | `yearOfManufacture`  |                         |
//! | `registrationNumber` |                         |
//! | `vehicleValue`       | premium (5% of value)   |
//! | `coverageType`       | premium (base price)    |
//! | `vehicleUsage`       | premium (multiplier)    |
//!
//! ### Minimal example
//!
//! ```csv
//! fullName,coverageType,vehicleValue,vehicleUsage
//! Watu Matuze,comprehensive,0,commercial
//! ```
use std::path::{Path, PathBuf};

use quote_core::AnswerRecord;

#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Bad structure, such as a row with the wrong number of cells.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),
}

/// Parses CSV text into answer records, in file order.
///
/// # Errors
///
/// [`CsvLoadError::Parse`] if the CSV is structurally invalid.
pub fn load_from_str(input: &str) -> Result<Vec<AnswerRecord>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<AnswerRecord>()
        .map(|row| row.map_err(CsvLoadError::from))
        .collect()
}

/// Reads `path` and delegates to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<AnswerRecord>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quote_core::Field;

    use super::*;

    const MINIMAL_CSV: &str = "\
fullName,coverageType,vehicleValue,vehicleUsage
Watu Matuze,comprehensive,0,commercial
";

    const MULTI_ROW_CSV: &str = "\
vehicleUsage,coverageType,vehicleValue,fullName
personal,third-party,1000,Chanda
personal,,20000,Mutale
 commercial , third-party-fire-theft ,25000, Bwalya
";

    #[test]
    fn minimal_csv_maps_named_columns() {
        let records = load_from_str(MINIMAL_CSV).expect("should parse minimal CSV");

        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.full_name, "Watu Matuze");
        assert_eq!(r.coverage_type, "comprehensive");
        assert_eq!(r.vehicle_value, "0");
        assert_eq!(r.vehicle_usage, "commercial");
    }

    #[test]
    fn missing_columns_are_empty() {
        let records = load_from_str(MINIMAL_CSV).unwrap();

        for field in [Field::Email, Field::Phone, Field::VehicleMake, Field::RegistrationNumber] {
            assert_eq!(records[0].get(field), "");
        }
    }

    #[test]
    fn column_order_does_not_matter_and_cells_are_trimmed() {
        let records = load_from_str(MULTI_ROW_CSV).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].full_name, "Chanda");
        assert_eq!(records[1].coverage_type, "");
        assert_eq!(records[2].full_name, "Bwalya");
        assert_eq!(records[2].vehicle_usage, "commercial");
        assert_eq!(records[2].coverage_type, "third-party-fire-theft");
    }

    #[test]
    fn header_only_is_empty() {
        assert!(load_from_str("fullName,email\n").unwrap().is_empty());
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let result = load_from_str("fullName,email\nA,a@b.c,extra\n");

        assert!(matches!(result, Err(CsvLoadError::Parse(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = load_from_file(Path::new("/definitely/not/here.csv"));

        assert!(matches!(result, Err(CsvLoadError::Io { .. })));
    }
}
