use std::fmt;

use serde::{Deserialize, Serialize};

use super::{CoverageType, Field, VehicleUsage};

/// Everything the user has typed across the form.
///
/// Values are kept exactly as entered; trimming and parsing happen in the
/// validator and calculator, never here. A fresh record has every field
/// empty, and resetting the form restores that state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnswerRecord {
    // Personal details
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub id_number: String,

    // Vehicle details
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub year_of_manufacture: String,
    pub registration_number: String,
    pub vehicle_value: String,

    // Coverage
    pub coverage_type: String,
    pub vehicle_usage: String,
}

impl AnswerRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(
        &self,
        field: Field,
    ) -> &str {
        match field {
            Field::FullName => &self.full_name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::IdNumber => &self.id_number,
            Field::VehicleMake => &self.vehicle_make,
            Field::VehicleModel => &self.vehicle_model,
            Field::YearOfManufacture => &self.year_of_manufacture,
            Field::RegistrationNumber => &self.registration_number,
            Field::VehicleValue => &self.vehicle_value,
            Field::CoverageType => &self.coverage_type,
            Field::VehicleUsage => &self.vehicle_usage,
        }
    }

    pub fn set(
        &mut self,
        field: Field,
        value: impl Into<String>,
    ) {
        let slot = match field {
            Field::FullName => &mut self.full_name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::IdNumber => &mut self.id_number,
            Field::VehicleMake => &mut self.vehicle_make,
            Field::VehicleModel => &mut self.vehicle_model,
            Field::YearOfManufacture => &mut self.year_of_manufacture,
            Field::RegistrationNumber => &mut self.registration_number,
            Field::VehicleValue => &mut self.vehicle_value,
            Field::CoverageType => &mut self.coverage_type,
            Field::VehicleUsage => &mut self.vehicle_usage,
        };
        *slot = value.into();
    }

    /// Builder-style [`set`](Self::set), handy for fixtures.
    pub fn with(
        mut self,
        field: Field,
        value: impl Into<String>,
    ) -> Self {
        self.set(field, value);
        self
    }

    /// `true` when nothing has been entered yet.
    pub fn is_blank(&self) -> bool {
        Field::ALL.iter().all(|field| self.get(*field).is_empty())
    }

    pub fn coverage(&self) -> Option<CoverageType> {
        CoverageType::parse(&self.coverage_type)
    }

    pub fn usage(&self) -> Option<VehicleUsage> {
        VehicleUsage::parse(&self.vehicle_usage)
    }
}

impl fmt::Display for AnswerRecord {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for field in Field::ALL {
            writeln!(f, "{:<22} {}", format!("{}:", field.label()), self.get(field))?;
        }
        Ok(())
    }
}
