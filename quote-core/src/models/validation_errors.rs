use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Field;

/// Per-field validation messages for the current step.
///
/// One optional slot per known field, so a message can never be filed under
/// a key that does not exist on the form. An empty value means the step may
/// be left.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_of_manufacture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_usage: Option<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(
        &self,
        field: Field,
    ) -> &Option<String> {
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

    fn slot_mut(
        &mut self,
        field: Field,
    ) -> &mut Option<String> {
        match field {
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
        }
    }

    pub fn get(
        &self,
        field: Field,
    ) -> Option<&str> {
        self.slot(field).as_deref()
    }

    pub fn set(
        &mut self,
        field: Field,
        message: impl Into<String>,
    ) {
        *self.slot_mut(field) = Some(message.into());
    }

    /// Drops the message for `field`, leaving the others untouched.
    pub fn clear(
        &mut self,
        field: Field,
    ) {
        *self.slot_mut(field) = None;
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|field| self.slot(*field).is_none())
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Present messages in form order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        Field::ALL
            .into_iter()
            .filter_map(|field| self.get(field).map(|message| (field, message)))
    }

    /// Field-name keyed view, as rendered next to the inputs.
    pub fn to_map(&self) -> BTreeMap<&'static str, String> {
        self.iter()
            .map(|(field, message)| (field.name(), message.to_string()))
            .collect()
    }
}
