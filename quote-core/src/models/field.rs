use serde::{Deserialize, Serialize};

use super::Step;

/// Every input on the quotation form, in the order the screens show them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FullName,
    Email,
    Phone,
    IdNumber,
    VehicleMake,
    VehicleModel,
    YearOfManufacture,
    RegistrationNumber,
    VehicleValue,
    CoverageType,
    VehicleUsage,
}

impl Field {
    pub const ALL: [Field; 11] = [
        Self::FullName,
        Self::Email,
        Self::Phone,
        Self::IdNumber,
        Self::VehicleMake,
        Self::VehicleModel,
        Self::YearOfManufacture,
        Self::RegistrationNumber,
        Self::VehicleValue,
        Self::CoverageType,
        Self::VehicleUsage,
    ];

    /// The camelCase key used in drafts, CSV headers and error maps.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::IdNumber => "idNumber",
            Self::VehicleMake => "vehicleMake",
            Self::VehicleModel => "vehicleModel",
            Self::YearOfManufacture => "yearOfManufacture",
            Self::RegistrationNumber => "registrationNumber",
            Self::VehicleValue => "vehicleValue",
            Self::CoverageType => "coverageType",
            Self::VehicleUsage => "vehicleUsage",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::Email => "Email Address",
            Self::Phone => "Phone Number",
            Self::IdNumber => "ID / License Number",
            Self::VehicleMake => "Vehicle Make",
            Self::VehicleModel => "Vehicle Model",
            Self::YearOfManufacture => "Year of Manufacture",
            Self::RegistrationNumber => "Registration Number",
            Self::VehicleValue => "Vehicle Value (ZMW)",
            Self::CoverageType => "Coverage Type",
            Self::VehicleUsage => "Vehicle Usage",
        }
    }

    /// The screen on which this field is collected.
    pub fn step(&self) -> Step {
        match self {
            Self::FullName | Self::Email | Self::Phone | Self::IdNumber => Step::Personal,
            Self::VehicleMake
            | Self::VehicleModel
            | Self::YearOfManufacture
            | Self::RegistrationNumber
            | Self::VehicleValue => Step::Vehicle,
            Self::CoverageType | Self::VehicleUsage => Step::Coverage,
        }
    }

    /// Fields collected on `step`, in form order.
    pub fn for_step(step: Step) -> impl Iterator<Item = Field> {
        Self::ALL.into_iter().filter(move |field| field.step() == step)
    }
}

impl TryFrom<&str> for Field {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value).ok_or_else(|| format!("unknown field '{value}'"))
    }
}
