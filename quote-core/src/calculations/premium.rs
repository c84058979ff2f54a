//! Annual premium calculation.
//!
//! The premium is built from three answers on the form:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Base price from the coverage type (500 / 800 / 1500, otherwise 0) |
//! | 2    | Value charge: 5% of the vehicle value (unparseable value counts as 0) |
//! | 3    | Usage multiplier: 1.3 for commercial use, otherwise 1.0 |
//! | 4    | Premium: (Step 1 + Step 2) × Step 3, rounded half-up to 2 places |
//!
//! The calculation has no error channel. Missing or malformed input only ever
//! lowers the premium towards zero.
//!
//! # Example
//!
//! ```
//! use quote_core::{AnswerRecord, Field, calculate_quote};
//!
//! let record = AnswerRecord::new()
//!     .with(Field::CoverageType, "third-party")
//!     .with(Field::VehicleValue, "10500")
//!     .with(Field::VehicleUsage, "personal");
//!
//! assert_eq!(calculate_quote(&record), "1025.00");
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{format_amount, parse_lenient_decimal, round_half_up};
use crate::{AnswerRecord, CoverageType, VehicleUsage};

/// Rates used by the [`PremiumCalculator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingConfig {
    pub third_party: Decimal,
    pub third_party_fire_theft: Decimal,
    pub comprehensive: Decimal,

    /// Share of the vehicle value added to the base price.
    pub value_rate: Decimal,

    /// Applied to the whole premium for commercial use.
    pub commercial_multiplier: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            third_party: Decimal::from(500),
            third_party_fire_theft: Decimal::from(800),
            comprehensive: Decimal::from(1500),
            value_rate: Decimal::new(5, 2),
            commercial_multiplier: Decimal::new(13, 1),
        }
    }
}

impl PricingConfig {
    pub fn base_price(
        &self,
        coverage: CoverageType,
    ) -> Decimal {
        match coverage {
            CoverageType::ThirdParty => self.third_party,
            CoverageType::ThirdPartyFireTheft => self.third_party_fire_theft,
            CoverageType::Comprehensive => self.comprehensive,
        }
    }
}

/// Intermediate figures of one premium calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumBreakdown {
    pub base_price: Decimal,
    pub value_charge: Decimal,
    pub usage_multiplier: Decimal,

    /// Final premium, rounded to two decimal places.
    pub annual_premium: Decimal,
}

impl PremiumBreakdown {
    /// The premium as displayed and exported, e.g. `"1950.00"`.
    pub fn formatted(&self) -> String {
        format_amount(self.annual_premium)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PremiumCalculator {
    config: PricingConfig,
}

impl PremiumCalculator {
    pub fn calculate(
        &self,
        record: &AnswerRecord,
    ) -> PremiumBreakdown {
        let base_price = self.base_price(record);
        let value_charge = self.value_charge(&record.vehicle_value);
        let usage_multiplier = self.usage_multiplier(record.usage());

        let subtotal = base_price.checked_add(value_charge).unwrap_or(Decimal::MAX);
        let annual_premium =
            round_half_up(subtotal.checked_mul(usage_multiplier).unwrap_or(Decimal::MAX));

        PremiumBreakdown {
            base_price,
            value_charge,
            usage_multiplier,
            annual_premium,
        }
    }

    /// Base price for an exact coverage match, zero for anything else.
    fn base_price(
        &self,
        record: &AnswerRecord,
    ) -> Decimal {
        record
            .coverage()
            .map(|coverage| self.config.base_price(coverage))
            .unwrap_or(Decimal::ZERO)
    }

    fn value_charge(
        &self,
        vehicle_value: &str,
    ) -> Decimal {
        parse_lenient_decimal(vehicle_value)
            .checked_mul(self.config.value_rate)
            .unwrap_or(Decimal::MAX)
    }

    fn usage_multiplier(
        &self,
        usage: Option<VehicleUsage>,
    ) -> Decimal {
        match usage {
            Some(VehicleUsage::Commercial) => self.config.commercial_multiplier,
            Some(VehicleUsage::Personal) | None => Decimal::ONE,
        }
    }
}

/// Annual premium for `record` with the standard rates, formatted with two
/// fractional digits.
pub fn calculate_quote(record: &AnswerRecord) -> String {
    PremiumCalculator::default().calculate(record).formatted()
}
