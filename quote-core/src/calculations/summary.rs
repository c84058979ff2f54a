//! Figures shown alongside the premium on the summary screen.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{format_amount, parse_lenient_decimal, round_half_up};

/// How much dearer the advertised standard rate is than our premium.
const STANDARD_RATE_MARKUP: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSummary {
    pub annual: Decimal,
    pub monthly: Decimal,

    /// Difference to the standard rate.
    pub savings: Decimal,
}

impl QuoteSummary {
    /// Derives the summary from a premium string as produced by
    /// [`calculate_quote`](crate::calculate_quote).
    pub fn from_quote(quote: &str) -> Self {
        Self::from_annual(parse_lenient_decimal(quote))
    }

    pub fn from_annual(annual: Decimal) -> Self {
        let annual = round_half_up(annual);
        Self {
            annual,
            monthly: round_half_up(annual / MONTHS_PER_YEAR),
            savings: round_half_up(annual * STANDARD_RATE_MARKUP),
        }
    }

    pub fn annual_display(&self) -> String {
        format_amount(self.annual)
    }

    pub fn monthly_display(&self) -> String {
        format_amount(self.monthly)
    }

    pub fn savings_display(&self) -> String {
        format_amount(self.savings)
    }
}
