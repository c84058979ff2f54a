//! Common utility functions for premium calculations.
//!
//! This module provides shared functionality used by the calculator and the
//! summary figures: rounding, lenient number parsing of form input, and
//! two-decimal formatting.

use rust_decimal::Decimal;
use tracing::debug;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount with exactly two fractional digits, e.g. `"1025.00"`.
///
/// The value is rounded with [`round_half_up`] first. Zero is always
/// rendered unsigned.
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::format_amount;
///
/// assert_eq!(format_amount(dec!(1025)), "1025.00");
/// assert_eq!(format_amount(dec!(0.125)), "0.13");
/// ```
pub fn format_amount(value: Decimal) -> String {
    let mut rounded = round_half_up(value);
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    rounded.rescale(2);
    rounded.to_string()
}

/// Parses free-form input the way a browser number field is read.
///
/// Leading whitespace is skipped and the longest numeric prefix is used, so
/// `"1500abc"` reads as 1500 and `"abc"` as 0. An optional exponent is
/// honoured (`"2e3"` is 2000). Anything without a numeric prefix, or too
/// large to represent, reads as zero. This never fails.
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::parse_lenient_decimal;
///
/// assert_eq!(parse_lenient_decimal(" 12.5kg"), dec!(12.5));
/// assert_eq!(parse_lenient_decimal("abc"), Decimal::ZERO);
/// ```
pub fn parse_lenient_decimal(input: &str) -> Decimal {
    let Some(literal) = NumericLiteral::scan(input.trim_start()) else {
        return Decimal::ZERO;
    };
    literal.to_decimal().unwrap_or_else(|| {
        debug!(input, "numeric input out of range, treating as zero");
        Decimal::ZERO
    })
}

/// The pieces of the leading number literal in a string.
#[derive(Debug, PartialEq, Eq)]
struct NumericLiteral<'a> {
    negative: bool,
    integer: &'a str,
    fraction: &'a str,
    exponent: i64,
}

impl<'a> NumericLiteral<'a> {
    fn scan(s: &'a str) -> Option<Self> {
        let bytes = s.as_bytes();
        let mut pos = 0;

        let negative = match bytes.first() {
            Some(b'-') => {
                pos = 1;
                true
            }
            Some(b'+') => {
                pos = 1;
                false
            }
            _ => false,
        };

        let integer_start = pos;
        pos += count_digits(&bytes[pos..]);
        let integer = &s[integer_start..pos];

        let mut fraction = "";
        if bytes.get(pos) == Some(&b'.') {
            let fraction_start = pos + 1;
            let fraction_end = fraction_start + count_digits(&bytes[fraction_start..]);
            fraction = &s[fraction_start..fraction_end];
            if !integer.is_empty() || !fraction.is_empty() {
                pos = fraction_end;
            }
        }

        if integer.is_empty() && fraction.is_empty() {
            return None;
        }

        let mut exponent = 0;
        if matches!(bytes.get(pos), Some(b'e' | b'E')) {
            let mut exp_pos = pos + 1;
            let exp_negative = match bytes.get(exp_pos) {
                Some(b'-') => {
                    exp_pos += 1;
                    true
                }
                Some(b'+') => {
                    exp_pos += 1;
                    false
                }
                _ => false,
            };
            let exp_digits = count_digits(&bytes[exp_pos..]);
            if exp_digits > 0 {
                // Saturate absurd exponents; they fall out of range below anyway.
                let magnitude: i64 = s[exp_pos..exp_pos + exp_digits].parse().unwrap_or(i64::MAX);
                exponent = if exp_negative { -magnitude } else { magnitude };
            }
        }

        Some(Self {
            negative,
            integer,
            fraction,
            exponent,
        })
    }

    fn to_decimal(&self) -> Option<Decimal> {
        let integer = if self.integer.is_empty() { "0" } else { self.integer };
        let text = if self.fraction.is_empty() {
            integer.to_string()
        } else {
            format!("{integer}.{}", self.fraction)
        };
        let mut value: Decimal = text.parse().ok()?;

        const MAX_SHIFT: i64 = 28;
        if self.exponent > MAX_SHIFT {
            return None;
        }
        if self.exponent < -MAX_SHIFT {
            return Some(Decimal::ZERO);
        }
        for _ in 0..self.exponent.unsigned_abs() {
            value = if self.exponent > 0 {
                value.checked_mul(Decimal::TEN)?
            } else {
                value.checked_div(Decimal::TEN)?
            };
        }

        Some(if self.negative { -value } else { value })
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
