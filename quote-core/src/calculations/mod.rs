//! Quote calculation and step validation.
//!
//! Both entry points are synchronous pure functions: they read an
//! [`AnswerRecord`](crate::AnswerRecord), never mutate it, and never fail.

pub mod common;
pub mod premium;
pub mod summary;
pub mod validation;

pub use premium::{PremiumBreakdown, PremiumCalculator, PricingConfig, calculate_quote};
pub use summary::QuoteSummary;
pub use validation::{validate_step, validate_step_number};
