//! Motor insurance quotation: premium calculation, step validation and the
//! four-step form flow.

pub mod calculations;
pub mod export;
pub mod flow;
pub mod models;
pub mod storage;

pub use calculations::{QuoteSummary, calculate_quote, validate_step};
pub use export::{ExportError, ExportRequest, QuoteExporter};
pub use flow::{FormAction, FormController, FormState};
pub use models::*;
pub use storage::{DraftStore, StorageError};
