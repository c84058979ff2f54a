mod answer_record;
mod coverage;
mod field;
mod step;
mod validation_errors;

pub use answer_record::AnswerRecord;
pub use coverage::{CoverageType, VehicleUsage};
pub use field::Field;
pub use step::Step;
pub use validation_errors::ValidationErrors;
