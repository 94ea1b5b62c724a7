pub mod validation_result;
pub mod validation_rules;

pub use validation_result::ValidationResult;
pub use validation_rules::{ValidationRules, Validator};
