use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::shared::errors::{AppError, AppResult};

/// Field-keyed validation failures collected before a write.
///
/// Serializes as `{ "<field>": ["<message>", ...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationResult {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self::default()
    }

    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::valid().with_error(field, message)
    }

    pub fn with_error(mut self, field: &str, message: impl Into<String>) -> Self {
        self.add_error(field, message);
        self
    }

    pub fn add_error(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Merge two validation results
    pub fn merge(mut self, other: ValidationResult) -> Self {
        for (field, messages) in other.errors {
            self.errors.entry(field).or_default().extend(messages);
        }
        self
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors_for(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn into_result(self) -> AppResult<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(AppError::InvalidFields(self))
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.errors {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            write!(f, "{}: {}", field, messages.join(", "))?;
        }
        Ok(())
    }
}
