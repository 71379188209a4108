//! Validation of probability table files.
//!
//! Parsing failures and semantic failures are reported through
//! [`ValidationError`]; [`ValidationResult`] collects every semantic problem
//! found in one pass so a user fixing a file sees all of them at once.

use thiserror::Error;

/// Error raised while loading or validating configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("parse error: {0}")]
    ParseError(String),

    #[error("semantic validation failed: {}", .0.join("; "))]
    Semantic(Vec<String>),
}

impl From<ValidationError> for hd_common::Error {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::IoError(msg) => hd_common::Error::Config(msg),
            other => hd_common::Error::InvalidProbabilities(other.to_string()),
        }
    }
}

/// Outcome of a semantic validation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    pub fn warn(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Check that `value` is a probability, recording an error otherwise.
    pub fn check_probability(&mut self, field: &str, value: f64) {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            self.error(format!("{field} must be a probability in [0, 1], got {value}"));
        }
    }

    /// Convert into a `Result`, keeping warnings only on success.
    pub fn into_result(self) -> Result<Vec<String>, ValidationError> {
        if self.is_valid() {
            Ok(self.warnings)
        } else {
            Err(ValidationError::Semantic(self.errors))
        }
    }
}
