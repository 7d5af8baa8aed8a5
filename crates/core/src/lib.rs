//! Shared primitives for all Rust crates in Toolbelt.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Result type used across Toolbelt crates.
pub type AppResult<T> = Result<T, AppError>;

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input, configuration or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Distinguishable failures for functions with a strict input type contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TypeMismatch {
    /// The input was null or absent.
    #[error("Input cannot be null or undefined")]
    Missing,

    /// The input was present but not a number.
    #[error("Input must be a number")]
    NotANumber,
}

impl From<TypeMismatch> for AppError {
    fn from(value: TypeMismatch) -> Self {
        Self::Validation(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{AppError, TypeMismatch};

    #[test]
    fn type_mismatch_kinds_render_distinct_messages() {
        assert_ne!(
            TypeMismatch::Missing.to_string(),
            TypeMismatch::NotANumber.to_string()
        );
    }

    #[test]
    fn type_mismatch_converts_into_validation_error() {
        let error = AppError::from(TypeMismatch::NotANumber);
        assert!(matches!(error, AppError::Validation(ref message) if message == "Input must be a number"));
    }
}
