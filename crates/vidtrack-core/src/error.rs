//! # Error Module
//!
//! Error and violation types for vidtrack-core.
//!
//! - [`AspectError`] is returned by aspect queries.
//! - [`FieldViolation`] is the value a field validator returns.
//! - [`MappingError`] reports a defect in the static field table; it can
//!   only occur while the table is built.

use serde::Serialize;
use thiserror::Error;

/// Errors from aspect queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AspectError {
    /// The requested key is not one of the canonical aspects.
    #[error("aspect not found: {key}")]
    NotFound { key: String },
}

/// A rule a field value broke.
///
/// Validators return these as values for the form layer to render; they
/// are never raised as panics.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum FieldViolation {
    #[error("expected a {expected} value, got {actual}")]
    WrongType {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("value is required")]
    Required,

    #[error("must be at least {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("must be at most {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("does not match pattern {pattern}")]
    PatternMismatch { pattern: String },

    #[error("'{value}' is not a date in YYYY-MM-DDTHH:MM format")]
    InvalidDate { value: String },

    #[error("'{value}' is not an integer")]
    NotAnInteger { value: String },

    #[error("must be at least {min}, got {actual}")]
    BelowMinimum { min: i64, actual: i64 },

    #[error("must be at most {max}, got {actual}")]
    AboveMaximum { max: i64, actual: i64 },

    #[error("'{value}' is not one of the allowed options")]
    InvalidOption { value: String },
}

/// Defects in the declarative field table.
///
/// The table is static, so any of these is a programming error that must
/// stop start-up rather than surface per request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("aspect '{key}' declares order {declared}, expected {expected}")]
    AspectOrder {
        key: String,
        declared: u32,
        expected: u32,
    },

    #[error("aspect '{found}' at position {position}, expected '{expected}'")]
    AspectSequence {
        position: usize,
        expected: String,
        found: String,
    },

    #[error("expected {expected} aspects, found {found}")]
    AspectCount { expected: usize, found: usize },

    #[error("field '{aspect}.{field}' declares order {declared}, expected {expected}")]
    FieldOrder {
        aspect: String,
        field: String,
        declared: u32,
        expected: u32,
    },

    #[error("field key '{field}' appears more than once in aspect '{aspect}'")]
    DuplicateField { aspect: String, field: String },

    #[error("field '{aspect}.{field}' maps to unknown property path '{path}'")]
    DanglingPath {
        aspect: String,
        field: String,
        path: String,
    },

    #[error("select field '{aspect}.{field}' has no options")]
    MissingOptions { aspect: String, field: String },

    #[error("field '{aspect}.{field}' declares options but is not a select")]
    UnexpectedOptions { aspect: String, field: String },
}

// =============================================================================
// TESTS
// =============================================================================
