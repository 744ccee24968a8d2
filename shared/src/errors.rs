//! Error types for the calculator core

use crate::validation::get_field_display_label;
use thiserror::Error;

/// The single failure mode of every calculator: an input precondition
/// did not hold.
///
/// Carries the offending field and a static message; the caller decides
/// how to present it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{message}")]
pub struct InvalidInputError {
    pub field: &'static str,
    pub message: &'static str,
}

impl InvalidInputError {
    pub fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }

    /// User-facing label of the offending field
    pub fn display_label(&self) -> &'static str {
        get_field_display_label(self.field)
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label(), self.message)
    }
}

/// Errors raised when evaluating a calculator by slug
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Unknown calculator: {0}")]
    UnknownCalculator(String),

    #[error("Malformed input: {0}")]
    MalformedInput(#[source] serde_json::Error),

    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    /// A result could not be turned into JSON; not the caller's fault
    #[error("Failed to encode result: {0}")]
    EncodeOutput(#[source] serde_json::Error),
}
