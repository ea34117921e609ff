//! Error types for form state.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

/// Form-specific errors.
///
/// Validation failures are never reported through this type: they are
/// data, carried by [`ErrorMap`] and shown next to the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A submit was requested while another one is still in flight.
    #[error("form submit is already in progress")]
    AlreadySubmitting,

    /// A submit result was reported but no submit is in flight.
    #[error("no form submit is in progress")]
    NotSubmitting,

    /// A control was declared with an invalid configuration.
    #[error("invalid control {field:?}: {message}")]
    InvalidControl { field: String, message: String },

    /// Two controls of one form share a field name.
    #[error("duplicate field name: {0}")]
    DuplicateField(String),

    /// Two options of one control share a value.
    #[error("duplicate option {value:?} for field {field}")]
    DuplicateOption { field: String, value: String },

    /// A field name is not a valid dot/bracket path.
    #[error("invalid field path {path:?}: {message}")]
    InvalidPath { path: String, message: String },

    /// Invalid field value.
    #[error("invalid value for field {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// Form data parsing error.
    #[error("failed to parse form data: {0}")]
    ParseError(String),
}

impl From<serde_json::Error> for FormError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;

/// Failure reported by a submission handler.
///
/// Surfaced at form level, never attached to a single field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SubmitError {
    message: String,
}

impl SubmitError {
    /// Creates a new submission error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Validation errors keyed by field name, one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorMap {
    errors: BTreeMap<String, String>,
}

impl ErrorMap {
    /// Creates a new empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an error for a field. The first message recorded for a field
    /// is kept.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    /// Builder form of [`ErrorMap::add`].
    #[must_use]
    pub fn with(mut self, field: &str, message: impl Into<String>) -> Self {
        self.add(field, message);
        self
    }

    /// Returns whether there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of fields with errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns the error for a specific field.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Iterates over `(field, message)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(f, m)| (f.as_str(), m.as_str()))
    }

    /// Returns the field names that carry an error.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }
}

impl std::fmt::Display for ErrorMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (field, message) in &self.errors {
            writeln!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ErrorMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (field, message) in iter {
            let field = field.into();
            map.add(&field, message);
        }
        map
    }
}
