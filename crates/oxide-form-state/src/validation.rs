//! Validation functions and single-value validators.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ErrorMap;
use crate::value::{FieldValue, FormValues};

/// A form-wide validation function.
///
/// Maps the complete set of values to the errors found, one message per
/// field. Implementations must be pure: the same values always yield the
/// same map, and an empty map means the values are acceptable.
pub trait Validate: Send + Sync {
    /// Runs one validation pass.
    fn validate(&self, values: &FormValues) -> ErrorMap;
}

impl<F> Validate for F
where
    F: Fn(&FormValues) -> ErrorMap + Send + Sync,
{
    fn validate(&self, values: &FormValues) -> ErrorMap {
        self(values)
    }
}

/// Trait for field validators.
pub trait Validator: Send + Sync {
    /// Validates a value and returns an error message if invalid.
    fn validate(&self, value: &FieldValue) -> Result<(), String>;

    /// Returns the error message for this validator.
    fn message(&self) -> &str;
}

/// Text a validator inspects: free text, or the value of a chosen option.
fn text_of(value: &FieldValue) -> Option<&str> {
    match value {
        FieldValue::Text(text) => Some(text),
        FieldValue::Choice(option) => Some(&option.value),
        _ => None,
    }
}

/// Validator that requires a filled-in value.
#[derive(Debug, Clone)]
pub struct RequiredValidator {
    message: String,
}

impl RequiredValidator {
    /// Creates a new RequiredValidator with default message.
    pub fn new() -> Self {
        Self {
            message: "This field is required.".to_string(),
        }
    }

    /// Creates a new RequiredValidator with custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for RequiredValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for RequiredValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), String> {
        if value.is_blank() {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator that enforces a maximum length, in characters for text and
/// in items for checkbox-group selections.
#[derive(Debug, Clone)]
pub struct MaxLengthValidator {
    max_length: usize,
    message: String,
}

impl MaxLengthValidator {
    /// Creates a new MaxLengthValidator.
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            message: format!("Ensure this value has at most {max_length} characters."),
        }
    }

    /// Creates a new MaxLengthValidator with custom message.
    pub fn with_message(max_length: usize, message: impl Into<String>) -> Self {
        Self {
            max_length,
            message: message.into(),
        }
    }
}

impl Validator for MaxLengthValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), String> {
        let length = match value {
            FieldValue::Text(text) => text.chars().count(),
            FieldValue::List(items) => items.len(),
            _ => return Ok(()),
        };
        if length > self.max_length {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator that enforces a minimum length. Empty values pass; pair it
/// with [`RequiredValidator`] when the field must be filled in.
#[derive(Debug, Clone)]
pub struct MinLengthValidator {
    min_length: usize,
    message: String,
}

impl MinLengthValidator {
    /// Creates a new MinLengthValidator.
    pub fn new(min_length: usize) -> Self {
        Self {
            min_length,
            message: format!("Ensure this value has at least {min_length} characters."),
        }
    }

    /// Creates a new MinLengthValidator with custom message.
    pub fn with_message(min_length: usize, message: impl Into<String>) -> Self {
        Self {
            min_length,
            message: message.into(),
        }
    }
}

impl Validator for MinLengthValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), String> {
        let length = match value {
            FieldValue::Text(text) => text.chars().count(),
            FieldValue::List(items) => items.len(),
            _ => return Ok(()),
        };
        if length < self.min_length {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

/// Validator for email addresses.
#[derive(Debug, Clone)]
pub struct EmailValidator {
    message: String,
}

impl EmailValidator {
    /// Creates a new EmailValidator with default message.
    pub fn new() -> Self {
        Self {
            message: "Enter a valid email address.".to_string(),
        }
    }

    /// Creates a new EmailValidator with custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for EmailValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), String> {
        match text_of(value) {
            Some(text) if !EMAIL_PATTERN.is_match(text) => Err(self.message.clone()),
            _ => Ok(()),
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator using a custom regex pattern.
#[derive(Debug, Clone)]
pub struct RegexValidator {
    pattern: Regex,
    message: String,
}

impl RegexValidator {
    /// Creates a new RegexValidator.
    pub fn new(pattern: &str, message: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            message: message.into(),
        })
    }
}

impl Validator for RegexValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), String> {
        match text_of(value) {
            Some(text) if !self.pattern.is_match(text) => Err(self.message.clone()),
            _ => Ok(()),
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Message for input that is not a number.
pub const NOT_A_NUMBER: &str = "Enter a valid number.";

/// Validator for numeric range.
#[derive(Debug, Clone)]
pub struct RangeValidator {
    min: Option<f64>,
    max: Option<f64>,
    message: String,
    number_message: String,
}

impl RangeValidator {
    /// Creates a new RangeValidator with min and max bounds.
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        let message = match (min, max) {
            (Some(min), Some(max)) => format!("Value must be between {min} and {max}."),
            (Some(min), None) => format!("Value must be at least {min}."),
            (None, Some(max)) => format!("Value must be at most {max}."),
            (None, None) => "Invalid value.".to_string(),
        };
        Self {
            min,
            max,
            message,
            number_message: NOT_A_NUMBER.to_string(),
        }
    }

    /// Creates a new RangeValidator with custom message.
    pub fn with_message(min: Option<f64>, max: Option<f64>, message: impl Into<String>) -> Self {
        Self {
            min,
            max,
            message: message.into(),
            number_message: NOT_A_NUMBER.to_string(),
        }
    }

    /// Sets the message for input that does not parse as a number.
    #[must_use]
    pub fn number_message(mut self, message: impl Into<String>) -> Self {
        self.number_message = message.into();
        self
    }
}

impl Validator for RangeValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), String> {
        let Some(text) = text_of(value) else {
            return Ok(());
        };
        let num: f64 = text
            .trim()
            .parse()
            .map_err(|_| self.number_message.clone())?;

        if self.min.is_some_and(|min| num < min) || self.max.is_some_and(|max| num > max) {
            return Err(self.message.clone());
        }
        Ok(())
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// A validation function assembled from per-field validators.
///
/// Fields are checked in declaration order; for each field the first
/// failing validator supplies the message.
#[derive(Default)]
pub struct Rules {
    fields: Vec<(String, Vec<Box<dyn Validator>>)>,
}

impl std::fmt::Debug for Rules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rules")
            .field(
                "fields",
                &self
                    .fields
                    .iter()
                    .map(|(name, validators)| (name, validators.len()))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Rules {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a validator for a field.
    #[must_use]
    pub fn rule(mut self, field: &str, validator: impl Validator + 'static) -> Self {
        let validator: Box<dyn Validator> = Box::new(validator);
        if let Some((_, validators)) = self.fields.iter_mut().find(|(name, _)| name == field) {
            validators.push(validator);
        } else {
            self.fields.push((field.to_string(), vec![validator]));
        }
        self
    }
}

impl Validate for Rules {
    fn validate(&self, values: &FormValues) -> ErrorMap {
        let mut errors = ErrorMap::new();
        for (field, validators) in &self.fields {
            let value = values.get(field);
            if let Some(message) = validators.iter().find_map(|v| v.validate(value).err()) {
                errors.add(field, message);
            }
        }
        errors
    }
}
