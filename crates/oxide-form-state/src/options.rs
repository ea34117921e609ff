//! Form container configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// When the container runs its validation function on its own.
///
/// A submit always runs a validation pass, whatever the mode. Once a
/// submit has been attempted, every change revalidates so that visible
/// errors disappear as soon as they are fixed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Validate after every value change and every blur.
    OnChange,
    /// Validate when a field loses focus.
    #[default]
    OnBlur,
    /// Validate only on submit.
    OnSubmit,
}

/// Options for a [`FormState`](crate::FormState).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormOptions {
    /// Automatic validation points.
    pub validation_mode: ValidationMode,
    /// Mark every registered field touched when a submit is attempted.
    pub touch_on_submit: bool,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            validation_mode: ValidationMode::default(),
            touch_on_submit: true,
        }
    }
}

impl FormOptions {
    /// Loads options from a JSON document. Missing keys keep their
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the validation mode.
    #[must_use]
    pub const fn validation_mode(mut self, mode: ValidationMode) -> Self {
        self.validation_mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormError;

    #[test]
    fn test_defaults() {
        let options = FormOptions::default();
        assert_eq!(options.validation_mode, ValidationMode::OnBlur);
        assert!(options.touch_on_submit);
    }

    #[test]
    fn test_from_json_partial() {
        let options = FormOptions::from_json(r#"{"validation_mode": "on_change"}"#).unwrap();
        assert_eq!(options.validation_mode, ValidationMode::OnChange);
        assert!(options.touch_on_submit);
    }

    #[test]
    fn test_from_json_invalid() {
        let err = FormOptions::from_json(r#"{"validation_mode": "sometimes"}"#).unwrap_err();
        assert!(matches!(err, FormError::ParseError(_)));
    }
}
