//! Submission lifecycle types and handlers.

use tracing::info;

use crate::error::{ErrorMap, SubmitError};
use crate::value::FormValues;

/// Where a form stands in its submit cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    /// Nothing in flight.
    #[default]
    Idle,
    /// Values passed validation and the handler is running.
    Submitting,
    /// The last handler call succeeded.
    Submitted,
    /// The last handler call failed.
    Failed,
}

/// Result of the first submit phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAttempt {
    /// Validation rejected the values; nothing is in flight.
    Invalid(ErrorMap),
    /// The values are valid and the form is now `Submitting`.
    Ready(FormValues),
}

/// Result of a complete submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation rejected the values; the handler was not called.
    Invalid(ErrorMap),
    /// The handler accepted the values.
    Submitted,
    /// The handler failed.
    Failed(SubmitError),
}

/// Receives the final values of a valid form.
pub trait SubmitHandler {
    /// Handles one submit.
    fn on_submit(&self, values: &FormValues) -> Result<(), SubmitError>;
}

impl<F> SubmitHandler for F
where
    F: Fn(&FormValues) -> Result<(), SubmitError>,
{
    fn on_submit(&self, values: &FormValues) -> Result<(), SubmitError> {
        self(values)
    }
}

/// Handler that only logs the submitted values.
#[derive(Debug, Clone, Default)]
pub struct LogSubmit {
    form: Option<String>,
}

impl LogSubmit {
    /// Creates a handler that logs under the given form name.
    pub fn named(form: impl Into<String>) -> Self {
        Self {
            form: Some(form.into()),
        }
    }
}

impl SubmitHandler for LogSubmit {
    fn on_submit(&self, values: &FormValues) -> Result<(), SubmitError> {
        let json = values
            .to_nested_json()
            .map_err(|e| SubmitError::new(e.to_string()))?;
        info!(
            form = self.form.as_deref().unwrap_or("form"),
            values = %json,
            "form submitted"
        );
        Ok(())
    }
}
