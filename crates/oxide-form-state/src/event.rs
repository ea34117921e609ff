//! UI events applied to a form container.

use serde::{Deserialize, Serialize};

use crate::value::FieldValue;

/// One discrete user or system interaction.
///
/// Events arrive one at a time from the UI event loop and are applied
/// with [`FormState::dispatch`](crate::FormState::dispatch). Their JSON
/// form is tagged by `type`:
///
/// ```json
/// {"type": "change", "field": "age", "value": "30"}
/// {"type": "toggle", "field": "interests", "value": "music"}
/// {"type": "blur", "field": "age"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldEvent {
    /// A widget gained focus.
    Focus { field: String },
    /// A widget reported a new value.
    Change { field: String, value: FieldValue },
    /// A widget lost focus.
    Blur { field: String },
    /// A checkbox-group member was clicked.
    Toggle { field: String, value: String },
    /// The form was reset to its initial values.
    Reset,
}

impl FieldEvent {
    /// Returns the field the event targets, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Focus { field }
            | Self::Change { field, .. }
            | Self::Blur { field }
            | Self::Toggle { field, .. } => Some(field),
            Self::Reset => None,
        }
    }
}
