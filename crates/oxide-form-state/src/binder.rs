//! Field binding: one field's value, metadata and change handlers.

use crate::field::FieldSnapshot;
use crate::state::FormState;
use crate::value::{FieldValue, SelectOption};

/// Read/write access to a single named field of a [`FormState`].
///
/// Obtained from [`FormState::bind`], which registers the field first.
/// Writes go through the container, so validation and error visibility
/// follow the form's options.
#[derive(Debug)]
pub struct FieldBinder<'a> {
    form: &'a mut FormState,
    name: String,
}

impl<'a> FieldBinder<'a> {
    pub(crate) fn new(form: &'a mut FormState, name: &str) -> Self {
        Self {
            form,
            name: name.to_string(),
        }
    }

    /// The bound field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value.
    pub fn value(&self) -> &FieldValue {
        self.form.values().get(&self.name)
    }

    /// Whether the field has lost focus at least once.
    pub fn touched(&self) -> bool {
        self.form.field(&self.name).touched()
    }

    /// The error to display, if any.
    pub fn error(&self) -> Option<&str> {
        self.form.visible_error(&self.name)
    }

    /// Full read-only view of the field.
    pub fn snapshot(&self) -> FieldSnapshot {
        self.form.field(&self.name)
    }

    /// Checked state of a single checkbox.
    pub fn checked(&self) -> bool {
        matches!(self.value(), FieldValue::Bool(true))
    }

    /// Whether `option` is part of the field's selection.
    pub fn is_selected(&self, option: &str) -> bool {
        self.value().contains(option)
    }

    /// Change handler.
    pub fn change(&mut self, value: impl Into<FieldValue>) {
        self.form.change(&self.name, value);
    }

    /// Focus handler.
    pub fn focus(&mut self) {
        self.form.focus(&self.name);
    }

    /// Blur handler.
    pub fn blur(&mut self) {
        self.form.blur(&self.name);
    }

    /// Change handler of a single checkbox.
    pub fn set_checked(&mut self, checked: bool) {
        self.form.set_checked(&self.name, checked);
    }

    /// Change handler of one checkbox-group member.
    pub fn toggle(&mut self, option: &str) {
        self.form.toggle(&self.name, option);
    }

    /// Change handler of a select control.
    pub fn select(&mut self, option: Option<SelectOption>) {
        self.form.select_option(&self.name, option);
    }

    /// Change handler of a radio group.
    pub fn choose(&mut self, option: &str) {
        self.form.choose(&self.name, option);
    }
}
