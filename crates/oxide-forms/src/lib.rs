//! # oxide-forms
//!
//! Labeled form controls with Bootstrap 5 widgets, bound to an
//! `oxide-form-state` form.
//!
//! This crate provides:
//! - Labeled controls with a required marker and an error display
//! - Bootstrap 5 widgets for text, number, textarea, select, checkbox,
//!   checkbox-group and radio-group inputs
//! - Form layouts, rendering and decoding of submitted values
//! - Views that re-render only when their own field changes
//!
//! ## Quick Start
//!
//! ```rust
//! use oxide_forms::{Control, FormBuilder, FormOptions, FormState};
//! use oxide_forms::widgets::BootstrapTextInput;
//!
//! let layout = FormBuilder::new()
//!     .control(
//!         Control::new("city", "City", BootstrapTextInput::new())
//!             .required()
//!             .help_text("Municipality name"),
//!     )
//!     .control(Control::new("age", "Age", BootstrapTextInput::number()))
//!     .submit_label("SAVE")
//!     .build()
//!     .unwrap();
//!
//! let mut form = FormState::new(layout.initial_values(), FormOptions::default());
//! layout.mount(&mut form);
//!
//! let html = layout.render(&form, "/address", "post");
//! assert!(html.contains("required-indicator"));
//! ```
//!
//! ## Using Field Helpers
//!
//! ```rust
//! use oxide_forms::fields::{
//!     checkbox_group_control, number_control, select_control, text_control,
//! };
//!
//! let controls = vec![
//!     text_control("city", "City", true),
//!     number_control("age", "Age", false),
//!     select_control("prefecture", "Prefecture", &[
//!         ("北海道", "北海道"),
//!         ("新潟県", "新潟県"),
//!     ], true),
//!     checkbox_group_control("interests", "Interests", &[
//!         ("A", "A"),
//!         ("B", "B"),
//!     ], false),
//! ];
//! assert_eq!(controls.len(), 4);
//! ```
//!
//! ## Widgets
//!
//! Available Bootstrap 5 widgets:
//! - `BootstrapTextInput` - Text, email, password, number inputs
//! - `BootstrapTextarea` - Multi-line text input that grows with its content
//! - `BootstrapSelect` - Dropdown select
//! - `BootstrapCheckbox` - Checkbox with optional switch style
//! - `BootstrapCheckboxGroup` - Checkboxes sharing one name
//! - `BootstrapRadioGroup` - Radio button group

mod control;
pub mod fields;
mod form;
pub mod messages;
mod view;
pub mod widgets;

pub use control::{
    render_control, render_control_field, render_error, render_label, required_marker, Control,
};
pub use form::{render_form, FormBuilder, FormLayout, FormScreen};
pub use view::{ControlView, ErrorDisplay, LayoutView};

pub use oxide_form_state::{
    ErrorMap, FieldBinder, FieldEvent, FieldSnapshot, FieldValue, FormError, FormOptions,
    FormState, FormValues, Result, SelectOption, SubmitError, SubmitOutcome, SubmitStatus,
    ValidationMode,
};
