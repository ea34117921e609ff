//! Text control helpers.

use crate::control::Control;
use crate::widgets::{BootstrapTextInput, BootstrapTextarea};

fn with_marker(control: Control, required: bool) -> Control {
    if required {
        control.required()
    } else {
        control
    }
}

/// Creates a single-line text control.
pub fn text_control(name: &str, label: &str, required: bool) -> Control {
    with_marker(Control::new(name, label, BootstrapTextInput::new()), required)
}

/// Creates a number control. The value stays text; parsing is up to the
/// validation function.
pub fn number_control(name: &str, label: &str, required: bool) -> Control {
    with_marker(Control::new(name, label, BootstrapTextInput::number()), required)
}

/// Creates an email control.
pub fn email_control(name: &str, label: &str, required: bool) -> Control {
    with_marker(
        Control::new(
            name,
            label,
            BootstrapTextInput::email().autocomplete("email"),
        ),
        required,
    )
}

/// Creates a password control.
pub fn password_control(name: &str, label: &str, required: bool) -> Control {
    with_marker(
        Control::new(
            name,
            label,
            BootstrapTextInput::password().autocomplete("current-password"),
        ),
        required,
    )
}

/// Creates a growing textarea control.
pub fn textarea_control(name: &str, label: &str, min_rows: usize, required: bool) -> Control {
    with_marker(
        Control::new(name, label, BootstrapTextarea::new(min_rows)),
        required,
    )
}
