//! Single-choice control helpers.

use super::to_options;
use crate::control::Control;
use crate::widgets::{BootstrapRadioGroup, BootstrapSelect};

/// Creates a select control. The value is the chosen option.
pub fn select_control(
    name: &str,
    label: &str,
    choices: &[(&str, &str)],
    required: bool,
) -> Control {
    let widget = BootstrapSelect::new(to_options(choices));
    let control = Control::new(name, label, widget);
    if required {
        control.required()
    } else {
        control
    }
}

/// Creates a radio group control. The value is the chosen option's value.
pub fn radio_group_control(
    name: &str,
    label: &str,
    choices: &[(&str, &str)],
    required: bool,
) -> Control {
    let widget = BootstrapRadioGroup::new(to_options(choices));
    let control = Control::new(name, label, widget);
    if required {
        control.required()
    } else {
        control
    }
}
