//! Checkbox control helpers.

use super::to_options;
use crate::control::Control;
use crate::widgets::{BootstrapCheckbox, BootstrapCheckboxGroup};

/// Creates a single checkbox control with `caption` next to the box.
pub fn checkbox_control(name: &str, label: &str, caption: &str) -> Control {
    Control::new(name, label, BootstrapCheckbox::new().caption(caption))
}

/// Creates a switch-style checkbox control.
pub fn switch_control(name: &str, label: &str, caption: &str) -> Control {
    Control::new(name, label, BootstrapCheckbox::switch().caption(caption))
}

/// Creates a checkbox group control. The value lists the checked options
/// in the order they were checked.
pub fn checkbox_group_control(
    name: &str,
    label: &str,
    choices: &[(&str, &str)],
    required: bool,
) -> Control {
    let control = Control::new(name, label, BootstrapCheckboxGroup::new(to_options(choices)));
    if required {
        control.required()
    } else {
        control
    }
}
