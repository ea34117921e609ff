//! Shorthand constructors for common controls.

mod checkbox;
mod select;
mod text;

pub use checkbox::{checkbox_control, checkbox_group_control, switch_control};
pub use select::{radio_group_control, select_control};
pub use text::{email_control, number_control, password_control, text_control, textarea_control};

use oxide_form_state::SelectOption;

fn to_options(choices: &[(&str, &str)]) -> Vec<SelectOption> {
    choices
        .iter()
        .map(|(value, label)| SelectOption::new(*value, *label))
        .collect()
}
