//! Form widgets for rendering HTML inputs.

mod bootstrap;

pub use bootstrap::{
    BootstrapCheckbox, BootstrapCheckboxGroup, BootstrapRadioGroup, BootstrapSelect,
    BootstrapTextInput, BootstrapTextarea, InputType,
};

use oxide_form_state::{FieldSnapshot, FieldValue, SelectOption};

/// Attributes the surrounding control hands to its widget.
#[derive(Debug, Clone, Copy, Default)]
pub struct WidgetProps<'a> {
    /// Element id; the label's `for` points here.
    pub id: &'a str,
    /// Submission name.
    pub name: &'a str,
    /// Draw the invalid state.
    pub invalid: bool,
    /// Mark the input as required for assistive technology only.
    pub required: bool,
    /// Render the input disabled.
    pub disabled: bool,
    /// Ids of the error and help elements describing the input.
    pub described_by: Option<&'a str>,
    /// Id of the control's label, used by option groups.
    pub labelled_by: Option<&'a str>,
}

/// Trait for form widgets that render HTML inputs.
pub trait Widget: Send + Sync {
    /// Renders the widget for the given field state.
    fn render(&self, props: &WidgetProps<'_>, field: &FieldSnapshot) -> String;

    /// Returns the HTML input type.
    fn input_type(&self) -> &str {
        "text"
    }

    /// Options offered by select and group widgets.
    fn options(&self) -> &[SelectOption] {
        &[]
    }

    /// Whether the widget needs at least one option.
    fn requires_options(&self) -> bool {
        false
    }

    /// Whether the widget renders several inputs under one label.
    fn is_group(&self) -> bool {
        false
    }

    /// Turns the raw values submitted under the field's name into a value.
    fn decode(&self, raw: &[&str]) -> Result<FieldValue, String> {
        Ok(raw
            .first()
            .map_or(FieldValue::Empty, |text| FieldValue::from_input(*text)))
    }
}

/// Appends Bootstrap's invalid modifier to a base class.
pub(crate) fn state_class(base: &str, invalid: bool) -> String {
    if invalid {
        format!("{base} is-invalid")
    } else {
        base.to_string()
    }
}

/// Number of rows a textarea needs to show `text` without scrolling.
///
/// Lines longer than `cols` characters count as wrapped. The result is at
/// least `min_rows` (and at least one) and at most `max_rows` when given.
pub fn autosize_rows(text: &str, min_rows: usize, max_rows: Option<usize>, cols: Option<usize>) -> usize {
    let lines: usize = text
        .split('\n')
        .map(|line| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            match cols {
                Some(cols) if cols > 0 => line.chars().count().div_ceil(cols).max(1),
                _ => 1,
            }
        })
        .sum();
    let floor = min_rows.max(1);
    let rows = lines.max(floor);
    max_rows.map_or(rows, |max| rows.min(max.max(floor)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_autosize_rows() {
        assert_eq!(autosize_rows("", 1, None, None), 1);
        assert_eq!(autosize_rows("", 3, None, None), 3);
        assert_eq!(autosize_rows("a\nb\nc\nd", 2, None, None), 4);
        assert_eq!(autosize_rows("a\nb\nc\nd", 2, Some(3), None), 3);
        assert_eq!(autosize_rows("a\r\nb", 1, None, None), 2);
    }

    #[test]
    fn test_autosize_rows_wraps_long_lines() {
        assert_eq!(autosize_rows("abcdefghij", 1, None, Some(4)), 3);
        assert_eq!(autosize_rows("日本語の文章", 1, None, Some(3)), 2);
        assert_eq!(autosize_rows("abc", 1, None, Some(0)), 1);
    }

    #[test]
    fn test_autosize_rows_max_below_min() {
        assert_eq!(autosize_rows("a\nb\nc\nd\ne", 4, Some(2), None), 4);
    }

    #[test]
    fn test_state_class() {
        assert_eq!(state_class("form-control", false), "form-control");
        assert_eq!(state_class("form-control", true), "form-control is-invalid");
    }

    #[test]
    fn test_default_decode() {
        struct Plain;
        impl Widget for Plain {
            fn render(&self, _: &WidgetProps<'_>, _: &FieldSnapshot) -> String {
                String::new()
            }
        }
        assert_eq!(Plain.decode(&[]), Ok(FieldValue::Empty));
        assert_eq!(Plain.decode(&[""]), Ok(FieldValue::Empty));
        assert_eq!(Plain.decode(&["30"]), Ok(FieldValue::Text("30".into())));
    }
}
