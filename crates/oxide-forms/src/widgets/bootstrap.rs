//! Bootstrap 5 form widgets.

use ironhtml::typed::Element;
use ironhtml_elements::{Div, Input, Label, Option_, Select as SelectEl, Textarea};
use oxide_form_state::{FieldSnapshot, FieldValue, SelectOption};

use super::{autosize_rows, state_class, Widget, WidgetProps};

/// HTML input types supported by [`BootstrapTextInput`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputType {
    #[default]
    Text,
    Number,
    Email,
    Password,
    Tel,
    Url,
}

impl InputType {
    /// The `type` attribute value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Email => "email",
            Self::Password => "password",
            Self::Tel => "tel",
            Self::Url => "url",
        }
    }
}

/// Bootstrap 5 text input widget.
#[derive(Debug, Clone, Default)]
pub struct BootstrapTextInput {
    /// The HTML input type.
    pub input_type: InputType,
    /// Placeholder text.
    pub placeholder: Option<String>,
    /// `autocomplete` hint.
    pub autocomplete: Option<String>,
}

impl BootstrapTextInput {
    /// Creates a new text input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an input of the given type.
    pub fn of_type(input_type: InputType) -> Self {
        Self {
            input_type,
            ..Self::default()
        }
    }

    /// Creates a number input.
    pub fn number() -> Self {
        Self::of_type(InputType::Number)
    }

    /// Creates an email input.
    pub fn email() -> Self {
        Self::of_type(InputType::Email)
    }

    /// Creates a password input.
    pub fn password() -> Self {
        Self::of_type(InputType::Password)
    }

    /// Sets the placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    /// Sets the autocomplete hint.
    #[must_use]
    pub fn autocomplete(mut self, hint: impl Into<String>) -> Self {
        self.autocomplete = Some(hint.into());
        self
    }
}

impl Widget for BootstrapTextInput {
    fn render(&self, props: &WidgetProps<'_>, field: &FieldSnapshot) -> String {
        // Empty renders as an empty input, never as a placeholder value.
        let value = field.value.as_text().unwrap_or_default();
        let class = state_class("form-control", props.invalid);

        Element::<Input>::new()
            .attr("type", self.input_type.as_str())
            .class(&class)
            .id(props.id)
            .attr("name", props.name)
            .attr("value", value)
            .when(self.placeholder.is_some(), |e| {
                e.attr("placeholder", self.placeholder.as_deref().unwrap_or(""))
            })
            .when(self.autocomplete.is_some(), |e| {
                e.attr("autocomplete", self.autocomplete.as_deref().unwrap_or(""))
            })
            .when(props.required, |e| e.attr("aria-required", "true"))
            .when(props.invalid, |e| e.attr("aria-invalid", "true"))
            .when(props.described_by.is_some(), |e| {
                e.attr("aria-describedby", props.described_by.unwrap_or(""))
            })
            .when(props.disabled, |e| e.bool_attr("disabled"))
            .render()
    }

    fn input_type(&self) -> &str {
        self.input_type.as_str()
    }
}

/// Bootstrap 5 textarea that grows with its content.
#[derive(Debug, Clone)]
pub struct BootstrapTextarea {
    /// Rows shown for short content.
    pub min_rows: usize,
    /// Rows after which the textarea scrolls instead of growing.
    pub max_rows: Option<usize>,
    /// Characters per row used to count wrapped lines.
    pub cols: Option<usize>,
    /// Placeholder text.
    pub placeholder: Option<String>,
}

impl Default for BootstrapTextarea {
    fn default() -> Self {
        Self {
            min_rows: 2,
            max_rows: None,
            cols: None,
            placeholder: None,
        }
    }
}

impl BootstrapTextarea {
    /// Creates a textarea showing at least `min_rows` rows.
    pub fn new(min_rows: usize) -> Self {
        Self {
            min_rows,
            ..Self::default()
        }
    }

    /// Caps the height.
    #[must_use]
    pub const fn max_rows(mut self, rows: usize) -> Self {
        self.max_rows = Some(rows);
        self
    }

    /// Counts lines longer than `cols` characters as wrapped.
    #[must_use]
    pub const fn cols(mut self, cols: usize) -> Self {
        self.cols = Some(cols);
        self
    }

    /// Sets the placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    /// Rows needed for `text`.
    pub fn rows_for(&self, text: &str) -> usize {
        autosize_rows(text, self.min_rows, self.max_rows, self.cols)
    }
}

impl Widget for BootstrapTextarea {
    fn render(&self, props: &WidgetProps<'_>, field: &FieldSnapshot) -> String {
        let value = field.value.as_text().unwrap_or_default();
        let rows = self.rows_for(value);
        let capped = self
            .max_rows
            .is_some_and(|max| autosize_rows(value, self.min_rows, None, self.cols) > max);
        let style = if capped {
            "resize: none; overflow-y: auto;"
        } else {
            "resize: none; overflow: hidden;"
        };
        let rows_attr = rows.to_string();
        let class = state_class("form-control", props.invalid);

        Element::<Textarea>::new()
            .class(&class)
            .id(props.id)
            .attr("name", props.name)
            .attr("rows", &rows_attr)
            .attr("style", style)
            .when(self.placeholder.is_some(), |t| {
                t.attr("placeholder", self.placeholder.as_deref().unwrap_or(""))
            })
            .when(props.required, |t| t.attr("aria-required", "true"))
            .when(props.invalid, |t| t.attr("aria-invalid", "true"))
            .when(props.described_by.is_some(), |t| {
                t.attr("aria-describedby", props.described_by.unwrap_or(""))
            })
            .when(props.disabled, |t| t.bool_attr("disabled"))
            .text(value)
            .render()
    }

    fn input_type(&self) -> &str {
        "textarea"
    }

    fn decode(&self, raw: &[&str]) -> Result<FieldValue, String> {
        // Browsers submit CRLF line breaks.
        Ok(raw.first().map_or(FieldValue::Empty, |text| {
            FieldValue::from_input(text.replace("\r\n", "\n"))
        }))
    }
}

/// Bootstrap 5 select widget holding a single option.
#[derive(Debug, Clone, Default)]
pub struct BootstrapSelect {
    /// The choices.
    pub options: Vec<SelectOption>,
    /// Text of the blank entry.
    pub placeholder: Option<String>,
    /// Keep the blank entry once an option is chosen.
    pub clearable: bool,
}

impl BootstrapSelect {
    /// Creates a new select widget.
    pub fn new(options: Vec<SelectOption>) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Creates a select whose values double as labels.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(values.into_iter().map(SelectOption::same).collect())
    }

    /// Sets the blank entry's text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    /// Lets the user go back to no selection.
    #[must_use]
    pub const fn clearable(mut self) -> Self {
        self.clearable = true;
        self
    }

    fn find(&self, value: &str) -> Option<&SelectOption> {
        self.options.iter().find(|option| option.value == value)
    }
}

impl Widget for BootstrapSelect {
    fn render(&self, props: &WidgetProps<'_>, field: &FieldSnapshot) -> String {
        let selected = field.value.as_choice().map(|option| option.value.as_str());
        let show_blank = self.clearable || selected.is_none();
        let placeholder = self.placeholder.as_deref().unwrap_or("");
        let class = state_class("form-select", props.invalid);

        Element::<SelectEl>::new()
            .class(&class)
            .id(props.id)
            .attr("name", props.name)
            .when(props.required, |s| s.attr("aria-required", "true"))
            .when(props.invalid, |s| s.attr("aria-invalid", "true"))
            .when(props.described_by.is_some(), |s| {
                s.attr("aria-describedby", props.described_by.unwrap_or(""))
            })
            .when(props.disabled, |s| s.bool_attr("disabled"))
            .when(show_blank, |s| {
                s.child::<Option_, _>(|o| {
                    let o = o.attr("value", "").text(placeholder);
                    if selected.is_none() {
                        o.bool_attr("selected")
                    } else {
                        o
                    }
                })
            })
            .children(&self.options, |option, o: Element<Option_>| {
                let o = o.attr("value", &option.value).text(&option.label);
                if selected == Some(option.value.as_str()) {
                    o.bool_attr("selected")
                } else {
                    o
                }
            })
            .render()
    }

    fn input_type(&self) -> &str {
        "select"
    }

    fn options(&self) -> &[SelectOption] {
        &self.options
    }

    fn requires_options(&self) -> bool {
        true
    }

    fn decode(&self, raw: &[&str]) -> Result<FieldValue, String> {
        match raw.first().copied() {
            None | Some("") => Ok(FieldValue::Empty),
            Some(value) => self
                .find(value)
                .cloned()
                .map(FieldValue::Choice)
                .ok_or_else(|| format!("{value:?} is not one of the available choices")),
        }
    }
}

/// Bootstrap 5 single checkbox widget.
#[derive(Debug, Clone, Default)]
pub struct BootstrapCheckbox {
    /// Text next to the box.
    pub caption: Option<String>,
    /// Whether to render as a switch.
    pub is_switch: bool,
}

impl BootstrapCheckbox {
    /// Creates a new checkbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the text next to the box.
    #[must_use]
    pub fn caption(mut self, text: impl Into<String>) -> Self {
        self.caption = Some(text.into());
        self
    }

    /// Creates a switch-style checkbox.
    pub fn switch() -> Self {
        Self {
            is_switch: true,
            ..Self::default()
        }
    }
}

impl Widget for BootstrapCheckbox {
    fn render(&self, props: &WidgetProps<'_>, field: &FieldSnapshot) -> String {
        let wrapper_class = if self.is_switch {
            "form-check form-switch"
        } else {
            "form-check"
        };
        let input_class = state_class("form-check-input", props.invalid);
        let checked = field.checked();

        Element::<Div>::new()
            .class(wrapper_class)
            .child::<Input, _>(|i| {
                i.attr("type", "checkbox")
                    .class(&input_class)
                    .id(props.id)
                    .attr("name", props.name)
                    .attr("value", "true")
                    .when(self.is_switch, |i| i.attr("role", "switch"))
                    .when(checked, |i| i.bool_attr("checked"))
                    .when(props.required, |i| i.attr("aria-required", "true"))
                    .when(props.invalid, |i| i.attr("aria-invalid", "true"))
                    .when(props.described_by.is_some(), |i| {
                        i.attr("aria-describedby", props.described_by.unwrap_or(""))
                    })
                    .when(props.disabled, |i| i.bool_attr("disabled"))
            })
            .when(self.caption.is_some(), |d| {
                d.child::<Label, _>(|l| {
                    l.class("form-check-label")
                        .attr("for", props.id)
                        .text(self.caption.as_deref().unwrap_or(""))
                })
            })
            .render()
    }

    fn input_type(&self) -> &str {
        "checkbox"
    }

    fn decode(&self, raw: &[&str]) -> Result<FieldValue, String> {
        Ok(FieldValue::Bool(
            raw.iter().any(|v| matches!(*v, "true" | "on" | "1")),
        ))
    }
}

/// Renders one `form-check` entry of an option group.
fn render_group_option(
    kind: &str,
    props: &WidgetProps<'_>,
    index: usize,
    option: &SelectOption,
    checked: bool,
    inline: bool,
) -> String {
    let option_id = format!("{}-{index}", props.id);
    let wrapper_class = if inline {
        "form-check form-check-inline"
    } else {
        "form-check"
    };
    let input_class = state_class("form-check-input", props.invalid);

    Element::<Div>::new()
        .class(wrapper_class)
        .child::<Input, _>(|i| {
            i.attr("type", kind)
                .class(&input_class)
                .id(&option_id)
                .attr("name", props.name)
                .attr("value", &option.value)
                .when(checked, |i| i.bool_attr("checked"))
                .when(props.disabled, |i| i.bool_attr("disabled"))
        })
        .child::<Label, _>(|l| {
            l.class("form-check-label")
                .attr("for", &option_id)
                .text(&option.label)
        })
        .render()
}

/// Renders the wrapper that labels a group of options as one control.
fn render_group(
    kind: &str,
    role: &str,
    props: &WidgetProps<'_>,
    field: &FieldSnapshot,
    options: &[SelectOption],
    inline: bool,
) -> String {
    let entries: String = options
        .iter()
        .enumerate()
        .map(|(index, option)| {
            let checked = field.is_selected(&option.value);
            render_group_option(kind, props, index, option, checked, inline)
        })
        .collect();
    let class = if props.invalid { "is-invalid" } else { "" };

    Element::<Div>::new()
        .id(props.id)
        .attr("role", role)
        .when(!class.is_empty(), |d| d.class(class))
        .when(props.labelled_by.is_some(), |d| {
            d.attr("aria-labelledby", props.labelled_by.unwrap_or(""))
        })
        .when(props.required, |d| d.attr("aria-required", "true"))
        .when(props.invalid, |d| d.attr("aria-invalid", "true"))
        .when(props.described_by.is_some(), |d| {
            d.attr("aria-describedby", props.described_by.unwrap_or(""))
        })
        .raw(&entries)
        .render()
}

/// Bootstrap 5 group of checkboxes sharing one name.
///
/// The field's value is the list of checked option values in the order
/// they were checked.
#[derive(Debug, Clone, Default)]
pub struct BootstrapCheckboxGroup {
    /// The choices.
    pub options: Vec<SelectOption>,
    /// Lay the boxes out on one line.
    pub inline: bool,
}

impl BootstrapCheckboxGroup {
    /// Creates a new checkbox group.
    pub fn new(options: Vec<SelectOption>) -> Self {
        Self {
            options,
            inline: false,
        }
    }

    /// Lays the boxes out on one line.
    #[must_use]
    pub const fn inline(mut self) -> Self {
        self.inline = true;
        self
    }
}

impl Widget for BootstrapCheckboxGroup {
    fn render(&self, props: &WidgetProps<'_>, field: &FieldSnapshot) -> String {
        render_group("checkbox", "group", props, field, &self.options, self.inline)
    }

    fn input_type(&self) -> &str {
        "checkbox"
    }

    fn options(&self) -> &[SelectOption] {
        &self.options
    }

    fn requires_options(&self) -> bool {
        true
    }

    fn is_group(&self) -> bool {
        true
    }

    fn decode(&self, raw: &[&str]) -> Result<FieldValue, String> {
        let mut selected: Vec<String> = Vec::new();
        for value in raw {
            if !self.options.iter().any(|option| option.value == *value) {
                return Err(format!("{value:?} is not one of the available choices"));
            }
            if !selected.iter().any(|item| item.as_str() == *value) {
                selected.push((*value).to_string());
            }
        }
        Ok(FieldValue::List(selected))
    }
}

/// Bootstrap 5 group of radio buttons; at most one is selected.
#[derive(Debug, Clone, Default)]
pub struct BootstrapRadioGroup {
    /// The choices.
    pub options: Vec<SelectOption>,
    /// Lay the buttons out on one line.
    pub inline: bool,
}

impl BootstrapRadioGroup {
    /// Creates a new radio group.
    pub fn new(options: Vec<SelectOption>) -> Self {
        Self {
            options,
            inline: false,
        }
    }

    /// Lays the buttons out on one line.
    #[must_use]
    pub const fn inline(mut self) -> Self {
        self.inline = true;
        self
    }
}

impl Widget for BootstrapRadioGroup {
    fn render(&self, props: &WidgetProps<'_>, field: &FieldSnapshot) -> String {
        render_group("radio", "radiogroup", props, field, &self.options, self.inline)
    }

    fn input_type(&self) -> &str {
        "radio"
    }

    fn options(&self) -> &[SelectOption] {
        &self.options
    }

    fn requires_options(&self) -> bool {
        true
    }

    fn is_group(&self) -> bool {
        true
    }

    fn decode(&self, raw: &[&str]) -> Result<FieldValue, String> {
        match raw {
            [] | [""] => Ok(FieldValue::Empty),
            [value] if self.options.iter().any(|option| option.value == *value) => {
                Ok(FieldValue::Text((*value).to_string()))
            }
            [value] => Err(format!("{value:?} is not one of the available choices")),
            _ => Err("only one choice may be selected".to_string()),
        }
    }
}
