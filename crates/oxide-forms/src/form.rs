//! Form layouts and form rendering.

use std::collections::{BTreeMap, BTreeSet};

use ironhtml::html;
use ironhtml_elements::Div;
use oxide_form_state::{
    ErrorMap, FieldPath, FormError, FormOptions, FormState, FormValues, Result,
};
use tracing::debug;

use crate::control::{render_control, Control};

/// Ordered, validated set of controls making up one form.
#[derive(Debug)]
pub struct FormLayout {
    controls: Vec<Control>,
    submit_label: String,
}

impl FormLayout {
    /// The controls in display order.
    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    /// Looks up a control by field name.
    pub fn control(&self, name: &str) -> Option<&Control> {
        self.controls.iter().find(|control| control.name == name)
    }

    /// Number of controls.
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// Returns whether the layout has no controls.
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Text of the submit button.
    pub fn submit_label(&self) -> &str {
        &self.submit_label
    }

    /// Initial values declared on the controls.
    pub fn initial_values(&self) -> FormValues {
        self.controls
            .iter()
            .filter_map(|control| {
                control
                    .initial
                    .clone()
                    .map(|value| (control.name.clone(), value))
            })
            .collect()
    }

    /// Registers every control's field with the form.
    pub fn mount(&self, form: &mut FormState) {
        for control in &self.controls {
            form.register(&control.name);
        }
    }

    /// Decodes submitted `name=value` pairs into values for every control.
    ///
    /// Pairs for names no control uses are ignored. A control with no pair
    /// decodes its widget's "nothing submitted" value.
    pub fn decode<K, V>(&self, pairs: &[(K, V)]) -> Result<FormValues>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut raw: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (key, value) in pairs {
            raw.entry(key.as_ref()).or_default().push(value.as_ref());
        }

        let mut values = FormValues::new();
        for control in &self.controls {
            let submitted = raw.get(control.name.as_str()).map_or(&[][..], Vec::as_slice);
            let value = control
                .widget
                .decode(submitted)
                .map_err(|message| FormError::InvalidValue {
                    field: control.name.clone(),
                    message,
                })?;
            values.set(&control.name, value);
        }
        debug!(fields = values.len(), "decoded form submission");
        Ok(values)
    }

    /// Decodes a submission and feeds it to the form as user changes.
    pub fn apply<K, V>(&self, form: &mut FormState, pairs: &[(K, V)]) -> Result<()>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let values = self.decode(pairs)?;
        for (name, value) in values.iter() {
            form.change(name, value.clone());
        }
        Ok(())
    }

    /// Renders the whole form with Bootstrap 5 styling.
    pub fn render(&self, form: &FormState, action: &str, method: &str) -> String {
        render_form(self, form, action, method)
    }
}

/// Builder for [`FormLayout`].
#[derive(Debug, Default)]
pub struct FormBuilder {
    controls: Vec<Control>,
    submit_label: Option<String>,
}

impl FormBuilder {
    /// Creates a new form builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a control.
    #[must_use]
    pub fn control(mut self, control: Control) -> Self {
        self.controls.push(control);
        self
    }

    /// Sets the submit button text.
    #[must_use]
    pub fn submit_label(mut self, label: impl Into<String>) -> Self {
        self.submit_label = Some(label.into());
        self
    }

    /// Checks the controls and builds the layout.
    ///
    /// # Errors
    ///
    /// Fails on an empty or malformed field name, on two controls sharing
    /// a name, on option widgets without options and on duplicate option
    /// values within one control.
    pub fn build(self) -> Result<FormLayout> {
        let mut names = BTreeSet::new();
        for control in &self.controls {
            check_control(control)?;
            if !names.insert(control.name.as_str()) {
                return Err(FormError::DuplicateField(control.name.clone()));
            }
        }
        Ok(FormLayout {
            controls: self.controls,
            submit_label: self.submit_label.unwrap_or_else(|| "Submit".to_string()),
        })
    }
}

fn check_control(control: &Control) -> Result<()> {
    if control.name.is_empty() {
        return Err(FormError::InvalidControl {
            field: String::new(),
            message: "field name must not be empty".to_string(),
        });
    }
    FieldPath::parse(&control.name)?;

    let options = control.widget.options();
    if control.widget.requires_options() && options.is_empty() {
        return Err(FormError::InvalidControl {
            field: control.name.clone(),
            message: "at least one option is required".to_string(),
        });
    }
    let mut seen = BTreeSet::new();
    for option in options {
        if !seen.insert(option.value.as_str()) {
            return Err(FormError::DuplicateOption {
                field: control.name.clone(),
                value: option.value.clone(),
            });
        }
    }
    Ok(())
}

/// Renders a complete form with Bootstrap 5 styling.
pub fn render_form(layout: &FormLayout, form: &FormState, action: &str, method: &str) -> String {
    let mut el = html! {
        form.action(#action).method(#method)
    };
    el = el.bool_attr("novalidate");

    // Form-level failure from the submit handler
    if let Some(error) = form.submit_error() {
        el = el.child::<Div, _>(|d| {
            d.class("alert alert-danger")
                .attr("role", "alert")
                .text(error.message())
        });
    }

    for control in layout.controls() {
        let control_html = render_control(control, form);
        el = el.child::<Div, _>(|d| d.raw(&control_html));
    }

    let submit_label = layout.submit_label();
    let submitting = form.is_submitting();
    el = el.child::<Div, _>(|d| {
        let btn = html! {
            button.type_("submit").class("btn btn-primary") {
                #submit_label
            }
        }
        .when(submitting, |b| b.bool_attr("disabled").attr("aria-busy", "true"));
        d.raw(btn.render())
    });

    el.render()
}

/// A screen: a form layout plus the behavior attached to it.
pub trait FormScreen {
    /// Builds the screen's controls.
    fn layout() -> Result<FormLayout>;

    /// Values the form starts with, on top of the controls' own initials.
    fn initial_values() -> FormValues {
        FormValues::new()
    }

    /// Checks the values. The default accepts everything.
    fn validate(_values: &FormValues) -> ErrorMap {
        ErrorMap::new()
    }

    /// Builds the layout and a form state with every field registered.
    fn form_state(options: FormOptions) -> Result<(FormLayout, FormState)>
    where
        Self: Sized + 'static,
    {
        let layout = Self::layout()?;
        let mut initial = layout.initial_values();
        for (name, value) in Self::initial_values().iter() {
            initial.set(name, value.clone());
        }
        let mut form = FormState::new(initial, options).with_validator(Self::validate);
        layout.mount(&mut form);
        Ok((layout, form))
    }
}

#[cfg(test)]
mod tests {
    use oxide_form_state::{FieldValue, SelectOption, SubmitError, SubmitOutcome};

    use super::*;
    use crate::widgets::{
        BootstrapCheckbox, BootstrapCheckboxGroup, BootstrapSelect, BootstrapTextInput,
    };

    fn layout() -> FormLayout {
        FormBuilder::new()
            .control(Control::new("city", "City", BootstrapTextInput::new()).initial("Niigata"))
            .control(Control::new(
                "prefecture",
                "Prefecture",
                BootstrapSelect::from_values(["北海道", "新潟県"]),
            ))
            .control(Control::new("agree", "Terms", BootstrapCheckbox::new()))
            .control(Control::new(
                "interests",
                "Interests",
                BootstrapCheckboxGroup::new(vec![SelectOption::same("A"), SelectOption::same("B")]),
            ))
            .submit_label("SAVE")
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_rejects_duplicate_names() {
        let result = FormBuilder::new()
            .control(Control::new("city", "City", BootstrapTextInput::new()))
            .control(Control::new("city", "Town", BootstrapTextInput::new()))
            .build();
        assert_eq!(result.unwrap_err(), FormError::DuplicateField("city".into()));
    }

    #[test]
    fn test_build_rejects_empty_name() {
        let result = FormBuilder::new()
            .control(Control::new("", "City", BootstrapTextInput::new()))
            .build();
        assert!(matches!(result, Err(FormError::InvalidControl { .. })));
    }

    #[test]
    fn test_build_rejects_malformed_path() {
        let result = FormBuilder::new()
            .control(Control::new("tags[", "Tags", BootstrapTextInput::new()))
            .build();
        assert!(matches!(result, Err(FormError::InvalidPath { .. })));
    }

    #[test]
    fn test_build_rejects_duplicate_options() {
        let result = FormBuilder::new()
            .control(Control::new(
                "prefecture",
                "Prefecture",
                BootstrapSelect::from_values(["新潟県", "新潟県"]),
            ))
            .build();
        assert!(matches!(result, Err(FormError::DuplicateOption { .. })));
    }

    #[test]
    fn test_build_rejects_missing_options() {
        let result = FormBuilder::new()
            .control(Control::new("prefecture", "Prefecture", BootstrapSelect::default()))
            .build();
        assert!(matches!(result, Err(FormError::InvalidControl { .. })));
    }

    #[test]
    fn test_initial_values_and_mount() {
        let layout = layout();
        assert_eq!(layout.len(), 4);
        assert_eq!(layout.initial_values().get("city"), &FieldValue::Text("Niigata".into()));

        let mut form = FormState::new(layout.initial_values(), FormOptions::default());
        layout.mount(&mut form);
        assert_eq!(form.registered().count(), 4);
    }

    #[test]
    fn test_decode_submission() {
        let layout = layout();
        let values = layout
            .decode(&[
                ("city", "Niigata"),
                ("prefecture", "新潟県"),
                ("interests", "B"),
                ("interests", "A"),
                ("csrf", "token"),
            ])
            .unwrap();
        assert_eq!(values.get("city"), &FieldValue::Text("Niigata".into()));
        assert_eq!(
            values.get("prefecture"),
            &FieldValue::Choice(SelectOption::same("新潟県"))
        );
        assert_eq!(values.get("agree"), &FieldValue::Bool(false));
        assert_eq!(
            values.get("interests"),
            &FieldValue::List(vec!["B".into(), "A".into()])
        );
        assert!(!values.contains("csrf"));
    }

    #[test]
    fn test_decode_unknown_option() {
        let err = layout().decode(&[("prefecture", "東京都")]).unwrap_err();
        assert!(matches!(err, FormError::InvalidValue { ref field, .. } if field == "prefecture"));
    }

    #[test]
    fn test_apply_marks_fields_dirty() {
        let layout = layout();
        let mut form = FormState::new(layout.initial_values(), FormOptions::default());
        layout.mount(&mut form);
        layout.apply(&mut form, &[("city", "Nagaoka")]).unwrap();
        assert!(form.field("city").dirty);
        assert_eq!(form.values().get("city"), &FieldValue::Text("Nagaoka".into()));
    }

    #[test]
    fn test_render_form() {
        let layout = layout();
        let form = FormState::new(layout.initial_values(), FormOptions::default());
        let html = layout.render(&form, "/address", "post");
        assert!(html.contains(r#"action="/address""#));
        assert!(html.contains("SAVE"));
        assert!(html.contains("btn btn-primary"));
        assert!(!html.contains("alert-danger"));
        assert_eq!(html.matches("class=\"mb-3").count(), 4);
    }

    #[test]
    fn test_render_failed_submit() {
        let layout = layout();
        let mut form = FormState::new(layout.initial_values(), FormOptions::default());
        let outcome = form
            .handle_submit(&|_: &FormValues| -> std::result::Result<(), SubmitError> {
                Err(SubmitError::new("server unavailable"))
            })
            .unwrap();
        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        let html = layout.render(&form, "/address", "post");
        assert!(html.contains("alert alert-danger"));
        assert!(html.contains("server unavailable"));
    }

    #[test]
    fn test_submit_button_disabled_while_submitting() {
        let layout = layout();
        let mut form = FormState::new(layout.initial_values(), FormOptions::default());
        form.begin_submit().unwrap();
        let html = layout.render(&form, "/address", "post");
        assert!(html.contains(r#"aria-busy="true""#));
    }

    struct Plain;

    impl FormScreen for Plain {
        fn layout() -> Result<FormLayout> {
            FormBuilder::new()
                .control(Control::new("firstName", "First name", BootstrapTextInput::new()))
                .build()
        }

        fn initial_values() -> FormValues {
            FormValues::new().with("firstName", "Hanako")
        }
    }

    #[test]
    fn test_screen_open() {
        let (layout, form) = Plain::form_state(FormOptions::default()).unwrap();
        assert_eq!(layout.submit_label(), "Submit");
        assert_eq!(form.values().get("firstName"), &FieldValue::Text("Hanako".into()));
        assert!(form.registered().any(|name| name == "firstName"));
    }
}
