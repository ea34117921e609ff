//! Labeled controls and their rendering.

use ironhtml::html;
use ironhtml::typed::Element;
use ironhtml_elements::{Div, Label, Span};
use oxide_form_state::{FieldSnapshot, FieldValue, FormState};

use crate::widgets::{Widget, WidgetProps};

/// A labeled form control: one field name, one widget.
pub struct Control {
    /// Field name; also the element id the label points to.
    pub name: String,
    /// Label text.
    pub label: String,
    /// Show the required marker. Advisory only: nothing is enforced.
    pub required: bool,
    /// The widget to render.
    pub widget: Box<dyn Widget>,
    /// Help text under the widget.
    pub help_text: Option<String>,
    /// Initial value.
    pub initial: Option<FieldValue>,
    /// Whether the control is disabled.
    pub disabled: bool,
}

impl std::fmt::Debug for Control {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Control")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("required", &self.required)
            .field("input_type", &self.widget.input_type())
            .field("help_text", &self.help_text)
            .field("initial", &self.initial)
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

impl Control {
    /// Creates a new control.
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        widget: impl Widget + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            required: false,
            widget: Box::new(widget),
            help_text: None,
            initial: None,
            disabled: false,
        }
    }

    /// Shows the required marker.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the help text.
    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = Some(text.into());
        self
    }

    /// Sets the initial value.
    #[must_use]
    pub fn initial(mut self, value: impl Into<FieldValue>) -> Self {
        self.initial = Some(value.into());
        self
    }

    /// Disables the control.
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Id of the label element.
    pub fn label_id(&self) -> String {
        format!("{}-label", self.name)
    }

    /// Id of the error element.
    pub fn error_id(&self) -> String {
        error_id(&self.name)
    }

    /// Id of the help text element.
    pub fn help_id(&self) -> String {
        format!("{}-help", self.name)
    }
}

fn error_id(name: &str) -> String {
    format!("{name}-error")
}

/// The marker appended to required labels.
pub fn required_marker() -> String {
    Element::<Span>::new()
        .class("required-indicator text-danger ms-1")
        .attr("role", "presentation")
        .attr("aria-hidden", "true")
        .text("*")
        .render()
}

/// Renders a control's label. Group widgets have no single input to point
/// `for` at; their wrapper references the label by id instead.
pub fn render_label(control: &Control) -> String {
    let label_id = control.label_id();

    Element::<Label>::new()
        .id(&label_id)
        .when(!control.widget.is_group(), |l| l.attr("for", &control.name))
        .class("form-label")
        .text(&control.label)
        .when(control.required, |l| l.raw(required_marker()))
        .render()
}

/// Renders the field's visible error, or nothing when there is none.
pub fn render_error(field: &FieldSnapshot) -> String {
    match &field.error {
        Some(message) => {
            let id = error_id(&field.name);
            Element::<Div>::new()
                .class("invalid-feedback d-block")
                .id(&id)
                .text(message)
                .render()
        }
        None => String::new(),
    }
}

/// Renders a control against a form's current state.
pub fn render_control(control: &Control, form: &FormState) -> String {
    render_control_field(control, &form.field(&control.name))
}

/// Renders a control for an already captured field snapshot.
pub fn render_control_field(control: &Control, field: &FieldSnapshot) -> String {
    let invalid = field.invalid();
    let label_id = control.label_id();
    let error_id = control.error_id();
    let help_id = control.help_id();

    let mut described = Vec::new();
    if invalid {
        described.push(error_id.as_str());
    }
    if control.help_text.is_some() {
        described.push(help_id.as_str());
    }
    let described_by = described.join(" ");

    let props = WidgetProps {
        id: &control.name,
        name: &control.name,
        invalid,
        required: control.required,
        disabled: control.disabled,
        described_by: (!described_by.is_empty()).then_some(described_by.as_str()),
        labelled_by: Some(label_id.as_str()),
    };
    let widget_html = control.widget.render(&props, field);
    let help_text = control.help_text.as_deref();

    html! { div.class("mb-3") }
        .when(invalid, |d| d.attr("data-invalid", "true"))
        .raw(render_label(control))
        .raw(&widget_html)
        .raw(render_error(field))
        .when(help_text.is_some(), |d| {
            d.child::<Div, _>(|h| {
                h.class("form-text")
                    .id(&help_id)
                    .text(help_text.unwrap_or(""))
            })
        })
        .render()
}
