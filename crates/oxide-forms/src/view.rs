//! Views that re-render only when their own field changes.

use oxide_form_state::{FieldSubscription, FormState, SubscriptionMask};

use crate::control::{render_control_field, render_error, Control};
use crate::form::FormLayout;

/// Tracks one field's visible error.
///
/// Value and focus changes do not produce output; only a change of the
/// displayed message does.
#[derive(Debug, Clone)]
pub struct ErrorDisplay {
    subscription: FieldSubscription,
}

impl ErrorDisplay {
    /// Creates a display for the named field.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            subscription: FieldSubscription::new(name, SubscriptionMask::ERROR),
        }
    }

    /// The field this display follows.
    pub fn name(&self) -> &str {
        self.subscription.name()
    }

    /// Returns the new markup when the displayed error changed since the
    /// last poll. The first poll always returns.
    pub fn poll(&mut self, form: &FormState) -> Option<String> {
        self.subscription
            .poll(form)
            .map(|field| render_error(&field))
    }
}

/// Tracks one control's field.
#[derive(Debug, Clone)]
pub struct ControlView {
    subscription: FieldSubscription,
}

impl ControlView {
    /// Creates a view for the control's field.
    pub fn new(control: &Control) -> Self {
        Self {
            subscription: FieldSubscription::new(&control.name, SubscriptionMask::ALL),
        }
    }

    /// Returns the control's markup when its field changed since the last
    /// refresh.
    pub fn refresh(&mut self, control: &Control, form: &FormState) -> Option<String> {
        self.subscription
            .poll(form)
            .map(|field| render_control_field(control, &field))
    }
}

/// One [`ControlView`] per control of a layout.
#[derive(Debug, Clone)]
pub struct LayoutView {
    views: Vec<ControlView>,
}

impl LayoutView {
    /// Creates views for every control of `layout`.
    pub fn new(layout: &FormLayout) -> Self {
        Self {
            views: layout.controls().iter().map(ControlView::new).collect(),
        }
    }

    /// Re-renders the controls whose fields changed, as
    /// `(field name, markup)` pairs in layout order.
    ///
    /// `layout` must be the layout this view was created from.
    pub fn refresh(&mut self, layout: &FormLayout, form: &FormState) -> Vec<(String, String)> {
        self.views
            .iter_mut()
            .zip(layout.controls())
            .filter_map(|(view, control)| {
                view.refresh(control, form)
                    .map(|html| (control.name.clone(), html))
            })
            .collect()
    }
}
