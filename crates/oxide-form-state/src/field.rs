//! Per-field metadata, snapshots and change subscriptions.

use crate::state::FormState;
use crate::value::FieldValue;

/// Interaction metadata of one field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldMeta {
    /// The field has lost focus at least once.
    pub touched: bool,
    /// The field has gained focus at least once.
    pub visited: bool,
    /// The field currently has focus.
    pub active: bool,
}

/// Clock ticks at which each attribute of a field last changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Revisions {
    pub(crate) value: u64,
    pub(crate) meta: u64,
    pub(crate) error: u64,
}

/// A registered field inside a [`FormState`].
#[derive(Debug, Clone, Default)]
pub(crate) struct FieldRecord {
    pub(crate) meta: FieldMeta,
    pub(crate) revisions: Revisions,
    pub(crate) shown_error: Option<String>,
}

impl FieldRecord {
    pub(crate) fn created_at(tick: u64) -> Self {
        Self {
            revisions: Revisions {
                value: tick,
                meta: tick,
                error: tick,
            },
            ..Self::default()
        }
    }
}

/// Everything a bound widget needs to draw one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSnapshot {
    /// Field name.
    pub name: String,
    /// Current value (`Empty` for unknown fields).
    pub value: FieldValue,
    /// Interaction metadata.
    pub meta: FieldMeta,
    /// The value differs from the initial value.
    pub dirty: bool,
    /// The error to display, present only once the field is touched or a
    /// submit was attempted.
    pub error: Option<String>,
    pub(crate) revisions: Revisions,
}

impl FieldSnapshot {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: FieldValue::Empty,
            meta: FieldMeta::default(),
            dirty: false,
            error: None,
            revisions: Revisions::default(),
        }
    }

    /// Whether the widget should be drawn in its invalid state.
    pub const fn invalid(&self) -> bool {
        self.error.is_some()
    }

    /// Whether the field has lost focus at least once.
    pub const fn touched(&self) -> bool {
        self.meta.touched
    }

    /// Checked state of a single checkbox.
    pub const fn checked(&self) -> bool {
        matches!(self.value, FieldValue::Bool(true))
    }

    /// Whether `option` is part of the field's selection.
    pub fn is_selected(&self, option: &str) -> bool {
        self.value.contains(option)
    }
}

/// Which attributes of a field a subscriber cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionMask {
    /// React to value changes.
    pub value: bool,
    /// React to touched/visited/active changes.
    pub meta: bool,
    /// React to changes of the displayed error.
    pub error: bool,
}

impl SubscriptionMask {
    /// Every attribute.
    pub const ALL: Self = Self {
        value: true,
        meta: true,
        error: true,
    };
    /// Value only.
    pub const VALUE: Self = Self {
        value: true,
        meta: false,
        error: false,
    };
    /// Touched state and error, as used by a control's wrapper.
    pub const META: Self = Self {
        value: false,
        meta: true,
        error: true,
    };
    /// Displayed error only.
    pub const ERROR: Self = Self {
        value: false,
        meta: false,
        error: true,
    };

    fn differs(self, seen: Revisions, current: Revisions) -> bool {
        (self.value && seen.value != current.value)
            || (self.meta && seen.meta != current.meta)
            || (self.error && seen.error != current.error)
    }
}

/// Tracks one field and reports it only when a subscribed attribute
/// changed.
///
/// Changes to other fields never wake a subscription up.
#[derive(Debug, Clone)]
pub struct FieldSubscription {
    name: String,
    mask: SubscriptionMask,
    seen: Option<Revisions>,
}

impl FieldSubscription {
    /// Subscribes to `name`.
    pub fn new(name: impl Into<String>, mask: SubscriptionMask) -> Self {
        Self {
            name: name.into(),
            mask,
            seen: None,
        }
    }

    /// The subscribed field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a fresh snapshot on the first poll and whenever a
    /// subscribed attribute changed since the previous poll.
    pub fn poll(&mut self, form: &FormState) -> Option<FieldSnapshot> {
        let snapshot = form.field(&self.name);
        let changed = self
            .seen
            .map_or(true, |seen| self.mask.differs(seen, snapshot.revisions));
        self.seen = Some(snapshot.revisions);
        changed.then_some(snapshot)
    }
}
