//! The form container: values, field metadata, validation and submit.

use std::collections::BTreeMap;
use std::future::Future;

use tracing::{debug, info, warn};

use crate::binder::FieldBinder;
use crate::error::{ErrorMap, FormError, Result, SubmitError};
use crate::event::FieldEvent;
use crate::field::{FieldMeta, FieldRecord, FieldSnapshot};
use crate::options::{FormOptions, ValidationMode};
use crate::submit::{SubmitAttempt, SubmitHandler, SubmitOutcome, SubmitStatus};
use crate::validation::Validate;
use crate::value::{FieldPath, FieldValue, FormValues, SelectOption};

/// State of one form instance.
///
/// Owned by whoever drives the form and handed explicitly to the
/// controls that read and write it; there is no process-wide form
/// context. Every mutation happens through `&mut self`, one event at a
/// time.
pub struct FormState {
    options: FormOptions,
    initial: FormValues,
    values: FormValues,
    records: BTreeMap<String, FieldRecord>,
    errors: ErrorMap,
    validator: Option<Box<dyn Validate>>,
    status: SubmitStatus,
    submit_count: u32,
    submit_error: Option<SubmitError>,
    clock: u64,
}

impl std::fmt::Debug for FormState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormState")
            .field("options", &self.options)
            .field("values", &self.values)
            .field("errors", &self.errors)
            .field("status", &self.status)
            .field("submit_count", &self.submit_count)
            .field("has_validator", &self.validator.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(FormValues::new(), FormOptions::default())
    }
}

impl FormState {
    /// Creates a form with initial values and no validation function.
    pub fn new(initial: FormValues, options: FormOptions) -> Self {
        Self {
            options,
            values: initial.clone(),
            initial,
            records: BTreeMap::new(),
            errors: ErrorMap::new(),
            validator: None,
            status: SubmitStatus::Idle,
            submit_count: 0,
            submit_error: None,
            clock: 0,
        }
    }

    /// Sets the validation function.
    #[must_use]
    pub fn with_validator(mut self, validator: impl Validate + 'static) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    /// Returns the options.
    pub const fn options(&self) -> &FormOptions {
        &self.options
    }

    /// Returns the current values.
    pub const fn values(&self) -> &FormValues {
        &self.values
    }

    /// Returns the values the form started from (or was last reset to).
    pub const fn initial_values(&self) -> &FormValues {
        &self.initial
    }

    /// Returns the errors of the last validation pass, visible or not.
    pub const fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Returns the submit status.
    pub const fn status(&self) -> SubmitStatus {
        self.status
    }

    /// Returns the number of submit attempts since creation or reset.
    pub const fn submit_count(&self) -> u32 {
        self.submit_count
    }

    /// Returns the form-level failure of the last submit, if it failed.
    pub const fn submit_error(&self) -> Option<&SubmitError> {
        self.submit_error.as_ref()
    }

    /// Whether a submit is in flight.
    pub fn is_submitting(&self) -> bool {
        self.status == SubmitStatus::Submitting
    }

    /// Whether the last validation pass found no errors.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether any value differs from its initial value.
    pub fn is_dirty(&self) -> bool {
        self.values
            .iter()
            .chain(self.initial.iter())
            .any(|(name, _)| self.values.get(name) != self.initial.get(name))
    }

    /// Names of the registered fields.
    pub fn registered(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Registers a field, creating its default record. Returns `false`
    /// when the field was already registered.
    pub fn register(&mut self, name: &str) -> bool {
        if self.records.contains_key(name) {
            return false;
        }
        let tick = self.tick();
        self.records
            .insert(name.to_string(), FieldRecord::created_at(tick));
        debug!(field = name, "field registered");
        self.sync_errors();
        true
    }

    /// Drops a field's metadata when its control goes away. The value
    /// is kept.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.records.remove(name).is_some()
    }

    /// Binds a field for reading and writing, registering it first.
    pub fn bind(&mut self, name: &str) -> FieldBinder<'_> {
        self.register(name);
        FieldBinder::new(self, name)
    }

    /// Returns a read-only view of a field. Unknown names yield an empty,
    /// untouched field.
    pub fn field(&self, name: &str) -> FieldSnapshot {
        let mut snapshot = FieldSnapshot::new(name);
        snapshot.value = self.values.get(name).clone();
        snapshot.dirty = self.values.get(name) != self.initial.get(name);
        if let Some(record) = self.records.get(name) {
            snapshot.meta = record.meta;
            snapshot.revisions = record.revisions;
        }
        snapshot.error = self.visible_error(name).map(str::to_string);
        snapshot
    }

    /// Returns a field's error if it may be shown: once the field is
    /// touched or a submit was attempted.
    pub fn visible_error(&self, name: &str) -> Option<&str> {
        let touched = self.records.get(name).is_some_and(|r| r.meta.touched);
        if touched || self.submit_count > 0 {
            self.errors.get(name)
        } else {
            None
        }
    }

    /// Stores a new value for a field. Empty text is stored as `Empty`.
    pub fn change(&mut self, name: &str, value: impl Into<FieldValue>) {
        let value = match value.into() {
            FieldValue::Text(text) if text.is_empty() => FieldValue::Empty,
            other => other,
        };
        self.register(name);
        if self.values.get(name) == &value {
            return;
        }
        debug!(field = name, "field changed");
        self.values.set(name, value);
        let tick = self.tick();
        self.record_mut(name).revisions.value = tick;
        if self.options.validation_mode == ValidationMode::OnChange || self.submit_count > 0 {
            self.run_validation();
        }
        self.sync_errors();
    }

    /// Marks a field focused.
    pub fn focus(&mut self, name: &str) {
        self.register(name);
        let tick = self.tick();
        let record = self.record_mut(name);
        let before = record.meta;
        record.meta.active = true;
        record.meta.visited = true;
        if record.meta != before {
            record.revisions.meta = tick;
        }
    }

    /// Marks a field blurred and touched.
    pub fn blur(&mut self, name: &str) {
        self.register(name);
        let tick = self.tick();
        let record = self.record_mut(name);
        let before = record.meta;
        record.meta.active = false;
        record.meta.touched = true;
        if record.meta != before {
            record.revisions.meta = tick;
        }
        debug!(field = name, "field blurred");
        if self.options.validation_mode != ValidationMode::OnSubmit {
            self.run_validation();
        }
        self.sync_errors();
    }

    /// Flips one option's membership in a checkbox-group field. A newly
    /// checked option is appended after the ones already selected.
    pub fn toggle(&mut self, name: &str, option: &str) {
        let mut selected = self
            .values
            .get(name)
            .as_list()
            .map(<[String]>::to_vec)
            .unwrap_or_default();
        if let Some(position) = selected.iter().position(|value| value == option) {
            selected.remove(position);
        } else {
            selected.push(option.to_string());
        }
        self.change(name, FieldValue::List(selected));
    }

    /// Sets a single checkbox.
    pub fn set_checked(&mut self, name: &str, checked: bool) {
        self.change(name, FieldValue::Bool(checked));
    }

    /// Sets or clears a select field's option.
    pub fn select_option(&mut self, name: &str, option: Option<SelectOption>) {
        self.change(name, FieldValue::from(option));
    }

    /// Picks one radio-group option, replacing any previous pick.
    pub fn choose(&mut self, name: &str, option: &str) {
        self.change(name, FieldValue::Text(option.to_string()));
    }

    /// Applies one UI event.
    pub fn dispatch(&mut self, event: FieldEvent) -> Result<()> {
        if event.field().is_some_and(str::is_empty) {
            return Err(FormError::InvalidControl {
                field: String::new(),
                message: "event targets an unnamed field".to_string(),
            });
        }
        if let Some(field) = event.field() {
            FieldPath::parse(field)?;
        }
        match event {
            FieldEvent::Focus { field } => self.focus(&field),
            FieldEvent::Change { field, value } => self.change(&field, value),
            FieldEvent::Blur { field } => self.blur(&field),
            FieldEvent::Toggle { field, value } => self.toggle(&field, &value),
            FieldEvent::Reset => self.reset(),
        }
        Ok(())
    }

    /// Runs one validation pass and returns its errors.
    pub fn validate(&mut self) -> &ErrorMap {
        self.run_validation();
        self.sync_errors();
        &self.errors
    }

    /// First submit phase: validates and, when the values are valid,
    /// moves the form to `Submitting` and hands out the values.
    pub fn begin_submit(&mut self) -> Result<SubmitAttempt> {
        if self.status == SubmitStatus::Submitting {
            return Err(FormError::AlreadySubmitting);
        }
        self.submit_count = self.submit_count.saturating_add(1);
        self.submit_error = None;
        if self.options.touch_on_submit {
            self.touch_all();
        }
        self.run_validation();
        self.sync_errors();

        if !self.errors.is_empty() {
            self.status = SubmitStatus::Idle;
            info!(errors = self.errors.len(), "submit blocked by validation errors");
            return Ok(SubmitAttempt::Invalid(self.errors.clone()));
        }

        self.status = SubmitStatus::Submitting;
        debug!(attempt = self.submit_count, "submitting form");
        Ok(SubmitAttempt::Ready(self.values.clone()))
    }

    /// Second submit phase: records what the handler reported.
    pub fn complete_submit(
        &mut self,
        result: std::result::Result<(), SubmitError>,
    ) -> Result<SubmitOutcome> {
        if self.status != SubmitStatus::Submitting {
            return Err(FormError::NotSubmitting);
        }
        match result {
            Ok(()) => {
                self.status = SubmitStatus::Submitted;
                info!(attempt = self.submit_count, "form submit succeeded");
                Ok(SubmitOutcome::Submitted)
            }
            Err(error) => {
                warn!(attempt = self.submit_count, error = %error, "form submit failed");
                self.status = SubmitStatus::Failed;
                self.submit_error = Some(error.clone());
                Ok(SubmitOutcome::Failed(error))
            }
        }
    }

    /// Validates and, when valid, passes the values to `handler`.
    pub fn handle_submit<H>(&mut self, handler: &H) -> Result<SubmitOutcome>
    where
        H: SubmitHandler + ?Sized,
    {
        let values = match self.begin_submit()? {
            SubmitAttempt::Invalid(errors) => return Ok(SubmitOutcome::Invalid(errors)),
            SubmitAttempt::Ready(values) => values,
        };
        let result = handler.on_submit(&values);
        self.complete_submit(result)
    }

    /// Async variant of [`FormState::handle_submit`].
    pub async fn handle_submit_async<F, Fut>(&mut self, submit: F) -> Result<SubmitOutcome>
    where
        F: FnOnce(FormValues) -> Fut,
        Fut: Future<Output = std::result::Result<(), SubmitError>>,
    {
        let values = match self.begin_submit()? {
            SubmitAttempt::Invalid(errors) => return Ok(SubmitOutcome::Invalid(errors)),
            SubmitAttempt::Ready(values) => values,
        };
        let result = submit(values).await;
        self.complete_submit(result)
    }

    /// Restores the initial values and clears all interaction state.
    /// Registered fields stay registered with fresh records.
    pub fn reset(&mut self) {
        self.values = self.initial.clone();
        self.errors = ErrorMap::new();
        self.status = SubmitStatus::Idle;
        self.submit_count = 0;
        self.submit_error = None;
        let tick = self.tick();
        for record in self.records.values_mut() {
            record.meta = FieldMeta::default();
            record.revisions.value = tick;
            record.revisions.meta = tick;
        }
        self.sync_errors();
        debug!("form reset");
    }

    /// Replaces the initial values, then resets.
    pub fn reset_with(&mut self, initial: FormValues) {
        self.initial = initial;
        self.reset();
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn record_mut(&mut self, name: &str) -> &mut FieldRecord {
        self.records.entry(name.to_string()).or_default()
    }

    fn touch_all(&mut self) {
        let tick = self.tick();
        for record in self.records.values_mut() {
            if !record.meta.touched {
                record.meta.touched = true;
                record.revisions.meta = tick;
            }
        }
    }

    fn run_validation(&mut self) {
        self.errors = self
            .validator
            .as_ref()
            .map(|validator| validator.validate(&self.values))
            .unwrap_or_default();
        debug!(errors = self.errors.len(), "validation pass");
    }

    /// Recomputes which errors are displayed and bumps the error revision
    /// of every field whose displayed error changed.
    fn sync_errors(&mut self) {
        let tick = self.clock + 1;
        let submitted = self.submit_count > 0;
        let mut bumped = false;
        for (name, record) in &mut self.records {
            let shown = if record.meta.touched || submitted {
                self.errors.get(name).map(str::to_string)
            } else {
                None
            };
            if shown != record.shown_error {
                record.shown_error = shown;
                record.revisions.error = tick;
                bumped = true;
            }
        }
        if bumped {
            self.clock = tick;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED_SELECT: &str = "選択してください";

    fn prefecture_rule(values: &FormValues) -> ErrorMap {
        let mut errors = ErrorMap::new();
        if values.get("prefecture").is_empty() {
            errors.add("prefecture", REQUIRED_SELECT);
        }
        errors
    }

    fn address_form() -> FormState {
        FormState::new(FormValues::new(), FormOptions::default()).with_validator(prefecture_rule)
    }

    #[test]
    fn test_unknown_field_defaults() {
        let form = FormState::default();
        let field = form.field("nowhere");
        assert_eq!(field.value, FieldValue::Empty);
        assert!(!field.touched());
        assert!(!field.dirty);
        assert_eq!(field.error, None);
        assert_eq!(form.registered().count(), 0);
    }

    #[test]
    fn test_bind_registers_implicitly() {
        let mut form = FormState::default();
        {
            let binder = form.bind("age");
            assert_eq!(binder.value(), &FieldValue::Empty);
        }
        assert_eq!(form.registered().collect::<Vec<_>>(), vec!["age"]);
        assert!(!form.register("age"));
    }

    #[test]
    fn test_type_then_blur_age() {
        let mut form = address_form();
        form.focus("age");
        form.change("age", "30");
        form.blur("age");

        let age = form.field("age");
        assert!(age.touched());
        assert_eq!(age.value.as_text(), Some("30"));
        assert_eq!(age.error, None);
        assert!(age.dirty);
    }

    #[test]
    fn test_error_hidden_until_touched() {
        let mut form = address_form();
        form.register("prefecture");
        form.validate();
        assert_eq!(form.errors().get("prefecture"), Some(REQUIRED_SELECT));
        assert_eq!(form.field("prefecture").error, None);

        form.blur("prefecture");
        assert_eq!(
            form.field("prefecture").error.as_deref(),
            Some(REQUIRED_SELECT)
        );
    }

    #[test]
    fn test_checkbox_group_appends_on_recheck() {
        let mut form = FormState::default();
        form.toggle("letters", "A");
        form.toggle("letters", "C");
        form.toggle("letters", "A");
        assert_eq!(form.values().get("letters").as_list(), Some(&["C".to_string()][..]));

        form.toggle("letters", "A");
        assert_eq!(
            form.values().get("letters"),
            &FieldValue::List(vec!["C".into(), "A".into()])
        );
    }

    #[test]
    fn test_radio_group_is_exclusive() {
        let mut form = FormState::default();
        form.choose("contact", "A");
        form.choose("contact", "B");
        let contact = form.field("contact");
        assert!(contact.is_selected("B"));
        assert!(!contact.is_selected("A"));
    }

    #[test]
    fn test_empty_text_is_stored_as_empty() {
        let mut form = FormState::default();
        form.change("city", "新潟市");
        form.change("city", "");
        assert_eq!(form.values().get("city"), &FieldValue::Empty);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let mut form = address_form();
        let first = form.validate().clone();
        let second = form.validate().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_submit_touches_fields_and_skips_handler() {
        let mut form = address_form();
        form.register("prefecture");
        let called = std::cell::Cell::new(false);
        let handler = |_: &FormValues| -> std::result::Result<(), SubmitError> {
            called.set(true);
            Ok(())
        };

        let outcome = form.handle_submit(&handler).unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Invalid(ErrorMap::new().with("prefecture", REQUIRED_SELECT))
        );
        assert!(!called.get());
        assert_eq!(form.status(), SubmitStatus::Idle);
        assert!(form.field("prefecture").touched());
        assert_eq!(
            form.field("prefecture").error.as_deref(),
            Some(REQUIRED_SELECT)
        );
    }

    #[test]
    fn test_errors_clear_on_change_after_submit() {
        let mut form = FormState::new(
            FormValues::new(),
            FormOptions::default().validation_mode(ValidationMode::OnSubmit),
        )
        .with_validator(prefecture_rule);
        form.register("prefecture");
        form.begin_submit().unwrap();
        assert!(form.field("prefecture").invalid());

        form.select_option("prefecture", Some(SelectOption::same("新潟県")));
        assert!(!form.field("prefecture").invalid());
    }

    #[test]
    fn test_submit_cycle() {
        let mut form = address_form();
        form.select_option("prefecture", Some(SelectOption::same("新潟県")));

        let SubmitAttempt::Ready(values) = form.begin_submit().unwrap() else {
            panic!("expected valid values");
        };
        assert!(values.get("prefecture").as_choice().is_some());
        assert!(form.is_submitting());
        assert_eq!(form.begin_submit(), Err(FormError::AlreadySubmitting));

        assert_eq!(form.complete_submit(Ok(())), Ok(SubmitOutcome::Submitted));
        assert_eq!(form.status(), SubmitStatus::Submitted);
        assert_eq!(form.complete_submit(Ok(())), Err(FormError::NotSubmitting));
    }

    #[test]
    fn test_failed_submit_is_form_level() {
        let mut form = address_form();
        form.select_option("prefecture", Some(SelectOption::same("新潟県")));
        let handler = |_: &FormValues| -> std::result::Result<(), SubmitError> {
            Err(SubmitError::new("network unreachable"))
        };

        let outcome = form.handle_submit(&handler).unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Failed(SubmitError::new("network unreachable"))
        );
        assert_eq!(form.status(), SubmitStatus::Failed);
        assert_eq!(
            form.submit_error().map(SubmitError::message),
            Some("network unreachable")
        );
        assert!(form.field("prefecture").error.is_none());

        let ok = |_: &FormValues| -> std::result::Result<(), SubmitError> { Ok(()) };
        assert_eq!(form.handle_submit(&ok), Ok(SubmitOutcome::Submitted));
        assert!(form.submit_error().is_none());
    }

    #[tokio::test]
    async fn test_async_submit() {
        let mut form = address_form();
        form.select_option("prefecture", Some(SelectOption::same("新潟県")));

        let outcome = form
            .handle_submit_async(|values| async move {
                if values.get("prefecture").is_empty() {
                    Err(SubmitError::new("missing prefecture"))
                } else {
                    Ok(())
                }
            })
            .await
            .unwrap();
        assert_eq!(outcome, SubmitOutcome::Submitted);
    }

    #[test]
    fn test_reset_restores_initial_values() {
        let initial = FormValues::new().with("firstName", "Taro");
        let mut form = FormState::new(initial, FormOptions::default());
        form.change("firstName", "Jiro");
        form.blur("firstName");
        assert!(form.is_dirty());

        form.dispatch(FieldEvent::Reset).unwrap();
        let field = form.field("firstName");
        assert_eq!(field.value.as_text(), Some("Taro"));
        assert!(!field.touched());
        assert!(!form.is_dirty());
        assert_eq!(form.submit_count(), 0);

        form.reset_with(FormValues::new());
        assert!(form.values().is_empty());
    }

    #[test]
    fn test_dispatch_events() {
        let mut form = FormState::default();
        let events: Vec<FieldEvent> = serde_json::from_str(
            r#"[
                {"type": "focus", "field": "interests"},
                {"type": "toggle", "field": "interests", "value": "music"},
                {"type": "blur", "field": "interests"}
            ]"#,
        )
        .unwrap();
        for event in events {
            form.dispatch(event).unwrap();
        }
        let interests = form.field("interests");
        assert!(interests.is_selected("music"));
        assert!(interests.meta.visited);
        assert!(!interests.meta.active);

        let err = form
            .dispatch(FieldEvent::Blur {
                field: String::new(),
            })
            .unwrap_err();
        assert!(matches!(err, FormError::InvalidControl { .. }));
    }

    #[test]
    fn test_dispatch_rejects_malformed_names() {
        let mut form = FormState::default();
        form.change("firstName", "Taro");
        for field in ["a..b", "tags[", "tags[18446744073709551615]"] {
            let err = form
                .dispatch(FieldEvent::Change {
                    field: field.to_string(),
                    value: FieldValue::from("x"),
                })
                .unwrap_err();
            assert!(matches!(err, FormError::InvalidPath { .. }), "accepted {field:?}");
            assert!(form.dispatch(FieldEvent::Blur { field: field.to_string() }).is_err());
            assert!(!form.values().contains(field));
            assert!(form.registered().all(|name| name != field));
        }

        let outcome = form.handle_submit(&crate::submit::LogSubmit::default()).unwrap();
        assert_eq!(outcome, SubmitOutcome::Submitted);
        assert_eq!(form.status(), SubmitStatus::Submitted);
    }

    #[test]
    fn test_unregister_keeps_value() {
        let mut form = FormState::default();
        form.bind("city").blur();
        form.change("city", "Niigata");
        assert!(form.field("city").touched());

        assert!(form.unregister("city"));
        assert!(!form.unregister("city"));
        assert!(form.registered().all(|name| name != "city"));
        assert_eq!(form.values().get("city"), &FieldValue::Text("Niigata".into()));
        assert!(!form.field("city").touched());
    }
}
