//! End-to-end behavior of bound controls.

mod common;
use common::*;

use oxide_forms::{render_control, FieldEvent, FieldValue, SubmitError, SubmitOutcome};

#[test]
fn required_marker_appears_once() {
    let (layout, form) = open();
    let control = layout.control("prefecture").unwrap();
    let html = render_control(control, &form);
    assert_eq!(html.matches("required-indicator").count(), 1);

    let html = layout.render(&form, "/address", "post");
    assert_eq!(html.matches("required-indicator").count(), 1);
}

#[test]
fn age_typed_then_cleared_renders_empty_input() {
    let (layout, mut form) = open();
    let mut age = form.bind("age");
    age.focus();
    age.change("30");
    age.change("");
    age.blur();

    assert_eq!(form.values().get("age"), &FieldValue::Empty);
    assert!(form.field("age").touched());
    assert!(form.errors().get("age").is_none());

    let html = render_control(layout.control("age").unwrap(), &form);
    assert!(html.contains(r#"type="number""#));
    assert!(html.contains(r#"value="""#));
    assert!(!html.contains("invalid-feedback"));
}

#[test]
fn invalid_age_shows_error_after_blur() {
    let (layout, mut form) = open();
    form.focus("age");
    form.change("age", "abc");
    form.blur("age");

    let html = render_control(layout.control("age").unwrap(), &form);
    assert!(html.contains("Enter a valid number."));
    assert!(html.contains("is-invalid"));
}

#[test]
fn checkbox_group_keeps_check_order() {
    let (layout, mut form) = open();
    let mut interests = form.bind("interests");
    interests.toggle("A");
    interests.toggle("C");
    interests.toggle("A");
    interests.toggle("A");

    assert_eq!(
        form.values().get("interests"),
        &FieldValue::List(vec!["C".into(), "A".into()])
    );
    let html = render_control(layout.control("interests").unwrap(), &form);
    assert_eq!(html.matches("checked").count(), 2);
}

#[test]
fn radio_group_selects_one() {
    let (layout, mut form) = open();
    form.choose("contact", "email");
    form.choose("contact", "phone");

    assert_eq!(form.values().get("contact"), &FieldValue::Text("phone".into()));
    let html = render_control(layout.control("contact").unwrap(), &form);
    assert_eq!(html.matches("checked").count(), 1);
}

#[test]
fn submit_without_prefecture_is_rejected() {
    let (layout, mut form) = open();
    let outcome = form
        .handle_submit(&|_: &oxide_forms::FormValues| -> Result<(), SubmitError> {
            panic!("handler must not run")
        })
        .unwrap();
    let SubmitOutcome::Invalid(errors) = outcome else {
        panic!("expected invalid outcome");
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get("prefecture"), Some("選択してください"));

    let html = layout.render(&form, "/address", "post");
    assert!(html.contains("選択してください"));
}

#[test]
fn submit_with_prefecture_succeeds() {
    let (_layout, mut form) = open();
    form.select_option("prefecture", Some(niigata()));
    let outcome = form
        .handle_submit(&|values: &oxide_forms::FormValues| -> Result<(), SubmitError> {
            assert_eq!(values.get("prefecture"), &FieldValue::Choice(niigata()));
            Ok(())
        })
        .unwrap();
    assert_eq!(outcome, SubmitOutcome::Submitted);
}

#[test]
fn events_from_json_drive_the_form() {
    let (_layout, mut form) = open();
    let lines = [
        r#"{"type":"focus","field":"city"}"#,
        r#"{"type":"change","field":"city","value":"Nagaoka"}"#,
        r#"{"type":"blur","field":"city"}"#,
        r#"{"type":"toggle","field":"interests","value":"B"}"#,
    ];
    for line in lines {
        let event: FieldEvent = serde_json::from_str(line).unwrap();
        form.dispatch(event).unwrap();
    }
    assert_eq!(form.values().get("city"), &FieldValue::Text("Nagaoka".into()));
    assert!(form.field("city").touched());
    assert_eq!(
        form.values().get("interests"),
        &FieldValue::List(vec!["B".into()])
    );
}

#[test]
fn posted_values_round_into_state() {
    let (layout, mut form) = open();
    layout
        .apply(
            &mut form,
            &[
                ("prefecture", "新潟県"),
                ("city", "Nagaoka"),
                ("age", "42"),
                ("interests", "C"),
                ("interests", "A"),
                ("contact", "email"),
            ],
        )
        .unwrap();
    assert!(form.validate().is_empty());
    assert_eq!(form.values().get("prefecture"), &FieldValue::Choice(niigata()));
    assert_eq!(
        form.values().get("interests"),
        &FieldValue::List(vec!["C".into(), "A".into()])
    );
}
