#![allow(dead_code)]

use oxide_forms::fields::{
    checkbox_group_control, number_control, radio_group_control, select_control, text_control,
};
use oxide_forms::messages::REQUIRED_SELECT;
use oxide_forms::{
    ErrorMap, FormBuilder, FormLayout, FormOptions, FormState, FormValues, SelectOption,
};

pub fn validate(values: &FormValues) -> ErrorMap {
    let mut errors = ErrorMap::new();
    if values.get("prefecture").is_empty() {
        errors.add("prefecture", REQUIRED_SELECT);
    }
    if let Some(age) = values.get("age").as_text() {
        if age.trim().parse::<u32>().is_err() {
            errors.add("age", "Enter a valid number.");
        }
    }
    errors
}

pub fn layout() -> FormLayout {
    FormBuilder::new()
        .control(select_control(
            "prefecture",
            "都道府県",
            &[("北海道", "北海道"), ("新潟県", "新潟県"), ("沖縄県", "沖縄県")],
            true,
        ))
        .control(text_control("city", "市区町村", false))
        .control(number_control("age", "Age", false))
        .control(checkbox_group_control(
            "interests",
            "Interests",
            &[("A", "A"), ("B", "B"), ("C", "C")],
            false,
        ))
        .control(radio_group_control(
            "contact",
            "Contact",
            &[("email", "Email"), ("phone", "Phone")],
            false,
        ))
        .submit_label("SAVE")
        .build()
        .unwrap_or_else(|e| panic!("layout failed: {e}"))
}

pub fn open() -> (FormLayout, FormState) {
    let layout = layout();
    let mut form =
        FormState::new(layout.initial_values(), FormOptions::default()).with_validator(validate);
    layout.mount(&mut form);
    (layout, form)
}

pub fn niigata() -> SelectOption {
    SelectOption::same("新潟県")
}
