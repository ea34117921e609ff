//! Field values, selectable options and field paths.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{FormError, Result};

/// One selectable choice offered by a select, radio or checkbox-group
/// control.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectOption {
    /// Submitted value.
    pub value: String,
    /// Human-readable label.
    pub label: String,
}

impl SelectOption {
    /// Creates a new option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Creates an option whose label equals its value.
    pub fn same(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

impl<V: Into<String>, L: Into<String>> From<(V, L)> for SelectOption {
    fn from((value, label): (V, L)) -> Self {
        Self::new(value, label)
    }
}

/// The current value of one field.
///
/// Serialised untagged, so JSON `null`, booleans, strings, string arrays
/// and `{"value": .., "label": ..}` objects map onto the variants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// No value (never set, cleared, or an empty text input).
    #[default]
    Empty,
    /// A single checkbox.
    Bool(bool),
    /// Free text, numeric strings and radio-group selections.
    Text(String),
    /// Checkbox-group selections in insertion order.
    List(Vec<String>),
    /// A select control's chosen option.
    Choice(SelectOption),
}

impl FieldValue {
    /// Converts raw input text into a value. Empty input is `Empty`.
    pub fn from_input(input: impl Into<String>) -> Self {
        let input = input.into();
        if input.is_empty() {
            Self::Empty
        } else {
            Self::Text(input)
        }
    }

    /// Returns whether the value is `Empty`.
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns whether the value counts as "not filled in".
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty | Self::Bool(false) => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Bool(true) | Self::Choice(_) => false,
        }
    }

    /// Returns the text, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the flag, if this is a boolean value.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Returns the selected items, if this is a list value.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the chosen option, if this is a select value.
    pub const fn as_choice(&self) -> Option<&SelectOption> {
        match self {
            Self::Choice(option) => Some(option),
            _ => None,
        }
    }

    /// Membership test used by checkbox groups and radio groups.
    pub fn contains(&self, value: &str) -> bool {
        match self {
            Self::List(items) => items.iter().any(|item| item == value),
            Self::Text(text) => text == value,
            Self::Choice(option) => option.value == value,
            _ => false,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::Text(text) => f.write_str(text),
            Self::List(items) => f.write_str(&items.join(", ")),
            Self::Choice(option) => f.write_str(&option.label),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<SelectOption> for FieldValue {
    fn from(value: SelectOption) -> Self {
        Self::Choice(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

static EMPTY: FieldValue = FieldValue::Empty;

/// The full set of values of one form, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues {
    values: BTreeMap<String, FieldValue>,
}

impl FormValues {
    /// Creates an empty value set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of a field, `Empty` when the field is absent.
    pub fn get(&self, name: &str) -> &FieldValue {
        self.values.get(name).unwrap_or(&EMPTY)
    }

    /// Returns whether a value is stored for the field.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Stores a value, returning the previous one.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) -> Option<FieldValue> {
        self.values.insert(name.to_string(), value.into())
    }

    /// Builder form of [`FormValues::set`].
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Removes a field's value.
    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.values.remove(name)
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Returns the number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether no value is stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Expands dot/bracket field names into a nested JSON document.
    ///
    /// `address.city` becomes `{"address": {"city": ..}}` and `tags[1]`
    /// becomes `{"tags": [null, ..]}`. Names are applied in order, so a
    /// later, deeper path replaces a scalar stored at its prefix.
    pub fn to_nested_json(&self) -> Result<Value> {
        let mut root = Value::Object(Map::new());
        for (name, value) in &self.values {
            let path = FieldPath::parse(name)?;
            insert_at(&mut root, name, path.segments(), serde_json::to_value(value)?)?;
        }
        Ok(root)
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

fn insert_at(slot: &mut Value, name: &str, segments: &[PathSegment], leaf: Value) -> Result<()> {
    let Some((head, rest)) = segments.split_first() else {
        *slot = leaf;
        return Ok(());
    };
    match head {
        PathSegment::Key(key) => {
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            if let Value::Object(map) = slot {
                let child = map.entry(key.clone()).or_insert(Value::Null);
                insert_at(child, name, rest, leaf)?;
            }
        }
        PathSegment::Index(index) => {
            let len = index
                .checked_add(1)
                .filter(|len| *len <= MAX_INDEX + 1)
                .ok_or_else(|| FormError::InvalidPath {
                    path: name.to_string(),
                    message: "index is out of range".to_string(),
                })?;
            if !slot.is_array() {
                *slot = Value::Array(Vec::new());
            }
            if let Value::Array(items) = slot {
                if items.len() < len {
                    items.resize(len, Value::Null);
                }
                insert_at(&mut items[*index], name, rest, leaf)?;
            }
        }
    }
    Ok(())
}

/// Largest array index a field name may use.
pub const MAX_INDEX: usize = 10_000;

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object key (`address` in `address.city`).
    Key(String),
    /// Array index (`1` in `tags[1]`).
    Index(usize),
}

/// A parsed dot/bracket field name such as `items[0].name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Parses a field name.
    pub fn parse(path: &str) -> Result<Self> {
        let invalid = |message: &str| FormError::InvalidPath {
            path: path.to_string(),
            message: message.to_string(),
        };

        let mut segments = Vec::new();
        let mut key = String::new();
        let mut after_index = false;
        let mut chars = path.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '.' => {
                    if key.is_empty() && !after_index {
                        return Err(invalid("empty segment"));
                    }
                    if !key.is_empty() {
                        segments.push(PathSegment::Key(std::mem::take(&mut key)));
                    }
                    if chars.peek().is_none() {
                        return Err(invalid("trailing '.'"));
                    }
                    after_index = false;
                }
                '[' => {
                    if key.is_empty() && !after_index {
                        return Err(invalid("index without a key"));
                    }
                    if !key.is_empty() {
                        segments.push(PathSegment::Key(std::mem::take(&mut key)));
                    }
                    let mut digits = String::new();
                    loop {
                        match chars.next() {
                            Some(']') => break,
                            Some(d) => digits.push(d),
                            None => return Err(invalid("unterminated '['")),
                        }
                    }
                    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                        return Err(invalid("index is not a number"));
                    }
                    let index = digits
                        .parse::<usize>()
                        .ok()
                        .filter(|index| *index <= MAX_INDEX)
                        .ok_or_else(|| invalid("index is out of range"))?;
                    segments.push(PathSegment::Index(index));
                    after_index = true;
                }
                ']' => return Err(invalid("unexpected ']'")),
                other => {
                    if after_index {
                        return Err(invalid("expected '.' or '[' after an index"));
                    }
                    key.push(other);
                }
            }
        }

        if !key.is_empty() {
            segments.push(PathSegment::Key(key));
        }
        if segments.is_empty() {
            return Err(invalid("empty path"));
        }
        Ok(Self { segments })
    }

    /// Returns the parsed segments.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_input_normalizes_empty_text() {
        assert_eq!(FieldValue::from_input(""), FieldValue::Empty);
        assert_eq!(FieldValue::from_input("30"), FieldValue::Text("30".into()));
    }

    #[test]
    fn test_blank_values() {
        assert!(FieldValue::Empty.is_blank());
        assert!(FieldValue::from("   ").is_blank());
        assert!(FieldValue::List(vec![]).is_blank());
        assert!(FieldValue::Bool(false).is_blank());
        assert!(!FieldValue::Bool(true).is_blank());
        assert!(!FieldValue::from(SelectOption::same("新潟県")).is_blank());
    }

    #[test]
    fn test_absent_field_is_empty() {
        let values = FormValues::new();
        assert_eq!(values.get("missing"), &FieldValue::Empty);
        assert!(!values.contains("missing"));
    }

    #[test]
    fn test_untagged_json() {
        let values: FormValues = serde_json::from_value(json!({
            "age": "30",
            "agree": true,
            "interests": ["music", "travel"],
            "prefecture": {"value": "新潟県", "label": "新潟県"},
            "city": null,
        }))
        .unwrap();

        assert_eq!(values.get("age").as_text(), Some("30"));
        assert_eq!(values.get("agree").as_bool(), Some(true));
        assert!(values.get("interests").contains("travel"));
        assert_eq!(
            values.get("prefecture").as_choice(),
            Some(&SelectOption::same("新潟県"))
        );
        assert!(values.get("city").is_empty());
        assert_eq!(serde_json::to_value(FieldValue::Empty).unwrap(), json!(null));
    }

    #[test]
    fn test_parse_paths() {
        let path = FieldPath::parse("items[0].name").unwrap();
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Key("items".into()),
                PathSegment::Index(0),
                PathSegment::Key("name".into()),
            ]
        );
        assert_eq!(FieldPath::parse("grid[1][2]").unwrap().segments().len(), 3);
    }

    #[test]
    fn test_parse_rejects_malformed_paths() {
        for bad in ["", ".a", "a.", "a..b", "[0]", "a[", "a[x]", "a[]", "a]", "a[0]b"] {
            assert!(
                matches!(FieldPath::parse(bad), Err(FormError::InvalidPath { .. })),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_oversized_indexes() {
        assert!(FieldPath::parse("tags[10000]").is_ok());
        for bad in ["tags[10001]", "tags[4000000000]", "tags[18446744073709551615]", "tags[99999999999999999999999]"] {
            assert!(
                matches!(FieldPath::parse(bad), Err(FormError::InvalidPath { .. })),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_nested_json_rejects_oversized_index() {
        let values = FormValues::new().with("tags[18446744073709551615]", "x");
        assert!(matches!(
            values.to_nested_json(),
            Err(FormError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_nested_json() {
        let values = FormValues::new()
            .with("address.city", "新潟市")
            .with("address.zip", "950-0000")
            .with("tags[1]", "b")
            .with("firstName", "Taro");

        assert_eq!(
            values.to_nested_json().unwrap(),
            json!({
                "address": {"city": "新潟市", "zip": "950-0000"},
                "tags": [null, "b"],
                "firstName": "Taro",
            })
        );
    }
}
