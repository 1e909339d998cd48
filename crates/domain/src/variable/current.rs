//! Current selection, selectable options and the "all values" sentinel

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reserved value meaning "every option is selected".
pub const ALL_VARIABLE_VALUE: &str = "$__all";

/// Display text used when the all-value sentinel is selected.
pub const ALL_VARIABLE_TEXT: &str = "All";

/// Display text of an explicit "none" selection.
pub const NONE_VARIABLE_TEXT: &str = "None";

/// Returns true if the value is the all-value sentinel, or an array whose
/// first element is the sentinel.
#[must_use]
pub fn is_all_value(value: &Value) -> bool {
    match value {
        Value::String(s) => s == ALL_VARIABLE_VALUE,
        Value::Array(items) => items
            .first()
            .is_some_and(|first| first.as_str() == Some(ALL_VARIABLE_VALUE)),
        _ => false,
    }
}

/// The value/text pair a variable currently resolves to.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentOption {
    /// Raw value. `Null` means "not yet resolved".
    #[serde(default)]
    pub value: Value,

    /// Display text. Arrays for multi-value selections.
    #[serde(default)]
    pub text: Value,

    /// Explicit "nothing selected" marker.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_none: bool,
}

impl CurrentOption {
    /// Creates a current selection from a value and its text.
    #[must_use]
    pub fn new(value: impl Into<Value>, text: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
            is_none: false,
        }
    }

    /// Creates an explicit "none" selection.
    #[must_use]
    pub fn none() -> Self {
        Self {
            value: Value::Null,
            text: Value::String(NONE_VARIABLE_TEXT.to_string()),
            is_none: true,
        }
    }

    /// Creates a selection of the all-value sentinel.
    #[must_use]
    pub fn all() -> Self {
        Self::new(ALL_VARIABLE_VALUE, ALL_VARIABLE_TEXT)
    }

    /// Returns true if the selection is the all-value sentinel.
    #[must_use]
    pub fn is_all(&self) -> bool {
        is_all_value(&self.value)
    }
}

/// A selectable value/text pair of a variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableOption {
    /// Option value.
    pub value: String,

    /// Option display text.
    pub text: String,

    /// Whether the option is part of the current selection.
    #[serde(default)]
    pub selected: bool,
}

impl VariableOption {
    /// Creates an unselected option.
    #[must_use]
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
            selected: false,
        }
    }

    /// Creates an option whose text equals its value.
    #[must_use]
    pub fn of(value: impl Into<String>) -> Self {
        let value = value.into();
        Self::new(value.clone(), value)
    }

    /// The conventional first option standing for "all values".
    #[must_use]
    pub fn all() -> Self {
        Self::new(ALL_VARIABLE_VALUE, ALL_VARIABLE_TEXT)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_all_value() {
        assert!(is_all_value(&json!("$__all")));
        assert!(is_all_value(&json!(["$__all"])));
        assert!(is_all_value(&json!(["$__all", "a"])));
        assert!(!is_all_value(&json!(["a", "$__all"])));
        assert!(!is_all_value(&json!("All")));
        assert!(!is_all_value(&json!([])));
        assert!(!is_all_value(&Value::Null));
    }

    #[test]
    fn test_current_none() {
        let current = CurrentOption::none();
        assert!(current.is_none);
        assert!(current.value.is_null());
        assert!(!current.is_all());
    }

    #[test]
    fn test_current_deserialize_defaults() {
        let current: CurrentOption = serde_json::from_str(r#"{"value": "a"}"#).unwrap();
        assert_eq!(current.value, json!("a"));
        assert!(current.text.is_null());
        assert!(!current.is_none);
    }

    #[test]
    fn test_option_of() {
        let option = VariableOption::of("prod");
        assert_eq!(option.value, "prod");
        assert_eq!(option.text, "prod");
        assert!(!option.selected);
    }
}
