//! Read-only view of a variable handed to format functions

use dashvar_domain::{Variable, VariableType};
use serde_json::Value;

/// What a format function may read about the variable being formatted.
///
/// Fields taken from the variable are `None` when formatting a bare value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableAccessor<'a> {
    /// Variable name.
    pub name: Option<&'a str>,
    /// Variable type.
    pub variable_type: Option<VariableType>,
    /// Whether several values can be selected.
    pub multi: Option<bool>,
    /// Whether "All" can be selected.
    pub include_all: Option<bool>,
    /// The value being formatted.
    pub value: &'a Value,
    /// Display text; falls back to the value.
    pub text: &'a Value,
}

impl<'a> VariableAccessor<'a> {
    /// Builds the accessor for `value`, taking metadata from `variable`.
    #[must_use]
    pub fn wrap(variable: Option<&'a Variable>, value: &'a Value, text: Option<&'a Value>) -> Self {
        Self {
            name: variable.map(|variable| variable.name.as_str()),
            variable_type: variable.map(|variable| variable.variable_type),
            multi: variable.map(|variable| variable.multi),
            include_all: variable.map(|variable| variable.include_all),
            value,
            text: text.filter(|text| !text.is_null()).unwrap_or(value),
        }
    }

    /// Returns the variable name, or `""` for bare values.
    #[must_use]
    pub fn name_or_empty(&self) -> &'a str {
        self.name.unwrap_or_default()
    }
}
