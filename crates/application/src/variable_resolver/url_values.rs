//! Default URL representation of variables

use dashvar_domain::{ALL_VARIABLE_TEXT, AdHocFilter, Variable, is_all_value};
use serde_json::Value;

use crate::ports::UrlValueAdapter;

/// Replacement for `|` inside ad-hoc filter parts.
pub const URL_DELIMITER_ESCAPE: &str = "__gfp__";

/// Escapes the `|` delimiter in one part of a URL-encoded filter.
#[must_use]
pub fn escape_url_delimiter(part: &str) -> String {
    part.replace('|', URL_DELIMITER_ESCAPE)
}

/// Encodes a filter as `key|operator|value`.
#[must_use]
pub fn filter_to_url(filter: &AdHocFilter) -> String {
    format!(
        "{}|{}|{}",
        escape_url_delimiter(&filter.key),
        escape_url_delimiter(&filter.operator),
        escape_url_delimiter(&filter.value)
    )
}

/// URL values as dashboards put them in links.
///
/// Ad-hoc variables become one `key|operator|value` entry per filter; other
/// variables contribute their current value, or `All` when "All" is selected.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultUrlValues;

impl UrlValueAdapter for DefaultUrlValues {
    fn value_for_url(&self, variable: &Variable) -> Value {
        if variable.is_ad_hoc() {
            return Value::Array(
                variable
                    .ad_hoc_filters()
                    .iter()
                    .map(|filter| Value::String(filter_to_url(filter)))
                    .collect(),
            );
        }

        match variable.current_value() {
            Some(value) if is_all_value(value) => Value::String(ALL_VARIABLE_TEXT.to_string()),
            Some(value) => value.clone(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use dashvar_domain::{ALL_VARIABLE_VALUE, VariableType};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_ad_hoc_filters_escape_delimiter() {
        let variable = Variable::ad_hoc(
            "filters",
            None,
            vec![
                AdHocFilter::new("job", "=", "api"),
                AdHocFilter::new("path", "=~", "a|b"),
            ],
        );
        assert_eq!(
            DefaultUrlValues.value_for_url(&variable),
            json!(["job|=|api", "path|=~|a__gfp__b"])
        );
    }

    #[test]
    fn test_scalar_current_value() {
        let variable = Variable::new("env", VariableType::Custom).with_current("prod", "Prod");
        assert_eq!(DefaultUrlValues.value_for_url(&variable), json!("prod"));
    }

    #[test]
    fn test_all_selection() {
        let variable = Variable::new("env", VariableType::Custom)
            .with_current(json!([ALL_VARIABLE_VALUE]), "All");
        assert_eq!(DefaultUrlValues.value_for_url(&variable), json!("All"));
    }

    #[test]
    fn test_unresolved_is_null() {
        let variable = Variable::new("env", VariableType::Custom);
        assert_eq!(DefaultUrlValues.value_for_url(&variable), Value::Null);
    }
}
