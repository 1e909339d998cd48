//! Value formatting pipeline

use dashvar_domain::Variable;
use serde_json::Value;

use super::{FormatRegistry, FormatSpec, VariableAccessor, VariableFormatId, builtins, split_format};

/// Turns resolved values into substitution text.
pub trait ValueFormatter {
    /// Formats `value` for `variable` according to `format`.
    ///
    /// `text` is the display text handed to text-aware formats; it falls back
    /// to the value.
    fn format_value(
        &self,
        value: Option<&Value>,
        format: Option<&FormatSpec>,
        variable: Option<&Variable>,
        text: Option<&Value>,
    ) -> String;
}

impl ValueFormatter for FormatRegistry {
    fn format_value(
        &self,
        value: Option<&Value>,
        format: Option<&FormatSpec>,
        variable: Option<&Variable>,
        text: Option<&Value>,
    ) -> String {
        let Some(value) = value.filter(|value| !value.is_null()) else {
            return String::new();
        };

        // Ad-hoc filters only render as URL query parameters.
        if variable.is_some_and(Variable::is_ad_hoc)
            && !format.is_some_and(|format| format.is(VariableFormatId::QueryParam))
        {
            return String::new();
        }

        let stringified;
        let value = if value.is_object() {
            stringified = Value::String(value.to_string());
            &stringified
        } else {
            value
        };

        let spec = match format {
            Some(FormatSpec::Custom(custom)) => return custom.as_ref()(value, variable, self),
            Some(FormatSpec::Named(spec)) => spec.as_str(),
            None => "",
        };

        let (name, args) = split_format(spec);
        let name = if name.is_empty() {
            self.default_format()
        } else {
            name
        };
        let accessor = VariableAccessor::wrap(variable, value, text);

        if let Some(item) = self.get_if_exists(name) {
            return item.format(value, &args, &accessor);
        }

        tracing::error!(
            format = name,
            fallback = self.default_format(),
            "variable format not found, using fallback"
        );
        self.get_if_exists(self.default_format()).map_or_else(
            || builtins::glob(value, &args, &accessor),
            |item| item.format(value, &args, &accessor),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use dashvar_domain::{AdHocFilter, VariableType};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn format(value: &Value, spec: &str) -> String {
        FormatRegistry::new().format_value(Some(value), Some(&FormatSpec::named(spec)), None, None)
    }

    #[test]
    fn test_null_and_missing_are_empty() {
        let registry = FormatRegistry::new();
        assert_eq!(registry.format_value(None, None, None, None), "");
        assert_eq!(registry.format_value(Some(&Value::Null), None, None, None), "");
    }

    #[test]
    fn test_default_format_is_glob() {
        let registry = FormatRegistry::new();
        let value = json!(["a", "b"]);
        assert_eq!(registry.format_value(Some(&value), None, None, None), "{a,b}");
    }

    #[test]
    fn test_configured_default_format() {
        let registry = FormatRegistry::new().with_default_format("pipe");
        let value = json!(["a", "b"]);
        assert_eq!(registry.format_value(Some(&value), None, None, None), "a|b");
    }

    #[test]
    fn test_empty_name_uses_default() {
        assert_eq!(format(&json!(["a", "b"]), ""), "{a,b}");
    }

    #[test]
    fn test_unknown_format_falls_back_to_default() {
        assert_eq!(format(&json!(["a", "b"]), "nope"), "{a,b}");
    }

    #[test]
    fn test_unknown_format_without_default_registered_uses_glob() {
        let registry = FormatRegistry::empty().with_default_format("missing");
        let value = json!(["a", "b"]);
        assert_eq!(
            registry.format_value(Some(&value), Some(&"nope".into()), None, None),
            "{a,b}"
        );
    }

    #[test]
    fn test_object_is_stringified() {
        assert_eq!(format(&json!({"a": 1}), "raw"), r#"{"a":1}"#);
    }

    #[test]
    fn test_args_are_passed() {
        assert_eq!(format(&json!(["a", "b"]), "join:;"), "a;b");
    }

    #[test]
    fn test_ad_hoc_renders_only_as_queryparam() {
        let registry = FormatRegistry::new();
        let variable = Variable::ad_hoc("filters", None, vec![AdHocFilter::new("job", "=", "api")]);
        let value = json!(["job|=|api"]);

        assert_eq!(
            registry.format_value(Some(&value), None, Some(&variable), None),
            ""
        );
        assert_eq!(
            registry.format_value(Some(&value), Some(&"csv".into()), Some(&variable), None),
            ""
        );
        assert_eq!(
            registry.format_value(
                Some(&value),
                Some(&VariableFormatId::QueryParam.into()),
                Some(&variable),
                None
            ),
            "var-filters=job%7C%3D%7Capi"
        );
    }

    #[test]
    fn test_custom_closure_receives_variable_and_formatter() {
        let registry = FormatRegistry::new();
        let variable = Variable::new("env", VariableType::Custom);
        let value = json!(["a", "b"]);
        let spec = FormatSpec::custom(|value, variable, formatter| {
            let inner = formatter.format_value(Some(value), Some(&"csv".into()), variable, None);
            format!("{}={inner}", variable.map_or("?", |v| v.name.as_str()))
        });

        assert_eq!(
            registry.format_value(Some(&value), Some(&spec), Some(&variable), None),
            "env=a,b"
        );
    }

    #[test]
    fn test_text_uses_supplied_text() {
        let registry = FormatRegistry::new();
        let value = json!("1");
        let text = json!("One");
        assert_eq!(
            registry.format_value(Some(&value), Some(&"text".into()), None, Some(&text)),
            "One"
        );
        assert_eq!(
            registry.format_value(Some(&value), Some(&"text".into()), None, None),
            "1"
        );
    }
}
