//! Format specifications

use std::fmt;
use std::sync::Arc;

use dashvar_domain::Variable;
use serde_json::Value;

use super::ValueFormatter;

/// Signature of a caller-supplied format closure.
///
/// Receives the resolved value, the variable (if any) and the formatter, so
/// the closure can delegate to a named format.
pub type CustomFormatFn =
    dyn Fn(&Value, Option<&Variable>, &dyn ValueFormatter) -> String + Send + Sync;

/// How a value should be formatted.
#[derive(Clone)]
pub enum FormatSpec {
    /// A registered format, optionally with `:`-separated arguments
    /// (`date:YYYY`, `join:;`).
    Named(String),
    /// A caller-supplied closure.
    Custom(Arc<CustomFormatFn>),
}

impl FormatSpec {
    /// Creates a named format spec.
    #[must_use]
    pub fn named(spec: impl Into<String>) -> Self {
        Self::Named(spec.into())
    }

    /// Wraps a closure as a format spec.
    #[must_use]
    pub fn custom<F>(formatter: F) -> Self
    where
        F: Fn(&Value, Option<&Variable>, &dyn ValueFormatter) -> String + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(formatter))
    }

    /// Returns the full spec string of a named format.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named(spec) => Some(spec),
            Self::Custom(_) => None,
        }
    }

    /// Returns true if this is exactly the named format `id`, without arguments.
    #[must_use]
    pub fn is(&self, id: VariableFormatId) -> bool {
        self.name() == Some(id.as_str())
    }
}

impl fmt::Debug for FormatSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(spec) => f.debug_tuple("Named").field(spec).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<&str> for FormatSpec {
    fn from(spec: &str) -> Self {
        Self::Named(spec.to_string())
    }
}

impl From<String> for FormatSpec {
    fn from(spec: String) -> Self {
        Self::Named(spec)
    }
}

impl From<VariableFormatId> for FormatSpec {
    fn from(id: VariableFormatId) -> Self {
        Self::Named(id.as_str().to_string())
    }
}

/// Identifiers of the built-in formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableFormatId {
    /// `{a,b}` for several values.
    Glob,
    /// Values as-is.
    Raw,
    /// Comma-separated.
    Csv,
    /// Pipe-separated.
    Pipe,
    /// Joined with a custom separator.
    Join,
    /// `a,name=b,name=c`.
    Distributed,
    /// Regex-escaped, `(a|b)` for several values.
    Regex,
    /// Lucene-escaped, `("a" OR "b")` for several values.
    Lucene,
    /// JSON text.
    Json,
    /// Percent-encoded.
    PercentEncode,
    /// Single-quoted.
    SingleQuote,
    /// Double-quoted.
    DoubleQuote,
    /// SQL string literals.
    SqlString,
    /// HTML-escaped.
    Html,
    /// Display text instead of value.
    Text,
    /// `var-name=value` URL query pairs.
    QueryParam,
    /// Epoch milliseconds as a date.
    Date,
}

impl VariableFormatId {
    /// Every built-in format.
    pub const ALL: [Self; 17] = [
        Self::Glob,
        Self::Raw,
        Self::Csv,
        Self::Pipe,
        Self::Join,
        Self::Distributed,
        Self::Regex,
        Self::Lucene,
        Self::Json,
        Self::PercentEncode,
        Self::SingleQuote,
        Self::DoubleQuote,
        Self::SqlString,
        Self::Html,
        Self::Text,
        Self::QueryParam,
        Self::Date,
    ];

    /// Returns the identifier used in placeholders.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Glob => "glob",
            Self::Raw => "raw",
            Self::Csv => "csv",
            Self::Pipe => "pipe",
            Self::Join => "join",
            Self::Distributed => "distributed",
            Self::Regex => "regex",
            Self::Lucene => "lucene",
            Self::Json => "json",
            Self::PercentEncode => "percentencode",
            Self::SingleQuote => "singlequote",
            Self::DoubleQuote => "doublequote",
            Self::SqlString => "sqlstring",
            Self::Html => "html",
            Self::Text => "text",
            Self::QueryParam => "queryparam",
            Self::Date => "date",
        }
    }
}

impl fmt::Display for VariableFormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Splits a format spec on `:` into its name and arguments.
///
/// `"date:YYYY-MM"` gives `("date", ["YYYY-MM"])`. An empty name means the
/// default format.
#[must_use]
pub fn split_format(spec: &str) -> (&str, Vec<String>) {
    let mut parts = spec.split(':');
    let name = parts.next().unwrap_or_default();
    (name, parts.map(str::to_string).collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_format() {
        assert_eq!(split_format("glob"), ("glob", vec![]));
        assert_eq!(
            split_format("date:%H:%M"),
            ("date", vec!["%H".to_string(), "%M".to_string()])
        );
        assert_eq!(split_format(""), ("", vec![]));
        assert_eq!(split_format(":x"), ("", vec!["x".to_string()]));
    }

    #[test]
    fn test_is_requires_exact_name() {
        assert!(FormatSpec::from(VariableFormatId::QueryParam).is(VariableFormatId::QueryParam));
        assert!(!FormatSpec::named("queryparam:x").is(VariableFormatId::QueryParam));
        assert!(!FormatSpec::custom(|_, _, _| String::new()).is(VariableFormatId::Text));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<_> = VariableFormatId::ALL.iter().map(|id| id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), VariableFormatId::ALL.len());
    }

    #[test]
    fn test_debug_hides_closure() {
        let spec = FormatSpec::custom(|_, _, _| String::new());
        assert_eq!(format!("{spec:?}"), "Custom(..)");
    }
}
