//! Built-in formats
//!
//! Every function here has the [`FormatterFn`](super::FormatterFn) signature
//! and is registered by [`FormatRegistry::new`](super::FormatRegistry::new).
//! Array elements are stringified one by one; objects arrive already
//! serialized to JSON text.

use std::fmt::Write as _;

use chrono::{DateTime, SecondsFormat};
use serde_json::Value;

use super::{FormatItem, VariableAccessor, VariableFormatId};

/// Lucene's replacement for an empty selection.
pub const LUCENE_EMPTY: &str = "__empty__";

/// Characters escaped by the `regex` format.
const REGEX_SPECIAL: &[char] = &[
    '\\', '^', '$', '*', '+', '?', '.', '(', ')', '|', '[', ']', '{', '}', '/',
];

/// Characters escaped by the `lucene` format, besides whitespace.
const LUCENE_SPECIAL: &[char] = &[
    '!', '*', '+', '-', '=', '<', '>', '&', '|', '(', ')', '[', ']', '{', '}', '^', '~', '?', ':',
    '\\', '/', '"',
];

/// Escapes `urlencoding` produces that query values keep readable.
const QUERY_KEPT: &[(&str, &str)] = &[
    ("%40", "@"),
    ("%3A", ":"),
    ("%24", "$"),
    ("%2C", ","),
    ("%3B", ";"),
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

/// Date pattern tokens and their `chrono` equivalents, longest first.
const DATE_TOKENS: &[(&str, &str)] = &[
    ("YYYY", "%Y"),
    ("MMMM", "%B"),
    ("dddd", "%A"),
    ("DDDD", "%j"),
    ("MMM", "%b"),
    ("ddd", "%a"),
    ("SSS", "%3f"),
    ("YY", "%y"),
    ("MM", "%m"),
    ("DD", "%d"),
    ("HH", "%H"),
    ("hh", "%I"),
    ("mm", "%M"),
    ("ss", "%S"),
    ("ZZ", "%z"),
    ("M", "%-m"),
    ("D", "%-d"),
    ("H", "%-H"),
    ("h", "%-I"),
    ("m", "%-M"),
    ("s", "%-S"),
    ("A", "%p"),
    ("a", "%P"),
    ("Z", "%:z"),
    ("X", "%s"),
];

/// Returns the built-in format catalogue.
#[must_use]
pub fn builtin_formats() -> Vec<FormatItem> {
    use VariableFormatId as Id;

    vec![
        FormatItem::new(
            Id::Glob.as_str(),
            "Glob",
            "Multiple values in glob syntax, example {value1,value2}",
            glob,
        ),
        FormatItem::new(Id::Raw.as_str(), "Raw", "Keep value as is", raw),
        FormatItem::new(
            Id::Csv.as_str(),
            "Csv",
            "Comma-separated values, example value1,value2",
            csv,
        ),
        FormatItem::new(
            Id::Pipe.as_str(),
            "Pipe",
            "Pipe-separated values, example value1|value2",
            pipe,
        ),
        FormatItem::new(
            Id::Join.as_str(),
            "Join",
            "Join values with a custom separator, example ${var:join:;}",
            join,
        ),
        FormatItem::new(
            Id::Distributed.as_str(),
            "Distributed",
            "Repeat the variable name for every value after the first, example value1,var=value2",
            distributed,
        ),
        FormatItem::new(
            Id::Regex.as_str(),
            "Regex",
            "Regex-escaped values, example (value1|value2)",
            regex,
        ),
        FormatItem::new(
            Id::Lucene.as_str(),
            "Lucene",
            "Lucene-escaped values, example (\"value1\" OR \"value2\")",
            lucene,
        ),
        FormatItem::new(
            Id::Json.as_str(),
            "JSON",
            "JSON representation, example [\"value1\",\"value2\"]",
            json,
        ),
        FormatItem::new(
            Id::PercentEncode.as_str(),
            "Percent encode",
            "URL component encoding, example %7Bvalue1%2Cvalue2%7D",
            percent_encode,
        ),
        FormatItem::new(
            Id::SingleQuote.as_str(),
            "Single quote",
            "Single-quoted values, example 'value1','value2'",
            single_quote,
        ),
        FormatItem::new(
            Id::DoubleQuote.as_str(),
            "Double quote",
            "Double-quoted values, example \"value1\",\"value2\"",
            double_quote,
        ),
        FormatItem::new(
            Id::SqlString.as_str(),
            "SQL string",
            "SQL string literals, example 'value1','value2'",
            sql_string,
        ),
        FormatItem::new(
            Id::Html.as_str(),
            "HTML",
            "HTML-escaped values, example value1, value2",
            html,
        ),
        FormatItem::new(
            Id::Text.as_str(),
            "Text",
            "Display text instead of value, example Value 1 + Value 2",
            text,
        ),
        FormatItem::new(
            Id::QueryParam.as_str(),
            "Query parameter",
            "URL query parameters, example var-name=value1&var-name=value2",
            query_param,
        ),
        FormatItem::new(
            Id::Date.as_str(),
            "Date",
            "Epoch milliseconds as a date, example ${__from:date:iso}",
            date,
        ),
    ]
}

/// Renders a scalar as text. Strings are unquoted, arrays comma-joined.
#[must_use]
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Array(items) => join_items(items, ","),
        other => other.to_string(),
    }
}

fn join_items(items: &[Value], separator: &str) -> String {
    items
        .iter()
        .map(value_to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

fn map_join(items: &[Value], separator: &str, f: impl Fn(&str) -> String) -> String {
    items
        .iter()
        .map(|item| f(&value_to_string(item)))
        .collect::<Vec<_>>()
        .join(separator)
}

/// `{a,b}` for several values, the value itself otherwise.
#[must_use]
pub fn glob(value: &Value, _args: &[String], _variable: &VariableAccessor<'_>) -> String {
    match value {
        Value::Array(items) if items.len() > 1 => format!("{{{}}}", join_items(items, ",")),
        other => value_to_string(other),
    }
}

fn raw(value: &Value, _args: &[String], _variable: &VariableAccessor<'_>) -> String {
    value_to_string(value)
}

fn csv(value: &Value, _args: &[String], _variable: &VariableAccessor<'_>) -> String {
    match value {
        Value::Array(items) => join_items(items, ","),
        other => value_to_string(other),
    }
}

fn pipe(value: &Value, _args: &[String], _variable: &VariableAccessor<'_>) -> String {
    match value {
        Value::Array(items) => join_items(items, "|"),
        other => value_to_string(other),
    }
}

fn join(value: &Value, args: &[String], _variable: &VariableAccessor<'_>) -> String {
    match value {
        Value::Array(items) => join_items(items, args.first().map_or(",", String::as_str)),
        other => value_to_string(other),
    }
}

fn distributed(value: &Value, _args: &[String], variable: &VariableAccessor<'_>) -> String {
    let Value::Array(items) = value else {
        return value_to_string(value);
    };

    let name = variable.name_or_empty();
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let item = value_to_string(item);
            if index == 0 {
                item
            } else {
                format!("{name}={item}")
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn regex_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if REGEX_SPECIAL.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn regex(value: &Value, _args: &[String], _variable: &VariableAccessor<'_>) -> String {
    match value {
        Value::Array(items) if items.len() == 1 => regex_escape(&value_to_string(&items[0])),
        Value::Array(items) => format!("({})", map_join(items, "|", regex_escape)),
        other => regex_escape(&value_to_string(other)),
    }
}

fn lucene_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_whitespace() || LUCENE_SPECIAL.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn lucene(value: &Value, _args: &[String], _variable: &VariableAccessor<'_>) -> String {
    match value {
        Value::Array(items) if items.is_empty() => LUCENE_EMPTY.to_string(),
        Value::Array(items) => format!(
            "({})",
            map_join(items, " OR ", |item| format!("\"{}\"", lucene_escape(item)))
        ),
        other => lucene_escape(&value_to_string(other)),
    }
}

fn json(value: &Value, _args: &[String], _variable: &VariableAccessor<'_>) -> String {
    value.to_string()
}

fn percent_encode(value: &Value, _args: &[String], _variable: &VariableAccessor<'_>) -> String {
    match value {
        Value::Array(items) => {
            urlencoding::encode(&format!("{{{}}}", join_items(items, ","))).into_owned()
        }
        other => urlencoding::encode(&value_to_string(other)).into_owned(),
    }
}

fn quote_each(value: &Value, quote: impl Fn(&str) -> String) -> String {
    match value {
        Value::Array(items) => map_join(items, ",", quote),
        other => quote(&value_to_string(other)),
    }
}

fn single_quote(value: &Value, _args: &[String], _variable: &VariableAccessor<'_>) -> String {
    quote_each(value, |item| format!("'{}'", item.replace('\'', "\\'")))
}

fn double_quote(value: &Value, _args: &[String], _variable: &VariableAccessor<'_>) -> String {
    quote_each(value, |item| format!("\"{}\"", item.replace('"', "\\\"")))
}

fn sql_string(value: &Value, _args: &[String], _variable: &VariableAccessor<'_>) -> String {
    quote_each(value, |item| format!("'{}'", item.replace('\'', "''")))
}

fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn html(value: &Value, _args: &[String], _variable: &VariableAccessor<'_>) -> String {
    match value {
        Value::Array(items) => html_escape(&join_items(items, ", ")),
        other => html_escape(&value_to_string(other)),
    }
}

fn text(_value: &Value, _args: &[String], variable: &VariableAccessor<'_>) -> String {
    match variable.text {
        Value::Array(items) => join_items(items, " + "),
        other => value_to_string(other),
    }
}

fn query_param(value: &Value, _args: &[String], variable: &VariableAccessor<'_>) -> String {
    let name = variable.name_or_empty();
    let pair = |item: &str| format!("var-{name}={}", encode_query_value(item));
    match value {
        Value::Array(items) => map_join(items, "&", pair),
        other => pair(&value_to_string(other)),
    }
}

/// URI-component encoding that leaves `@ : $ , ; ! ' ( ) *` as they are.
fn encode_query_value(raw: &str) -> String {
    // Every escape starts at a `%` of its own triple, so plain replacement is exact.
    QUERY_KEPT
        .iter()
        .fold(urlencoding::encode(raw).into_owned(), |encoded, (escape, kept)| {
            encoded.replace(escape, kept)
        })
}

/// Translates a `YYYY-MM-DD HH:mm` style pattern to `chrono` syntax.
///
/// Text inside `[...]` is literal. Patterns already containing `%` are
/// taken as `chrono` patterns and returned unchanged.
fn date_pattern(pattern: &str) -> String {
    if pattern.contains('%') {
        return pattern.to_string();
    }

    let mut translated = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;

    while let Some(ch) = rest.chars().next() {
        if ch == '[' {
            if let Some(end) = rest.find(']') {
                translated.push_str(&rest[1..end]);
                rest = &rest[end + 1..];
                continue;
            }
        }

        let token = DATE_TOKENS
            .iter()
            .find(|(token, _)| rest.starts_with(token));
        if let Some((token, replacement)) = token {
            translated.push_str(replacement);
            rest = &rest[token.len()..];
        } else {
            translated.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }

    translated
}

#[allow(clippy::cast_possible_truncation)]
fn epoch_millis(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|millis| millis.round() as i64)),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn date(value: &Value, args: &[String], _variable: &VariableAccessor<'_>) -> String {
    let Some(millis) = epoch_millis(value) else {
        return value_to_string(value);
    };

    match args.first().map_or("iso", String::as_str) {
        "ms" => millis.to_string(),
        "seconds" => millis.saturating_add(500).div_euclid(1000).to_string(),
        "iso" => DateTime::from_timestamp_millis(millis).map_or_else(
            || value_to_string(value),
            |at| at.to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
        _ => {
            let pattern = date_pattern(&args.join(":"));
            let Some(at) = DateTime::from_timestamp_millis(millis) else {
                return value_to_string(value);
            };
            let mut rendered = String::new();
            // Invalid patterns surface as fmt errors rather than panics.
            match write!(rendered, "{}", at.format(&pattern)) {
                Ok(()) => rendered,
                Err(_) => value_to_string(value),
            }
        }
    }
}
