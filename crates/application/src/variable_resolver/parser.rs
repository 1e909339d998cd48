//! Placeholder parser for `$name`, `[[name:format]]` and `${name.path:format}` syntax
//!
//! Scans strings left to right and yields non-overlapping placeholder references
//! with their positions. Each scan owns its cursor, so no state leaks between calls.

use std::borrow::Cow;
use std::ops::Range;

use dashvar_domain::variable::is_name_byte;

pub use dashvar_domain::variable::is_valid_variable_name;

/// Which of the three placeholder syntaxes matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderSyntax {
    /// `$name`
    Simple,
    /// `[[name]]` or `[[name:format]]`
    Bracketed,
    /// `${name}`, `${name.path}`, `${name:format}` or `${name.path:format}`
    Braced,
}

/// A parsed placeholder reference in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// Syntax that matched.
    pub syntax: PlaceholderSyntax,

    /// The variable name.
    pub name: &'a str,

    /// Dotted field path, only for the braced syntax.
    pub field_path: Option<&'a str>,

    /// Format spec including any `:`-separated arguments.
    pub format: Option<&'a str>,

    /// Byte range in the original string where this placeholder appears.
    pub span: Range<usize>,
}

impl Placeholder<'_> {
    /// Returns `name`, or `name.path` when a field path was captured.
    #[must_use]
    pub fn display_name(&self) -> Cow<'_, str> {
        match self.field_path {
            Some(path) => Cow::Owned(format!("{}.{path}", self.name)),
            None => Cow::Borrowed(self.name),
        }
    }
}

/// Lazy iterator over the placeholders of a string.
#[derive(Debug, Clone)]
pub struct Placeholders<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Placeholders<'a> {
    /// Starts a new scan at the beginning of `input`.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn scan_at(&self, start: usize) -> Option<Placeholder<'a>> {
        match self.input.as_bytes()[start] {
            b'$' => self
                .scan_simple(start)
                .or_else(|| self.scan_braced(start)),
            b'[' => self.scan_bracketed(start),
            _ => None,
        }
    }

    /// Consumes `[A-Za-z0-9_]+` from `from`, returning the end offset.
    fn scan_name(&self, from: usize) -> Option<usize> {
        let bytes = self.input.as_bytes();
        let mut end = from;
        while end < bytes.len() && is_name_byte(bytes[end]) {
            end += 1;
        }
        (end > from).then_some(end)
    }

    /// Consumes one or more bytes not in `stops`, returning the end offset.
    fn scan_until(&self, from: usize, stops: &[u8]) -> Option<usize> {
        let bytes = self.input.as_bytes();
        let mut end = from;
        while end < bytes.len() && !stops.contains(&bytes[end]) {
            end += 1;
        }
        (end > from).then_some(end)
    }

    fn byte_at(&self, pos: usize) -> Option<u8> {
        self.input.as_bytes().get(pos).copied()
    }

    fn scan_simple(&self, start: usize) -> Option<Placeholder<'a>> {
        let name_end = self.scan_name(start + 1)?;
        Some(Placeholder {
            syntax: PlaceholderSyntax::Simple,
            name: &self.input[start + 1..name_end],
            field_path: None,
            format: None,
            span: start..name_end,
        })
    }

    fn scan_bracketed(&self, start: usize) -> Option<Placeholder<'a>> {
        if self.byte_at(start + 1)? != b'[' {
            return None;
        }

        let name_start = start + 2;
        let name_end = self.scan_name(name_start)?;
        let mut cursor = name_end;

        let mut format = None;
        if self.byte_at(cursor)? == b':' {
            let format_end = self.scan_name(cursor + 1)?;
            format = Some(&self.input[cursor + 1..format_end]);
            cursor = format_end;
        }

        if self.byte_at(cursor)? != b']' || self.byte_at(cursor + 1)? != b']' {
            return None;
        }

        Some(Placeholder {
            syntax: PlaceholderSyntax::Bracketed,
            name: &self.input[name_start..name_end],
            field_path: None,
            format,
            span: start..cursor + 2,
        })
    }

    fn scan_braced(&self, start: usize) -> Option<Placeholder<'a>> {
        if self.byte_at(start + 1)? != b'{' {
            return None;
        }

        let name_start = start + 2;
        let name_end = self.scan_name(name_start)?;
        let mut cursor = name_end;

        let mut field_path = None;
        if self.byte_at(cursor)? == b'.' {
            let path_end = self.scan_until(cursor + 1, b":^}")?;
            field_path = Some(&self.input[cursor + 1..path_end]);
            cursor = path_end;
        }

        let mut format = None;
        if self.byte_at(cursor)? == b':' {
            let format_end = self.scan_until(cursor + 1, b"}")?;
            format = Some(&self.input[cursor + 1..format_end]);
            cursor = format_end;
        }

        if self.byte_at(cursor)? != b'}' {
            return None;
        }

        Some(Placeholder {
            syntax: PlaceholderSyntax::Braced,
            name: &self.input[name_start..name_end],
            field_path,
            format,
            span: start..cursor + 1,
        })
    }
}

impl<'a> Iterator for Placeholders<'a> {
    type Item = Placeholder<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        // Delimiters are ASCII, so stepping byte-wise never matches inside a
        // multi-byte character and every slice lands on a char boundary.
        while self.pos < self.input.len() {
            let start = self.pos;
            if let Some(placeholder) = self.scan_at(start) {
                self.pos = placeholder.span.end;
                return Some(placeholder);
            }
            self.pos += 1;
        }
        None
    }
}

/// Parses a string and returns a lazy iterator over its placeholders.
///
/// # Examples
///
/// ```
/// use dashvar_application::variable_resolver::parser::{PlaceholderSyntax, parse_placeholders};
///
/// let refs: Vec<_> = parse_placeholders("rate($metric[[interval]]) by ${group.key:csv}").collect();
/// assert_eq!(refs.len(), 3);
/// assert_eq!(refs[0].name, "metric");
/// assert_eq!(refs[1].syntax, PlaceholderSyntax::Bracketed);
/// assert_eq!(refs[2].field_path, Some("key"));
/// assert_eq!(refs[2].format, Some("csv"));
/// ```
#[must_use]
pub const fn parse_placeholders(input: &str) -> Placeholders<'_> {
    Placeholders::new(input)
}

/// Returns the first placeholder of the input, if any.
#[must_use]
pub fn first_placeholder(input: &str) -> Option<Placeholder<'_>> {
    parse_placeholders(input).next()
}

/// Returns true if the input contains at least one placeholder.
#[must_use]
pub fn has_placeholders(input: &str) -> bool {
    first_placeholder(input).is_some()
}

/// Extracts just the variable names from the input, in order of appearance.
#[must_use]
pub fn extract_variable_names(input: &str) -> Vec<String> {
    parse_placeholders(input)
        .map(|placeholder| placeholder.name.to_string())
        .collect()
}
