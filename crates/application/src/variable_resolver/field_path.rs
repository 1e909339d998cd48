//! Field path accessors
//!
//! Compiles paths such as `labels.job`, `items.0` or `items[0]["display name"]` into
//! accessors over JSON values. Compiled accessors are memoized per path string.

use std::collections::HashMap;
use std::sync::Arc;

use dashvar_domain::{DomainError, DomainResult};
use parking_lot::RwLock;
use serde_json::Value;

/// One step of a field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object key. Also indexes arrays when numeric.
    Key(String),
    /// Array index from bracket notation.
    Index(usize),
}

/// A compiled field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    raw: String,
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Parses a dotted/bracketed path.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidFieldPath` for empty segments, unbalanced
    /// brackets or unterminated quotes.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let invalid = |reason: &str| DomainError::InvalidFieldPath(format!("{raw}: {reason}"));

        let mut segments = Vec::new();
        let mut key = String::new();
        let mut after_bracket = false;
        let mut chars = raw.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '.' => {
                    if key.is_empty() && !after_bracket {
                        return Err(invalid("empty segment"));
                    }
                    if !key.is_empty() {
                        segments.push(PathSegment::Key(std::mem::take(&mut key)));
                    }
                    after_bracket = false;
                    if chars.peek().is_none() {
                        return Err(invalid("trailing dot"));
                    }
                }
                '[' => {
                    if !key.is_empty() {
                        segments.push(PathSegment::Key(std::mem::take(&mut key)));
                    }

                    let mut content = String::new();
                    let quote = chars.next_if(|c| *c == '"' || *c == '\'');
                    let mut closed = false;

                    if let Some(quote) = quote {
                        let mut terminated = false;
                        for c in chars.by_ref() {
                            if c == quote {
                                terminated = true;
                                break;
                            }
                            content.push(c);
                        }
                        if !terminated {
                            return Err(invalid("unterminated quote"));
                        }
                        closed = chars.next_if_eq(&']').is_some();
                    } else {
                        for c in chars.by_ref() {
                            if c == ']' {
                                closed = true;
                                break;
                            }
                            content.push(c);
                        }
                    }

                    if !closed {
                        return Err(invalid("unbalanced bracket"));
                    }

                    let segment = match (quote, content.parse::<usize>()) {
                        (None, Ok(index)) => PathSegment::Index(index),
                        _ if content.is_empty() && quote.is_none() => {
                            return Err(invalid("empty brackets"));
                        }
                        _ => PathSegment::Key(content),
                    };
                    segments.push(segment);
                    after_bracket = true;
                }
                _ => {
                    after_bracket = false;
                    key.push(ch);
                }
            }
        }

        if !key.is_empty() {
            segments.push(PathSegment::Key(key));
        }

        if segments.is_empty() {
            return Err(invalid("empty path"));
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// A path that reads the whole string as a single key.
    #[must_use]
    pub fn literal(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            segments: vec![PathSegment::Key(raw.to_string())],
        }
    }

    /// Returns the source string of the path.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns the parsed segments.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Walks the path through `value`. Returns `None` as soon as a step is missing.
    #[must_use]
    pub fn extract<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        let mut current = value;
        for segment in &self.segments {
            current = match (segment, current) {
                (PathSegment::Key(key), Value::Object(map)) => map.get(key)?,
                (PathSegment::Key(key), Value::Array(items)) => {
                    items.get(key.parse::<usize>().ok()?)?
                }
                (PathSegment::Index(index), Value::Array(items)) => items.get(*index)?,
                (PathSegment::Index(index), Value::Object(map)) => map.get(&index.to_string())?,
                _ => return None,
            };
        }
        Some(current)
    }
}

/// Memoized field path accessors, shared across interpolation calls.
///
/// Entries are never evicted; the number of distinct paths in use is small.
#[derive(Debug, Default)]
pub struct FieldAccessorCache {
    accessors: RwLock<HashMap<String, Arc<FieldPath>>>,
}

impl FieldAccessorCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the compiled accessor for `path`, compiling it on first use.
    ///
    /// Paths that do not parse are read as a single literal key.
    pub fn accessor(&self, path: &str) -> Arc<FieldPath> {
        if let Some(accessor) = self.accessors.read().get(path) {
            return Arc::clone(accessor);
        }

        let compiled = FieldPath::parse(path).unwrap_or_else(|err| {
            tracing::trace!(path, %err, "field path not parseable, reading it as a literal key");
            FieldPath::literal(path)
        });

        Arc::clone(
            self.accessors
                .write()
                .entry(path.to_string())
                .or_insert_with(|| Arc::new(compiled)),
        )
    }

    /// Extracts the value at `path`. Missing and `null` targets both yield `None`.
    #[must_use]
    pub fn extract(&self, path: &str, value: &Value) -> Option<Value> {
        self.accessor(path)
            .extract(value)
            .filter(|found| !found.is_null())
            .cloned()
    }

    /// Returns the number of compiled paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accessors.read().len()
    }

    /// Returns true if no path has been compiled yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accessors.read().is_empty()
    }
}

impl Clone for FieldAccessorCache {
    fn clone(&self) -> Self {
        Self {
            accessors: RwLock::new(self.accessors.read().clone()),
        }
    }
}
