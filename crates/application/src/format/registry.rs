//! Format registry

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use dashvar_domain::settings::DEFAULT_FORMAT;
use serde_json::Value;

use super::VariableAccessor;
use super::builtins;
use crate::error::{ApplicationError, ApplicationResult};

/// Signature of a registered format: value, `:`-separated arguments, variable view.
pub type FormatterFn = dyn Fn(&Value, &[String], &VariableAccessor<'_>) -> String + Send + Sync;

/// A registered format.
#[derive(Clone)]
pub struct FormatItem {
    /// Identifier used in placeholders (`${var:id}`).
    pub id: String,
    /// Human readable name.
    pub name: String,
    /// Short description with an example.
    pub description: String,
    formatter: Arc<FormatterFn>,
}

impl FormatItem {
    /// Creates a format item.
    #[must_use]
    pub fn new<F>(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        formatter: F,
    ) -> Self
    where
        F: Fn(&Value, &[String], &VariableAccessor<'_>) -> String + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            formatter: Arc::new(formatter),
        }
    }

    /// Runs the format.
    #[must_use]
    pub fn format(&self, value: &Value, args: &[String], variable: &VariableAccessor<'_>) -> String {
        self.formatter.as_ref()(value, args, variable)
    }
}

impl fmt::Debug for FormatItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatItem")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Formats by identifier, plus the identifier used when none is requested.
#[derive(Debug, Clone)]
pub struct FormatRegistry {
    items: HashMap<String, FormatItem>,
    default_format: String,
}

impl FormatRegistry {
    /// Creates a registry holding every built-in format.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for item in builtins::builtin_formats() {
            registry.items.insert(item.id.clone(), item);
        }
        registry
    }

    /// Creates a registry with no formats.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: HashMap::new(),
            default_format: DEFAULT_FORMAT.to_string(),
        }
    }

    /// Sets the default format identifier.
    #[must_use]
    pub fn with_default_format(mut self, id: impl Into<String>) -> Self {
        self.default_format = id.into();
        self
    }

    /// Replaces the default format identifier.
    pub fn set_default_format(&mut self, id: impl Into<String>) {
        self.default_format = id.into();
    }

    /// Returns the default format identifier.
    #[must_use]
    pub fn default_format(&self) -> &str {
        &self.default_format
    }

    /// Registers a new format.
    ///
    /// # Errors
    /// Returns `ApplicationError::DuplicateFormat` if the identifier is taken.
    pub fn register(&mut self, item: FormatItem) -> ApplicationResult<()> {
        if self.items.contains_key(&item.id) {
            return Err(ApplicationError::DuplicateFormat(item.id));
        }
        self.items.insert(item.id.clone(), item);
        Ok(())
    }

    /// Registers a format, replacing any existing one with the same identifier.
    pub fn replace(&mut self, item: FormatItem) -> Option<FormatItem> {
        self.items.insert(item.id.clone(), item)
    }

    /// Returns the format registered under `id`.
    ///
    /// # Errors
    /// Returns `ApplicationError::UnknownFormat` if there is none.
    pub fn get(&self, id: &str) -> ApplicationResult<&FormatItem> {
        self.items
            .get(id)
            .ok_or_else(|| ApplicationError::UnknownFormat(id.to_string()))
    }

    /// Returns the format registered under `id`, if any.
    #[must_use]
    pub fn get_if_exists(&self, id: &str) -> Option<&FormatItem> {
        self.items.get(id)
    }

    /// Returns true if `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Returns the registered identifiers, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.items.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Returns the number of registered formats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if no format is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}
