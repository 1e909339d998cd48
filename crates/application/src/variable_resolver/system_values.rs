//! System value registry
//!
//! Maps well-known current-value tokens to values supplied by the host. A
//! variable whose current value is a registered token renders the registered
//! value instead.

use std::collections::HashMap;

use serde_json::Value;

/// Token to value map for system-provided variable values.
#[derive(Debug, Clone, Default)]
pub struct SystemValueRegistry {
    values: HashMap<String, Value>,
}

impl SystemValueRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `value` for `token`, returning the previous value.
    pub fn set(&mut self, token: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(token.into(), value.into())
    }

    /// Returns the value registered for `token`.
    #[must_use]
    pub fn get(&self, token: &str) -> Option<&Value> {
        self.values.get(token)
    }

    /// Removes the value registered for `token`.
    pub fn remove(&mut self, token: &str) -> Option<Value> {
        self.values.remove(token)
    }

    /// Returns the number of registered tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
