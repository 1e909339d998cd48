//! Per-call variable overrides

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::ports::SceneInterpolator;

/// A caller-supplied value that shadows a variable for one interpolation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopedVar {
    /// The override value.
    pub value: Value,
    /// Display text for the `text` format.
    pub text: Option<Value>,
    /// Substitute the value without applying any format.
    pub skip_format: bool,
}

impl ScopedVar {
    /// Creates an override with display text.
    #[must_use]
    pub fn new(value: impl Into<Value>, text: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            text: Some(text.into()),
            skip_format: false,
        }
    }

    /// Creates an override without display text.
    #[must_use]
    pub fn value(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            text: None,
            skip_format: false,
        }
    }

    /// Substitutes the value unformatted.
    #[must_use]
    pub const fn skip_format(mut self) -> Self {
        self.skip_format = true;
        self
    }
}

/// Overrides for one interpolation call, optionally bound to a scene.
#[derive(Clone, Default)]
pub struct ScopedVars {
    vars: HashMap<String, ScopedVar>,
    scene: Option<Arc<dyn SceneInterpolator>>,
}

impl ScopedVars {
    /// Creates an empty override map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an override.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, var: ScopedVar) -> Self {
        self.vars.insert(name.into(), var);
        self
    }

    /// Delegates interpolation of every target to `scene`.
    #[must_use]
    pub fn with_scene(mut self, scene: Arc<dyn SceneInterpolator>) -> Self {
        self.scene = Some(scene);
        self
    }

    /// Inserts or replaces an override.
    pub fn insert(&mut self, name: impl Into<String>, var: ScopedVar) -> Option<ScopedVar> {
        self.vars.insert(name.into(), var)
    }

    /// Returns the override for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ScopedVar> {
        self.vars.get(name)
    }

    /// Returns the bound scene, if any.
    #[must_use]
    pub fn scene(&self) -> Option<&Arc<dyn SceneInterpolator>> {
        self.scene.as_ref()
    }

    /// Returns the number of overrides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns true if there are no overrides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl fmt::Debug for ScopedVars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedVars")
            .field("vars", &self.vars)
            .field("scene", &self.scene.is_some())
            .finish()
    }
}

impl<K: Into<String>> FromIterator<(K, ScopedVar)> for ScopedVars {
    fn from_iter<I: IntoIterator<Item = (K, ScopedVar)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(name, var)| (name.into(), var))
                .collect(),
            scene: None,
        }
    }
}
