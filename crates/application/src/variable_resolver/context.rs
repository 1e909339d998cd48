//! Interpolation context

use super::field_path::FieldAccessorCache;
use super::index::VariableIndex;
use super::system_values::SystemValueRegistry;

/// Everything a resolver reads while interpolating.
///
/// Each resolver owns its context; independent contexts never share state.
#[derive(Debug, Clone, Default)]
pub struct InterpolationContext {
    index: VariableIndex,
    system_values: SystemValueRegistry,
    field_accessors: FieldAccessorCache,
}

impl InterpolationContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context over an existing index.
    #[must_use]
    pub fn with_index(index: VariableIndex) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    /// Returns the variable index.
    #[must_use]
    pub const fn index(&self) -> &VariableIndex {
        &self.index
    }

    /// Returns the variable index for updates.
    pub const fn index_mut(&mut self) -> &mut VariableIndex {
        &mut self.index
    }

    /// Returns the system value registry.
    #[must_use]
    pub const fn system_values(&self) -> &SystemValueRegistry {
        &self.system_values
    }

    /// Returns the system value registry for updates.
    pub const fn system_values_mut(&mut self) -> &mut SystemValueRegistry {
        &mut self.system_values
    }

    /// Returns the field accessor cache.
    #[must_use]
    pub const fn field_accessors(&self) -> &FieldAccessorCache {
        &self.field_accessors
    }
}
