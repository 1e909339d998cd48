//! In-memory variable store

use dashvar_application::ports::VariableStore;
use dashvar_domain::{DomainError, Variable};
use parking_lot::RwLock;

/// Errors that can occur when populating the store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The variable cannot be referenced from a placeholder.
    #[error("invalid variable: {0}")]
    InvalidVariable(#[from] DomainError),
}

/// Variable store backed by a lock-protected list.
///
/// Keeps declaration order; inserting a name that exists replaces it in place.
#[derive(Debug, Default)]
pub struct InMemoryVariableStore {
    variables: RwLock<Vec<Variable>>,
}

impl InMemoryVariableStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `variables`.
    ///
    /// # Errors
    /// Returns `StoreError::InvalidVariable` for the first variable whose name
    /// is not a valid placeholder name.
    pub fn from_variables(variables: Vec<Variable>) -> Result<Self, StoreError> {
        let store = Self::new();
        for variable in variables {
            store.insert(variable)?;
        }
        Ok(store)
    }

    /// Inserts or replaces a variable.
    ///
    /// # Errors
    /// Returns `StoreError::InvalidVariable` if the name is not a valid
    /// placeholder name.
    pub fn insert(&self, variable: Variable) -> Result<(), StoreError> {
        variable.validate()?;

        let mut variables = self.variables.write();
        match variables
            .iter_mut()
            .find(|existing| existing.name == variable.name)
        {
            Some(existing) => *existing = variable,
            None => variables.push(variable),
        }
        Ok(())
    }

    /// Removes the variable called `name`.
    pub fn remove(&self, name: &str) -> Option<Variable> {
        let mut variables = self.variables.write();
        let position = variables.iter().position(|variable| variable.name == name)?;
        Some(variables.remove(position))
    }

    /// Returns the number of stored variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.read().len()
    }

    /// Returns true if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.read().is_empty()
    }
}

impl VariableStore for InMemoryVariableStore {
    fn list_all(&self) -> Vec<Variable> {
        self.variables.read().clone()
    }

    fn list_filtered(&self, predicate: &dyn Fn(&Variable) -> bool) -> Vec<Variable> {
        self.variables
            .read()
            .iter()
            .filter(|variable| predicate(variable))
            .cloned()
            .collect()
    }

    fn get_by_name(&self, name: &str) -> Option<Variable> {
        self.variables
            .read()
            .iter()
            .find(|variable| variable.name == name)
            .cloned()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use dashvar_domain::VariableType;
    use pretty_assertions::assert_eq;

    fn names(store: &InMemoryVariableStore) -> Vec<String> {
        store.list_all().into_iter().map(|variable| variable.name).collect()
    }

    #[test]
    fn test_insert_keeps_order_and_replaces() {
        let store = InMemoryVariableStore::new();
        store.insert(Variable::new("b", VariableType::Custom)).unwrap();
        store.insert(Variable::new("a", VariableType::Custom)).unwrap();
        store
            .insert(Variable::new("b", VariableType::Constant).with_current("x", "x"))
            .unwrap();

        assert_eq!(names(&store), vec!["b", "a"]);
        assert_eq!(
            store.get_by_name("b").unwrap().variable_type,
            VariableType::Constant
        );
    }

    #[test]
    fn test_rejects_invalid_name() {
        let store = InMemoryVariableStore::new();
        let err = store
            .insert(Variable::new("bad name", VariableType::Custom))
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidVariable(DomainError::InvalidVariableName(name)) if name == "bad name"
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_from_variables_and_remove() {
        let store = InMemoryVariableStore::from_variables(vec![
            Variable::new("a", VariableType::Custom),
            Variable::ad_hoc("filters", None, vec![]),
        ])
        .unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.list_filtered(&Variable::is_ad_hoc).len(), 1);

        assert!(store.remove("a").is_some());
        assert!(store.remove("a").is_none());
        assert_eq!(names(&store), vec!["filters"]);
    }
}
