//! Sync variables use case.

use dashvar_domain::TimeRange;

use crate::ports::VariableStore;
use crate::variable_resolver::VariableResolver;

/// Output from syncing a resolver with its variable store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncVariablesOutput {
    /// Variables read from the store.
    pub total: usize,
    /// Entries in the rebuilt index, `__from` / `__to` included.
    pub indexed: usize,
}

/// Use case for rebuilding a resolver's index from a variable store.
pub struct SyncVariables<S: VariableStore> {
    store: S,
}

impl<S: VariableStore> SyncVariables<S> {
    /// Creates a new `SyncVariables` use case.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Replaces the resolver's variables with the store's, and its time
    /// range with `time_range`.
    pub fn execute(
        &self,
        resolver: &mut VariableResolver,
        time_range: Option<TimeRange>,
    ) -> SyncVariablesOutput {
        let variables = self.store.list_all();
        let total = variables.len();
        resolver.rebuild(variables, time_range);

        SyncVariablesOutput {
            total,
            indexed: resolver.context().index().len(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use dashvar_domain::{Variable, VariableType};
    use pretty_assertions::assert_eq;

    struct MockStore {
        variables: Vec<Variable>,
    }

    impl VariableStore for MockStore {
        fn list_all(&self) -> Vec<Variable> {
            self.variables.clone()
        }
    }

    fn store() -> MockStore {
        MockStore {
            variables: vec![
                Variable::new("env", VariableType::Custom).with_current("prod", "prod"),
                Variable::new("pending", VariableType::Query),
            ],
        }
    }

    #[test]
    fn test_sync_rebuilds_index() {
        let mut resolver = VariableResolver::empty();
        let output = SyncVariables::new(store()).execute(&mut resolver, None);

        assert_eq!(output, SyncVariablesOutput { total: 2, indexed: 1 });
        assert_eq!(resolver.interpolate("$env $pending", None, None), "prod $pending");
    }

    #[test]
    fn test_sync_with_time_range() {
        let mut resolver = VariableResolver::empty();
        let range = TimeRange::from_millis(10, 20).unwrap();
        let output = SyncVariables::new(&store()).execute(&mut resolver, Some(range));

        assert_eq!(output.indexed, 3);
        assert_eq!(resolver.interpolate("$__from..$__to", None, None), "10..20");
    }

    #[test]
    fn test_sync_replaces_previous_variables() {
        let mut resolver = VariableResolver::empty();
        resolver.notify_variable_initialized(
            Variable::new("stale", VariableType::Custom).with_current("x", "x"),
        );

        SyncVariables::new(store()).execute(&mut resolver, None);
        assert!(!resolver.contains_template("$stale"));
    }
}
