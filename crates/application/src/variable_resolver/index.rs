//! Variable index
//!
//! Name lookup over the variables a resolver can reference, plus the
//! `__from` / `__to` entries derived from the dashboard time range.

use std::collections::HashMap;

use dashvar_domain::{TimeRange, Variable, VariableType};

/// Name of the synthetic variable holding the range start in epoch millis.
pub const FROM_VARIABLE: &str = "__from";

/// Name of the synthetic variable holding the range end in epoch millis.
pub const TO_VARIABLE: &str = "__to";

/// Indexed variables keyed by name.
///
/// Keeps the full variable list so the index can be recomputed when the
/// time range changes.
#[derive(Debug, Clone, Default)]
pub struct VariableIndex {
    variables: Vec<Variable>,
    time_range: Option<TimeRange>,
    entries: HashMap<String, Variable>,
}

impl VariableIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the variable list and time range, then recomputes the index.
    pub fn rebuild(&mut self, variables: Vec<Variable>, time_range: Option<TimeRange>) {
        self.variables = variables;
        self.time_range = time_range;
        self.reindex();
    }

    /// Replaces the time range and recomputes the index.
    pub fn set_time_range(&mut self, time_range: TimeRange) {
        self.time_range = Some(time_range);
        self.reindex();
    }

    /// Upserts a single variable without recomputing the rest.
    ///
    /// The variable is always retained; it is indexed only while it has a
    /// current value, as in a full rebuild.
    pub fn insert(&mut self, variable: Variable) {
        match self
            .variables
            .iter_mut()
            .find(|existing| existing.name == variable.name)
        {
            Some(existing) => *existing = variable.clone(),
            None => self.variables.push(variable.clone()),
        }

        if !variable.is_indexable() {
            tracing::debug!(variable = %variable.name, "variable has no current value, not indexed");
            self.entries.remove(&variable.name);
            return;
        }

        tracing::debug!(variable = %variable.name, "variable indexed");
        self.entries.insert(variable.name.clone(), variable);
    }

    /// Returns the indexed variable called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.entries.get(name)
    }

    /// Returns true if `name` is indexed.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns the number of indexed entries, synthetic ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the retained variable list, in declaration order.
    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Returns the current time range.
    #[must_use]
    pub const fn time_range(&self) -> Option<&TimeRange> {
        self.time_range.as_ref()
    }

    fn reindex(&mut self) {
        self.entries = self
            .variables
            .iter()
            .filter(|variable| variable.is_indexable())
            .map(|variable| (variable.name.clone(), variable.clone()))
            .collect();

        if let Some(range) = &self.time_range {
            for (name, millis) in [
                (FROM_VARIABLE, range.from_millis_string()),
                (TO_VARIABLE, range.to_millis_string()),
            ] {
                let variable =
                    Variable::new(name, VariableType::System).with_current(millis.clone(), millis);
                self.entries.insert(name.to_string(), variable);
            }
        }

        tracing::debug!(
            variables = self.variables.len(),
            indexed = self.entries.len(),
            has_time_range = self.time_range.is_some(),
            "variable index rebuilt"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use dashvar_domain::CurrentOption;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn range() -> TimeRange {
        TimeRange::from_millis(1_000, 2_000).unwrap()
    }

    #[test]
    fn test_rebuild_filters_unresolved() {
        let mut index = VariableIndex::new();
        index.rebuild(
            vec![
                Variable::new("env", VariableType::Custom).with_current("prod", "prod"),
                Variable::new("empty", VariableType::TextBox).with_current("", ""),
                Variable::new("pending", VariableType::Query),
                Variable::new("nothing", VariableType::Query)
                    .with_current_option(CurrentOption::none()),
            ],
            None,
        );

        assert!(index.contains("env"));
        assert!(index.contains("empty"));
        assert!(!index.contains("pending"));
        assert!(index.contains("nothing"));
        assert_eq!(index.len(), 3);
        assert_eq!(index.variables().len(), 4);
    }

    #[test]
    fn test_time_range_entries() {
        let mut index = VariableIndex::new();
        index.rebuild(vec![], Some(range()));

        let from = index.get(FROM_VARIABLE).unwrap();
        assert_eq!(from.current_value(), Some(&json!("1000")));
        assert_eq!(
            index.get(TO_VARIABLE).unwrap().current_text(),
            Some(&json!("2000"))
        );
    }

    #[test]
    fn test_time_range_overrides_declared_variable() {
        let mut index = VariableIndex::new();
        index.rebuild(
            vec![Variable::new("__from", VariableType::Constant).with_current("x", "x")],
            Some(range()),
        );
        assert_eq!(
            index.get(FROM_VARIABLE).unwrap().current_value(),
            Some(&json!("1000"))
        );
    }

    #[test]
    fn test_set_time_range_reindexes() {
        let mut index = VariableIndex::new();
        index.rebuild(
            vec![Variable::new("env", VariableType::Custom).with_current("a", "a")],
            None,
        );
        assert!(!index.contains(FROM_VARIABLE));

        index.set_time_range(range());
        assert!(index.contains(FROM_VARIABLE));
        assert!(index.contains("env"));
        assert_eq!(index.time_range(), Some(&range()));
    }

    #[test]
    fn test_insert_is_retained_across_reindex() {
        let mut index = VariableIndex::new();
        index.rebuild(vec![], None);
        index.insert(Variable::new("late", VariableType::Custom).with_current("v", "v"));
        assert!(index.contains("late"));

        index.set_time_range(range());
        assert!(index.contains("late"));
    }

    #[test]
    fn test_insert_replaces_existing() {
        let mut index = VariableIndex::new();
        index.rebuild(
            vec![Variable::new("env", VariableType::Custom).with_current("a", "a")],
            None,
        );
        index.insert(Variable::new("env", VariableType::Custom).with_current("b", "b"));

        assert_eq!(index.get("env").unwrap().current_value(), Some(&json!("b")));
        assert_eq!(index.variables().len(), 1);
    }

    #[test]
    fn test_insert_skips_unresolved_variable() {
        let mut index = VariableIndex::new();
        index.rebuild(
            vec![Variable::new("pending", VariableType::Query).with_current("a", "a")],
            None,
        );

        index.insert(Variable::new("pending", VariableType::Query));
        assert!(!index.contains("pending"));
        assert_eq!(index.variables().len(), 1);

        index.set_time_range(range());
        assert!(!index.contains("pending"));

        index.insert(Variable::new("pending", VariableType::Query).with_current("b", "b"));
        assert_eq!(index.get("pending").unwrap().current_value(), Some(&json!("b")));
    }
}
