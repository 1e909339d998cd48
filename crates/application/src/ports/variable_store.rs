//! Variable store port
//!
//! Source of the variable set the index is rebuilt from.

use std::sync::Arc;

use dashvar_domain::Variable;

/// Read access to the variables of a dashboard.
pub trait VariableStore: Send + Sync {
    /// Returns every variable, in declaration order.
    fn list_all(&self) -> Vec<Variable>;

    /// Returns the variables accepted by `predicate`, in declaration order.
    fn list_filtered(&self, predicate: &dyn Fn(&Variable) -> bool) -> Vec<Variable> {
        self.list_all()
            .into_iter()
            .filter(|variable| predicate(variable))
            .collect()
    }

    /// Looks a variable up by name.
    fn get_by_name(&self, name: &str) -> Option<Variable> {
        self.list_all()
            .into_iter()
            .find(|variable| variable.name == name)
    }
}

impl<T: VariableStore + ?Sized> VariableStore for &T {
    fn list_all(&self) -> Vec<Variable> {
        (**self).list_all()
    }

    fn list_filtered(&self, predicate: &dyn Fn(&Variable) -> bool) -> Vec<Variable> {
        (**self).list_filtered(predicate)
    }

    fn get_by_name(&self, name: &str) -> Option<Variable> {
        (**self).get_by_name(name)
    }
}

impl<T: VariableStore + ?Sized> VariableStore for Arc<T> {
    fn list_all(&self) -> Vec<Variable> {
        (**self).list_all()
    }

    fn list_filtered(&self, predicate: &dyn Fn(&Variable) -> bool) -> Vec<Variable> {
        (**self).list_filtered(predicate)
    }

    fn get_by_name(&self, name: &str) -> Option<Variable> {
        (**self).get_by_name(name)
    }
}
