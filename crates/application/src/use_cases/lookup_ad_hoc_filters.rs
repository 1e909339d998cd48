//! Lookup ad-hoc filters use case.

use dashvar_domain::{AdHocFilter, Variable};

use crate::ports::{DataSourceRegistry, VariableStore};
use crate::variable_resolver::VariableResolver;

/// Use case for collecting the ad-hoc filters that apply to a data source.
pub struct LookupAdHocFilters<S: VariableStore, D: DataSourceRegistry> {
    store: S,
    data_sources: D,
}

impl<S: VariableStore, D: DataSourceRegistry> LookupAdHocFilters<S, D> {
    /// Creates a new `LookupAdHocFilters` use case.
    #[must_use]
    pub const fn new(store: S, data_sources: D) -> Self {
        Self {
            store,
            data_sources,
        }
    }

    /// Returns the filters of every ad-hoc variable bound to the named data source.
    ///
    /// A variable is bound when its data source uid equals the data source's
    /// uid, or when its uid is a template that interpolates to the requested
    /// name. Unknown data sources have no filters.
    #[must_use]
    pub fn execute(&self, resolver: &VariableResolver, data_source_name: &str) -> Vec<AdHocFilter> {
        let Some(settings) = self.data_sources.instance_settings(data_source_name) else {
            return Vec::new();
        };

        let mut filters = Vec::new();
        for variable in self.store.list_filtered(&Variable::is_ad_hoc) {
            let Some(uid) = variable.data_source().and_then(|ds| ds.uid.as_deref()) else {
                continue;
            };

            let bound = uid == settings.uid
                || (uid.starts_with('$')
                    && resolver.interpolate(uid, None, None) == data_source_name);
            if bound {
                filters.extend_from_slice(variable.ad_hoc_filters());
            }
        }

        tracing::debug!(
            data_source = data_source_name,
            filters = filters.len(),
            "ad-hoc filters looked up"
        );
        filters
    }
}
