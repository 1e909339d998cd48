//! Data source registry port

use std::sync::Arc;

use dashvar_domain::DataSourceSettings;

/// Resolves data source names to their instance settings.
pub trait DataSourceRegistry: Send + Sync {
    /// Returns the settings of the named data source, or `None` when unknown.
    fn instance_settings(&self, name: &str) -> Option<DataSourceSettings>;
}

impl<T: DataSourceRegistry + ?Sized> DataSourceRegistry for &T {
    fn instance_settings(&self, name: &str) -> Option<DataSourceSettings> {
        (**self).instance_settings(name)
    }
}

impl<T: DataSourceRegistry + ?Sized> DataSourceRegistry for Arc<T> {
    fn instance_settings(&self, name: &str) -> Option<DataSourceSettings> {
        (**self).instance_settings(name)
    }
}
