//! Fixed data source registry

use dashvar_application::ports::DataSourceRegistry;
use dashvar_domain::DataSourceSettings;

/// Data sources known up front, looked up by name or uid.
#[derive(Debug, Clone, Default)]
pub struct StaticDataSourceRegistry {
    sources: Vec<DataSourceSettings>,
}

impl StaticDataSourceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a data source.
    #[must_use]
    pub fn with(mut self, settings: DataSourceSettings) -> Self {
        self.register(settings);
        self
    }

    /// Adds a data source, replacing one with the same uid.
    pub fn register(&mut self, settings: DataSourceSettings) {
        self.sources.retain(|existing| existing.uid != settings.uid);
        self.sources.push(settings);
    }
}

impl DataSourceRegistry for StaticDataSourceRegistry {
    fn instance_settings(&self, name: &str) -> Option<DataSourceSettings> {
        self.sources
            .iter()
            .find(|settings| settings.name == name)
            .or_else(|| self.sources.iter().find(|settings| settings.uid == name))
            .cloned()
    }
}
