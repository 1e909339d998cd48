//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the interpolation core and the host
//! that owns variables, data sources and scene objects. Each port is a trait
//! implemented by adapters in the infrastructure layer.

mod data_source_registry;
mod scene_interpolator;
mod url_value_adapter;
mod variable_store;

pub use data_source_registry::DataSourceRegistry;
pub use scene_interpolator::SceneInterpolator;
pub use url_value_adapter::UrlValueAdapter;
pub use variable_store::VariableStore;
