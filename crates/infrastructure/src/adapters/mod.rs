//! Port adapters.

mod memory_variable_store;
mod static_data_sources;

pub use memory_variable_store::{InMemoryVariableStore, StoreError};
pub use static_data_sources::StaticDataSourceRegistry;
