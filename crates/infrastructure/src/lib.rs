//! Dashvar Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports defined in the
//! application layer, plus settings loading, tracing setup and variable file
//! serialization.

pub mod adapters;
pub mod serialization;
pub mod settings;
pub mod telemetry;

pub use adapters::{InMemoryVariableStore, StaticDataSourceRegistry, StoreError};
pub use serialization::{
    SerializationError, VariableFile, from_json, from_json_bytes, load_variable_file,
    save_variable_file, to_json_stable,
};
pub use settings::{SettingsError, load_settings, load_settings_with_env};
pub use telemetry::init_tracing;
