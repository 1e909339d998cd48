//! Dashvar Application - interpolation engine, formats, ports and use cases
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for variable stores, data sources and scenes)
//! - The placeholder matcher and interpolation engine
//! - The value format registry and built-in formats
//! - Use case orchestration

pub mod error;
pub mod format;
pub mod ports;
pub mod use_cases;
pub mod variable_resolver;

pub use error::{ApplicationError, ApplicationResult};
pub use format::{FormatItem, FormatRegistry, FormatSpec, ValueFormatter, VariableFormatId};
pub use ports::{DataSourceRegistry, SceneInterpolator, UrlValueAdapter, VariableStore};
pub use use_cases::{LookupAdHocFilters, SyncVariables, SyncVariablesOutput};
pub use variable_resolver::{
    InterpolationContext, InterpolationResult, ScopedVar, ScopedVars, VariableResolver,
};
