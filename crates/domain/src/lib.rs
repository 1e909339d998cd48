//! Dashvar Domain - Core template variable types
//!
//! This crate defines the domain model for the dashvar interpolation engine.
//! All types here are pure Rust with no I/O dependencies.

pub mod adhoc;
pub mod error;
pub mod settings;
pub mod time_range;
pub mod variable;

pub use adhoc::{AdHocFilter, DataSourceRef, DataSourceSettings};
pub use error::{DomainError, DomainResult};
pub use settings::InterpolationSettings;
pub use time_range::TimeRange;
pub use variable::{
    ALL_VARIABLE_TEXT, ALL_VARIABLE_VALUE, CurrentOption, Variable, VariableKind, VariableOption,
    VariableType, is_all_value,
};
