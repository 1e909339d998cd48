//! Variable interpolation module
//!
//! Parses `$var`, `[[var:format]]` and `${var.path:format}` placeholders and
//! replaces them with formatted variable values.
//!
//! # Usage
//!
//! ```
//! use dashvar_application::variable_resolver::VariableResolver;
//! use dashvar_domain::{Variable, VariableType};
//! use serde_json::json;
//!
//! let mut resolver = VariableResolver::empty();
//! resolver.rebuild(
//!     vec![
//!         Variable::new("env", VariableType::Custom).with_current("prod", "Production"),
//!         Variable::new("host", VariableType::Query)
//!             .with_multi(true)
//!             .with_current(json!(["a", "b"]), json!(["A", "B"])),
//!     ],
//!     None,
//! );
//!
//! assert_eq!(
//!     resolver.interpolate("up{env=\"$env\", host=~\"${host:regex}\"}", None, None),
//!     "up{env=\"prod\", host=~\"(a|b)\"}"
//! );
//! ```

pub mod context;
pub mod engine;
pub mod field_path;
pub mod index;
pub mod parser;
pub mod scope;
pub mod system_values;
pub mod url_values;

pub use context::InterpolationContext;
pub use engine::{InterpolationRecord, InterpolationResult, VariableResolver};
pub use field_path::{FieldAccessorCache, FieldPath, PathSegment};
pub use index::{FROM_VARIABLE, TO_VARIABLE, VariableIndex};
pub use parser::{
    Placeholder, PlaceholderSyntax, Placeholders, extract_variable_names, first_placeholder,
    has_placeholders, is_valid_variable_name, parse_placeholders,
};
pub use scope::{ScopedVar, ScopedVars};
pub use system_values::SystemValueRegistry;
pub use url_values::{DefaultUrlValues, URL_DELIMITER_ESCAPE, filter_to_url};
