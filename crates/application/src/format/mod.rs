//! Value formatting
//!
//! A format turns a variable's resolved value into the text substituted for a
//! placeholder. Formats are looked up by identifier in a [`FormatRegistry`];
//! callers may also pass a [`FormatSpec::Custom`] closure.

mod accessor;
pub mod builtins;
mod pipeline;
mod registry;
mod spec;

pub use accessor::VariableAccessor;
pub use pipeline::ValueFormatter;
pub use registry::{FormatItem, FormatRegistry, FormatterFn};
pub use spec::{CustomFormatFn, FormatSpec, VariableFormatId, split_format};
