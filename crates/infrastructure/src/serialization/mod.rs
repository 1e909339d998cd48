//! JSON serialization for variable sets.
//!
//! Variable files are written with 2-space indentation and a trailing
//! newline so they diff cleanly.

mod json;
mod variable_file;

pub use json::{SerializationError, from_json, from_json_bytes, to_json_stable};
pub use variable_file::{VariableFile, load_variable_file, save_variable_file};
