//! Template variables and their selections

mod current;
mod model;

pub use current::{
    ALL_VARIABLE_TEXT, ALL_VARIABLE_VALUE, CurrentOption, NONE_VARIABLE_TEXT, VariableOption,
    is_all_value,
};
pub use model::{Variable, VariableKind, VariableType};

/// Returns true for the bytes a variable name may contain (`[A-Za-z0-9_]`).
#[must_use]
pub const fn is_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Validates a variable name: one or more ASCII letters, digits or underscores.
#[must_use]
pub fn is_valid_variable_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(is_name_byte)
}
