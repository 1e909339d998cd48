//! Interpolation settings
//!
//! Tunables of the interpolation engine, loadable from configuration files.

use serde::{Deserialize, Serialize};

/// Default format used when a placeholder names none.
pub const DEFAULT_FORMAT: &str = "glob";

/// Default limit on nested custom all-value expansion.
pub const DEFAULT_MAX_ALL_VALUE_DEPTH: usize = 4;

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpolationSettings {
    /// Format applied when neither the placeholder nor the caller names one,
    /// and used as fallback for unknown format names.
    pub default_format: String,

    /// How many custom all-value strings may be expanded inside each other.
    pub max_all_value_depth: usize,
}

impl Default for InterpolationSettings {
    fn default() -> Self {
        Self {
            default_format: DEFAULT_FORMAT.to_string(),
            max_all_value_depth: DEFAULT_MAX_ALL_VALUE_DEPTH,
        }
    }
}
