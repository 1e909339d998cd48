//! URL value port

use dashvar_domain::Variable;
use serde_json::Value;

/// Produces the value a variable contributes to a URL query string.
///
/// Used for the `queryparam` format and for every ad-hoc variable reference.
pub trait UrlValueAdapter: Send + Sync {
    /// Returns the URL representation of `variable`'s current state.
    fn value_for_url(&self, variable: &Variable) -> Value;
}
