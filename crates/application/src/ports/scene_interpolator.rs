//! Scene interpolation port

use crate::format::FormatSpec;
use crate::variable_resolver::ScopedVars;

/// A scene object that takes over interpolation of a whole target.
///
/// When scoped variables carry a scene, the resolver hands the target to it
/// and returns its result unchanged.
pub trait SceneInterpolator: Send + Sync {
    /// Interpolates `target` within the scene.
    fn interpolate(
        &self,
        target: &str,
        scoped_vars: &ScopedVars,
        format: Option<&FormatSpec>,
    ) -> String;
}
