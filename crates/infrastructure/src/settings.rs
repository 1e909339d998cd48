//! Settings loading
//!
//! Layers an optional settings file under `DASHVAR_`-prefixed environment
//! variables and deserializes the result into [`InterpolationSettings`].

use std::path::Path;

use config::{Config, ConfigError, Environment, File, Map};
use dashvar_domain::InterpolationSettings;

/// Prefix of the environment variables read by [`load_settings`].
pub const ENV_PREFIX: &str = "DASHVAR";

/// Errors that can occur while loading settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// A source could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The merged settings are unusable.
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Loads settings from `path` (if given and present) and the process environment.
///
/// The file format is picked from the extension. Environment variables such as
/// `DASHVAR_MAX_ALL_VALUE_DEPTH` override file values.
///
/// # Errors
/// Returns `SettingsError::Config` if a source is malformed and
/// `SettingsError::Invalid` if the default format is empty.
pub fn load_settings(path: Option<&Path>) -> Result<InterpolationSettings, SettingsError> {
    load(path, None)
}

/// Like [`load_settings`], reading environment variables from `vars`
/// instead of the process environment.
///
/// # Errors
/// Same as [`load_settings`].
pub fn load_settings_with_env(
    path: Option<&Path>,
    vars: Map<String, String>,
) -> Result<InterpolationSettings, SettingsError> {
    load(path, Some(vars))
}

fn load(
    path: Option<&Path>,
    vars: Option<Map<String, String>>,
) -> Result<InterpolationSettings, SettingsError> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(false));
    }
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .source(vars),
    );

    let settings: InterpolationSettings = builder.build()?.try_deserialize()?;
    if settings.default_format.trim().is_empty() {
        return Err(SettingsError::Invalid(
            "default_format must not be empty".to_string(),
        ));
    }

    tracing::debug!(
        default_format = %settings.default_format,
        max_all_value_depth = settings.max_all_value_depth,
        "interpolation settings loaded"
    );
    Ok(settings)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> Map<String, String> {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_without_sources() {
        let settings = load_settings_with_env(None, Map::new()).unwrap();
        assert_eq!(settings, InterpolationSettings::default());
    }

    #[test]
    fn test_missing_file_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.toml");
        let settings = load_settings_with_env(Some(&path), Map::new()).unwrap();
        assert_eq!(settings, InterpolationSettings::default());
    }

    #[test]
    fn test_toml_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dashvar.toml");
        fs::write(&path, "default_format = \"csv\"\nmax_all_value_depth = 2\n").unwrap();

        let settings = load_settings_with_env(Some(&path), Map::new()).unwrap();
        assert_eq!(settings.default_format, "csv");
        assert_eq!(settings.max_all_value_depth, 2);
    }

    #[test]
    fn test_json_file_partial() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dashvar.json");
        fs::write(&path, r#"{"max_all_value_depth": 8}"#).unwrap();

        let settings = load_settings_with_env(Some(&path), Map::new()).unwrap();
        assert_eq!(settings.default_format, "glob");
        assert_eq!(settings.max_all_value_depth, 8);
    }

    #[test]
    fn test_environment_overrides_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dashvar.toml");
        fs::write(&path, "default_format = \"csv\"\nmax_all_value_depth = 2\n").unwrap();

        let settings = load_settings_with_env(
            Some(&path),
            env(&[
                ("DASHVAR_MAX_ALL_VALUE_DEPTH", "6"),
                ("OTHER_DEFAULT_FORMAT", "pipe"),
            ]),
        )
        .unwrap();
        assert_eq!(settings.default_format, "csv");
        assert_eq!(settings.max_all_value_depth, 6);
    }

    #[test]
    fn test_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dashvar.toml");
        fs::write(&path, "default_format = ").unwrap();

        let result = load_settings_with_env(Some(&path), Map::new());
        assert!(matches!(result, Err(SettingsError::Config(_))));
    }

    #[test]
    fn test_empty_default_format_is_invalid() {
        let result =
            load_settings_with_env(None, env(&[("DASHVAR_DEFAULT_FORMAT", " ")]));
        assert!(matches!(result, Err(SettingsError::Invalid(_))));
    }
}
