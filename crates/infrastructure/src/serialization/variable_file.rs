//! Variable set files
//!
//! A variable file holds a dashboard's variables and, optionally, its time
//! range:
//!
//! ```json
//! {
//!   "variables": [
//!     { "name": "env", "type": "custom", "kind": "scalar",
//!       "current": { "value": "prod", "text": "prod" } }
//!   ],
//!   "timeRange": { "from": "2024-01-01T00:00:00Z", "to": "2024-01-01T06:00:00Z" }
//! }
//! ```

use std::fs;
use std::path::Path;

use dashvar_domain::{TimeRange, Variable};
use serde::{Deserialize, Serialize};

use super::json::{SerializationError, from_json_bytes, to_json_stable};

/// Contents of a variable file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableFile {
    /// Variables in declaration order.
    #[serde(default)]
    pub variables: Vec<Variable>,

    /// Dashboard time range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeRange>,
}

impl VariableFile {
    /// Checks variable names and the time range order.
    ///
    /// # Errors
    /// Returns `SerializationError::Invalid` on the first invalid entry.
    pub fn validate(&self) -> Result<(), SerializationError> {
        for variable in &self.variables {
            variable.validate()?;
        }
        if let Some(range) = &self.time_range {
            TimeRange::new(range.from(), range.to())?;
        }
        Ok(())
    }
}

/// Reads and validates a variable file.
///
/// # Errors
/// Returns an error if the file cannot be read, is not valid JSON, or holds
/// invalid variables.
pub fn load_variable_file(path: &Path) -> Result<VariableFile, SerializationError> {
    let bytes = fs::read(path)?;
    let file: VariableFile = from_json_bytes(&bytes)?;
    file.validate()?;

    tracing::debug!(
        path = %path.display(),
        variables = file.variables.len(),
        "variable file loaded"
    );
    Ok(file)
}

/// Writes a variable file.
///
/// # Errors
/// Returns an error if serialization or the write fails.
pub fn save_variable_file(path: &Path, file: &VariableFile) -> Result<(), SerializationError> {
    fs::write(path, to_json_stable(file)?)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use dashvar_domain::{AdHocFilter, DataSourceRef, DomainError, VariableType};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("variables.json");
        let file = VariableFile {
            variables: vec![
                Variable::new("env", VariableType::Custom).with_current("prod", "prod"),
                Variable::ad_hoc(
                    "filters",
                    Some(DataSourceRef::new("p1")),
                    vec![AdHocFilter::new("job", "=", "api")],
                ),
            ],
            time_range: Some(TimeRange::from_millis(0, 1_000).unwrap()),
        };

        save_variable_file(&path, &file).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.ends_with('\n'));
        assert!(content.contains("\"timeRange\""));

        assert_eq!(load_variable_file(&path).unwrap(), file);
    }

    #[test]
    fn test_load_rejects_invalid_names() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("variables.json");
        fs::write(
            &path,
            r#"{"variables": [{"name": "bad-name", "type": "custom", "kind": "scalar"}]}"#,
        )
        .unwrap();

        let result = load_variable_file(&path);
        assert!(matches!(
            result,
            Err(SerializationError::Invalid(DomainError::InvalidVariableName(_)))
        ));
    }

    #[test]
    fn test_load_rejects_reversed_time_range() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("variables.json");
        fs::write(
            &path,
            r#"{"timeRange": {"from": "2024-01-02T00:00:00Z", "to": "2024-01-01T00:00:00Z"}}"#,
        )
        .unwrap();

        let result = load_variable_file(&path);
        assert!(matches!(
            result,
            Err(SerializationError::Invalid(DomainError::InvalidTimeRange(_)))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_variable_file(&temp_dir.path().join("absent.json"));
        assert!(matches!(result, Err(SerializationError::Io(_))));
    }
}
