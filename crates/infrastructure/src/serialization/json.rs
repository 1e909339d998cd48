//! JSON helpers.

use std::io;

use dashvar_domain::DomainError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Deserialize(serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The document parsed but holds invalid data.
    #[error("invalid content: {0}")]
    Invalid(#[from] DomainError),
}

/// Serializes a value to pretty JSON with 2-space indentation and a trailing newline.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n');
    Ok(json)
}

/// Deserializes JSON from a string.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, SerializationError> {
    serde_json::from_str(json).map_err(SerializationError::Deserialize)
}

/// Deserializes JSON from bytes.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    serde_json::from_slice(bytes).map_err(SerializationError::Deserialize)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use dashvar_domain::{Variable, VariableType};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_stable_output_layout() {
        let json = to_json_stable(&json!({"key": "value"})).unwrap();
        assert!(json.ends_with('\n'));
        assert!(json.contains("  \"key\""));
    }

    #[test]
    fn test_variable_roundtrip() {
        let variable = Variable::new("env", VariableType::Custom)
            .with_current("prod", "Production")
            .with_all_value(".*");

        let json = to_json_stable(&variable).unwrap();
        let restored: Variable = from_json(&json).unwrap();
        assert_eq!(restored, variable);
    }

    #[test]
    fn test_from_json_bytes() {
        let variable: Variable =
            from_json_bytes(br#"{"name": "host", "type": "query", "kind": "scalar"}"#).unwrap();
        assert_eq!(variable.name, "host");
        assert_eq!(variable.variable_type, VariableType::Query);
        assert!(variable.current.is_none());
    }

    #[test]
    fn test_invalid_json() {
        let result: Result<Variable, _> = from_json(r#"{"name": }"#);
        assert!(matches!(result, Err(SerializationError::Deserialize(_))));
    }
}
