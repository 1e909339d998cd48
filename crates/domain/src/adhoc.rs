//! Ad-hoc filters and data source references

use serde::{Deserialize, Serialize};

/// A single filter predicate of an ad-hoc variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdHocFilter {
    /// Field or label the filter applies to.
    pub key: String,

    /// Comparison operator, e.g. `=`, `!=`, `=~`.
    pub operator: String,

    /// Value to compare against.
    pub value: String,

    /// Optional logical condition joining this filter to the previous one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl AdHocFilter {
    /// Creates a filter predicate.
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            operator: operator.into(),
            value: value.into(),
            condition: None,
        }
    }
}

/// Reference from a variable to a data source.
///
/// The uid may itself be a variable reference such as `$ds`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DataSourceRef {
    /// Data source uid, or a placeholder resolving to a data source name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    /// Data source plugin type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ds_type: Option<String>,
}

impl DataSourceRef {
    /// Creates a reference by uid.
    #[must_use]
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: Some(uid.into()),
            ds_type: None,
        }
    }

    /// Returns true if the uid is a variable reference.
    #[must_use]
    pub fn is_templated(&self) -> bool {
        self.uid.as_deref().is_some_and(|uid| uid.starts_with('$'))
    }
}

/// Instance settings of a configured data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceSettings {
    /// Unique identifier.
    pub uid: String,

    /// Display name.
    pub name: String,

    /// Plugin type.
    #[serde(rename = "type")]
    pub ds_type: String,
}

impl DataSourceSettings {
    /// Creates data source settings.
    #[must_use]
    pub fn new(uid: impl Into<String>, name: impl Into<String>, ds_type: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            name: name.into(),
            ds_type: ds_type.into(),
        }
    }
}
