//! Template variable model

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::current::{CurrentOption, VariableOption};
use super::is_valid_variable_name;
use crate::adhoc::{AdHocFilter, DataSourceRef};
use crate::error::{DomainError, DomainResult};

/// Type tag of a variable as exposed to formatters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    /// Values come from a data source query.
    #[default]
    Query,
    /// Values are a fixed, author-defined list.
    Custom,
    /// A single hidden value.
    Constant,
    /// Free text input.
    TextBox,
    /// Time interval choices.
    Interval,
    /// Data source picker.
    DataSource,
    /// Ad-hoc filter predicates.
    AdHoc,
    /// Engine-provided variable such as `__from`.
    System,
}

impl VariableType {
    /// Returns the lowercase identifier of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Custom => "custom",
            Self::Constant => "constant",
            Self::TextBox => "textbox",
            Self::Interval => "interval",
            Self::DataSource => "datasource",
            Self::AdHoc => "adhoc",
            Self::System => "system",
        }
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific body of a variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum VariableKind {
    /// A plain variable with optional selectable options.
    Scalar {
        /// Options; index 0 is conventionally the "All" entry.
        #[serde(default)]
        options: Vec<VariableOption>,
    },

    /// A variable whose "All" selection renders a custom literal.
    CustomAll {
        /// Options; index 0 is conventionally the "All" entry.
        #[serde(default)]
        options: Vec<VariableOption>,

        /// Literal used instead of the option list when "All" is selected.
        #[serde(rename = "allValue")]
        all_value: String,
    },

    /// A list of filter predicates applied to a data source.
    AdHoc {
        /// Data source the filters apply to.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        datasource: Option<DataSourceRef>,

        /// Filter predicates.
        #[serde(default)]
        filters: Vec<AdHocFilter>,
    },
}

impl Default for VariableKind {
    fn default() -> Self {
        Self::Scalar {
            options: Vec::new(),
        }
    }
}

/// A named template variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    /// Unique name referenced by placeholders.
    pub name: String,

    /// Identifier; falls back to the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Type tag.
    #[serde(rename = "type", default)]
    pub variable_type: VariableType,

    /// Current selection. `None` until the variable has been resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<CurrentOption>,

    /// Whether several options may be selected.
    #[serde(default)]
    pub multi: bool,

    /// Whether an "All" option is offered.
    #[serde(default)]
    pub include_all: bool,

    /// Kind-specific body.
    #[serde(flatten)]
    pub kind: VariableKind,
}

impl Variable {
    /// Creates a variable without a current value.
    ///
    /// The body is scalar, or an empty ad-hoc body for `VariableType::AdHoc`.
    #[must_use]
    pub fn new(name: impl Into<String>, variable_type: VariableType) -> Self {
        let kind = match variable_type {
            VariableType::AdHoc => VariableKind::AdHoc {
                datasource: None,
                filters: Vec::new(),
            },
            _ => VariableKind::default(),
        };

        Self {
            name: name.into(),
            id: None,
            variable_type,
            current: None,
            multi: false,
            include_all: false,
            kind,
        }
    }

    /// Creates an ad-hoc filter variable.
    ///
    /// Ad-hoc variables carry an empty current value so they are indexable.
    #[must_use]
    pub fn ad_hoc(
        name: impl Into<String>,
        datasource: Option<DataSourceRef>,
        filters: Vec<AdHocFilter>,
    ) -> Self {
        Self {
            name: name.into(),
            id: None,
            variable_type: VariableType::AdHoc,
            current: Some(CurrentOption::new("", "")),
            multi: false,
            include_all: false,
            kind: VariableKind::AdHoc {
                datasource,
                filters,
            },
        }
    }

    /// Sets the identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the current value and text.
    #[must_use]
    pub fn with_current(mut self, value: impl Into<Value>, text: impl Into<Value>) -> Self {
        self.current = Some(CurrentOption::new(value, text));
        self
    }

    /// Sets the current selection.
    #[must_use]
    pub fn with_current_option(mut self, current: CurrentOption) -> Self {
        self.current = Some(current);
        self
    }

    /// Replaces the options. Ignored for ad-hoc variables.
    #[must_use]
    pub fn with_options(mut self, new_options: Vec<VariableOption>) -> Self {
        match &mut self.kind {
            VariableKind::Scalar { options } | VariableKind::CustomAll { options, .. } => {
                *options = new_options;
            }
            VariableKind::AdHoc { .. } => {}
        }
        self
    }

    /// Sets a custom all-value literal, turning the variable into a custom-all one.
    /// An empty literal clears it. Ignored for ad-hoc variables.
    #[must_use]
    pub fn with_all_value(mut self, all_value: impl Into<String>) -> Self {
        let all_value = all_value.into();
        self.kind = match self.kind {
            VariableKind::Scalar { options } | VariableKind::CustomAll { options, .. }
                if all_value.is_empty() =>
            {
                VariableKind::Scalar { options }
            }
            VariableKind::Scalar { options } | VariableKind::CustomAll { options, .. } => {
                VariableKind::CustomAll { options, all_value }
            }
            adhoc @ VariableKind::AdHoc { .. } => adhoc,
        };
        self
    }

    /// Sets the multi-value flag.
    #[must_use]
    pub const fn with_multi(mut self, multi: bool) -> Self {
        self.multi = multi;
        self
    }

    /// Sets the include-all flag.
    #[must_use]
    pub const fn with_include_all(mut self, include_all: bool) -> Self {
        self.include_all = include_all;
        self
    }

    /// Returns the identifier, or the name when no identifier is set.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }

    /// Returns true for ad-hoc filter variables, tagged by either the type or the body.
    #[must_use]
    pub const fn is_ad_hoc(&self) -> bool {
        matches!(self.variable_type, VariableType::AdHoc)
            || matches!(self.kind, VariableKind::AdHoc { .. })
    }

    /// Returns the selectable options. Empty for ad-hoc variables.
    #[must_use]
    pub fn options(&self) -> &[VariableOption] {
        match &self.kind {
            VariableKind::Scalar { options } | VariableKind::CustomAll { options, .. } => options,
            VariableKind::AdHoc { .. } => &[],
        }
    }

    /// Returns the custom all-value literal, if any. An empty literal counts as unset.
    #[must_use]
    pub fn custom_all_value(&self) -> Option<&str> {
        match &self.kind {
            VariableKind::CustomAll { all_value, .. } if !all_value.is_empty() => Some(all_value),
            _ => None,
        }
    }

    /// Returns what "All" expands to: the custom literal, or every option
    /// value except the first.
    #[must_use]
    pub fn all_value(&self) -> Value {
        if let Some(all_value) = self.custom_all_value() {
            return Value::String(all_value.to_string());
        }

        Value::Array(
            self.options()
                .iter()
                .skip(1)
                .map(|option| Value::String(option.value.clone()))
                .collect(),
        )
    }

    /// Returns the ad-hoc filters. Empty for other kinds.
    #[must_use]
    pub fn ad_hoc_filters(&self) -> &[AdHocFilter] {
        match &self.kind {
            VariableKind::AdHoc { filters, .. } => filters,
            _ => &[],
        }
    }

    /// Returns the data source an ad-hoc variable applies to.
    #[must_use]
    pub const fn data_source(&self) -> Option<&DataSourceRef> {
        match &self.kind {
            VariableKind::AdHoc { datasource, .. } => datasource.as_ref(),
            _ => None,
        }
    }

    /// Returns the current value, if resolved.
    #[must_use]
    pub fn current_value(&self) -> Option<&Value> {
        self.current
            .as_ref()
            .map(|current| &current.value)
            .filter(|value| !value.is_null())
    }

    /// Returns the current display text, if any.
    #[must_use]
    pub fn current_text(&self) -> Option<&Value> {
        self.current
            .as_ref()
            .map(|current| &current.text)
            .filter(|text| !text.is_null())
    }

    /// Returns true if the variable can be referenced: it has a current value
    /// (the empty string counts) or an explicit "none" selection.
    #[must_use]
    pub fn is_indexable(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|current| current.is_none || !current.value.is_null())
    }

    /// Validates that the name can be referenced from a placeholder.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidVariableName` for empty or non-word names.
    pub fn validate(&self) -> DomainResult<()> {
        if is_valid_variable_name(&self.name) {
            Ok(())
        } else {
            Err(DomainError::InvalidVariableName(self.name.clone()))
        }
    }
}
