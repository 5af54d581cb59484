//! Fields addressable by rules

use crate::operator::{Operator, OperatorKey, OperatorRegistry};
use crate::types::FieldType;
use serde::{Deserialize, Serialize};

/// One selectable option of a select-like field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

impl FieldOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A rule target derived from a survey component, or a system field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Unique key, stable across edits
    pub code: String,

    /// Human-readable label, may embed a numeric prefix
    pub label: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    pub default_operator: OperatorKey,

    /// Options for select-like fields; empty otherwise
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,

    /// UI grouping label
    pub group: String,
}

impl Field {
    /// Create a field with no options
    pub fn new(
        code: impl Into<String>,
        label: impl Into<String>,
        field_type: FieldType,
        default_operator: OperatorKey,
    ) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
            field_type,
            default_operator,
            options: Vec::new(),
            group: String::new(),
        }
    }

    /// Set the options
    pub fn with_options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = options;
        self
    }

    /// Set the UI grouping label
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Operators that may be used with this field
    pub fn operators<'a>(&self, registry: &'a OperatorRegistry) -> Vec<&'a Operator> {
        registry.operators_for_type(self.field_type)
    }
}
