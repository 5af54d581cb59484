//! Rule leaves

use crate::operator::{OperatorKey, OperatorRegistry};
use crate::types::Value;
use serde::{Deserialize, Serialize};

/// A single `(field, operator, value)` condition.
///
/// Every part is optional while the rule is being edited. The `id` only exists
/// for UI list diffing and never reaches the wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,

    /// Code of the referenced field
    pub field: Option<String>,

    pub operator: Option<OperatorKey>,

    /// Scalar, array of options, or `[min, max]`
    pub value: Option<Value>,
}

impl Rule {
    /// Create an empty rule
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            field: None,
            operator: None,
            value: None,
        }
    }

    /// Set the field
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Set the operator
    pub fn with_operator(mut self, operator: OperatorKey) -> Self {
        self.operator = Some(operator);
        self
    }

    /// Set the value
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    /// Returns true if the rule can be serialized: field and operator are set
    /// and the value matches the operator's cardinality.
    ///
    /// An operator missing from `registry` makes the rule invalid.
    pub fn is_valid(&self, registry: &OperatorRegistry) -> bool {
        if self.field.as_deref().map_or(true, str::is_empty) {
            return false;
        }
        self.operator
            .and_then(|key| registry.lookup_by_key(key))
            .is_some_and(|op| op.accepts(self.value.as_ref()))
    }

    /// Returns true if `self` and `other` describe the same condition,
    /// ignoring ids
    pub fn same_condition(&self, other: &Rule) -> bool {
        self.field == other.field && self.operator == other.operator && self.value == other.value
    }
}
