//! Per-rule completeness checks against the resolved fields
//!
//! The codec silently skips incomplete rules; these statuses let the UI show
//! why a row will not be saved.

use serde::{Deserialize, Serialize};
use surveylogic_core::{Field, Group, OperatorRegistry, Rule};

/// Completeness of a single rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleStatus {
    /// The rule will be encoded
    Complete,
    MissingField,
    /// The field code is not among the fields the component may reference
    UnknownField,
    MissingOperator,
    /// The operator does not apply to the field's type
    OperatorNotApplicable,
    /// The value does not match the operator's cardinality
    MissingValue,
}

impl RuleStatus {
    pub fn is_complete(&self) -> bool {
        *self == RuleStatus::Complete
    }
}

/// Check one rule
pub fn rule_status(rule: &Rule, fields: &[Field], registry: &OperatorRegistry) -> RuleStatus {
    let Some(code) = rule.field.as_deref().filter(|c| !c.is_empty()) else {
        return RuleStatus::MissingField;
    };
    let Some(field) = fields.iter().find(|f| f.code == code) else {
        return RuleStatus::UnknownField;
    };
    let Some(operator) = rule.operator.and_then(|key| registry.lookup_by_key(key)) else {
        return RuleStatus::MissingOperator;
    };
    if !operator.applies_to(field.field_type) {
        return RuleStatus::OperatorNotApplicable;
    }
    if !operator.accepts(rule.value.as_ref()) {
        return RuleStatus::MissingValue;
    }
    RuleStatus::Complete
}

/// Check every rule of the tree, in order
pub fn tree_statuses(
    tree: &Group,
    fields: &[Field],
    registry: &OperatorRegistry,
) -> Vec<(String, RuleStatus)> {
    tree.children
        .iter()
        .map(|rule| (rule.id.clone(), rule_status(rule, fields, registry)))
        .collect()
}
