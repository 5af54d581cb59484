//! Edit actions

use serde::{Deserialize, Serialize};
use surveylogic_core::{Conjunction, Group, OperatorKey, Value};

/// An edit applied to the rule tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Append an empty rule
    AddRule,

    RemoveRule { id: String },

    SetConjunction { conjunction: Conjunction },

    /// Set the field and clear operator and value
    SetField { id: String, field: String },

    /// Set field, operator and value in one step
    SetFieldWithDefaults {
        id: String,
        field: String,
        operator: OperatorKey,
        value: Option<Value>,
    },

    /// Set the operator, clearing the value if the operator takes none
    SetOperator { id: String, operator: OperatorKey },

    SetValue { id: String, value: Option<Value> },

    /// Replace the tree with a decoded one; leaves the state clean
    Load { tree: Group },

    /// Replace the tree with an empty one
    Clear,

    /// The current tree has been stored
    MarkPersisted,
}

impl Action {
    /// Id of the rule the action targets, if any
    pub fn rule_id(&self) -> Option<&str> {
        match self {
            Action::RemoveRule { id }
            | Action::SetField { id, .. }
            | Action::SetFieldWithDefaults { id, .. }
            | Action::SetOperator { id, .. }
            | Action::SetValue { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddRule => "add_rule",
            Action::RemoveRule { .. } => "remove_rule",
            Action::SetConjunction { .. } => "set_conjunction",
            Action::SetField { .. } => "set_field",
            Action::SetFieldWithDefaults { .. } => "set_field_with_defaults",
            Action::SetOperator { .. } => "set_operator",
            Action::SetValue { .. } => "set_value",
            Action::Load { .. } => "load",
            Action::Clear => "clear",
            Action::MarkPersisted => "mark_persisted",
        }
    }
}
