//! Rule tree -> expression encoder

use crate::json::{single, var};
use surveylogic_core::operator::{Cardinality, Operator};
use surveylogic_core::types::value::{as_range, to_array};
use surveylogic_core::{Group, OperatorRegistry, Rule, Value};

/// Stateless encoder over a registry
#[derive(Debug, Clone, Copy)]
pub struct Encoder<'a> {
    registry: &'a OperatorRegistry,
}

impl<'a> Encoder<'a> {
    pub fn new(registry: &'a OperatorRegistry) -> Self {
        Self { registry }
    }

    /// Encode a tree.
    ///
    /// Incomplete rules are skipped. Returns `None` when no valid rule is left,
    /// the bare rule expression when exactly one is left, and a conjunction
    /// wrapper otherwise.
    pub fn encode(&self, tree: &Group) -> Option<Value> {
        let mut expressions: Vec<Value> = tree
            .children
            .iter()
            .filter_map(|rule| self.encode_rule(rule))
            .collect();

        match expressions.len() {
            0 => None,
            1 => expressions.pop(),
            _ => Some(single(tree.conjunction.as_str(), Value::Array(expressions))),
        }
    }

    /// Encode one rule, or `None` if it is not valid
    pub fn encode_rule(&self, rule: &Rule) -> Option<Value> {
        let field = rule.field.as_deref().filter(|f| !f.is_empty())?;
        let op = self.registry.lookup_by_key(rule.operator?)?;
        if !op.accepts(rule.value.as_ref()) {
            return None;
        }

        let args = match op.cardinality {
            Cardinality::None => return Some(single(&op.wire_op, var(field))),
            Cardinality::Single => vec![var(field), Self::single_value(op, rule.value.as_ref()?)],
            Cardinality::Range => {
                let (min, max) = as_range(rule.value.as_ref()?)?;
                vec![var(field), min.clone(), max.clone()]
            }
        };
        Some(single(&op.wire_op, Value::Array(args)))
    }

    fn single_value(op: &Operator, value: &Value) -> Value {
        if op.is_selection() {
            Value::Array(to_array(value))
        } else {
            value.clone()
        }
    }
}
