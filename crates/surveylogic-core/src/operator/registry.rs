//! Operator registry
//!
//! The registry is built once from a catalog and is read-only afterwards.
//! Lookups by key, by wire name and by field type are all map lookups.

use super::catalog::{builtin_operators, default_preferences};
use super::definition::{Operator, OperatorKey};
use crate::error::{CoreError, Result};
use crate::types::FieldType;
use std::collections::{HashMap, HashSet};

/// Indexed operator catalog
#[derive(Debug, Clone)]
pub struct OperatorRegistry {
    /// Operators in catalog order
    operators: Vec<Operator>,

    /// Position in `operators` by key
    by_key: HashMap<OperatorKey, usize>,

    /// Reverse index: position in `operators` by wire name
    by_wire_op: HashMap<String, usize>,

    /// Applicable operators per field type, in catalog order
    by_type: HashMap<FieldType, Vec<usize>>,

    /// Preferred default operator per field type
    preferences: HashMap<FieldType, OperatorKey>,
}

impl OperatorRegistry {
    /// Create a registry holding the built-in catalog
    pub fn new() -> Self {
        Self::index(builtin_operators(), default_preferences())
    }

    /// Create a registry from a custom catalog.
    ///
    /// Fails if two operators share a key or a wire name, since either would
    /// make decoding ambiguous.
    pub fn from_operators(
        operators: Vec<Operator>,
        preferences: Vec<(FieldType, OperatorKey)>,
    ) -> Result<Self> {
        let mut keys = HashSet::new();
        let mut wire_ops = HashSet::new();
        for op in &operators {
            if !keys.insert(op.key) {
                return Err(CoreError::DuplicateOperator(op.key.to_string()));
            }
            if !wire_ops.insert(op.wire_op.as_str()) {
                return Err(CoreError::DuplicateWireOp(op.wire_op.clone()));
            }
        }
        let registry = Self::index(operators, preferences);
        for (field_type, key) in &registry.preferences {
            if !registry.lookup_by_key(*key).is_some_and(|op| op.applies_to(*field_type)) {
                log::debug!(
                    "Ignoring default operator preference {} for {} fields: not applicable",
                    key,
                    field_type
                );
            }
        }
        Ok(registry)
    }

    fn index(operators: Vec<Operator>, preferences: Vec<(FieldType, OperatorKey)>) -> Self {
        let mut by_key = HashMap::with_capacity(operators.len());
        let mut by_wire_op = HashMap::with_capacity(operators.len());
        let mut by_type: HashMap<FieldType, Vec<usize>> = HashMap::new();

        for (idx, op) in operators.iter().enumerate() {
            by_key.insert(op.key, idx);
            by_wire_op.insert(op.wire_op.clone(), idx);
            for field_type in &op.applicable_types {
                by_type.entry(*field_type).or_default().push(idx);
            }
        }

        Self {
            operators,
            by_key,
            by_wire_op,
            by_type,
            preferences: preferences.into_iter().collect(),
        }
    }

    /// Look up an operator by its internal key
    pub fn lookup_by_key(&self, key: OperatorKey) -> Option<&Operator> {
        self.by_key.get(&key).map(|&idx| &self.operators[idx])
    }

    /// Look up an operator by the name used in serialized expressions
    pub fn lookup_by_wire_op(&self, wire_op: &str) -> Option<&Operator> {
        self.by_wire_op.get(wire_op).map(|&idx| &self.operators[idx])
    }

    /// Operators applicable to `field_type`, in catalog order.
    ///
    /// Returns an empty list when nothing is registered for the type.
    pub fn operators_for_type(&self, field_type: FieldType) -> Vec<&Operator> {
        self.by_type
            .get(&field_type)
            .map(|indices| indices.iter().map(|&idx| &self.operators[idx]).collect())
            .unwrap_or_default()
    }

    /// Default operator for `field_type`.
    ///
    /// Uses the preference table when the preferred operator is registered and
    /// applies to the type; otherwise falls back to the first applicable
    /// operator. `None` only when no operator applies at all.
    pub fn default_operator_for_type(&self, field_type: FieldType) -> Option<OperatorKey> {
        let preferred = self
            .preferences
            .get(&field_type)
            .and_then(|key| self.lookup_by_key(*key))
            .filter(|op| op.applies_to(field_type));

        preferred
            .or_else(|| self.operators_for_type(field_type).into_iter().next())
            .map(|op| op.key)
    }

    /// All operators, in catalog order
    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
