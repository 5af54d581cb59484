//! Operator definitions

use crate::error::CoreError;
use crate::types::value::{as_range, is_filled, Value};
use crate::types::FieldType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operator identifiers used by the rule tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorKey {
    // Comparison operators
    /// Equal (==)
    Equal,
    /// Not equal (!=)
    NotEqual,
    /// Less than (<)
    Less,
    /// Less than or equal (<=)
    LessOrEqual,
    /// Greater than (>)
    Greater,
    /// Greater than or equal (>=)
    GreaterOrEqual,

    // Range operators
    Between,
    NotBetween,

    // Text operators
    Contains,
    NotContains,
    StartsWith,
    EndsWith,

    // Selection operators
    /// Answer is one of the given options
    SelectAnyIn,
    /// Answer is none of the given options
    SelectNotAnyIn,
    /// Selected set equals the given options
    MultiselectEquals,
    /// Selected set differs from the given options
    MultiselectNotEquals,
    /// Selected set shares at least one of the given options
    MultiselectContains,

    // State operators
    IsEmpty,
    IsNotEmpty,
    IsRelevant,
    IsNotRelevant,
}

impl OperatorKey {
    /// Every operator key, in catalog order
    pub const ALL: [OperatorKey; 21] = [
        OperatorKey::Equal,
        OperatorKey::NotEqual,
        OperatorKey::Less,
        OperatorKey::LessOrEqual,
        OperatorKey::Greater,
        OperatorKey::GreaterOrEqual,
        OperatorKey::Between,
        OperatorKey::NotBetween,
        OperatorKey::Contains,
        OperatorKey::NotContains,
        OperatorKey::StartsWith,
        OperatorKey::EndsWith,
        OperatorKey::SelectAnyIn,
        OperatorKey::SelectNotAnyIn,
        OperatorKey::MultiselectEquals,
        OperatorKey::MultiselectNotEquals,
        OperatorKey::MultiselectContains,
        OperatorKey::IsEmpty,
        OperatorKey::IsNotEmpty,
        OperatorKey::IsRelevant,
        OperatorKey::IsNotRelevant,
    ];

    /// Internal (snake_case) name of the key
    pub fn as_str(&self) -> &'static str {
        match self {
            OperatorKey::Equal => "equal",
            OperatorKey::NotEqual => "not_equal",
            OperatorKey::Less => "less",
            OperatorKey::LessOrEqual => "less_or_equal",
            OperatorKey::Greater => "greater",
            OperatorKey::GreaterOrEqual => "greater_or_equal",
            OperatorKey::Between => "between",
            OperatorKey::NotBetween => "not_between",
            OperatorKey::Contains => "contains",
            OperatorKey::NotContains => "not_contains",
            OperatorKey::StartsWith => "starts_with",
            OperatorKey::EndsWith => "ends_with",
            OperatorKey::SelectAnyIn => "select_any_in",
            OperatorKey::SelectNotAnyIn => "select_not_any_in",
            OperatorKey::MultiselectEquals => "multiselect_equals",
            OperatorKey::MultiselectNotEquals => "multiselect_not_equals",
            OperatorKey::MultiselectContains => "multiselect_contains",
            OperatorKey::IsEmpty => "is_empty",
            OperatorKey::IsNotEmpty => "is_not_empty",
            OperatorKey::IsRelevant => "is_relevant",
            OperatorKey::IsNotRelevant => "is_not_relevant",
        }
    }

    /// Returns true if this is a selection-family operator whose value is
    /// always encoded as an array
    pub fn is_selection(&self) -> bool {
        matches!(
            self,
            OperatorKey::SelectAnyIn
                | OperatorKey::SelectNotAnyIn
                | OperatorKey::MultiselectEquals
                | OperatorKey::MultiselectNotEquals
                | OperatorKey::MultiselectContains
        )
    }
}

impl fmt::Display for OperatorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperatorKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperatorKey::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| CoreError::UnknownOperator(s.to_string()))
    }
}

/// Number of values an operator takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Cardinality {
    /// State check, no value
    None,
    /// One value (scalar or array)
    Single,
    /// A `[min, max]` range
    Range,
}

impl Cardinality {
    pub fn arity(&self) -> usize {
        match self {
            Cardinality::None => 0,
            Cardinality::Single => 1,
            Cardinality::Range => 2,
        }
    }
}

impl From<Cardinality> for u8 {
    fn from(cardinality: Cardinality) -> u8 {
        cardinality.arity() as u8
    }
}

impl TryFrom<u8> for Cardinality {
    type Error = CoreError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            0 => Ok(Cardinality::None),
            1 => Ok(Cardinality::Single),
            2 => Ok(Cardinality::Range),
            other => Err(CoreError::InvalidCardinality(other)),
        }
    }
}

/// A named predicate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    /// Internal identifier
    pub key: OperatorKey,

    /// Name used in the serialized expression (e.g. `==`, `is_empty`)
    pub wire_op: String,

    pub cardinality: Cardinality,

    /// Field types this operator may be used with
    pub applicable_types: Vec<FieldType>,
}

impl Operator {
    /// Create a new operator definition
    pub fn new(
        key: OperatorKey,
        wire_op: impl Into<String>,
        cardinality: Cardinality,
        applicable_types: &[FieldType],
    ) -> Self {
        Self {
            key,
            wire_op: wire_op.into(),
            cardinality,
            applicable_types: applicable_types.to_vec(),
        }
    }

    /// Returns true if this operator may be used with fields of `field_type`
    pub fn applies_to(&self, field_type: FieldType) -> bool {
        self.applicable_types.contains(&field_type)
    }

    /// Returns true if the value is always encoded as an array
    pub fn is_selection(&self) -> bool {
        self.key.is_selection()
    }

    /// Check whether `value` satisfies this operator's cardinality.
    ///
    /// Cardinality 0 accepts anything (the value is ignored); cardinality 1
    /// needs a filled scalar or a non-empty array; cardinality 2 needs a
    /// two-element array with both ends filled.
    pub fn accepts(&self, value: Option<&Value>) -> bool {
        match self.cardinality {
            Cardinality::None => true,
            Cardinality::Single => value.is_some_and(is_filled),
            Cardinality::Range => value.and_then(as_range).is_some(),
        }
    }
}
