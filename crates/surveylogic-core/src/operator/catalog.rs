//! Built-in operator catalog

use super::definition::{Cardinality, Operator, OperatorKey};
use crate::types::FieldType;

const COMPARABLE: &[FieldType] = &[
    FieldType::Number,
    FieldType::Date,
    FieldType::Time,
    FieldType::Datetime,
];

const EQUATABLE: &[FieldType] = &[
    FieldType::Text,
    FieldType::Number,
    FieldType::Date,
    FieldType::Time,
    FieldType::Datetime,
];

const SINGLE_CHOICE: &[FieldType] = &[
    FieldType::Select,
    FieldType::SurveyMode,
    FieldType::SurveyLang,
];

const ANSWERABLE: &[FieldType] = &[
    FieldType::Text,
    FieldType::Number,
    FieldType::Select,
    FieldType::Multiselect,
    FieldType::Date,
    FieldType::Time,
    FieldType::Datetime,
    FieldType::File,
];

/// The operators every survey supports, in picker order.
pub fn builtin_operators() -> Vec<Operator> {
    use Cardinality::{None as Unary, Range, Single};
    use OperatorKey::*;

    vec![
        Operator::new(Equal, "==", Single, EQUATABLE),
        Operator::new(NotEqual, "!=", Single, EQUATABLE),
        Operator::new(Less, "<", Single, COMPARABLE),
        Operator::new(LessOrEqual, "<=", Single, COMPARABLE),
        Operator::new(Greater, ">", Single, COMPARABLE),
        Operator::new(GreaterOrEqual, ">=", Single, COMPARABLE),
        Operator::new(Between, "between", Range, COMPARABLE),
        Operator::new(NotBetween, "not_between", Range, COMPARABLE),
        Operator::new(Contains, "contains", Single, &[FieldType::Text]),
        Operator::new(NotContains, "not_contains", Single, &[FieldType::Text]),
        Operator::new(StartsWith, "starts_with", Single, &[FieldType::Text]),
        Operator::new(EndsWith, "ends_with", Single, &[FieldType::Text]),
        Operator::new(SelectAnyIn, "in", Single, SINGLE_CHOICE),
        Operator::new(SelectNotAnyIn, "not_in", Single, SINGLE_CHOICE),
        Operator::new(MultiselectEquals, "all_in", Single, &[FieldType::Multiselect]),
        Operator::new(MultiselectNotEquals, "not_all_in", Single, &[FieldType::Multiselect]),
        Operator::new(MultiselectContains, "any_in", Single, &[FieldType::Multiselect]),
        Operator::new(IsEmpty, "is_empty", Unary, ANSWERABLE),
        Operator::new(IsNotEmpty, "is_not_empty", Unary, ANSWERABLE),
        Operator::new(IsRelevant, "is_relevant", Unary, &FieldType::COMPONENT),
        Operator::new(IsNotRelevant, "is_not_relevant", Unary, &FieldType::COMPONENT),
    ]
}

/// Preferred default operator per field type.
pub fn default_preferences() -> Vec<(FieldType, OperatorKey)> {
    vec![
        (FieldType::Text, OperatorKey::Equal),
        (FieldType::Number, OperatorKey::Equal),
        (FieldType::Select, OperatorKey::SelectAnyIn),
        (FieldType::Multiselect, OperatorKey::MultiselectEquals),
        (FieldType::Date, OperatorKey::GreaterOrEqual),
        (FieldType::Time, OperatorKey::GreaterOrEqual),
        (FieldType::Datetime, OperatorKey::GreaterOrEqual),
        (FieldType::File, OperatorKey::IsNotEmpty),
        (FieldType::Group, OperatorKey::IsRelevant),
        (FieldType::SurveyMode, OperatorKey::SelectAnyIn),
        (FieldType::SurveyLang, OperatorKey::SelectAnyIn),
    ]
}
