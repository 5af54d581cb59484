//! Error types for survey logic core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Duplicate wire operator: {0}")]
    DuplicateWireOp(String),

    #[error("Duplicate operator key: {0}")]
    DuplicateOperator(String),

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("Unknown field type: {0}")]
    UnknownFieldType(String),

    #[error("Invalid cardinality: {0}")]
    InvalidCardinality(u8),
}

pub type Result<T> = std::result::Result<T, CoreError>;
