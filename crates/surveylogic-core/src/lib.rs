//! Survey Logic Core - shared types for survey display logic
//!
//! This crate provides the building blocks used across the survey logic workspace:
//! - Field types and value helpers
//! - The operator catalog and registry
//! - Fields addressable by rules
//! - The rule tree (a flat group of rules joined by a conjunction)
//! - Error types

pub mod error;
pub mod field;
pub mod operator;
pub mod tree;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use field::{Field, FieldOption};
pub use operator::{Cardinality, Operator, OperatorKey, OperatorRegistry};
pub use tree::{Conjunction, Group, IdSource, Rule, SequentialIds, UuidIds};
pub use types::{FieldType, Value};
