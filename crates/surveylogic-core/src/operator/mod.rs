//! Operators for survey display logic
//!
//! An operator is a named predicate with a fixed cardinality (how many values it
//! takes) and a fixed set of field types it applies to. The registry indexes the
//! catalog by key, by wire name and by field type.

mod catalog;
mod definition;
mod registry;

pub use catalog::{builtin_operators, default_preferences};
pub use definition::{Cardinality, Operator, OperatorKey};
pub use registry::OperatorRegistry;
