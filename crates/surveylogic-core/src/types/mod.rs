//! Type system for survey logic
//!
//! This module contains:
//! - Field types (the semantic type of a rule target)
//! - Rule value helpers

pub mod field_type;
pub mod value;

pub use field_type::FieldType;
pub use value::Value;
