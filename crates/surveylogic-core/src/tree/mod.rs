//! Rule tree
//!
//! The editor works on a single root [`Group`] holding a flat list of
//! [`Rule`] leaves. Nested groups are not supported.

mod group;
mod id;
mod rule;

pub use group::{Conjunction, Group};
pub use id::{IdSource, SequentialIds, UuidIds};
pub use rule::Rule;
