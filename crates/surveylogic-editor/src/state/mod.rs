//! Rule-tree state machine
//!
//! Edits are expressed as [`Action`] values and applied by
//! [`RuleTreeReducer::reduce`], which never mutates its input.

mod action;
mod reducer;

pub use action::Action;
pub use reducer::{EditorState, RuleTreeReducer};
