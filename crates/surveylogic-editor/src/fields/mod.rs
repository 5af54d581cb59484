//! Field resolution
//!
//! Turns the survey outline into the ordered list of fields a component's
//! rules may reference.

mod labels;
mod resolver;

pub use labels::{numbered, strip_markup};
pub use resolver::{FieldResolver, SURVEY_LANG_CODE, SURVEY_MODE_CODE};
