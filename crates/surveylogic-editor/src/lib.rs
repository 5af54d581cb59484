//! Survey Logic Editor
//!
//! High-level API used by rule editor UIs: resolves the fields a component may
//! reference, applies edit actions to the rule tree, and hands the encoded
//! expression to a persistence sink whenever the tree changes.

pub mod builder;
pub mod config;
pub mod editor;
pub mod error;
pub mod fields;
pub mod outline;
pub mod persistence;
pub mod state;
pub mod validation;

// Re-export main types
pub use builder::LogicEditorBuilder;
pub use config::{EditorConfig, Language};
pub use editor::LogicEditor;
pub use error::{EditorError, Result};
pub use fields::FieldResolver;
pub use outline::{ChoiceRole, Component, ComponentKind, OutlineIndex, SurveyOutline};
pub use persistence::{MemorySink, PersistenceSink};
pub use state::{Action, EditorState, RuleTreeReducer};
pub use validation::RuleStatus;

// Re-export commonly used types from dependencies
pub use surveylogic_codec::{DecodeOptions, ExpressionCodec};
pub use surveylogic_core::{
    Conjunction, Field, FieldOption, FieldType, Group, Operator, OperatorKey, OperatorRegistry,
    Rule, Value,
};
