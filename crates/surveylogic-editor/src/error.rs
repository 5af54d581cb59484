//! Editor error types

use thiserror::Error;

/// Editor error type
#[derive(Error, Debug)]
pub enum EditorError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Codec error: {0}")]
    CodecError(#[from] surveylogic_codec::CodecError),

    #[error("Core error: {0}")]
    CoreError(#[from] surveylogic_core::CoreError),

    /// Component code not present in the survey outline
    #[error("Unknown component: {0}")]
    UnknownComponent(String),

    /// Field code not among the resolved fields
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// The persistence sink rejected the expression
    #[error("Persistence error: {0}")]
    PersistenceError(String),
}

/// Result type for editor operations
pub type Result<T> = std::result::Result<T, EditorError>;
