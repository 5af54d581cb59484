//! Codec error types
//!
//! Only the text edge can fail: once a JSON value exists, decoding degrades
//! gracefully instead of erroring.

use thiserror::Error;

/// Codec error
#[derive(Error, Debug)]
pub enum CodecError {
    /// The stored blob is not JSON
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;
