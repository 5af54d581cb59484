//! Survey Logic Codec - rule tree <-> JSON expression translation
//!
//! This crate converts the editor's rule tree into the JSON boolean-expression
//! format stored with a survey component, and back.
//!
//! # Wire format
//!
//! ```json
//! null
//! {"is_not_empty": {"var": "Q2"}}
//! {"and": [{"==": [{"var": "Q1"}, "5"]}, {"between": [{"var": "Q3"}, 1, 10]}]}
//! ```
//!
//! Decoding never fails on a well-formed JSON value: rules that cannot be
//! understood are dropped and reported through a [`DiagnosticSink`].

pub mod codec;
pub mod decoder;
pub mod diagnostics;
pub mod encoder;
pub mod error;
pub mod json;

// Re-export main codec types
pub use codec::{DecodeOptions, ExpressionCodec};
pub use decoder::Decoder;
pub use diagnostics::{
    CollectingSink, Diagnostic, DiagnosticKind, DiagnosticSink, LogSink, NullSink,
};
pub use encoder::Encoder;
pub use error::{CodecError, Result};
