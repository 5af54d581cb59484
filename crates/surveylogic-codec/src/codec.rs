//! Expression codec facade
//!
//! Bundles a registry, a diagnostic sink and an id source so callers can
//! encode and decode without threading all three through every call.

use crate::decoder::Decoder;
use crate::diagnostics::{DiagnosticSink, LogSink};
use crate::encoder::Encoder;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use surveylogic_core::{Group, IdSource, OperatorRegistry, UuidIds, Value};

/// Decode behavior switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeOptions {
    /// Wrap scalar values of selection-family operators into one-element
    /// arrays, normalizing data stored before values were always arrays
    #[serde(default = "default_true")]
    pub wrap_legacy_scalars: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            wrap_legacy_scalars: true,
        }
    }
}

/// Bidirectional rule tree <-> expression codec
///
/// # Example
///
/// ```rust,ignore
/// use surveylogic_codec::ExpressionCodec;
/// use serde_json::json;
///
/// let codec = ExpressionCodec::new();
/// let tree = codec.decode(Some(&json!({"between": [{"var": "Q3"}, 1, 10]})));
/// assert_eq!(codec.encode(&tree), Some(json!({"between": [{"var": "Q3"}, 1, 10]})));
/// ```
#[derive(Clone)]
pub struct ExpressionCodec {
    registry: Arc<OperatorRegistry>,
    sink: Arc<dyn DiagnosticSink>,
    ids: Arc<dyn IdSource>,
    options: DecodeOptions,
}

impl ExpressionCodec {
    /// Create a codec over the built-in operators, logging diagnostics
    pub fn new() -> Self {
        Self::with_registry(Arc::new(OperatorRegistry::new()))
    }

    /// Create a codec over a shared registry
    pub fn with_registry(registry: Arc<OperatorRegistry>) -> Self {
        Self {
            registry,
            sink: Arc::new(LogSink),
            ids: Arc::new(UuidIds),
            options: DecodeOptions::default(),
        }
    }

    /// Set the diagnostic sink
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Set the id source used for decoded rules and groups
    pub fn with_ids(mut self, ids: Arc<dyn IdSource>) -> Self {
        self.ids = ids;
        self
    }

    /// Set decode options
    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn registry(&self) -> &Arc<OperatorRegistry> {
        &self.registry
    }

    /// Encode a tree; `None` means "no condition"
    pub fn encode(&self, tree: &Group) -> Option<Value> {
        Encoder::new(&self.registry).encode(tree)
    }

    /// Decode a stored expression into a fresh tree
    pub fn decode(&self, expression: Option<&Value>) -> Group {
        Decoder::new(&self.registry, self.sink.as_ref(), self.ids.as_ref())
            .with_options(self.options)
            .decode(expression)
    }

    /// Encode a tree to the stored JSON text (`null` when there is no condition)
    pub fn encode_to_string(&self, tree: &Group) -> Result<String> {
        let value = self.encode(tree).unwrap_or(Value::Null);
        Ok(serde_json::to_string(&value)?)
    }

    /// Decode stored JSON text.
    ///
    /// Fails only when the text is not JSON; empty text counts as `null`.
    pub fn decode_str(&self, text: &str) -> Result<Group> {
        if text.trim().is_empty() {
            return Ok(self.decode(None));
        }
        let value: Value = serde_json::from_str(text)?;
        Ok(self.decode(Some(&value)))
    }
}

impl Default for ExpressionCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ExpressionCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpressionCodec")
            .field("operators", &self.registry.len())
            .field("options", &self.options)
            .finish()
    }
}
