//! Decode diagnostics
//!
//! Malformed input never aborts decoding. Each dropped or degraded rule is
//! reported to a [`DiagnosticSink`] so hosts can log it and tests can assert
//! on it.

use serde_json::Value;
use std::fmt;
use std::sync::Mutex;

/// What went wrong with an expression fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Operator wire name not in the registry; the rule is dropped
    UnknownOperator(String),

    /// Operand list is not an array or is too short; the rule is dropped
    MissingOperands { wire_op: String, expected: usize, found: usize },

    /// Field reference is not `{"var": "<code>"}`; the rule is kept without a field
    MalformedField,

    /// Nested `and`/`or` groups are not supported; the group is dropped
    NestedGroup,

    /// A conjunction whose value is not an array
    ConjunctionNotArray(String),

    /// Expected an object with exactly one key
    NotSingleKey { keys: usize },

    /// Rule entry is not an object
    NotAnObject,
}

/// A single decode diagnostic
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,

    /// The offending fragment
    pub fragment: Value,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, fragment: &Value) -> Self {
        Self {
            kind,
            fragment: fragment.clone(),
        }
    }

    /// Returns true if the reported fragment was dropped from the decoded tree
    pub fn is_drop(&self) -> bool {
        !matches!(self.kind, DiagnosticKind::MalformedField)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::UnknownOperator(op) => {
                write!(f, "Dropped rule with unknown operator '{}'", op)?
            }
            DiagnosticKind::MissingOperands {
                wire_op,
                expected,
                found,
            } => write!(
                f,
                "Dropped '{}' rule: expected at least {} operands, found {}",
                wire_op, expected, found
            )?,
            DiagnosticKind::MalformedField => write!(f, "Rule has a malformed field reference")?,
            DiagnosticKind::NestedGroup => write!(f, "Dropped nested group")?,
            DiagnosticKind::ConjunctionNotArray(key) => {
                write!(f, "Conjunction '{}' does not hold an array", key)?
            }
            DiagnosticKind::NotSingleKey { keys } => {
                write!(f, "Expected an object with one key, found {} keys", keys)?
            }
            DiagnosticKind::NotAnObject => write!(f, "Dropped rule that is not an object")?,
        }
        write!(f, ": {}", self.fragment)
    }
}

/// Receives decode diagnostics
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to the `log` facade at warn level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, diagnostic: Diagnostic) {
        log::warn!("{}", diagnostic);
    }
}

/// Discards diagnostics
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _diagnostic: Diagnostic) {}
}

/// Keeps diagnostics in memory
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self.diagnostics.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Drain everything reported so far
    pub fn take(&self) -> Vec<Diagnostic> {
        match self.diagnostics.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn len(&self) -> usize {
        self.diagnostics().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: Diagnostic) {
        match self.diagnostics.lock() {
            Ok(mut guard) => guard.push(diagnostic),
            Err(poisoned) => poisoned.into_inner().push(diagnostic),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collecting_sink() {
        let sink = CollectingSink::new();
        assert!(sink.is_empty());

        sink.report(Diagnostic::new(DiagnosticKind::NestedGroup, &json!({"or": []})));
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.diagnostics()[0].kind, DiagnosticKind::NestedGroup);

        let drained = sink.take();
        assert_eq!(drained.len(), 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = Diagnostic::new(
            DiagnosticKind::UnknownOperator("totally_unknown_op".to_string()),
            &json!({"totally_unknown_op": [{"var": "Q1"}, 5]}),
        );
        let message = diagnostic.to_string();
        assert!(message.contains("unknown operator 'totally_unknown_op'"));
        assert!(message.contains("Q1"));
        assert!(diagnostic.is_drop());

        let kept = Diagnostic::new(DiagnosticKind::MalformedField, &json!({"is_empty": "Q1"}));
        assert!(!kept.is_drop());
    }
}
