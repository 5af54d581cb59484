//! Persistence of encoded expressions
//!
//! The editor hands the encoded expression of the current component to a
//! [`PersistenceSink`]. Storage itself lives outside this crate.

use std::collections::HashMap;
use std::sync::Mutex;
use surveylogic_core::Value;

/// Stores the expression of a component; `None` means "no logic"
pub trait PersistenceSink: Send + Sync {
    fn persist(&self, component: &str, expression: Option<&Value>) -> anyhow::Result<()>;
}

/// In-memory sink keyed by component code
#[derive(Debug, Default)]
pub struct MemorySink {
    expressions: Mutex<HashMap<String, Option<Value>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last stored expression of `component`.
    ///
    /// The outer `None` means nothing was stored, the inner one that `null`
    /// was stored.
    pub fn get(&self, component: &str) -> Option<Option<Value>> {
        self.expressions
            .lock()
            .ok()
            .and_then(|map| map.get(component).cloned())
    }

    /// Number of components with a stored expression
    pub fn len(&self) -> usize {
        self.expressions.lock().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PersistenceSink for MemorySink {
    fn persist(&self, component: &str, expression: Option<&Value>) -> anyhow::Result<()> {
        let mut map = self
            .expressions
            .lock()
            .map_err(|_| anyhow::anyhow!("memory sink lock poisoned"))?;
        map.insert(component.to_string(), expression.cloned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_memory_sink() -> anyhow::Result<()> {
        let sink = MemorySink::new();
        assert!(sink.is_empty());
        assert_eq!(sink.get("Q1"), None);

        sink.persist("Q1", Some(&json!({"is_empty": {"var": "Q2"}})))?;
        sink.persist("Q2", None)?;

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.get("Q1"), Some(Some(json!({"is_empty": {"var": "Q2"}}))));
        assert_eq!(sink.get("Q2"), Some(None));
        Ok(())
    }
}
