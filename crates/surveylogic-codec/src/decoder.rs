//! Expression -> rule tree decoder
//!
//! Decoding is lenient: it accepts anything JSON, keeps every rule it can
//! understand and reports the rest.

use crate::codec::DecodeOptions;
use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::json::{field_of, single_entry};
use surveylogic_core::operator::{Cardinality, Operator};
use surveylogic_core::types::value::is_filled;
use surveylogic_core::{Conjunction, Group, IdSource, OperatorRegistry, Rule, Value};

static NULL: Value = Value::Null;

/// Decoder over a registry, a diagnostic sink and an id source
pub struct Decoder<'a> {
    registry: &'a OperatorRegistry,
    sink: &'a dyn DiagnosticSink,
    ids: &'a dyn IdSource,
    options: DecodeOptions,
}

impl<'a> Decoder<'a> {
    pub fn new(
        registry: &'a OperatorRegistry,
        sink: &'a dyn DiagnosticSink,
        ids: &'a dyn IdSource,
    ) -> Self {
        Self {
            registry,
            sink,
            ids,
            options: DecodeOptions::default(),
        }
    }

    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Decode a stored expression into a fresh group.
    ///
    /// `None`, `null` and non-object values yield an empty group.
    pub fn decode(&self, expression: Option<&Value>) -> Group {
        let mut group = Group::new(self.ids.next_id());

        let Some(obj) = expression.and_then(Value::as_object) else {
            return group;
        };
        if obj.is_empty() {
            return group;
        }

        let Some((key, args)) = single_entry(obj) else {
            self.report(DiagnosticKind::NotSingleKey { keys: obj.len() }, expression);
            return group;
        };

        match Conjunction::from_key(key) {
            Some(conjunction) => {
                group.conjunction = conjunction;
                match args.as_array() {
                    Some(items) => {
                        group.children =
                            items.iter().filter_map(|item| self.parse_child(item)).collect();
                    }
                    None => self.report(
                        DiagnosticKind::ConjunctionNotArray(key.to_string()),
                        expression,
                    ),
                }
            }
            None => {
                if let Some(rule) = self.parse_operator(key, args, expression.unwrap_or(&NULL)) {
                    group.children.push(rule);
                }
            }
        }

        group
    }

    /// Parse one element of a conjunction array
    fn parse_child(&self, item: &Value) -> Option<Rule> {
        let Some(obj) = item.as_object() else {
            self.report(DiagnosticKind::NotAnObject, Some(item));
            return None;
        };
        let Some((key, args)) = single_entry(obj) else {
            self.report(DiagnosticKind::NotSingleKey { keys: obj.len() }, Some(item));
            return None;
        };
        if Conjunction::from_key(key).is_some() {
            self.report(DiagnosticKind::NestedGroup, Some(item));
            return None;
        }
        self.parse_operator(key, args, item)
    }

    /// Parse a single operator expression `{wire_op: args}`
    fn parse_operator(&self, wire_op: &str, args: &Value, fragment: &Value) -> Option<Rule> {
        let Some(op) = self.registry.lookup_by_wire_op(wire_op) else {
            self.report(DiagnosticKind::UnknownOperator(wire_op.to_string()), Some(fragment));
            return None;
        };

        let (field_ref, value) = match op.cardinality {
            Cardinality::None => {
                // Either `{op: {"var": ..}}` or `{op: [{"var": ..}, ...]}`
                let field_ref = match args {
                    Value::Array(items) => items.first().unwrap_or(&NULL),
                    other => other,
                };
                (field_ref, None)
            }
            Cardinality::Single | Cardinality::Range => {
                let items = self.operands(op, args, fragment)?;
                (&items[0], self.value_of(op, items))
            }
        };

        let mut rule = Rule::new(self.ids.next_id()).with_operator(op.key);
        rule.value = value;
        match field_of(field_ref) {
            Some(field) => rule.field = Some(field),
            None => self.report(DiagnosticKind::MalformedField, Some(fragment)),
        }
        Some(rule)
    }

    /// Operand array of a cardinality 1/2 operator, checked for length
    fn operands<'v>(
        &self,
        op: &Operator,
        args: &'v Value,
        fragment: &Value,
    ) -> Option<&'v [Value]> {
        let expected = op.cardinality.arity() + 1;
        let items = args.as_array().map(Vec::as_slice).unwrap_or_default();
        if items.len() < expected {
            self.report(
                DiagnosticKind::MissingOperands {
                    wire_op: op.wire_op.clone(),
                    expected,
                    found: items.len(),
                },
                Some(fragment),
            );
            return None;
        }
        Some(items)
    }

    fn value_of(&self, op: &Operator, items: &[Value]) -> Option<Value> {
        match op.cardinality {
            Cardinality::None => None,
            Cardinality::Range => Some(Value::Array(vec![items[1].clone(), items[2].clone()])),
            Cardinality::Single => match &items[1] {
                Value::Null => None,
                Value::Array(_) => Some(items[1].clone()),
                scalar if op.is_selection() && self.options.wrap_legacy_scalars => {
                    if !is_filled(scalar) {
                        return None;
                    }
                    log::debug!("Wrapping legacy scalar value for '{}'", op.wire_op);
                    Some(Value::Array(vec![scalar.clone()]))
                }
                scalar => Some(scalar.clone()),
            },
        }
    }

    fn report(&self, kind: DiagnosticKind, fragment: Option<&Value>) {
        self.sink.report(Diagnostic::new(kind, fragment.unwrap_or(&NULL)));
    }
}
