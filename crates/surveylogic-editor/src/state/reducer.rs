//! Pure reduction of actions over the editor state

use std::sync::Arc;
use surveylogic_core::{Cardinality, Group, IdSource, OperatorRegistry, Rule};

use super::action::Action;

/// Rule tree plus its unsaved-changes flag
#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    pub tree: Group,

    /// True when the tree changed since it was loaded or persisted
    pub is_dirty: bool,
}

impl EditorState {
    /// Clean state over `tree`
    pub fn new(tree: Group) -> Self {
        Self {
            tree,
            is_dirty: false,
        }
    }
}

/// Applies [`Action`]s to an [`EditorState`]
#[derive(Clone)]
pub struct RuleTreeReducer {
    registry: Arc<OperatorRegistry>,
    ids: Arc<dyn IdSource>,
}

impl RuleTreeReducer {
    pub fn new(registry: Arc<OperatorRegistry>, ids: Arc<dyn IdSource>) -> Self {
        Self { registry, ids }
    }

    /// Clean state with an empty tree
    pub fn initial_state(&self) -> EditorState {
        EditorState::new(self.empty_group())
    }

    /// Apply `action`, returning the next state.
    ///
    /// An action naming a rule id that is not in the tree returns `state`
    /// unchanged.
    pub fn reduce(&self, state: &EditorState, action: Action) -> EditorState {
        match action {
            Action::AddRule => self.append_rule(state).0,
            Action::RemoveRule { id } => {
                let mut tree = state.tree.clone();
                match tree.remove_rule(&id) {
                    Some(_) => dirty(tree),
                    None => state.clone(),
                }
            }
            Action::SetConjunction { conjunction } => {
                let mut tree = state.tree.clone();
                tree.conjunction = conjunction;
                dirty(tree)
            }
            Action::SetField { id, field } => Self::update_rule(state, &id, |rule| {
                rule.field = Some(field);
                rule.operator = None;
                rule.value = None;
            }),
            Action::SetFieldWithDefaults {
                id,
                field,
                operator,
                value,
            } => Self::update_rule(state, &id, |rule| {
                rule.field = Some(field);
                rule.operator = Some(operator);
                rule.value = value;
            }),
            Action::SetOperator { id, operator } => {
                let takes_no_value = self
                    .registry
                    .lookup_by_key(operator)
                    .is_some_and(|op| op.cardinality == Cardinality::None);
                Self::update_rule(state, &id, |rule| {
                    rule.operator = Some(operator);
                    if takes_no_value {
                        rule.value = None;
                    }
                })
            }
            Action::SetValue { id, value } => {
                Self::update_rule(state, &id, |rule| rule.value = value)
            }
            Action::Load { tree } => EditorState::new(tree),
            Action::Clear => dirty(self.empty_group()),
            Action::MarkPersisted => EditorState {
                tree: state.tree.clone(),
                is_dirty: false,
            },
        }
    }

    /// Append an empty rule, returning the next state and the new rule's id
    pub fn append_rule(&self, state: &EditorState) -> (EditorState, String) {
        let id = self.ids.next_id();
        let mut tree = state.tree.clone();
        tree.children.push(Rule::new(id.clone()));
        (dirty(tree), id)
    }

    fn update_rule(state: &EditorState, id: &str, update: impl FnOnce(&mut Rule)) -> EditorState {
        let mut tree = state.tree.clone();
        match tree.rule_mut(id) {
            Some(rule) => {
                update(rule);
                dirty(tree)
            }
            None => state.clone(),
        }
    }

    fn empty_group(&self) -> Group {
        Group::new(self.ids.next_id())
    }
}

impl std::fmt::Debug for RuleTreeReducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleTreeReducer")
            .field("operators", &self.registry.len())
            .finish_non_exhaustive()
    }
}

fn dirty(tree: Group) -> EditorState {
    EditorState {
        tree,
        is_dirty: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use surveylogic_core::{Conjunction, OperatorKey, SequentialIds};

    fn reducer() -> RuleTreeReducer {
        RuleTreeReducer::new(
            Arc::new(OperatorRegistry::new()),
            Arc::new(SequentialIds::new("r")),
        )
    }

    fn with_rule(reducer: &RuleTreeReducer) -> (EditorState, String) {
        let state = reducer.reduce(&reducer.initial_state(), Action::AddRule);
        let id = state.tree.children[0].id.clone();
        (state, id)
    }

    #[test]
    fn test_initial_state_is_clean_and_empty() {
        let state = reducer().initial_state();
        assert!(state.tree.is_empty());
        assert_eq!(state.tree.conjunction, Conjunction::And);
        assert!(!state.is_dirty);
    }

    #[test]
    fn test_add_and_remove_rule() {
        let reducer = reducer();
        let (state, id) = with_rule(&reducer);
        assert!(state.is_dirty);
        assert_eq!(state.tree.len(), 1);
        assert!(state.tree.children[0].field.is_none());

        let removed = reducer.reduce(&state, Action::RemoveRule { id });
        assert!(removed.tree.is_empty());
    }

    #[test]
    fn test_append_rule_returns_new_id() {
        let reducer = reducer();
        let (state, first) = reducer.append_rule(&reducer.initial_state());
        let (state, second) = reducer.append_rule(&state);

        assert_ne!(first, second);
        let ids: Vec<_> = state.tree.children.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, vec![first, second]);
        assert!(state.is_dirty);
    }

    #[test]
    fn test_set_field_clears_operator_and_value() {
        let reducer = reducer();
        let (state, id) = with_rule(&reducer);
        let state = reducer.reduce(
            &state,
            Action::SetFieldWithDefaults {
                id: id.clone(),
                field: "Q1".to_string(),
                operator: OperatorKey::Equal,
                value: Some(json!("5")),
            },
        );
        assert_eq!(state.tree.children[0].value, Some(json!("5")));

        let state = reducer.reduce(
            &state,
            Action::SetField {
                id,
                field: "Q2".to_string(),
            },
        );
        let rule = &state.tree.children[0];
        assert_eq!(rule.field.as_deref(), Some("Q2"));
        assert!(rule.operator.is_none());
        assert!(rule.value.is_none());
    }

    #[test]
    fn test_set_operator_without_value_clears_value() {
        let reducer = reducer();
        let (state, id) = with_rule(&reducer);
        let state = reducer.reduce(
            &state,
            Action::SetFieldWithDefaults {
                id: id.clone(),
                field: "Q1".to_string(),
                operator: OperatorKey::Equal,
                value: Some(json!("5")),
            },
        );

        let state = reducer.reduce(
            &state,
            Action::SetOperator {
                id,
                operator: OperatorKey::IsEmpty,
            },
        );
        let rule = &state.tree.children[0];
        assert_eq!(rule.operator, Some(OperatorKey::IsEmpty));
        assert!(rule.value.is_none());
    }

    #[test]
    fn test_set_operator_with_value_keeps_value() {
        let reducer = reducer();
        let (state, id) = with_rule(&reducer);
        let state = reducer.reduce(
            &state,
            Action::SetValue {
                id: id.clone(),
                value: Some(json!(3)),
            },
        );
        let state = reducer.reduce(
            &state,
            Action::SetOperator {
                id,
                operator: OperatorKey::Greater,
            },
        );
        assert_eq!(state.tree.children[0].value, Some(json!(3)));
    }

    #[test]
    fn test_unknown_id_returns_state_unchanged() {
        let reducer = reducer();
        let (state, _) = with_rule(&reducer);
        let clean = reducer.reduce(&state, Action::MarkPersisted);

        for action in [
            Action::RemoveRule { id: "nope".to_string() },
            Action::SetField {
                id: "nope".to_string(),
                field: "Q1".to_string(),
            },
            Action::SetValue {
                id: "nope".to_string(),
                value: None,
            },
        ] {
            assert_eq!(reducer.reduce(&clean, action), clean);
        }
    }

    #[test]
    fn test_load_is_clean_and_clear_is_dirty() {
        let reducer = reducer();
        let tree = Group::new("loaded")
            .with_conjunction(Conjunction::Or)
            .add_rule(Rule::new("a").with_field("Q1").with_operator(OperatorKey::IsEmpty));

        let loaded = reducer.reduce(&reducer.initial_state(), Action::Load { tree: tree.clone() });
        assert_eq!(loaded.tree, tree);
        assert!(!loaded.is_dirty);

        let cleared = reducer.reduce(&loaded, Action::Clear);
        assert!(cleared.tree.is_empty());
        assert_ne!(cleared.tree.id, "loaded");
        assert!(cleared.is_dirty);
    }

    #[test]
    fn test_reduce_does_not_mutate_input() {
        let reducer = reducer();
        let start = reducer.initial_state();
        let snapshot = start.clone();
        let _ = reducer.reduce(
            &start,
            Action::SetConjunction {
                conjunction: Conjunction::Or,
            },
        );
        assert_eq!(start, snapshot);
    }
}
