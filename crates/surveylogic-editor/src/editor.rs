//! Rule editor session
//!
//! A [`LogicEditor`] edits the display logic of one survey component: it owns
//! the rule tree, the fields the component may reference, and the sink that
//! receives the encoded expression.

use crate::config::EditorConfig;
use crate::error::{EditorError, Result};
use crate::fields::FieldResolver;
use crate::outline::SurveyOutline;
use crate::persistence::PersistenceSink;
use crate::state::{Action, EditorState, RuleTreeReducer};
use crate::validation::{tree_statuses, RuleStatus};
use std::sync::Arc;
use surveylogic_codec::ExpressionCodec;
use surveylogic_core::{Field, Group, Operator, OperatorRegistry, Value};

/// Editing session over the display logic of one component
pub struct LogicEditor {
    component: String,
    config: EditorConfig,
    registry: Arc<OperatorRegistry>,
    codec: ExpressionCodec,
    reducer: RuleTreeReducer,
    resolver: FieldResolver,
    outline: Arc<dyn SurveyOutline>,
    sink: Option<Arc<dyn PersistenceSink>>,
    fields: Vec<Field>,
    state: EditorState,
}

/// Everything a session is assembled from
pub(crate) struct EditorParts {
    pub component: String,
    pub config: EditorConfig,
    pub registry: Arc<OperatorRegistry>,
    pub codec: ExpressionCodec,
    pub reducer: RuleTreeReducer,
    pub resolver: FieldResolver,
    pub outline: Arc<dyn SurveyOutline>,
    pub sink: Option<Arc<dyn PersistenceSink>>,
}

impl LogicEditor {
    pub(crate) fn from_parts(parts: EditorParts) -> Self {
        let state = parts.reducer.initial_state();
        let mut editor = Self {
            component: parts.component,
            config: parts.config,
            registry: parts.registry,
            codec: parts.codec,
            reducer: parts.reducer,
            resolver: parts.resolver,
            outline: parts.outline,
            sink: parts.sink,
            fields: Vec::new(),
            state,
        };
        editor.refresh_fields();
        editor
    }

    /// Code of the component being edited
    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<OperatorRegistry> {
        &self.registry
    }

    /// Fields the component may reference, in display order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, code: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.code == code)
    }

    /// Operators applicable to a field; empty for an unknown code
    pub fn operators_for_field(&self, code: &str) -> Vec<&Operator> {
        self.field(code)
            .map(|field| field.operators(&self.registry))
            .unwrap_or_default()
    }

    pub fn tree(&self) -> &Group {
        &self.state.tree
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.state.is_dirty
    }

    /// Apply an edit.
    ///
    /// With autosave enabled, a change that leaves the tree dirty is
    /// persisted right away.
    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        if let Some(id) = action.rule_id() {
            if self.state.tree.rule(id).is_none() {
                tracing::warn!(
                    "Ignoring {} on unknown rule {} in component {}",
                    action.name(),
                    id,
                    self.component
                );
                return Ok(());
            }
        }

        tracing::debug!("Dispatching {} on component {}", action.name(), self.component);
        let next = self.reducer.reduce(&self.state, action);
        self.commit(next)
    }

    /// Append an empty rule and return its id
    pub fn add_rule(&mut self) -> Result<String> {
        tracing::debug!("Dispatching add_rule on component {}", self.component);
        let (next, id) = self.reducer.append_rule(&self.state);
        self.commit(next)?;
        Ok(id)
    }

    /// Install the next state, autosaving when it changed and is dirty
    fn commit(&mut self, next: EditorState) -> Result<()> {
        let changed = next != self.state;
        self.state = next;

        if changed && self.state.is_dirty && self.config.autosave && self.sink.is_some() {
            self.persist()?;
        }
        Ok(())
    }

    /// Set a rule's field together with the field's default operator
    pub fn select_field(&mut self, id: &str, code: &str) -> Result<()> {
        let operator = self
            .field(code)
            .map(|field| field.default_operator)
            .ok_or_else(|| EditorError::UnknownField(code.to_string()))?;

        self.dispatch(Action::SetFieldWithDefaults {
            id: id.to_string(),
            field: code.to_string(),
            operator,
            value: None,
        })
    }

    /// Replace the tree with a stored expression; the result is clean
    pub fn load(&mut self, expression: Option<&Value>) -> Result<()> {
        let tree = self.codec.decode(expression);
        tracing::info!(
            "Loaded {} rule(s) for component {}",
            tree.len(),
            self.component
        );
        self.dispatch(Action::Load { tree })
    }

    /// Replace the tree with a stored expression given as JSON text
    pub fn load_str(&mut self, text: &str) -> Result<()> {
        let tree = self.codec.decode_str(text)?;
        self.dispatch(Action::Load { tree })
    }

    /// Encoded expression of the current tree
    pub fn expression(&self) -> Option<Value> {
        self.codec.encode(&self.state.tree)
    }

    /// Encoded expression as JSON text (`null` for an empty tree)
    pub fn expression_string(&self) -> Result<String> {
        Ok(self.codec.encode_to_string(&self.state.tree)?)
    }

    /// Hand the encoded expression to the sink and mark the state clean.
    ///
    /// Without a sink the expression is only returned.
    pub fn persist(&mut self) -> Result<Option<Value>> {
        let expression = self.expression();
        let Some(sink) = &self.sink else {
            return Ok(expression);
        };

        sink.persist(&self.component, expression.as_ref())
            .map_err(|e| EditorError::PersistenceError(e.to_string()))?;
        tracing::debug!("Persisted logic of component {}", self.component);

        self.state = self.reducer.reduce(&self.state, Action::MarkPersisted);
        Ok(expression)
    }

    /// Completeness of every rule, in tree order
    pub fn rule_statuses(&self) -> Vec<(String, RuleStatus)> {
        tree_statuses(&self.state.tree, &self.fields, &self.registry)
    }

    /// Swap in a changed outline and re-resolve the fields
    pub fn set_outline(&mut self, outline: Arc<dyn SurveyOutline>) {
        self.outline = outline;
        self.refresh_fields();
    }

    /// Re-resolve the fields from the outline
    pub fn refresh_fields(&mut self) {
        self.fields = self.resolver.resolve_fields(
            self.outline.as_ref(),
            &self.component,
            &self.config.main_lang,
            &self.config.languages,
        );
        tracing::debug!(
            "Resolved {} field(s) for component {}",
            self.fields.len(),
            self.component
        );
    }
}

impl std::fmt::Debug for LogicEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogicEditor")
            .field("component", &self.component)
            .field("fields", &self.fields.len())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
