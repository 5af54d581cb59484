//! Builder pattern for LogicEditor

use crate::config::EditorConfig;
use crate::editor::{EditorParts, LogicEditor};
use crate::error::{EditorError, Result};
use crate::fields::FieldResolver;
use crate::outline::SurveyOutline;
use crate::persistence::PersistenceSink;
use crate::state::RuleTreeReducer;
use std::path::Path;
use std::sync::Arc;
use surveylogic_codec::{DiagnosticSink, ExpressionCodec, LogSink};
use surveylogic_core::{
    FieldType, IdSource, Operator, OperatorKey, OperatorRegistry, UuidIds, Value,
};

/// Builder for LogicEditor
///
/// # Example
///
/// ```rust,ignore
/// use surveylogic_editor::{LogicEditorBuilder, MemorySink, OutlineIndex};
///
/// let editor = LogicEditorBuilder::new()
///     .with_outline(Arc::new(outline))
///     .for_component("Q3")
///     .with_sink(Arc::new(MemorySink::new()))
///     .with_expression(stored)
///     .build()?;
/// ```
#[derive(Default)]
pub struct LogicEditorBuilder {
    config: EditorConfig,
    registry: Option<Arc<OperatorRegistry>>,
    outline: Option<Arc<dyn SurveyOutline>>,
    component: Option<String>,
    sink: Option<Arc<dyn PersistenceSink>>,
    diagnostics: Option<Arc<dyn DiagnosticSink>>,
    ids: Option<Arc<dyn IdSource>>,
    expression: Option<Value>,
}

impl LogicEditorBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    /// Load the configuration from a YAML file
    pub fn with_config_file(mut self, path: impl AsRef<Path>) -> Result<Self> {
        self.config = EditorConfig::from_file(path)?;
        Ok(self)
    }

    /// Use a custom operator catalog instead of the built-in one
    pub fn with_registry(mut self, registry: Arc<OperatorRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Build the operator catalog from custom definitions.
    ///
    /// Fails when two operators share a key or a wire name.
    pub fn with_operators(
        mut self,
        operators: Vec<Operator>,
        preferences: Vec<(FieldType, OperatorKey)>,
    ) -> Result<Self> {
        let registry = OperatorRegistry::from_operators(operators, preferences)?;
        self.registry = Some(Arc::new(registry));
        Ok(self)
    }

    pub fn with_outline(mut self, outline: Arc<dyn SurveyOutline>) -> Self {
        self.outline = Some(outline);
        self
    }

    /// Component whose logic is edited
    pub fn for_component(mut self, code: impl Into<String>) -> Self {
        self.component = Some(code.into());
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn PersistenceSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Receiver of decode diagnostics (defaults to the log)
    pub fn with_diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = Some(sink);
        self
    }

    pub fn with_ids(mut self, ids: Arc<dyn IdSource>) -> Self {
        self.ids = Some(ids);
        self
    }

    /// Stored expression to start from
    pub fn with_expression(mut self, expression: Option<Value>) -> Self {
        self.expression = expression;
        self
    }

    /// Build the editor
    pub fn build(self) -> Result<LogicEditor> {
        self.config.validate()?;

        let outline = self
            .outline
            .ok_or_else(|| EditorError::ConfigError("survey outline is required".to_string()))?;
        let component = self
            .component
            .ok_or_else(|| EditorError::ConfigError("component code is required".to_string()))?;
        if outline.component(&component).is_none() {
            return Err(EditorError::UnknownComponent(component));
        }

        let registry = self
            .registry
            .unwrap_or_else(|| Arc::new(OperatorRegistry::new()));
        let ids: Arc<dyn IdSource> = self.ids.unwrap_or_else(|| Arc::new(UuidIds));
        let diagnostics: Arc<dyn DiagnosticSink> =
            self.diagnostics.unwrap_or_else(|| Arc::new(LogSink));

        let codec = ExpressionCodec::with_registry(registry.clone())
            .with_sink(diagnostics)
            .with_ids(ids.clone())
            .with_options(self.config.decode);
        let reducer = RuleTreeReducer::new(registry.clone(), ids);
        let resolver = FieldResolver::new(registry.clone())
            .with_survey_modes(self.config.survey_modes.clone());

        tracing::info!("Building logic editor for component {}", component);

        let mut editor = LogicEditor::from_parts(EditorParts {
            component,
            config: self.config,
            registry,
            codec,
            reducer,
            resolver,
            outline,
            sink: self.sink,
        });
        if self.expression.is_some() {
            editor.load(self.expression.as_ref())?;
        }
        Ok(editor)
    }
}
