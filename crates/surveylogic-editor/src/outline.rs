//! Survey outline
//!
//! The editor does not own the survey: it reads components through the
//! [`SurveyOutline`] trait. [`OutlineIndex`] is an in-memory implementation
//! built from a flat component list.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Kind of survey component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// Group / page
    Group,

    // Text-like questions
    Text,
    Paragraph,
    Email,
    Barcode,
    Autocomplete,

    Number,

    // Single choice
    SingleChoice,
    IconSingleChoice,
    ImageSingleChoice,
    Nps,

    // Multiple choice
    MultipleChoice,
    IconMultipleChoice,
    ImageMultipleChoice,

    Date,
    Time,
    DateTime,

    // File-like
    FileUpload,
    Signature,
    PhotoCapture,
    VideoCapture,
    AudioCapture,

    // Composite questions
    /// One single-choice answer per row, columns are the choices
    SingleChoiceArray,
    /// Several choices per row, columns are the choices
    MultipleChoiceArray,
    /// One rank per answer
    Ranking,
    /// One text input per row
    MultipleText,

    // Sub-components
    Answer,
    Row,
    Column,
}

impl ComponentKind {
    /// Returns true for answers, rows and columns
    pub fn is_sub_component(&self) -> bool {
        matches!(self, ComponentKind::Answer | ComponentKind::Row | ComponentKind::Column)
    }

    /// Returns true for questions (everything that is neither a group nor a sub-component)
    pub fn is_question(&self) -> bool {
        !self.is_sub_component() && *self != ComponentKind::Group
    }
}

/// Structural role of an answer choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceRole {
    #[default]
    Regular,
    /// "Select all"
    All,
    /// "None of the above"
    None,
    /// "Other", with a free-text input
    Other,
}

/// A survey component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub code: String,

    pub kind: ComponentKind,

    /// Code of the parent component (group for questions, question for sub-components)
    #[serde(default)]
    pub parent: Option<String>,

    /// Position within the parent
    #[serde(default)]
    pub order: usize,

    #[serde(default)]
    pub role: ChoiceRole,

    /// Localized label content (may contain markup), by language code
    #[serde(default)]
    pub content: HashMap<String, String>,
}

impl Component {
    /// Create a new component
    pub fn new(code: impl Into<String>, kind: ComponentKind) -> Self {
        Self {
            code: code.into(),
            kind,
            parent: None,
            order: 0,
            role: ChoiceRole::Regular,
            content: HashMap::new(),
        }
    }

    /// Set the parent and the position within it
    pub fn under(mut self, parent: impl Into<String>, order: usize) -> Self {
        self.parent = Some(parent.into());
        self.order = order;
        self
    }

    /// Set the position (for top-level components)
    pub fn at(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// Set the choice role
    pub fn with_role(mut self, role: ChoiceRole) -> Self {
        self.role = role;
        self
    }

    /// Add localized label content
    pub fn with_label(mut self, lang: impl Into<String>, label: impl Into<String>) -> Self {
        self.content.insert(lang.into(), label.into());
        self
    }

    /// Label in `lang`, if present
    pub fn label(&self, lang: &str) -> Option<&str> {
        self.content.get(lang).map(String::as_str)
    }
}

/// Read-only view of the survey component tree
pub trait SurveyOutline: Send + Sync {
    /// Look up a component by code
    fn component(&self, code: &str) -> Option<&Component>;

    /// Direct children of a component, ordered by position
    fn children(&self, code: &str) -> Vec<&Component>;

    /// Codes the given component may reference in its rules.
    ///
    /// Never contains the component itself or its descendants.
    fn accessible_dependencies(&self, code: &str) -> Vec<String>;
}

/// In-memory outline
#[derive(Debug, Clone, Default)]
pub struct OutlineIndex {
    components: HashMap<String, Component>,

    /// Component codes in insertion order
    order: Vec<String>,

    children: HashMap<String, Vec<String>>,

    /// Explicit accessible dependency lists that replace the computed default
    dependencies: HashMap<String, Vec<String>>,
}

impl OutlineIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from a flat component list
    pub fn from_components(components: impl IntoIterator<Item = Component>) -> Self {
        let mut index = Self::new();
        for component in components {
            index.insert(component);
        }
        index
    }

    /// Insert or replace a component
    pub fn insert(&mut self, component: Component) {
        let code = component.code.clone();
        if let Some(previous) = self.components.remove(&code) {
            if let Some(parent) = &previous.parent {
                if let Some(siblings) = self.children.get_mut(parent) {
                    siblings.retain(|c| c != &code);
                }
            }
        } else {
            self.order.push(code.clone());
        }

        if let Some(parent) = &component.parent {
            self.children.entry(parent.clone()).or_default().push(code.clone());
        }
        self.components.insert(code, component);
    }

    /// Replace the computed accessible dependencies of `code`
    pub fn with_dependencies(mut self, code: impl Into<String>, dependencies: Vec<String>) -> Self {
        self.dependencies.insert(code.into(), dependencies);
        self
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    fn descendants(&self, code: &str) -> HashSet<&str> {
        let mut found = HashSet::new();
        let mut stack = vec![code];
        while let Some(current) = stack.pop() {
            for child in self.children.get(current).into_iter().flatten() {
                if found.insert(child.as_str()) {
                    stack.push(child.as_str());
                }
            }
        }
        found
    }
}

impl SurveyOutline for OutlineIndex {
    fn component(&self, code: &str) -> Option<&Component> {
        self.components.get(code)
    }

    fn children(&self, code: &str) -> Vec<&Component> {
        let mut children: Vec<&Component> = self
            .children
            .get(code)
            .into_iter()
            .flatten()
            .filter_map(|c| self.components.get(c))
            .collect();
        children.sort_by_key(|c| c.order);
        children
    }

    fn accessible_dependencies(&self, code: &str) -> Vec<String> {
        let excluded = self.descendants(code);
        let candidates: Vec<String> = match self.dependencies.get(code) {
            Some(explicit) => explicit.clone(),
            None => self
                .order
                .iter()
                .filter(|c| {
                    self.components
                        .get(c.as_str())
                        .is_some_and(|component| !component.kind.is_sub_component())
                })
                .cloned()
                .collect(),
        };

        candidates
            .into_iter()
            .filter(|c| c != code && !excluded.contains(c.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outline() -> OutlineIndex {
        OutlineIndex::from_components(vec![
            Component::new("G1", ComponentKind::Group).at(0),
            Component::new("Q1", ComponentKind::Text).under("G1", 0),
            Component::new("Q2", ComponentKind::SingleChoice).under("G1", 1),
            Component::new("A2", ComponentKind::Answer).under("Q2", 1),
            Component::new("A1", ComponentKind::Answer).under("Q2", 0),
            Component::new("G2", ComponentKind::Group).at(1),
            Component::new("Q3", ComponentKind::Number).under("G2", 0),
        ])
    }

    #[test]
    fn test_children_are_ordered() {
        let outline = outline();
        let codes: Vec<_> = outline.children("Q2").iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["A1", "A2"]);
        assert!(outline.children("Q1").is_empty());
    }

    #[test]
    fn test_accessible_excludes_self_and_descendants() {
        let outline = outline();

        let for_question = outline.accessible_dependencies("Q3");
        assert_eq!(for_question, vec!["G1", "Q1", "Q2", "G2"]);

        let for_group = outline.accessible_dependencies("G1");
        assert_eq!(for_group, vec!["G2", "Q3"]);
    }

    #[test]
    fn test_explicit_dependencies_still_exclude_self() {
        let outline =
            outline().with_dependencies("Q3", vec!["Q1".into(), "Q3".into(), "G2".into()]);
        assert_eq!(outline.accessible_dependencies("Q3"), vec!["Q1", "G2"]);
    }

    #[test]
    fn test_insert_replaces_component() {
        let mut outline = outline();
        outline.insert(Component::new("Q1", ComponentKind::Number).under("G2", 1));

        assert_eq!(outline.len(), 7);
        assert_eq!(outline.component("Q1").unwrap().kind, ComponentKind::Number);
        let g1: Vec<_> = outline.children("G1").iter().map(|c| c.code.as_str()).collect();
        assert_eq!(g1, vec!["Q2"]);
        let g2: Vec<_> = outline.children("G2").iter().map(|c| c.code.as_str()).collect();
        assert_eq!(g2, vec!["Q3", "Q1"]);
    }

    #[test]
    fn test_component_deserializes_with_defaults() {
        let component: Component = serde_json::from_value(serde_json::json!({
            "code": "Q1",
            "kind": "multiple_choice",
            "content": {"en": "<b>Pick</b>"}
        }))
        .unwrap();

        assert_eq!(component.kind, ComponentKind::MultipleChoice);
        assert_eq!(component.role, ChoiceRole::Regular);
        assert_eq!(component.label("en"), Some("<b>Pick</b>"));
        assert!(component.parent.is_none());
    }
}
