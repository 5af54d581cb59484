//! Root group of a rule tree

use super::rule::Rule;
use crate::operator::OperatorRegistry;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Boolean combinator joining sibling rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Conjunction {
    #[default]
    And,
    Or,
}

impl Conjunction {
    /// Key used in the wire expression
    pub fn as_str(&self) -> &'static str {
        match self {
            Conjunction::And => "and",
            Conjunction::Or => "or",
        }
    }

    /// Parse a wire key, returning `None` for anything but `and`/`or`
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "and" => Some(Conjunction::And),
            "or" => Some(Conjunction::Or),
            _ => None,
        }
    }
}

impl fmt::Display for Conjunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root of a rule tree: a conjunction over a flat list of rules.
///
/// The conjunction is meaningless when fewer than two rules are valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,

    pub conjunction: Conjunction,

    pub children: Vec<Rule>,
}

impl Group {
    /// Create an empty `and` group
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            conjunction: Conjunction::And,
            children: Vec::new(),
        }
    }

    /// Set the conjunction
    pub fn with_conjunction(mut self, conjunction: Conjunction) -> Self {
        self.conjunction = conjunction;
        self
    }

    /// Add a rule
    pub fn add_rule(mut self, rule: Rule) -> Self {
        self.children.push(rule);
        self
    }

    /// Find a rule by id
    pub fn rule(&self, id: &str) -> Option<&Rule> {
        self.children.iter().find(|r| r.id == id)
    }

    /// Find a rule by id, mutably
    pub fn rule_mut(&mut self, id: &str) -> Option<&mut Rule> {
        self.children.iter_mut().find(|r| r.id == id)
    }

    /// Remove a rule by id, returning it if it existed
    pub fn remove_rule(&mut self, id: &str) -> Option<Rule> {
        let pos = self.children.iter().position(|r| r.id == id)?;
        Some(self.children.remove(pos))
    }

    /// Rules that can be serialized, in order
    pub fn valid_rules<'a>(
        &'a self,
        registry: &'a OperatorRegistry,
    ) -> impl Iterator<Item = &'a Rule> + 'a {
        self.children.iter().filter(move |r| r.is_valid(registry))
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::OperatorKey;
    use serde_json::json;

    #[test]
    fn test_conjunction_keys() {
        assert_eq!(Conjunction::from_key("and"), Some(Conjunction::And));
        assert_eq!(Conjunction::from_key("or"), Some(Conjunction::Or));
        assert_eq!(Conjunction::from_key("AND"), None);
        assert_eq!(Conjunction::Or.to_string(), "or");
        assert_eq!(Conjunction::default(), Conjunction::And);
    }

    #[test]
    fn test_group_rule_access() {
        let mut group = Group::new("g")
            .add_rule(Rule::new("r1").with_field("Q1"))
            .add_rule(Rule::new("r2").with_field("Q2"));

        assert_eq!(group.len(), 2);
        assert_eq!(group.rule("r2").unwrap().field.as_deref(), Some("Q2"));

        group.rule_mut("r1").unwrap().operator = Some(OperatorKey::IsEmpty);
        assert_eq!(group.rule("r1").unwrap().operator, Some(OperatorKey::IsEmpty));

        let removed = group.remove_rule("r1").unwrap();
        assert_eq!(removed.id, "r1");
        assert!(group.remove_rule("r1").is_none());
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn test_valid_rules_keeps_order() {
        let registry = OperatorRegistry::new();
        let group = Group::new("g")
            .add_rule(Rule::new("r1").with_field("Q1").with_operator(OperatorKey::IsEmpty))
            .add_rule(Rule::new("r2").with_field("Q2"))
            .add_rule(
                Rule::new("r3")
                    .with_field("Q3")
                    .with_operator(OperatorKey::Equal)
                    .with_value(json!(3)),
            );

        let ids: Vec<_> = group.valid_rules(&registry).map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "r3"]);
    }

    #[test]
    fn test_group_serde() {
        let group = Group::new("g").with_conjunction(Conjunction::Or);
        let json = serde_json::to_value(&group).unwrap();
        assert_eq!(json["conjunction"], json!("or"));

        let back: Group = serde_json::from_value(json).unwrap();
        assert_eq!(back, group);
    }
}
