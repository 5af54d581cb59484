//! Field resolver
//!
//! Fields come out in a fixed order: the two system fields first, then the
//! accessible components sorted by owning group position, groups before their
//! questions, then position within the parent. Composite questions expand into
//! one field per row/item, coded `<parent code><child code>`.

use super::labels::{numbered, strip_markup};
use crate::config::Language;
use crate::outline::{ChoiceRole, Component, ComponentKind, SurveyOutline};
use std::collections::HashSet;
use std::sync::Arc;
use surveylogic_core::{Field, FieldOption, FieldType, OperatorKey, OperatorRegistry};

/// Code of the survey delivery mode field
pub const SURVEY_MODE_CODE: &str = "mode";

/// Code of the survey language field
pub const SURVEY_LANG_CODE: &str = "lang";

const SYSTEM_GROUP: &str = "Survey";

/// (owning group position, 0 for groups / 1 for questions, position in parent)
type SortKey = (usize, u8, usize);

/// Where a component sits in the survey
struct Placement {
    key: SortKey,
    /// Positional prefix, e.g. `2` for a group or `2.3` for a question
    position: String,
    /// UI grouping label of the fields
    group_label: String,
}

/// Derives rule targets from the survey outline
#[derive(Debug, Clone)]
pub struct FieldResolver {
    registry: Arc<OperatorRegistry>,
    survey_modes: Vec<FieldOption>,
}

impl FieldResolver {
    pub fn new(registry: Arc<OperatorRegistry>) -> Self {
        Self {
            registry,
            survey_modes: Vec::new(),
        }
    }

    /// Set the options of the survey mode field
    pub fn with_survey_modes(mut self, modes: Vec<FieldOption>) -> Self {
        self.survey_modes = modes;
        self
    }

    /// Resolve the fields `current` may reference.
    ///
    /// Codes are unique in the result; a later duplicate is skipped.
    pub fn resolve_fields(
        &self,
        outline: &dyn SurveyOutline,
        current: &str,
        main_lang: &str,
        languages: &[Language],
    ) -> Vec<Field> {
        let mut placed: Vec<(SortKey, Vec<Field>)> = outline
            .accessible_dependencies(current)
            .iter()
            .filter_map(|code| outline.component(code))
            .filter(|component| !component.kind.is_sub_component())
            .map(|component| {
                let placement = Self::placement(outline, component, main_lang);
                let fields = self.expand(outline, component, main_lang, &placement);
                (placement.key, fields)
            })
            .collect();
        placed.sort_by_key(|(key, _)| *key);

        let mut seen = HashSet::new();
        let mut fields = self.system_fields(languages);
        for field in placed.into_iter().flat_map(|(_, fields)| fields) {
            if seen.insert(field.code.clone()) {
                fields.push(field);
            } else {
                tracing::warn!("Skipping duplicate field code: {}", field.code);
            }
        }
        fields
    }

    fn system_fields(&self, languages: &[Language]) -> Vec<Field> {
        let language_options = languages
            .iter()
            .map(|lang| FieldOption::new(&lang.code, &lang.name))
            .collect();

        [
            self.make_field(SURVEY_MODE_CODE, "Survey mode", FieldType::SurveyMode, None)
                .map(|f| f.with_options(self.survey_modes.clone())),
            self.make_field(SURVEY_LANG_CODE, "Survey language", FieldType::SurveyLang, None)
                .map(|f| f.with_options(language_options)),
        ]
        .into_iter()
        .flatten()
        .map(|f| f.with_group(SYSTEM_GROUP))
        .collect()
    }

    fn placement(outline: &dyn SurveyOutline, component: &Component, lang: &str) -> Placement {
        if component.kind == ComponentKind::Group {
            let position = (component.order + 1).to_string();
            return Placement {
                key: (component.order, 0, 0),
                group_label: numbered(&position, &text_of(component, lang)),
                position,
            };
        }

        let group = component
            .parent
            .as_deref()
            .and_then(|code| outline.component(code))
            .filter(|parent| parent.kind == ComponentKind::Group);

        match group {
            Some(group) => {
                let group_position = (group.order + 1).to_string();
                Placement {
                    key: (group.order, 1, component.order),
                    position: format!("{}.{}", group_position, component.order + 1),
                    group_label: numbered(&group_position, &text_of(group, lang)),
                }
            }
            None => Placement {
                key: (component.order, 1, 0),
                position: (component.order + 1).to_string(),
                group_label: String::new(),
            },
        }
    }

    fn expand(
        &self,
        outline: &dyn SurveyOutline,
        component: &Component,
        lang: &str,
        placement: &Placement,
    ) -> Vec<Field> {
        use ComponentKind::*;

        let code = component.code.as_str();
        let label = numbered(&placement.position, &text_of(component, lang));
        let children = outline.children(code);

        let fields = match component.kind {
            Group => self.single(code, &label, FieldType::Group),
            Text | Paragraph | Email | Barcode | Autocomplete => {
                self.single(code, &label, FieldType::Text)
            }
            Number => self.single(code, &label, FieldType::Number),
            Date => self.single(code, &label, FieldType::Date),
            Time => self.single(code, &label, FieldType::Time),
            DateTime => self.single(code, &label, FieldType::Datetime),
            FileUpload | Signature | PhotoCapture | VideoCapture | AudioCapture => {
                self.single(code, &label, FieldType::File)
            }
            SingleChoice | IconSingleChoice | ImageSingleChoice => {
                self.choice(code, &label, FieldType::Select, &children, lang)
            }
            MultipleChoice | IconMultipleChoice | ImageMultipleChoice => {
                self.choice(code, &label, FieldType::Multiselect, &children, lang)
            }
            Nps => {
                let options = (0..=10)
                    .map(|n| FieldOption::new(n.to_string(), n.to_string()))
                    .collect();
                self.make_field(code, &label, FieldType::Select, None)
                    .map(|f| f.with_options(options))
                    .into_iter()
                    .collect()
            }
            SingleChoiceArray => self.array_rows(code, &label, FieldType::Select, &children, lang),
            MultipleChoiceArray => {
                self.array_rows(code, &label, FieldType::Multiselect, &children, lang)
            }
            Ranking => self.sub_fields(
                code,
                &label,
                &children,
                ComponentKind::Answer,
                FieldType::Number,
                Some(OperatorKey::IsRelevant),
                lang,
            ),
            MultipleText => self.sub_fields(
                code,
                &label,
                &children,
                ComponentKind::Row,
                FieldType::Text,
                None,
                lang,
            ),
            Answer | Row | Column => Vec::new(),
        };

        fields
            .into_iter()
            .map(|f| f.with_group(placement.group_label.clone()))
            .collect()
    }

    fn single(&self, code: &str, label: &str, field_type: FieldType) -> Vec<Field> {
        self.make_field(code, label, field_type, None).into_iter().collect()
    }

    /// Choice question plus one text field per "other" answer
    fn choice(
        &self,
        code: &str,
        label: &str,
        field_type: FieldType,
        children: &[&Component],
        lang: &str,
    ) -> Vec<Field> {
        let options = options_of(children, ComponentKind::Answer, lang);
        let mut fields: Vec<Field> = self
            .make_field(code, label, field_type, None)
            .map(|f| f.with_options(options))
            .into_iter()
            .collect();

        let others = children
            .iter()
            .filter(|c| c.kind == ComponentKind::Answer && c.role == ChoiceRole::Other);
        for other in others {
            let sub_label = format!("{} - {}", label, text_of(other, lang));
            fields.extend(self.make_field(
                &format!("{}{}", code, other.code),
                &sub_label,
                FieldType::Text,
                None,
            ));
        }
        fields
    }

    /// One field per row, with the columns as options
    fn array_rows(
        &self,
        code: &str,
        label: &str,
        field_type: FieldType,
        children: &[&Component],
        lang: &str,
    ) -> Vec<Field> {
        let options = options_of(children, ComponentKind::Column, lang);
        children
            .iter()
            .filter(|c| c.kind == ComponentKind::Row)
            .filter_map(|row| {
                self.make_field(
                    &format!("{}{}", code, row.code),
                    &format!("{} - {}", label, text_of(row, lang)),
                    field_type,
                    None,
                )
                .map(|f| f.with_options(options.clone()))
            })
            .collect()
    }

    /// One field per child of `child_kind`
    #[allow(clippy::too_many_arguments)]
    fn sub_fields(
        &self,
        code: &str,
        label: &str,
        children: &[&Component],
        child_kind: ComponentKind,
        field_type: FieldType,
        default_operator: Option<OperatorKey>,
        lang: &str,
    ) -> Vec<Field> {
        children
            .iter()
            .filter(|c| c.kind == child_kind)
            .filter_map(|child| {
                self.make_field(
                    &format!("{}{}", code, child.code),
                    &format!("{} - {}", label, text_of(child, lang)),
                    field_type,
                    default_operator,
                )
            })
            .collect()
    }

    fn make_field(
        &self,
        code: &str,
        label: &str,
        field_type: FieldType,
        default_operator: Option<OperatorKey>,
    ) -> Option<Field> {
        let default_operator =
            default_operator.or_else(|| self.registry.default_operator_for_type(field_type));
        match default_operator {
            Some(op) => Some(Field::new(code, label, field_type, op)),
            None => {
                tracing::warn!("No operator applies to {} field {}, skipping", field_type, code);
                None
            }
        }
    }
}

/// Stripped label in `lang`, falling back to the component code
fn text_of(component: &Component, lang: &str) -> String {
    let text = component.label(lang).map(strip_markup).unwrap_or_default();
    if text.is_empty() {
        component.code.clone()
    } else {
        text
    }
}

/// Regular choices of `kind` as options; "all", "none" and "other" are structural
fn options_of(children: &[&Component], kind: ComponentKind, lang: &str) -> Vec<FieldOption> {
    children
        .iter()
        .filter(|c| c.kind == kind && c.role == ChoiceRole::Regular)
        .map(|c| FieldOption::new(&c.code, text_of(c, lang)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::OutlineIndex;

    fn resolver() -> FieldResolver {
        FieldResolver::new(Arc::new(OperatorRegistry::new()))
            .with_survey_modes(vec![FieldOption::new("online", "Online")])
    }

    #[test]
    fn test_system_fields_come_first() {
        let outline =
            OutlineIndex::from_components(vec![Component::new("Q1", ComponentKind::Text)]);
        let languages = [Language::new("en", "English"), Language::new("ar", "Arabic")];
        let fields = resolver().resolve_fields(&outline, "Q1", "en", &languages);

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].code, SURVEY_MODE_CODE);
        assert_eq!(fields[0].field_type, FieldType::SurveyMode);
        assert_eq!(fields[0].options, vec![FieldOption::new("online", "Online")]);
        assert_eq!(fields[1].code, SURVEY_LANG_CODE);
        assert_eq!(fields[1].default_operator, OperatorKey::SelectAnyIn);
        let langs: Vec<_> = fields[1].options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(langs, vec!["en", "ar"]);
    }

    #[test]
    fn test_label_falls_back_to_code() {
        let outline = OutlineIndex::from_components(vec![
            Component::new("G1", ComponentKind::Group).with_label("en", "<p></p>"),
            Component::new("Q1", ComponentKind::Email).under("G1", 0),
            Component::new("Q2", ComponentKind::Text).under("G1", 1),
        ]);
        let fields = resolver().resolve_fields(&outline, "Q2", "en", &[]);

        assert_eq!(fields[2].label, "1. G1");
        assert_eq!(fields[3].label, "1.1. Q1");
        assert_eq!(fields[3].group, "1. G1");
    }

    #[test]
    fn test_nps_options() {
        let outline = OutlineIndex::from_components(vec![
            Component::new("Q1", ComponentKind::Nps),
            Component::new("Q2", ComponentKind::Text).at(1),
        ]);
        let fields = resolver().resolve_fields(&outline, "Q2", "en", &[]);
        let nps = fields.iter().find(|f| f.code == "Q1").unwrap();

        assert_eq!(nps.field_type, FieldType::Select);
        assert_eq!(nps.options.len(), 11);
        assert_eq!(nps.options[0].value, "0");
        assert_eq!(nps.options[10].value, "10");
    }
}
