//! Shared fixtures for the editor integration tests

#![allow(dead_code)]

use std::sync::Arc;
use surveylogic_core::SequentialIds;
use surveylogic_editor::{
    ChoiceRole, Component, ComponentKind, EditorConfig, Language, LogicEditorBuilder,
    OutlineIndex,
};

/// Three groups; the last question of the third group is the one being edited.
///
/// Components are inserted out of display order on purpose.
pub fn sample_outline() -> OutlineIndex {
    use ComponentKind::*;

    OutlineIndex::from_components(vec![
        Component::new("G2", Group).at(1).with_label("en", "Extras"),
        Component::new("Q4", SingleChoiceArray).under("G2", 0).with_label("en", "Rate"),
        Component::new("R1", Row).under("Q4", 0).with_label("en", "Food"),
        Component::new("R2", Row).under("Q4", 1).with_label("en", "Service"),
        Component::new("C1", Column).under("Q4", 0).with_label("en", "Good"),
        Component::new("C2", Column).under("Q4", 1).with_label("en", "Bad"),
        Component::new("Q5", Ranking).under("G2", 1).with_label("en", "Rank"),
        Component::new("I1", Answer).under("Q5", 0).with_label("en", "X"),
        Component::new("I2", Answer).under("Q5", 1).with_label("en", "Y"),
        Component::new("Q6", MultipleText).under("G2", 2).with_label("en", "Notes"),
        Component::new("T1", Row).under("Q6", 0).with_label("en", "First"),
        Component::new("T2", Row).under("Q6", 1).with_label("en", "Second"),
        Component::new("Q7", FileUpload).under("G2", 3).with_label("en", "Photo"),
        Component::new("Q9", Date).under("G2", 4).with_label("en", "Visit day"),
        Component::new("Q10", Time).under("G2", 5).with_label("en", "Visit hour"),
        Component::new("Q11", DateTime).under("G2", 6).with_label("en", "Next call"),
        Component::new("Q12", MultipleChoice).under("G2", 7).with_label("en", "Pets"),
        Component::new("M1", Answer).under("Q12", 0).with_label("en", "Cat"),
        Component::new("M2", Answer).under("Q12", 1).with_label("en", "Dog"),
        Component::new("M3", Answer)
            .under("Q12", 2)
            .with_role(ChoiceRole::All)
            .with_label("en", "All of them"),
        Component::new("Q13", IconMultipleChoice).under("G2", 8),
        Component::new("Q14", ImageMultipleChoice).under("G2", 9),
        Component::new("Q15", MultipleChoiceArray).under("G2", 10).with_label("en", "Channels"),
        Component::new("MR1", Row).under("Q15", 0).with_label("en", "Home"),
        Component::new("MR2", Row).under("Q15", 1).with_label("en", "Work"),
        Component::new("MC1", Column).under("Q15", 0).with_label("en", "Phone"),
        Component::new("MC2", Column).under("Q15", 1).with_label("en", "Mail"),
        Component::new("Q16", Signature).under("G2", 11),
        Component::new("Q17", PhotoCapture).under("G2", 12),
        Component::new("Q18", VideoCapture).under("G2", 13),
        Component::new("Q19", AudioCapture).under("G2", 14),
        Component::new("G1", Group)
            .at(0)
            .with_label("en", "<p>About <b>you</b></p>")
            .with_label("fr", "À propos de vous"),
        Component::new("Q1", Text).under("G1", 0).with_label("en", "Name"),
        Component::new("Q2", SingleChoice).under("G1", 1).with_label("en", "Colour"),
        Component::new("A1", Answer).under("Q2", 0).with_label("en", "Red"),
        Component::new("A2", Answer).under("Q2", 1).with_label("en", "Blue"),
        Component::new("A3", Answer)
            .under("Q2", 2)
            .with_role(ChoiceRole::None)
            .with_label("en", "None"),
        Component::new("A4", Answer)
            .under("Q2", 3)
            .with_role(ChoiceRole::Other)
            .with_label("en", "Other"),
        Component::new("A5", Answer)
            .under("Q2", 4)
            .with_role(ChoiceRole::All)
            .with_label("en", "All"),
        Component::new("Q3", Number).under("G1", 2).with_label("en", "Age"),
        Component::new("G3", Group).at(2).with_label("en", "End"),
        Component::new("Q8", Text).under("G3", 0).with_label("en", "Comments"),
    ])
}

pub fn sample_config() -> EditorConfig {
    EditorConfig::new()
        .add_language(Language::new("en", "English"))
        .add_language(Language::new("fr", "Français"))
}

/// Builder for the logic of `Q8` with deterministic ids
pub fn builder() -> LogicEditorBuilder {
    LogicEditorBuilder::new()
        .with_config(sample_config())
        .with_outline(Arc::new(sample_outline()))
        .for_component("Q8")
        .with_ids(Arc::new(SequentialIds::new("rule")))
}
