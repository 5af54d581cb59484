//! Semantic field types
//!
//! The field type of a rule target decides which operators may be used with it.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Field type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Free text
    Text,

    /// Numeric input
    Number,

    /// Single choice
    Select,

    /// Multiple choice
    Multiselect,

    Date,

    Time,

    Datetime,

    /// Uploads, signatures and captures
    File,

    /// Group or page
    Group,

    /// Survey delivery mode (system field)
    SurveyMode,

    /// Survey language (system field)
    SurveyLang,
}

impl FieldType {
    /// Every field type, in declaration order
    pub const ALL: [FieldType; 11] = [
        FieldType::Text,
        FieldType::Number,
        FieldType::Select,
        FieldType::Multiselect,
        FieldType::Date,
        FieldType::Time,
        FieldType::Datetime,
        FieldType::File,
        FieldType::Group,
        FieldType::SurveyMode,
        FieldType::SurveyLang,
    ];

    /// Field types derived from survey components (everything but the system fields)
    pub const COMPONENT: [FieldType; 9] = [
        FieldType::Text,
        FieldType::Number,
        FieldType::Select,
        FieldType::Multiselect,
        FieldType::Date,
        FieldType::Time,
        FieldType::Datetime,
        FieldType::File,
        FieldType::Group,
    ];

    /// Wire/serde name of this type
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Select => "select",
            FieldType::Multiselect => "multiselect",
            FieldType::Date => "date",
            FieldType::Time => "time",
            FieldType::Datetime => "datetime",
            FieldType::File => "file",
            FieldType::Group => "group",
            FieldType::SurveyMode => "survey_mode",
            FieldType::SurveyLang => "survey_lang",
        }
    }

    /// Returns true for the fields that do not come from a survey component
    pub fn is_system(&self) -> bool {
        matches!(self, FieldType::SurveyMode | FieldType::SurveyLang)
    }

    /// Returns true if fields of this type carry a list of options
    pub fn has_options(&self) -> bool {
        matches!(
            self,
            FieldType::Select
                | FieldType::Multiselect
                | FieldType::SurveyMode
                | FieldType::SurveyLang
        )
    }

    /// Returns true for date, time and datetime
    pub fn is_temporal(&self) -> bool {
        matches!(self, FieldType::Date | FieldType::Time | FieldType::Datetime)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::UnknownFieldType(s.to_string()))
    }
}
