//! Editor configuration
//!
//! Loaded from YAML or built in code:
//!
//! ```yaml
//! main_lang: en
//! languages:
//!   - code: en
//!     name: English
//!   - code: fr
//!     name: Français
//! survey_modes:
//!   - value: online
//!     label: Online
//! decode:
//!   wrap_legacy_scalars: true
//! autosave: true
//! ```

use crate::error::{EditorError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use surveylogic_codec::DecodeOptions;
use surveylogic_core::FieldOption;

/// A configured survey language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    pub name: String,
}

impl Language {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Main editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Language used for field labels
    #[serde(default = "default_main_lang")]
    pub main_lang: String,

    /// Survey languages, offered as options of the survey language field
    #[serde(default)]
    pub languages: Vec<Language>,

    /// Delivery modes, offered as options of the survey mode field
    #[serde(default = "default_survey_modes")]
    pub survey_modes: Vec<FieldOption>,

    #[serde(default)]
    pub decode: DecodeOptions,

    /// Persist after every change that leaves the tree dirty
    #[serde(default = "default_autosave")]
    pub autosave: bool,
}

fn default_main_lang() -> String {
    "en".to_string()
}

fn default_survey_modes() -> Vec<FieldOption> {
    vec![
        FieldOption::new("online", "Online"),
        FieldOption::new("offline", "Offline"),
    ]
}

fn default_autosave() -> bool {
    true
}

impl EditorConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self {
            main_lang: default_main_lang(),
            languages: Vec::new(),
            survey_modes: default_survey_modes(),
            decode: DecodeOptions::default(),
            autosave: default_autosave(),
        }
    }

    /// Parse a YAML configuration
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Check invariants serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.main_lang.trim().is_empty() {
            return Err(EditorError::ConfigError("main_lang must not be empty".to_string()));
        }
        if !self.languages.is_empty() && !self.languages.iter().any(|l| l.code == self.main_lang) {
            return Err(EditorError::ConfigError(format!(
                "main_lang '{}' is not among the configured languages",
                self.main_lang
            )));
        }
        Ok(())
    }

    /// Set the main language
    pub fn with_main_lang(mut self, lang: impl Into<String>) -> Self {
        self.main_lang = lang.into();
        self
    }

    /// Add a language
    pub fn add_language(mut self, language: Language) -> Self {
        self.languages.push(language);
        self
    }

    /// Set the survey modes
    pub fn with_survey_modes(mut self, modes: Vec<FieldOption>) -> Self {
        self.survey_modes = modes;
        self
    }

    /// Set decode options
    pub fn with_decode_options(mut self, options: DecodeOptions) -> Self {
        self.decode = options;
        self
    }

    /// Enable or disable autosave
    pub fn autosave(mut self, enable: bool) -> Self {
        self.autosave = enable;
        self
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_builder() {
        let config = EditorConfig::new()
            .with_main_lang("fr")
            .add_language(Language::new("fr", "Français"))
            .autosave(false);

        assert_eq!(config.main_lang, "fr");
        assert_eq!(config.languages.len(), 1);
        assert!(!config.autosave);
        assert!(config.decode.wrap_legacy_scalars);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_yaml_defaults() {
        let config = EditorConfig::from_yaml_str("languages: []\n").unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = r#"
main_lang: de
languages:
  - code: de
    name: Deutsch
  - code: en
    name: English
survey_modes:
  - value: kiosk
    label: Kiosk
decode:
  wrap_legacy_scalars: false
autosave: false
"#;
        let config = EditorConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.main_lang, "de");
        assert_eq!(config.languages[1], Language::new("en", "English"));
        assert_eq!(config.survey_modes, vec![FieldOption::new("kiosk", "Kiosk")]);
        assert!(!config.decode.wrap_legacy_scalars);
        assert!(!config.autosave);
    }

    #[test]
    fn test_config_rejects_unknown_main_lang() {
        let yaml = "main_lang: it\nlanguages:\n  - code: en\n    name: English\n";
        let err = EditorConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, EditorError::ConfigError(_)));
    }

    #[test]
    fn test_config_rejects_bad_yaml() {
        let err = EditorConfig::from_yaml_str("languages: [").unwrap_err();
        assert!(matches!(err, EditorError::YamlError(_)));
    }

    #[test]
    fn test_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "main_lang: en\nautosave: false").unwrap();

        let config = EditorConfig::from_file(file.path()).unwrap();
        assert!(!config.autosave);

        let missing = EditorConfig::from_file("/nonexistent/editor.yaml").unwrap_err();
        assert!(matches!(missing, EditorError::IoError(_)));
    }
}
