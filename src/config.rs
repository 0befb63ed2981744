//! Workspace configuration
//!
//! A [`WorkspaceConfig`] is built once before a build starts and only ever
//! read afterwards. Each user-facing value has a default and a validation
//! pattern, described by [`ConfigField`]; validation is applied by the
//! callers collecting the values (the CLI), never by the builder.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Result, WorkspaceError};
use crate::timestamp::GenerationTimestamp;

pub const DEFAULT_INPUT_FILE: &str = "./corpus.csv";
pub const DEFAULT_OUTPUT_FILE: &str = "./output.json";
pub const DEFAULT_WORKSPACE_ID: &str = "fede7b10-f035-44d8-9fcd-80cddbcf08db";
pub const DEFAULT_WORKSPACE_NAME: &str = "Workspace Test Name";
pub const DEFAULT_WORKSPACE_DESCRIPTION: &str = "Workspace Test Description";
pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_FALLBACK: &str = "I do not understand what you are asking.";
pub const DEFAULT_INTENT_PREFIX: &str = "my_intent";

/// A user-supplied configuration value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    InputFile,
    OutputFile,
    WorkspaceId,
    WorkspaceName,
    Description,
    Language,
    Fallback,
    IntentPrefix,
}

impl ConfigField {
    pub const ALL: [ConfigField; 8] = [
        ConfigField::InputFile,
        ConfigField::OutputFile,
        ConfigField::WorkspaceId,
        ConfigField::WorkspaceName,
        ConfigField::Description,
        ConfigField::Language,
        ConfigField::Fallback,
        ConfigField::IntentPrefix,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ConfigField::InputFile => "input file",
            ConfigField::OutputFile => "output file",
            ConfigField::WorkspaceId => "workspace id",
            ConfigField::WorkspaceName => "workspace name",
            ConfigField::Description => "workspace description",
            ConfigField::Language => "workspace language",
            ConfigField::Fallback => "fallback response",
            ConfigField::IntentPrefix => "intent prefix",
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            ConfigField::InputFile => "Enter the File Input (CSV Corpus)",
            ConfigField::OutputFile => "Enter the File Output (JSON Workspace)",
            ConfigField::WorkspaceId => "Enter the Workspace ID",
            ConfigField::WorkspaceName => "Enter the Workspace Name",
            ConfigField::Description => "Enter the Workspace Description",
            ConfigField::Language => "Enter the Workspace Language",
            ConfigField::Fallback => "Enter the Workspace misunderstood response",
            ConfigField::IntentPrefix => "Enter the Workspace Intent prefix",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ConfigField::InputFile => "CSV file name must be a valid file name.",
            ConfigField::OutputFile => "JSON file name must be a valid file name.",
            ConfigField::WorkspaceId => "Workspace ID must be only letters, numbers or dashes.",
            ConfigField::WorkspaceName => "Workspace Name must be only letters, numbers or spaces.",
            ConfigField::Description => {
                "Workspace Description must be only letters, numbers or spaces."
            }
            ConfigField::Language => "Workspace Language must be 2 character language code.",
            ConfigField::Fallback => "Enter a valid response.",
            ConfigField::IntentPrefix => {
                "Workspace Intent prefix must be letters, numbers or underscore."
            }
        }
    }

    pub fn default_value(self) -> &'static str {
        match self {
            ConfigField::InputFile => DEFAULT_INPUT_FILE,
            ConfigField::OutputFile => DEFAULT_OUTPUT_FILE,
            ConfigField::WorkspaceId => DEFAULT_WORKSPACE_ID,
            ConfigField::WorkspaceName => DEFAULT_WORKSPACE_NAME,
            ConfigField::Description => DEFAULT_WORKSPACE_DESCRIPTION,
            ConfigField::Language => DEFAULT_LANGUAGE,
            ConfigField::Fallback => DEFAULT_FALLBACK,
            ConfigField::IntentPrefix => DEFAULT_INTENT_PREFIX,
        }
    }

    pub fn pattern(self) -> &'static Regex {
        &patterns()[self as usize]
    }

    pub fn is_valid(self, value: &str) -> bool {
        self.pattern().is_match(value)
    }

    pub fn validate(self, value: &str) -> Result<()> {
        if self.is_valid(value) {
            Ok(())
        } else {
            Err(WorkspaceError::InvalidConfig {
                field: self.key(),
                value: value.to_string(),
                message: self.message(),
            })
        }
    }
}

// Indexed by `ConfigField as usize`
fn patterns() -> &'static [Regex; 8] {
    static PATTERNS: OnceLock<[Regex; 8]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        // Constant patterns, these should never fail
        [
            r"^[a-zA-Z0-9_./]+$",
            r"^[a-zA-Z0-9_./]+$",
            r"^[a-zA-Z0-9-]+$",
            r"^[a-zA-Z0-9\s]+$",
            r"^[a-zA-Z0-9\s]+$",
            r"^[a-z]{2}$",
            r"^[a-zA-Z0-9\s\\.?!]+$",
            r"^[a-zA-Z0-9_]+$",
        ]
        .map(|pattern| Regex::new(pattern).expect("Invalid regex pattern"))
    })
}

/// Immutable settings for one workspace build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceConfig {
    workspace_id: String,
    name: String,
    description: String,
    language: String,
    fallback: String,
    intent_prefix: String,
    generated: GenerationTimestamp,
}

impl WorkspaceConfig {
    /// Defaults for every field, stamped with the given generation time
    pub fn with_timestamp(generated: GenerationTimestamp) -> Self {
        Self {
            workspace_id: DEFAULT_WORKSPACE_ID.to_string(),
            name: DEFAULT_WORKSPACE_NAME.to_string(),
            description: DEFAULT_WORKSPACE_DESCRIPTION.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            fallback: DEFAULT_FALLBACK.to_string(),
            intent_prefix: DEFAULT_INTENT_PREFIX.to_string(),
            generated,
        }
    }

    pub fn with_workspace_id(self, workspace_id: impl Into<String>) -> Self {
        Self {
            workspace_id: workspace_id.into(),
            ..self
        }
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..self
        }
    }

    pub fn with_language(self, language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..self
        }
    }

    pub fn with_fallback(self, fallback: impl Into<String>) -> Self {
        Self {
            fallback: fallback.into(),
            ..self
        }
    }

    pub fn with_intent_prefix(self, intent_prefix: impl Into<String>) -> Self {
        Self {
            intent_prefix: intent_prefix.into(),
            ..self
        }
    }

    pub fn workspace_id(&self) -> &str {
        &self.workspace_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn intent_prefix(&self) -> &str {
        &self.intent_prefix
    }

    pub fn generated(&self) -> GenerationTimestamp {
        self.generated
    }

    /// Check every workspace field against its pattern
    pub fn validate(&self) -> Result<()> {
        ConfigField::WorkspaceId.validate(&self.workspace_id)?;
        ConfigField::WorkspaceName.validate(&self.name)?;
        ConfigField::Description.validate(&self.description)?;
        ConfigField::Language.validate(&self.language)?;
        ConfigField::Fallback.validate(&self.fallback)?;
        ConfigField::IntentPrefix.validate(&self.intent_prefix)?;
        Ok(())
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self::with_timestamp(GenerationTimestamp::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        for field in ConfigField::ALL {
            assert!(field.is_valid(field.default_value()), "{:?}", field);
        }
        assert!(WorkspaceConfig::default().validate().is_ok());
    }

    #[test]
    fn test_language_must_be_two_letters() {
        assert!(ConfigField::Language.is_valid("fr"));
        assert!(!ConfigField::Language.is_valid("fra"));
        assert!(!ConfigField::Language.is_valid("EN"));
    }

    #[test]
    fn test_invalid_prefix_rejected() {
        let config = WorkspaceConfig::default().with_intent_prefix("bad prefix");
        match config.validate() {
            Err(WorkspaceError::InvalidConfig { field, value, .. }) => {
                assert_eq!(field, "intent prefix");
                assert_eq!(value, "bad prefix");
            }
            other => panic!("Expected invalid config, got {:?}", other),
        }
    }

    #[test]
    fn test_setters_keep_timestamp() {
        let ts = GenerationTimestamp::from_millis(1_488_363_330_123).unwrap();
        let config = WorkspaceConfig::with_timestamp(ts)
            .with_name("Weather Bot")
            .with_fallback("Sorry?");

        assert_eq!(config.name(), "Weather Bot");
        assert_eq!(config.fallback(), "Sorry?");
        assert_eq!(config.workspace_id(), DEFAULT_WORKSPACE_ID);
        assert_eq!(config.generated(), ts);
    }
}
