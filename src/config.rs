use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::classify::ClassifierMode;
use crate::constants::{
    CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE, DEFAULT_DROP_COLUMN, DEFAULT_OUTPUT_PREFIX,
    DEFAULT_PRIMARY_COLUMN, DEFAULT_PRIMARY_POSITION,
};
use crate::error::{CleanerError, Result};

/// Settings for one cleaning run. Every field has a default, so a config file
/// only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleanerConfig {
    /// Column holding the address-or-task text
    pub primary_column: String,
    /// Optional column checked for action items instead of the primary column
    pub name_column: Option<String>,
    pub mode: ClassifierMode,
    /// Drop rows whose normalized address was already seen
    pub dedupe: bool,
    /// Drop address rows whose action field reads as a to-do
    pub reject_action_items: bool,
    /// Column removed from the output (case-insensitive); empty keeps all columns
    pub drop_column: String,
    /// Output index for the primary column
    pub primary_position: usize,
    /// Prefix for the default output file name
    pub output_prefix: String,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            primary_column: DEFAULT_PRIMARY_COLUMN.to_string(),
            name_column: None,
            mode: ClassifierMode::default(),
            dedupe: true,
            reject_action_items: false,
            drop_column: DEFAULT_DROP_COLUMN.to_string(),
            primary_position: DEFAULT_PRIMARY_POSITION,
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
        }
    }
}

impl CleanerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CleanerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CleanerError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config = Self::from_toml_str(&content)?;
        info!(path = %path.display(), "loaded cleaner config");
        Ok(config)
    }

    /// Resolve the config source: an explicit path, then the
    /// `CSV_CLEANER_CONFIG` variable, then `cleaner.toml` in the working
    /// directory, then built-in defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                return Self::load_from(&PathBuf::from(path));
            }
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            return Self::load_from(local);
        }
        debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<()> {
        if self.primary_column.trim().is_empty() {
            return Err(CleanerError::Config("primary_column must not be empty".to_string()));
        }
        if let Some(name) = &self.name_column {
            if name.trim().is_empty() {
                return Err(CleanerError::Config(
                    "name_column must not be empty when set".to_string(),
                ));
            }
        }
        if self.output_prefix.contains(['/', '\\']) {
            return Err(CleanerError::Config(format!(
                "output_prefix '{}' must not contain path separators",
                self.output_prefix
            )));
        }
        Ok(())
    }

    pub fn drop_column(&self) -> Option<&str> {
        let name = self.drop_column.trim();
        (!name.is_empty()).then_some(name)
    }

    /// Default output path: the input's file name with the prefix, next to it.
    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        let file_name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output.csv".to_string());
        input.with_file_name(format!("{}{}", self.output_prefix, file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_asana_export() {
        let config = CleanerConfig::default();
        assert_eq!(config.primary_column, "Parent task");
        assert_eq!(config.mode, ClassifierMode::Keyword);
        assert!(config.dedupe);
        assert_eq!(config.drop_column(), Some("name"));
        assert_eq!(config.primary_position, 1);
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = CleanerConfig::from_toml_str(
            r#"
            primary_column = "Address"
            mode = "pattern"
            drop_column = ""
            "#,
        )
        .unwrap();
        assert_eq!(config.primary_column, "Address");
        assert_eq!(config.mode, ClassifierMode::Pattern);
        assert_eq!(config.drop_column(), None);
        assert!(config.dedupe);
    }

    #[test]
    fn test_mode_is_case_insensitive_like_cli() {
        let config = CleanerConfig::from_toml_str("mode = \"Pattern\"").unwrap();
        assert_eq!(config.mode, ClassifierMode::Pattern);
        assert_eq!(config.mode, "Pattern".parse::<ClassifierMode>().unwrap());
    }

    #[test]
    fn test_unknown_keys_and_modes_are_rejected() {
        assert!(matches!(
            CleanerConfig::from_toml_str("primary_colum = \"x\""),
            Err(CleanerError::Toml(_))
        ));
        assert!(matches!(
            CleanerConfig::from_toml_str("mode = \"fuzzy\""),
            Err(CleanerError::Toml(_))
        ));
    }

    #[test]
    fn test_validation_errors() {
        assert!(matches!(
            CleanerConfig::from_toml_str("primary_column = \"  \""),
            Err(CleanerError::Config(_))
        ));
        assert!(matches!(
            CleanerConfig::from_toml_str("output_prefix = \"out/\""),
            Err(CleanerError::Config(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "dedupe = false\nname_column = \"Name\"").unwrap();

        let config = CleanerConfig::discover(Some(file.path())).unwrap();
        assert!(!config.dedupe);
        assert_eq!(config.name_column.as_deref(), Some("Name"));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = CleanerConfig::load_from(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_output_path_for_input() {
        let config = CleanerConfig::default();
        assert_eq!(
            config.output_path_for(Path::new("/tmp/export.csv")),
            PathBuf::from("/tmp/cleaned_export.csv")
        );
    }
}
