//! Configuration settings for marktask.
//!
//! Settings are loaded from `~/.marktask/config.yaml`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::core::DateResolver;
use crate::error::MarktaskError;
use crate::features::nlp::{BatchParser, TaskNormalizer};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Task syntax settings.
    pub parsing: ParsingConfig,
    /// Task file settings.
    pub storage: StorageConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorSetting {
    /// Apply this setting to the `colored` crate.
    pub fn apply(self) {
        match self {
            Self::Auto => colored::control::unset_override(),
            Self::Always => colored::control::set_override(true),
            Self::Never => colored::control::set_override(false),
        }
    }
}

/// Task syntax settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ParsingConfig {
    /// Move a month/day that has already passed this year to next year.
    #[serde(default = "default_true")]
    pub prefer_future_dates: bool,
    /// Treat `\,` as a literal comma instead of a task separator.
    #[serde(default = "default_true")]
    pub escape_commas: bool,
}

/// Task file settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for `tasks.json` and `done_tasks.json`.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

const fn default_true() -> bool {
    true
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
        }
    }
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            prefer_future_dates: default_true(),
            escape_commas: default_true(),
        }
    }
}

impl ParsingConfig {
    #[must_use]
    pub const fn resolver(&self) -> DateResolver {
        DateResolver::new(self.prefer_future_dates)
    }

    #[must_use]
    pub const fn normalizer(&self) -> TaskNormalizer {
        TaskNormalizer::new(BatchParser::new(self.escape_commas), self.resolver())
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, MarktaskError> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            MarktaskError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            MarktaskError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Apply `storage.data_dir` to a set of paths.
    #[must_use]
    pub fn apply_to_paths(&self, paths: Paths) -> Paths {
        match &self.storage.data_dir {
            Some(dir) => paths.with_data_dir(dir),
            None => paths,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.general.default_output, OutputFormat::Pretty);
        assert_eq!(config.general.color, ColorSetting::Auto);
        assert!(config.parsing.prefer_future_dates);
        assert!(config.parsing.escape_commas);
        assert_eq!(config.storage.data_dir, None);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();

        // Should return defaults when file doesn't exist
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        // Write a partial config (only some fields)
        let partial_yaml = r"
parsing:
  escape_commas: false
";
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        // Custom value should be loaded
        assert!(!config.parsing.escape_commas);
        // Defaults should be used for missing fields
        assert!(config.parsing.prefer_future_dates);
        assert_eq!(config.general.default_output, OutputFormat::Pretty);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "general: [not, a, map]").unwrap();

        assert!(matches!(
            Config::load_from_path(&config_path),
            Err(MarktaskError::Config(_))
        ));
    }

    #[test]
    fn test_apply_data_dir() {
        let mut config = Config::default();
        let paths = Paths::with_root(PathBuf::from("/tmp/root"));
        assert_eq!(config.apply_to_paths(paths.clone()), paths);

        config.storage.data_dir = Some(PathBuf::from("/tmp/data"));
        let applied = config.apply_to_paths(paths);
        assert_eq!(applied.tasks_file, PathBuf::from("/tmp/data/tasks.json"));
    }

    #[test]
    fn test_parsing_config_builds_normalizer() {
        let parsing = ParsingConfig {
            prefer_future_dates: false,
            escape_commas: true,
        };
        assert_eq!(*parsing.normalizer().resolver(), DateResolver::new(false));
    }
}
