//! CLI configuration.
//!
//! Settings live in a TOML file resolved in this order:
//!
//! 1. `--config <path>` (or `$SERVO_CONFIG`)
//! 2. `<config dir>/servo-nomenclature/config.toml`
//!
//! A missing file means defaults. `$SERVO_DATA_DIR` overrides `data_dir`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use servo_nomenclature::{CatalogueSource, DirectorySource, EmbeddedSource, Platform};

use crate::error::{Error, Result};

/// Project name used for the config directory.
pub const PROJECT_NAME: &str = "servo-nomenclature";

/// Environment variable overriding the config file path.
pub const CONFIG_ENV: &str = "SERVO_CONFIG";

/// Environment variable overriding the catalogue directory.
pub const DATA_DIR_ENV: &str = "SERVO_DATA_DIR";

/// How command results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned, human-readable text.
    #[default]
    Text,
    /// One JSON document per command.
    Json,
}

/// Settings read from the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServoConfig {
    /// Directory holding the catalogue documents; bundled data when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Platform `encode` falls back to when the series is not found.
    pub default_platform: Platform,
    /// Output format when `--json` is not passed.
    pub output: OutputFormat,
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            log_level: "warn".to_string(),
            default_platform: Platform::default(),
            output: OutputFormat::default(),
        }
    }
}

impl ServoConfig {
    /// `<config dir>/servo-nomenclature/config.toml`, if the platform has a
    /// config directory.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join("config.toml"))
    }

    /// The explicit path if given, else the default location.
    pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(Self::default_config_path)
    }

    /// Load the config, falling back to defaults when no file exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => {
                let content =
                    std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
                tracing::debug!(path = %path.display(), "Loaded config file");
                Self::from_toml_str(&content)
                    .map_err(|e| Error::config(format!("{}: {e}", path.display())))?
            }
            _ => Self::default(),
        };
        config.apply_env_overrides(std::env::var_os(DATA_DIR_ENV).map(PathBuf::from));
        Ok(config)
    }

    /// Parse a TOML document. Missing keys take their default.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }

    /// Render as a TOML document.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Replace `data_dir` when an override is present.
    pub fn apply_env_overrides(&mut self, data_dir: Option<PathBuf>) {
        if let Some(dir) = data_dir {
            self.data_dir = Some(dir);
        }
    }

    /// Where catalogues are read from.
    pub fn catalogue_source(&self) -> Box<dyn CatalogueSource> {
        match &self.data_dir {
            Some(dir) => Box::new(DirectorySource::new(dir)),
            None => Box::new(EmbeddedSource),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServoConfig::default();
        assert_eq!(config.data_dir, None);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.default_platform, Platform::SigmaX);
        assert_eq!(config.output, OutputFormat::Text);
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config = ServoConfig::from_toml_str("default_platform = \"sigma-7\"\n").unwrap();
        assert_eq!(config.default_platform, Platform::Sigma7);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = ServoConfig {
            data_dir: Some(PathBuf::from("/srv/catalogues")),
            log_level: "debug".to_string(),
            default_platform: Platform::Sigma7,
            output: OutputFormat::Json,
        };
        let toml = config.to_toml_string().unwrap();
        assert!(toml.contains("output = \"json\""));
        assert_eq!(ServoConfig::from_toml_str(&toml).unwrap(), config);
    }

    #[test]
    fn test_invalid_document() {
        let err = ServoConfig::from_toml_str("output = \"yaml\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServoConfig::load(Some(dir.path().join("absent.toml").as_path())).unwrap();
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "log_level = \"info\"\noutput = \"json\"\n").unwrap();
        let config = ServoConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.output, OutputFormat::Json);
    }

    #[test]
    fn test_data_dir_override() {
        let mut config = ServoConfig::from_toml_str("data_dir = \"/a\"").unwrap();
        config.apply_env_overrides(None);
        assert_eq!(config.data_dir, Some(PathBuf::from("/a")));
        config.apply_env_overrides(Some(PathBuf::from("/b")));
        assert_eq!(config.data_dir, Some(PathBuf::from("/b")));
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = ServoConfig::resolve_config_path(Some(Path::new("/etc/servo.toml")));
        assert_eq!(path, Some(PathBuf::from("/etc/servo.toml")));
    }
}
