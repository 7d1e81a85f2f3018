// Front-end configuration loaded from YAML

use crate::models::Category;
use eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const CONFIG_DIR: &str = "para";
const CONFIG_FILE: &str = "para.yml";

/// Output format for boards and items
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Front-end settings
///
/// Every field is optional in the file; missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Category used by `add` when none is given
    pub default_category: Category,
    pub format: OutputFormat,
    /// tracing level: error, warn, info, debug or trace
    pub log_level: String,
    /// Colourize text output
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_category: Category::Projects,
            format: OutputFormat::Text,
            log_level: "warn".to_string(),
            color: true,
        }
    }
}

impl Config {
    /// Default config location: `<config dir>/para/para.yml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load from an explicit path, which must exist
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config = Self::from_yaml(&content).with_context(|| format!("Invalid config file {}", path.display()))?;
        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Load from `path` if given, else from the default location if it exists,
    /// else defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(content).context("Failed to parse config YAML")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.tracing_level()?;
        Ok(())
    }

    /// Parsed `log_level`
    pub fn tracing_level(&self) -> Result<tracing::Level> {
        self.log_level
            .parse::<tracing::Level>()
            .map_err(|_| eyre!("Invalid log level: {} (expected error, warn, info, debug or trace)", self.log_level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.default_category, Category::Projects);
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.tracing_level().unwrap(), tracing::Level::WARN);
        assert!(config.color);
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = Config::from_yaml("default_category: areas\nformat: json\n").unwrap();
        assert_eq!(config.default_category, Category::Areas);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_from_yaml_empty() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
    }

    #[test]
    fn test_from_yaml_invalid() {
        assert!(Config::from_yaml("default_category: inbox\n").is_err());
        assert!(Config::from_yaml("log_level: loud\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("para.yml");
        fs::write(&path, "log_level: debug\ncolor: false\n").unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.tracing_level().unwrap(), tracing::Level::DEBUG);
        assert!(!config.color);
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let temp = TempDir::new().unwrap();
        let result = Config::load(Some(temp.path().join("missing.yml").as_path()));
        assert!(result.is_err());
    }
}
