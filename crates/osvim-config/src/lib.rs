use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for osvim
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub redaction: RedactionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where bootstrap secrets live in a template and how they are masked
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactionConfig {
    #[serde(default = "default_resource")]
    pub resource: String,

    #[serde(default = "default_field")]
    pub field: String,

    #[serde(default = "default_mask_char")]
    pub mask_char: char,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            resource: default_resource(),
            field: default_field(),
            mask_char: default_mask_char(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_resource() -> String {
    "apache_server".to_string()
}

fn default_field() -> String {
    "user_data".to_string()
}

fn default_mask_char() -> char {
    '*'
}

fn default_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            Self::load_from(&path)
        } else {
            // Create default config file
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(&path, content)?;
            Ok(config)
        }
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "osvim", "osvim") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.osvim/config.toml")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.redaction.resource, "apache_server");
        assert_eq!(config.redaction.field, "user_data");
        assert_eq!(config.redaction.mask_char, '*');
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.redaction.resource, config.redaction.resource);
        assert_eq!(parsed.redaction.mask_char, config.redaction.mask_char);
    }

    #[test]
    fn test_partial_config() {
        let config: Config = toml::from_str("[redaction]\nresource = \"web_server\"\n").unwrap();
        assert_eq!(config.redaction.resource, "web_server");
        assert_eq!(config.redaction.field, "user_data");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[redaction]\nmask_char = \"#\"\n\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.redaction.mask_char, '#');
        assert_eq!(config.logging.level, "debug");

        assert!(Config::load_from(&dir.path().join("missing.toml")).is_err());
    }
}
