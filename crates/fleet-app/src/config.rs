//! Configuration management for fleet-register
//!
//! Config stored at: ~/.config/fleet-register/config.json

use fleet_store::DEFAULT_STORAGE_KEY;
use fleet_types::{ConfigError, OutputFormat, Result, Role};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Acting role (admin, technician)
    #[serde(default)]
    pub role: Role,

    /// Data directory override
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Slot key holding the register state
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Command line of the maintenance tip advisor (optional)
    #[serde(default)]
    pub advisor_command: Option<String>,

    /// Longest edge of stored vehicle photos, in pixels
    #[serde(default = "default_photo_max_dimension")]
    pub photo_max_dimension: u32,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_photo_max_dimension() -> u32 {
    512
}

impl Default for Config {
    fn default() -> Self {
        Self {
            role: Role::default(),
            data_dir: None,
            storage_key: default_storage_key(),
            output_format: OutputFormat::default(),
            advisor_command: None,
            photo_max_dimension: default_photo_max_dimension(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("fleet-register");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or(ConfigError::NotFound)?
            .join("fleet-register");
        Ok(data_dir)
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from an explicit path, defaults when the file is absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Fleet Register Configuration")?;
        writeln!(f, "============================")?;
        writeln!(f)?;
        writeln!(f, "Role:           {}", self.role)?;
        writeln!(
            f,
            "Data dir:       {}",
            self.data_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f, "Storage key:    {}", self.storage_key)?;
        writeln!(f, "Output format:  {}", self.output_format)?;
        writeln!(
            f,
            "Advisor:        {}",
            self.advisor_command.as_deref().unwrap_or("(disabled)")
        )?;
        writeln!(f, "Photo size:     {} px", self.photo_max_dimension)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.role, Role::Technician);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            role: Role::Admin,
            data_dir: Some(dir.path().join("data")),
            advisor_command: Some("tips --json".to_string()),
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"role": "admin"}"#).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.role, Role::Admin);
        assert_eq!(config.photo_max_dimension, 512);
    }

    #[test]
    fn test_invalid_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "role = admin").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, fleet_types::Error::Config(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let config = Config {
            data_dir: Some(PathBuf::from("/srv/fleet")),
            ..Config::default()
        };
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/srv/fleet"));
    }
}
