//! Application configuration loaded from YAML

use anyhow::{bail, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::Project;
use crate::seed::{default_projects, DEFAULT_USERNAME};

/// Environment variable overriding the config file location
pub const CONFIG_PATH_ENV: &str = "BREWHQ_CONFIG";

/// Default delay before the assistant answers, in milliseconds
pub const DEFAULT_REPLY_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ChatConfig {
    pub reply_delay_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: DEFAULT_REPLY_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Name recorded as creator and editor of requirements
    pub username: String,
    pub chat: ChatConfig,
    /// Projects to start the session with instead of the built-in ones
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_projects: Option<Vec<Project>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            chat: ChatConfig::default(),
            seed_projects: None,
        }
    }
}

impl Config {
    /// Loads a config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        info!("Loaded config from {:?}", path.as_ref());
        Ok(config)
    }

    /// Save the config to the specified path
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Replaces the username when `username` is non-blank
    pub fn with_username(mut self, username: Option<&str>) -> Self {
        if let Some(name) = username.map(str::trim).filter(|n| !n.is_empty()) {
            self.username = name.to_string();
        }
        self
    }

    /// Projects the session starts with
    pub fn projects(&self) -> Vec<Project> {
        self.seed_projects.clone().unwrap_or_else(default_projects)
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.chat.reply_delay_ms)
    }
}

/// Gets the BrewHQ config directory
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Failed to determine config directory")?;
    Ok(config_dir.join("brewhq"))
}

/// Gets the path to the config file, honoring `BREWHQ_CONFIG`
pub fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Loads the config from `path`, or from the default location.
///
/// An explicit path must exist; a missing default file yields defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => {
            let path = get_config_path()?;
            if path.exists() {
                Config::load(&path)
            } else {
                debug!("No config at {:?}, using defaults", path);
                Ok(Config::default())
            }
        }
    }
}

/// Writes `config` to `path`, or to the default location. An existing
/// file is only replaced with `force`.
pub fn init_config(config: &Config, path: Option<&Path>, force: bool) -> Result<PathBuf> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => get_config_path()?,
    };
    if path.exists() && !force {
        bail!("Config file already exists: {:?} (use --force to overwrite)", path);
    }
    config.save(&path)?;
    info!("Wrote config to {:?}", path);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Repository;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.username, "John Doe");
        assert_eq!(config.reply_delay(), Duration::from_millis(1000));
        assert_eq!(config.projects(), default_projects());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "username: Jane Smith\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.username, "Jane Smith");
        assert_eq!(config.chat.reply_delay_ms, DEFAULT_REPLY_DELAY_MS);
        assert!(config.seed_projects.is_none());
    }

    #[test]
    fn test_save_and_load_seed_projects() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.yaml");

        let config = Config {
            username: "Sam".to_string(),
            chat: ChatConfig { reply_delay_ms: 0 },
            seed_projects: Some(vec![Project {
                id: 1,
                name: "Internal Tools".to_string(),
                description: "Back office".to_string(),
                repositories: vec![Repository::new("tools", "main", "https://example.com/tools")],
            }]),
        };
        config.save(&path).unwrap();

        let loaded = load_config(Some(&path)).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.projects()[0].name, "Internal Tools");
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_config(Some(&temp_dir.path().join("absent.yaml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "chat: [not, a, map]\n").unwrap();
        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn test_init_config_refuses_to_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("brewhq").join("config.yaml");
        let config = Config::default().with_username(Some("Ada"));

        let written = init_config(&config, Some(&path), false).unwrap();
        assert_eq!(written, path);
        assert_eq!(load_config(Some(&path)).unwrap().username, "Ada");

        let other = Config::default().with_username(Some("Grace"));
        let err = init_config(&other, Some(&path), false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(load_config(Some(&path)).unwrap().username, "Ada");

        init_config(&other, Some(&path), true).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap().username, "Grace");
    }

    #[test]
    fn test_username_override() {
        let config = Config::default().with_username(Some("  Ada "));
        assert_eq!(config.username, "Ada");
        let config = config.with_username(Some("   "));
        assert_eq!(config.username, "Ada");
        assert_eq!(Config::default().with_username(None).username, "John Doe");
    }
}
