//! Configuration management for relscout

pub mod schema;

pub use schema::Config;

use crate::error::{RelscoutError, RelscoutResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("relscout")
            .join("config.toml")
    }

    /// Load configuration, falling back to defaults if the file is missing
    pub async fn load(&self) -> RelscoutResult<Config> {
        if !self.config_path.exists() {
            debug!(
                "Config file {} not found, using defaults",
                self.config_path.display()
            );
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> RelscoutResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| RelscoutError::io(format!("reading config from {}", path.display()), e))?;

        parse_config(path, &content)
    }

    /// Read the raw file contents, or `None` if it does not exist yet
    pub async fn read_raw(&self) -> RelscoutResult<Option<String>> {
        if !self.config_path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&self.config_path)
            .await
            .map(Some)
            .map_err(|e| {
                RelscoutError::io(
                    format!("reading config from {}", self.config_path.display()),
                    e,
                )
            })
    }

    /// Save configuration to file
    pub async fn save(&self, config: &Config) -> RelscoutResult<()> {
        let content = toml::to_string_pretty(config)?;
        self.write_raw(&content).await
    }

    /// Write raw TOML after checking that it still parses as a `Config`
    pub async fn write_raw(&self, content: &str) -> RelscoutResult<()> {
        parse_config(&self.config_path, content)?;
        self.ensure_config_dir().await?;

        fs::write(&self.config_path, content).await.map_err(|e| {
            RelscoutError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Ensure the config directory exists
    async fn ensure_config_dir(&self) -> RelscoutResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| RelscoutError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
        Ok(())
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_config(path: &Path, content: &str) -> RelscoutResult<Config> {
    toml::from_str(content).map_err(|e| RelscoutError::ConfigInvalid {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_default_when_missing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nonexistent.toml");
        let manager = ConfigManager::with_path(path);

        let config = manager.load().await.unwrap();
        assert_eq!(config.source.product, "Qoder");
    }

    #[tokio::test]
    async fn save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");
        let manager = ConfigManager::with_path(path);

        let mut config = Config::default();
        config.source.host = "https://mirror.example.com".to_string();

        manager.save(&config).await.unwrap();
        let loaded = manager.load().await.unwrap();

        assert_eq!(loaded.source.host, "https://mirror.example.com");
    }

    #[tokio::test]
    async fn invalid_file_is_reported_with_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        tokio::fs::write(&path, "[scan]\nmax_patch = \"lots\"\n")
            .await
            .unwrap();

        let err = ConfigManager::with_path(path.clone()).load().await.unwrap_err();
        assert!(matches!(err, RelscoutError::ConfigInvalid { path: p, .. } if p == path));
    }

    #[tokio::test]
    async fn write_raw_rejects_invalid_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        let manager = ConfigManager::with_path(path.clone());

        assert!(manager.write_raw("[scan]\nflush_every = -1\n").await.is_err());
        assert!(!path.exists());
    }
}
