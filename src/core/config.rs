use crate::error::{FetchError, Result};
use crate::utils::fs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Bytes requested per read while streaming a response body.
pub const DEFAULT_CHUNK_SIZE: usize = 16 * 1024;

pub const HOME_ENV: &str = "FETCHZIP_HOME";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub chunk_size: usize,
    pub user_agent: String,
    pub show_progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            chunk_size: DEFAULT_CHUNK_SIZE,
            user_agent: default_user_agent(),
            show_progress: true,
        }
    }
}

impl Config {
    /// Loads the user config, writing the defaults out on first use.
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save_to(&config_path)?;
            return Ok(config);
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| FetchError::from_io(e, path))?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::ensure_dir_exists(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| FetchError::from_io(e, path))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(FetchError::config_error("chunk_size must be greater than zero"));
        }
        if self.user_agent.trim().is_empty() {
            return Err(FetchError::config_error("user_agent must not be empty"));
        }
        Ok(())
    }
}

fn default_user_agent() -> String {
    format!("fetchzip/{}", env!("CARGO_PKG_VERSION"))
}

pub fn get_fetchzip_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|dir| !dir.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    dirs::home_dir()
        .map(|home| home.join(".fetchzip"))
        .ok_or(FetchError::HomeDirectoryNotFound)
}

pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_fetchzip_dir()?.join("config.json"))
}
