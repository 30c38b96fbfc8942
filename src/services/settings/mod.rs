//! Application settings loaded from a TOML file in the platform config
//! directory. Every field has a default so a missing file just means
//! defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

use crate::services::baak::DEFAULT_BASE_URL;
use crate::services::history::DEFAULT_HISTORY_LIMIT;

const QUALIFIER: &str = "";
const ORGANIZATION: &str = "";
const APPLICATION: &str = "ug-pulse";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Base URL of the academic API.
    pub api_base_url: String,
    /// Overrides the default database location when set.
    pub database_path: Option<PathBuf>,
    /// How many feed versions to keep.
    pub history_limit: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            database_path: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl AppSettings {
    /// Loads settings from the config directory, falling back to defaults
    /// when no file exists.
    pub fn load() -> Result<Self> {
        let Some(path) = Self::config_file() else {
            log::warn!("No config directory available; using default settings");
            return Ok(Self::default());
        };

        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No settings file at {}; using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .context(format!("Failed to read settings from {}", path.display()))?;
        let settings: Self = toml::from_str(&content)
            .context(format!("Failed to parse settings from {}", path.display()))?;

        Ok(settings)
    }

    fn config_file() -> Option<PathBuf> {
        ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .map(|dirs| dirs.config_dir().join("settings.toml"))
    }

    /// Database location: the configured override, the platform data
    /// directory, or the working directory as a last resort.
    pub fn resolve_database_path(&self) -> PathBuf {
        if let Some(path) = &self.database_path {
            return path.clone();
        }

        match ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION) {
            Some(dirs) => dirs.data_dir().join("ug-pulse.db"),
            None => PathBuf::from("ug-pulse.db"),
        }
    }
}
