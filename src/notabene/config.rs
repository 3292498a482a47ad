//! # Configuration
//!
//! Settings are loaded with [`confique`], layered in priority order:
//!
//! 1. **Environment variables**: `NOTABENE_MAX_VERSIONS`, `NOTABENE_TITLE_MAX`,
//!    `NOTABENE_CONTENT_MAX`.
//! 2. **Config file**: `notabene.toml` in the data directory, if present.
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `max_versions` | `10` | Stored versions kept per note |
//! | `title_max` | `255` | Longest accepted title, in characters |
//! | `content_max` | `280` | Longest accepted content, in characters |
//!
//! `notabene config` prints the effective values.

use crate::error::Result;
use crate::manager::{VersionManager, DEFAULT_MAX_VERSIONS};
use crate::model::NoteLimits;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "notabene.toml";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NotabeneConfig {
    /// Stored versions kept per note before the oldest is evicted.
    #[config(default = 10, env = "NOTABENE_MAX_VERSIONS")]
    pub max_versions: usize,

    #[config(default = 255, env = "NOTABENE_TITLE_MAX")]
    pub title_max: usize,

    #[config(default = 280, env = "NOTABENE_CONTENT_MAX")]
    pub content_max: usize,
}

impl Default for NotabeneConfig {
    fn default() -> Self {
        let limits = NoteLimits::default();
        Self {
            max_versions: DEFAULT_MAX_VERSIONS,
            title_max: limits.title_max,
            content_max: limits.content_max,
        }
    }
}

impl NotabeneConfig {
    pub fn file_path(data_dir: &Path) -> PathBuf {
        data_dir.join(CONFIG_FILE)
    }

    /// Loads env, then `notabene.toml` under `data_dir`, then defaults. A
    /// missing file is not an error.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let config = Self::builder()
            .env()
            .file(Self::file_path(data_dir))
            .load()?;
        Ok(config)
    }

    pub fn limits(&self) -> NoteLimits {
        NoteLimits {
            title_max: self.title_max,
            content_max: self.content_max,
        }
    }

    pub fn version_manager(&self) -> VersionManager {
        VersionManager::new(self.max_versions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = NotabeneConfig::default();
        assert_eq!(config.max_versions, 10);
        assert_eq!(config.limits(), NoteLimits::default());
        assert_eq!(config.version_manager().max_versions(), 10);
    }

    #[test]
    fn test_file_values_override_defaults() {
        let dir = tempdir().unwrap();
        fs::write(
            NotabeneConfig::file_path(dir.path()),
            "max_versions = 3\ntitle_max = 40\n",
        )
        .unwrap();

        let config = NotabeneConfig::load(dir.path()).unwrap();
        if std::env::var_os("NOTABENE_MAX_VERSIONS").is_none() {
            assert_eq!(config.max_versions, 3);
        }
        if std::env::var_os("NOTABENE_TITLE_MAX").is_none() {
            assert_eq!(config.limits().title_max, 40);
        }
    }

    #[test]
    fn test_zero_cap_still_keeps_one_version() {
        let config = NotabeneConfig {
            max_versions: 0,
            ..Default::default()
        };
        assert_eq!(config.version_manager().max_versions(), 1);
    }
}
