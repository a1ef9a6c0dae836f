//! Application configuration

use crate::utils::paths;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Prefer MP4, otherwise take whatever the engine ranks best
pub const DEFAULT_FORMAT: &str = "best[ext=mp4]/best";

pub const DEFAULT_SOCKET_TIMEOUT_SECS: u64 = 30;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Download location, `None` means the system temp dir
    pub download_location: Option<PathBuf>,

    /// Explicit yt-dlp binary, skipping discovery
    pub ytdlp_path: Option<PathBuf>,

    /// Engine socket timeout in seconds
    pub socket_timeout_secs: u64,

    /// yt-dlp format selector
    pub format: String,

    /// User agent sent with every engine request
    pub user_agent: String,

    /// Record each attempt in the history database
    pub record_history: bool,

    /// History database file, `None` means the app data dir
    pub database_path: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            download_location: None,
            ytdlp_path: None,
            socket_timeout_secs: DEFAULT_SOCKET_TIMEOUT_SECS,
            format: DEFAULT_FORMAT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            record_history: true,
            database_path: None,
        }
    }
}

impl AppSettings {
    /// Load settings from the default location, falling back to defaults when
    /// no settings file exists
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::settings_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No settings file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        let settings: AppSettings = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid settings file {}", path.display()))?;

        info!("Loaded settings from {:?}", path);
        Ok(settings.validated())
    }

    /// Enforce sane values for fields a hand-edited file may break
    pub fn validated(mut self) -> Self {
        if self.socket_timeout_secs == 0 {
            self.socket_timeout_secs = DEFAULT_SOCKET_TIMEOUT_SECS;
        }
        if self.format.trim().is_empty() {
            self.format = DEFAULT_FORMAT.to_string();
        }
        if self.user_agent.trim().is_empty() {
            self.user_agent = DEFAULT_USER_AGENT.to_string();
        }
        self
    }

    /// Where downloads land when the caller does not choose
    pub fn output_dir(&self) -> PathBuf {
        self.download_location
            .clone()
            .unwrap_or_else(paths::default_output_dir)
    }

    /// History database file. The data dir is only resolved (and created)
    /// when no explicit path is configured.
    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(paths::database_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = AppSettings::default();
        assert!(config.socket_timeout_secs > 0);
        assert_eq!(config.format, DEFAULT_FORMAT);
        assert!(config.record_history);
        assert!(config.output_dir().ends_with("reelgrab"));
    }

    #[test]
    fn test_validation_restores_defaults() {
        let config = AppSettings {
            socket_timeout_secs: 0,
            format: "  ".into(),
            user_agent: String::new(),
            ..Default::default()
        }
        .validated();

        assert_eq!(config.socket_timeout_secs, DEFAULT_SOCKET_TIMEOUT_SECS);
        assert_eq!(config.format, DEFAULT_FORMAT);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let settings = AppSettings::load_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(settings.socket_timeout_secs, DEFAULT_SOCKET_TIMEOUT_SECS);
    }

    #[test]
    fn test_partial_file_merges_with_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{ "download_location": "/data/videos", "socket_timeout_secs": 0 }"#,
        )
        .unwrap();

        let settings = AppSettings::load_from(&path).unwrap();
        assert_eq!(settings.output_dir(), PathBuf::from("/data/videos"));
        assert_eq!(settings.socket_timeout_secs, DEFAULT_SOCKET_TIMEOUT_SECS);
        assert_eq!(settings.format, DEFAULT_FORMAT);
    }

    #[test]
    fn test_database_path_resolved_lazily() {
        let config = AppSettings::default();
        assert!(config.database_path.is_none());

        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "database_path": "/data/history.db" }"#).unwrap();

        let settings = AppSettings::load_from(&path).unwrap();
        assert_eq!(settings.database_path(), PathBuf::from("/data/history.db"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(AppSettings::load_from(&path).is_err());
    }
}
