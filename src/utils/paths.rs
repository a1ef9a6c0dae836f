//! Platform-specific locations for reelgrab
//!
//! - Config: `settings.json` under the OS config dir
//!   (`~/.config/reelgrab`, `~/Library/Application Support/reelgrab`, `%APPDATA%\reelgrab`)
//! - Data: history database under the OS data dir
//! - Downloads: a `reelgrab` folder in the system temp dir unless configured

use std::path::PathBuf;
use tracing::{debug, warn};

const APP_DIR: &str = "reelgrab";

/// Returns the application data directory, creating it if missing
pub fn app_data_dir() -> PathBuf {
    let dir = dirs::data_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("share")))
        .unwrap_or_else(|| {
            warn!("Could not determine data directory, using temp dir");
            std::env::temp_dir()
        })
        .join(APP_DIR);

    if let Err(e) = std::fs::create_dir_all(&dir) {
        warn!("Failed to create data directory {:?}: {}", dir, e);
    }

    debug!("App data directory: {:?}", dir);
    dir
}

/// Returns the configuration directory (not created)
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Path of the settings file
pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

/// Default path of the history database
pub fn database_path() -> PathBuf {
    app_data_dir().join("reelgrab.db")
}

/// Default output directory for downloads
pub fn default_output_dir() -> PathBuf {
    std::env::temp_dir().join(APP_DIR)
}

/// SQLite connection URL for a database file
pub fn sqlite_url(path: &std::path::Path) -> String {
    format!("sqlite://{}", path.display())
}
