//! Utility modules for error handling, configuration and paths

pub mod config;
pub mod error;
pub mod filename;
pub mod paths;

// Re-export for convenience
pub use config::AppSettings;
pub use error::{DownloadError, ExtractorError};
pub use filename::sanitize_filename;
pub use paths::{app_data_dir, config_dir, database_path, default_output_dir, settings_path};
