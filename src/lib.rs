//! reelgrab library
//!
//! Per-platform adapters that normalize social media URLs and drive an
//! external extraction engine (yt-dlp) to fetch the media.

pub mod database;
pub mod downloader;
pub mod extractor;
pub mod platform;
pub mod utils;

// Re-export main types for easier use
pub use downloader::{DownloadOptions, DownloadOutcome, Downloader};
pub use extractor::{Extractor, MediaInfo, YtDlpExtractor};
pub use platform::{normalize, Platform};
pub use utils::{AppSettings, DownloadError, ExtractorError};
