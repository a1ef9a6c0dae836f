//! Error handling for reelgrab

use std::path::PathBuf;
use thiserror::Error;

/// Failures reported by an extraction engine
#[derive(Debug, Error)]
pub enum ExtractorError {
    #[error("yt-dlp not found. Please install yt-dlp")]
    YtDlpNotFound,

    #[error("yt-dlp exited with {status}: {stderr}")]
    EngineFailed { status: String, stderr: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse engine output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Engine output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// The one error kind a download call can fail with
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Metadata resolution failed: the source is unreachable, private, removed
    /// or not a supported page
    #[error("Video not available: {0}")]
    Unavailable(#[source] ExtractorError),

    /// The engine failed while transferring or extracting media
    #[error("Download error: {0}")]
    Transfer(#[source] ExtractorError),

    /// The engine reported success but no output file could be found
    #[error("Failed to download video: file not found at {}", .0.display())]
    FileMissing(PathBuf),

    #[error("Failed to download video: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to download video: {0}")]
    Unexpected(String),
}
