//! yt-dlp wrapper for metadata resolution and downloads
//!
//! Every invocation runs in a child process whose environment has the proxy
//! variables removed and which receives `--proxy ""`, so the parent process
//! environment is never touched.

use crate::downloader::options::DownloadOptions;
use crate::downloader::proxy::PROXY_ENV_VARS;
use crate::extractor::models::MediaInfo;
use crate::extractor::traits::Extractor;
use crate::utils::config::AppSettings;
use crate::utils::error::ExtractorError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use tokio::process::Command as AsyncCommand;
use tracing::{debug, error, info, warn};

/// Extraction engine backed by the yt-dlp executable
#[derive(Debug, Clone)]
pub struct YtDlpExtractor {
    ytdlp_path: PathBuf,
}

impl YtDlpExtractor {
    /// Locate yt-dlp and build an extractor around it
    ///
    /// Search order:
    /// 1. Next to the current executable
    /// 2. System PATH
    /// 3. Common installation paths
    pub fn new() -> Result<Self, ExtractorError> {
        match find_ytdlp() {
            Some(path) => {
                info!("Found yt-dlp at: {}", path.display());
                Ok(Self { ytdlp_path: path })
            }
            None => {
                error!("yt-dlp not found anywhere!");
                Err(ExtractorError::YtDlpNotFound)
            }
        }
    }

    /// Use a specific yt-dlp binary without discovery
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            ytdlp_path: path.into(),
        }
    }

    /// Honor a configured binary, otherwise discover one
    pub fn from_settings(settings: &AppSettings) -> Result<Self, ExtractorError> {
        match &settings.ytdlp_path {
            Some(path) if path.exists() => {
                info!("Using configured yt-dlp: {}", path.display());
                Ok(Self::with_path(path))
            }
            Some(path) => {
                warn!(
                    "Configured yt-dlp {} does not exist, falling back to discovery",
                    path.display()
                );
                Self::new()
            }
            None => Self::new(),
        }
    }

    /// Get the path to yt-dlp being used
    pub fn ytdlp_path(&self) -> &Path {
        &self.ytdlp_path
    }

    fn command(&self, options: &DownloadOptions) -> AsyncCommand {
        let mut cmd = AsyncCommand::new(&self.ytdlp_path);
        for var in PROXY_ENV_VARS {
            cmd.env_remove(var);
        }
        cmd.args(options.to_args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl Extractor for YtDlpExtractor {
    fn id(&self) -> &'static str {
        "ytdlp"
    }

    fn isolates_proxy(&self) -> bool {
        true
    }

    /// Uses: yt-dlp <options> --dump-json --no-download <url>
    async fn resolve_info(
        &self,
        url: &str,
        options: &DownloadOptions,
    ) -> Result<MediaInfo, ExtractorError> {
        debug!("Resolving media info for URL: {}", url);

        let mut cmd = self.command(options);
        cmd.arg("--dump-json")
            .arg("--no-download")
            .arg("--no-warnings")
            .arg(url);

        let output = run(cmd).await?;
        let json_str = String::from_utf8(output.stdout)?;
        let line = json_str
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or_default();

        let info: MediaInfo = serde_json::from_str(line)?;
        debug!("Resolved '{}' ({})", info.title, info.id);
        Ok(info)
    }

    /// Uses: yt-dlp <options> <url>
    async fn download(&self, url: &str, options: &DownloadOptions) -> Result<(), ExtractorError> {
        debug!("Downloading URL: {}", url);

        let mut cmd = self.command(options);
        cmd.arg("--no-warnings")
            .arg("--no-progress")
            .arg(url);

        run(cmd).await?;
        Ok(())
    }
}

async fn run(mut cmd: AsyncCommand) -> Result<Output, ExtractorError> {
    let output = cmd.output().await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        error!("yt-dlp failed ({}): {}", output.status, stderr);
        return Err(ExtractorError::EngineFailed {
            status: output.status.to_string(),
            stderr,
        });
    }

    Ok(output)
}

// ============================================================
// yt-dlp Detection Functions
// ============================================================

/// Find yt-dlp binary with priority:
/// 1. Next to the current executable
/// 2. System PATH
/// 3. Common installation paths
pub fn find_ytdlp() -> Option<PathBuf> {
    if let Some(bundled) = find_beside_executable() {
        info!("✓ Using bundled yt-dlp: {:?}", bundled);
        return Some(bundled);
    }

    if let Some(system) = find_in_path() {
        info!("✓ Using system yt-dlp: {:?}", system);
        return Some(system);
    }

    if let Some(common) = find_in_common_paths() {
        info!("✓ Using yt-dlp from common path: {:?}", common);
        return Some(common);
    }

    warn!("✗ yt-dlp not found anywhere!");
    None
}

/// Find yt-dlp shipped in the same directory as the running binary
fn find_beside_executable() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    let exe_dir = exe_path.parent()?;

    let candidate = exe_dir.join(executable_name());
    if candidate.is_file() && is_executable(&candidate) {
        return Some(candidate);
    }

    None
}

fn find_in_path() -> Option<PathBuf> {
    which::which("yt-dlp").ok().filter(|path| path.exists())
}

fn find_in_common_paths() -> Option<PathBuf> {
    let common_paths = [
        // macOS Homebrew (Apple Silicon)
        "/opt/homebrew/bin/yt-dlp",
        // macOS Homebrew (Intel)
        "/usr/local/bin/yt-dlp",
        "/usr/bin/yt-dlp",
        // Termux on Android
        "/data/data/com.termux/files/usr/bin/yt-dlp",
        // pip --user
        "~/.local/bin/yt-dlp",
    ];

    for path_str in common_paths {
        let expanded = match path_str.strip_prefix("~/") {
            Some(rest) => match dirs::home_dir() {
                Some(home) => home.join(rest),
                None => continue,
            },
            None => PathBuf::from(path_str),
        };

        if expanded.is_file() && is_executable(&expanded) {
            return Some(expanded);
        }
    }

    None
}

fn executable_name() -> &'static str {
    if cfg!(windows) {
        "yt-dlp.exe"
    } else {
        "yt-dlp"
    }
}

/// Check if a file is executable
#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|metadata| metadata.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.exists()
}

// ============================================================
// Tests
// ============================================================
