//! One download attempt, end to end

use crate::downloader::locate::locate_output;
use crate::downloader::options::DownloadOptions;
use crate::downloader::proxy::ProxyEnvGuard;
use crate::extractor::traits::Extractor;
use crate::extractor::MediaInfo;
use crate::platform::Platform;
use crate::utils::config::AppSettings;
use crate::utils::error::DownloadError;
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Result of a successful [`Downloader::download_with_info`] call
#[derive(Debug, Clone)]
pub struct DownloadOutcome {
    /// Absolute path of the file on disk
    pub path: PathBuf,
    /// URL actually handed to the engine
    pub normalized_url: String,
    pub info: MediaInfo,
}

/// Downloads media from one platform into one output directory
pub struct Downloader {
    platform: Platform,
    extractor: Arc<dyn Extractor>,
    output_dir: PathBuf,
    settings: AppSettings,
}

impl Downloader {
    /// Create a downloader, creating `output_dir` (default: system temp) if absent
    pub fn new(
        platform: Platform,
        extractor: Arc<dyn Extractor>,
        output_dir: Option<PathBuf>,
        settings: AppSettings,
    ) -> Result<Self, DownloadError> {
        let output_dir = output_dir.unwrap_or_else(|| settings.output_dir());
        std::fs::create_dir_all(&output_dir)?;
        let output_dir = output_dir.absolutize()?.into_owned();

        debug!(
            "Downloader for {} using {} into {:?}",
            platform,
            extractor.id(),
            output_dir
        );

        Ok(Self {
            platform,
            extractor,
            output_dir,
            settings,
        })
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Options this downloader passes to the engine
    pub fn options(&self) -> DownloadOptions {
        DownloadOptions::for_platform(self.platform, &self.output_dir, &self.settings)
    }

    /// Download `url` and return the absolute path of the media file
    pub async fn download(&self, url: &str) -> Result<PathBuf, DownloadError> {
        self.download_with_info(url).await.map(|outcome| outcome.path)
    }

    /// Like [`download`](Self::download), also returning the metadata and
    /// normalized URL
    pub async fn download_with_info(&self, url: &str) -> Result<DownloadOutcome, DownloadError> {
        // Restores proxy variables on every exit from this function
        let _proxy_guard = if self.extractor.isolates_proxy() {
            None
        } else {
            Some(ProxyEnvGuard::acquire().await)
        };

        let normalized_url = self.platform.normalize_url(url);
        let options = self.options();
        info!("Downloading {} ({})", normalized_url, self.platform);

        let info = self
            .extractor
            .resolve_info(&normalized_url, &options)
            .await
            .map_err(|e| {
                error!("Metadata resolution failed for {}: {}", normalized_url, e);
                DownloadError::Unavailable(e)
            })?;

        let expected = info.expected_path(&self.output_dir).ok_or_else(|| {
            DownloadError::Unexpected(format!(
                "engine metadata for {} has no filename, title or extension",
                normalized_url
            ))
        })?;
        debug!("Expecting output at {:?}", expected);

        self.extractor
            .download(&normalized_url, &options)
            .await
            .map_err(|e| {
                error!("Download failed for {}: {}", normalized_url, e);
                DownloadError::Transfer(e)
            })?;

        let found = locate_output(&expected).await.ok_or_else(|| {
            error!("No output file found for {:?}", expected);
            DownloadError::FileMissing(expected.clone())
        })?;
        let path = found.absolutize()?.into_owned();

        info!("Download completed: {}", path.display());
        Ok(DownloadOutcome {
            path,
            normalized_url,
            info,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ExtractorError;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tempfile::tempdir;

    /// Records the URLs it sees and writes a fixed file on download
    struct RecordingExtractor {
        dir: PathBuf,
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Extractor for RecordingExtractor {
        fn id(&self) -> &'static str {
            "recording"
        }

        fn isolates_proxy(&self) -> bool {
            true
        }

        async fn resolve_info(
            &self,
            url: &str,
            _options: &DownloadOptions,
        ) -> Result<MediaInfo, ExtractorError> {
            self.seen.lock().unwrap().push(url.to_string());
            Ok(MediaInfo {
                id: "1".into(),
                title: "clip".into(),
                ext: Some("mp4".into()),
                ..Default::default()
            })
        }

        async fn download(
            &self,
            url: &str,
            options: &DownloadOptions,
        ) -> Result<(), ExtractorError> {
            self.seen.lock().unwrap().push(url.to_string());
            assert_eq!(options.proxy, "");
            std::fs::write(self.dir.join("clip.mp4"), b"video")?;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_engine_receives_normalized_url() {
        let dir = tempdir().unwrap();
        let extractor = Arc::new(RecordingExtractor {
            dir: dir.path().to_path_buf(),
            seen: Mutex::new(Vec::new()),
        });

        let downloader = Downloader::new(
            Platform::Instagram,
            extractor.clone(),
            Some(dir.path().to_path_buf()),
            AppSettings::default(),
        )
        .unwrap();

        let outcome = downloader
            .download_with_info(" http://www.instagram.com/reel/Cx1/?igsh=1 ")
            .await
            .unwrap();

        assert_eq!(outcome.normalized_url, "https://www.instagram.com/reel/Cx1/");
        assert_eq!(outcome.path, downloader.output_dir().join("clip.mp4"));
        assert!(outcome.path.is_absolute());

        let seen = extractor.seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                "https://www.instagram.com/reel/Cx1/".to_string(),
                "https://www.instagram.com/reel/Cx1/".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_output_dir_created() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let extractor = Arc::new(RecordingExtractor {
            dir: nested.clone(),
            seen: Mutex::new(Vec::new()),
        });

        let downloader = Downloader::new(
            Platform::TikTok,
            extractor,
            Some(nested.clone()),
            AppSettings::default(),
        )
        .unwrap();

        assert!(nested.is_dir());
        assert_eq!(
            downloader.options().output_template,
            nested.join("%(title)s.%(ext)s").to_string_lossy()
        );
    }
}
