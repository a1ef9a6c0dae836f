use crate::downloader::options::DownloadOptions;
use crate::extractor::models::MediaInfo;
use crate::utils::error::ExtractorError;
use async_trait::async_trait;

/// Core trait for extraction engines
///
/// This trait isolates the orchestrator from the engine in use
/// (yt-dlp subprocess, in-process bindings, test doubles).
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Returns a unique identifier for this engine (e.g. "ytdlp")
    fn id(&self) -> &'static str;

    /// Whether proxy suppression is applied per call by the engine itself.
    ///
    /// Engines returning `false` get the process environment scrubbed of proxy
    /// variables for the duration of the call.
    fn isolates_proxy(&self) -> bool {
        false
    }

    /// Resolves metadata for `url` without downloading
    async fn resolve_info(
        &self,
        url: &str,
        options: &DownloadOptions,
    ) -> Result<MediaInfo, ExtractorError>;

    /// Downloads `url` to the options' output template
    async fn download(&self, url: &str, options: &DownloadOptions) -> Result<(), ExtractorError>;
}
