//! Per-call engine configuration

use crate::platform::Platform;
use crate::utils::config::AppSettings;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Output file name pattern, resolved by the engine
pub const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

/// Options handed to the engine for one download call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadOptions {
    /// Absolute output template (`<dir>/%(title)s.%(ext)s`)
    pub output_template: String,

    /// Request headers sent by the engine
    pub http_headers: BTreeMap<String, String>,

    /// Proxy override; empty string means "connect directly"
    pub proxy: String,

    /// Format selector
    pub format: String,

    /// Extractor arguments keyed by extractor, then argument name
    pub extractor_args: BTreeMap<String, BTreeMap<String, String>>,

    pub socket_timeout: Option<Duration>,

    /// Only fetch the linked item even if it belongs to a playlist
    pub no_playlist: bool,
}

impl DownloadOptions {
    /// Options shared by every platform
    pub fn base(output_dir: &Path, settings: &AppSettings) -> Self {
        let mut http_headers = BTreeMap::new();
        http_headers.insert("User-Agent".to_string(), settings.user_agent.clone());
        http_headers.insert(
            "Accept".to_string(),
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8"
                .to_string(),
        );
        http_headers.insert("Accept-Language".to_string(), "en-US,en;q=0.9".to_string());
        http_headers.insert("Sec-Fetch-Mode".to_string(), "navigate".to_string());

        Self {
            output_template: output_dir.join(OUTPUT_TEMPLATE).to_string_lossy().into_owned(),
            http_headers,
            proxy: String::new(),
            format: settings.format.clone(),
            extractor_args: BTreeMap::new(),
            socket_timeout: Some(Duration::from_secs(settings.socket_timeout_secs)),
            no_playlist: true,
        }
    }

    /// Base options extended with the platform's referer and extractor hints
    pub fn for_platform(platform: Platform, output_dir: &Path, settings: &AppSettings) -> Self {
        let profile = platform.profile();
        let mut options = Self::base(output_dir, settings);

        options
            .http_headers
            .insert("Referer".to_string(), profile.referer.to_string());

        if !profile.extractor_args.is_empty() {
            let args = options
                .extractor_args
                .entry(profile.id.to_string())
                .or_default();
            for (key, value) in profile.extractor_args {
                args.insert(key.to_string(), value.to_string());
            }
        }

        options
    }

    /// Render as yt-dlp command line arguments
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "-o".to_string(),
            self.output_template.clone(),
            "-f".to_string(),
            self.format.clone(),
            "--proxy".to_string(),
            self.proxy.clone(),
        ];

        for (name, value) in &self.http_headers {
            args.push("--add-header".to_string());
            args.push(format!("{}:{}", name, value));
        }

        for (extractor, extractor_args) in &self.extractor_args {
            let joined = extractor_args
                .iter()
                .map(|(key, value)| format!("{}={}", key, value))
                .collect::<Vec<_>>()
                .join(";");
            args.push("--extractor-args".to_string());
            args.push(format!("{}:{}", extractor, joined));
        }

        if let Some(timeout) = self.socket_timeout {
            args.push("--socket-timeout".to_string());
            args.push(timeout.as_secs().to_string());
        }

        if self.no_playlist {
            args.push("--no-playlist".to_string());
        }

        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1))
            .map(String::as_str)
    }

    #[test]
    fn test_base_options() {
        let options = DownloadOptions::base(Path::new("/tmp/out"), &AppSettings::default());

        assert_eq!(options.output_template, "/tmp/out/%(title)s.%(ext)s");
        assert_eq!(options.proxy, "");
        assert_eq!(options.format, "best[ext=mp4]/best");
        assert!(options.http_headers["User-Agent"].contains("Mozilla/5.0"));
        assert!(options.http_headers.contains_key("Accept"));
        assert!(options.http_headers.contains_key("Accept-Language"));
        assert!(!options.http_headers.contains_key("Referer"));
        assert!(options.extractor_args.is_empty());
    }

    #[test]
    fn test_tiktok_hints() {
        let options =
            DownloadOptions::for_platform(Platform::TikTok, Path::new("/tmp"), &AppSettings::default());

        assert_eq!(options.http_headers["Referer"], "https://www.tiktok.com/");
        let tiktok = &options.extractor_args["tiktok"];
        assert_eq!(tiktok["webpage_download_timeout"], "60");
        assert_eq!(tiktok["api_hostname"], "api.tiktok.com");
    }

    #[test]
    fn test_instagram_hints() {
        let options = DownloadOptions::for_platform(
            Platform::Instagram,
            Path::new("/tmp"),
            &AppSettings::default(),
        );

        assert_eq!(options.http_headers["Referer"], "https://www.instagram.com/");
        assert_eq!(options.extractor_args["instagram"]["api_hostname"], "i.instagram.com");
        assert!(!options.extractor_args.contains_key("tiktok"));
    }

    #[test]
    fn test_args_rendering() {
        let settings = AppSettings {
            socket_timeout_secs: 45,
            ..Default::default()
        };
        let args = DownloadOptions::for_platform(Platform::TikTok, Path::new("/dl"), &settings)
            .to_args();

        assert_eq!(flag_value(&args, "-o"), Some("/dl/%(title)s.%(ext)s"));
        assert_eq!(flag_value(&args, "-f"), Some("best[ext=mp4]/best"));
        assert_eq!(flag_value(&args, "--proxy"), Some(""));
        assert_eq!(flag_value(&args, "--socket-timeout"), Some("45"));
        assert_eq!(
            flag_value(&args, "--extractor-args"),
            Some("tiktok:api_hostname=api.tiktok.com;webpage_download_timeout=60")
        );
        assert!(args.contains(&"Referer:https://www.tiktok.com/".to_string()));
        assert!(args.contains(&"--no-playlist".to_string()));
    }
}
