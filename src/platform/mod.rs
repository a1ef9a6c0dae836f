//! Supported sites and URL normalization

pub mod profile;

pub use profile::PlatformProfile;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A site reelgrab knows how to prepare downloads for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    TikTok,
    Instagram,
}

impl Platform {
    /// Every supported platform, in detection order
    pub const ALL: [Platform; 2] = [Platform::TikTok, Platform::Instagram];

    /// Static profile driving normalization and engine options
    pub fn profile(self) -> &'static PlatformProfile {
        match self {
            Platform::TikTok => &profile::TIKTOK,
            Platform::Instagram => &profile::INSTAGRAM,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.profile().id
    }

    /// Find the platform whose domain hosts `url`
    pub fn detect(url: &str) -> Option<Platform> {
        Self::ALL
            .into_iter()
            .find(|platform| platform.profile().matches_host(url))
    }

    /// Map a user-supplied string to this platform's canonical URL form.
    ///
    /// Input is trimmed. Strings not hosted on the platform's domain are
    /// otherwise returned as-is and left for the engine to reject. Matching
    /// strings get an `https://` scheme (inserted or upgraded from `http://`)
    /// and, when the profile asks for it, lose their query string.
    pub fn normalize_url(self, raw: &str) -> String {
        normalize_with(self.profile(), raw)
    }

    /// Site-specific media id (TikTok video id or short code, Instagram shortcode)
    pub fn extract_media_id(self, url: &str) -> Option<String> {
        for marker in self.profile().media_id_markers {
            let Some(start) = url.find(marker) else {
                continue;
            };
            let id: String = url[start + marker.len()..]
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
                .collect();
            if !id.is_empty() {
                return Some(id);
            }
        }
        None
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|platform| platform.as_str() == wanted)
            .ok_or_else(|| format!("unsupported platform: {}", s))
    }
}

/// Normalize `raw` for whichever platform it belongs to.
/// Unrecognized input comes back trimmed.
pub fn normalize(raw: &str) -> String {
    match Platform::detect(raw) {
        Some(platform) => platform.normalize_url(raw),
        None => raw.trim().to_string(),
    }
}

fn normalize_with(profile: &PlatformProfile, raw: &str) -> String {
    let url = raw.trim();
    if !profile.matches_host(url) {
        return url.to_string();
    }

    let mut url = with_https_scheme(url);
    if profile.strip_query {
        if let Some(idx) = url.find('?') {
            url.truncate(idx);
            url.truncate(url.trim_end().len());
        }
    }
    url
}

fn with_https_scheme(url: &str) -> String {
    if starts_with_ignore_case(url, "https://") {
        url.to_string()
    } else if starts_with_ignore_case(url, "http://") {
        format!("https://{}", &url["http://".len()..])
    } else if let Some(rest) = url.strip_prefix("//") {
        format!("https://{}", rest)
    } else {
        format!("https://{}", url)
    }
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
