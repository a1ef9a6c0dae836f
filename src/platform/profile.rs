//! Per-site profiles
//!
//! Each supported site is described by a static [`PlatformProfile`] instead of
//! a dedicated adapter type. Adding a site means adding a profile entry and a
//! [`Platform`](super::Platform) variant pointing at it.

/// Static description of how a site's URLs are recognized and which
/// engine hints its downloads need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformProfile {
    /// Stable identifier, also used as the yt-dlp extractor key
    pub id: &'static str,

    /// Registrable domain; a URL belongs to this site when its host is this
    /// domain or one of its subdomains
    pub domain: &'static str,

    /// Short-link fragments (redirectors). Informational; these URLs only
    /// get scheme fixes during normalization.
    pub short_link_markers: &'static [&'static str],

    /// Drop everything from the first `?` during normalization
    pub strip_query: bool,

    /// Path markers followed by the site's media id
    pub media_id_markers: &'static [&'static str],

    /// Value for the `Referer` request header
    pub referer: &'static str,

    /// Extractor arguments handed to yt-dlp under `id`
    pub extractor_args: &'static [(&'static str, &'static str)],
}

impl PlatformProfile {
    /// Whether the host of `url` is this site's domain or a subdomain of it.
    /// The domain appearing anywhere else (path, query) does not count.
    pub fn matches_host(&self, url: &str) -> bool {
        let Some(host) = host_of(url) else {
            return false;
        };
        match host.strip_suffix(self.domain) {
            Some("") => true,
            Some(prefix) => prefix.ends_with('.'),
            None => false,
        }
    }

    /// Whether `url` is one of this site's short links
    pub fn is_short_link(&self, url: &str) -> bool {
        self.short_link_markers
            .iter()
            .any(|marker| url.contains(marker))
    }
}

/// Lowercased host of a possibly scheme-less URL, without userinfo or port
fn host_of(url: &str) -> Option<String> {
    let url = url.trim();
    let rest = match url.find("://") {
        Some(idx)
            if idx > 0
                && url[..idx]
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) =>
        {
            &url[idx + 3..]
        }
        _ => url.strip_prefix("//").unwrap_or(url),
    };

    let authority = rest
        .split(|c| matches!(c, '/' | '?' | '#'))
        .next()
        .unwrap_or_default();
    let host_port = authority.rsplit('@').next().unwrap_or_default();
    let host = host_port.split(':').next().unwrap_or_default();
    if host.is_empty() {
        None
    } else {
        Some(host.to_ascii_lowercase())
    }
}

pub static TIKTOK: PlatformProfile = PlatformProfile {
    id: "tiktok",
    domain: "tiktok.com",
    short_link_markers: &["vm.tiktok.com", "vt.tiktok.com", "tiktok.com/t/"],
    strip_query: false,
    media_id_markers: &["/video/", "/photo/", "tiktok.com/t/", "vm.tiktok.com/", "vt.tiktok.com/"],
    referer: "https://www.tiktok.com/",
    extractor_args: &[
        ("webpage_download_timeout", "60"),
        ("api_hostname", "api.tiktok.com"),
    ],
};

pub static INSTAGRAM: PlatformProfile = PlatformProfile {
    id: "instagram",
    domain: "instagram.com",
    short_link_markers: &[],
    strip_query: true,
    media_id_markers: &["/p/", "/reel/", "/reels/", "/tv/"],
    referer: "https://www.instagram.com/",
    extractor_args: &[("api_hostname", "i.instagram.com")],
};
