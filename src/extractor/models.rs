//! Data structures for engine metadata

use crate::utils::filename::sanitize_filename;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Media metadata resolved by the engine without downloading
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub webpage_url: Option<String>,
    #[serde(default)]
    pub ext: Option<String>,
    /// Output path computed by yt-dlp from the output template
    #[serde(default)]
    pub filename: Option<String>,
    /// Older yt-dlp releases only emit the underscored key
    #[serde(default, rename = "_filename")]
    pub legacy_filename: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub filesize: Option<u64>,
    pub uploader: Option<String>,
    pub thumbnail: Option<String>,
    pub extractor: Option<String>,
}

impl MediaInfo {
    /// Where the engine is expected to write this media inside `output_dir`.
    ///
    /// Prefers the engine-computed filename; otherwise derives
    /// `<title>.<ext>`. Relative names are resolved against `output_dir`.
    pub fn expected_path(&self, output_dir: &Path) -> Option<PathBuf> {
        let name = self
            .filename
            .as_deref()
            .or(self.legacy_filename.as_deref())
            .filter(|name| !name.trim().is_empty())
            .map(PathBuf::from)
            .or_else(|| {
                let ext = self.ext.as_deref()?;
                if self.title.trim().is_empty() {
                    return None;
                }
                Some(PathBuf::from(format!("{}.{}", sanitize_filename(&self.title), ext)))
            })?;

        if name.is_absolute() {
            Some(name)
        } else {
            Some(output_dir.join(name))
        }
    }
}
