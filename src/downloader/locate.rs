//! Finding the file the engine actually wrote

use std::path::{Path, PathBuf};
use tracing::debug;

/// Extensions tried when the expected file is missing, e.g. after the engine
/// picked or merged into a different container than announced
pub const ALTERNATE_EXTENSIONS: [&str; 4] = ["mp4", "webm", "mkv", "mov"];

/// Return `expected` if it holds data, otherwise the first non-empty sibling
/// with the same stem and one of [`ALTERNATE_EXTENSIONS`]
pub async fn locate_output(expected: &Path) -> Option<PathBuf> {
    if is_non_empty_file(expected).await {
        return Some(expected.to_path_buf());
    }

    for ext in ALTERNATE_EXTENSIONS {
        let candidate = expected.with_extension(ext);
        if candidate == expected {
            continue;
        }
        if is_non_empty_file(&candidate).await {
            debug!(
                "Expected {:?} missing, found alternate {:?}",
                expected, candidate
            );
            return Some(candidate);
        }
    }

    None
}

async fn is_non_empty_file(path: &Path) -> bool {
    match tokio::fs::metadata(path).await {
        Ok(meta) => meta.is_file() && meta.len() > 0,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_expected_file_wins() {
        let dir = tempdir().unwrap();
        let expected = dir.path().join("clip.mp4");
        std::fs::write(&expected, b"data").unwrap();
        std::fs::write(dir.path().join("clip.webm"), b"data").unwrap();

        assert_eq!(locate_output(&expected).await, Some(expected));
    }

    #[tokio::test]
    async fn test_alternate_extension() {
        let dir = tempdir().unwrap();
        let expected = dir.path().join("my.clip.mp4");
        let merged = dir.path().join("my.clip.mkv");
        std::fs::write(&merged, b"data").unwrap();

        assert_eq!(locate_output(&expected).await, Some(merged));
    }

    #[tokio::test]
    async fn test_empty_files_do_not_count() {
        let dir = tempdir().unwrap();
        let expected = dir.path().join("clip.mp4");
        std::fs::write(&expected, b"").unwrap();
        std::fs::write(dir.path().join("clip.webm"), b"").unwrap();

        assert_eq!(locate_output(&expected).await, None);
    }

    #[tokio::test]
    async fn test_nothing_found() {
        let dir = tempdir().unwrap();
        assert_eq!(locate_output(&dir.path().join("clip.mp4")).await, None);
    }
}
