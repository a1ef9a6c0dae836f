//! Filename sanitation for engine titles

/// Turn a media title into a safe file name.
///
/// Used when the engine metadata carries no computed filename and the
/// expected output has to be derived from the title.
pub fn sanitize_filename(name: &str) -> String {
    // Characters invalid on Windows/macOS/Linux filesystems
    let invalid_chars = ['/', '\\', ':', '*', '?', '"', '<', '>', '|', '\0'];

    let mut sanitized = name.replace("..", "");

    sanitized = sanitized
        .chars()
        .map(|c| if invalid_chars.contains(&c) { '_' } else { c })
        .collect();

    sanitized = sanitized.trim().trim_start_matches('.').to_string();

    // Windows rejects trailing dots and spaces
    sanitized = sanitized.trim_end_matches('.').trim_end().to_string();

    while sanitized.contains("__") {
        sanitized = sanitized.replace("__", "_");
    }

    if sanitized.is_empty() {
        return "unnamed_file".to_string();
    }

    if sanitized.chars().count() > 200 {
        sanitized = sanitized.chars().take(200).collect();
    }

    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_chars_replaced() {
        assert_eq!(sanitize_filename("a/b:c*d"), "a_b_c_d");
        assert_eq!(sanitize_filename("what?? really"), "what_ really");
    }

    #[test]
    fn test_traversal_removed() {
        let name = sanitize_filename("../../etc/passwd");
        assert!(!name.contains(".."));
        assert!(!name.contains('/'));
    }

    #[test]
    fn test_empty_fallback() {
        assert_eq!(sanitize_filename("   "), "unnamed_file");
        assert_eq!(sanitize_filename("..."), "unnamed_file");
    }

    #[test]
    fn test_long_titles_truncated() {
        let long = "é".repeat(500);
        assert_eq!(sanitize_filename(&long).chars().count(), 200);
    }
}
