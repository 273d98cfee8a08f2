//! Filename sanitization for download attachments.
//!
//! Resolved titles come from arbitrary video pages and may contain path
//! separators or characters that are invalid in filenames (or in a
//! `Content-Disposition` header). Valid Unicode text is preserved as-is.

/// Characters that are invalid in filenames on at least one platform.
const INVALID_CHARS: &[char] = &['<', '>', ':', '"', '|', '?', '*'];

/// Sanitize a title for use as a download filename.
///
/// Path separators become `-` so the derived name stays a single path
/// component; other invalid characters and control characters become `_`.
/// Leading/trailing spaces and dots are trimmed, and an empty result falls
/// back to `"video"`.
pub fn sanitize_filename(input: &str) -> String {
    let mut result = String::with_capacity(input.len());

    for c in input.chars() {
        if c == '/' || c == '\\' {
            result.push('-');
        } else if c.is_control() || INVALID_CHARS.contains(&c) {
            result.push('_');
        } else {
            result.push(c);
        }
    }

    let trimmed = result.trim_matches(|c| c == ' ' || c == '.');

    if trimmed.is_empty() {
        "video".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_separators_replaced() {
        assert_eq!(sanitize_filename("a/b/c"), "a-b-c");
        assert_eq!(sanitize_filename("a\\b"), "a-b");
    }

    #[test]
    fn test_invalid_chars_replaced() {
        assert_eq!(sanitize_filename("what?"), "what_");
        assert_eq!(sanitize_filename("a:b\"c"), "a_b_c");
    }

    #[test]
    fn test_control_chars_replaced() {
        assert_eq!(sanitize_filename("a\x00b\nc"), "a_b_c");
    }

    #[test]
    fn test_unicode_preserved() {
        assert_eq!(sanitize_filename("观看一只青蛙"), "观看一只青蛙");
    }

    #[test]
    fn test_empty_falls_back() {
        assert_eq!(sanitize_filename(""), "video");
        assert_eq!(sanitize_filename("  ..  "), "video");
    }

    #[test]
    fn test_trims_spaces_and_dots() {
        assert_eq!(sanitize_filename("  clip.  "), "clip");
    }

    #[test]
    fn test_deterministic() {
        let a = sanitize_filename("My Video / Part 2");
        let b = sanitize_filename("My Video / Part 2");
        assert_eq!(a, b);
        assert_eq!(a, "My Video - Part 2");
    }
}
