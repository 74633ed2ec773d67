//! TeraBox link parsing.
//!
//! Share links come in a few shapes:
//! - `https://terabox.com/s/1abc123` (path style)
//! - `https://.../sharing/link?surl=...&id=abc123` (query style)
//! - `https://.../play?v=abc123` (player style)
//!
//! Anything else is either rejected or, when the raw-ID fallback is enabled,
//! trimmed and forwarded upstream as-is.

use once_cell::sync::Lazy;
use regex::Regex;

static PATH_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/s/([A-Za-z0-9_-]+)").unwrap()
});

static QUERY_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[?&]id=([A-Za-z0-9_-]+)").unwrap()
});

static PLAYER_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[?&]v=([A-Za-z0-9_-]+)").unwrap()
});

/// Extract a video ID from free-form message text.
///
/// Tries the path pattern first, then the `id=` and `v=` query patterns.
/// Returns `None` when nothing matches.
pub fn extract_id(text: &str) -> Option<String> {
    for re in [&*PATH_ID, &*QUERY_ID, &*PLAYER_ID] {
        if let Some(caps) = re.captures(text) {
            return Some(caps[1].to_string());
        }
    }
    None
}

/// Like [`extract_id`], but falls back to the trimmed input when no pattern
/// matches and `accept_raw` is set.
pub fn extract_id_with_fallback(text: &str, accept_raw: bool) -> Option<String> {
    extract_id(text).or_else(|| {
        if accept_raw {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_path_style() {
        assert_eq!(
            extract_id("https://terabox.com/s/abc123"),
            Some("abc123".to_string())
        );
        assert_eq!(
            extract_id("https://1024terabox.com/s/1aBc_-9 check this out"),
            Some("1aBc_-9".to_string())
        );
    }

    #[test]
    fn test_extract_query_style() {
        assert_eq!(
            extract_id("https://example.com/share?id=xyz"),
            Some("xyz".to_string())
        );
        assert_eq!(
            extract_id("https://example.com/play?foo=1&v=vid42"),
            Some("vid42".to_string())
        );
    }

    #[test]
    fn test_no_match_without_fallback() {
        assert_eq!(extract_id("just some words"), None);
        assert_eq!(extract_id_with_fallback("just some words", false), None);
    }

    #[test]
    fn test_raw_fallback_returns_trimmed_input() {
        assert_eq!(
            extract_id_with_fallback("  rawid99  ", true),
            Some("rawid99".to_string())
        );
        assert_eq!(extract_id_with_fallback("   ", true), None);
    }
}
