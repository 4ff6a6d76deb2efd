//! Small helpers shared by the extractors and logging.
//!
//! - Text normalization for titles scraped from HTML
//! - Link resolution against a source's base URL
//! - String truncation for log fields

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Collapse runs of whitespace (including newlines and tabs) to a single
/// space and trim the ends.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(clean_text("  Deep\n   Learning\t"), "Deep Learning");
/// ```
pub fn clean_text(s: &str) -> String {
    WHITESPACE_RE.replace_all(s.trim(), " ").into_owned()
}

/// Resolve an `href` against a base URL.
///
/// Relative paths are joined onto `base`; absolute URLs are returned as-is.
/// Returns `None` if `base` is not a valid URL or the join fails.
pub fn resolve_link(base: &str, href: &str) -> Option<String> {
    let base = Url::parse(base).ok()?;
    base.join(href.trim()).ok().map(|u| u.to_string())
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut at `max` bytes (backing off to a char boundary)
/// with an ellipsis and byte count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}
