//! Route keys: normalizing request paths and declared page paths

use std::borrow::Cow;
use std::path::PathBuf;

/// Canonical key for the site's home page
pub const HOME: &str = "/";

/// Characters that may not appear in an exported path segment
const FORBIDDEN_CHARS: &[char] = &['<', '>', ':', '|', '?', '*', '#', '\\', '"'];

/// Normalize a request path or a declared page path into a lookup key.
///
/// Query strings and fragments are dropped and empty segments collapsed. A
/// trailing `index.html` is treated as the directory itself. Percent-escapes
/// are decoded one segment at a time, so an encoded `/` stays inside its
/// segment as `%2F` (and a literal `%` as `%25`). Empty and root paths map
/// to [`HOME`].
///
/// ```rust
/// use site_blueprint::blueprint::normalize_path;
///
/// assert_eq!(normalize_path(""), "/");
/// assert_eq!(normalize_path("about/"), "/about");
/// assert_eq!(normalize_path("/services?ref=nav"), "/services");
/// ```
pub fn normalize_path(raw: &str) -> String {
    let raw = raw.trim();
    let raw = raw.split(|c: char| c == '?' || c == '#').next().unwrap_or_default();

    let mut segments: Vec<String> = raw
        .split('/')
        .map(decode_segment)
        .filter(|s| !s.is_empty())
        .collect();

    if segments.last().map(String::as_str) == Some("index.html") {
        segments.pop();
    }

    if segments.is_empty() {
        return HOME.to_string();
    }
    format!("/{}", segments.join("/"))
}

fn decode_segment(segment: &str) -> String {
    let decoded = urlencoding::decode(segment).unwrap_or(Cow::Borrowed(segment));
    decoded.trim().replace('%', "%25").replace('/', "%2F")
}

/// Relative output file for a normalized key, e.g. `/about/team` ->
/// `about/team/index.html`.
///
/// Returns `None` when a segment would escape the output directory or
/// contains characters that are not safe in a file name.
pub fn output_file(key: &str) -> Option<PathBuf> {
    let mut path = PathBuf::new();
    for segment in key.split('/').filter(|s| !s.is_empty()) {
        if !is_safe_segment(segment) {
            return None;
        }
        path.push(segment);
    }
    path.push("index.html");
    Some(path)
}

fn is_safe_segment(segment: &str) -> bool {
    segment != "."
        && segment != ".."
        && !segment.starts_with('~')
        && !segment.starts_with('$')
        && !segment
            .chars()
            .any(|c| c.is_control() || FORBIDDEN_CHARS.contains(&c))
}
