use std::path::{Component, Path};

use crate::errors::BrowserError;

/// Names longer than this are shortened in listings
pub const MAX_DISPLAY_NAME: usize = 40;

/// Escape HTML special characters
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape HTML attribute values
pub fn escape_attr(text: &str) -> String {
    escape_html(text)
}

/// Normalize a request path into `/`-joined segments relative to the root.
///
/// Empty and `.` segments are dropped. Anything that could climb out of the
/// root (`..`, absolute or drive-prefixed segments, NUL bytes) is rejected.
pub fn normalize_path(path: &str) -> Result<String, BrowserError> {
    let mut parts = Vec::new();
    for part in path.split(['/', '\\']) {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." || part.contains('\0') {
            return Err(BrowserError::InvalidPath);
        }
        let mut components = Path::new(part).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => parts.push(part),
            _ => return Err(BrowserError::InvalidPath),
        }
    }
    Ok(parts.join("/"))
}

/// Join a normalized relative directory and a child name
pub fn join_relative(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}

/// Percent-encode each segment of a relative path and prefix it with `/`
pub fn encode_href(relative: &str) -> String {
    let encoded: Vec<String> = relative
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| urlencoding::encode(s).into_owned())
        .collect();
    format!("/{}", encoded.join("/"))
}

/// Link to a directory page, with a trailing slash and the gallery flag kept
pub fn directory_href(relative: &str, gallery: bool) -> String {
    let mut href = encode_href(relative);
    if !href.ends_with('/') {
        href.push('/');
    }
    if gallery {
        href.push_str("?gallery=true");
    }
    href
}

/// Parse a query parameter, URL-decoding its value.
///
/// Returns `None` when the key is absent, `Some("")` when it is present
/// without a value.
pub fn parse_query_param(query: &str, param: &str) -> Option<String> {
    let query_string = query.trim_start_matches('?');
    for pair in query_string.split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if key != param {
            continue;
        }
        let value = value.replace('+', " ");
        return Some(
            urlencoding::decode(&value)
                .map(|v| v.into_owned())
                .unwrap_or(value),
        );
    }
    None
}

/// Read a presence flag such as `?gallery` or `?shuffle=true`
pub fn query_flag(query: &str, param: &str) -> bool {
    match parse_query_param(query, param) {
        None => false,
        Some(value) => {
            let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
            !matches!(
                value.to_ascii_lowercase().as_str(),
                "false" | "0" | "no" | "off"
            )
        }
    }
}

/// Parse the `width` query parameter; only positive integers count
pub fn parse_width(query: &str) -> Option<u32> {
    parse_query_param(query, "width")
        .and_then(|w| w.trim().parse::<u32>().ok())
        .filter(|w| *w > 0)
}

/// Shorten long names for display
pub fn truncate_name(name: &str) -> String {
    if name.chars().count() > MAX_DISPLAY_NAME {
        let head: String = name.chars().take(MAX_DISPLAY_NAME).collect();
        format!("{}...", head)
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_drops_empty_and_dot_segments() {
        assert_eq!(normalize_path("/photos//2024/./trip/").unwrap(), "photos/2024/trip");
        assert_eq!(normalize_path("").unwrap(), "");
        assert_eq!(normalize_path("/").unwrap(), "");
    }

    #[test]
    fn normalize_rejects_parent_segments() {
        assert!(matches!(normalize_path("../etc/passwd"), Err(BrowserError::InvalidPath)));
        assert!(matches!(normalize_path("photos/../../x"), Err(BrowserError::InvalidPath)));
        assert!(matches!(normalize_path("photos\\..\\x"), Err(BrowserError::InvalidPath)));
    }

    #[test]
    fn href_segments_are_encoded() {
        assert_eq!(encode_href("my photos/a#1.jpg"), "/my%20photos/a%231.jpg");
        assert_eq!(encode_href(""), "/");
    }

    #[test]
    fn directory_links_end_with_slash() {
        assert_eq!(directory_href("", false), "/");
        assert_eq!(directory_href("a b", true), "/a%20b/?gallery=true");
    }

    #[test]
    fn query_params_decode_and_detect_presence() {
        assert_eq!(parse_query_param("gallery=true&width=100", "width").as_deref(), Some("100"));
        assert_eq!(parse_query_param("gallery", "gallery").as_deref(), Some(""));
        assert_eq!(parse_query_param("q=a%20b+c", "q").as_deref(), Some("a b c"));
        assert_eq!(parse_query_param("gallery=true", "shuffle"), None);
    }

    #[test]
    fn flags_treat_false_like_values_as_off() {
        assert!(query_flag("gallery", "gallery"));
        assert!(query_flag("gallery=true", "gallery"));
        assert!(!query_flag("gallery=%22false%22", "gallery"));
        assert!(!query_flag("gallery=0", "gallery"));
        assert!(!query_flag("", "gallery"));
    }

    #[test]
    fn width_must_be_a_positive_integer() {
        assert_eq!(parse_width("width=100"), Some(100));
        assert_eq!(parse_width("width=abc"), None);
        assert_eq!(parse_width("width=0"), None);
        assert_eq!(parse_width("width=-5"), None);
        assert_eq!(parse_width(""), None);
    }

    #[test]
    fn long_names_are_truncated() {
        let long = "x".repeat(45);
        assert_eq!(truncate_name(&long), format!("{}...", "x".repeat(40)));
        assert_eq!(truncate_name("short.jpg"), "short.jpg");
    }
}
