use std::path::Path;

use crate::types::MediaKind;

/// Served when an extension is missing from the MIME table
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "m4v", "webm", "mov", "mkv"];

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// Classify a file by its extension
pub fn media_kind(path: &Path) -> MediaKind {
    match extension_of(path) {
        Some(ext) if IMAGE_EXTENSIONS.contains(&ext.as_str()) => MediaKind::Image,
        Some(ext) if VIDEO_EXTENSIONS.contains(&ext.as_str()) => MediaKind::Video,
        _ => MediaKind::Other,
    }
}

/// Look up the content type for a file, defaulting to `text/plain`
pub fn content_type_for(path: &Path) -> &'static str {
    let Some(ext) = extension_of(path) else {
        return DEFAULT_CONTENT_TYPE;
    };
    match ext.as_str() {
        "html" | "htm" => "text/html",
        "txt" => "text/plain",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "md" => "text/markdown",
        "pdf" => "application/pdf",
        "gif" => "image/gif",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "mkv" => "video/x-matroska",
        "mp3" => "audio/mpeg",
        _ => DEFAULT_CONTENT_TYPE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_extension_ignoring_case() {
        assert_eq!(media_kind(Path::new("a/b/photo.JPG")), MediaKind::Image);
        assert_eq!(media_kind(Path::new("clip.mp4")), MediaKind::Video);
        assert_eq!(media_kind(Path::new("notes.txt")), MediaKind::Other);
        assert_eq!(media_kind(Path::new("README")), MediaKind::Other);
    }

    #[test]
    fn svg_is_not_resizable_but_has_a_mime_type() {
        assert_eq!(media_kind(Path::new("logo.svg")), MediaKind::Other);
        assert_eq!(content_type_for(Path::new("logo.svg")), "image/svg+xml");
    }

    #[test]
    fn unknown_extensions_default_to_text_plain() {
        assert_eq!(content_type_for(Path::new("archive.xyz")), "text/plain");
        assert_eq!(content_type_for(Path::new("Makefile")), "text/plain");
        assert_eq!(content_type_for(Path::new("movie.mp4")), "video/mp4");
    }
}
