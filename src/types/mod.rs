use std::path::PathBuf;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub root_dir: Arc<PathBuf>,
    pub assets_dir: Arc<PathBuf>,
}

/// Media category of a file, derived from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Other,
}

/// One child of a listed directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub absolute_path: PathBuf,
    /// Client-visible path, `/`-separated and relative to the root
    pub relative_path: String,
    pub is_dir: bool,
    pub media_kind: MediaKind,
}

/// How a directory is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    List,
    Gallery,
}

/// Per-request rendering parameters for a directory page
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub root_dir: Arc<PathBuf>,
    /// Normalized directory relative to the root, empty for the root itself
    pub current_dir: String,
    pub mode: RenderMode,
    pub shuffle: bool,
}

impl RenderContext {
    pub fn is_gallery(&self) -> bool {
        self.mode == RenderMode::Gallery
    }
}

/// A parsed `Range: bytes=...` request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteRange {
    /// `bytes=<start>-` or `bytes=<start>-<end>`
    FromTo { start: u64, end: Option<u64> },
    /// `bytes=-<len>`
    Suffix(u64),
}

/// Per-request parameters for serving a single file
#[derive(Debug, Clone)]
pub struct DeliveryRequest {
    pub absolute_path: PathBuf,
    pub requested_width: Option<u32>,
    pub byte_range: Option<ByteRange>,
}

/// Template rendering context
#[derive(Debug, Clone)]
pub struct TemplateContext {
    pub title: String,
    pub header: String,
    pub content: String,
}
