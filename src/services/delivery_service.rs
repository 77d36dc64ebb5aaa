use std::io::SeekFrom;
use std::path::Path;

use axum::body::Body;
use axum::http::response::Builder;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use log::{debug, error, info, warn};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;

use crate::errors::BrowserError;
use crate::services::{classifier, image_service};
use crate::types::{ByteRange, DeliveryRequest, MediaKind};

/// Parse a `Range` header value.
///
/// Only a single `bytes=` range is understood; anything else yields `None`
/// and the caller serves the whole file.
pub fn parse_range(value: &str) -> Option<ByteRange> {
    let spec = value.trim();
    let (unit, spec) = spec.split_once('=')?;
    if !unit.trim().eq_ignore_ascii_case("bytes") || spec.contains(',') {
        return None;
    }
    let (start, end) = spec.trim().split_once('-')?;
    let (start, end) = (start.trim(), end.trim());
    match (start.is_empty(), end.is_empty()) {
        (true, false) => end.parse().ok().map(ByteRange::Suffix),
        (false, true) => start.parse().ok().map(|start| ByteRange::FromTo { start, end: None }),
        (false, false) => {
            let start = start.parse().ok()?;
            let end = end.parse().ok()?;
            Some(ByteRange::FromTo { start, end: Some(end) })
        }
        (true, true) => None,
    }
}

/// Turn an optional range into inclusive `(start, end)` offsets within `total` bytes.
///
/// Ends past the file are clamped; a start past the file, an end before the
/// start or an empty suffix can't be satisfied. `total` must be non-zero.
pub fn resolve_range(range: Option<ByteRange>, total: u64) -> Result<(u64, u64), BrowserError> {
    let last = total - 1;
    match range {
        None => Ok((0, last)),
        Some(ByteRange::FromTo { start, end }) => {
            let end = end.unwrap_or(last).min(last);
            if start >= total || start > end {
                Err(BrowserError::RangeNotSatisfiable { total })
            } else {
                Ok((start, end))
            }
        }
        Some(ByteRange::Suffix(0)) => Err(BrowserError::RangeNotSatisfiable { total }),
        Some(ByteRange::Suffix(len)) => Ok((total - len.min(total), last)),
    }
}

fn not_found(path: &Path) -> impl FnOnce(std::io::Error) -> BrowserError + '_ {
    move |e| {
        error!("Failed to read {:?}: {}", path, e);
        BrowserError::NotFound
    }
}

fn build(builder: Builder, body: Body) -> Result<Response, BrowserError> {
    builder
        .body(body)
        .map_err(|e| BrowserError::Render(format!("Failed to build response: {}", e)))
}

/// Serves single files: ranged video, resized images, raw passthrough
#[derive(Clone, Default)]
pub struct DeliveryService;

impl DeliveryService {
    pub fn new() -> Self {
        Self
    }

    /// Serve a file. Read failures become `404 Not found`.
    pub async fn deliver(&self, request: &DeliveryRequest) -> Response {
        let path = &request.absolute_path;
        let result = match classifier::media_kind(path) {
            MediaKind::Video => self.deliver_video(path, request.byte_range).await,
            MediaKind::Image => self.deliver_image(path, request.requested_width).await,
            MediaKind::Other => self.deliver_raw(path).await,
        };
        match result {
            Ok(response) => {
                info!("Serving {:?} with status {}", path, response.status());
                response
            }
            Err(e) => {
                warn!("Delivery of {:?} failed: {}", path, e);
                e.into_response()
            }
        }
    }

    async fn deliver_video(
        &self,
        path: &Path,
        range: Option<ByteRange>,
    ) -> Result<Response, BrowserError> {
        let content_type = classifier::content_type_for(path);
        let mut file = File::open(path).await.map_err(not_found(path))?;
        let total = file.metadata().await.map_err(not_found(path))?.len();

        if total == 0 {
            return build(
                Builder::new()
                    .status(StatusCode::OK)
                    .header(header::CONTENT_TYPE, content_type)
                    .header(header::ACCEPT_RANGES, "bytes")
                    .header(header::CONTENT_LENGTH, 0),
                Body::empty(),
            );
        }

        let (start, end) = resolve_range(range, total)?;
        let length = end - start + 1;
        debug!("Video range {}-{}/{} for {:?}", start, end, total, path);

        file.seek(SeekFrom::Start(start)).await.map_err(not_found(path))?;
        let stream = ReaderStream::new(file.take(length));

        build(
            Builder::new()
                .status(StatusCode::PARTIAL_CONTENT)
                .header(header::CONTENT_TYPE, content_type)
                .header(header::CONTENT_RANGE, format!("bytes {}-{}/{}", start, end, total))
                .header(header::ACCEPT_RANGES, "bytes")
                .header(header::CONTENT_LENGTH, length),
            Body::from_stream(stream),
        )
    }

    async fn deliver_image(&self, path: &Path, width: Option<u32>) -> Result<Response, BrowserError> {
        let Some(width) = width else {
            return self.deliver_raw(path).await;
        };
        let content_type = classifier::content_type_for(path);
        let original = tokio::fs::read(path).await.map_err(not_found(path))?;

        let display = path.display().to_string();
        let bytes = tokio::task::spawn_blocking(move || {
            match image_service::resize_to_width(&original, width) {
                Ok(resized) => resized,
                Err(e) => {
                    warn!("Serving {} unresized: {}", display, e);
                    original
                }
            }
        })
        .await?;

        build(
            Builder::new()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, content_type)
                .header(header::CONTENT_LENGTH, bytes.len()),
            Body::from(bytes),
        )
    }

    async fn deliver_raw(&self, path: &Path) -> Result<Response, BrowserError> {
        let content_type = classifier::content_type_for(path);
        let file = File::open(path).await.map_err(not_found(path))?;
        let metadata = file.metadata().await.map_err(not_found(path))?;
        if metadata.is_dir() {
            return Err(BrowserError::NotFound);
        }

        build(
            Builder::new()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, content_type)
                .header(header::CONTENT_LENGTH, metadata.len()),
            Body::from_stream(ReaderStream::new(file)),
        )
    }
}
