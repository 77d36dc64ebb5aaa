//! On-demand image resizing.
//!
//! Images are decoded with the `image` crate, scaled to a requested width
//! with the aspect ratio preserved, and re-encoded in their source format.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};

use crate::errors::BrowserError;

/// Widest output a resize may produce
pub const MAX_WIDTH: u32 = 8192;

/// Upper bound on output pixels, whatever the aspect ratio
pub const MAX_PIXELS: u64 = 40_000_000;

/// Height that keeps the aspect ratio when scaling `width x height` to `target_width`
pub fn scaled_height(width: u32, height: u32, target_width: u32) -> u32 {
    if width == 0 {
        return height.max(1);
    }
    let scaled = (height as f64 * target_width as f64 / width as f64).round();
    (scaled as u32).max(1)
}

fn decode(bytes: &[u8]) -> Result<(DynamicImage, ImageFormat), BrowserError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(BrowserError::Io)?;
    let format = reader
        .format()
        .ok_or_else(|| BrowserError::Render("Unrecognized image format".to_string()))?;
    let img = reader
        .decode()
        .map_err(|e| BrowserError::Render(format!("Failed to decode image: {}", e)))?;
    Ok((img, format))
}

/// Resize encoded image bytes to `target_width`, returning bytes in the same format.
///
/// Targets wider than [`MAX_WIDTH`] or larger than [`MAX_PIXELS`] are refused
/// before any pixel buffer is allocated.
pub fn resize_to_width(bytes: &[u8], target_width: u32) -> Result<Vec<u8>, BrowserError> {
    if target_width > MAX_WIDTH {
        return Err(BrowserError::Render(format!(
            "Requested width {} exceeds {}",
            target_width, MAX_WIDTH
        )));
    }
    let (img, format) = decode(bytes)?;
    let height = scaled_height(img.width(), img.height(), target_width);
    if target_width as u64 * height as u64 > MAX_PIXELS {
        return Err(BrowserError::Render(format!(
            "Resized image {}x{} exceeds the pixel budget",
            target_width, height
        )));
    }
    let resized = img.resize_exact(target_width, height, FilterType::Lanczos3);

    // JPEG has no alpha channel
    let resized = if format == ImageFormat::Jpeg {
        DynamicImage::ImageRgb8(resized.to_rgb8())
    } else {
        resized
    };

    let mut out = Cursor::new(Vec::new());
    resized
        .write_to(&mut out, format)
        .map_err(|e| BrowserError::Render(format!("Failed to encode image: {}", e)))?;
    Ok(out.into_inner())
}
