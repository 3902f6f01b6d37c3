//! Image normalization for the vision prompt

use std::io::Cursor;

use base64::Engine;
use image::ImageFormat;

use crate::{Error, Result};

/// Re-encode uploaded image bytes as JPEG
///
/// Any format the `image` crate can decode is accepted; the result is
/// always JPEG so downstream prompt text references one fixed encoding.
///
/// # Errors
///
/// Returns `Error::Image` if the bytes do not decode as an image or the
/// JPEG encoder fails.
pub fn to_jpeg(data: &[u8]) -> Result<Vec<u8>> {
    let img = image::load_from_memory(data)
        .map_err(|e| Error::Image(format!("invalid image file: {e}")))?;

    // JPEG has no alpha channel; flatten before encoding
    let rgb = image::DynamicImage::ImageRgb8(img.to_rgb8());

    let mut buf = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut buf), ImageFormat::Jpeg)
        .map_err(|e| Error::Image(format!("jpeg encoding failed: {e}")))?;

    Ok(buf)
}

/// Base64-encode a JPEG for embedding in the instruction text
#[must_use]
pub fn encode_base64(jpeg: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(jpeg)
}
