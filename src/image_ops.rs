//! Image processing operations.
//!
//! The controller itself only ever encodes; cropping and thumbnailing are
//! used by the desktop host to play the part of the camera and crop
//! experiences.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use tracing::trace;

use crate::error::{CaptureError, Result};

/// JPEG quality used for every stored capture.
pub const JPEG_QUALITY: u8 = 90;

/// Encode an image as JPEG at the given quality.
///
/// Alpha is dropped; JPEG has no alpha channel.
pub fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    let mut bytes = Vec::new();

    JpegEncoder::new_with_quality(&mut bytes, quality)
        .encode(&rgb, width, height, image::ColorType::Rgb8.into())
        .map_err(|e| CaptureError::Encode(e.to_string()))?;

    trace!(width, height, quality, len = bytes.len(), "Encoded JPEG");
    Ok(bytes)
}

/// Shrink an image so neither side exceeds `max_side`, keeping aspect ratio.
///
/// Images already within bounds are returned unchanged.
pub fn thumbnail(img: &DynamicImage, max_side: u32) -> DynamicImage {
    let (w, h) = img.dimensions();
    if w <= max_side && h <= max_side {
        return img.clone();
    }
    img.thumbnail(max_side, max_side)
}

/// Largest centred region of `width`×`height` with aspect `ax`:`ay`.
///
/// Returns `(x, y, w, h)`.
pub fn centered_region(width: u32, height: u32, ax: u32, ay: u32) -> (u32, u32, u32, u32) {
    let (w, h) = (u64::from(width), u64::from(height));
    let (ax, ay) = (u64::from(ax.max(1)), u64::from(ay.max(1)));

    let (cw, ch) = if w * ay > h * ax {
        (h * ax / ay, h)
    } else {
        (w, w * ay / ax)
    };

    // cw <= width and ch <= height, so the narrowing casts are lossless.
    #[allow(clippy::cast_possible_truncation)]
    let (cw, ch) = (cw.max(1) as u32, ch.max(1) as u32);
    ((width - cw) / 2, (height - ch) / 2, cw, ch)
}

/// Crop an image to the given aspect ratio around its centre, then scale it
/// to exactly `out_w`×`out_h`.
pub fn crop_to_aspect(
    img: &DynamicImage,
    aspect: (u32, u32),
    out_w: u32,
    out_h: u32,
) -> Result<DynamicImage> {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Err(CaptureError::ImageProcessing(
            "cannot crop an empty image".to_string(),
        ));
    }
    if out_w == 0 || out_h == 0 {
        return Err(CaptureError::ImageProcessing(format!(
            "invalid crop output size {out_w}x{out_h}"
        )));
    }

    let (x, y, cw, ch) = centered_region(w, h, aspect.0, aspect.1);
    trace!(x, y, cw, ch, out_w, out_h, "Cropping image");

    Ok(img
        .crop_imm(x, y, cw, ch)
        .resize_exact(out_w, out_h, FilterType::Lanczos3))
}
