//! Image loading for the picking pipeline
//!
//! This module is the decode boundary: it turns a file path or a byte
//! slice into an RGB pixel buffer and maps every failure to
//! [`PickError::ImageDecode`]. Format support is whatever the `image`
//! crate decodes (JPEG, PNG, GIF, WebP, TIFF, BMP and friends).
//!
//! An oversized-file guard runs before any decoding so a runaway input
//! cannot tie up the process.

use crate::constants::io::MAX_FILE_SIZE;
use crate::error::{PickError, Result};
use image::{ImageReader, RgbImage};
use std::path::Path;

/// Load an image from disk as an RGB8 buffer.
///
/// # Errors
///
/// Returns [`PickError::ImageDecode`] if:
/// - the file cannot be opened or exceeds the size limit
/// - the format is not recognized
/// - decoding fails
pub fn load_image(path: &Path) -> Result<RgbImage> {
    check_file_size(path)?;

    let reader = ImageReader::open(path).map_err(|e| {
        PickError::decode(format!("failed to open image file: {}", path.display()), e)
    })?;

    let reader = reader.with_guessed_format().map_err(|e| {
        PickError::decode(format!("failed to probe image format: {}", path.display()), e)
    })?;

    let img = reader.decode().map_err(|e| {
        PickError::decode(format!("failed to decode image: {}", path.display()), e)
    })?;

    Ok(img.to_rgb8())
}

/// Decode an in-memory image as an RGB8 buffer.
///
/// # Errors
///
/// Returns [`PickError::ImageDecode`] for empty input or undecodable bytes.
pub fn load_image_from_memory(bytes: &[u8]) -> Result<RgbImage> {
    if bytes.is_empty() {
        return Err(PickError::decode_msg("zero-byte input"));
    }
    let img = image::load_from_memory(bytes)
        .map_err(|e| PickError::decode("failed to decode image from memory", e))?;
    Ok(img.to_rgb8())
}

/// Reject files over the size limit before decoding
fn check_file_size(path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        PickError::decode(format!("failed to stat image file: {}", path.display()), e)
    })?;
    if metadata.len() > MAX_FILE_SIZE {
        return Err(PickError::decode_msg(format!(
            "file size {} over limit (max {} bytes)",
            metadata.len(),
            MAX_FILE_SIZE
        )));
    }
    Ok(())
}

/// Get list of commonly supported file extensions
pub fn supported_extensions() -> &'static [&'static str] {
    &[
        "jpg", "jpeg", "png", "gif", "webp", "tiff", "tif", "bmp", "ico", "tga", "pbm",
        "pgm", "ppm", "pnm", "qoi",
    ]
}

/// Check if a file extension is supported
pub fn is_supported_extension(ext: &str) -> bool {
    let ext_lower = ext.to_lowercase();
    supported_extensions().contains(&ext_lower.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_extension("jpg"));
        assert!(is_supported_extension("JPEG"));
        assert!(is_supported_extension("png"));
        assert!(!is_supported_extension("xyz"));
        assert!(!is_supported_extension("doc"));
    }

    #[test]
    fn test_missing_file_is_decode_error() {
        let err = load_image(Path::new("definitely_missing.png")).unwrap_err();
        assert!(matches!(err, PickError::ImageDecode { .. }));
    }

    #[test]
    fn test_empty_input_is_decode_error() {
        let err = load_image_from_memory(&[]).unwrap_err();
        assert!(matches!(err, PickError::ImageDecode { .. }));
    }

    #[test]
    fn test_garbage_bytes_are_decode_error() {
        let err = load_image_from_memory(&[0x00, 0x01, 0x02, 0x03]).unwrap_err();
        assert!(matches!(err, PickError::ImageDecode { .. }));
    }

    #[test]
    fn test_png_round_trip_decodes() {
        use image::{DynamicImage, Rgb};

        let mut img = RgbImage::new(2, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 1, Rgb([0, 0, 255]));

        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(img.clone())
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let decoded = load_image_from_memory(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (2, 2));
        assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(decoded.get_pixel(1, 1).0, [0, 0, 255]);
    }
}
