//! Crop, resize and smoothing ahead of histogram analysis
//!
//! Produces a normalized pixel buffer: the configured border is clipped
//! away (the subject is assumed centered), the remainder is scaled to a
//! fixed working resolution so histogram cost stays bounded, and an
//! optional median filter suppresses single-pixel noise and compression
//! artifacts before quantization.
//!
//! The caller's buffer is never mutated; every step works on a copy.

use crate::config::PreprocessConfig;
use crate::error::{PickError, Result};
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};

/// Run the full preprocessing chain: crop, resize, optional smoothing.
///
/// # Errors
///
/// Returns [`PickError::ImageDecode`] when the input buffer has no pixels
/// or the crop leaves an empty region.
pub fn preprocess(image: &RgbImage, config: &PreprocessConfig) -> Result<RgbImage> {
    let cropped = crop_center(image, config.clip_ratio)?;
    let resized = imageops::resize(
        &cropped,
        config.resize_width,
        config.resize_height,
        FilterType::Triangle,
    );
    if config.median_kernel == 0 {
        Ok(resized)
    } else {
        Ok(median_filter(&resized, config.median_kernel))
    }
}

/// Keep the center region, discarding a border of `clip_ratio * extent / 2`
/// on each side.
pub fn crop_center(image: &RgbImage, clip_ratio: f32) -> Result<RgbImage> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(PickError::decode_msg("image has no pixels"));
    }

    let clip_x = (clip_ratio * width as f32 / 2.0) as u32;
    let clip_y = (clip_ratio * height as f32 / 2.0) as u32;
    let kept_width = width.saturating_sub(2 * clip_x);
    let kept_height = height.saturating_sub(2 * clip_y);
    if kept_width == 0 || kept_height == 0 {
        return Err(PickError::decode_msg("empty region after crop"));
    }

    Ok(imageops::crop_imm(image, clip_x, clip_y, kept_width, kept_height).to_image())
}

/// Per-channel window median with clamped borders. `kernel` must be odd.
pub fn median_filter(image: &RgbImage, kernel: u32) -> RgbImage {
    debug_assert_eq!(kernel % 2, 1, "median kernel must be odd");

    let (width, height) = image.dimensions();
    let radius = i64::from(kernel / 2);
    let mut output = RgbImage::new(width, height);
    let mut window = Vec::with_capacity((kernel * kernel) as usize);

    for y in 0..height {
        for x in 0..width {
            let mut channels = [0u8; 3];
            for (c, channel) in channels.iter_mut().enumerate() {
                window.clear();
                for dy in -radius..=radius {
                    for dx in -radius..=radius {
                        let sy = (i64::from(y) + dy).clamp(0, i64::from(height) - 1) as u32;
                        let sx = (i64::from(x) + dx).clamp(0, i64::from(width) - 1) as u32;
                        window.push(image.get_pixel(sx, sy).0[c]);
                    }
                }
                window.sort_unstable();
                *channel = window[window.len() / 2];
            }
            output.put_pixel(x, y, Rgb(channels));
        }
    }

    output
}
