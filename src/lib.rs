//! # pricolor
//!
//! A Rust crate for extracting a single representative "primary color"
//! from a photographic image.
//!
//! The primary color is defined as a chromatic color: selection is biased
//! toward saturated pixels and away from skin-tone and neutral regions,
//! so the result works as a swatch or UI accent color. The pipeline is
//! linear:
//!
//! - crop, resize and optionally smooth the pixel buffer;
//! - reduce pixels into a sparse coarse histogram under one of two
//!   color-space policies (direct RGB quantization with cached chroma
//!   scores, or HSV with skin-tone exclusion windows);
//! - pick the dominant bin, degrading through chroma tiers (RGB) or
//!   substituting a black sentinel (HSV) when nothing qualifies.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pricolor::{pick_primary_color, PickerConfig};
//! use std::path::Path;
//!
//! let config = PickerConfig::default_rgb();
//! let pick = pick_primary_color(Path::new("photo.jpg"), &config)?;
//! println!("css: {}", pick.css());
//! # Ok::<(), pricolor::PickError>(())
//! ```

use image::RgbImage;
use palette::Srgb;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod histogram;
pub mod image_loader;
pub mod preprocess;
pub mod select;

pub use color::conversion::Hsv8;
pub use color::format::OutputFormat;
pub use config::{
    ChromaModel, HsvPolicy, HueWindow, PickerConfig, PolicyConfig, PreprocessConfig, RgbPolicy,
    SaturationWindow,
};
pub use error::{PickError, Result};
pub use select::SelectionTier;

use color::conversion::{expand_level, expand_shift, hsv8_to_srgb};
use color::format;

/// A picked primary color.
///
/// `tier` records which fallback produced the answer; [`SelectionTier::NoData`]
/// marks the black sentinel substituted when every pixel was filtered
/// out, so callers can tell it apart from a genuinely black peak.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pick {
    /// Representative color, expanded back from the winning bin
    pub rgb: Srgb<u8>,
    /// Pre-conversion HSV triple (HSV policy only, whitening applied)
    pub hsv: Option<Hsv8>,
    /// Pixels counted into the winning bin
    pub count: u64,
    /// Fallback rule that produced the answer
    pub tier: SelectionTier,
    /// Whether the quantization depth keeps each channel in one hex digit
    pub short_css: bool,
}

impl Pick {
    /// True when every pixel was filtered out and the color is the sentinel
    pub fn is_no_data(&self) -> bool {
        self.tier == SelectionTier::NoData
    }

    /// Decimal triple, e.g. `255 0 0`
    pub fn decimal(&self) -> String {
        format::decimal(self.rgb)
    }

    /// Bare hexadecimal, e.g. `ff0000`
    pub fn hex(&self) -> String {
        format::hex(self.rgb)
    }

    /// CSS hex, short `#f00` form when the depth allows it
    pub fn css(&self) -> String {
        format::css(self.rgb, self.short_css)
    }

    /// Render in the requested output format.
    ///
    /// [`OutputFormat::Hsv`] falls back to the decimal triple when no HSV
    /// triple was produced (RGB policy).
    pub fn render(&self, output: OutputFormat) -> String {
        match output {
            OutputFormat::Decimal => self.decimal(),
            OutputFormat::Hex => self.hex(),
            OutputFormat::Css => self.css(),
            OutputFormat::Hsv => match self.hsv {
                Some(hsv) => format::hsv(hsv),
                None => self.decimal(),
            },
        }
    }

    fn black_sentinel(config: &PickerConfig) -> Self {
        let hsv = match &config.policy {
            PolicyConfig::Hsv(_) => Some(Hsv8 { h: 0, s: 0, v: 0 }),
            PolicyConfig::Rgb(_) => None,
        };
        Self {
            rgb: Srgb::new(0, 0, 0),
            hsv,
            count: 0,
            tier: SelectionTier::NoData,
            short_css: short_css(config),
        }
    }
}

/// Pick the primary color of an image file.
///
/// # Errors
///
/// Returns [`PickError::Configuration`] for an out-of-range option and
/// [`PickError::ImageDecode`] when the file cannot be decoded.
pub fn pick_primary_color(path: &Path, config: &PickerConfig) -> Result<Pick> {
    config.validate()?;
    let image = image_loader::load_image(path)?;
    pick_from_pixels(&image, config)
}

/// Pick the primary color of an in-memory encoded image.
pub fn pick_primary_color_from_memory(bytes: &[u8], config: &PickerConfig) -> Result<Pick> {
    config.validate()?;
    let image = image_loader::load_image_from_memory(bytes)?;
    pick_from_pixels(&image, config)
}

/// Pick the primary color of an already-decoded pixel buffer.
///
/// This is the core entry point: once the configuration validates and
/// the buffer survives preprocessing, it always produces a result.
pub fn pick_from_pixels(image: &RgbImage, config: &PickerConfig) -> Result<Pick> {
    config.validate()?;
    let prepared = preprocess::preprocess(image, &config.preprocess)?;
    debug!(
        width = prepared.width(),
        height = prepared.height(),
        "preprocessed buffer"
    );

    let pick = match &config.policy {
        PolicyConfig::Rgb(policy) => pick_rgb(&prepared, policy, config),
        PolicyConfig::Hsv(policy) => pick_hsv(&prepared, policy, config),
    };
    debug!(tier = ?pick.tier, count = pick.count, "selected bin");
    Ok(pick)
}

fn pick_rgb(image: &RgbImage, policy: &RgbPolicy, config: &PickerConfig) -> Pick {
    let histogram = histogram::RgbHistogram::build(image, policy);
    debug!(
        bins = histogram.len(),
        pixels = histogram.total_count(),
        "rgb histogram built"
    );

    let selection = match select::select_rgb_peak(
        &histogram,
        policy.upper_threshold,
        policy.lower_threshold,
        config.peakonly,
    ) {
        Some(selection) => selection,
        None => return Pick::black_sentinel(config),
    };

    let (r_q, g_q, b_q) = histogram.split_key(selection.key);
    let depth = policy.color_depth;
    Pick {
        rgb: Srgb::new(
            expand_level(r_q, depth),
            expand_level(g_q, depth),
            expand_level(b_q, depth),
        ),
        hsv: None,
        count: selection.count,
        tier: selection.tier,
        short_css: short_css(config),
    }
}

fn pick_hsv(image: &RgbImage, policy: &HsvPolicy, config: &PickerConfig) -> Pick {
    let histogram = histogram::HsvHistogram::build(image, policy, config.peakonly);
    debug!(
        bins = histogram.len(),
        pixels = histogram.total_count(),
        "hsv histogram built"
    );

    let selection = match select::select_hsv_peak(&histogram) {
        Some(selection) => selection,
        None => return Pick::black_sentinel(config),
    };

    let (h_q, s_q, v_q) = selection.key;
    let mut hsv = Hsv8 {
        h: expand_shift(h_q, policy.hue_bits),
        s: expand_shift(s_q, policy.sat_bits),
        v: expand_shift(v_q, policy.sat_bits),
    };
    if let Some(factor) = policy.whitening {
        hsv.v = ((f32::from(hsv.v) / factor).round() as u32).min(255) as u8;
    }

    Pick {
        rgb: hsv8_to_srgb(hsv),
        hsv: Some(hsv),
        count: selection.count,
        tier: SelectionTier::Peak,
        short_css: short_css(config),
    }
}

/// Short CSS form is only safe when the RGB depth keeps each channel in
/// one hex digit.
fn short_css(config: &PickerConfig) -> bool {
    match &config.policy {
        PolicyConfig::Rgb(policy) => policy.color_depth <= 4,
        PolicyConfig::Hsv(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn tiny_config(policy: PolicyConfig) -> PickerConfig {
        PickerConfig {
            preprocess: PreprocessConfig {
                clip_ratio: 0.0,
                resize_width: 4,
                resize_height: 4,
                median_kernel: 0,
            },
            policy,
            peakonly: false,
        }
    }

    #[test]
    fn test_invalid_config_rejected_before_any_work() {
        let mut config = tiny_config(PolicyConfig::Rgb(RgbPolicy::default()));
        config.preprocess.clip_ratio = 2.0;
        let img = RgbImage::from_pixel(4, 4, Rgb([1, 2, 3]));
        let err = pick_from_pixels(&img, &config).unwrap_err();
        assert!(matches!(err, PickError::Configuration { .. }));
    }

    #[test]
    fn test_rgb_policy_prefers_chromatic_bin() {
        let mut img = RgbImage::from_pixel(4, 4, Rgb([255, 0, 0]));
        for x in 0..4 {
            img.put_pixel(x, 3, Rgb([128, 128, 128]));
        }
        let config = tiny_config(PolicyConfig::Rgb(RgbPolicy::default()));
        let pick = pick_from_pixels(&img, &config).unwrap();
        assert_eq!(pick.tier, SelectionTier::Strict);
        assert_eq!(pick.decimal(), "255 0 0");
        assert_eq!(pick.css(), "#f00");
        assert_eq!(pick.count, 12);
        assert!(!pick.is_no_data());
    }

    #[test]
    fn test_hsv_policy_monochrome_yields_black_sentinel() {
        let img = RgbImage::from_pixel(4, 4, Rgb([128, 128, 128]));
        let config = tiny_config(PolicyConfig::Hsv(HsvPolicy::default()));
        let pick = pick_from_pixels(&img, &config).unwrap();
        assert!(pick.is_no_data());
        assert_eq!(pick.rgb, Srgb::new(0u8, 0, 0));
        assert_eq!(pick.hsv, Some(Hsv8 { h: 0, s: 0, v: 0 }));
        assert_eq!(pick.count, 0);
    }

    #[test]
    fn test_hsv_policy_picks_dominant_saturated_color() {
        let mut img = RgbImage::from_pixel(4, 4, Rgb([0, 0, 255]));
        for x in 0..4 {
            img.put_pixel(x, 0, Rgb([200, 200, 200]));
        }
        let config = tiny_config(PolicyConfig::Hsv(HsvPolicy::default()));
        let pick = pick_from_pixels(&img, &config).unwrap();
        assert_eq!(pick.tier, SelectionTier::Peak);
        let hsv = pick.hsv.unwrap();
        assert_eq!(hsv.h, 120);
        assert_eq!(pick.count, 12);
    }

    #[test]
    fn test_whitening_lifts_value_channel() {
        let img = RgbImage::from_pixel(4, 4, Rgb([0, 128, 0]));
        let mut policy = HsvPolicy::default();
        policy.whitening = Some(0.5);
        let config = tiny_config(PolicyConfig::Hsv(policy));
        let pick = pick_from_pixels(&img, &config).unwrap();
        let hsv = pick.hsv.unwrap();
        // value doubled (and clamped to 255) relative to the unwhitened pick
        let unwhitened =
            pick_from_pixels(&img, &tiny_config(PolicyConfig::Hsv(HsvPolicy::default())))
                .unwrap();
        let base = unwhitened.hsv.unwrap();
        assert_eq!(u32::from(hsv.v), (u32::from(base.v) * 2).min(255));
        assert_eq!(hsv.h, base.h);
    }

    #[test]
    fn test_peakonly_rgb_takes_most_used_color() {
        let mut img = RgbImage::from_pixel(4, 4, Rgb([128, 128, 128]));
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        let mut config = tiny_config(PolicyConfig::Rgb(RgbPolicy::default()));
        config.peakonly = true;
        let pick = pick_from_pixels(&img, &config).unwrap();
        assert_eq!(pick.tier, SelectionTier::Any);
        assert_eq!(pick.count, 15);
    }

    #[test]
    fn test_render_formats() {
        let pick = Pick {
            rgb: Srgb::new(255u8, 0, 0),
            hsv: None,
            count: 1,
            tier: SelectionTier::Strict,
            short_css: true,
        };
        assert_eq!(pick.render(OutputFormat::Decimal), "255 0 0");
        assert_eq!(pick.render(OutputFormat::Hex), "ff0000");
        assert_eq!(pick.render(OutputFormat::Css), "#f00");
        // HSV render falls back to decimal without a triple
        assert_eq!(pick.render(OutputFormat::Hsv), "255 0 0");
    }
}
