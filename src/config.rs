//! Configuration structures for the primary color picking pipeline.
//!
//! This module defines all tunable parameters, organized into logical
//! groups for preprocessing and the two color-space policies.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use pricolor::PickerConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = PickerConfig::from_json_file(Path::new("config.json"))?;
//!
//! // Or use defaults
//! let config = PickerConfig::default_rgb();
//! # Ok::<(), pricolor::PickError>(())
//! ```
//!
//! # Validation
//!
//! [`PickerConfig::validate`] runs eagerly before any pixel work begins;
//! an out-of-range option is rejected with
//! [`PickError::Configuration`](crate::PickError) and nothing is computed.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{chroma, filter, preprocess, quantize};
use crate::error::{PickError, Result};

/// Complete configuration for one picking run.
///
/// Can be serialized to/from JSON for reproducible runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickerConfig {
    /// Preprocessing configuration
    pub preprocess: PreprocessConfig,

    /// Color-space policy, mutually exclusive per run
    pub policy: PolicyConfig,

    /// Count every pixel and skip all chroma/hue bias
    #[serde(default)]
    pub peakonly: bool,
}

/// Preprocessing parameters applied before histogramming.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessConfig {
    /// Border fraction removed around the center region (0.0-0.9)
    pub clip_ratio: f32,

    /// Working resolution the cropped region is resized to
    pub resize_width: u32,
    pub resize_height: u32,

    /// Median filter kernel size; odd 3-9, 0 disables smoothing
    #[serde(default)]
    pub median_kernel: u32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            clip_ratio: 0.0,
            resize_width: preprocess::WORKING_WIDTH,
            resize_height: preprocess::WORKING_HEIGHT,
            median_kernel: 0,
        }
    }
}

/// Color-space policy selection.
///
/// `Rgb` is the legacy direct-quantization mode with tiered chroma
/// fallback; `Hsv` filters skin-tone and monotone pixels during the
/// histogram build instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "color_space", rename_all = "lowercase")]
pub enum PolicyConfig {
    Rgb(RgbPolicy),
    Hsv(HsvPolicy),
}

/// Parameters for the RGB direct-quantization policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RgbPolicy {
    /// Retained bits per channel (0-8); 4 gives 16 levels per axis
    pub color_depth: u8,

    /// Chroma scoring model
    pub chroma_model: ChromaModel,

    /// First pickup threshold, exclusive (0,1)
    pub upper_threshold: f32,

    /// Second pickup threshold, exclusive (0,1), must stay below the upper one
    pub lower_threshold: f32,
}

impl Default for RgbPolicy {
    fn default() -> Self {
        Self {
            color_depth: quantize::DEFAULT_COLOR_DEPTH,
            chroma_model: ChromaModel::Conic,
            upper_threshold: chroma::DEFAULT_UPPER_THRESHOLD,
            lower_threshold: chroma::DEFAULT_LOWER_THRESHOLD,
        }
    }
}

/// Chroma (colorfulness) scoring model for quantized RGB bins.
///
/// Conic divides the channel span by the fixed top level, columnar by the
/// bin's own maximum. Columnar scores read higher, so thresholds tuned for
/// one model do not transfer to the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChromaModel {
    Conic,
    Columnar,
}

/// Parameters for the HSV exclusion-window policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HsvPolicy {
    /// Right-shift applied to hue before binning (0-5)
    pub hue_bits: u8,

    /// Right-shift applied to saturation and value before binning (0-7)
    pub sat_bits: u8,

    /// Hue range excluded from counting (skin tones)
    pub hue_window: HueWindow,

    /// Saturation band within which the hue window applies
    pub saturation_window: SaturationWindow,

    /// Divide the selected value channel by this factor before conversion
    #[serde(default)]
    pub whitening: Option<f32>,
}

impl Default for HsvPolicy {
    fn default() -> Self {
        Self {
            hue_bits: quantize::DEFAULT_HUE_BITS,
            sat_bits: quantize::DEFAULT_SAT_BITS,
            hue_window: HueWindow::default(),
            saturation_window: SaturationWindow::default(),
            whitening: None,
        }
    }
}

/// Hue-exclusion window in half-degree units.
///
/// A negative `start` wraps around the top of the hue circle: the excluded
/// range becomes `[start + 180, 180) ∪ [0, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HueWindow {
    pub start: i16,
    pub end: i16,
}

impl Default for HueWindow {
    fn default() -> Self {
        Self {
            start: filter::DEFAULT_HUE_START,
            end: filter::DEFAULT_HUE_END,
        }
    }
}

impl HueWindow {
    /// Test a hue value in [0, 180) against the window, wrapping when
    /// the configured start is negative.
    pub fn contains(&self, hue: u8) -> bool {
        let h = i16::from(hue);
        if self.start < 0 {
            h >= self.start + 180 || h <= self.end
        } else {
            h >= self.start && h <= self.end
        }
    }
}

/// Inclusive saturation band, [0, 255].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaturationWindow {
    pub min: u8,
    pub max: u8,
}

impl Default for SaturationWindow {
    fn default() -> Self {
        Self {
            min: filter::DEFAULT_SAT_MIN,
            max: filter::DEFAULT_SAT_MAX,
        }
    }
}

impl SaturationWindow {
    /// Test a saturation value against the band
    pub fn contains(&self, sat: u8) -> bool {
        sat >= self.min && sat <= self.max
    }
}

impl PickerConfig {
    /// Create default configuration for the RGB policy
    pub fn default_rgb() -> Self {
        Self {
            preprocess: PreprocessConfig::default(),
            policy: PolicyConfig::Rgb(RgbPolicy::default()),
            peakonly: false,
        }
    }

    /// Create default configuration for the HSV policy
    pub fn default_hsv() -> Self {
        Self {
            preprocess: PreprocessConfig::default(),
            policy: PolicyConfig::Hsv(HsvPolicy::default()),
            peakonly: false,
        }
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PickError::config("config_file", path.display(), e.to_string())
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            PickError::config("config_file", path.display(), e.to_string())
        })?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            PickError::config("config_file", path.display(), e.to_string())
        })?;
        std::fs::write(path, json).map_err(|e| {
            PickError::config("config_file", path.display(), e.to_string())
        })?;
        Ok(())
    }

    /// Check every numeric option against its documented range.
    ///
    /// Called eagerly by the pipeline entry points; callers constructing
    /// configurations by hand can also call it directly.
    pub fn validate(&self) -> Result<()> {
        self.preprocess.validate()?;
        match &self.policy {
            PolicyConfig::Rgb(policy) => policy.validate(),
            PolicyConfig::Hsv(policy) => policy.validate(),
        }
    }
}

impl PreprocessConfig {
    fn validate(&self) -> Result<()> {
        if !(0.0..=preprocess::MAX_CLIP_RATIO).contains(&self.clip_ratio) {
            return Err(PickError::config(
                "clip_ratio",
                self.clip_ratio,
                format!("must be within [0, {}]", preprocess::MAX_CLIP_RATIO),
            ));
        }
        if self.resize_width == 0 || self.resize_height == 0 {
            return Err(PickError::config(
                "resize_dimensions",
                format!("{}x{}", self.resize_width, self.resize_height),
                "dimensions must be nonzero",
            ));
        }
        if self.median_kernel != 0 {
            let valid = self.median_kernel % 2 == 1
                && (preprocess::MIN_MEDIAN_KERNEL..=preprocess::MAX_MEDIAN_KERNEL)
                    .contains(&self.median_kernel);
            if !valid {
                return Err(PickError::config(
                    "median_kernel",
                    self.median_kernel,
                    format!(
                        "must be 0 or an odd value in {}-{}",
                        preprocess::MIN_MEDIAN_KERNEL,
                        preprocess::MAX_MEDIAN_KERNEL
                    ),
                ));
            }
        }
        Ok(())
    }
}

impl RgbPolicy {
    fn validate(&self) -> Result<()> {
        if self.color_depth > quantize::MAX_COLOR_DEPTH {
            return Err(PickError::config(
                "color_depth",
                self.color_depth,
                format!("must be at most {}", quantize::MAX_COLOR_DEPTH),
            ));
        }
        for (name, value) in [
            ("upper_threshold", self.upper_threshold),
            ("lower_threshold", self.lower_threshold),
        ] {
            if !(value > 0.0 && value < 1.0) {
                return Err(PickError::config(
                    name,
                    value,
                    "chroma threshold must satisfy 0.0 < n < 1.0",
                ));
            }
        }
        // The historical picker skipped this check, which silently breaks
        // the loose tier whenever the thresholds are swapped.
        if self.lower_threshold >= self.upper_threshold {
            return Err(PickError::config(
                "lower_threshold",
                self.lower_threshold,
                format!("must stay below upper_threshold ({})", self.upper_threshold),
            ));
        }
        Ok(())
    }
}

impl HsvPolicy {
    fn validate(&self) -> Result<()> {
        if self.hue_bits > quantize::MAX_HUE_BITS {
            return Err(PickError::config(
                "hue_bits",
                self.hue_bits,
                format!("must be at most {}", quantize::MAX_HUE_BITS),
            ));
        }
        if self.sat_bits > quantize::MAX_SAT_BITS {
            return Err(PickError::config(
                "sat_bits",
                self.sat_bits,
                format!("must be at most {}", quantize::MAX_SAT_BITS),
            ));
        }
        let HueWindow { start, end } = self.hue_window;
        if !(-179..=180).contains(&start) {
            return Err(PickError::config(
                "hue_window.start",
                start,
                "must be within [-179, 180] half-degree units",
            ));
        }
        if !(0..=180).contains(&end) {
            return Err(PickError::config(
                "hue_window.end",
                end,
                "must be within [0, 180] half-degree units",
            ));
        }
        if start >= 0 && start > end {
            return Err(PickError::config(
                "hue_window",
                format!("[{start}, {end}]"),
                "non-wrapping window must have start <= end",
            ));
        }
        if self.saturation_window.min > self.saturation_window.max {
            return Err(PickError::config(
                "saturation_window",
                format!(
                    "[{}, {}]",
                    self.saturation_window.min, self.saturation_window.max
                ),
                "band must have min <= max",
            ));
        }
        if let Some(factor) = self.whitening {
            if !(factor > 0.0) {
                return Err(PickError::config(
                    "whitening",
                    factor,
                    "factor must be greater than 0.0",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(PickerConfig::default_rgb().validate().is_ok());
        assert!(PickerConfig::default_hsv().validate().is_ok());
    }

    #[test]
    fn test_rejects_clip_ratio_out_of_range() {
        let mut config = PickerConfig::default_rgb();
        config.preprocess.clip_ratio = 0.95;
        assert!(config.validate().is_err());
        config.preprocess.clip_ratio = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_even_or_oversized_median_kernel() {
        let mut config = PickerConfig::default_rgb();
        config.preprocess.median_kernel = 4;
        assert!(config.validate().is_err());
        config.preprocess.median_kernel = 11;
        assert!(config.validate().is_err());
        config.preprocess.median_kernel = 5;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_depth_out_of_bounds() {
        let mut config = PickerConfig::default_rgb();
        if let PolicyConfig::Rgb(policy) = &mut config.policy {
            policy.color_depth = 9;
        }
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_threshold_outside_unit_interval() {
        let mut config = PickerConfig::default_rgb();
        if let PolicyConfig::Rgb(policy) = &mut config.policy {
            policy.upper_threshold = 1.0;
        }
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_swapped_chroma_tiers() {
        let mut config = PickerConfig::default_rgb();
        if let PolicyConfig::Rgb(policy) = &mut config.policy {
            policy.upper_threshold = 0.2;
            policy.lower_threshold = 0.5;
        }
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_hue_window_out_of_range() {
        let mut config = PickerConfig::default_hsv();
        if let PolicyConfig::Hsv(policy) = &mut config.policy {
            policy.hue_window.start = -180;
        }
        assert!(config.validate().is_err());

        let mut config = PickerConfig::default_hsv();
        if let PolicyConfig::Hsv(policy) = &mut config.policy {
            policy.hue_window = HueWindow { start: 40, end: 20 };
        }
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_nonpositive_whitening() {
        let mut config = PickerConfig::default_hsv();
        if let PolicyConfig::Hsv(policy) = &mut config.policy {
            policy.whitening = Some(0.0);
        }
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_hue_window_wraparound() {
        let window = HueWindow { start: -3, end: 24 };
        // [177, 180) via the wrap
        assert!(window.contains(177));
        assert!(window.contains(178));
        assert!(window.contains(179));
        // [0, 24] directly
        assert!(window.contains(0));
        assert!(window.contains(10));
        assert!(window.contains(24));
        // outside
        assert!(!window.contains(25));
        assert!(!window.contains(100));
        assert!(!window.contains(176));
    }

    #[test]
    fn test_hue_window_plain_interval() {
        let window = HueWindow { start: 30, end: 60 };
        assert!(window.contains(30));
        assert!(window.contains(45));
        assert!(window.contains(60));
        assert!(!window.contains(29));
        assert!(!window.contains(61));
        assert!(!window.contains(179));
    }

    #[test]
    fn test_json_round_trip() {
        let config = PickerConfig::default_hsv();
        let json = serde_json::to_string(&config).unwrap();
        let back: PickerConfig = serde_json::from_str(&json).unwrap();
        assert!(back.validate().is_ok());
        match back.policy {
            PolicyConfig::Hsv(policy) => {
                assert_eq!(policy.hue_window, HueWindow::default());
            }
            PolicyConfig::Rgb(_) => panic!("policy tag did not survive round trip"),
        }
    }
}
