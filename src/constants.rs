//! Default thresholds and limits for primary color extraction
//!
//! This module contains compile-time constants for quantization depths,
//! chroma tiers and the skin-tone exclusion window, matching the values
//! historically used for stored thresholds.

/// Chroma tier thresholds for the RGB selection policy
pub mod chroma {
    /// First pickup threshold: bins at or above this chroma win outright
    pub const DEFAULT_UPPER_THRESHOLD: f32 = 0.5;

    /// Second pickup threshold: fallback tier when no bin clears the upper one
    pub const DEFAULT_LOWER_THRESHOLD: f32 = 0.2;
}

/// Quantization depths and channel ranges
pub mod quantize {
    /// Default retained bits per RGB channel (16 levels per axis, 4096 bins)
    pub const DEFAULT_COLOR_DEPTH: u8 = 4;

    /// Maximum retained bits per RGB channel
    pub const MAX_COLOR_DEPTH: u8 = 8;

    /// Default hue shift for the HSV policy
    pub const DEFAULT_HUE_BITS: u8 = 2;

    /// Default saturation/value shift for the HSV policy
    pub const DEFAULT_SAT_BITS: u8 = 4;

    /// Maximum hue shift (hue range is 180 half-degree steps)
    pub const MAX_HUE_BITS: u8 = 5;

    /// Maximum saturation/value shift
    pub const MAX_SAT_BITS: u8 = 7;

    /// Hue axis length in half-degree units. Hue values are in [0, 180),
    /// each step covering two degrees of the hue circle.
    pub const HUE_STEPS: u16 = 180;
}

/// Skin-tone and monotone filtering for the HSV policy
pub mod filter {
    /// Saturation below this is near-grayscale noise and never counted
    pub const MONOTONE_SAT_FLOOR: u8 = 10;

    /// Default hue-exclusion window start, half-degree units. Negative
    /// start wraps: [-3, 24] excludes [177, 180) and [0, 24].
    pub const DEFAULT_HUE_START: i16 = -3;

    /// Default hue-exclusion window end, half-degree units
    pub const DEFAULT_HUE_END: i16 = 24;

    /// Default saturation band lower bound for the exclusion window
    pub const DEFAULT_SAT_MIN: u8 = 10;

    /// Default saturation band upper bound for the exclusion window
    pub const DEFAULT_SAT_MAX: u8 = 150;
}

/// Preprocessing defaults and bounds
pub mod preprocess {
    /// Working resolution the cropped region is resized to
    pub const WORKING_WIDTH: u32 = 200;
    pub const WORKING_HEIGHT: u32 = 200;

    /// Largest accepted clip ratio; 0.9 keeps the central 10% per axis
    pub const MAX_CLIP_RATIO: f32 = 0.9;

    /// Median filter kernel bounds (odd sizes only; 0 disables)
    pub const MIN_MEDIAN_KERNEL: u32 = 3;
    pub const MAX_MEDIAN_KERNEL: u32 = 9;
}

/// Input boundary limits
pub mod io {
    /// Largest accepted input file in bytes
    pub const MAX_FILE_SIZE: u64 = 1_000_000_000;
}
