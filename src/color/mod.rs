//! Color conversion and output formatting module
//!
//! This module handles RGB/HSV conversion in the halved-hue convention,
//! expansion of quantized bin coordinates back to channel values, and
//! rendering of the final color as text.

pub mod conversion;
pub mod format;

pub use conversion::Hsv8;
pub use format::OutputFormat;
