//! Sparse quantizing histograms
//!
//! Both color-space policies reduce pixels to coarse bins and count them
//! in a sparse map, so memory and scan cost track the color diversity the
//! image actually shows rather than the full bin space (up to 2^24 keys
//! at depth 8). `BTreeMap` keys make ascending bin order the canonical
//! iteration order, which pins down tie-breaking during selection.
//!
//! Histograms live for a single analysis: built in one pass, consumed by
//! the peak selector, then dropped.

pub mod hsv;
pub mod rgb;

pub use hsv::HsvHistogram;
pub use rgb::{RgbBin, RgbHistogram};

/// Right-shift quantization shared by both policies.
///
/// Deterministic and total: every 8-bit input lands in exactly one
/// reduced level below `256 >> shift`.
#[inline]
pub fn quantize(value: u8, shift: u8) -> u8 {
    (u16::from(value) >> shift) as u8
}
