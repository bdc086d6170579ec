//! Color space conversion utilities
//!
//! Provides conversions between 8-bit RGB and the halved-hue HSV
//! convention (hue in [0, 180) half-degree units, saturation and value in
//! [0, 255]), plus expansion of quantized levels back to representative
//! channel values. The halved-hue convention matches the values any
//! stored hue thresholds were tuned against and must not be widened.

use palette::Srgb;
use serde::{Deserialize, Serialize};

/// An HSV pixel in the halved-hue convention.
///
/// `h` covers the hue circle in two-degree steps, so 0 is red, 60 is
/// green and 120 is blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hsv8 {
    /// Hue in [0, 180) half-degree units
    pub h: u8,
    /// Saturation in [0, 255]
    pub s: u8,
    /// Value in [0, 255]
    pub v: u8,
}

impl Hsv8 {
    /// Hue in whole degrees, [0, 360)
    pub fn hue_degrees(&self) -> u16 {
        u16::from(self.h) * 2
    }
}

/// Convert an 8-bit RGB triple to the halved-hue HSV convention.
pub fn rgb_to_hsv8(r: u8, g: u8, b: u8) -> Hsv8 {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let s = if max == 0 {
        0
    } else {
        ((u32::from(delta) * 255) / u32::from(max)) as u8
    };

    let h = if delta == 0 {
        0
    } else {
        let d = i32::from(delta);
        let degrees = if max == r {
            60 * (i32::from(g) - i32::from(b)) / d
        } else if max == g {
            120 + 60 * (i32::from(b) - i32::from(r)) / d
        } else {
            240 + 60 * (i32::from(r) - i32::from(g)) / d
        };
        (degrees.rem_euclid(360) / 2) as u8
    };

    Hsv8 { h, s, v: max }
}

/// Convert a halved-hue HSV triple back to 8-bit RGB.
pub fn hsv8_to_srgb(hsv: Hsv8) -> Srgb<u8> {
    let v = u32::from(hsv.v);
    let s = u32::from(hsv.s);
    if s == 0 {
        return Srgb::new(hsv.v, hsv.v, hsv.v);
    }

    let degrees = u32::from(hsv.h) * 2;
    let region = degrees / 60;
    let rem = degrees % 60;

    // Fixed-point sector interpolation, denominator 255 * 60
    let p = (v * (255 - s) / 255) as u8;
    let q = (v * (255 * 60 - s * rem) / (255 * 60)) as u8;
    let t = (v * (255 * 60 - s * (60 - rem)) / (255 * 60)) as u8;
    let v = hsv.v;

    let (r, g, b) = match region {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Srgb::new(r, g, b)
}

/// Expand a quantized channel level back to a representative 8-bit value.
///
/// The top level maps to 255, so a pure channel survives the
/// quantize/expand round trip at full strength. Depth 0 collapses every
/// level to 0.
pub fn expand_level(level: u8, depth: u8) -> u8 {
    if depth == 0 {
        return 0;
    }
    let top = (1u32 << depth.min(8)) - 1;
    ((u32::from(level) * 255 + top / 2) / top) as u8
}

/// Expand a quantized value by plain inverse shift (HSV axes).
pub fn expand_shift(level: u8, bits: u8) -> u8 {
    ((u16::from(level)) << bits) as u8
}
