//! Output string formatting
//!
//! Renders a picked color in the four supported textual forms: decimal
//! triple, bare hexadecimal, CSS hex and an HSV summary.

use super::conversion::Hsv8;
use palette::Srgb;

/// Supported output renderings for a picked color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `"R G B"` with channels in [0, 255]
    Decimal,
    /// `"rrggbb"` without a leading `#`
    Hex,
    /// `"#rgb"` or `"#rrggbb"`
    Css,
    /// `"H S% V%"` with hue in [0, 360) degrees
    Hsv,
}

/// Format as a decimal triple, e.g. `255 0 0`
pub fn decimal(rgb: Srgb<u8>) -> String {
    format!("{} {} {}", rgb.red, rgb.green, rgb.blue)
}

/// Format as bare hexadecimal, e.g. `ff0000`
pub fn hex(rgb: Srgb<u8>) -> String {
    format!("{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue)
}

/// Format as CSS hex.
///
/// The 3-digit short form is only produced when `short` is set, i.e. when
/// the quantization depth kept each channel representable in one hex
/// digit; the digit is the channel's high nibble.
pub fn css(rgb: Srgb<u8>, short: bool) -> String {
    if short {
        format!(
            "#{:x}{:x}{:x}",
            rgb.red >> 4,
            rgb.green >> 4,
            rgb.blue >> 4
        )
    } else {
        format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue)
    }
}

/// Format an HSV triple as `H S% V%`, hue in whole degrees
pub fn hsv(hsv: Hsv8) -> String {
    format!(
        "{} {}% {}%",
        hsv.hue_degrees(),
        percent(hsv.s),
        percent(hsv.v)
    )
}

fn percent(channel: u8) -> u8 {
    ((u32::from(channel) * 100 + 127) / 255) as u8
}
