//! HSV exclusion-window histogram ("v2" mode)
//!
//! Pixels are converted to the halved-hue HSV convention first, filtered
//! against the monotone floor and the skin-tone window, then binned on
//! independently quantized hue/saturation/value axes. `peakonly` bypasses
//! both filters and counts everything.
//!
//! A buffer whose pixels are all filtered out yields an empty histogram;
//! that is not an error here, the peak selector resolves it with the
//! black sentinel.

use std::collections::BTreeMap;

use image::RgbImage;

use super::quantize;
use crate::color::conversion::{rgb_to_hsv8, Hsv8};
use crate::config::HsvPolicy;
use crate::constants::filter::MONOTONE_SAT_FLOOR;

/// Quantized (hue, saturation, value) bin coordinate
pub type HsvKey = (u8, u8, u8);

/// Sparse histogram over quantized HSV coordinates.
#[derive(Debug)]
pub struct HsvHistogram {
    hue_bits: u8,
    sat_bits: u8,
    bins: BTreeMap<HsvKey, u64>,
}

impl HsvHistogram {
    /// Create an empty histogram for the given axis shifts
    pub fn new(hue_bits: u8, sat_bits: u8) -> Self {
        Self {
            hue_bits,
            sat_bits,
            bins: BTreeMap::new(),
        }
    }

    /// Convert, filter and count every pixel of the buffer.
    ///
    /// With `peakonly` set, the monotone floor and the skin-tone window
    /// are skipped entirely and every pixel is counted.
    pub fn build(image: &RgbImage, policy: &HsvPolicy, peakonly: bool) -> Self {
        let mut histogram = Self::new(policy.hue_bits, policy.sat_bits);
        for pixel in image.pixels() {
            let [r, g, b] = pixel.0;
            let hsv = rgb_to_hsv8(r, g, b);

            if !peakonly {
                // Near-grayscale noise floor
                if hsv.s < MONOTONE_SAT_FLOOR {
                    continue;
                }
                // Skin-tone exclusion: saturation band gates the hue window
                if policy.saturation_window.contains(hsv.s)
                    && policy.hue_window.contains(hsv.h)
                {
                    continue;
                }
            }

            histogram.add(hsv);
        }
        histogram
    }

    /// Count one already-converted pixel
    pub fn add(&mut self, hsv: Hsv8) {
        let key = (
            quantize(hsv.h, self.hue_bits),
            quantize(hsv.s, self.sat_bits),
            quantize(hsv.v, self.sat_bits),
        );
        *self.bins.entry(key).or_insert(0) += 1;
    }

    /// Occupied bins in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (HsvKey, u64)> + '_ {
        self.bins.iter().map(|(&key, &count)| (key, count))
    }

    /// Sum of all bin counts
    pub fn total_count(&self) -> u64 {
        self.bins.values().sum()
    }

    /// Number of occupied bins
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn hue_bits(&self) -> u8 {
        self.hue_bits
    }

    pub fn sat_bits(&self) -> u8 {
        self.sat_bits
    }
}
