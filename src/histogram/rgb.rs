//! RGB direct-quantization histogram (legacy "v1" mode)
//!
//! Every pixel is reduced to a combined bin key by dropping the low bits
//! of each channel. Alongside the count, each occupied bin caches a
//! chroma score computed from the quantized channel values of the first
//! pixel that opened the bin; since all pixels in a bin share the same
//! quantized channels, the score never changes for the rest of the pass.

use std::collections::BTreeMap;

use image::RgbImage;

use super::quantize;
use crate::config::{ChromaModel, RgbPolicy};

/// Count and cached chroma for one occupied bin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbBin {
    pub count: u64,
    /// Colorfulness in [0.0, 1.0]; 0 for achromatic bins
    pub chroma: f32,
}

/// Sparse histogram over combined quantized RGB keys.
#[derive(Debug)]
pub struct RgbHistogram {
    depth: u8,
    model: ChromaModel,
    bins: BTreeMap<u32, RgbBin>,
}

impl RgbHistogram {
    /// Create an empty histogram for the given retained bit depth
    pub fn new(depth: u8, model: ChromaModel) -> Self {
        Self {
            depth,
            model,
            bins: BTreeMap::new(),
        }
    }

    /// Count every pixel of the buffer under the policy's depth and model
    pub fn build(image: &RgbImage, policy: &RgbPolicy) -> Self {
        let mut histogram = Self::new(policy.color_depth, policy.chroma_model);
        for pixel in image.pixels() {
            let [r, g, b] = pixel.0;
            histogram.add(r, g, b);
        }
        histogram
    }

    /// Count one pixel, opening its bin with a cached chroma score if this
    /// is the first pixel to land there.
    pub fn add(&mut self, r: u8, g: u8, b: u8) {
        let shift = 8 - self.depth;
        let r_q = quantize(r, shift);
        let g_q = quantize(g, shift);
        let b_q = quantize(b, shift);
        let key = self.bin_key(r_q, g_q, b_q);

        let (depth, model) = (self.depth, self.model);
        self.bins
            .entry(key)
            .and_modify(|bin| bin.count += 1)
            .or_insert_with(|| RgbBin {
                count: 1,
                chroma: chroma_score(r_q, g_q, b_q, depth, model),
            });
    }

    /// Combined key: `(r_q << 2·depth) | (g_q << depth) | b_q`
    pub fn bin_key(&self, r_q: u8, g_q: u8, b_q: u8) -> u32 {
        (u32::from(r_q) << (2 * self.depth)) | (u32::from(g_q) << self.depth) | u32::from(b_q)
    }

    /// Split a combined key back into quantized channel levels
    pub fn split_key(&self, key: u32) -> (u8, u8, u8) {
        let mask = (1u32 << self.depth) - 1;
        let b = key & mask;
        let g = (key >> self.depth) & mask;
        let r = (key >> (2 * self.depth)) & mask;
        (r as u8, g as u8, b as u8)
    }

    /// Occupied bins in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &RgbBin)> {
        self.bins.iter().map(|(&key, bin)| (key, bin))
    }

    /// Sum of all bin counts
    pub fn total_count(&self) -> u64 {
        self.bins.values().map(|bin| bin.count).sum()
    }

    /// Number of occupied bins
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }
}

/// Chroma of a bin from its quantized channel levels.
///
/// Conic divides the span by the fixed top level; columnar divides by the
/// bin's own maximum. Achromatic bins (all levels equal, pure black
/// included) score exactly 0 under both models.
fn chroma_score(r_q: u8, g_q: u8, b_q: u8, depth: u8, model: ChromaModel) -> f32 {
    let max = r_q.max(g_q).max(b_q);
    let min = r_q.min(g_q).min(b_q);
    if max == 0 || max == min {
        return 0.0;
    }
    let span = f32::from(max - min);
    match model {
        ChromaModel::Conic => span / ((1u32 << depth) - 1) as f32,
        ChromaModel::Columnar => span / f32::from(max),
    }
}
