//! Histogram peak selection
//!
//! One linear pass over occupied bins per policy. The RGB policy tracks
//! three running maxima at once and falls back across chroma tiers; the
//! HSV policy takes a single maximum because its filtering already
//! happened during the histogram build.
//!
//! Bins arrive in ascending key order, and ties keep the first bin
//! encountered, so selection is reproducible for a given buffer.

use serde::{Deserialize, Serialize};

use crate::histogram::hsv::HsvKey;
use crate::histogram::{HsvHistogram, RgbHistogram};

/// Which rule produced the winning bin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionTier {
    /// Most-used bin with chroma at or above the upper threshold
    Strict,
    /// Most-used bin with chroma at or above the lower threshold
    Loose,
    /// Most-used bin with no chroma constraint
    Any,
    /// HSV policy single maximum
    Peak,
    /// Every pixel was filtered out; the result is the black sentinel
    NoData,
}

/// Winning RGB bin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbSelection {
    pub key: u32,
    pub count: u64,
    pub tier: SelectionTier,
}

/// Winning HSV bin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsvSelection {
    pub key: HsvKey,
    pub count: u64,
}

/// Three-tier fallback over an RGB histogram.
///
/// Returns the most-used sufficiently-chromatic bin, degrading from the
/// upper to the lower chroma threshold and finally to the overall peak.
/// With `peakonly` set the chroma tiers are not tracked at all and the
/// overall peak is the answer. `None` only for an empty histogram.
pub fn select_rgb_peak(
    histogram: &RgbHistogram,
    upper_threshold: f32,
    lower_threshold: f32,
    peakonly: bool,
) -> Option<RgbSelection> {
    let mut peak_any: Option<(u32, u64)> = None;
    let mut peak_strict: Option<(u32, u64)> = None;
    let mut peak_loose: Option<(u32, u64)> = None;

    for (key, bin) in histogram.iter() {
        // Strictly-greater comparisons keep the first bin seen on ties
        if peak_any.map_or(true, |(_, count)| bin.count > count) {
            peak_any = Some((key, bin.count));
        }

        if peakonly {
            continue;
        }

        if bin.chroma >= upper_threshold
            && peak_strict.map_or(true, |(_, count)| bin.count > count)
        {
            peak_strict = Some((key, bin.count));
        }

        if bin.chroma >= lower_threshold
            && peak_loose.map_or(true, |(_, count)| bin.count > count)
        {
            peak_loose = Some((key, bin.count));
        }
    }

    let tiers = [
        (peak_strict, SelectionTier::Strict),
        (peak_loose, SelectionTier::Loose),
        (peak_any, SelectionTier::Any),
    ];
    tiers.into_iter().find_map(|(peak, tier)| {
        peak.map(|(key, count)| RgbSelection { key, count, tier })
    })
}

/// Single maximum over an HSV histogram. `None` for an empty histogram;
/// the caller substitutes the black sentinel.
pub fn select_hsv_peak(histogram: &HsvHistogram) -> Option<HsvSelection> {
    let mut peak: Option<HsvSelection> = None;
    for (key, count) in histogram.iter() {
        if peak.map_or(true, |p| count > p.count) {
            peak = Some(HsvSelection { key, count });
        }
    }
    peak
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::conversion::Hsv8;
    use crate::config::ChromaModel;

    /// Histogram with the three canonical tier bins: chroma 0.6 x10,
    /// chroma 1/3 x50, achromatic x1000.
    fn tiered(with_strict: bool, with_loose: bool) -> RgbHistogram {
        let mut histogram = RgbHistogram::new(4, ChromaModel::Conic);
        if with_strict {
            // quantized (15, 6, 6): span 9/15 = 0.6
            for _ in 0..10 {
                histogram.add(255, 96, 96);
            }
        }
        if with_loose {
            // quantized (15, 10, 10): span 5/15 = 0.333
            for _ in 0..50 {
                histogram.add(255, 168, 168);
            }
        }
        // achromatic, dominant by count
        for _ in 0..1000 {
            histogram.add(128, 128, 128);
        }
        histogram
    }

    #[test]
    fn test_strict_tier_wins_despite_lower_count() {
        let histogram = tiered(true, true);
        let selection = select_rgb_peak(&histogram, 0.5, 0.2, false).unwrap();
        assert_eq!(selection.tier, SelectionTier::Strict);
        assert_eq!(selection.count, 10);
        assert_eq!(histogram.split_key(selection.key), (15, 6, 6));
    }

    #[test]
    fn test_loose_tier_when_no_strict_bin() {
        let histogram = tiered(false, true);
        let selection = select_rgb_peak(&histogram, 0.5, 0.2, false).unwrap();
        assert_eq!(selection.tier, SelectionTier::Loose);
        assert_eq!(selection.count, 50);
        assert_eq!(histogram.split_key(selection.key), (15, 10, 10));
    }

    #[test]
    fn test_any_tier_when_nothing_chromatic() {
        let histogram = tiered(false, false);
        let selection = select_rgb_peak(&histogram, 0.5, 0.2, false).unwrap();
        assert_eq!(selection.tier, SelectionTier::Any);
        assert_eq!(selection.count, 1000);
        assert_eq!(histogram.split_key(selection.key), (8, 8, 8));
    }

    #[test]
    fn test_peakonly_ignores_chroma_tiers() {
        let histogram = tiered(true, true);
        let selection = select_rgb_peak(&histogram, 0.5, 0.2, true).unwrap();
        assert_eq!(selection.tier, SelectionTier::Any);
        assert_eq!(selection.count, 1000);
    }

    #[test]
    fn test_empty_rgb_histogram_selects_nothing() {
        let histogram = RgbHistogram::new(4, ChromaModel::Conic);
        assert!(select_rgb_peak(&histogram, 0.5, 0.2, false).is_none());
    }

    #[test]
    fn test_ties_keep_first_key_in_scan_order() {
        let mut histogram = RgbHistogram::new(4, ChromaModel::Conic);
        // Two bins, same count, both above the strict threshold
        histogram.add(255, 0, 0);
        histogram.add(0, 0, 255);
        let selection = select_rgb_peak(&histogram, 0.5, 0.2, false).unwrap();
        // Blue's key (0,0,15) sorts below red's (15,0,0)
        assert_eq!(histogram.split_key(selection.key), (0, 0, 15));
    }

    #[test]
    fn test_hsv_single_max() {
        let mut histogram = HsvHistogram::new(2, 4);
        for _ in 0..3 {
            histogram.add(Hsv8 { h: 60, s: 255, v: 255 });
        }
        histogram.add(Hsv8 { h: 120, s: 255, v: 255 });
        let selection = select_hsv_peak(&histogram).unwrap();
        assert_eq!(selection.key, (15, 15, 15));
        assert_eq!(selection.count, 3);
    }

    #[test]
    fn test_hsv_empty_histogram_selects_nothing() {
        let histogram = HsvHistogram::new(2, 4);
        assert!(select_hsv_peak(&histogram).is_none());
    }
}
