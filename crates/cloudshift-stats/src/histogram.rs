//! Fixed bin-count histograms
//!
//! Bins are equally wide over `[min, max]` of the sample. Every bin is
//! half-open except the last, which also holds the maximum.

use serde::{Deserialize, Serialize};

use crate::error::{check_sample, StatsError, StatsResult};

/// Default number of bins for displacement histograms
pub const DEFAULT_BINS: usize = 20;

/// Frequency histogram with equally wide bins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Bin edges, `counts.len() + 1` entries in ascending order
    edges: Vec<f64>,
    /// Number of values per bin
    counts: Vec<usize>,
}

impl Histogram {
    /// Bin `data` into `bins` equally wide bins
    ///
    /// A sample whose values are all equal has no natural width, so the
    /// range is widened to `[v - 0.5, v + 0.5]`.
    pub fn with_bins(data: &[f64], bins: usize) -> StatsResult<Self> {
        if bins == 0 {
            return Err(StatsError::InvalidBinCount);
        }
        check_sample(data)?;

        let mut lo = data.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if hi <= lo {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let mut edges: Vec<f64> = (0..bins).map(|i| lo + width * i as f64).collect();
        edges.push(hi);

        let mut counts = vec![0; bins];
        for &value in data {
            let index = (((value - lo) / (hi - lo)) * bins as f64) as usize;
            counts[index.min(bins - 1)] += 1;
        }

        Ok(Self { edges, counts })
    }

    /// Bin edges (one more than the number of bins)
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Per-bin counts
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Number of bins
    pub fn bin_count(&self) -> usize {
        self.counts.len()
    }

    /// Tallest bin
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Total number of binned values
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Lowest and highest edge
    pub fn range(&self) -> (f64, f64) {
        (self.edges[0], self.edges[self.edges.len() - 1])
    }

    /// Iterate over `(lower edge, upper edge, count)` per bin
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(edge, &count)| (edge[0], edge[1], count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_basic_binning() {
        let data = [0.0, 0.5, 1.0, 1.5, 2.0];
        let hist = Histogram::with_bins(&data, 4).unwrap();

        assert_eq!(hist.bin_count(), 4);
        assert_eq!(hist.edges(), &[0.0, 0.5, 1.0, 1.5, 2.0]);
        // The maximum lands in the last, closed bin
        assert_eq!(hist.counts(), &[1, 1, 1, 2]);
        assert_eq!(hist.max_count(), 2);
    }

    #[test]
    fn test_constant_sample_is_widened() {
        let hist = Histogram::with_bins(&[0.0, 0.0], DEFAULT_BINS).unwrap();
        assert_eq!(hist.range(), (-0.5, 0.5));
        assert_eq!(hist.total(), 2);
        assert_eq!(hist.max_count(), 2);
    }

    #[test]
    fn test_zero_bins_rejected() {
        assert_eq!(
            Histogram::with_bins(&[1.0], 0),
            Err(StatsError::InvalidBinCount)
        );
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(
            Histogram::with_bins(&[], DEFAULT_BINS),
            Err(StatsError::EmptyInput)
        );
    }

    #[test]
    fn test_bins_iterator() {
        let hist = Histogram::with_bins(&[1.0, 3.0], 2).unwrap();
        let bins: Vec<_> = hist.bins().collect();
        assert_eq!(bins, vec![(1.0, 2.0, 1), (2.0, 3.0, 1)]);
    }

    proptest! {
        #[test]
        fn prop_every_value_is_counted(
            data in prop::collection::vec(-1e3f64..1e3, 1..300),
            bins in 1usize..50,
        ) {
            let hist = Histogram::with_bins(&data, bins).unwrap();
            prop_assert_eq!(hist.total(), data.len());
            prop_assert_eq!(hist.edges().len(), bins + 1);
        }
    }
}
