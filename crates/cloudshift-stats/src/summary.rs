//! Summary statistics for displacement samples
//!
//! Provides the descriptive statistics reported for a comparison:
//! - Mean, median
//! - Sample variance and standard deviation (N - 1 denominator)
//! - Min, max

use serde::{Deserialize, Serialize};

use crate::error::{check_sample, StatsResult};

/// Summary statistics for a non-empty numeric sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    /// Number of values
    pub count: usize,
    /// Mean (average)
    pub mean: f64,
    /// Median (50th percentile)
    pub median: f64,
    /// Sample variance
    pub variance: f64,
    /// Sample standard deviation
    pub std_dev: f64,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
}

impl SummaryStatistics {
    /// Compute summary statistics from data
    ///
    /// A single value has a standard deviation of 0 rather than the
    /// undefined `0 / 0` of the N - 1 formula.
    pub fn from_data(data: &[f64]) -> StatsResult<Self> {
        check_sample(data)?;

        let count = data.len();
        let min = data.iter().copied().fold(f64::INFINITY, f64::min);
        let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        // Rounding can push the sum-based mean of identical values just past them
        let mean = (data.iter().sum::<f64>() / count as f64).clamp(min, max);

        let variance = if count > 1 {
            data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (count - 1) as f64
        } else {
            0.0
        };

        let mut sorted = data.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let median = if count % 2 == 0 {
            (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
        } else {
            sorted[count / 2]
        };

        Ok(Self {
            count,
            mean,
            median,
            variance,
            std_dev: variance.sqrt(),
            min,
            max,
        })
    }
}

/// Summarize a sample, see [`SummaryStatistics::from_data`]
pub fn summarize(data: &[f64]) -> StatsResult<SummaryStatistics> {
    SummaryStatistics::from_data(data)
}
