//! Error types for cloudshift-stats

use thiserror::Error;

/// Errors raised while summarizing a sample
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    /// The sample has no values
    #[error("cannot summarize an empty sample")]
    EmptyInput,

    /// A value is NaN or infinite
    #[error("sample value at index {index} is not finite")]
    NonFinite { index: usize },

    /// Histograms need at least one bin
    #[error("histogram bin count must be at least 1")]
    InvalidBinCount,
}

/// Result type alias for statistics operations
pub type StatsResult<T> = Result<T, StatsError>;

/// Reject empty samples and samples holding NaN or infinities
pub(crate) fn check_sample(data: &[f64]) -> StatsResult<()> {
    if data.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    match data.iter().position(|x| !x.is_finite()) {
        Some(index) => Err(StatsError::NonFinite { index }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_sample() {
        assert_eq!(check_sample(&[]), Err(StatsError::EmptyInput));
        assert_eq!(
            check_sample(&[1.0, f64::NAN]),
            Err(StatsError::NonFinite { index: 1 })
        );
        assert!(check_sample(&[0.0, 2.5]).is_ok());
    }

    #[test]
    fn test_error_display() {
        let err = StatsError::NonFinite { index: 7 };
        assert!(err.to_string().contains('7'));
    }
}
