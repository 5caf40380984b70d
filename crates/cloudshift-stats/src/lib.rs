//! cloudshift-stats - Statistical functions for displacement analysis
//!
//! This crate provides the numeric summaries used when comparing two
//! point clouds:
//!
//! - **SummaryStatistics**: mean, median, sample standard deviation, min, max
//! - **Histogram**: fixed bin-count frequency histogram
//!
//! Both reject empty input instead of producing NaN, so callers never have
//! to guard against silently poisoned statistics.

pub mod error;
pub mod histogram;
pub mod summary;

pub use error::*;
pub use histogram::*;
pub use summary::*;
