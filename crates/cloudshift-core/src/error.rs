//! Error types for cloudshift-core
//!
//! Provides error handling for:
//! - Input validation (shape mismatches, empty clouds)
//! - Rendering failures
//! - Configuration errors

use cloudshift_stats::StatsError;
use thiserror::Error;

use crate::cloud::Axis;
use crate::layout::Projection;

/// Main error type for comparison operations
#[derive(Error, Debug)]
pub enum CompareError {
    /// Coordinate columns of different lengths
    #[error("Shape mismatch on {axis} axis: expected {expected} coordinates, found {actual}")]
    ShapeMismatch {
        axis: Axis,
        expected: usize,
        actual: usize,
    },

    /// No points to compare
    #[error("Point clouds are empty")]
    EmptyInput,

    /// Statistics errors
    #[error("Statistics failed: {0}")]
    Stats(StatsError),

    /// Rendering errors
    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StatsError> for CompareError {
    fn from(err: StatsError) -> Self {
        match err {
            StatsError::EmptyInput => CompareError::EmptyInput,
            other => CompareError::Stats(other),
        }
    }
}

/// Errors related to rendering
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// Drawing before a figure was created
    #[error("No figure has been started")]
    FigureNotStarted,

    /// Region name not present in the figure layout
    #[error("Unknown figure region: {region}")]
    UnknownRegion { region: String },

    /// Primitive does not fit the region's projection
    #[error("Region '{region}' expects {expected:?} coordinates")]
    ProjectionMismatch {
        region: String,
        expected: Projection,
    },

    /// Axes must be configured before the panel can be drawn
    #[error("Axes not configured for region '{region}'")]
    AxesNotConfigured { region: String },

    /// Numeric range that is reversed or not finite
    #[error("Invalid range [{lo}, {hi}]")]
    InvalidRange { lo: f64, hi: f64 },

    /// Malformed series data
    #[error("Invalid series: {message}")]
    InvalidSeries { message: String },

    /// Malformed figure layout
    #[error("Invalid layout: {message}")]
    InvalidLayout { message: String },

    /// Failure reported by the drawing backend
    #[error("Backend error: {message}")]
    Backend { message: String },
}

/// Errors related to configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// TOML or JSON could not be parsed
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// Colormap name is not built in
    #[error("Unknown colormap: {name}")]
    UnknownColormap { name: String },

    /// Color string is not a #RRGGBB hex color
    #[error("Invalid color: {value}")]
    InvalidColor { value: String },

    /// Value is out of valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),
}

/// Result type alias for comparison operations
pub type CompareResult<T> = Result<T, CompareError>;

/// Result type alias for render operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Validation utilities
pub mod validation {
    use super::*;

    /// Largest figure edge in pixels
    pub const MAX_DIMENSION: u32 = 16384;

    /// Validate figure dimensions
    pub fn validate_dimensions(width: u32, height: u32) -> RenderResult<()> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(RenderError::InvalidLayout {
                message: format!(
                    "figure size {width}x{height} must be between 1 and {MAX_DIMENSION} pixels"
                ),
            });
        }
        Ok(())
    }

    /// Validate that `lo <= hi` and both are finite
    pub fn validate_range(lo: f64, hi: f64) -> RenderResult<()> {
        if !lo.is_finite() || !hi.is_finite() || lo > hi {
            return Err(RenderError::InvalidRange { lo, hi });
        }
        Ok(())
    }

    /// Validate that a fraction lies in `[0, 1]`
    pub fn validate_fraction(name: &str, value: f64) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::OutOfRange(format!(
                "{name} must be between 0.0 and 1.0, got {value}"
            )));
        }
        Ok(())
    }
}
