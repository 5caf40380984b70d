//! Configuration for cloudshift-core
//!
//! Centralized configuration for figure size, visual encodings and report
//! formatting. Every section has defaults, so a TOML file only needs the
//! values it changes.

use serde::{Deserialize, Serialize};

use crate::colormap::{Color, Colormap, ColormapKind};
use crate::error::{validation, ConfigError};

/// Comparison configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Figure size and title
    pub figure: FigureConfig,
    /// Marker, segment and color settings shared by the panels
    pub style: StyleConfig,
    /// 3D overview settings
    pub overview: OverviewConfig,
    /// Histogram settings
    pub histogram: HistogramConfig,
    /// Top view settings
    pub top_view: TopViewConfig,
}

/// Figure configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Optional figure-wide title
    pub title: Option<String>,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 1000,
            title: None,
        }
    }
}

/// Visual encoding configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Colormap for displacement magnitudes
    pub colormap: String,
    /// Color of the "before" markers (#RRGGBB)
    pub before_color: String,
    /// Opacity of the "before" markers
    pub before_alpha: f32,
    /// Opacity of the delta-colored "after" markers
    pub after_alpha: f32,
    /// Marker radius in pixels
    pub marker_size: u32,
    /// Color of the connecting segments (#RRGGBB)
    pub segment_color: String,
    /// Opacity of the connecting segments
    pub segment_alpha: f32,
    /// Stroke width of the connecting segments in pixels
    pub segment_width: u32,
    /// Number of color samples in a colorbar
    pub colorbar_steps: usize,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            colormap: "jet".to_string(),
            before_color: "#1F3FBF".to_string(),
            before_alpha: 0.5,
            after_alpha: 1.0,
            marker_size: 3,
            segment_color: "#808080".to_string(),
            segment_alpha: 0.3,
            segment_width: 1,
            colorbar_steps: 64,
        }
    }
}

/// 3D overview configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverviewConfig {
    /// Camera elevation in degrees
    pub elevation_deg: f64,
    /// Camera azimuth in degrees
    pub azimuth_deg: f64,
}

impl Default for OverviewConfig {
    fn default() -> Self {
        Self {
            elevation_deg: 20.0,
            azimuth_deg: 45.0,
        }
    }
}

/// Histogram configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramConfig {
    /// Number of bins
    pub bins: usize,
    /// Decimal places in the statistics overlay
    pub decimals: usize,
    /// Overlay anchor as a fraction of the x data range
    pub text_x_fraction: f64,
    /// Overlay anchor as a fraction of the tallest bin
    pub text_y_fraction: f64,
    /// Bar color (#RRGGBB)
    pub fill_color: String,
    /// Bar opacity
    pub fill_alpha: f32,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            bins: cloudshift_stats::DEFAULT_BINS,
            decimals: 3,
            text_x_fraction: 0.6,
            text_y_fraction: 0.8,
            fill_color: "#4682B4".to_string(),
            fill_alpha: 0.7,
        }
    }
}

/// Top view configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopViewConfig {
    /// Margin around the points as a fraction of their largest extent
    pub padding: f64,
}

impl Default for TopViewConfig {
    fn default() -> Self {
        Self { padding: 0.05 }
    }
}

/// Colors resolved from a validated [`StyleConfig`] and [`HistogramConfig`]
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub colormap: Colormap,
    pub before: Color,
    pub after_alpha: f32,
    pub segment: Color,
    pub histogram_fill: Color,
    pub histogram_edge: Color,
}

impl CompareConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate_dimensions(self.figure.width, self.figure.height)
            .map_err(|e| ConfigError::OutOfRange(e.to_string()))?;

        let style = &self.style;
        for (name, alpha) in [
            ("before_alpha", style.before_alpha),
            ("after_alpha", style.after_alpha),
            ("segment_alpha", style.segment_alpha),
            ("fill_alpha", self.histogram.fill_alpha),
        ] {
            validation::validate_fraction(name, alpha as f64)?;
        }

        if style.marker_size == 0 {
            return Err(ConfigError::OutOfRange(
                "marker_size must be positive".to_string(),
            ));
        }

        if style.colorbar_steps == 0 {
            return Err(ConfigError::OutOfRange(
                "colorbar_steps must be positive".to_string(),
            ));
        }

        if !(-90.0..=90.0).contains(&self.overview.elevation_deg) {
            return Err(ConfigError::OutOfRange(
                "elevation_deg must be between -90 and 90".to_string(),
            ));
        }

        if !self.overview.azimuth_deg.is_finite() {
            return Err(ConfigError::OutOfRange(
                "azimuth_deg must be finite".to_string(),
            ));
        }

        if self.histogram.bins == 0 {
            return Err(ConfigError::OutOfRange(
                "histogram bins must be at least 1".to_string(),
            ));
        }

        validation::validate_fraction("text_x_fraction", self.histogram.text_x_fraction)?;
        validation::validate_fraction("text_y_fraction", self.histogram.text_y_fraction)?;

        if !(0.0..=1.0).contains(&self.top_view.padding) {
            return Err(ConfigError::OutOfRange(
                "top_view padding must be between 0.0 and 1.0".to_string(),
            ));
        }

        self.palette().map(|_| ())
    }

    /// Resolve colormap and colors
    pub fn palette(&self) -> Result<Palette, ConfigError> {
        let style = &self.style;
        let colormap = style.colormap.parse::<ColormapKind>()?.colormap();

        Ok(Palette {
            colormap,
            before: Color::from_hex(&style.before_color)?.with_alpha(style.before_alpha),
            after_alpha: style.after_alpha,
            segment: Color::from_hex(&style.segment_color)?.with_alpha(style.segment_alpha),
            histogram_fill: Color::from_hex(&self.histogram.fill_color)?
                .with_alpha(self.histogram.fill_alpha),
            histogram_edge: Color::from_packed(0x000000),
        })
    }
}
