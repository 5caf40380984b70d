//! Plotting surface abstraction
//!
//! Panels never talk to a plotting library directly. They describe what to
//! draw with the primitives below and hand them to a [`PlotCanvas`]; a
//! [`PlotSurface`] additionally knows how to finish the figure and produce
//! its output (a recorded scene, an SVG document, ...).

use cloudshift_stats::Histogram;
use serde::{Deserialize, Serialize};

use crate::colormap::Color;
use crate::error::{validation, RenderError, RenderResult};
use crate::layout::{FigureLayout, Projection};

/// Camera angles for 3D regions, in degrees
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewAngle {
    /// Angle above the horizontal plane
    pub elevation_deg: f64,
    /// Rotation around the vertical axis
    pub azimuth_deg: f64,
}

impl Default for ViewAngle {
    fn default() -> Self {
        Self {
            elevation_deg: 20.0,
            azimuth_deg: 45.0,
        }
    }
}

/// Label and limits of one axis
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub label: String,
    pub limits: (f64, f64),
}

impl AxisSpec {
    pub fn new(label: impl Into<String>, limits: (f64, f64)) -> Self {
        Self {
            label: label.into(),
            limits,
        }
    }
}

/// Axes configuration of a region
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxesSpec {
    /// Panel title
    pub title: String,
    pub x: AxisSpec,
    pub y: AxisSpec,
    /// Present only for spatial regions
    pub z: Option<AxisSpec>,
    /// One data unit spans equal length on every axis
    pub equal_aspect: bool,
    /// Camera angles, spatial regions only
    pub view: Option<ViewAngle>,
    /// Show a legend for labelled series
    pub legend: bool,
}

impl AxesSpec {
    /// Axes for a 2D region
    pub fn planar(title: impl Into<String>, x: AxisSpec, y: AxisSpec) -> Self {
        Self {
            title: title.into(),
            x,
            y,
            z: None,
            equal_aspect: false,
            view: None,
            legend: false,
        }
    }

    /// Axes for a 3D region
    pub fn spatial(title: impl Into<String>, x: AxisSpec, y: AxisSpec, z: AxisSpec) -> Self {
        Self {
            z: Some(z),
            view: Some(ViewAngle::default()),
            ..Self::planar(title, x, y)
        }
    }

    /// Force equal data-unit scaling across axes
    pub fn with_equal_aspect(mut self) -> Self {
        self.equal_aspect = true;
        self
    }

    /// Set the camera angles
    pub fn with_view(mut self, view: ViewAngle) -> Self {
        self.view = Some(view);
        self
    }

    /// Show a legend
    pub fn with_legend(mut self) -> Self {
        self.legend = true;
        self
    }

    /// Projection these axes describe
    pub fn projection(&self) -> Projection {
        if self.z.is_some() {
            Projection::Spatial
        } else {
            Projection::Planar
        }
    }

    /// Check that every axis range is finite and ordered
    pub fn validate(&self) -> RenderResult<()> {
        for axis in [Some(&self.x), Some(&self.y), self.z.as_ref()]
            .into_iter()
            .flatten()
        {
            validation::validate_range(axis.limits.0, axis.limits.1)?;
        }
        Ok(())
    }
}

/// Point coordinates for one series
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Vertices {
    Planar(Vec<[f64; 2]>),
    Spatial(Vec<[f64; 3]>),
}

impl Vertices {
    /// Number of vertices
    pub fn len(&self) -> usize {
        match self {
            Vertices::Planar(v) => v.len(),
            Vertices::Spatial(v) => v.len(),
        }
    }

    /// Check if there are no vertices
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Coordinate system of the vertices
    pub fn projection(&self) -> Projection {
        match self {
            Vertices::Planar(_) => Projection::Planar,
            Vertices::Spatial(_) => Projection::Spatial,
        }
    }
}

/// Marker fill for a series
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Fill {
    /// Every marker shares one color
    Uniform(Color),
    /// One color per marker, in vertex order
    PerPoint(Vec<Color>),
}

impl Fill {
    /// Color of the marker at `index`
    pub fn color_at(&self, index: usize) -> Color {
        match self {
            Fill::Uniform(color) => *color,
            Fill::PerPoint(colors) => colors.get(index).copied().unwrap_or_default(),
        }
    }

    /// Color used for the legend swatch
    pub fn legend_color(&self) -> Color {
        match self {
            Fill::Uniform(color) => *color,
            Fill::PerPoint(colors) => {
                // Highest-valued marker is the most recognizable swatch
                colors.last().copied().unwrap_or_default()
            }
        }
    }
}

/// Point markers
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerSeries {
    /// Legend entry
    pub label: Option<String>,
    pub vertices: Vertices,
    pub fill: Fill,
    /// Marker radius in pixels
    pub size: u32,
}

impl MarkerSeries {
    pub fn new(vertices: Vertices, fill: Fill, size: u32) -> Self {
        Self {
            label: None,
            vertices,
            fill,
            size,
        }
    }

    /// Set the legend entry
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    fn validate(&self) -> RenderResult<()> {
        if let Fill::PerPoint(colors) = &self.fill {
            if colors.len() != self.vertices.len() {
                return Err(RenderError::InvalidSeries {
                    message: format!(
                        "{} colors for {} markers",
                        colors.len(),
                        self.vertices.len()
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Line segments from `from[i]` to `to[i]`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentSeries {
    pub from: Vertices,
    pub to: Vertices,
    pub color: Color,
    /// Stroke width in pixels
    pub width: u32,
}

impl SegmentSeries {
    pub fn new(from: Vertices, to: Vertices, color: Color, width: u32) -> Self {
        Self {
            from,
            to,
            color,
            width,
        }
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.from.len()
    }

    /// Check if there are no segments
    pub fn is_empty(&self) -> bool {
        self.from.is_empty()
    }

    fn validate(&self) -> RenderResult<()> {
        if self.from.projection() != self.to.projection() || self.from.len() != self.to.len() {
            return Err(RenderError::InvalidSeries {
                message: format!(
                    "segment endpoints differ: {} {:?} starts, {} {:?} ends",
                    self.from.len(),
                    self.from.projection(),
                    self.to.len(),
                    self.to.projection()
                ),
            });
        }
        Ok(())
    }
}

/// Histogram bars
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistogramSeries {
    pub histogram: Histogram,
    pub fill: Color,
    pub edge: Color,
}

/// Multi-line text anchored at data coordinates of a 2D region
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextAnnotation {
    /// Top-left anchor in data coordinates
    pub position: [f64; 2],
    pub lines: Vec<String>,
    /// Font size in pixels
    pub font_size: u32,
}

/// Color legend bound to a value range
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Colorbar {
    pub label: String,
    /// Value range `(lo, hi)`; `lo == hi` is allowed
    pub range: (f64, f64),
    /// Colors from `lo` to `hi`, evenly spaced
    pub samples: Vec<Color>,
}

/// Drawing operations available to panels
pub trait PlotCanvas {
    /// Start a new figure with the given size and regions
    fn begin_figure(&mut self, layout: &FigureLayout) -> RenderResult<()>;

    /// Set titles, labels, limits and view of a region
    fn configure_axes(&mut self, region: &str, axes: &AxesSpec) -> RenderResult<()>;

    /// Draw point markers
    fn draw_markers(&mut self, region: &str, series: &MarkerSeries) -> RenderResult<()>;

    /// Draw line segments
    fn draw_segments(&mut self, region: &str, series: &SegmentSeries) -> RenderResult<()>;

    /// Draw histogram bars
    fn draw_histogram(&mut self, region: &str, series: &HistogramSeries) -> RenderResult<()>;

    /// Place a text annotation
    fn draw_text(&mut self, region: &str, text: &TextAnnotation) -> RenderResult<()>;

    /// Attach a colorbar to a region
    fn attach_colorbar(&mut self, region: &str, colorbar: &Colorbar) -> RenderResult<()>;
}

/// A canvas that produces output once the figure is complete
pub trait PlotSurface: PlotCanvas {
    /// What a finished figure turns into
    type Output;

    /// Complete the current figure
    fn finish(&mut self) -> RenderResult<Self::Output>;
}

/// Check a primitive against the projection of the region it targets
pub(crate) fn check_projection(
    region: &str,
    expected: Projection,
    actual: Projection,
) -> RenderResult<()> {
    if expected != actual {
        return Err(RenderError::ProjectionMismatch {
            region: region.to_string(),
            expected,
        });
    }
    Ok(())
}

pub(crate) fn validate_markers(
    region: &str,
    projection: Projection,
    series: &MarkerSeries,
) -> RenderResult<()> {
    check_projection(region, projection, series.vertices.projection())?;
    series.validate()
}

pub(crate) fn validate_segments(
    region: &str,
    projection: Projection,
    series: &SegmentSeries,
) -> RenderResult<()> {
    series.validate()?;
    check_projection(region, projection, series.from.projection())
}

pub(crate) fn validate_colorbar(colorbar: &Colorbar) -> RenderResult<()> {
    validation::validate_range(colorbar.range.0, colorbar.range.1)?;
    if colorbar.samples.is_empty() {
        return Err(RenderError::InvalidSeries {
            message: "colorbar has no color samples".to_string(),
        });
    }
    Ok(())
}
