//! Figure layout: figure size and named regions
//!
//! Regions are rectangles given as fractions of the figure, origin at the
//! top-left corner, so a layout is independent of the output resolution.

use serde::{Deserialize, Serialize};

use crate::error::{validation, RenderError, RenderResult};

/// Region holding the 3D overview panel
pub const OVERVIEW: &str = "overview";
/// Region holding the delta histogram panel
pub const HISTOGRAM: &str = "histogram";
/// Region holding the X-Y top view panel
pub const TOP_VIEW: &str = "top_view";

/// Coordinate system of a region
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Projection {
    /// 2D cartesian axes
    Planar,
    /// 3D cartesian axes
    Spatial,
}

/// Rectangle in figure fractions
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RegionRect {
    /// Create a new rectangle
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Fraction of the figure covered by this rectangle
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Pixel offset and size inside a figure of the given size
    pub fn to_pixels(&self, width: u32, height: u32) -> ((i32, i32), (u32, u32)) {
        let (w, h) = (width as f64, height as f64);
        let left = (self.x * w).round();
        let top = (self.y * h).round();
        let right = ((self.x + self.width) * w).round();
        let bottom = ((self.y + self.height) * h).round();
        (
            (left as i32, top as i32),
            ((right - left) as u32, (bottom - top) as u32),
        )
    }

    fn is_within_unit_square(&self) -> bool {
        let fits = |start: f64, len: f64| start >= 0.0 && len > 0.0 && start + len <= 1.0 + 1e-9;
        fits(self.x, self.width) && fits(self.y, self.height)
    }
}

/// A named region of the figure
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionSpec {
    pub name: String,
    pub rect: RegionRect,
    pub projection: Projection,
}

/// Figure size with its regions
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FigureLayout {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Optional figure-wide title
    pub title: Option<String>,
    /// Regions in draw order
    pub regions: Vec<RegionSpec>,
}

impl FigureLayout {
    /// Create an empty layout
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            title: None,
            regions: Vec::new(),
        }
    }

    /// Three-panel comparison layout
    ///
    /// The 3D overview takes the left half; the histogram and the top view
    /// stack in the right half.
    pub fn comparison(width: u32, height: u32) -> Self {
        Self::new(width, height)
            .with_region(OVERVIEW, RegionRect::new(0.0, 0.0, 0.5, 1.0), Projection::Spatial)
            .with_region(HISTOGRAM, RegionRect::new(0.5, 0.0, 0.5, 0.5), Projection::Planar)
            .with_region(TOP_VIEW, RegionRect::new(0.5, 0.5, 0.5, 0.5), Projection::Planar)
    }

    /// Set the figure title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add a region
    pub fn with_region(
        mut self,
        name: impl Into<String>,
        rect: RegionRect,
        projection: Projection,
    ) -> Self {
        self.regions.push(RegionSpec {
            name: name.into(),
            rect,
            projection,
        });
        self
    }

    /// Look up a region by name
    pub fn region(&self, name: &str) -> Option<&RegionSpec> {
        self.regions.iter().find(|r| r.name == name)
    }

    /// Check size, region bounds and name uniqueness
    pub fn validate(&self) -> RenderResult<()> {
        validation::validate_dimensions(self.width, self.height)?;

        if self.regions.is_empty() {
            return Err(RenderError::InvalidLayout {
                message: "layout has no regions".to_string(),
            });
        }

        for (i, region) in self.regions.iter().enumerate() {
            if !region.rect.is_within_unit_square() {
                return Err(RenderError::InvalidLayout {
                    message: format!("region '{}' lies outside the figure", region.name),
                });
            }
            if self.regions[..i].iter().any(|r| r.name == region.name) {
                return Err(RenderError::InvalidLayout {
                    message: format!("region '{}' is defined twice", region.name),
                });
            }
        }

        Ok(())
    }
}
