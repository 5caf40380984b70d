//! Axis-limit geometry for panels
//!
//! Bounding boxes and the limit adjustments that keep distances undistorted:
//! isometric cubes for 3D views and equal-aspect limits for 2D views.

use serde::{Deserialize, Serialize};

use crate::cloud::{Axis, PointCloud};

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum corner
    pub min: [f64; 3],
    /// Maximum corner
    pub max: [f64; 3],
}

impl BoundingBox {
    /// Create a box from bounds
    pub fn from_bounds(min: [f64; 3], max: [f64; 3]) -> Self {
        Self { min, max }
    }

    /// Smallest box holding every point, `None` when there are no points
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = [f64; 3]>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bbox = Self::from_bounds(first, first);
        for p in points {
            for i in 0..3 {
                bbox.min[i] = bbox.min[i].min(p[i]);
                bbox.max[i] = bbox.max[i].max(p[i]);
            }
        }
        Some(bbox)
    }

    /// Smallest box holding both clouds
    pub fn enclosing(before: &PointCloud, after: &PointCloud) -> Option<Self> {
        Self::from_points(before.iter().chain(after.iter()))
    }

    /// Get center of the box
    pub fn center(&self) -> [f64; 3] {
        [0, 1, 2].map(|i| self.min[i] / 2.0 + self.max[i] / 2.0)
    }

    /// Largest half-extent over the three axes
    ///
    /// Halved before subtracting, so it stays finite for any finite box.
    fn max_half_extent(&self) -> f64 {
        (0..3)
            .map(|i| self.max[i] / 2.0 - self.min[i] / 2.0)
            .fold(0.0, f64::max)
    }

    /// Get size of the box
    pub fn size(&self) -> [f64; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    /// Get maximum dimension
    pub fn max_dimension(&self) -> f64 {
        let size = self.size();
        size[0].max(size[1]).max(size[2])
    }

    /// `(min, max)` along one axis
    pub fn range(&self, axis: Axis) -> (f64, f64) {
        let i = axis.index();
        (self.min[i], self.max[i])
    }

    /// Cube with the same center whose side is the largest dimension
    ///
    /// A box with no extent becomes a unit cube. Corners are clamped to the
    /// finite `f64` range, so boxes near `f64::MAX` lose their cube shape
    /// instead of overflowing.
    pub fn cube(&self) -> Self {
        let half = match self.max_half_extent() {
            h if h > 0.0 => h,
            _ => 0.5,
        };
        let c = self.center();
        Self {
            min: c.map(|v| clamp_finite(v - half)),
            max: c.map(|v| clamp_finite(v + half)),
        }
    }

    /// Grow every axis by `fraction` of the largest dimension on each side
    ///
    /// A box with no extent grows by 0.5. Bounds are clamped like [`cube`](Self::cube).
    pub fn padded(&self, fraction: f64) -> Self {
        let pad = match self.max_half_extent() {
            h if h > 0.0 => h * fraction * 2.0,
            _ => 0.5,
        };
        Self {
            min: self.min.map(|v| clamp_finite(v - pad)),
            max: self.max.map(|v| clamp_finite(v + pad)),
        }
    }
}

fn clamp_finite(v: f64) -> f64 {
    v.clamp(f64::MIN, f64::MAX)
}

/// Widen a zero-width range so it can be drawn
pub fn padded_range((lo, hi): (f64, f64)) -> (f64, f64) {
    if hi > lo {
        (lo, hi)
    } else {
        (lo - 0.5, hi + 0.5)
    }
}

/// Expand 2D limits so one data unit spans the same pixels on both axes
///
/// The axis with fewer units per pixel grows around its center; the other
/// is left unchanged.
pub fn equal_aspect_limits(
    x: (f64, f64),
    y: (f64, f64),
    width_px: f64,
    height_px: f64,
) -> ((f64, f64), (f64, f64)) {
    if width_px <= 0.0 || height_px <= 0.0 {
        return (x, y);
    }

    let x_per_px = (x.1 - x.0) / width_px;
    let y_per_px = (y.1 - y.0) / height_px;
    let per_px = x_per_px.max(y_per_px);
    if !per_px.is_finite() || per_px <= 0.0 {
        return (x, y);
    }

    let grow = |(lo, hi): (f64, f64), pixels: f64| {
        let half = per_px * pixels / 2.0;
        let mid = (lo + hi) / 2.0;
        (mid - half, mid + half)
    };

    let x = if x_per_px < per_px { grow(x, width_px) } else { x };
    let y = if y_per_px < per_px { grow(y, height_px) } else { y };
    (x, y)
}
