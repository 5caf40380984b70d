//! Point cloud storage
//!
//! A [`PointCloud`] keeps its coordinates as three parallel columns, the
//! layout most scientific sources hand over. Two clouds are compared point
//! by point, so index `i` of one cloud corresponds to index `i` of the other.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CompareError, CompareResult};

/// Coordinate axis identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All three axes in column order
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Column index of this axis
    pub fn index(&self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

/// Ordered collection of 3D points stored column-wise
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointCloud {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
}

impl PointCloud {
    /// Create a cloud from three coordinate columns
    ///
    /// Fails with `ShapeMismatch` naming the first column whose length
    /// differs from the x column.
    pub fn from_columns(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> CompareResult<Self> {
        let cloud = Self { x, y, z };
        cloud.check_columns()?;
        Ok(cloud)
    }

    /// Create a cloud from `[x, y, z]` points
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = [f64; 3]>,
    {
        let mut cloud = Self::default();
        for [x, y, z] in points {
            cloud.x.push(x);
            cloud.y.push(y);
            cloud.z.push(z);
        }
        cloud
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Check if the cloud has no points
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Coordinate column for an axis
    pub fn column(&self, axis: Axis) -> &[f64] {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }

    /// X coordinates
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Y coordinates
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Z coordinates
    pub fn z(&self) -> &[f64] {
        &self.z
    }

    /// Point at an index
    pub fn point(&self, index: usize) -> Option<[f64; 3]> {
        Some([
            *self.x.get(index)?,
            *self.y.get(index)?,
            *self.z.get(index)?,
        ])
    }

    /// Iterate over points in index order
    pub fn iter(&self) -> impl Iterator<Item = [f64; 3]> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.z)
            .map(|((&x, &y), &z)| [x, y, z])
    }

    /// Points projected onto the horizontal X-Y plane
    pub fn planar(&self) -> Vec<[f64; 2]> {
        self.x.iter().zip(&self.y).map(|(&x, &y)| [x, y]).collect()
    }

    /// Verify all three columns share one length
    ///
    /// Deserialized clouds skip [`PointCloud::from_columns`], so comparisons
    /// call this again before reading any coordinates.
    pub fn check_columns(&self) -> CompareResult<()> {
        let expected = self.x.len();
        for axis in [Axis::Y, Axis::Z] {
            let actual = self.column(axis).len();
            if actual != expected {
                return Err(CompareError::ShapeMismatch {
                    axis,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}

impl FromIterator<[f64; 3]> for PointCloud {
    fn from_iter<I: IntoIterator<Item = [f64; 3]>>(iter: I) -> Self {
        Self::from_points(iter)
    }
}

/// Verify that two clouds can be compared index by index
///
/// Each cloud must be internally consistent and every axis must hold the
/// same number of coordinates in both clouds.
pub fn check_shapes(before: &PointCloud, after: &PointCloud) -> CompareResult<()> {
    before.check_columns()?;
    after.check_columns()?;
    for axis in Axis::ALL {
        let expected = before.column(axis).len();
        let actual = after.column(axis).len();
        if expected != actual {
            return Err(CompareError::ShapeMismatch {
                axis,
                expected,
                actual,
            });
        }
    }
    Ok(())
}
