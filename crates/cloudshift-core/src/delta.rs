//! Per-point displacement between two corresponding clouds
//!
//! For every index the displacement vector is `after[i] - before[i]` and the
//! delta is its Euclidean length. Results keep input order and are derived
//! fresh on every call.

use cloudshift_stats::SummaryStatistics;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cloud::{check_shapes, PointCloud};
use crate::error::CompareResult;

/// Displacement magnitudes, one per point
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeltaMagnitude(Vec<f64>);

impl DeltaMagnitude {
    /// Magnitudes in point order
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// Number of magnitudes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no magnitudes
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Largest magnitude, 0 for an empty sequence
    pub fn max(&self) -> f64 {
        self.0.iter().copied().fold(0.0, f64::max)
    }

    /// Iterate over magnitudes
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    /// Summary statistics of the magnitudes
    pub fn summarize(&self) -> CompareResult<SummaryStatistics> {
        Ok(SummaryStatistics::from_data(&self.0)?)
    }

    /// Take ownership of the magnitudes
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl From<Vec<f64>> for DeltaMagnitude {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

/// Displacement vectors together with their magnitudes
#[derive(Debug, Clone, PartialEq)]
pub struct Displacements {
    /// Component-wise differences `after - before`
    pub vectors: Vec<Vector3<f64>>,
    /// Euclidean length of each vector
    pub magnitudes: DeltaMagnitude,
}

/// Euclidean length of a displacement
///
/// Components are scaled by the largest one before squaring, so tiny
/// displacements never underflow to a zero length.
pub fn magnitude(v: &Vector3<f64>) -> f64 {
    let scale = v.amax();
    if scale == 0.0 {
        return 0.0;
    }
    (v / scale).norm() * scale
}

/// Compute displacement vectors and magnitudes for paired clouds
pub fn displacements(before: &PointCloud, after: &PointCloud) -> CompareResult<Displacements> {
    check_shapes(before, after)?;

    let vectors: Vec<Vector3<f64>> = before
        .iter()
        .zip(after.iter())
        .map(|(b, a)| Vector3::new(a[0] - b[0], a[1] - b[1], a[2] - b[2]))
        .collect();
    let magnitudes = DeltaMagnitude(vectors.iter().map(magnitude).collect());

    debug!(
        points = vectors.len(),
        max_delta = magnitudes.max(),
        "computed displacements"
    );

    Ok(Displacements {
        vectors,
        magnitudes,
    })
}

/// Compute per-point displacement magnitudes for paired clouds
pub fn compute(before: &PointCloud, after: &PointCloud) -> CompareResult<DeltaMagnitude> {
    Ok(displacements(before, after)?.magnitudes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompareError;

    #[test]
    fn test_pythagorean_delta() {
        let before = PointCloud::from_points([[0.0, 0.0, 0.0]]);
        let after = PointCloud::from_points([[3.0, 4.0, 0.0]]);
        let delta = compute(&before, &after).unwrap();
        assert_eq!(delta.values(), &[5.0]);
    }

    #[test]
    fn test_unit_moves() {
        let before = PointCloud::from_points([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        let after = PointCloud::from_points([[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 1.0]]);
        let delta = compute(&before, &after).unwrap();
        assert_eq!(delta.values(), &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_vectors_are_after_minus_before() {
        let before = PointCloud::from_points([[1.0, 2.0, 3.0]]);
        let after = PointCloud::from_points([[0.0, 4.0, 3.5]]);
        let result = displacements(&before, &after).unwrap();
        assert_eq!(result.vectors[0], Vector3::new(-1.0, 2.0, 0.5));
    }

    #[test]
    fn test_tiny_displacement_is_not_zero() {
        let before = PointCloud::from_points([[0.0, 0.0, 0.0]]);
        let after = PointCloud::from_points([[1e-200, 0.0, 0.0]]);
        let delta = compute(&before, &after).unwrap();
        assert!(delta.values()[0] > 0.0);
    }

    #[test]
    fn test_mismatch_is_rejected() {
        let before = PointCloud::from_points([[0.0; 3], [1.0; 3]]);
        let after = PointCloud::from_points([[0.0; 3]]);
        assert!(matches!(
            compute(&before, &after),
            Err(CompareError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_clouds_give_empty_delta() {
        let delta = compute(&PointCloud::default(), &PointCloud::default()).unwrap();
        assert!(delta.is_empty());
        assert_eq!(delta.max(), 0.0);
        assert!(matches!(delta.summarize(), Err(CompareError::EmptyInput)));
    }
}
