//! cloudshift-sample - Seeded sample clouds for trying out comparisons
//!
//! Produces a "before" cloud uniform in a cube and an "after" cloud that is
//! the same points moved by Gaussian jitter plus an optional rigid drift.
//! The same [`SampleConfig`] always yields the same clouds.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors for invalid sample parameters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SampleError {
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },
}

/// Result type alias for sample generation
pub type SampleResult<T> = Result<T, SampleError>;

/// Sample generation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleConfig {
    /// Number of point pairs
    pub points: usize,
    /// Edge length of the cube holding the "before" points
    pub extent: f64,
    /// Standard deviation of the per-axis jitter
    pub noise: f64,
    /// Displacement applied to every point
    pub drift: [f64; 3],
    /// Random seed
    pub seed: u64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            points: 100,
            extent: 10.0,
            noise: 0.5,
            drift: [0.0; 3],
            seed: 42,
        }
    }
}

impl SampleConfig {
    /// Check that every parameter is usable
    pub fn validate(&self) -> SampleResult<()> {
        if !self.extent.is_finite() || self.extent < 0.0 {
            return Err(invalid("extent", "must be finite and non-negative"));
        }
        if !self.noise.is_finite() || self.noise < 0.0 {
            return Err(invalid("noise", "must be finite and non-negative"));
        }
        if self.drift.iter().any(|d| !d.is_finite()) {
            return Err(invalid("drift", "components must be finite"));
        }
        Ok(())
    }
}

fn invalid(name: &str, reason: &str) -> SampleError {
    SampleError::InvalidParameter {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

/// Paired clouds; `after[i]` is `before[i]` moved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleClouds {
    pub before: Vec<[f64; 3]>,
    pub after: Vec<[f64; 3]>,
}

impl SampleClouds {
    /// Number of point pairs
    pub fn len(&self) -> usize {
        self.before.len()
    }

    /// Check if there are no points
    pub fn is_empty(&self) -> bool {
        self.before.is_empty()
    }
}

/// Generate paired clouds
pub fn generate(config: &SampleConfig) -> SampleResult<SampleClouds> {
    config.validate()?;

    let mut rng = SplitMix64::new(config.seed);
    let mut before = Vec::with_capacity(config.points);
    let mut after = Vec::with_capacity(config.points);

    for _ in 0..config.points {
        let p = [
            rng.next_f64() * config.extent,
            rng.next_f64() * config.extent,
            rng.next_f64() * config.extent,
        ];
        let (gx, gy) = rng.next_gaussian_pair();
        let (gz, _) = rng.next_gaussian_pair();
        let jitter = [gx, gy, gz];

        let mut moved = p;
        for axis in 0..3 {
            moved[axis] += jitter[axis] * config.noise + config.drift[axis];
        }

        before.push(p);
        after.push(moved);
    }

    debug!(
        points = config.points,
        seed = config.seed,
        noise = config.noise,
        "Generated sample clouds"
    );

    Ok(SampleClouds { before, after })
}

/// SplitMix64 generator: a Weyl sequence passed through a 64-bit finalizer
#[derive(Debug, Clone)]
pub struct SplitMix64 {
    state: u64,
}

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        let z = self.state;
        let z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        let z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform value in `[0, 1)` from the top 53 bits
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Two independent standard normal values (Box-Muller)
    pub fn next_gaussian_pair(&mut self) -> (f64, f64) {
        // 1 - u lies in (0, 1], keeping the logarithm finite
        let radius = (-2.0 * (1.0 - self.next_f64()).ln()).sqrt();
        let angle = std::f64::consts::TAU * self.next_f64();
        let (sin, cos) = angle.sin_cos();
        (radius * cos, radius * sin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reproducibility() {
        let config = SampleConfig {
            seed: 12345,
            ..SampleConfig::default()
        };
        assert_eq!(generate(&config).unwrap(), generate(&config).unwrap());
    }

    #[test]
    fn test_seed_changes_output() {
        let a = generate(&SampleConfig::default()).unwrap();
        let b = generate(&SampleConfig {
            seed: 7,
            ..SampleConfig::default()
        })
        .unwrap();
        assert_ne!(a.before, b.before);
    }

    #[test]
    fn test_zero_points() {
        let clouds = generate(&SampleConfig {
            points: 0,
            ..SampleConfig::default()
        })
        .unwrap();
        assert!(clouds.is_empty());
        assert!(clouds.after.is_empty());
    }

    #[test]
    fn test_pure_drift() {
        let config = SampleConfig {
            points: 10,
            noise: 0.0,
            drift: [1.0, -2.0, 0.5],
            ..SampleConfig::default()
        };
        let clouds = generate(&config).unwrap();
        for (b, a) in clouds.before.iter().zip(&clouds.after) {
            assert!((a[0] - b[0] - 1.0).abs() < 1e-12);
            assert!((a[1] - b[1] + 2.0).abs() < 1e-12);
            assert!((a[2] - b[2] - 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_rejects_negative_noise() {
        let config = SampleConfig {
            noise: -1.0,
            ..SampleConfig::default()
        };
        assert!(matches!(
            generate(&config),
            Err(SampleError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_uniform_range() {
        let mut rng = SplitMix64::new(3);
        for _ in 0..10_000 {
            let u = rng.next_f64();
            assert!((0.0..1.0).contains(&u));
        }
        assert_ne!(SplitMix64::new(3).next_u64(), SplitMix64::new(4).next_u64());
    }

    #[test]
    fn test_gaussian_moments() {
        let mut rng = SplitMix64::new(99);
        let n = 20_000;
        let values: Vec<f64> = (0..n / 2)
            .flat_map(|_| {
                let (a, b) = rng.next_gaussian_pair();
                [a, b]
            })
            .collect();
        let mean = values.iter().sum::<f64>() / n as f64;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
        assert!(mean.abs() < 0.05, "mean {mean}");
        assert!((var - 1.0).abs() < 0.1, "variance {var}");
    }

    proptest! {
        #[test]
        fn before_stays_in_cube(seed in any::<u64>(), extent in 0.0f64..100.0) {
            let config = SampleConfig { points: 50, extent, seed, ..SampleConfig::default() };
            let clouds = generate(&config).unwrap();
            prop_assert_eq!(clouds.len(), 50);
            for p in &clouds.before {
                for v in p {
                    prop_assert!(*v >= 0.0 && *v <= extent);
                }
            }
        }
    }
}
