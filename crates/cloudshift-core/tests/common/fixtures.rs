//! Shared point cloud fixtures

use cloudshift_core::backend::{RecordingSurface, Scene};
use cloudshift_core::{ComparisonReport, PointCloud, RenderedFigure};
use cloudshift_sample::{generate, SampleConfig};

/// Build a cloud from literal points
pub fn cloud(points: &[[f64; 3]]) -> PointCloud {
    points.iter().copied().collect()
}

/// Seeded before/after pair with jitter and drift
#[allow(dead_code)]
pub fn sample_pair(points: usize, seed: u64) -> (PointCloud, PointCloud) {
    let samples = generate(&SampleConfig {
        points,
        seed,
        drift: [0.5, 0.0, -0.25],
        ..SampleConfig::default()
    })
    .unwrap_or_else(|e| panic!("Failed to generate samples: {e}"));
    (
        samples.before.into_iter().collect(),
        samples.after.into_iter().collect(),
    )
}

/// Run a default comparison into a recording surface, capturing the report
#[allow(dead_code)]
pub fn record(before: &PointCloud, after: &PointCloud) -> (RenderedFigure<Scene>, String) {
    let runner = ComparisonReport::with_defaults().unwrap();
    let mut surface = RecordingSurface::new();
    let mut out = Vec::new();
    let figure = runner
        .run_with_writer(before, after, &mut surface, &mut out)
        .unwrap();
    (figure, String::from_utf8(out).unwrap())
}
