//! Displacement and statistics integration tests

mod common;

use cloudshift_core::{compute, CompareError, PointCloud};
use common::fixtures::{cloud, sample_pair};
use proptest::prelude::*;
use rstest::rstest;

// === Concrete scenarios ===

#[rstest]
#[case::single_point(&[[0.0, 0.0, 0.0]], &[[3.0, 4.0, 0.0]], &[5.0])]
#[case::no_movement(
    &[[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]],
    &[[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]],
    &[0.0, 0.0]
)]
#[case::unit_moves(
    &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
    &[[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 1.0]],
    &[1.0, 1.0, 1.0]
)]
fn test_delta_scenarios(
    #[case] before: &[[f64; 3]],
    #[case] after: &[[f64; 3]],
    #[case] expected: &[f64],
) {
    let delta = compute(&cloud(before), &cloud(after)).unwrap();
    assert_eq!(delta.values(), expected);

    let stats = delta.summarize().unwrap();
    let value = expected[0];
    assert_eq!(stats.mean, value);
    assert_eq!(stats.median, value);
    assert_eq!(stats.max, value);
    assert_eq!(stats.min, value);
    assert_eq!(stats.std_dev, 0.0);
}

#[test]
fn test_mismatched_lengths() {
    let before = cloud(&[[0.0; 3], [1.0; 3]]);
    let after = cloud(&[[0.0; 3]]);
    let err = compute(&before, &after).unwrap_err();
    assert!(matches!(
        err,
        CompareError::ShapeMismatch {
            expected: 2,
            actual: 1,
            ..
        }
    ));
}

#[test]
fn test_ragged_columns_rejected() {
    assert!(matches!(
        PointCloud::from_columns(vec![0.0, 1.0], vec![0.0, 1.0], vec![0.0]),
        Err(CompareError::ShapeMismatch { .. })
    ));

    // deserialized clouds skip the constructor check
    let ragged: PointCloud =
        serde_json::from_str(r#"{"x": [0.0, 1.0], "y": [0.0, 1.0], "z": [0.0]}"#).unwrap();
    let after = cloud(&[[0.0; 3], [1.0; 3]]);
    assert!(matches!(
        compute(&ragged, &after),
        Err(CompareError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_empty_summary_is_error() {
    let delta = compute(&PointCloud::default(), &PointCloud::default()).unwrap();
    assert!(delta.is_empty());
    assert!(matches!(delta.summarize(), Err(CompareError::EmptyInput)));
}

#[test]
fn test_rerun_is_bit_identical() {
    let (before, after) = sample_pair(200, 7);
    let first = compute(&before, &after).unwrap();
    let second = compute(&before, &after).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.summarize().unwrap(), second.summarize().unwrap());
}

// === Properties ===

fn point() -> impl Strategy<Value = [f64; 3]> {
    prop::array::uniform3(-1.0e6f64..1.0e6)
}

fn paired_clouds() -> impl Strategy<Value = (Vec<[f64; 3]>, Vec<[f64; 3]>)> {
    (1usize..64).prop_flat_map(|n| {
        (
            prop::collection::vec(point(), n),
            prop::collection::vec(point(), n),
        )
    })
}

proptest! {
    #[test]
    fn test_delta_length_matches(pair in paired_clouds()) {
        let (before, after) = pair;
        let delta = compute(&cloud(&before), &cloud(&after)).unwrap();
        prop_assert_eq!(delta.len(), before.len());
    }

    #[test]
    fn test_delta_zero_iff_equal(pair in paired_clouds(), keep in prop::collection::vec(any::<bool>(), 64)) {
        let (before, mut after) = pair;
        // copy some points over so both branches are exercised
        for (i, a) in after.iter_mut().enumerate() {
            if keep[i] {
                *a = before[i];
            }
        }
        let delta = compute(&cloud(&before), &cloud(&after)).unwrap();
        for (i, d) in delta.iter().enumerate() {
            prop_assert!(d >= 0.0);
            prop_assert_eq!(d == 0.0, before[i] == after[i]);
        }
    }

    #[test]
    fn test_stats_within_bounds(pair in paired_clouds()) {
        let (before, after) = pair;
        let stats = compute(&cloud(&before), &cloud(&after)).unwrap().summarize().unwrap();
        prop_assert!(stats.min <= stats.mean && stats.mean <= stats.max);
        prop_assert!(stats.min <= stats.median && stats.median <= stats.max);
        prop_assert!(stats.std_dev >= 0.0);
    }

    #[test]
    fn test_mismatch_never_truncates(n in 1usize..32, extra in 1usize..8) {
        let before = cloud(&vec![[0.0; 3]; n]);
        let after = cloud(&vec![[1.0; 3]; n + extra]);
        let is_mismatch = matches!(
            compute(&before, &after),
            Err(CompareError::ShapeMismatch { .. })
        );
        prop_assert!(is_mismatch);
    }
}
