use approx::assert_relative_eq;
use blocked_reduce::{
    leaf_fold, leaf_ranges, reduce, reduce_prefix, reduce_with, IndexRange, PartialResult,
    ReduceConfig, ReduceError, Schedule,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn make_random(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

fn pr(value: f64, begin: usize, end: usize) -> PartialResult {
    PartialResult::from_parts(value, IndexRange::new(begin, end).unwrap())
}

#[test]
fn test_single_leaf_constant_array() {
    let data = vec![0.5f64; 1000];
    assert_eq!(reduce(&data, 1000).unwrap(), 500.0);
    assert_eq!(reduce(&data, 4096).unwrap(), 500.0);
}

#[test]
fn test_single_leaf_matches_left_to_right_sum() {
    let data = vec![0.1f64; 1000];
    let mut expected = 0.0f64;
    for &x in &data {
        expected += x;
    }
    assert_eq!(reduce(&data, data.len()).unwrap().to_bits(), expected.to_bits());
}

#[test]
fn test_empty_input_for_any_grain() {
    let empty: Vec<f64> = Vec::new();
    for grain in [1, 2, 7, 1 << 20] {
        assert_eq!(reduce(&empty, grain).unwrap(), 0.0);
    }
    let data = make_random(10, 1);
    assert_eq!(reduce_prefix(&data, 0, 3).unwrap(), 0.0);
}

#[test]
fn test_split_leaves_cover_range_exactly_once() {
    for n in [0usize, 1, 2, 3, 17, 64, 100, 1023] {
        for grain in [1usize, 2, 3, 5, 16, 2000] {
            let leaves = leaf_ranges(&IndexRange::with_len(n), grain).unwrap();
            let mut covered = vec![0u8; n];
            for leaf in &leaves {
                assert!(leaf.len() <= grain);
                for i in leaf.begin()..leaf.end() {
                    covered[i] += 1;
                }
            }
            assert!(
                covered.iter().all(|&c| c == 1),
                "n={n} grain={grain} leaves={leaves:?}"
            );
        }
    }
}

#[test]
fn test_join_association_contiguous() {
    let a = pr(10.0, 0, 4);
    let b = pr(3.0, 4, 6);
    let c = pr(5.0, 6, 9);

    // (10 / 2^2 + 3) / 2^3 + 5
    let left_first = a.join(&b).join(&c);
    assert_eq!(left_first.value(), 5.6875);

    // 10 / 2^5 + (3 / 2^3 + 5)
    let right_first = a.join(&b.join(&c));
    assert_eq!(right_first.value(), 5.6875);

    // Adjacent ranges: every element ends up halved once per element to its
    // right, whichever way the joins are grouped.
    assert_eq!(left_first.observed(), right_first.observed());
}

#[test]
fn test_join_association_with_gap() {
    let a = pr(10.0, 0, 4);
    let b = pr(3.0, 4, 6);
    let c = pr(5.0, 7, 9);

    // (10 / 2^2 + 3) / 2^2 + 5
    let left_first = a.join(&b).join(&c);
    assert_eq!(left_first.value(), 6.375);

    // B join C observes the hull [4,9), so A is halved five times
    let right_first = a.join(&b.join(&c));
    assert_eq!(right_first.value(), 6.0625);

    assert_ne!(left_first.value(), right_first.value());
}

#[test]
fn test_join_order_matters() {
    let a = pr(10.0, 0, 4);
    let b = pr(3.0, 4, 6);
    let c = pr(5.0, 6, 9);
    // C join (B join A) = C / 2^6 + (B / 2^4 + A)
    let reversed = c.join(&b.join(&a));
    assert_eq!(reversed.value(), 5.0 / 64.0 + (3.0 / 16.0 + 10.0));
    assert_ne!(reversed.value(), a.join(&b).join(&c).value());
}

#[test]
fn test_overlap_detected_and_join_proceeds() {
    let left = pr(4.0, 0, 5);
    let right = pr(1.0, 3, 8);

    let outcome = left.join_checked(&right);
    let overlap = outcome.overlap.expect("overlap should be reported");
    assert_eq!(overlap.left, IndexRange::new(0, 5).unwrap());
    assert_eq!(overlap.right, IndexRange::new(3, 8).unwrap());

    // 4 / 2^5 + 1
    assert_eq!(outcome.result.value(), 1.125);
    assert_eq!(outcome.result.observed(), Some(IndexRange::new(0, 8).unwrap()));

    // The logging variant gives the same value
    assert_eq!(left.join(&right), outcome.result);
}

#[test]
fn test_reduction_never_overlaps() {
    let data = make_random(777, 2);
    let outcome = reduce_with(
        &data,
        &ReduceConfig::new(3).with_schedule(Schedule::Sequential),
    )
    .unwrap();
    assert_eq!(outcome.report.overlaps, 0);
    assert_eq!(outcome.report.joins + 1, outcome.report.leaves);
}

#[cfg(feature = "parallel")]
#[test]
fn test_schedule_does_not_change_result() {
    let data = make_random(10_000, 3);
    for grain in [1usize, 3, 64, 10_000] {
        let sequential = reduce_with(
            &data,
            &ReduceConfig::new(grain).with_schedule(Schedule::Sequential),
        )
        .unwrap();
        for schedule in [
            Schedule::Parallel,
            Schedule::Pool { threads: 1 },
            Schedule::Pool { threads: 4 },
        ] {
            let other = reduce_with(&data, &ReduceConfig::new(grain).with_schedule(schedule))
                .unwrap();
            assert_eq!(
                sequential.value.to_bits(),
                other.value.to_bits(),
                "grain={grain} schedule={schedule:?}"
            );
            assert_eq!(sequential.report, other.report);
        }
    }
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_runs_are_repeatable() {
    let data = make_random(50_000, 4);
    let first = reduce(&data, 7).unwrap();
    for _ in 0..5 {
        assert_eq!(reduce(&data, 7).unwrap().to_bits(), first.to_bits());
    }
}

#[test]
fn test_grain_changes_result() {
    let data = vec![1.0f64; 8];
    assert_eq!(reduce(&data, 8).unwrap(), 8.0);
    assert_eq!(reduce(&data, 4).unwrap(), 4.25);
    // Single-element leaves: sum of 2^-k for k = 0..8
    assert_eq!(reduce(&data, 1).unwrap(), 2.0 - 1.0 / 128.0);
}

#[test]
fn test_matches_left_deep_fold() {
    for (n, seed) in [(1usize, 5u64), (31, 6), (1000, 7), (4097, 8)] {
        let data = make_random(n, seed);
        for grain in [1usize, 2, 9, 100] {
            let tree = reduce(&data, grain).unwrap();
            let chain = leaf_fold(&data, grain).unwrap();
            assert_relative_eq!(tree, chain, epsilon = 1e-12, max_relative = 1e-12);
        }
    }
}

#[test]
fn test_f32_input() {
    let data = vec![1.0f32; 8];
    assert_eq!(reduce(&data, 4).unwrap(), 4.25);
}

#[test]
fn test_non_finite_values_propagate() {
    let mut data = vec![1.0f64; 16];
    data[3] = f64::NAN;
    assert!(reduce(&data, 2).unwrap().is_nan());

    let mut data = vec![1.0f64; 16];
    data[12] = f64::INFINITY;
    assert_eq!(reduce(&data, 2).unwrap(), f64::INFINITY);
}

#[test]
fn test_errors() {
    let data = make_random(4, 9);
    assert!(matches!(reduce(&data, 0), Err(ReduceError::ZeroGrain)));
    assert!(matches!(
        reduce_prefix(&data, 10, 1),
        Err(ReduceError::LengthExceedsData { n: 10, len: 4 })
    ));
    assert!(matches!(
        IndexRange::new(3, 1),
        Err(ReduceError::InvalidRange { begin: 3, end: 1 })
    ));
}
