//! Property tests over arbitrary integer sequences

use proptest::prelude::*;
use sortbench::{
    Algorithm, FixedProbe, MetricsCalculator, Sorter, is_sorted, merge_sort, parallel_efficiency,
    quicksort, stability_score, untrack,
};
use std::time::Duration;

fn sequences() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-500i64..500, 0..600)
}

fn sorted_copy(values: &[i64]) -> Vec<i64> {
    let mut expected = values.to_vec();
    expected.sort_unstable();
    expected
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn sequential_kernels_sort_permutations(values in sequences()) {
        let expected = sorted_copy(&values);

        let merged = merge_sort(&values);
        prop_assert_eq!(&merged, &expected);

        let mut quick = values.clone();
        quicksort(&mut quick);
        prop_assert_eq!(&quick, &expected);
        prop_assert!(is_sorted(&quick));
    }

    #[test]
    fn parallel_merge_sort_matches_sequential(
        values in prop::collection::vec(any::<i64>(), 65..800),
        workers in prop::sample::select(vec![1usize, 2, 3, 5, 8]),
    ) {
        let sorter = Sorter::new(workers).unwrap().with_threshold(64);
        let parallel = sorter.sort(Algorithm::ParallelMergeSort, values.clone()).unwrap();
        prop_assert_eq!(parallel.sorted, merge_sort(&values));
    }

    #[test]
    fn parallel_quicksort_matches_sequential(
        values in prop::collection::vec(-50i64..50, 65..800),
        workers in prop::sample::select(vec![1usize, 2, 3, 5, 8]),
    ) {
        let sorter = Sorter::new(workers).unwrap().with_threshold(64);
        let parallel = sorter.sort(Algorithm::ParallelQuickSort, values.clone()).unwrap();
        let mut sequential = values;
        quicksort(&mut sequential);
        prop_assert_eq!(parallel.sorted, sequential);
    }

    #[test]
    fn sorting_sorted_input_is_identity(values in sequences()) {
        let sorted = sorted_copy(&values);
        let sorter = Sorter::new(3).unwrap().with_threshold(32);
        for algo in Algorithm::ALL {
            let result = sorter.sort(algo, sorted.clone()).unwrap();
            prop_assert_eq!(&result.sorted, &sorted);
        }
    }

    #[test]
    fn merge_variants_are_fully_stable(values in prop::collection::vec(0i64..20, 0..400)) {
        let sorter = Sorter::new(4).unwrap().with_threshold(16);
        for algo in [Algorithm::MergeSort, Algorithm::ParallelMergeSort] {
            let result = sorter.sort_tracked(algo, &values).unwrap();
            let (_, permutation) = untrack(&result.sorted);
            prop_assert_eq!(stability_score(&values, &permutation).unwrap(), 1.0);
        }
    }

    #[test]
    fn metrics_are_in_range(values in sequences()) {
        let calculator = MetricsCalculator::new(FixedProbe {
            memory_mb: Some(1.0),
            cpu_percent: Some(1.0),
            cores: 2,
        });
        let sorter = Sorter::new(2).unwrap().with_threshold(32);
        for algo in Algorithm::ALL {
            let result = sorter.sort_tracked(algo, &values).unwrap();
            let record = calculator.compute(&values, &result, algo).unwrap();
            prop_assert!(record.is_sorted);
            prop_assert!((0.0..=1.0).contains(&record.stability_score));
            if let Some(p) = record.parallel {
                prop_assert!((0.0..=1.0).contains(&p.parallel_efficiency));
            }
        }
    }

    #[test]
    fn efficiency_is_capped(
        nanos in 0u64..5_000_000_000,
        size in 0usize..10_000_000,
        workers in 0usize..64,
    ) {
        let eff = parallel_efficiency(Duration::from_nanos(nanos), size, workers);
        prop_assert!((0.0..=1.0).contains(&eff));
    }
}
