//! Property-based tests for kluster.
//!
//! These tests verify invariants that should hold regardless of input:
//! - Labels are in range and aligned with input rows
//! - Standardization is idempotent and produces unit-variance columns
//! - Results are a pure function of (input, params)
//! - Inertia agrees with the reported labels and centroids

use kluster::partitioning::inertia;
use kluster::{standardize, FeatureMatrix, KMeans, KMeansParams};
use proptest::prelude::*;

prop_compose! {
    fn arb_rows(max_rows: usize, max_dim: usize)
        (dim in 1..=max_dim, n in 1..=max_rows)
        (rows in prop::collection::vec(prop::collection::vec(-100.0f64..100.0, dim), n))
        -> Vec<Vec<f64>>
    {
        rows
    }
}

prop_compose! {
    fn arb_rows_and_k(max_rows: usize, max_dim: usize)
        (rows in arb_rows(max_rows, max_dim))
        (k in 1..=rows.len(), rows in Just(rows))
        -> (Vec<Vec<f64>>, usize)
    {
        (rows, k)
    }
}

mod clustering_props {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn labels_in_range_and_aligned((rows, k) in arb_rows_and_k(40, 5), seed in any::<u64>()) {
            let params = KMeansParams::with_k(k).with_seed(seed).with_restarts(3);
            let result = KMeans::new(params).fit_rows(&rows).unwrap();

            prop_assert_eq!(result.labels.len(), rows.len());
            prop_assert!(result.labels.iter().all(|&l| l < k));
            prop_assert_eq!(result.centroids.len(), k);
            prop_assert!(result.centroids.iter().all(|c| c.len() == rows[0].len()));
            prop_assert_eq!(result.cluster_sizes().iter().sum::<usize>(), rows.len());
        }

        #[test]
        fn fit_is_deterministic_given_seed((rows, k) in arb_rows_and_k(30, 4), seed in any::<u64>()) {
            let km = KMeans::new(KMeansParams::with_k(k).with_seed(seed).with_restarts(4));
            let a = km.fit_rows(&rows).unwrap();
            let b = km.fit_rows(&rows).unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn reported_inertia_matches_labels((rows, k) in arb_rows_and_k(30, 4)) {
            let result = KMeans::with_k(k).fit_rows(&rows).unwrap();
            let (scaled, _) = standardize(&FeatureMatrix::from_rows(&rows).unwrap());
            let recomputed = inertia(&scaled, &result.labels, &result.centroids);
            prop_assert!(
                (recomputed - result.inertia).abs() <= 1e-9 * (1.0 + result.inertia),
                "reported {} vs recomputed {}",
                result.inertia, recomputed
            );
            prop_assert!(result.inertia >= 0.0);
        }

        #[test]
        fn every_point_is_assigned_to_its_nearest_centroid_when_converged(
            (rows, k) in arb_rows_and_k(30, 3),
        ) {
            let result = KMeans::with_k(k).fit_rows(&rows).unwrap();
            prop_assume!(result.converged);
            // Labels come from the final assignment pass, so they are exact nearest centroids.
            let (scaled, _) = standardize(&FeatureMatrix::from_rows(&rows).unwrap());
            for (p, &l) in scaled.rows().zip(&result.labels) {
                let (nearest, _) = kluster::distance::nearest(p, &result.centroids);
                prop_assert_eq!(nearest, l);
            }
        }

        #[test]
        fn k_equal_n_has_zero_inertia(rows in arb_rows(12, 3)) {
            // Distinct rows only: duplicates legitimately share a cluster.
            let mut unique = rows.clone();
            unique.sort_by(|a, b| a.partial_cmp(b).unwrap());
            unique.dedup();
            prop_assume!(unique.len() == rows.len());

            let result = KMeans::with_k(rows.len()).fit_rows(&rows).unwrap();
            prop_assert!(result.inertia.abs() < 1e-12);
        }
    }
}

mod standardization_props {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn columns_are_centered_and_unit_or_zero(rows in arb_rows(50, 6)) {
            let m = FeatureMatrix::from_rows(&rows).unwrap();
            let (z, scaler) = standardize(&m);
            let n = z.n_rows() as f64;
            for c in 0..z.dim() {
                let mean = z.column(c).sum::<f64>() / n;
                let var = z.column(c).map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
                prop_assert!(mean.abs() < 1e-9, "column {} mean {}", c, mean);
                if scaler.stats()[c].is_degenerate() {
                    prop_assert!(z.column(c).all(|v| v == 0.0));
                } else {
                    prop_assert!((var - 1.0).abs() < 1e-9, "column {} variance {}", c, var);
                }
            }
        }

        #[test]
        fn standardizing_twice_changes_nothing(rows in arb_rows(50, 6)) {
            let m = FeatureMatrix::from_rows(&rows).unwrap();
            let (once, _) = standardize(&m);
            let (twice, _) = standardize(&once);
            for (a, b) in once.as_slice().iter().zip(twice.as_slice()) {
                prop_assert!((a - b).abs() < 1e-9, "{} vs {}", a, b);
            }
        }

        #[test]
        fn inverse_transform_round_trips(rows in arb_rows(30, 4)) {
            let m = FeatureMatrix::from_rows(&rows).unwrap();
            let (z, scaler) = standardize(&m);
            let back = scaler.inverse_transform(&z.to_rows()).unwrap();
            for (orig, rec) in rows.iter().zip(&back) {
                for (a, b) in orig.iter().zip(rec) {
                    prop_assert!((a - b).abs() < 1e-9 * (1.0 + a.abs()), "{} vs {}", a, b);
                }
            }
        }
    }
}
