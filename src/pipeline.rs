//! End-to-end clustering: validate, standardize, pick the best restart.
//!
//! ```rust
//! use kluster::{cluster, KMeans, KMeansParams};
//!
//! # fn main() -> kluster::Result<()> {
//! let rows = vec![
//!     vec![0.0, 0.0],
//!     vec![0.0, 1.0],
//!     vec![10.0, 10.0],
//!     vec![10.0, 11.0],
//! ];
//!
//! // Default parameters (10 restarts, seed 42).
//! let result = cluster(&rows, 2)?;
//! assert_eq!(result.labels[0], result.labels[1]);
//! assert_ne!(result.labels[0], result.labels[2]);
//!
//! // Or configure explicitly.
//! let result = KMeans::new(KMeansParams::with_k(2).with_seed(7)).fit_rows(&rows)?;
//! assert_eq!(result.centroids.len(), 2);
//! # Ok(())
//! # }
//! ```

use serde::Serialize;
use tracing::debug;

use crate::distance::nearest;
use crate::error::{ClusterError, Result};
use crate::matrix::FeatureMatrix;
use crate::params::KMeansParams;
use crate::partitioning::{best_of_restarts, RestartPlan};
use crate::standardize::{standardize, ColumnStats, Standardizer};

/// Outcome of one clustering request.
///
/// Centroids live in standardized feature space; use
/// [`ClusteringResult::centers_original_scale`] to map them back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusteringResult {
    /// Cluster index in `0..k` for each input row, in input order.
    pub labels: Vec<usize>,
    /// `k` centroids, each with one value per feature.
    pub centroids: Vec<Vec<f64>>,
    /// Sum of squared distances from each point to its centroid.
    pub inertia: f64,
    /// False when the winning run hit `max_iterations`. Still a usable result.
    pub converged: bool,
    pub n_iter: usize,
    /// Which restart produced this result.
    pub restart: usize,
    #[serde(skip)]
    scaler: Standardizer,
}

impl ClusteringResult {
    #[must_use]
    pub fn k(&self) -> usize {
        self.centroids.len()
    }

    /// Per-column mean/std used to standardize the input.
    #[must_use]
    pub fn column_stats(&self) -> &[ColumnStats] {
        self.scaler.stats()
    }

    /// Number of points in each cluster.
    #[must_use]
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.k()];
        for &l in &self.labels {
            sizes[l] += 1;
        }
        sizes
    }

    /// Centroids mapped back to the original feature scale.
    pub fn centers_original_scale(&self) -> Result<Vec<Vec<f64>>> {
        self.scaler.inverse_transform(&self.centroids)
    }

    /// Label new rows (in original scale) against the fitted centroids.
    pub fn predict<R: AsRef<[f64]>>(&self, rows: &[R]) -> Result<Vec<usize>> {
        let matrix = FeatureMatrix::from_rows(rows)?;
        let scaled = self.scaler.transform(&matrix)?;
        if let Some((row, col)) = scaled.first_non_finite() {
            return Err(ClusterError::unstable(
                "standardization",
                format!("row {row}, column {col} is not finite"),
            ));
        }
        Ok(scaled
            .rows()
            .map(|p| nearest(p, &self.centroids).0)
            .collect())
    }
}

/// Standardize-then-cluster pipeline.
#[derive(Debug, Clone, Default)]
pub struct KMeans {
    params: KMeansParams,
}

impl KMeans {
    #[must_use]
    pub fn new(params: KMeansParams) -> Self {
        Self { params }
    }

    /// Default parameters with `k` clusters.
    #[must_use]
    pub fn with_k(k: usize) -> Self {
        Self::new(KMeansParams::with_k(k))
    }

    #[must_use]
    pub fn params(&self) -> &KMeansParams {
        &self.params
    }

    /// Validate raw rows, then [`fit`](Self::fit).
    pub fn fit_rows<R: AsRef<[f64]>>(&self, rows: &[R]) -> Result<ClusteringResult> {
        let matrix = FeatureMatrix::from_rows(rows)?;
        self.fit(&matrix)
    }

    /// Cluster `matrix` into `params.k` groups.
    ///
    /// # Errors
    ///
    /// - [`ClusterError::InvalidInput`] for invalid parameters
    /// - [`ClusterError::InsufficientData`] if `k` exceeds the number of rows
    /// - [`ClusterError::NumericInstability`] if standardization or distances
    ///   produce NaN/infinity
    pub fn fit(&self, matrix: &FeatureMatrix) -> Result<ClusteringResult> {
        let params = &self.params;
        params.validate()?;
        let n = matrix.n_rows();
        if params.k > n {
            return Err(ClusterError::InsufficientData { k: params.k, n });
        }
        debug!(
            n,
            dim = matrix.dim(),
            k = params.k,
            n_init = params.n_init,
            seed = params.seed,
            "clustering request"
        );

        let (scaled, scaler) = standardize(matrix);
        if let Some((col, stats)) = scaler.first_non_finite() {
            return Err(ClusterError::unstable(
                "standardization",
                format!("column {col} has mean {} and std {}", stats.mean, stats.std),
            ));
        }
        if let Some((row, col)) = scaled.first_non_finite() {
            return Err(ClusterError::unstable(
                "standardization",
                format!("row {row}, column {col} is not finite after scaling"),
            ));
        }
        let degenerate = scaler.stats().iter().filter(|s| s.is_degenerate()).count();
        if degenerate > 0 {
            debug!(degenerate, "constant columns standardized to zero");
        }

        let plan = RestartPlan {
            k: params.k,
            n_init: params.n_init,
            max_iterations: params.max_iterations,
            tolerance: params.tolerance,
            seed: params.seed,
        };
        let best = best_of_restarts(&scaled, &plan)?;

        Ok(ClusteringResult {
            labels: best.outcome.labels,
            centroids: best.outcome.centroids,
            inertia: best.outcome.inertia,
            converged: best.outcome.converged,
            n_iter: best.outcome.n_iter,
            restart: best.restart,
            scaler,
        })
    }
}

/// Cluster `rows` into `k` groups with default parameters.
pub fn cluster<R: AsRef<[f64]>>(rows: &[R], k: usize) -> Result<ClusteringResult> {
    KMeans::with_k(k).fit_rows(rows)
}
