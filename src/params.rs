//! Clustering configuration.

use serde::{Deserialize, Serialize};

use crate::error::{ClusterError, Result};

/// Parameters for one clustering request.
///
/// Defaults match common practice for k-means++ with restarts:
/// 10 restarts, up to 300 Lloyd iterations each, tolerance `1e-4` on total
/// centroid movement, and a fixed seed of 42 so that repeated calls on the
/// same input agree.
///
/// Deserializes from partial JSON; missing fields take their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KMeansParams {
    /// Number of clusters (K). Must be > 0 and <= number of points.
    pub k: usize,
    /// Independent seeding + refinement runs; the lowest-inertia run wins.
    pub n_init: usize,
    /// Lloyd iteration budget per run. Must be > 0.
    pub max_iterations: usize,
    /// Stop once the summed per-centroid shift falls below this. Must be finite and >= 0.
    pub tolerance: f64,
    /// Base seed; per-restart seeds are derived from it.
    pub seed: u64,
}

impl Default for KMeansParams {
    fn default() -> Self {
        Self {
            k: 8,
            n_init: 10,
            max_iterations: 300,
            tolerance: 1e-4,
            seed: 42,
        }
    }
}

impl KMeansParams {
    /// Default parameters with `k` clusters.
    #[must_use]
    pub fn with_k(k: usize) -> Self {
        Self {
            k,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_restarts(mut self, n_init: usize) -> Self {
        self.n_init = n_init;
        self
    }

    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Configure a deterministic base seed.
    ///
    /// Repeated runs with the same seed and input produce identical results.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check parameters that do not depend on the data.
    ///
    /// `k <= n` is checked separately against the matrix, since violating it is
    /// an [`ClusterError::InsufficientData`] rather than an invalid input.
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(ClusterError::invalid("k must be a positive integer"));
        }
        if self.n_init == 0 {
            return Err(ClusterError::invalid("n_init must be greater than 0"));
        }
        if self.max_iterations == 0 {
            return Err(ClusterError::invalid("max_iterations must be greater than 0"));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ClusterError::invalid(format!(
                "tolerance must be finite and non-negative, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(KMeansParams::default().validate().is_ok());
        assert!(KMeansParams::with_k(1).validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(KMeansParams::with_k(0).validate().is_err());
        assert!(KMeansParams::with_k(2).with_restarts(0).validate().is_err());
        assert!(KMeansParams::with_k(2).with_max_iterations(0).validate().is_err());
        assert!(KMeansParams::with_k(2).with_tolerance(-1.0).validate().is_err());
        assert!(KMeansParams::with_k(2).with_tolerance(f64::NAN).validate().is_err());
    }

    #[test]
    fn zero_tolerance_is_allowed() {
        assert!(KMeansParams::with_k(2).with_tolerance(0.0).validate().is_ok());
    }

    #[test]
    fn deserializes_partial_json_with_defaults() {
        let params: KMeansParams = serde_json::from_str(r#"{"k": 3, "seed": 7}"#).unwrap();
        assert_eq!(params, KMeansParams::with_k(3).with_seed(7));
    }
}
