//! Per-feature z-score standardization.
//!
//! Each column is shifted to zero mean and scaled to unit variance using
//! statistics computed from the matrix itself:
//!
//! ```text
//! z = (x - mean_c) / std_c
//! ```
//!
//! `std_c` is the **population** standard deviation (divide by N, not N - 1).
//! A column whose values are all equal has `std_c = 0`; every value in it maps
//! to `0.0` instead of dividing by zero. A column whose variance is no larger
//! than the rounding error of computing it is treated the same way:
//!
//! ```text
//! var <= n * eps * var + (n * mean * eps)^2
//! ```
//!
//! Both sides scale with the square of the column's units, so the test only
//! catches values that differ in their last bits. Genuinely spread columns stay
//! non-degenerate at any magnitude.

use serde::{Deserialize, Serialize};

use crate::error::{ClusterError, Result};
use crate::matrix::FeatureMatrix;

/// Mean and population standard deviation of one feature column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub mean: f64,
    /// `0.0` for degenerate (constant) columns.
    pub std: f64,
}

impl ColumnStats {
    fn from_column(values: impl Iterator<Item = f64> + Clone) -> Self {
        let mut n = 0usize;
        let mut sum = 0.0;
        let mut first = None;
        let mut constant = true;
        for v in values.clone() {
            n += 1;
            sum += v;
            match first {
                None => first = Some(v),
                Some(f) if f != v => constant = false,
                _ => {}
            }
        }
        let mean = sum / n as f64;
        if constant {
            // Exact: keeps `mean` equal to the repeated value.
            return Self {
                mean: first.unwrap_or(mean),
                std: 0.0,
            };
        }

        let var = values.map(|v| (v - mean) * (v - mean)).sum::<f64>() / n as f64;
        Self {
            mean,
            std: if is_rounding_noise(var, mean, n) { 0.0 } else { var.sqrt() },
        }
    }

    /// True when the column carries no spread and standardizes to all zeros.
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.std == 0.0
    }

    #[inline]
    fn scale(&self, v: f64) -> f64 {
        if self.is_degenerate() {
            0.0
        } else {
            (v - self.mean) / self.std
        }
    }

    #[inline]
    fn unscale(&self, z: f64) -> f64 {
        z * self.std + self.mean
    }
}

/// Variance indistinguishable from the accumulated error of a two-pass sum.
///
/// Non-finite variance is never noise; the orchestrator reports it instead.
fn is_rounding_noise(var: f64, mean: f64, n: usize) -> bool {
    if !var.is_finite() {
        return false;
    }
    let n = n as f64;
    let bound = n * f64::EPSILON * var + (n * mean * f64::EPSILON).powi(2);
    var <= bound
}

/// Fitted per-column standardization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standardizer {
    stats: Vec<ColumnStats>,
}

impl Standardizer {
    /// Compute column statistics for `matrix`.
    #[must_use]
    pub fn fit(matrix: &FeatureMatrix) -> Self {
        let stats = (0..matrix.dim())
            .map(|c| ColumnStats::from_column(matrix.column(c)))
            .collect();
        Self { stats }
    }

    /// Rebuild a standardizer from previously computed statistics.
    pub fn from_stats(stats: Vec<ColumnStats>) -> Result<Self> {
        if stats.is_empty() {
            return Err(ClusterError::invalid("standardizer needs at least one column"));
        }
        Ok(Self { stats })
    }

    #[must_use]
    pub fn stats(&self) -> &[ColumnStats] {
        &self.stats
    }

    #[must_use]
    pub fn dim(&self) -> usize {
        self.stats.len()
    }

    /// Standardize `matrix` with the fitted statistics.
    ///
    /// Fails only if `matrix` has a different number of columns.
    pub fn transform(&self, matrix: &FeatureMatrix) -> Result<FeatureMatrix> {
        self.check_dim(matrix.dim())?;
        let mut out = matrix.clone();
        self.scale_in_place(&mut out);
        Ok(out)
    }

    fn scale_in_place(&self, matrix: &mut FeatureMatrix) {
        for row in matrix.as_mut_slice().chunks_exact_mut(self.dim()) {
            for (v, s) in row.iter_mut().zip(&self.stats) {
                *v = s.scale(*v);
            }
        }
    }

    /// Map one standardized point back to the original feature scale.
    ///
    /// Degenerate columns come back as their (constant) mean.
    pub fn inverse_transform_point(&self, point: &[f64]) -> Result<Vec<f64>> {
        self.check_dim(point.len())?;
        Ok(point
            .iter()
            .zip(&self.stats)
            .map(|(&z, s)| s.unscale(z))
            .collect())
    }

    /// Map standardized points (typically cluster centers) back to the original scale.
    pub fn inverse_transform(&self, points: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        points
            .iter()
            .map(|p| self.inverse_transform_point(p))
            .collect()
    }

    /// First column whose statistics are NaN or infinite, if any.
    #[must_use]
    pub fn first_non_finite(&self) -> Option<(usize, ColumnStats)> {
        self.stats
            .iter()
            .enumerate()
            .find(|(_, s)| !(s.mean.is_finite() && s.std.is_finite()))
            .map(|(c, s)| (c, *s))
    }

    fn check_dim(&self, dim: usize) -> Result<()> {
        if dim != self.dim() {
            return Err(ClusterError::invalid(format!(
                "expected {} features, got {dim}",
                self.dim()
            )));
        }
        Ok(())
    }
}

/// Fit a [`Standardizer`] on `matrix` and return it with the standardized copy.
///
/// Never fails: shape was validated when `matrix` was built. Non-finite input
/// propagates into the output and the statistics, where callers can detect it
/// with [`Standardizer::first_non_finite`] and [`FeatureMatrix::first_non_finite`].
#[must_use]
pub fn standardize(matrix: &FeatureMatrix) -> (FeatureMatrix, Standardizer) {
    let scaler = Standardizer::fit(matrix);
    let mut out = matrix.clone();
    scaler.scale_in_place(&mut out);
    (out, scaler)
}
