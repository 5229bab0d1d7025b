//! Lloyd's algorithm: alternate assignment and mean updates.
//!
//! ```text
//! ASSIGN ──> UPDATE ──> ASSIGN ──> converged? ──yes──> done
//!              ^                       │
//!              └──────────no───────────┘   (until max_iterations)
//! ```
//!
//! A run stops as converged when a reassignment changes no label, or when the
//! summed shift of all centroids during the last update is below `tolerance`.
//! Running out of iterations is a normal outcome reported as `converged: false`.
//!
//! # Empty clusters
//!
//! A cluster that receives no points during ASSIGN keeps its previous centroid
//! unchanged through UPDATE. It may pick up points again on a later pass.

use tracing::{debug, warn};

use crate::distance::{euclidean, nearest, squared_euclidean};
use crate::error::{ClusterError, Result};
use crate::matrix::FeatureMatrix;

/// Final state of one Lloyd run.
#[derive(Debug, Clone, PartialEq)]
pub struct LloydOutcome {
    /// Cluster index per point, in input order.
    pub labels: Vec<usize>,
    pub centroids: Vec<Vec<f64>>,
    /// Sum of squared distances from each point to its assigned centroid.
    pub inertia: f64,
    /// Number of UPDATE steps performed.
    pub n_iter: usize,
    pub converged: bool,
}

/// Refine `centroids` over `points` until convergence or `max_iterations` updates.
pub fn lloyd(
    points: &FeatureMatrix,
    centroids: Vec<Vec<f64>>,
    max_iterations: usize,
    tolerance: f64,
) -> Result<LloydOutcome> {
    if centroids.is_empty() {
        return Err(ClusterError::invalid("at least one initial centroid is required"));
    }
    if let Some(bad) = centroids.iter().position(|c| c.len() != points.dim()) {
        return Err(ClusterError::invalid(format!(
            "centroid {bad} has {} dimensions, points have {}",
            centroids[bad].len(),
            points.dim()
        )));
    }

    let mut centroids = centroids;
    let mut labels = assign(points, &centroids);
    let mut converged = false;
    let mut n_iter = 0;

    while n_iter < max_iterations {
        let (updated, empty) = update(points, &labels, &centroids);
        if empty > 0 {
            warn!(iteration = n_iter, empty_clusters = empty, "keeping stale centroids");
        }
        let shift: f64 = centroids
            .iter()
            .zip(&updated)
            .map(|(old, new)| euclidean(old, new))
            .sum();
        centroids = updated;
        n_iter += 1;

        let next = assign(points, &centroids);
        let changed = labels.iter().zip(&next).filter(|(a, b)| a != b).count();
        labels = next;

        if changed == 0 || shift < tolerance {
            converged = true;
            break;
        }
    }

    let inertia = inertia(points, &labels, &centroids);
    if !inertia.is_finite() {
        return Err(ClusterError::unstable(
            "distance computation",
            format!("inertia is {inertia} after {n_iter} iterations"),
        ));
    }

    if converged {
        debug!(n_iter, inertia, "lloyd converged");
    } else {
        warn!(max_iterations, inertia, "lloyd stopped before converging");
    }

    Ok(LloydOutcome {
        labels,
        centroids,
        inertia,
        n_iter,
        converged,
    })
}

/// Label every point with its nearest centroid (ties to the lowest index).
#[must_use]
pub fn assign(points: &FeatureMatrix, centroids: &[Vec<f64>]) -> Vec<usize> {
    points.rows().map(|p| nearest(p, centroids).0).collect()
}

/// Component-wise mean of each cluster's points.
///
/// Returns the new centroids and how many clusters were empty (and therefore
/// kept their previous centroid).
fn update(
    points: &FeatureMatrix,
    labels: &[usize],
    centroids: &[Vec<f64>],
) -> (Vec<Vec<f64>>, usize) {
    let k = centroids.len();
    let dim = points.dim();
    let mut sums = vec![vec![0.0f64; dim]; k];
    let mut counts = vec![0usize; k];

    for (p, &cluster) in points.rows().zip(labels) {
        counts[cluster] += 1;
        for (s, &v) in sums[cluster].iter_mut().zip(p) {
            *s += v;
        }
    }

    let mut empty = 0;
    let updated: Vec<Vec<f64>> = sums
        .into_iter()
        .zip(&counts)
        .zip(centroids)
        .map(|((sum, &count), old)| {
            if count == 0 {
                empty += 1;
                old.clone()
            } else {
                sum.into_iter().map(|s| s / count as f64).collect()
            }
        })
        .collect();
    (updated, empty)
}

/// Sum of squared distances from each point to its labelled centroid.
#[must_use]
pub fn inertia(points: &FeatureMatrix, labels: &[usize], centroids: &[Vec<f64>]) -> f64 {
    points
        .rows()
        .zip(labels)
        .map(|(p, &c)| squared_euclidean(p, &centroids[c]))
        .sum()
}
