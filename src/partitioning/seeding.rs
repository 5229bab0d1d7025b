//! k-means++ seeding.
//!
//! The first centroid is a uniformly random point. Each further centroid is
//! drawn with probability proportional to D(x)², the squared distance from x to
//! its nearest already-chosen centroid, which spreads initial centroids out and
//! makes poor local optima less likely.
//!
//! Centroids are always copies of *distinct* input points. Already-chosen points
//! have D² = 0 and are never drawn again; if every remaining point also has
//! D² = 0 (duplicates of chosen points), the draw falls back to uniform among
//! the unchosen points.

use rand::Rng;

use crate::distance::squared_euclidean;
use crate::error::{ClusterError, Result};
use crate::matrix::FeatureMatrix;

/// Pick `k` initial centroids from the rows of `points`.
///
/// Fails with [`ClusterError::InsufficientData`] if `k > points.n_rows()`,
/// and with [`ClusterError::InvalidInput`] if `k == 0`.
pub fn kmeans_plus_plus<R: Rng>(
    points: &FeatureMatrix,
    k: usize,
    rng: &mut R,
) -> Result<Vec<Vec<f64>>> {
    let n = points.n_rows();
    if k == 0 {
        return Err(ClusterError::invalid("k must be a positive integer"));
    }
    if k > n {
        return Err(ClusterError::InsufficientData { k, n });
    }

    let mut chosen = vec![false; n];
    let mut centroids = Vec::with_capacity(k);

    let first = rng.random_range(0..n);
    chosen[first] = true;
    centroids.push(points.row(first).to_vec());

    // D² to the nearest chosen centroid, refreshed incrementally as centroids are added.
    let mut min_dist: Vec<f64> = points
        .rows()
        .map(|p| squared_euclidean(p, &centroids[0]))
        .collect();

    while centroids.len() < k {
        let next = sample_weighted(&min_dist, &chosen, rng)
            .unwrap_or_else(|| sample_uniform_unchosen(&chosen, rng));
        chosen[next] = true;
        let centroid = points.row(next).to_vec();

        for (i, p) in points.rows().enumerate() {
            let d = squared_euclidean(p, &centroid);
            if d < min_dist[i] {
                min_dist[i] = d;
            }
        }
        centroids.push(centroid);
    }

    Ok(centroids)
}

/// Draw an unchosen index with probability proportional to `weights`.
///
/// Returns `None` when the unchosen points carry no (finite, positive) weight.
fn sample_weighted<R: Rng>(weights: &[f64], chosen: &[bool], rng: &mut R) -> Option<usize> {
    let eligible = |i: usize| !chosen[i] && weights[i] > 0.0 && weights[i].is_finite();
    let total: f64 = (0..weights.len())
        .filter(|&i| eligible(i))
        .map(|i| weights[i])
        .sum();
    if !(total > 0.0 && total.is_finite()) {
        return None;
    }

    let threshold = rng.random::<f64>() * total;
    let mut cumulative = 0.0;
    let mut last = None;
    for i in (0..weights.len()).filter(|&i| eligible(i)) {
        cumulative += weights[i];
        last = Some(i);
        if cumulative > threshold {
            return Some(i);
        }
    }
    // Rounding can leave `cumulative` a hair under `threshold`.
    last
}

fn sample_uniform_unchosen<R: Rng>(chosen: &[bool], rng: &mut R) -> usize {
    let remaining: Vec<usize> = (0..chosen.len()).filter(|&i| !chosen[i]).collect();
    remaining[rng.random_range(0..remaining.len())]
}
