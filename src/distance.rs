//! Distance helpers for dense `f64` points.
//!
//! Clustering compares distances far more often than it reports them, so the
//! workhorse here is [`squared_euclidean`]: it preserves ordering and skips the
//! square root. [`euclidean`] is only used where an actual length is needed
//! (centroid shift during convergence checks).

/// Squared Euclidean (L2²) distance.
///
/// If dimensions mismatch, this returns `f64::INFINITY` (so it is never selected as a
/// nearest centroid).
#[inline]
#[must_use]
pub fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return f64::INFINITY;
    }
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Euclidean (L2) distance.
#[inline]
#[must_use]
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    squared_euclidean(a, b).sqrt()
}

/// Index of, and squared distance to, the centroid closest to `point`.
///
/// Ties go to the lowest centroid index. Returns `(0, f64::INFINITY)` when
/// `centroids` is empty.
#[inline]
#[must_use]
pub fn nearest<C: AsRef<[f64]>>(point: &[f64], centroids: &[C]) -> (usize, f64) {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (idx, centroid) in centroids.iter().enumerate() {
        let dist = squared_euclidean(point, centroid.as_ref());
        if dist < best_dist {
            best_dist = dist;
            best = idx;
        }
    }
    (best, best_dist)
}
