//! Validated dense feature matrix.
//!
//! Points are stored row-major in a single buffer (`n_rows * dim` values), the
//! same flat layout the partitioning code walks with [`FeatureMatrix::row`].
//! A `FeatureMatrix` is always rectangular with at least one row and one
//! column; everything downstream of construction relies on that.

use crate::error::{ClusterError, Result};

/// An `n_rows x dim` matrix of `f64` features.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    data: Vec<f64>,
    n_rows: usize,
    dim: usize,
}

impl FeatureMatrix {
    /// Build from nested rows, checking that the input is non-empty and rectangular.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let first = rows
            .first()
            .ok_or_else(|| ClusterError::invalid("feature matrix has no rows"))?;
        let dim = first.as_ref().len();
        if dim == 0 {
            return Err(ClusterError::invalid("feature rows have no columns"));
        }

        let mut data = Vec::with_capacity(rows.len() * dim);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != dim {
                return Err(ClusterError::invalid(format!(
                    "row {i} has {} values, expected {dim}",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }

        Ok(Self {
            data,
            n_rows: rows.len(),
            dim,
        })
    }

    /// Build from a row-major buffer of `n * dim` values.
    pub fn from_flat(data: Vec<f64>, dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(ClusterError::invalid("dimension must be greater than 0"));
        }
        if data.is_empty() {
            return Err(ClusterError::invalid("feature matrix has no rows"));
        }
        if data.len() % dim != 0 {
            return Err(ClusterError::invalid(format!(
                "buffer of {} values is not a multiple of dimension {dim}",
                data.len()
            )));
        }
        let n_rows = data.len() / dim;
        Ok(Self { data, n_rows, dim })
    }

    /// Number of points (N).
    #[inline]
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of features per point (D).
    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Borrow point `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= n_rows()`.
    #[inline]
    #[must_use]
    pub fn row(&self, idx: usize) -> &[f64] {
        let start = idx * self.dim;
        &self.data[start..start + self.dim]
    }

    /// Iterate over points in input order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.data.chunks_exact(self.dim)
    }

    /// Iterate over the values of column `col` in row order.
    pub fn column(&self, col: usize) -> impl Iterator<Item = f64> + Clone + '_ {
        self.data.iter().skip(col).step_by(self.dim).copied()
    }

    /// Row-major backing buffer.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Copy back out into nested rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(<[f64]>::to_vec).collect()
    }

    /// Position `(row, col)` of the first NaN or infinite value, if any.
    #[must_use]
    pub fn first_non_finite(&self) -> Option<(usize, usize)> {
        self.data
            .iter()
            .position(|v| !v.is_finite())
            .map(|i| (i / self.dim, i % self.dim))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_keeps_row_order() {
        let m = FeatureMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
        assert_eq!(m.n_rows(), 3);
        assert_eq!(m.dim(), 2);
        assert_eq!(m.row(1), &[3.0, 4.0]);
        assert_eq!(m.column(1).collect::<Vec<_>>(), vec![2.0, 4.0, 6.0]);
    }

    #[test]
    fn empty_input_is_rejected() {
        let rows: Vec<Vec<f64>> = Vec::new();
        assert!(matches!(
            FeatureMatrix::from_rows(&rows),
            Err(ClusterError::InvalidInput(_))
        ));
        assert!(matches!(
            FeatureMatrix::from_rows(&[Vec::<f64>::new()]),
            Err(ClusterError::InvalidInput(_))
        ));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = FeatureMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(err.to_string().contains("row 1"), "{err}");
    }

    #[test]
    fn from_flat_checks_shape() {
        assert!(FeatureMatrix::from_flat(vec![1.0; 6], 0).is_err());
        assert!(FeatureMatrix::from_flat(vec![1.0; 5], 2).is_err());
        assert!(FeatureMatrix::from_flat(Vec::new(), 2).is_err());
        let m = FeatureMatrix::from_flat(vec![1.0; 6], 3).unwrap();
        assert_eq!(m.n_rows(), 2);
    }

    #[test]
    fn locates_non_finite_values() {
        let m = FeatureMatrix::from_rows(&[vec![1.0, 2.0], vec![f64::NAN, 4.0]]).unwrap();
        assert_eq!(m.first_non_finite(), Some((1, 0)));
        let ok = FeatureMatrix::from_rows(&[vec![1.0]]).unwrap();
        assert_eq!(ok.first_non_finite(), None);
    }
}
