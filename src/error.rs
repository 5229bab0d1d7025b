//! Error types for kluster.

use thiserror::Error;

/// Errors that can occur while validating input or clustering it.
///
/// Failing to converge within the iteration budget is *not* an error: the
/// result is still returned with `converged == false`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClusterError {
    /// Malformed feature matrix (empty, ragged) or invalid parameter (e.g. `k == 0`).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// More clusters requested than there are points.
    #[error("insufficient data: k ({k}) exceeds number of points ({n})")]
    InsufficientData { k: usize, n: usize },

    /// NaN or infinity appeared in statistics, standardized values, or distances.
    #[error("numeric instability during {stage}: {detail}")]
    NumericInstability { stage: &'static str, detail: String },
}

impl ClusterError {
    /// Stable, machine-readable reason code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ClusterError::InvalidInput(_) => "invalid_input",
            ClusterError::InsufficientData { .. } => "insufficient_data",
            ClusterError::NumericInstability { .. } => "numeric_instability",
        }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        ClusterError::InvalidInput(msg.into())
    }

    pub(crate) fn unstable(stage: &'static str, detail: impl Into<String>) -> Self {
        ClusterError::NumericInstability {
            stage,
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClusterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let errs = [
            ClusterError::invalid("x"),
            ClusterError::InsufficientData { k: 3, n: 2 },
            ClusterError::unstable("standardize", "column 0 mean is NaN"),
        ];
        let codes: std::collections::HashSet<_> = errs.iter().map(ClusterError::code).collect();
        assert_eq!(codes.len(), 3);
    }

    #[test]
    fn insufficient_data_message_names_both_counts() {
        let msg = ClusterError::InsufficientData { k: 5, n: 2 }.to_string();
        assert!(msg.contains('5') && msg.contains('2'), "{msg}");
    }
}
