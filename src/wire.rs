//! JSON payloads exchanged with the calling service.
//!
//! Field names follow the service contract:
//!
//! ```text
//! request:  {"features": [[f64, ...], ...], "k": usize}
//! response: {"cluster_labels": [usize, ...], "cluster_centers": [[f64, ...], ...]}
//! failure:  {"error": "...", "code": "insufficient_data", "details": "..."}
//! ```
//!
//! Reading the request and writing the payload are left to the caller;
//! [`handle_json`] covers the string-to-string step in between.

use serde::{Deserialize, Serialize};

use crate::error::ClusterError;
use crate::params::KMeansParams;
use crate::pipeline::{ClusteringResult, KMeans};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KMeansRequest {
    pub features: Vec<Vec<f64>>,
    pub k: usize,
}

/// Labels and standardized-space centers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KMeansResponse {
    pub cluster_labels: Vec<usize>,
    pub cluster_centers: Vec<Vec<f64>>,
}

impl From<ClusteringResult> for KMeansResponse {
    fn from(result: ClusteringResult) -> Self {
        Self {
            cluster_labels: result.labels,
            cluster_centers: result.centroids,
        }
    }
}

/// Structured failure: reason code plus human-readable message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&ClusterError> for ErrorPayload {
    fn from(err: &ClusterError) -> Self {
        let error = match err {
            ClusterError::InvalidInput(_) => "invalid input",
            ClusterError::InsufficientData { .. } => "k-means clustering failed: data insufficient",
            ClusterError::NumericInstability { .. } => "k-means clustering failed: numeric instability",
        };
        Self {
            error: error.to_string(),
            code: err.code().to_string(),
            details: Some(err.to_string()),
        }
    }
}

impl From<ClusterError> for ErrorPayload {
    fn from(err: ClusterError) -> Self {
        Self::from(&err)
    }
}

/// Run a request with default parameters (seed 42, 10 restarts).
pub fn handle(request: &KMeansRequest) -> Result<KMeansResponse, ErrorPayload> {
    handle_with(request, KMeansParams::default())
}

/// Run a request; `request.k` overrides `params.k`.
pub fn handle_with(
    request: &KMeansRequest,
    params: KMeansParams,
) -> Result<KMeansResponse, ErrorPayload> {
    let params = KMeansParams {
        k: request.k,
        ..params
    };
    KMeans::new(params)
        .fit_rows(&request.features)
        .map(KMeansResponse::from)
        .map_err(ErrorPayload::from)
}

/// Parse a JSON request, cluster it, and render the JSON response or failure.
///
/// Never fails: malformed JSON becomes an `invalid_input` payload.
#[must_use]
pub fn handle_json(input: &str) -> String {
    let rendered = match serde_json::from_str::<KMeansRequest>(input) {
        Ok(request) => match handle(&request) {
            Ok(response) => serde_json::to_string(&response),
            Err(payload) => serde_json::to_string(&payload),
        },
        Err(e) => serde_json::to_string(&ErrorPayload {
            error: "invalid JSON input".to_string(),
            code: "invalid_input".to_string(),
            details: Some(e.to_string()),
        }),
    };
    rendered.unwrap_or_else(|e| {
        serde_json::json!({
            "error": "failed to encode response",
            "code": "numeric_instability",
            "details": e.to_string(),
        })
        .to_string()
    })
}
