//! kluster: standardized k-means clustering.
//!
//! Groups N points of D numeric features into a fixed number K of clusters:
//!
//! 1. `standardize`: z-score every feature column (population std)
//! 2. `partitioning::seeding`: k-means++ initial centroids
//! 3. `partitioning::lloyd`: assign/update until labels settle
//! 4. `partitioning::restarts`: several seeded runs, lowest inertia wins
//! 5. `pipeline`: validation and packaging of the result
//!
//! ```rust
//! let rows = vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![10.0, 10.0], vec![10.0, 11.0]];
//! let result = kluster::cluster(&rows, 2)?;
//! assert_eq!(result.labels.len(), 4);
//! # Ok::<(), kluster::ClusterError>(())
//! ```
//!
//! # Critical Nuances
//!
//! ## Why standardize first
//!
//! k-means minimizes squared Euclidean distance, so a feature measured in
//! thousands silently outvotes one measured in fractions. Standardizing puts
//! every feature on unit variance before distances are taken. Centroids are
//! therefore reported in standardized space; map them back with
//! [`ClusteringResult::centers_original_scale`] when they need to be read
//! in original units.
//!
//! ## Determinism
//!
//! There is no ambient randomness. Every random choice flows from
//! [`KMeansParams::seed`]: per-restart seeds are derived from it up front, so
//! the same input and seed give the same labels whether or not restarts run
//! in parallel.
//!
//! ## Local optima
//!
//! Lloyd's algorithm only finds a local minimum of inertia. k-means++ seeding
//! makes bad starts unlikely and restarts (`n_init`) make them rarer still,
//! but neither guarantees the global optimum on ambiguous data.

pub mod distance;
pub mod error;
pub mod matrix;
pub mod params;
pub mod partitioning;
pub mod pipeline;
pub mod standardize;
pub mod wire;

// Re-exports
pub use error::{ClusterError, Result};
pub use matrix::FeatureMatrix;
pub use params::KMeansParams;
pub use pipeline::{cluster, ClusteringResult, KMeans};
pub use standardize::{standardize, ColumnStats, Standardizer};
