//! k-means partitioning of standardized points.
//!
//! - [`seeding`]: k-means++ initial centroids
//! - [`lloyd`]: assignment/update refinement
//! - [`restarts`]: independent runs, lowest inertia wins

pub mod lloyd;
pub mod restarts;
pub mod seeding;

pub use lloyd::{assign, inertia, lloyd, LloydOutcome};
pub use restarts::{best_of_restarts, restart_seeds, BestRun, RestartPlan};
pub use seeding::kmeans_plus_plus;
