//! Best-of-n restarts.
//!
//! Each restart seeds with k-means++ from its own `StdRng` and refines with
//! Lloyd's algorithm. Restarts share nothing but a read-only view of the
//! points, so with the `parallel` feature they run on rayon's pool.
//!
//! Per-restart seeds are drawn up front from a generator seeded with the base
//! seed, so the result does not depend on scheduling: serial and parallel
//! execution pick the same winner.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::lloyd::{lloyd, LloydOutcome};
use super::seeding::kmeans_plus_plus;
use crate::error::{ClusterError, Result};
use crate::matrix::FeatureMatrix;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Settings for [`best_of_restarts`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RestartPlan {
    pub k: usize,
    pub n_init: usize,
    pub max_iterations: usize,
    pub tolerance: f64,
    pub seed: u64,
}

/// The winning restart.
#[derive(Debug, Clone, PartialEq)]
pub struct BestRun {
    /// Index of the winning restart in `0..n_init`.
    pub restart: usize,
    pub outcome: LloydOutcome,
}

/// Seeds for `n` restarts derived from `base`.
#[must_use]
pub fn restart_seeds(base: u64, n: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(base);
    (0..n).map(|_| rng.random()).collect()
}

/// Run `plan.n_init` independent restarts and keep the lowest-inertia one.
///
/// Ties go to the lowest restart index. The first failing restart (in index
/// order) aborts the whole selection.
pub fn best_of_restarts(points: &FeatureMatrix, plan: &RestartPlan) -> Result<BestRun> {
    if plan.n_init == 0 {
        return Err(ClusterError::invalid("n_init must be greater than 0"));
    }
    let seeds = restart_seeds(plan.seed, plan.n_init);

    #[cfg(feature = "parallel")]
    let runs: Vec<Result<LloydOutcome>> = seeds
        .par_iter()
        .map(|&seed| single_run(points, plan, seed))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let runs: Vec<Result<LloydOutcome>> = seeds
        .iter()
        .map(|&seed| single_run(points, plan, seed))
        .collect();

    let mut best: Option<BestRun> = None;
    for (restart, run) in runs.into_iter().enumerate() {
        let outcome = run?;
        debug!(
            restart,
            inertia = outcome.inertia,
            n_iter = outcome.n_iter,
            converged = outcome.converged,
            "restart finished"
        );
        let better = best
            .as_ref()
            .map_or(true, |b| outcome.inertia < b.outcome.inertia);
        if better {
            best = Some(BestRun { restart, outcome });
        }
    }

    let best = best.ok_or_else(|| ClusterError::invalid("no restarts were run"))?;
    info!(
        restart = best.restart,
        n_init = plan.n_init,
        inertia = best.outcome.inertia,
        "selected best restart"
    );
    Ok(best)
}

fn single_run(points: &FeatureMatrix, plan: &RestartPlan, seed: u64) -> Result<LloydOutcome> {
    let mut rng = StdRng::seed_from_u64(seed);
    let initial = kmeans_plus_plus(points, plan.k, &mut rng)?;
    lloyd(points, initial, plan.max_iterations, plan.tolerance)
}
