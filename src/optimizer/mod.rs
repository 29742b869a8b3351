//! Route optimizers over a derived matrix.
//!
//! Every optimizer reads only the [`DerivedMatrix`]: trailer logistics are
//! already folded into its edge weights, so strategies can be swapped
//! without touching the reduction.
//!
//! - [`NearestNeighborOptimizer`]: Greedy multi-depot extension
//! - [`CheapestInsertionOptimizer`]: Cheapest insertion over all trucks
//! - [`LocalSearchOptimizer`]: Cheapest insertion + 2-opt/Or-opt/relocate
//! - [`ExactOptimizer`]: Held–Karp with subset partition, small instances only
//! - [`RuinRecreateOptimizer`]: Seeded ruin-and-recreate metaheuristic

mod exact;
mod greedy;
mod ruin_recreate;
mod search;

pub use exact::{ExactOptimizer, MAX_EXACT_REQUESTS};
pub use greedy::{CheapestInsertionOptimizer, NearestNeighborOptimizer};
pub use ruin_recreate::RuinRecreateOptimizer;
pub use search::LocalSearchOptimizer;

use tracing::info;

use crate::error::{DrayageError, Result};
use crate::models::Solution;
use crate::reduction::DerivedMatrix;

/// A strategy that assigns requests to trucks and orders them.
///
/// A conforming solution has exactly one route per truck, in truck order
/// (possibly empty), and serves every request exactly once. The objective
/// is the sum of derived-matrix edges along every route, depot to depot.
pub trait RouteOptimizer: Send + Sync {
    /// Short strategy name, used in logs and reports.
    fn name(&self) -> &str;

    /// Solves the routing problem encoded by `derived`.
    ///
    /// # Errors
    ///
    /// Returns [`DrayageError::NoTrucks`] when requests exist but no truck
    /// does; individual strategies may add their own limits.
    fn solve(&self, derived: &DerivedMatrix) -> Result<Solution>;
}

/// Rejects instances with requests but no trucks.
fn ensure_trucks(derived: &DerivedMatrix) -> Result<()> {
    if derived.num_trucks() == 0 && derived.num_requests() > 0 {
        return Err(DrayageError::NoTrucks {
            requests: derived.num_requests(),
        });
    }
    Ok(())
}

fn finished(name: &str, solution: Solution) -> Solution {
    info!(
        strategy = name,
        cost = solution.total_cost(),
        served = solution.num_served(),
        trucks_used = solution.num_used(),
        "optimizer finished"
    );
    solution
}
