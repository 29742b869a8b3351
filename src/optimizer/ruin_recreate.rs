//! Ruin-and-recreate metaheuristic.
//!
//! # Algorithm
//!
//! 1. Start from cheapest insertion followed by local search.
//! 2. Each iteration removes a fraction of the requests, either uniformly
//!    at random or biased towards the worst-positioned ones.
//! 3. Reinserts them by cheapest insertion and runs local search.
//! 4. Accepts the candidate if it is not worse than the current solution.
//!
//! # Reference
//!
//! Schrimpf, G. et al. (2000). "Record Breaking Optimization Results Using
//! the Ruin and Recreate Principle", *Journal of Computational Physics*
//! 159(2), 139-171.
//!
//! Ropke, S. & Pisinger, D. (2006). "An Adaptive Large Neighborhood Search
//! Heuristic for the Pickup and Delivery Problem with Time Windows",
//! *Transportation Science* 40(4), 455-472.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::constructive::{cheapest_insertion, insert_all};
use crate::distance::Time;
use crate::error::Result;
use crate::evaluation::{removal_delta, route_cost, RouteEvaluator};
use crate::local_search::improve_routes;
use crate::models::Solution;
use crate::reduction::DerivedMatrix;

use super::{ensure_trucks, finished, RouteOptimizer};

/// Randomization exponent for worst removal; higher is greedier.
const WORST_REMOVAL_BIAS: i32 = 3;

/// Seeded ruin-and-recreate search.
///
/// The same seed, iteration count and ruin fraction always give the same
/// solution.
///
/// # Examples
///
/// ```
/// use u_drayage::distance::TravelTimeMatrix;
/// use u_drayage::optimizer::{RouteOptimizer, RuinRecreateOptimizer};
/// use u_drayage::reduction::DerivedMatrix;
///
/// let costs = TravelTimeMatrix::from_rows(&[
///     vec![0, 1, 6, 6],
///     vec![6, 0, 1, 6],
///     vec![6, 6, 0, 1],
///     vec![1, 6, 6, 0],
/// ])
/// .unwrap();
/// let derived = DerivedMatrix::from_costs(costs, 3, 1).unwrap();
///
/// let optimizer = RuinRecreateOptimizer::new(20, 0.5, 42);
/// let solution = optimizer.solve(&derived).unwrap();
/// assert_eq!(solution.total_cost(), 4);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RuinRecreateOptimizer {
    iterations: usize,
    ruin_fraction: f64,
    seed: u64,
}

impl RuinRecreateOptimizer {
    /// Creates an optimizer running `iterations` ruin-and-recreate steps.
    ///
    /// `ruin_fraction` is clamped to (0, 1]; at least one request is
    /// removed per step.
    pub fn new(iterations: usize, ruin_fraction: f64, seed: u64) -> Self {
        let ruin_fraction = if ruin_fraction.is_finite() {
            ruin_fraction.clamp(f64::MIN_POSITIVE, 1.0)
        } else {
            1.0
        };
        Self {
            iterations,
            ruin_fraction,
            seed,
        }
    }

    /// Number of ruin-and-recreate steps.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Fraction of requests removed per step.
    pub fn ruin_fraction(&self) -> f64 {
        self.ruin_fraction
    }

    /// Random seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn ruin_size(&self, num_requests: usize) -> usize {
        ((num_requests as f64 * self.ruin_fraction).round() as usize).clamp(1, num_requests)
    }
}

impl RouteOptimizer for RuinRecreateOptimizer {
    fn name(&self) -> &str {
        "ruin-recreate"
    }

    fn solve(&self, derived: &DerivedMatrix) -> Result<Solution> {
        ensure_trucks(derived)?;
        let evaluator = RouteEvaluator::new(derived);

        let mut current = cheapest_insertion(derived).sequences();
        improve_routes(&mut current, derived);
        let num_requests = derived.num_requests();
        if num_requests == 0 || derived.num_trucks() == 0 {
            return Ok(finished(self.name(), evaluator.build_solution(current)));
        }

        let mut current_cost = total_cost(&current, derived);
        let mut best = current.clone();
        let mut best_cost = current_cost;
        let mut rng = StdRng::seed_from_u64(self.seed);
        let ruin_size = self.ruin_size(num_requests);

        for iteration in 0..self.iterations {
            let mut candidate = current.clone();
            let removed = if rng.random_bool(0.5) {
                random_removal(&mut candidate, ruin_size, &mut rng)
            } else {
                worst_removal(&mut candidate, ruin_size, derived, &mut rng)
            };
            if !insert_all(&mut candidate, removed, derived) {
                continue;
            }
            improve_routes(&mut candidate, derived);

            let cost = total_cost(&candidate, derived);
            if cost <= current_cost {
                current = candidate;
                current_cost = cost;
                if cost < best_cost {
                    debug!(iteration, cost, "ruin-and-recreate improved");
                    best = current.clone();
                    best_cost = cost;
                }
            }
        }

        Ok(finished(self.name(), evaluator.build_solution(best)))
    }
}

fn total_cost(routes: &[Vec<usize>], derived: &DerivedMatrix) -> Time {
    routes
        .iter()
        .enumerate()
        .map(|(truck, route)| route_cost(route, derived.depot_node(truck), derived))
        .sum()
}

/// Removes `count` uniformly chosen requests.
fn random_removal<R: Rng>(routes: &mut [Vec<usize>], count: usize, rng: &mut R) -> Vec<usize> {
    let mut removed = Vec::with_capacity(count);
    for _ in 0..count {
        let assigned: usize = routes.iter().map(Vec::len).sum();
        if assigned == 0 {
            break;
        }

        let mut target = rng.random_range(0..assigned);
        for route in routes.iter_mut() {
            if target < route.len() {
                removed.push(route.remove(target));
                break;
            }
            target -= route.len();
        }
    }
    removed
}

/// Removes `count` requests, favouring those whose removal saves the most.
///
/// Candidates are ranked by saving and picked at rank `⌊y^p · n⌋` for a
/// uniform `y`, so the worst request is the most likely but not certain.
fn worst_removal<R: Rng>(
    routes: &mut [Vec<usize>],
    count: usize,
    derived: &DerivedMatrix,
    rng: &mut R,
) -> Vec<usize> {
    let mut removed = Vec::with_capacity(count);
    for _ in 0..count {
        let mut ranked: Vec<(Time, usize, usize)> = Vec::new();
        for (truck, route) in routes.iter().enumerate() {
            let depot = derived.depot_node(truck);
            for pos in 0..route.len() {
                ranked.push((removal_delta(route, pos, depot, derived), truck, pos));
            }
        }
        if ranked.is_empty() {
            break;
        }

        // most negative delta = largest saving first
        ranked.sort_unstable();
        let y: f64 = rng.random();
        let rank = ((y.powi(WORST_REMOVAL_BIAS) * ranked.len() as f64) as usize).min(ranked.len() - 1);
        let (_, truck, pos) = ranked[rank];
        removed.push(routes[truck].remove(pos));
    }
    removed
}
