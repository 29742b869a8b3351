//! Exact search for small instances.
//!
//! # Algorithm
//!
//! 1. For every truck, a Held–Karp path DP over subsets of requests gives
//!    the cheapest depot-to-depot tour serving exactly that subset.
//! 2. A partition DP assigns disjoint subsets to trucks one at a time,
//!    minimizing the summed tour costs.
//!
//! Neither step relies on the triangle inequality, so the result is optimal
//! for any derived matrix, including the asymmetric, non-metric ones that
//! trailer detours produce.
//!
//! # Complexity
//!
//! O(D × 2^R × R²) for the tours plus O(D × 3^R) for the partition.
//! Building one truck's tours holds a 2^R × R table of costs; the retained
//! tables take 2^R × (R + 9) bytes per truck plus 16 × 2^R for the
//! partition. At the 16-request ceiling that is about 8 MiB transient and
//! under 2 MiB kept per truck, with roughly 43 million partition steps per
//! truck.
//!
//! # Reference
//!
//! Held, M. & Karp, R.M. (1962). "A Dynamic Programming Approach to
//! Sequencing Problems", *Journal of the SIAM* 10(1), 196-210.

use crate::distance::Time;
use crate::error::{DrayageError, Result};
use crate::evaluation::RouteEvaluator;
use crate::models::Solution;
use crate::reduction::DerivedMatrix;

use super::{ensure_trucks, finished, RouteOptimizer};

/// Hard ceiling on the request limit; tables grow as 2^R × R per truck and
/// the partition as 3^R per truck.
pub const MAX_EXACT_REQUESTS: usize = 16;

const UNSET: Time = Time::MAX;
const NONE: u8 = u8::MAX;

/// Optimal solver for instances with at most `limit` requests.
///
/// # Examples
///
/// ```
/// use u_drayage::distance::TravelTimeMatrix;
/// use u_drayage::optimizer::{ExactOptimizer, RouteOptimizer};
/// use u_drayage::reduction::DerivedMatrix;
///
/// // requests 0, 1; trucks at nodes 2 and 3
/// let costs = TravelTimeMatrix::from_rows(&[
///     vec![0, 20, 4, 9],
///     vec![20, 0, 9, 4],
///     vec![4, 9, 0, 0],
///     vec![9, 4, 0, 0],
/// ])
/// .unwrap();
/// let derived = DerivedMatrix::from_costs(costs, 2, 2).unwrap();
///
/// let solution = ExactOptimizer::new(10).solve(&derived).unwrap();
/// assert_eq!(solution.sequences(), vec![vec![0], vec![1]]);
/// assert_eq!(solution.total_cost(), 16);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ExactOptimizer {
    limit: usize,
}

impl ExactOptimizer {
    /// Creates an exact optimizer refusing more than `limit` requests.
    ///
    /// The limit is capped at [`MAX_EXACT_REQUESTS`]. Time and memory grow
    /// exponentially with the request count, see the module docs.
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.min(MAX_EXACT_REQUESTS),
        }
    }

    /// Largest request count this optimizer accepts.
    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl RouteOptimizer for ExactOptimizer {
    fn name(&self) -> &str {
        "exact"
    }

    fn solve(&self, derived: &DerivedMatrix) -> Result<Solution> {
        ensure_trucks(derived)?;
        let num_requests = derived.num_requests();
        if num_requests > self.limit {
            return Err(DrayageError::InstanceTooLarge {
                requests: num_requests,
                limit: self.limit,
            });
        }
        if derived.num_trucks() == 0 {
            return Ok(finished(self.name(), Solution::new()));
        }

        let tours: Vec<TruckTours> = (0..derived.num_trucks())
            .map(|truck| TruckTours::build(derived, truck))
            .collect();
        let masks = partition(&tours, num_requests);
        let routes = tours
            .iter()
            .zip(masks)
            .map(|(tour, mask)| tour.sequence(mask))
            .collect();

        Ok(finished(self.name(), RouteEvaluator::new(derived).build_solution(routes)))
    }
}

/// Held–Karp tables for one truck.
struct TruckTours {
    num_requests: usize,
    /// `parent[mask * n + last]`: request visited before `last` in the best
    /// path covering `mask`.
    parent: Vec<u8>,
    /// Best closed tour cost per subset.
    closed: Vec<Time>,
    /// Last request of that best closed tour.
    closing: Vec<u8>,
}

impl TruckTours {
    fn build(derived: &DerivedMatrix, truck: usize) -> Self {
        let n = derived.num_requests();
        let depot = derived.depot_node(truck);
        let full = 1usize << n;

        let mut best = vec![UNSET; full * n];
        let mut parent = vec![NONE; full * n];
        for request in 0..n {
            best[(1 << request) * n + request] = derived.get(depot, request);
        }

        for mask in 1..full {
            for last in (0..n).filter(|&r| mask & (1 << r) != 0) {
                let cost = best[mask * n + last];
                if cost == UNSET {
                    continue;
                }
                for next in (0..n).filter(|&r| mask & (1 << r) == 0) {
                    let slot = (mask | 1 << next) * n + next;
                    let candidate = cost + derived.get(last, next);
                    if candidate < best[slot] {
                        best[slot] = candidate;
                        parent[slot] = last as u8;
                    }
                }
            }
        }

        let mut closed = vec![UNSET; full];
        let mut closing = vec![NONE; full];
        closed[0] = derived.get(depot, depot);
        for mask in 1..full {
            for last in (0..n).filter(|&r| mask & (1 << r) != 0) {
                let cost = best[mask * n + last];
                if cost == UNSET {
                    continue;
                }
                let candidate = cost + derived.get(last, depot);
                if candidate < closed[mask] {
                    closed[mask] = candidate;
                    closing[mask] = last as u8;
                }
            }
        }

        Self {
            num_requests: n,
            parent,
            closed,
            closing,
        }
    }

    /// Request order of the best tour covering `mask`.
    fn sequence(&self, mut mask: usize) -> Vec<usize> {
        let mut sequence = Vec::with_capacity(mask.count_ones() as usize);
        let mut last = self.closing[mask];
        while mask != 0 && last != NONE {
            let request = usize::from(last);
            sequence.push(request);
            let previous = self.parent[mask * self.num_requests + request];
            mask &= !(1 << request);
            last = previous;
        }
        sequence.reverse();
        sequence
    }
}

/// Splits all requests into one subset per truck, minimizing tour costs.
fn partition(tours: &[TruckTours], num_requests: usize) -> Vec<usize> {
    let full = 1usize << num_requests;
    let mut table: Vec<Vec<Time>> = Vec::with_capacity(tours.len());
    let mut choice: Vec<Vec<usize>> = Vec::with_capacity(tours.len());

    table.push(tours[0].closed.clone());
    choice.push((0..full).collect());

    for tour in &tours[1..] {
        let previous = &table[table.len() - 1];
        let mut row = vec![UNSET; full];
        let mut picked = vec![0usize; full];
        for mask in 0..full {
            // enumerate every subset of `mask`, `mask` itself first
            let mut sub = mask;
            loop {
                let rest = previous[mask ^ sub];
                let own = tour.closed[sub];
                if rest != UNSET && own != UNSET && rest + own < row[mask] {
                    row[mask] = rest + own;
                    picked[mask] = sub;
                }
                if sub == 0 {
                    break;
                }
                sub = (sub - 1) & mask;
            }
        }
        table.push(row);
        choice.push(picked);
    }

    let mut masks = vec![0usize; tours.len()];
    let mut remaining = full - 1;
    for truck in (0..tours.len()).rev() {
        let own = choice[truck][remaining];
        masks[truck] = own;
        remaining ^= own;
    }
    masks
}
