//! Cheapest-insertion constructive heuristic.
//!
//! Starts from empty routes and repeatedly inserts the unserved request
//! whose best position, over every truck and every slot, adds the least
//! cost. Unlike nearest neighbor it accounts for the return leg.
//!
//! # Complexity
//!
//! O(R³) for R requests.

use crate::distance::Time;
use crate::evaluation::{insertion_delta, RouteEvaluator};
use crate::models::Solution;
use crate::reduction::DerivedMatrix;

/// Finds the best insertion of `request` across all routes.
///
/// Route `t` belongs to truck `t`. Returns `(truck, position, cost_increase)`,
/// or `None` when there are no routes.
pub(crate) fn best_insertion(
    routes: &[Vec<usize>],
    request: usize,
    derived: &DerivedMatrix,
) -> Option<(usize, usize, Time)> {
    let mut best: Option<(usize, usize, Time)> = None;

    for (truck, route) in routes.iter().enumerate() {
        let depot = derived.depot_node(truck);
        for pos in 0..=route.len() {
            let cost = insertion_delta(route, pos, request, depot, derived);
            if best.is_none_or(|b| cost < b.2) {
                best = Some((truck, pos, cost));
            }
        }
    }

    best
}

/// Inserts every request of `pending` into `routes`, cheapest first.
///
/// Returns `false` if some request could not be placed (no routes).
pub(crate) fn insert_all(routes: &mut [Vec<usize>], mut pending: Vec<usize>, derived: &DerivedMatrix) -> bool {
    while !pending.is_empty() {
        let mut best: Option<(usize, usize, usize, Time)> = None;
        for (idx, &request) in pending.iter().enumerate() {
            if let Some((truck, pos, cost)) = best_insertion(routes, request, derived) {
                if best.is_none_or(|b| cost < b.3) {
                    best = Some((idx, truck, pos, cost));
                }
            }
        }

        let Some((idx, truck, pos, _)) = best else {
            return false;
        };
        let request = pending.remove(idx);
        routes[truck].insert(pos, request);
    }
    true
}

/// Constructs a solution by cheapest insertion.
///
/// # Examples
///
/// ```
/// use u_drayage::distance::TravelTimeMatrix;
/// use u_drayage::reduction::DerivedMatrix;
/// use u_drayage::constructive::cheapest_insertion;
///
/// // requests 0, 1; one truck at node 2
/// let costs = TravelTimeMatrix::from_rows(&[
///     vec![0, 1, 8],
///     vec![9, 0, 1],
///     vec![1, 9, 0],
/// ])
/// .unwrap();
/// let derived = DerivedMatrix::from_costs(costs, 2, 1).unwrap();
///
/// let solution = cheapest_insertion(&derived);
/// assert_eq!(solution.sequences(), vec![vec![0, 1]]);
/// assert_eq!(solution.total_cost(), 3);
/// ```
pub fn cheapest_insertion(derived: &DerivedMatrix) -> Solution {
    let evaluator = RouteEvaluator::new(derived);
    let mut routes: Vec<Vec<usize>> = vec![Vec::new(); derived.num_trucks()];
    if !insert_all(&mut routes, (0..derived.num_requests()).collect(), derived) {
        return Solution::new();
    }
    evaluator.build_solution(routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::TravelTimeMatrix;

    /// Two requests near truck 1 (node 3), far from truck 0 (node 2).
    fn two_depots() -> DerivedMatrix {
        let costs = TravelTimeMatrix::from_rows(&[
            vec![0, 2, 9, 1],
            vec![2, 0, 9, 3],
            vec![9, 9, 0, 5],
            vec![1, 3, 5, 0],
        ])
        .expect("square");
        DerivedMatrix::from_costs(costs, 2, 2).expect("4 nodes")
    }

    #[test]
    fn test_insertion_prefers_closer_truck() {
        let sol = cheapest_insertion(&two_depots());
        assert_eq!(sol.route_of(0).map(|r| r.len()), Some(0));
        assert_eq!(sol.route_of(1).map(|r| r.len()), Some(2));
        assert_eq!(sol.num_served(), 2);
    }

    #[test]
    fn test_insertion_cost_is_route_sum() {
        let dm = two_depots();
        let sol = cheapest_insertion(&dm);
        let sum: Time = sol.routes().iter().map(|r| r.cost()).sum();
        assert_eq!(sol.total_cost(), sum);
    }

    #[test]
    fn test_best_insertion_empty_routes() {
        let dm = two_depots();
        let best = best_insertion(&[vec![], vec![]], 0, &dm).expect("two routes");
        // truck 1: 3→0 + 0→3 = 2, truck 0: 2→0 + 0→2 = 18
        assert_eq!(best, (1, 0, 2));
        assert!(best_insertion(&[], 0, &dm).is_none());
    }

    #[test]
    fn test_insert_all_without_routes() {
        let dm = DerivedMatrix::from_costs(TravelTimeMatrix::new(1), 1, 0).expect("1 node");
        let mut routes: Vec<Vec<usize>> = vec![];
        assert!(!insert_all(&mut routes, vec![0], &dm));
        assert_eq!(cheapest_insertion(&dm).num_routes(), 0);
    }
}
