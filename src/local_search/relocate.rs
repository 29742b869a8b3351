//! Inter-route request relocation operator.
//!
//! # Algorithm
//!
//! Tries moving each request from its current truck to the best insertion
//! position in another truck's route, each with its own depot node. Applies
//! the best improving move and repeats until none is left.
//!
//! # Complexity
//!
//! O(R²) per pass for R requests.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use crate::distance::Time;
use crate::evaluation::{insertion_delta, removal_delta, RouteEvaluator};
use crate::models::Solution;
use crate::reduction::DerivedMatrix;

/// A relocate move: move a request from one truck to another.
#[derive(Debug, Clone)]
struct RelocateMove {
    from_truck: usize,
    from_pos: usize,
    to_truck: usize,
    to_pos: usize,
    delta: Time,
}

/// Applies inter-route relocate improvement to a solution.
///
/// The solution's routes must be in truck order (route `t` belongs to truck
/// `t`), as every optimizer in this crate produces them.
///
/// # Examples
///
/// ```
/// use u_drayage::distance::TravelTimeMatrix;
/// use u_drayage::evaluation::RouteEvaluator;
/// use u_drayage::reduction::DerivedMatrix;
/// use u_drayage::local_search::relocate_improve;
///
/// // request 0; trucks at nodes 1 and 2, truck 1 is much closer
/// let costs = TravelTimeMatrix::from_rows(&[
///     vec![0, 9, 1],
///     vec![9, 0, 0],
///     vec![1, 0, 0],
/// ])
/// .unwrap();
/// let derived = DerivedMatrix::from_costs(costs, 1, 2).unwrap();
///
/// let initial = RouteEvaluator::new(&derived).build_solution(vec![vec![0], vec![]]);
/// let improved = relocate_improve(&initial, &derived);
/// assert_eq!(improved.sequences(), vec![vec![], vec![0]]);
/// assert_eq!(improved.total_cost(), 2);
/// ```
pub fn relocate_improve(solution: &Solution, derived: &DerivedMatrix) -> Solution {
    let mut routes = solution.sequences();
    while relocate_pass(&mut routes, derived) {}
    RouteEvaluator::new(derived).build_solution(routes)
}

/// Applies the best improving relocate move, if any. Returns true if applied.
pub(crate) fn relocate_pass(routes: &mut [Vec<usize>], derived: &DerivedMatrix) -> bool {
    let Some(mv) = find_best_relocate(routes, derived) else {
        return false;
    };
    let request = routes[mv.from_truck].remove(mv.from_pos);
    routes[mv.to_truck].insert(mv.to_pos, request);
    true
}

/// Finds the best improving relocate move across all truck pairs.
fn find_best_relocate(routes: &[Vec<usize>], derived: &DerivedMatrix) -> Option<RelocateMove> {
    let mut best: Option<RelocateMove> = None;

    for (from_truck, from_route) in routes.iter().enumerate() {
        let from_depot = derived.depot_node(from_truck);
        for from_pos in 0..from_route.len() {
            let request = from_route[from_pos];
            let removal = removal_delta(from_route, from_pos, from_depot, derived);

            for (to_truck, to_route) in routes.iter().enumerate() {
                if to_truck == from_truck {
                    continue;
                }
                let to_depot = derived.depot_node(to_truck);

                for to_pos in 0..=to_route.len() {
                    let delta = removal + insertion_delta(to_route, to_pos, request, to_depot, derived);
                    if delta < 0 && best.as_ref().is_none_or(|b| delta < b.delta) {
                        best = Some(RelocateMove {
                            from_truck,
                            from_pos,
                            to_truck,
                            to_pos,
                            delta,
                        });
                    }
                }
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::TravelTimeMatrix;
    use crate::evaluation::route_cost;

    /// Requests 0, 1; truck 0 at node 2, truck 1 at node 3.
    /// Request 1 is cheap from truck 1 only.
    fn split() -> DerivedMatrix {
        let costs = TravelTimeMatrix::from_rows(&[
            vec![0, 6, 1, 6],
            vec![6, 0, 8, 1],
            vec![1, 8, 0, 0],
            vec![6, 1, 0, 0],
        ])
        .expect("square");
        DerivedMatrix::from_costs(costs, 2, 2).expect("4 nodes")
    }

    #[test]
    fn test_relocate_single_route() {
        let dm = DerivedMatrix::from_costs(TravelTimeMatrix::new(2), 1, 1).expect("2 nodes");
        let sol = RouteEvaluator::new(&dm).build_solution(vec![vec![0]]);
        let improved = relocate_improve(&sol, &dm);
        assert_eq!(improved.num_served(), 1);
        assert_eq!(improved.sequences(), vec![vec![0]]);
    }

    #[test]
    fn test_relocate_moves_to_cheaper_truck() {
        let dm = split();
        let initial = RouteEvaluator::new(&dm).build_solution(vec![vec![0, 1], vec![]]);
        let improved = relocate_improve(&initial, &dm);
        assert_eq!(improved.sequences(), vec![vec![0], vec![1]]);
        assert!(improved.total_cost() < initial.total_cost());
        assert_eq!(improved.total_cost(), 4);
    }

    #[test]
    fn test_relocate_no_improvement_needed() {
        let dm = split();
        let initial = RouteEvaluator::new(&dm).build_solution(vec![vec![0], vec![1]]);
        let improved = relocate_improve(&initial, &dm);
        assert_eq!(improved, initial);
    }

    #[test]
    fn test_relocate_pass_reports_change() {
        let dm = split();
        let mut routes = vec![vec![], vec![0, 1]];
        let before: Time = routes
            .iter()
            .enumerate()
            .map(|(t, r)| route_cost(r, dm.depot_node(t), &dm))
            .sum();
        assert!(relocate_pass(&mut routes, &dm));
        let after: Time = routes
            .iter()
            .enumerate()
            .map(|(t, r)| route_cost(r, dm.depot_node(t), &dm))
            .sum();
        assert!(after < before);
    }
}
