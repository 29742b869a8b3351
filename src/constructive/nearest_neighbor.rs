//! Nearest-neighbor constructive heuristic.
//!
//! Builds all truck routes at once: every step extends whichever truck has
//! the cheapest derived-matrix edge from the end of its route to an
//! unserved request.
//!
//! # Complexity
//!
//! O(R² × D) for R requests and D trucks.

use crate::evaluation::RouteEvaluator;
use crate::models::Solution;
use crate::reduction::DerivedMatrix;

/// Constructs a solution using the multi-depot nearest-neighbor heuristic.
///
/// Ties are broken towards the lower truck index, then the lower request
/// index, so the result is deterministic. With no trucks the solution has
/// no routes.
///
/// # Examples
///
/// ```
/// use u_drayage::distance::TravelTimeMatrix;
/// use u_drayage::reduction::DerivedMatrix;
/// use u_drayage::constructive::nearest_neighbor;
///
/// // requests 0, 1; trucks at nodes 2, 3
/// let costs = TravelTimeMatrix::from_rows(&[
///     vec![0, 5, 1, 9],
///     vec![5, 0, 9, 1],
///     vec![1, 9, 0, 0],
///     vec![9, 1, 0, 0],
/// ])
/// .unwrap();
/// let derived = DerivedMatrix::from_costs(costs, 2, 2).unwrap();
///
/// let solution = nearest_neighbor(&derived);
/// assert_eq!(solution.sequences(), vec![vec![0], vec![1]]);
/// assert_eq!(solution.total_cost(), 4);
/// ```
pub fn nearest_neighbor(derived: &DerivedMatrix) -> Solution {
    let evaluator = RouteEvaluator::new(derived);
    let num_requests = derived.num_requests();
    let num_trucks = derived.num_trucks();
    if num_trucks == 0 {
        return Solution::new();
    }

    let mut visited = vec![false; num_requests];
    let mut ends: Vec<usize> = (0..num_trucks).map(|t| derived.depot_node(t)).collect();
    let mut routes: Vec<Vec<usize>> = vec![Vec::new(); num_trucks];

    for _ in 0..num_requests {
        let mut best: Option<(usize, usize, i64)> = None;
        for (truck, &end) in ends.iter().enumerate() {
            for request in (0..num_requests).filter(|&r| !visited[r]) {
                let cost = derived.get(end, request);
                if best.is_none_or(|(_, _, c)| cost < c) {
                    best = Some((truck, request, cost));
                }
            }
        }

        let Some((truck, request, _)) = best else {
            break;
        };
        visited[request] = true;
        routes[truck].push(request);
        ends[truck] = request;
    }

    evaluator.build_solution(routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::TravelTimeMatrix;

    /// Requests 0..3 on a line, trucks at nodes 3 and 4.
    fn line() -> DerivedMatrix {
        let costs = TravelTimeMatrix::from_rows(&[
            vec![0, 1, 2, 1, 9],
            vec![1, 0, 1, 2, 8],
            vec![2, 1, 0, 3, 7],
            vec![1, 2, 3, 0, 9],
            vec![9, 8, 7, 9, 0],
        ])
        .expect("square");
        DerivedMatrix::from_costs(costs, 3, 2).expect("5 nodes")
    }

    #[test]
    fn test_nn_serves_everything() {
        let sol = nearest_neighbor(&line());
        assert_eq!(sol.num_routes(), 2);
        assert_eq!(sol.num_served(), 3);
    }

    #[test]
    fn test_nn_chooses_nearest() {
        let sol = nearest_neighbor(&line());
        // truck 0 walks the line; truck 1 is far from everything
        assert_eq!(sol.sequences(), vec![vec![0, 1, 2], vec![]]);
        // 1 + 1 + 1 + 3
        assert_eq!(sol.total_cost(), 6);
    }

    #[test]
    fn test_nn_no_requests() {
        let dm = DerivedMatrix::from_costs(TravelTimeMatrix::new(2), 0, 2).expect("2 nodes");
        let sol = nearest_neighbor(&dm);
        assert_eq!(sol.num_routes(), 2);
        assert_eq!(sol.num_served(), 0);
    }

    #[test]
    fn test_nn_no_trucks() {
        let dm = DerivedMatrix::from_costs(TravelTimeMatrix::new(2), 2, 0).expect("2 nodes");
        let sol = nearest_neighbor(&dm);
        assert_eq!(sol.num_routes(), 0);
    }
}
