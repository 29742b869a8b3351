//! Intra-route 2-opt improvement.
//!
//! # Algorithm
//!
//! For each pair of positions (i, j) in a route, reverse the segment
//! `[i..=j]` if that lowers the route cost. Derived matrices are
//! asymmetric, so the delta re-prices every edge inside the reversed
//! segment, not just the two boundary edges:
//!
//! ```text
//! delta = d(prev, r[j]) + Σ d(r[k+1], r[k]) + d(r[i], next)
//!       - d(prev, r[i]) - Σ d(r[k], r[k+1]) - d(r[j], next)
//! ```
//!
//! Repeat until no further improvements are found (first-improvement strategy).
//!
//! # Complexity
//!
//! O(n³) per pass.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::distance::Time;
use crate::evaluation::route_cost;
use crate::reduction::DerivedMatrix;

/// Applies 2-opt improvement to a single route of request indices.
///
/// The route starts and ends at the depot node `depot`. Returns the
/// improved sequence and its cost.
///
/// # Examples
///
/// ```
/// use u_drayage::distance::TravelTimeMatrix;
/// use u_drayage::reduction::DerivedMatrix;
/// use u_drayage::local_search::two_opt_improve;
///
/// // requests 0, 1; truck at node 2; going 1 → 0 is cheap, 0 → 1 is not
/// let costs = TravelTimeMatrix::from_rows(&[
///     vec![0, 9, 1],
///     vec![1, 0, 9],
///     vec![9, 1, 0],
/// ])
/// .unwrap();
/// let derived = DerivedMatrix::from_costs(costs, 2, 1).unwrap();
///
/// let (improved, cost) = two_opt_improve(&[0, 1], 2, &derived);
/// assert_eq!(improved, vec![1, 0]);
/// assert_eq!(cost, 3);
/// ```
pub fn two_opt_improve(route: &[usize], depot: usize, derived: &DerivedMatrix) -> (Vec<usize>, Time) {
    if route.len() < 2 {
        return (route.to_vec(), route_cost(route, depot, derived));
    }

    let mut current = route.to_vec();
    let mut improved = true;

    while improved {
        improved = false;
        let n = current.len();

        for i in 0..n - 1 {
            for j in i + 1..n {
                if two_opt_delta(&current, depot, derived, i, j) < 0 {
                    current[i..=j].reverse();
                    improved = true;
                }
            }
        }
    }

    let cost = route_cost(&current, depot, derived);
    (current, cost)
}

/// Cost change from reversing `route[i..=j]`.
fn two_opt_delta(route: &[usize], depot: usize, derived: &DerivedMatrix, i: usize, j: usize) -> Time {
    let n = route.len();
    let prev = if i == 0 { depot } else { route[i - 1] };
    let next = if j == n - 1 { depot } else { route[j + 1] };

    let mut old_cost = derived.get(prev, route[i]) + derived.get(route[j], next);
    let mut new_cost = derived.get(prev, route[j]) + derived.get(route[i], next);
    for k in i..j {
        old_cost += derived.get(route[k], route[k + 1]);
        new_cost += derived.get(route[k + 1], route[k]);
    }

    new_cost - old_cost
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::TravelTimeMatrix;

    /// Requests 0..4, truck at node 4. Forward along 0→1→2→3 is cheap.
    fn chain() -> DerivedMatrix {
        let costs = TravelTimeMatrix::from_rows(&[
            vec![0, 1, 5, 5, 5],
            vec![5, 0, 1, 5, 5],
            vec![5, 5, 0, 1, 5],
            vec![5, 5, 5, 0, 1],
            vec![1, 5, 5, 5, 0],
        ])
        .expect("square");
        DerivedMatrix::from_costs(costs, 4, 1).expect("5 nodes")
    }

    #[test]
    fn test_2opt_already_optimal() {
        let dm = chain();
        let (improved, cost) = two_opt_improve(&[0, 1, 2, 3], 4, &dm);
        assert_eq!(improved, vec![0, 1, 2, 3]);
        assert_eq!(cost, 5);
    }

    #[test]
    fn test_2opt_fixes_reversed_chain() {
        let dm = chain();
        let before = route_cost(&[3, 2, 1, 0], 4, &dm);
        let (improved, cost) = two_opt_improve(&[3, 2, 1, 0], 4, &dm);
        assert_eq!(improved, vec![0, 1, 2, 3]);
        assert!(cost < before);
    }

    #[test]
    fn test_2opt_delta_matches_route_cost() {
        let dm = chain();
        let route = vec![2, 0, 3, 1];
        for i in 0..route.len() - 1 {
            for j in i + 1..route.len() {
                let mut reversed = route.clone();
                reversed[i..=j].reverse();
                assert_eq!(
                    two_opt_delta(&route, 4, &dm, i, j),
                    route_cost(&reversed, 4, &dm) - route_cost(&route, 4, &dm)
                );
            }
        }
    }

    #[test]
    fn test_2opt_empty_route() {
        let dm = chain();
        let (improved, cost) = two_opt_improve(&[], 4, &dm);
        assert!(improved.is_empty());
        assert_eq!(cost, 0);
    }

    #[test]
    fn test_2opt_single_request() {
        let dm = chain();
        let (improved, cost) = two_opt_improve(&[2], 4, &dm);
        assert_eq!(improved, vec![2]);
        assert_eq!(cost, 10);
    }
}
