//! Local search operators over the derived matrix.
//!
//! - [`two_opt_improve`]: Intra-route segment reversal (asymmetric-aware)
//! - [`or_opt_improve`]: Intra-route segment relocation
//! - [`relocate_improve`]: Inter-route request relocation
//!
//! [`improve_routes`] chains all three until none of them finds a move.

mod or_opt;
mod relocate;
mod two_opt;

pub use or_opt::or_opt_improve;
pub use relocate::relocate_improve;
pub use two_opt::two_opt_improve;

use tracing::debug;

use crate::reduction::DerivedMatrix;

/// Improves per-truck request sequences in place.
///
/// Route `t` belongs to truck `t`. Runs 2-opt and Or-opt on every route,
/// then one inter-route relocate move, and repeats until a full round
/// changes nothing. The total cost never increases.
pub fn improve_routes(routes: &mut [Vec<usize>], derived: &DerivedMatrix) {
    let mut rounds = 0usize;
    loop {
        rounds += 1;
        let mut changed = false;

        for (truck, route) in routes.iter_mut().enumerate() {
            let depot = derived.depot_node(truck);
            let (after_two_opt, _) = two_opt_improve(route, depot, derived);
            let (after_or_opt, _) = or_opt_improve(&after_two_opt, depot, derived);
            if after_or_opt != *route {
                *route = after_or_opt;
                changed = true;
            }
        }

        if relocate::relocate_pass(routes, derived) {
            changed = true;
        }

        if !changed {
            break;
        }
    }
    debug!(rounds, "local search converged");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{Time, TravelTimeMatrix};
    use crate::evaluation::route_cost;

    fn total(routes: &[Vec<usize>], dm: &DerivedMatrix) -> Time {
        routes
            .iter()
            .enumerate()
            .map(|(t, r)| route_cost(r, dm.depot_node(t), dm))
            .sum()
    }

    #[test]
    fn test_improve_routes_reaches_chain() {
        // requests 0..3, truck 0 at node 3
        let costs = TravelTimeMatrix::from_rows(&[
            vec![0, 1, 6, 6],
            vec![6, 0, 1, 6],
            vec![6, 6, 0, 1],
            vec![1, 6, 6, 0],
        ])
        .expect("square");
        let dm = DerivedMatrix::from_costs(costs, 3, 1).expect("4 nodes");
        let mut routes = vec![vec![2, 1, 0]];
        improve_routes(&mut routes, &dm);
        assert_eq!(routes, vec![vec![0, 1, 2]]);
        assert_eq!(total(&routes, &dm), 4);
    }

    #[test]
    fn test_improve_routes_never_worse() {
        let costs = TravelTimeMatrix::from_rows(&[
            vec![0, 3, 8, 2, 6],
            vec![4, 0, 1, 9, 2],
            vec![7, 5, 0, 3, 4],
            vec![2, 8, 6, 0, 5],
            vec![3, 4, 9, 1, 0],
        ])
        .expect("square");
        let dm = DerivedMatrix::from_costs(costs, 3, 2).expect("5 nodes");
        let mut routes = vec![vec![2, 0, 1], vec![]];
        let before = total(&routes, &dm);
        improve_routes(&mut routes, &dm);
        assert!(total(&routes, &dm) <= before);

        let mut served: Vec<usize> = routes.iter().flatten().copied().collect();
        served.sort_unstable();
        assert_eq!(served, vec![0, 1, 2]);
    }

    #[test]
    fn test_improve_routes_empty() {
        let dm = DerivedMatrix::from_costs(TravelTimeMatrix::new(2), 0, 2).expect("2 nodes");
        let mut routes = vec![vec![], vec![]];
        improve_routes(&mut routes, &dm);
        assert_eq!(routes, vec![Vec::<usize>::new(), vec![]]);
    }
}
