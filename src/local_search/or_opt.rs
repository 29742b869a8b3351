//! Intra-route Or-opt improvement.
//!
//! # Algorithm
//!
//! Tries moving segments of 1, 2, or 3 consecutive requests to a different
//! position within the same route, keeping their order. Segments are never
//! reversed, so the delta only touches the three edges around the cut and
//! the three around the new slot, even on an asymmetric matrix.
//!
//! # Complexity
//!
//! O(n²) per pass, O(n³) worst case for convergence.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use crate::distance::Time;
use crate::evaluation::route_cost;
use crate::reduction::DerivedMatrix;

/// Applies Or-opt improvement to a single route.
///
/// Returns the improved request sequence and its cost.
///
/// # Examples
///
/// ```
/// use u_drayage::distance::TravelTimeMatrix;
/// use u_drayage::reduction::DerivedMatrix;
/// use u_drayage::evaluation::route_cost;
/// use u_drayage::local_search::or_opt_improve;
///
/// // requests 0..3, truck at node 3
/// let costs = TravelTimeMatrix::from_rows(&[
///     vec![0, 1, 6, 6],
///     vec![6, 0, 1, 6],
///     vec![6, 6, 0, 1],
///     vec![1, 6, 6, 0],
/// ])
/// .unwrap();
/// let derived = DerivedMatrix::from_costs(costs, 3, 1).unwrap();
///
/// let (improved, cost) = or_opt_improve(&[1, 2, 0], 3, &derived);
/// assert_eq!(improved, vec![0, 1, 2]);
/// assert!(cost < route_cost(&[1, 2, 0], 3, &derived));
/// ```
pub fn or_opt_improve(route: &[usize], depot: usize, derived: &DerivedMatrix) -> (Vec<usize>, Time) {
    let mut current = route.to_vec();
    let mut improved = current.len() >= 2;

    while improved {
        improved = false;
        for seg_len in 1..=3.min(current.len()) {
            if try_or_opt_pass(&mut current, depot, derived, seg_len) {
                improved = true;
            }
        }
    }

    let cost = route_cost(&current, depot, derived);
    (current, cost)
}

/// One pass of Or-opt for a given segment length. Returns true if improved.
fn try_or_opt_pass(route: &mut Vec<usize>, depot: usize, derived: &DerivedMatrix, seg_len: usize) -> bool {
    let n = route.len();
    if n < seg_len + 1 {
        return false;
    }

    let mut best: Option<(usize, usize, Time)> = None;

    for from in 0..=(n - seg_len) {
        let prev = if from == 0 { depot } else { route[from - 1] };
        let after = if from + seg_len == n {
            depot
        } else {
            route[from + seg_len]
        };
        let seg_first = route[from];
        let seg_last = route[from + seg_len - 1];

        // Old edges: prev→seg_first + seg_last→after
        // New edges (after removal): prev→after
        let removal_gain =
            derived.get(prev, seg_first) + derived.get(seg_last, after) - derived.get(prev, after);

        // Slots in the route with the segment cut out
        let rest: Vec<usize> = route[..from]
            .iter()
            .chain(&route[from + seg_len..])
            .copied()
            .collect();

        for to in 0..=rest.len() {
            if to == from {
                continue;
            }
            let ins_prev = if to == 0 { depot } else { rest[to - 1] };
            let ins_next = if to == rest.len() { depot } else { rest[to] };

            let insertion_cost = derived.get(ins_prev, seg_first) + derived.get(seg_last, ins_next)
                - derived.get(ins_prev, ins_next);
            let delta = insertion_cost - removal_gain;

            if delta < 0 && best.is_none_or(|b| delta < b.2) {
                best = Some((from, to, delta));
            }
        }
    }

    let Some((from, to, _)) = best else {
        return false;
    };
    let segment: Vec<usize> = route.drain(from..from + seg_len).collect();
    for (i, request) in segment.into_iter().enumerate() {
        route.insert(to + i, request);
    }
    true
}
