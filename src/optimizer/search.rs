//! Construction followed by local search.

use crate::constructive::cheapest_insertion;
use crate::error::Result;
use crate::evaluation::RouteEvaluator;
use crate::local_search::improve_routes;
use crate::models::Solution;
use crate::reduction::DerivedMatrix;

use super::{ensure_trucks, finished, RouteOptimizer};

/// Cheapest insertion, then 2-opt, Or-opt and relocate until no improving
/// move remains.
///
/// # Examples
///
/// ```
/// use u_drayage::distance::TravelTimeMatrix;
/// use u_drayage::optimizer::{LocalSearchOptimizer, RouteOptimizer};
/// use u_drayage::reduction::DerivedMatrix;
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
/// let solution = LocalSearchOptimizer.solve(&derived).unwrap();
/// assert_eq!(solution.sequences(), vec![vec![0, 1, 2]]);
/// assert_eq!(solution.total_cost(), 4);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSearchOptimizer;

impl RouteOptimizer for LocalSearchOptimizer {
    fn name(&self) -> &str {
        "local-search"
    }

    fn solve(&self, derived: &DerivedMatrix) -> Result<Solution> {
        ensure_trucks(derived)?;
        let mut routes = cheapest_insertion(derived).sequences();
        improve_routes(&mut routes, derived);
        let solution = RouteEvaluator::new(derived).build_solution(routes);
        Ok(finished(self.name(), solution))
    }
}
