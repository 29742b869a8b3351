//! Solution and violation types.

use serde::{Deserialize, Serialize};

use super::Route;
use crate::distance::Time;

/// A way in which a solution breaks the routing contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// A request is served by no truck.
    MissingRequest {
        /// Request index.
        request: usize,
    },
    /// A request is served more than once.
    DuplicateRequest {
        /// Request index.
        request: usize,
        /// How many times it appears.
        count: usize,
    },
    /// A route references a request index that does not exist.
    UnknownRequest {
        /// Route index in the solution.
        route_index: usize,
        /// Offending request index.
        request: usize,
    },
    /// A route references a truck that does not exist.
    UnknownTruck {
        /// Route index in the solution.
        route_index: usize,
        /// Offending truck index.
        truck: usize,
    },
    /// A truck does not have exactly one route.
    RouteCount {
        /// Truck index.
        truck: usize,
        /// Number of routes found for it.
        count: usize,
    },
}

/// A contract violation in a solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// One route per truck, together covering every request exactly once.
///
/// # Examples
///
/// ```
/// use u_drayage::models::{Route, Solution};
///
/// let mut sol = Solution::new();
/// sol.add_route(Route::with_requests(0, vec![1, 0], 12));
/// sol.add_route(Route::new(1));
/// assert_eq!(sol.num_routes(), 2);
/// assert_eq!(sol.num_served(), 2);
/// assert_eq!(sol.sequences(), vec![vec![1, 0], vec![]]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    routes: Vec<Route>,
    total_cost: Time,
}

impl Solution {
    /// Creates an empty solution.
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            total_cost: 0,
        }
    }

    /// Adds a route to this solution.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Returns the routes in this solution.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns the route of truck `truck`, if any.
    pub fn route_of(&self, truck: usize) -> Option<&Route> {
        self.routes.iter().find(|r| r.truck() == truck)
    }

    /// Number of routes.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Number of routes that serve at least one request.
    pub fn num_used(&self) -> usize {
        self.routes.iter().filter(|r| !r.is_empty()).count()
    }

    /// Total number of requests served across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }

    /// Request sequences, one per route, in route order.
    pub fn sequences(&self) -> Vec<Vec<usize>> {
        self.routes.iter().map(|r| r.requests().to_vec()).collect()
    }

    /// Total cost of this solution.
    pub fn total_cost(&self) -> Time {
        self.total_cost
    }

    /// Sets the total cost.
    pub fn set_total_cost(&mut self, cost: Time) {
        self.total_cost = cost;
    }
}

impl Default for Solution {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solution_empty() {
        let sol = Solution::new();
        assert_eq!(sol.num_routes(), 0);
        assert_eq!(sol.num_served(), 0);
        assert_eq!(sol.total_cost(), 0);
    }

    #[test]
    fn test_solution_with_routes() {
        let mut sol = Solution::new();
        sol.add_route(Route::with_requests(0, vec![2], 10));
        sol.add_route(Route::new(1));
        sol.add_route(Route::with_requests(2, vec![0, 1], 20));
        assert_eq!(sol.num_routes(), 3);
        assert_eq!(sol.num_used(), 2);
        assert_eq!(sol.num_served(), 3);
        assert_eq!(sol.route_of(2).map(|r| r.len()), Some(2));
        assert!(sol.route_of(5).is_none());
    }

    #[test]
    fn test_violation_types() {
        let v = Violation::new(ViolationType::DuplicateRequest {
            request: 3,
            count: 2,
        });
        assert_eq!(
            v.kind,
            ViolationType::DuplicateRequest {
                request: 3,
                count: 2
            }
        );
    }

    #[test]
    fn test_solution_default() {
        assert_eq!(Solution::default(), Solution::new());
    }
}
