//! Route evaluator over the derived matrix.

use crate::distance::Time;
use crate::models::{Route, Solution, Violation, ViolationType};
use crate::reduction::DerivedMatrix;

/// Cost of one route: `depot → route[0] → ... → route[n-1] → depot`.
///
/// `route` holds request indices and `depot` is the truck's depot node. An
/// empty route costs the depot's self-edge, which keeps insertion deltas
/// consistent for routes that start out empty.
pub fn route_cost(route: &[usize], depot: usize, derived: &DerivedMatrix) -> Time {
    let (Some(&first), Some(&last)) = (route.first(), route.last()) else {
        return derived.get(depot, depot);
    };
    let mut cost = derived.get(depot, first);
    for w in route.windows(2) {
        cost += derived.get(w[0], w[1]);
    }
    cost + derived.get(last, depot)
}

/// Cost change from inserting `request` at `pos` in a route of `depot`.
pub fn insertion_delta(
    route: &[usize],
    pos: usize,
    request: usize,
    depot: usize,
    derived: &DerivedMatrix,
) -> Time {
    let prev = if pos == 0 { depot } else { route[pos - 1] };
    let next = if pos == route.len() { depot } else { route[pos] };

    // Old: prev → next
    // New: prev → request → next
    derived.get(prev, request) + derived.get(request, next) - derived.get(prev, next)
}

/// Cost change from removing the request at `pos` from a route of `depot`.
pub fn removal_delta(route: &[usize], pos: usize, depot: usize, derived: &DerivedMatrix) -> Time {
    let prev = if pos == 0 { depot } else { route[pos - 1] };
    let next = if pos + 1 == route.len() {
        depot
    } else {
        route[pos + 1]
    };
    let request = route[pos];

    // Old: prev → request → next
    // New: prev → next
    derived.get(prev, next) - derived.get(prev, request) - derived.get(request, next)
}

/// Evaluates routes and solutions against the MDVRP objective: the sum over
/// trucks of depot→first, consecutive request legs, and last→depot, all read
/// from the derived matrix.
///
/// # Examples
///
/// ```
/// use u_drayage::distance::TravelTimeMatrix;
/// use u_drayage::evaluation::RouteEvaluator;
/// use u_drayage::reduction::DerivedMatrix;
///
/// // one request (node 0) and one truck (node 1)
/// let costs = TravelTimeMatrix::from_data(2, vec![0, 4, 3, 0]).unwrap();
/// let derived = DerivedMatrix::from_costs(costs, 1, 1).unwrap();
///
/// let evaluator = RouteEvaluator::new(&derived);
/// let route = evaluator.build_route(0, &[0]);
/// assert_eq!(route.cost(), 3 + 4);
///
/// let solution = evaluator.build_solution(vec![vec![0]]);
/// let (cost, violations) = evaluator.evaluate_solution(&solution);
/// assert_eq!(cost, 7);
/// assert!(violations.is_empty());
/// ```
pub struct RouteEvaluator<'a> {
    derived: &'a DerivedMatrix,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator for the given derived matrix.
    pub fn new(derived: &'a DerivedMatrix) -> Self {
        Self { derived }
    }

    /// Cost of serving `requests` in order with truck `truck`.
    pub fn route_cost(&self, truck: usize, requests: &[usize]) -> Time {
        route_cost(requests, self.derived.depot_node(truck), self.derived)
    }

    /// Builds a costed route for truck `truck`.
    pub fn build_route(&self, truck: usize, requests: &[usize]) -> Route {
        Route::with_requests(truck, requests.to_vec(), self.route_cost(truck, requests))
    }

    /// Builds a solution from one request sequence per truck, in truck order.
    pub fn build_solution(&self, sequences: Vec<Vec<usize>>) -> Solution {
        let mut solution = Solution::new();
        let mut total = 0;
        for (truck, requests) in sequences.into_iter().enumerate() {
            let cost = self.route_cost(truck, &requests);
            total += cost;
            solution.add_route(Route::with_requests(truck, requests, cost));
        }
        solution.set_total_cost(total);
        solution
    }

    /// Evaluates a solution, returning `(cost, violations)`.
    ///
    /// The cost is recomputed from the matrix; routes that reference unknown
    /// trucks or requests contribute nothing to it. A valid solution has one
    /// route per truck and serves every request exactly once.
    pub fn evaluate_solution(&self, solution: &Solution) -> (Time, Vec<Violation>) {
        let num_requests = self.derived.num_requests();
        let num_trucks = self.derived.num_trucks();
        let mut served = vec![0usize; num_requests];
        let mut routes_per_truck = vec![0usize; num_trucks];
        let mut violations = Vec::new();
        let mut total = 0;

        for (idx, route) in solution.routes().iter().enumerate() {
            let truck = route.truck();
            let mut valid = true;
            if truck < num_trucks {
                routes_per_truck[truck] += 1;
            } else {
                violations.push(Violation::new(ViolationType::UnknownTruck {
                    route_index: idx,
                    truck,
                }));
                valid = false;
            }

            for &request in route.requests() {
                if request < num_requests {
                    served[request] += 1;
                } else {
                    violations.push(Violation::new(ViolationType::UnknownRequest {
                        route_index: idx,
                        request,
                    }));
                    valid = false;
                }
            }

            if valid {
                total += self.route_cost(truck, route.requests());
            }
        }

        for (request, &count) in served.iter().enumerate() {
            match count {
                1 => {}
                0 => violations.push(Violation::new(ViolationType::MissingRequest { request })),
                _ => violations.push(Violation::new(ViolationType::DuplicateRequest {
                    request,
                    count,
                })),
            }
        }

        for (truck, &count) in routes_per_truck.iter().enumerate() {
            if count != 1 {
                violations.push(Violation::new(ViolationType::RouteCount { truck, count }));
            }
        }

        (total, violations)
    }
}
