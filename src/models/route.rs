//! Per-truck job sequences.

use serde::{Deserialize, Serialize};

use crate::distance::Time;

/// An ordered sequence of requests served by one truck.
///
/// The route starts and ends at the truck's depot; the depot is not stored
/// in `requests`.
///
/// # Examples
///
/// ```
/// use u_drayage::models::Route;
///
/// let mut route = Route::new(1);
/// route.push_request(3);
/// route.push_request(0);
/// assert_eq!(route.truck(), 1);
/// assert_eq!(route.requests(), &[3, 0]);
/// assert_eq!(route.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    truck: usize,
    requests: Vec<usize>,
    cost: Time,
}

impl Route {
    /// Creates an empty route for the given truck.
    pub fn new(truck: usize) -> Self {
        Self {
            truck,
            requests: Vec::new(),
            cost: 0,
        }
    }

    /// Creates a route with the given request order and cost.
    pub fn with_requests(truck: usize, requests: Vec<usize>, cost: Time) -> Self {
        Self {
            truck,
            requests,
            cost,
        }
    }

    /// Appends a request to the end of this route.
    pub fn push_request(&mut self, request: usize) {
        self.requests.push(request);
    }

    /// Truck serving this route.
    pub fn truck(&self) -> usize {
        self.truck
    }

    /// Request indices in service order.
    pub fn requests(&self) -> &[usize] {
        &self.requests
    }

    /// Number of requests served.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Returns `true` if the truck serves nothing.
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Route cost read from the derived matrix (set by the evaluator).
    pub fn cost(&self) -> Time {
        self.cost
    }

    /// Sets the route cost.
    pub fn set_cost(&mut self, cost: Time) {
        self.cost = cost;
    }
}
