//! Trailer-aware reduction to a multi-depot VRP matrix.
//!
//! # Algorithm
//!
//! Every request and every truck becomes a virtual node. The cost of an
//! edge is the raw travel time between the end of one node and the start of
//! the next, detoured through the trailer depot whenever the truck's
//! trailer state has to change in between:
//!
//! ```text
//! request i → request j   d(drop_i, pickup_j)                     same trailer state
//!                         d(drop_i, T) + d(T, pickup_j) [+ h]     state differs, +h iff drop_i has a trailer
//! depot k  → request i    d(k, pickup_i)                          no trailer at pickup
//!                         d(k, T) + h + d(T, pickup_i)            trailer at pickup
//! request i → depot k     d(drop_i, k)                            no trailer at drop
//!                         d(drop_i, T) + h + d(T, k)              trailer at drop
//! depot k  → depot l      d(k, l)
//! ```
//!
//! where `T` is the trailer depot and `h` the trailer handling time.
//!
//! # Complexity
//!
//! O((R + D)²) for R requests and D trucks.

use tracing::debug;

use super::DerivedMatrix;
use crate::distance::{Time, TravelTimeMatrix};
use crate::models::{Problem, Request};

/// Reduces a drayage problem to a derived matrix over virtual nodes.
///
/// Rows and columns `0..R` are the requests in input order, `R..R+D` the
/// trucks in fleet order. The function is pure and total: a [`Problem`]
/// only exists once its indices have been validated.
///
/// # Examples
///
/// ```
/// use u_drayage::distance::TravelTimeMatrix;
/// use u_drayage::models::{ContainerSize, Fleet, Problem, Request};
/// use u_drayage::reduction::reduce;
///
/// let mut distances = TravelTimeMatrix::new(3);
/// distances.set(1, 0, 3);
/// distances.set(0, 2, 4);
/// distances.set(2, 1, 7);
///
/// let fleet = Fleet::new(0, 5).with_truck(2);
/// let request = Request::new(0, ContainerSize::TwentyFt, 1, 1).with_drop_trailer(true);
/// let problem = Problem::new(distances, fleet, vec![request]).unwrap();
///
/// let derived = reduce(&problem);
/// let depot = derived.depot_node(0);
/// assert_eq!(derived.get(depot, 0), 7);
/// assert_eq!(derived.get(0, depot), 3 + 5 + 4);
/// ```
pub fn reduce(problem: &Problem) -> DerivedMatrix {
    let requests = problem.requests();
    let depots = problem.fleet().truck_depots();
    let num_requests = requests.len();
    let num_trucks = depots.len();

    debug!(
        requests = num_requests,
        trucks = num_trucks,
        locations = problem.num_locations(),
        "reducing drayage problem"
    );

    let legs = Legs {
        distances: problem.distances(),
        trailer_depot: problem.fleet().trailer_depot(),
        handling_time: problem.fleet().trailer_handling_time(),
    };
    let mut costs = TravelTimeMatrix::new(num_requests + num_trucks);

    for (i, from) in requests.iter().enumerate() {
        for (j, to) in requests.iter().enumerate() {
            if i != j {
                costs.set(i, j, legs.between_requests(from, to));
            }
        }
    }

    for (truck, &depot) in depots.iter().enumerate() {
        let node = num_requests + truck;
        for (i, request) in requests.iter().enumerate() {
            costs.set(node, i, legs.from_depot(depot, request));
            costs.set(i, node, legs.to_depot(request, depot));
        }
        for (other, &other_depot) in depots.iter().enumerate() {
            costs.set(node, num_requests + other, legs.travel(depot, other_depot));
        }
    }

    debug!(dimension = costs.size(), "reduction finished");
    DerivedMatrix::new(costs, num_requests, num_trucks)
}

/// Edge-weight rules over the raw travel-time matrix.
struct Legs<'a> {
    distances: &'a TravelTimeMatrix,
    trailer_depot: usize,
    handling_time: Time,
}

impl Legs<'_> {
    fn travel(&self, from: usize, to: usize) -> Time {
        self.distances.get(from, to)
    }

    fn via_trailer_depot(&self, from: usize, to: usize) -> Time {
        self.travel(from, self.trailer_depot) + self.travel(self.trailer_depot, to)
    }

    fn between_requests(&self, from: &Request, to: &Request) -> Time {
        if from.drop_requires_trailer() == to.pickup_requires_trailer() {
            return self.travel(from.drop_location(), to.pickup());
        }

        // Handling is charged only when the earlier request leaves a trailer to unhook.
        let detour = self.via_trailer_depot(from.drop_location(), to.pickup());
        if from.drop_requires_trailer() {
            detour + self.handling_time
        } else {
            detour
        }
    }

    fn from_depot(&self, depot: usize, to: &Request) -> Time {
        if to.pickup_requires_trailer() {
            self.via_trailer_depot(depot, to.pickup()) + self.handling_time
        } else {
            self.travel(depot, to.pickup())
        }
    }

    fn to_depot(&self, from: &Request, depot: usize) -> Time {
        if from.drop_requires_trailer() {
            self.via_trailer_depot(from.drop_location(), depot) + self.handling_time
        } else {
            self.travel(from.drop_location(), depot)
        }
    }
}
