//! Validated drayage problem.

use std::collections::HashSet;

use serde::Serialize;

use super::{Fleet, Request};
use crate::distance::{Time, TravelTimeMatrix, MAX_TIME};
use crate::error::{DrayageError, Result};

/// A drayage instance: travel times, fleet and ordered request list.
///
/// Construction validates every location index and time, so a `Problem`
/// value is always safe to reduce. It is immutable afterwards; share it
/// behind an `Arc` when several consumers need it.
///
/// # Examples
///
/// ```
/// use u_drayage::distance::TravelTimeMatrix;
/// use u_drayage::models::{ContainerSize, Fleet, Problem, Request};
///
/// let distances = TravelTimeMatrix::new(3);
/// let fleet = Fleet::new(0, 5).with_truck(2);
/// let requests = vec![Request::new(1, ContainerSize::TwentyFt, 1, 2)];
///
/// let problem = Problem::new(distances, fleet, requests).unwrap();
/// assert_eq!(problem.num_requests(), 1);
/// assert_eq!(problem.num_trucks(), 1);
///
/// let bad = Problem::new(
///     TravelTimeMatrix::new(3),
///     Fleet::new(3, 5),
///     vec![],
/// );
/// assert!(bad.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    distances: TravelTimeMatrix,
    fleet: Fleet,
    requests: Vec<Request>,
}

impl Problem {
    /// Validates the parts and assembles a problem.
    ///
    /// # Errors
    ///
    /// - [`DrayageError::IndexOutOfRange`] if the trailer depot, a truck
    ///   depot, or a request location does not address `distances`.
    /// - [`DrayageError::NegativeTime`] for a negative travel time, trailer
    ///   handling time or request duration.
    /// - [`DrayageError::TimeTooLarge`] for any of those above [`MAX_TIME`].
    /// - [`DrayageError::DuplicateRequest`] if two requests share an id.
    pub fn new(distances: TravelTimeMatrix, fleet: Fleet, requests: Vec<Request>) -> Result<Self> {
        if distances.has_negative() {
            return Err(DrayageError::NegativeTime("travel time"));
        }
        if distances.max_value().is_some_and(|t| t > MAX_TIME) {
            return Err(DrayageError::TimeTooLarge {
                role: "travel time",
                limit: MAX_TIME,
            });
        }
        check_time("trailer handling time", fleet.trailer_handling_time())?;

        check_location(&distances, "trailer depot", fleet.trailer_depot())?;
        for &depot in fleet.truck_depots() {
            check_location(&distances, "truck depot", depot)?;
        }

        let mut ids = HashSet::with_capacity(requests.len());
        for request in &requests {
            check_location(&distances, "pickup", request.pickup())?;
            check_location(&distances, "drop", request.drop_location())?;
            check_time("handling duration", request.pickup_duration())?;
            check_time("handling duration", request.drop_duration())?;
            if !ids.insert(request.id()) {
                return Err(DrayageError::DuplicateRequest(request.id()));
            }
        }

        Ok(Self {
            distances,
            fleet,
            requests,
        })
    }

    /// Location-to-location travel times.
    pub fn distances(&self) -> &TravelTimeMatrix {
        &self.distances
    }

    /// Trucks and trailer depot.
    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Requests in input order.
    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    /// Request at position `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.num_requests()`.
    pub fn request(&self, index: usize) -> &Request {
        &self.requests[index]
    }

    /// Request at position `index`, or `None` past the end.
    pub fn get_request(&self, index: usize) -> Option<&Request> {
        self.requests.get(index)
    }

    /// Number of requests.
    pub fn num_requests(&self) -> usize {
        self.requests.len()
    }

    /// Number of trucks.
    pub fn num_trucks(&self) -> usize {
        self.fleet.num_trucks()
    }

    /// Number of locations.
    pub fn num_locations(&self) -> usize {
        self.distances.size()
    }

    /// Time spent inside request `index`: handling at the pickup, the
    /// loaded leg to the drop, and handling at the drop.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.num_requests()`.
    pub fn job_duration(&self, index: usize) -> Time {
        let request = &self.requests[index];
        request.pickup_duration()
            + self
                .distances
                .get(request.pickup(), request.drop_location())
            + request.drop_duration()
    }
}

fn check_time(role: &'static str, time: Time) -> Result<()> {
    if time < 0 {
        Err(DrayageError::NegativeTime(role))
    } else if time > MAX_TIME {
        Err(DrayageError::TimeTooLarge {
            role,
            limit: MAX_TIME,
        })
    } else {
        Ok(())
    }
}

fn check_location(distances: &TravelTimeMatrix, role: &'static str, index: usize) -> Result<()> {
    if distances.contains(index) {
        Ok(())
    } else {
        Err(DrayageError::IndexOutOfRange {
            role,
            index,
            size: distances.size(),
        })
    }
}
