//! Truck fleet and trailer depot.

use serde::{Deserialize, Serialize};

use crate::distance::Time;

/// Truck depots plus the single trailer depot.
///
/// Every entry of `truck_depots` is one truck; several trucks may share a
/// location.
///
/// # Examples
///
/// ```
/// use u_drayage::models::Fleet;
///
/// let fleet = Fleet::new(0, 5).with_trucks([2, 2, 3]);
/// assert_eq!(fleet.num_trucks(), 3);
/// assert_eq!(fleet.truck_depot(1), 2);
/// assert_eq!(fleet.trailer_handling_time(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fleet {
    trailer_depot: usize,
    trailer_handling_time: Time,
    truck_depots: Vec<usize>,
}

impl Fleet {
    /// Creates a fleet with no trucks.
    pub fn new(trailer_depot: usize, trailer_handling_time: Time) -> Self {
        Self {
            trailer_depot,
            trailer_handling_time,
            truck_depots: Vec::new(),
        }
    }

    /// Adds one truck based at `depot`.
    pub fn with_truck(mut self, depot: usize) -> Self {
        self.truck_depots.push(depot);
        self
    }

    /// Adds one truck per depot location.
    pub fn with_trucks(mut self, depots: impl IntoIterator<Item = usize>) -> Self {
        self.truck_depots.extend(depots);
        self
    }

    /// Location with unlimited trailer stock.
    pub fn trailer_depot(&self) -> usize {
        self.trailer_depot
    }

    /// Time to hook or unhook a trailer.
    pub fn trailer_handling_time(&self) -> Time {
        self.trailer_handling_time
    }

    /// Depot location of each truck, in input order.
    pub fn truck_depots(&self) -> &[usize] {
        &self.truck_depots
    }

    /// Depot location of truck `truck`.
    pub fn truck_depot(&self, truck: usize) -> usize {
        self.truck_depots[truck]
    }

    /// Number of trucks.
    pub fn num_trucks(&self) -> usize {
        self.truck_depots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fleet_empty() {
        let fleet = Fleet::new(1, 0);
        assert_eq!(fleet.num_trucks(), 0);
        assert_eq!(fleet.trailer_depot(), 1);
    }

    #[test]
    fn test_fleet_keeps_duplicate_depots() {
        let fleet = Fleet::new(0, 3).with_truck(4).with_truck(4);
        assert_eq!(fleet.truck_depots(), &[4, 4]);
    }
}
