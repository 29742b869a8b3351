//! Container sizes and transportation requests.

use serde::{Deserialize, Serialize};

use crate::distance::Time;

/// Container length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerSize {
    /// 20-ft container.
    TwentyFt,
    /// 40-ft container.
    FortyFt,
}

impl ContainerSize {
    /// Maps a length in feet (20 or 40) to a container size.
    pub fn from_feet(feet: u32) -> Option<Self> {
        match feet {
            20 => Some(Self::TwentyFt),
            40 => Some(Self::FortyFt),
            _ => None,
        }
    }

    /// Length in feet.
    pub fn feet(&self) -> u32 {
        match self {
            Self::TwentyFt => 20,
            Self::FortyFt => 40,
        }
    }
}

/// A container move from a pickup location to a drop location.
///
/// The trailer flags say whether the truck must arrive at the pickup with a
/// trailer coupled and whether it leaves the drop still carrying one. The
/// handling durations are informational: they feed the working-time
/// schedule but never the reduced matrix.
///
/// # Examples
///
/// ```
/// use u_drayage::models::{ContainerSize, Request};
///
/// let r = Request::new(7, ContainerSize::FortyFt, 1, 4)
///     .with_drop_trailer(true)
///     .with_durations(10, 15);
/// assert_eq!(r.id(), 7);
/// assert!(!r.pickup_requires_trailer());
/// assert!(r.drop_requires_trailer());
/// assert_eq!(r.drop_duration(), 15);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    id: usize,
    size: ContainerSize,
    pickup: usize,
    drop: usize,
    pickup_requires_trailer: bool,
    drop_requires_trailer: bool,
    pickup_duration: Time,
    drop_duration: Time,
}

impl Request {
    /// Creates a request without trailer handling and zero durations.
    pub fn new(id: usize, size: ContainerSize, pickup: usize, drop: usize) -> Self {
        Self {
            id,
            size,
            pickup,
            drop,
            pickup_requires_trailer: false,
            drop_requires_trailer: false,
            pickup_duration: 0,
            drop_duration: 0,
        }
    }

    /// Sets whether the pickup needs a coupled trailer.
    pub fn with_pickup_trailer(mut self, required: bool) -> Self {
        self.pickup_requires_trailer = required;
        self
    }

    /// Sets whether the drop leaves the trailer coupled.
    pub fn with_drop_trailer(mut self, required: bool) -> Self {
        self.drop_requires_trailer = required;
        self
    }

    /// Sets pickup and drop handling durations.
    pub fn with_durations(mut self, pickup: Time, drop: Time) -> Self {
        self.pickup_duration = pickup;
        self.drop_duration = drop;
        self
    }

    /// External request id.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Container size.
    pub fn size(&self) -> ContainerSize {
        self.size
    }

    /// Pickup location (0-based).
    pub fn pickup(&self) -> usize {
        self.pickup
    }

    /// Drop location (0-based).
    pub fn drop_location(&self) -> usize {
        self.drop
    }

    /// Whether the pickup needs a trailer.
    pub fn pickup_requires_trailer(&self) -> bool {
        self.pickup_requires_trailer
    }

    /// Whether the drop leaves a trailer coupled.
    pub fn drop_requires_trailer(&self) -> bool {
        self.drop_requires_trailer
    }

    /// Time spent handling the container at the pickup.
    pub fn pickup_duration(&self) -> Time {
        self.pickup_duration
    }

    /// Time spent handling the container at the drop.
    pub fn drop_duration(&self) -> Time {
        self.drop_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_size_from_feet() {
        assert_eq!(ContainerSize::from_feet(20), Some(ContainerSize::TwentyFt));
        assert_eq!(ContainerSize::from_feet(40), Some(ContainerSize::FortyFt));
        assert_eq!(ContainerSize::from_feet(30), None);
        assert_eq!(ContainerSize::FortyFt.feet(), 40);
    }

    #[test]
    fn test_request_defaults() {
        let r = Request::new(1, ContainerSize::TwentyFt, 0, 2);
        assert_eq!(r.pickup(), 0);
        assert_eq!(r.drop_location(), 2);
        assert!(!r.pickup_requires_trailer());
        assert!(!r.drop_requires_trailer());
        assert_eq!(r.pickup_duration(), 0);
        assert_eq!(r.drop_duration(), 0);
    }

    #[test]
    fn test_request_builder() {
        let r = Request::new(3, ContainerSize::FortyFt, 1, 1)
            .with_pickup_trailer(true)
            .with_durations(5, 6);
        assert_eq!(r.size(), ContainerSize::FortyFt);
        assert!(r.pickup_requires_trailer());
        assert!(!r.drop_requires_trailer());
        assert_eq!(r.pickup_duration(), 5);
    }
}
