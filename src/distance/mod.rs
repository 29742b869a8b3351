//! Travel-time matrices.
//!
//! Provides the dense location-to-location matrix that every other part of
//! the crate indexes into.

mod matrix;

pub use matrix::TravelTimeMatrix;

/// Travel time, handling time and route cost unit.
pub type Time = i64;

/// Largest accepted travel, handling or duration time.
///
/// Every derived edge sums at most three inputs, and a route sums at most a
/// few million edges, so costs built from bounded inputs stay far below
/// `Time::MAX`.
pub const MAX_TIME: Time = 1 << 40;
