//! Error type shared by parsing, validation and optimization.

use thiserror::Error;

use crate::distance::Time;

/// Errors raised while building or solving a drayage problem.
///
/// The reduction itself never fails: every index and time it reads is
/// checked when the [`Problem`](crate::models::Problem) is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrayageError {
    /// Token type or count mismatch in the input stream.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A location index does not address the travel-time matrix.
    #[error("{role} location {index} is out of range for {size} locations")]
    IndexOutOfRange {
        /// What the index was used for (pickup, drop, truck depot, ...).
        role: &'static str,
        /// The offending 0-based index.
        index: usize,
        /// Number of locations in the matrix.
        size: usize,
    },

    /// Input ended before the `#` request terminator.
    #[error("request list ended before the `#` terminator")]
    IncompleteRequestList,

    /// Two requests share the same id.
    #[error("duplicate request id {0}")]
    DuplicateRequest(usize),

    /// A travel time, handling time or duration is negative.
    #[error("negative {0}")]
    NegativeTime(&'static str),

    /// A travel time, handling time or duration exceeds the accepted bound.
    #[error("{role} exceeds the limit of {limit}")]
    TimeTooLarge {
        /// Which time was too large.
        role: &'static str,
        /// Largest accepted value.
        limit: Time,
    },

    /// Requests exist but there is no truck to serve them.
    #[error("cannot route {requests} requests without trucks")]
    NoTrucks {
        /// Number of requests left unrouted.
        requests: usize,
    },

    /// Exact search refused an instance above its request limit.
    #[error("exact search supports at most {limit} requests, got {requests}")]
    InstanceTooLarge {
        /// Number of requests in the instance.
        requests: usize,
        /// Configured limit.
        limit: usize,
    },

    /// A solver setting is unknown or out of its accepted range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, DrayageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_out_of_range_message() {
        let err = DrayageError::IndexOutOfRange {
            role: "pickup",
            index: 7,
            size: 3,
        };
        assert_eq!(
            err.to_string(),
            "pickup location 7 is out of range for 3 locations"
        );
    }

    #[test]
    fn test_malformed_message() {
        let err = DrayageError::MalformedInput("expected a number".into());
        assert_eq!(err.to_string(), "malformed input: expected a number");
    }
}
