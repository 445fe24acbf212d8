//! Network construction errors.

/// Errors from building an in-memory network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    /// A route was added twice
    #[error("route {0} already exists")]
    DuplicateRoute(String),

    /// A route has no stops
    #[error("route {0} has an empty stop path")]
    EmptyRoute(String),

    /// A trip was added to a route that doesn't exist
    #[error("unknown route {0}")]
    UnknownRoute(String),

    /// Trip stop-times don't line up with the route path
    #[error("trip {trip} has {actual} stop-times but its route has {expected} stops")]
    TripLengthMismatch {
        trip: String,
        expected: usize,
        actual: usize,
    },

    /// A stop-time names a different stop than the route path
    #[error("trip {trip} serves {actual} at position {index} but its route expects {expected}")]
    TripStopMismatch {
        trip: String,
        index: usize,
        expected: String,
        actual: String,
    },

    /// A walk would arrive before it leaves
    #[error("walk from {from} to {to} has a negative duration")]
    NegativeTransfer { from: String, to: String },
}
