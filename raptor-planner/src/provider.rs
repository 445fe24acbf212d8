//! Timetable lookups consumed by the planner.
//!
//! The planner never owns network data. It asks these providers for stops,
//! route paths, trips and walking transfers, many times per query. All
//! lookups are read-only; answers are assumed to be consistent with each
//! other for the duration of a query.
//!
//! [`crate::network::Network`] implements all four traits.

use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::domain::{TransferLeg, Trip};

/// Stop enumeration and the routes serving each stop.
pub trait StopProvider<S, R> {
    /// All stops in the network.
    fn stops(&self) -> Vec<S>;

    /// Routes whose path contains `stop`.
    fn routes_serving(&self, stop: &S) -> Vec<R>;
}

/// Route stop paths.
pub trait RouteProvider<R, S> {
    /// The ordered stop path of `route`, or `None` for an unknown route.
    fn route_path(&self, route: &R) -> Option<&[S]>;

    /// Position of `stop` within `route`'s path.
    fn stop_index(&self, route: &R, stop: &S) -> Option<usize>;

    /// Whether `a` occurs strictly before `b` on `route`'s path.
    ///
    /// Stops not on the route are never before anything.
    fn is_stop_before(&self, route: &R, a: &S, b: &S) -> bool {
        match (self.stop_index(route, a), self.stop_index(route, b)) {
            (Some(ia), Some(ib)) => ia < ib,
            _ => false,
        }
    }
}

/// Trip lookup by route and path position.
pub trait TripProvider<R, S> {
    /// The earliest trip on `route` whose scheduled departure at path
    /// position `stop_index` is not earlier than `not_before`.
    fn earliest_trip(
        &self,
        route: &R,
        stop_index: usize,
        not_before: NaiveDateTime,
    ) -> Option<Arc<Trip<S>>>;
}

/// Outgoing walking transfers.
pub trait TransferProvider<S> {
    /// Walks starting at `stop` (possibly none).
    fn transfers_from(&self, stop: &S) -> Vec<TransferLeg<S>>;
}
