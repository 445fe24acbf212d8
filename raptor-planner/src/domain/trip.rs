//! Scheduled trips and their stop-times.
//!
//! A `Trip` is one vehicle run along a route. Its stop-times line up
//! one-to-one with the route's stop path, so position `i` of the trip is
//! position `i` of the route.

use chrono::NaiveDateTime;

/// Scheduled arrival and departure of a trip at one stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopTime<S> {
    /// The stop served
    pub stop: S,
    /// Scheduled arrival
    pub arrival: NaiveDateTime,
    /// Scheduled departure
    pub departure: NaiveDateTime,
}

impl<S> StopTime<S> {
    /// Creates a stop-time.
    pub fn new(stop: S, arrival: NaiveDateTime, departure: NaiveDateTime) -> Self {
        Self {
            stop,
            arrival,
            departure,
        }
    }

    /// Creates a stop-time where the vehicle arrives and departs at once.
    pub fn at(stop: S, time: NaiveDateTime) -> Self {
        Self::new(stop, time, time)
    }
}

/// A single scheduled run of a route.
///
/// Planners hand trips around as `Arc<Trip<S>>`; the ledger and the
/// resulting legs all point at the same allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip<S> {
    /// Trip identifier, unique within a network
    pub id: String,
    /// Stop-times in route path order
    pub stop_times: Vec<StopTime<S>>,
}

impl<S> Trip<S> {
    /// Creates a trip.
    pub fn new(id: impl Into<String>, stop_times: Vec<StopTime<S>>) -> Self {
        Self {
            id: id.into(),
            stop_times,
        }
    }

    /// Returns the stop-time at a path position.
    pub fn stop_time(&self, index: usize) -> Option<&StopTime<S>> {
        self.stop_times.get(index)
    }

    /// Returns the scheduled arrival at a path position.
    pub fn arrival_at(&self, index: usize) -> Option<NaiveDateTime> {
        self.stop_times.get(index).map(|st| st.arrival)
    }

    /// Returns the scheduled departure at a path position.
    pub fn departure_at(&self, index: usize) -> Option<NaiveDateTime> {
        self.stop_times.get(index).map(|st| st.departure)
    }

    /// Returns the number of stop-times.
    pub fn len(&self) -> usize {
        self.stop_times.len()
    }

    /// Returns true if the trip has no stop-times.
    pub fn is_empty(&self) -> bool {
        self.stop_times.is_empty()
    }
}
