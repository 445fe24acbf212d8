//! Journey legs.
//!
//! A leg is either a ride on a scheduled trip between two of its stops, or a
//! walking transfer between two stops.

use std::sync::Arc;

use chrono::{Duration, NaiveDateTime};

use super::{DomainError, StopTime, Trip};

/// A ride on one trip, from boarding to alighting.
///
/// Uses `Arc<Trip>` so legs and the planner's ledger share the same trip.
///
/// # Invariants
///
/// - `alight_index > board_index` (must travel forward along the trip)
/// - Both indices are valid for the trip's stop-times
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableLeg<S> {
    trip: Arc<Trip<S>>,
    board_index: usize,
    alight_index: usize,
}

impl<S> TimetableLeg<S> {
    /// Construct a leg, validating the indices against the trip.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `alight_index <= board_index` or either index is out
    /// of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use raptor_planner::domain::{StopTime, TimetableLeg, Trip};
    /// use chrono::NaiveDate;
    /// use std::sync::Arc;
    ///
    /// let day = NaiveDate::from_ymd_opt(2019, 8, 27).unwrap();
    /// let trip = Arc::new(Trip::new(
    ///     "T",
    ///     vec![
    ///         StopTime::at("A", day.and_hms_opt(8, 0, 0).unwrap()),
    ///         StopTime::at("B", day.and_hms_opt(8, 10, 0).unwrap()),
    ///     ],
    /// ));
    ///
    /// let leg = TimetableLeg::new(trip.clone(), 0, 1).unwrap();
    /// assert_eq!(*leg.origin(), "A");
    /// assert_eq!(*leg.destination(), "B");
    ///
    /// assert!(TimetableLeg::new(trip, 1, 0).is_err());
    /// ```
    pub fn new(
        trip: Arc<Trip<S>>,
        board_index: usize,
        alight_index: usize,
    ) -> Result<Self, DomainError> {
        if alight_index <= board_index {
            return Err(DomainError::InvalidLeg(
                "alight index must be after board index",
            ));
        }
        if alight_index >= trip.len() {
            return Err(DomainError::InvalidLeg("stop index out of bounds"));
        }

        Ok(Self {
            trip,
            board_index,
            alight_index,
        })
    }

    /// Returns the trip ridden.
    pub fn trip(&self) -> &Arc<Trip<S>> {
        &self.trip
    }

    /// Returns the boarding position.
    pub fn board_index(&self) -> usize {
        self.board_index
    }

    /// Returns the alighting position.
    pub fn alight_index(&self) -> usize {
        self.alight_index
    }

    fn board(&self) -> &StopTime<S> {
        // Safe: validated at construction
        &self.trip.stop_times[self.board_index]
    }

    fn alight(&self) -> &StopTime<S> {
        // Safe: validated at construction
        &self.trip.stop_times[self.alight_index]
    }

    /// Returns the boarding stop.
    pub fn origin(&self) -> &S {
        &self.board().stop
    }

    /// Returns the alighting stop.
    pub fn destination(&self) -> &S {
        &self.alight().stop
    }

    /// Returns the scheduled departure from the boarding stop.
    pub fn departure_time(&self) -> NaiveDateTime {
        self.board().departure
    }

    /// Returns the scheduled arrival at the alighting stop.
    pub fn arrival_time(&self) -> NaiveDateTime {
        self.alight().arrival
    }

    /// Returns the time spent on board.
    pub fn duration(&self) -> Duration {
        self.arrival_time()
            .signed_duration_since(self.departure_time())
    }

    /// Returns the number of intermediate stops (excluding board and alight).
    pub fn intermediate_stop_count(&self) -> usize {
        self.alight_index - self.board_index - 1
    }

    /// Returns the stop-times ridden, board and alight included.
    pub fn stop_times(&self) -> &[StopTime<S>] {
        &self.trip.stop_times[self.board_index..=self.alight_index]
    }
}

/// A directed walking transfer between two stops.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransferLeg<S> {
    /// Stop walked from
    pub origin: S,
    /// Stop walked to
    pub destination: S,
    /// Walking time
    pub duration: Duration,
    /// Walking distance in metres
    pub distance: u32,
}

impl<S> TransferLeg<S> {
    /// Creates a transfer leg.
    pub fn new(origin: S, destination: S, duration: Duration, distance: u32) -> Self {
        Self {
            origin,
            destination,
            duration,
            distance,
        }
    }
}

/// One atomic segment of a journey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leg<S> {
    /// A ride on a scheduled trip
    Timetable(TimetableLeg<S>),
    /// A walk between stops
    Transfer(TransferLeg<S>),
}

impl<S> Leg<S> {
    /// Returns the origin stop of this leg.
    pub fn origin(&self) -> &S {
        match self {
            Leg::Timetable(leg) => leg.origin(),
            Leg::Transfer(leg) => &leg.origin,
        }
    }

    /// Returns the destination stop of this leg.
    pub fn destination(&self) -> &S {
        match self {
            Leg::Timetable(leg) => leg.destination(),
            Leg::Transfer(leg) => &leg.destination,
        }
    }

    /// Returns the duration of this leg.
    pub fn duration(&self) -> Duration {
        match self {
            Leg::Timetable(leg) => leg.duration(),
            Leg::Transfer(leg) => leg.duration,
        }
    }

    /// Returns true if this is a trip ride.
    pub fn is_timetable(&self) -> bool {
        matches!(self, Leg::Timetable(_))
    }

    /// Returns true if this is a walk.
    pub fn is_transfer(&self) -> bool {
        matches!(self, Leg::Transfer(_))
    }

    /// Returns the ride if this is a timetable leg.
    pub fn as_timetable(&self) -> Option<&TimetableLeg<S>> {
        match self {
            Leg::Timetable(leg) => Some(leg),
            Leg::Transfer(_) => None,
        }
    }

    /// Returns the walk if this is a transfer leg.
    pub fn as_transfer(&self) -> Option<&TransferLeg<S>> {
        match self {
            Leg::Timetable(_) => None,
            Leg::Transfer(leg) => Some(leg),
        }
    }
}

impl<S> From<TimetableLeg<S>> for Leg<S> {
    fn from(value: TimetableLeg<S>) -> Self {
        Leg::Timetable(value)
    }
}

impl<S> From<TransferLeg<S>> for Leg<S> {
    fn from(value: TransferLeg<S>) -> Self {
        Leg::Transfer(value)
    }
}
