//! Journey types.
//!
//! A `Journey` is a chronologically ordered sequence of legs from the query
//! origin to the query destination, together with the arrival time the
//! planner computed for it.

use std::fmt::Debug;

use chrono::{Duration, NaiveDateTime};

use super::{DomainError, Leg, TimetableLeg, TransferLeg};

/// A complete journey from origin to destination.
///
/// # Invariants
///
/// - Consecutive legs connect (destination of one = origin of next)
/// - `origin` is the first leg's origin and `destination` the last leg's
///   destination
/// - Only the trivial journey (origin equals destination) has no legs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Journey<S> {
    origin: S,
    destination: S,
    legs: Vec<Leg<S>>,
    arrival: NaiveDateTime,
}

impl<S: Clone + PartialEq + Debug> Journey<S> {
    /// Constructs a journey from legs in chronological order.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the legs are empty or don't connect.
    ///
    /// # Examples
    ///
    /// ```
    /// use raptor_planner::domain::{Journey, Leg, TransferLeg};
    /// use chrono::{Duration, NaiveDate};
    ///
    /// let arrival = NaiveDate::from_ymd_opt(2019, 8, 27)
    ///     .unwrap()
    ///     .and_hms_opt(8, 5, 0)
    ///     .unwrap();
    /// let walk = TransferLeg::new("B", "D", Duration::minutes(5), 350);
    ///
    /// let journey = Journey::new(vec![Leg::Transfer(walk)], arrival).unwrap();
    /// assert_eq!(*journey.origin(), "B");
    /// assert_eq!(*journey.destination(), "D");
    /// assert_eq!(journey.leg_count(), 1);
    /// ```
    pub fn new(legs: Vec<Leg<S>>, arrival: NaiveDateTime) -> Result<Self, DomainError> {
        let (first, last) = match (legs.first(), legs.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(DomainError::EmptyJourney),
        };

        for window in legs.windows(2) {
            let prev_dest = window[0].destination();
            let next_origin = window[1].origin();
            if prev_dest != next_origin {
                return Err(DomainError::LegsNotConnected {
                    from: format!("{prev_dest:?}"),
                    to: format!("{next_origin:?}"),
                });
            }
        }

        Ok(Journey {
            origin: first.origin().clone(),
            destination: last.destination().clone(),
            legs,
            arrival,
        })
    }

    /// The journey that stays at `stop`: no legs, arriving at `at`.
    pub fn trivial(stop: S, at: NaiveDateTime) -> Self {
        Journey {
            origin: stop.clone(),
            destination: stop,
            legs: Vec::new(),
            arrival: at,
        }
    }
}

impl<S> Journey<S> {
    /// Returns the origin stop.
    pub fn origin(&self) -> &S {
        &self.origin
    }

    /// Returns the destination stop.
    pub fn destination(&self) -> &S {
        &self.destination
    }

    /// Returns all legs in order.
    pub fn legs(&self) -> &[Leg<S>] {
        &self.legs
    }

    /// Returns the number of legs.
    ///
    /// Every leg consumes one planner round, so this is also the round count
    /// that produced the journey.
    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }

    /// Returns true if this journey has no legs.
    pub fn is_trivial(&self) -> bool {
        self.legs.is_empty()
    }

    /// Returns all trip rides in order.
    pub fn rides(&self) -> impl Iterator<Item = &TimetableLeg<S>> {
        self.legs.iter().filter_map(|l| l.as_timetable())
    }

    /// Returns all walks in order.
    pub fn walks(&self) -> impl Iterator<Item = &TransferLeg<S>> {
        self.legs.iter().filter_map(|l| l.as_transfer())
    }

    /// Returns the number of trips boarded.
    pub fn ride_count(&self) -> usize {
        self.rides().count()
    }

    /// Returns the arrival time at the destination.
    pub fn arrival_time(&self) -> NaiveDateTime {
        self.arrival
    }

    /// Returns the scheduled departure of the first trip ridden, if any.
    pub fn first_departure(&self) -> Option<NaiveDateTime> {
        self.rides().next().map(|r| r.departure_time())
    }

    /// Returns the total walking time.
    pub fn total_walk_duration(&self) -> Duration {
        self.walks().map(|w| w.duration).sum()
    }

    /// Returns the total walking distance in metres.
    pub fn total_walk_distance(&self) -> u32 {
        self.walks().map(|w| w.distance).sum()
    }
}
