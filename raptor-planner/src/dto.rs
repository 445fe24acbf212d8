//! Serializable views of planner results.
//!
//! The domain types carry `Arc`s and generic stops; these flatten a journey
//! into strings and minutes for printing as JSON.

use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::{Journey, Leg, StopTime, TimetableLeg, TransferLeg};
use crate::planner::PlanResult;

/// A journey option.
#[derive(Debug, Serialize)]
pub struct JourneyResult {
    /// Journey legs
    pub legs: Vec<LegResult>,

    /// Departure of the first trip ridden, if any
    pub departure_time: Option<String>,

    /// Arrival time at destination
    pub arrival_time: String,

    /// Number of trips ridden
    pub rides: usize,

    /// Total walking distance in metres
    pub walk_distance_m: u32,
}

/// A leg of a journey.
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum LegResult {
    Ride(RideResult),
    Walk(WalkResult),
}

/// A scheduled trip ridden between two stops.
#[derive(Debug, Serialize)]
pub struct RideResult {
    /// Trip identifier
    pub trip: String,

    /// Boarding stop
    pub origin: StopInfo,

    /// Alighting stop
    pub destination: StopInfo,

    /// Intermediate stops
    pub stops: Vec<StopInfo>,
}

/// A walking transfer.
#[derive(Debug, Serialize)]
pub struct WalkResult {
    /// From stop
    pub from: String,

    /// To stop
    pub to: String,

    /// Duration in minutes
    pub duration_mins: i64,

    /// Distance in metres
    pub distance_m: u32,
}

/// A stop with the time the trip is there.
#[derive(Debug, Serialize)]
pub struct StopInfo {
    /// Stop name
    pub name: String,

    /// Time at this stop
    pub time: String,
}

/// Response for journey planning.
#[derive(Debug, Serialize)]
pub struct PlanResponse {
    /// Found journey options
    pub journeys: Vec<JourneyResult>,

    /// Number of rounds run
    pub rounds: usize,

    /// Number of route scans performed
    pub routes_scanned: usize,
}

impl PlanResponse {
    /// Create from a planner result.
    pub fn from_result<S: Display>(result: &PlanResult<S>) -> Self {
        Self {
            journeys: result.journeys.iter().map(JourneyResult::from_journey).collect(),
            rounds: result.rounds,
            routes_scanned: result.routes_scanned,
        }
    }
}

impl JourneyResult {
    /// Create from a domain Journey.
    pub fn from_journey<S: Display>(journey: &Journey<S>) -> Self {
        Self {
            legs: journey.legs().iter().map(LegResult::from_leg).collect(),
            departure_time: journey.first_departure().map(|t| format_time(&t)),
            arrival_time: format_time(&journey.arrival_time()),
            rides: journey.ride_count(),
            walk_distance_m: journey.total_walk_distance(),
        }
    }
}

impl LegResult {
    /// Create from a domain Leg.
    pub fn from_leg<S: Display>(leg: &Leg<S>) -> Self {
        match leg {
            Leg::Timetable(ride) => LegResult::Ride(RideResult::from_ride(ride)),
            Leg::Transfer(walk) => LegResult::Walk(WalkResult::from_walk(walk)),
        }
    }
}

impl RideResult {
    /// Create from a timetable leg.
    pub fn from_ride<S: Display>(ride: &TimetableLeg<S>) -> Self {
        let stop_times = ride.stop_times();
        // Exclude board and alight.
        let stops = match stop_times {
            [_, middle @ .., _] => middle.iter().map(|st| stop_info(st, st.arrival)).collect(),
            _ => Vec::new(),
        };

        Self {
            trip: ride.trip().id.clone(),
            origin: StopInfo {
                name: ride.origin().to_string(),
                time: format_time(&ride.departure_time()),
            },
            destination: StopInfo {
                name: ride.destination().to_string(),
                time: format_time(&ride.arrival_time()),
            },
            stops,
        }
    }
}

impl WalkResult {
    /// Create from a transfer leg.
    pub fn from_walk<S: Display>(walk: &TransferLeg<S>) -> Self {
        Self {
            from: walk.origin.to_string(),
            to: walk.destination.to_string(),
            duration_mins: walk.duration.num_minutes(),
            distance_m: walk.distance,
        }
    }
}

fn stop_info<S: Display>(stop_time: &StopTime<S>, time: NaiveDateTime) -> StopInfo {
    StopInfo {
        name: stop_time.stop.to_string(),
        time: format_time(&time),
    }
}

/// Format an instant as "HH:MM".
fn format_time(time: &NaiveDateTime) -> String {
    time.format("%H:%M").to_string()
}
