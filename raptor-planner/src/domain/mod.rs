//! Domain types for the journey planner.
//!
//! This module contains the transit data model: stops, routes, trips and
//! their stop-times, and the legs and journeys the planner produces. Types
//! with invariants enforce them at construction time.

mod error;
mod journey;
mod leg;
mod stop;
mod time;
mod trip;

pub use error::DomainError;
pub use journey::Journey;
pub use leg::{Leg, TimetableLeg, TransferLeg};
pub use stop::{Route, Stop};
pub use time::ArrivalTime;
pub use trip::{StopTime, Trip};
