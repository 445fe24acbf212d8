//! Round-based earliest-arrival journey planner.
//!
//! This module answers: "Leaving this stop at this time, how can I reach
//! that stop, and what is the earliest arrival for each number of trips and
//! transfers?"
//!
//! Each round extends every journey found so far by one more trip or walk.
//! An arrival table keeps the best arrival per stop and round, and a ledger
//! records how each improvement was made so journeys can be rebuilt
//! afterwards.

mod arrivals;
mod config;
mod frontier;
mod ledger;
mod rank;
mod raptor;
mod reconstruct;
mod scan;
mod state;
mod transfers;

#[cfg(test)]
mod raptor_tests;

pub use arrivals::ArrivalTable;
pub use config::RaptorConfig;
pub use ledger::{ConnectionLedger, ParentLink};
pub use rank::{deduplicate, rank_journeys, remove_dominated};
pub use raptor::{PlanError, PlanResult, Raptor};
pub use state::RoundState;
