//! Transit journey planner.
//!
//! Answers: "Leaving this stop at this time, what is the earliest I can reach
//! that stop, and how, for each number of trips and walks?"
//!
//! The planner reads timetable data through the traits in [`provider`], so
//! it works against any data source. [`network::Network`] is an in-memory
//! implementation of all of them.

pub mod domain;
pub mod dto;
pub mod network;
pub mod planner;
pub mod provider;
