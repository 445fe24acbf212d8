//! Route scan phase.
//!
//! Each round scans every route that serves a stop marked in the previous
//! round, starting at the earliest marked stop on that route. While walking
//! the route the scan holds at most one trip, and only looks up a new one
//! where the previous round's arrival could catch something earlier.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use tracing::trace;

use crate::domain::{ArrivalTime, Trip};
use crate::provider::{RouteProvider, StopProvider, TripProvider};

use super::frontier::Frontier;
use super::ledger::ParentLink;
use super::raptor::PlanError;
use super::state::RoundState;

/// The trip currently ridden during a route scan.
#[derive(Debug, Clone)]
struct HeldTrip<S> {
    trip: Arc<Trip<S>>,
    board_index: usize,
}

impl<S: Debug> HeldTrip<S> {
    fn arrival_at(&self, index: usize) -> Result<ArrivalTime, PlanError> {
        self.trip
            .arrival_at(index)
            .map(ArrivalTime::At)
            .ok_or_else(|| {
                PlanError::ProviderInconsistency(format!(
                    "trip {} has no stop-time at position {index}",
                    self.trip.id
                ))
            })
    }
}

/// One scan per route, starting from the earliest marked stop on it.
///
/// Routes appear in the order they were first reached from the frontier.
pub(super) fn build_queue<S, R, SP, RP>(
    marked: &Frontier<S>,
    stops: &SP,
    routes: &RP,
) -> Vec<(R, S)>
where
    S: Clone + Eq + Hash,
    R: Clone + Eq + Hash,
    SP: StopProvider<S, R> + ?Sized,
    RP: RouteProvider<R, S> + ?Sized,
{
    let mut queue: Vec<(R, S)> = Vec::new();
    let mut position: HashMap<R, usize> = HashMap::new();

    for stop in marked.iter() {
        for route in stops.routes_serving(stop) {
            match position.get(&route) {
                None => {
                    position.insert(route.clone(), queue.len());
                    queue.push((route, stop.clone()));
                }
                Some(&slot) => {
                    if routes.is_stop_before(&route, stop, &queue[slot].1) {
                        queue[slot].1 = stop.clone();
                    }
                }
            }
        }
    }

    queue
}

/// Scan `route` from `start` to the end of its path in round `k`.
///
/// Stops whose arrival improves are marked in `next`.
pub(super) fn scan_route<S, R, RP, TP>(
    route: &R,
    start: &S,
    k: usize,
    routes: &RP,
    trips: &TP,
    state: &mut RoundState<S>,
    next: &mut Frontier<S>,
) -> Result<(), PlanError>
where
    S: Clone + Eq + Hash + Debug,
    R: Debug,
    RP: RouteProvider<R, S> + ?Sized,
    TP: TripProvider<R, S> + ?Sized,
{
    let path = routes.route_path(route).ok_or_else(|| {
        PlanError::ProviderInconsistency(format!("route {route:?} has no stop path"))
    })?;
    let start_index = routes.stop_index(route, start).ok_or_else(|| {
        PlanError::ProviderInconsistency(format!("stop {start:?} is not on route {route:?}"))
    })?;

    let mut held: Option<HeldTrip<S>> = None;

    for (index, stop) in path.iter().enumerate().skip(start_index) {
        // Ride the held trip to this stop.
        if let Some(ride) = &held {
            let arrival = ride.arrival_at(index)?;
            let link = ParentLink::Board {
                trip: Arc::clone(&ride.trip),
                board_index: ride.board_index,
                alight_index: index,
            };
            if state.relax(k, stop, arrival, link) {
                next.mark(stop.clone());
            }
        }

        // Could last round's arrival here catch an earlier trip?
        let previous = state.arrivals().arrival(k - 1, stop);
        let try_board = match &held {
            None => true,
            Some(ride) => previous.is_before(&ride.arrival_at(index)?),
        };
        if !try_board {
            continue;
        }
        let ArrivalTime::At(ready) = previous else {
            continue;
        };
        if let Some(trip) = trips.earliest_trip(route, index, ready) {
            trace!(
                route = ?route,
                stop = ?stop,
                trip = %trip.id,
                round = k,
                "boarding trip"
            );
            held = Some(HeldTrip {
                trip,
                board_index: index,
            });
        }
    }

    Ok(())
}
