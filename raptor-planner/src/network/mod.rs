//! In-memory transit network.
//!
//! `Network` holds stops, route paths, trips and walking transfers in plain
//! maps and implements every provider trait, so it can be handed straight
//! to [`crate::planner::Raptor`]. Build one with [`NetworkBuilder`].

mod error;
mod transfers;

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::domain::{Route, Stop, StopTime, TransferLeg, Trip};
use crate::provider::{RouteProvider, StopProvider, TransferProvider, TripProvider};

pub use error::NetworkError;
pub use transfers::TransferTable;

/// One route's path and the trips running along it.
#[derive(Debug, Clone)]
struct RouteEntry<S> {
    path: Vec<S>,
    /// First position of each stop on the path.
    positions: HashMap<S, usize>,
    trips: Vec<Arc<Trip<S>>>,
}

/// A complete timetable held in memory.
///
/// Enumeration order (stops, routes serving a stop) follows insertion
/// order, so planning against the same network is deterministic.
#[derive(Debug, Clone)]
pub struct Network<S, R> {
    stops: Vec<S>,
    routes: HashMap<R, RouteEntry<S>>,
    routes_by_stop: HashMap<S, Vec<R>>,
    transfers: TransferTable<S>,
}

impl<S, R> Network<S, R>
where
    S: Clone + Eq + Hash,
    R: Clone + Eq + Hash,
{
    /// Returns the number of stops.
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Returns the number of routes.
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Returns the number of trips across all routes.
    pub fn trip_count(&self) -> usize {
        self.routes.values().map(|r| r.trips.len()).sum()
    }

    /// Returns the trips of a route, in insertion order.
    pub fn trips(&self, route: &R) -> &[Arc<Trip<S>>] {
        self.routes
            .get(route)
            .map(|r| r.trips.as_slice())
            .unwrap_or(&[])
    }

    /// Returns the walking transfers.
    pub fn transfers(&self) -> &TransferTable<S> {
        &self.transfers
    }
}

impl<S, R> StopProvider<S, R> for Network<S, R>
where
    S: Clone + Eq + Hash,
    R: Clone + Eq + Hash,
{
    fn stops(&self) -> Vec<S> {
        self.stops.clone()
    }

    fn routes_serving(&self, stop: &S) -> Vec<R> {
        self.routes_by_stop.get(stop).cloned().unwrap_or_default()
    }
}

impl<S, R> RouteProvider<R, S> for Network<S, R>
where
    S: Clone + Eq + Hash,
    R: Clone + Eq + Hash,
{
    fn route_path(&self, route: &R) -> Option<&[S]> {
        self.routes.get(route).map(|r| r.path.as_slice())
    }

    fn stop_index(&self, route: &R, stop: &S) -> Option<usize> {
        self.routes.get(route)?.positions.get(stop).copied()
    }
}

impl<S, R> TripProvider<R, S> for Network<S, R>
where
    S: Clone + Eq + Hash,
    R: Clone + Eq + Hash,
{
    fn earliest_trip(
        &self,
        route: &R,
        stop_index: usize,
        not_before: NaiveDateTime,
    ) -> Option<Arc<Trip<S>>> {
        self.routes
            .get(route)?
            .trips
            .iter()
            .filter_map(|trip| {
                let departure = trip.departure_at(stop_index)?;
                (departure >= not_before).then_some((departure, trip))
            })
            .min_by_key(|(departure, _)| *departure)
            .map(|(_, trip)| Arc::clone(trip))
    }
}

impl<S, R> TransferProvider<S> for Network<S, R>
where
    S: Clone + Eq + Hash,
    R: Clone + Eq + Hash,
{
    fn transfers_from(&self, stop: &S) -> Vec<TransferLeg<S>> {
        self.transfers.transfers_from(stop)
    }
}

/// Builder for [`Network`].
///
/// Provides a fluent API; each step validates what it adds.
///
/// # Examples
///
/// ```
/// use raptor_planner::domain::{StopTime, Trip};
/// use raptor_planner::network::NetworkBuilder;
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2019, 8, 27).unwrap();
/// let at = |h, m| day.and_hms_opt(h, m, 0).unwrap();
///
/// let network = NetworkBuilder::new()
///     .route("R", vec!["A", "B"])?
///     .trip(&"R", Trip::new("T", vec![StopTime::at("A", at(8, 0)), StopTime::at("B", at(8, 10))]))?
///     .build();
///
/// assert_eq!(network.stop_count(), 2);
/// assert_eq!(network.trip_count(), 1);
/// # Ok::<(), raptor_planner::network::NetworkError>(())
/// ```
#[derive(Debug)]
pub struct NetworkBuilder<S, R> {
    inner: Network<S, R>,
}

impl<S, R> Default for NetworkBuilder<S, R> {
    fn default() -> Self {
        Self {
            inner: Network {
                stops: Vec::new(),
                routes: HashMap::new(),
                routes_by_stop: HashMap::new(),
                transfers: TransferTable::default(),
            },
        }
    }
}

impl<S, R> NetworkBuilder<S, R>
where
    S: Clone + Eq + Hash + Debug,
    R: Clone + Eq + Hash + Debug,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stop. Stops on route paths and transfers are added implicitly.
    pub fn stop(mut self, stop: S) -> Self {
        self.register_stop(&stop);
        self
    }

    /// Add a route with its ordered stop path.
    pub fn route(mut self, route: R, path: Vec<S>) -> Result<Self, NetworkError> {
        if self.inner.routes.contains_key(&route) {
            return Err(NetworkError::DuplicateRoute(format!("{route:?}")));
        }
        if path.is_empty() {
            return Err(NetworkError::EmptyRoute(format!("{route:?}")));
        }

        let mut positions = HashMap::new();
        for (idx, stop) in path.iter().enumerate() {
            self.register_stop(stop);
            // Loops keep the first occurrence.
            if let Entry::Vacant(slot) = positions.entry(stop.clone()) {
                slot.insert(idx);
                self.inner
                    .routes_by_stop
                    .entry(stop.clone())
                    .or_default()
                    .push(route.clone());
            }
        }

        self.inner.routes.insert(
            route,
            RouteEntry {
                path,
                positions,
                trips: Vec::new(),
            },
        );
        Ok(self)
    }

    /// Add a trip to an existing route.
    ///
    /// The trip's stop-times must name the route's stops in path order.
    pub fn trip(mut self, route: &R, trip: Trip<S>) -> Result<Self, NetworkError> {
        let entry = self
            .inner
            .routes
            .get_mut(route)
            .ok_or_else(|| NetworkError::UnknownRoute(format!("{route:?}")))?;

        if trip.len() != entry.path.len() {
            return Err(NetworkError::TripLengthMismatch {
                trip: trip.id.clone(),
                expected: entry.path.len(),
                actual: trip.len(),
            });
        }

        for (index, (expected, st)) in entry.path.iter().zip(&trip.stop_times).enumerate() {
            if expected != &st.stop {
                return Err(NetworkError::TripStopMismatch {
                    trip: trip.id.clone(),
                    index,
                    expected: format!("{expected:?}"),
                    actual: format!("{:?}", st.stop),
                });
            }
        }

        entry.trips.push(Arc::new(trip));
        Ok(self)
    }

    /// Add a one-way walk.
    ///
    /// Walks must take zero or more time.
    pub fn transfer(mut self, leg: TransferLeg<S>) -> Result<Self, NetworkError> {
        check_walk(&leg.origin, &leg.destination, leg.duration)?;
        self.register_stop(&leg.origin);
        self.register_stop(&leg.destination);
        self.inner.transfers.add(leg);
        Ok(self)
    }

    /// Add a walk usable in both directions.
    pub fn walk(
        mut self,
        a: S,
        b: S,
        duration: Duration,
        distance: u32,
    ) -> Result<Self, NetworkError> {
        check_walk(&a, &b, duration)?;
        self.register_stop(&a);
        self.register_stop(&b);
        self.inner.transfers.add_both_ways(a, b, duration, distance);
        Ok(self)
    }

    /// Build the network.
    pub fn build(self) -> Network<S, R> {
        self.inner
    }

    fn register_stop(&mut self, stop: &S) {
        if !self.inner.stops.contains(stop) {
            self.inner.stops.push(stop.clone());
        }
    }
}

fn check_walk<S: Debug>(from: &S, to: &S, duration: Duration) -> Result<(), NetworkError> {
    if duration < Duration::zero() {
        return Err(NetworkError::NegativeTransfer {
            from: format!("{from:?}"),
            to: format!("{to:?}"),
        });
    }
    Ok(())
}

/// A small sample network used by the command-line demo.
///
/// Stops: Amsterdam, Haarlem, Leiden, Den Haag, Rotterdam, Delft and Schiphol.
/// An intercity runs Amsterdam - Leiden - Den Haag - Rotterdam, a sprinter
/// runs Haarlem - Leiden - Delft - Rotterdam, and a shuttle runs Amsterdam -
/// Schiphol - Leiden. Haarlem and Amsterdam are linked by a (long) walk.
pub fn sample_network(day: NaiveDate) -> Result<Network<Stop, Route>, NetworkError> {
    let ams = Stop::new(1, "Amsterdam");
    let hlm = Stop::new(2, "Haarlem");
    let ldn = Stop::new(3, "Leiden");
    let gvc = Stop::new(4, "Den Haag");
    let rtd = Stop::new(5, "Rotterdam");
    let dt = Stop::new(6, "Delft");
    let shl = Stop::new(7, "Schiphol");

    let intercity = Route::new(1, "Intercity");
    let sprinter = Route::new(2, "Sprinter");
    let shuttle = Route::new(3, "Shuttle");

    let at = |hour: u32, minute: u32| day.and_hms_opt(hour, minute, 0).unwrap_or_default();

    let mut builder = NetworkBuilder::new()
        .route(
            intercity.clone(),
            vec![ams.clone(), ldn.clone(), gvc.clone(), rtd.clone()],
        )?
        .route(
            sprinter.clone(),
            vec![hlm.clone(), ldn.clone(), dt.clone(), rtd.clone()],
        )?
        .route(shuttle.clone(), vec![ams.clone(), shl.clone(), ldn.clone()])?
        .walk(ams.clone(), hlm.clone(), Duration::minutes(90), 7200)?;

    for (n, hour) in (7..=9).enumerate() {
        builder = builder
            .trip(
                &intercity,
                Trip::new(
                    format!("IC{}", n + 1),
                    vec![
                        StopTime::at(ams.clone(), at(hour, 0)),
                        StopTime::new(ldn.clone(), at(hour, 34), at(hour, 36)),
                        StopTime::new(gvc.clone(), at(hour, 50), at(hour, 52)),
                        StopTime::at(rtd.clone(), at(hour + 1, 15)),
                    ],
                ),
            )?
            .trip(
                &sprinter,
                Trip::new(
                    format!("SPR{}", n + 1),
                    vec![
                        StopTime::at(hlm.clone(), at(hour, 10)),
                        StopTime::new(ldn.clone(), at(hour, 40), at(hour, 41)),
                        StopTime::new(dt.clone(), at(hour, 58), at(hour, 59)),
                        StopTime::at(rtd.clone(), at(hour + 1, 12)),
                    ],
                ),
            )?
            .trip(
                &shuttle,
                Trip::new(
                    format!("SH{}", n + 1),
                    vec![
                        StopTime::at(ams.clone(), at(hour, 5)),
                        StopTime::new(shl.clone(), at(hour, 20), at(hour, 22)),
                        StopTime::at(ldn.clone(), at(hour, 38)),
                    ],
                ),
            )?;
    }

    Ok(builder.build())
}
