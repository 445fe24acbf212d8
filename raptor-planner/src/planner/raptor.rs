//! The round-based planner.
//!
//! Round `k` finds every stop reachable with at most `k` trips and transfers
//! combined. Each round scans the routes serving the stops improved in the
//! previous round, then relaxes walking transfers out of those same stops.
//! Rounds stop once nothing improves.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::domain::{DomainError, Journey};
use crate::provider::{RouteProvider, StopProvider, TransferProvider, TripProvider};

use super::config::RaptorConfig;
use super::frontier::Frontier;
use super::reconstruct;
use super::scan::{build_queue, scan_route};
use super::state::RoundState;
use super::transfers::relax_transfers;

/// Error from journey planning.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// No stop with the requested display name
    #[error("no stop named {0:?}")]
    StopNotFound(String),

    /// Providers gave contradictory answers
    #[error("provider inconsistency: {0}")]
    ProviderInconsistency(String),

    /// A reconstructed journey was malformed
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Journeys plus some bookkeeping about the search that found them.
#[derive(Debug, Clone)]
pub struct PlanResult<S> {
    /// One journey per round that improved the destination, fewest rounds
    /// first.
    pub journeys: Vec<Journey<S>>,

    /// Number of rounds run.
    pub rounds: usize,

    /// Number of route scans performed.
    pub routes_scanned: usize,
}

impl<S> PlanResult<S> {
    /// A result with no journeys and no work done.
    pub fn empty() -> Self {
        Self {
            journeys: Vec::new(),
            rounds: 0,
            routes_scanned: 0,
        }
    }
}

/// Earliest-arrival planner over four providers.
///
/// The planner only borrows its providers; every call builds fresh tables,
/// so one planner can answer any number of queries.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use raptor_planner::network::sample_network;
/// use raptor_planner::planner::Raptor;
///
/// let day = NaiveDate::from_ymd_opt(2019, 8, 27).unwrap();
/// let network = sample_network(day).unwrap();
/// let planner = Raptor::new(&network, &network, &network, &network);
///
/// let journeys = planner
///     .plan_by_name("Amsterdam", "Leiden", day.and_hms_opt(7, 0, 0).unwrap())
///     .unwrap();
/// assert!(!journeys.is_empty());
/// ```
pub struct Raptor<'a, SP: ?Sized, RP: ?Sized, TP: ?Sized, XP: ?Sized> {
    stops: &'a SP,
    routes: &'a RP,
    trips: &'a TP,
    transfers: &'a XP,
    config: RaptorConfig,
}

impl<'a, SP: ?Sized, RP: ?Sized, TP: ?Sized, XP: ?Sized> Raptor<'a, SP, RP, TP, XP> {
    /// Create a planner with the default configuration.
    pub fn new(stops: &'a SP, routes: &'a RP, trips: &'a TP, transfers: &'a XP) -> Self {
        Self::with_config(stops, routes, trips, transfers, RaptorConfig::default())
    }

    /// Create a planner with an explicit configuration.
    pub fn with_config(
        stops: &'a SP,
        routes: &'a RP,
        trips: &'a TP,
        transfers: &'a XP,
        config: RaptorConfig,
    ) -> Self {
        Self {
            stops,
            routes,
            trips,
            transfers,
            config,
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &RaptorConfig {
        &self.config
    }

    /// Plan journeys from `origin` to `destination` leaving at `departure`.
    ///
    /// Returns one journey per round that improved the destination. An
    /// unreachable destination gives an empty list; planning from a stop to
    /// itself gives a single journey with no legs.
    pub fn plan<S, R>(
        &self,
        origin: &S,
        destination: &S,
        departure: NaiveDateTime,
    ) -> Result<Vec<Journey<S>>, PlanError>
    where
        S: Clone + Eq + Hash + Debug,
        R: Clone + Eq + Hash + Debug,
        SP: StopProvider<S, R>,
        RP: RouteProvider<R, S>,
        TP: TripProvider<R, S>,
        XP: TransferProvider<S>,
    {
        Ok(self.search(origin, destination, departure)?.journeys)
    }

    /// Like [`Raptor::plan`], resolving both stops by exact display name.
    ///
    /// # Errors
    ///
    /// Fails with [`PlanError::StopNotFound`] before any planning if either
    /// name is unknown.
    pub fn plan_by_name<S, R>(
        &self,
        origin: &str,
        destination: &str,
        departure: NaiveDateTime,
    ) -> Result<Vec<Journey<S>>, PlanError>
    where
        S: Clone + Eq + Hash + Debug + Display,
        R: Clone + Eq + Hash + Debug,
        SP: StopProvider<S, R>,
        RP: RouteProvider<R, S>,
        TP: TripProvider<R, S>,
        XP: TransferProvider<S>,
    {
        Ok(self.search_by_name(origin, destination, departure)?.journeys)
    }

    /// Like [`Raptor::search`], resolving both stops by exact display name.
    pub fn search_by_name<S, R>(
        &self,
        origin: &str,
        destination: &str,
        departure: NaiveDateTime,
    ) -> Result<PlanResult<S>, PlanError>
    where
        S: Clone + Eq + Hash + Debug + Display,
        R: Clone + Eq + Hash + Debug,
        SP: StopProvider<S, R>,
        RP: RouteProvider<R, S>,
        TP: TripProvider<R, S>,
        XP: TransferProvider<S>,
    {
        let origin = self.find_stop::<S, R>(origin)?;
        let destination = self.find_stop::<S, R>(destination)?;
        self.search(&origin, &destination, departure)
    }

    /// Plan and report how much work it took.
    pub fn search<S, R>(
        &self,
        origin: &S,
        destination: &S,
        departure: NaiveDateTime,
    ) -> Result<PlanResult<S>, PlanError>
    where
        S: Clone + Eq + Hash + Debug,
        R: Clone + Eq + Hash + Debug,
        SP: StopProvider<S, R>,
        RP: RouteProvider<R, S>,
        TP: TripProvider<R, S>,
        XP: TransferProvider<S>,
    {
        if origin == destination {
            debug!(stop = ?origin, "origin is destination");
            return Ok(PlanResult {
                journeys: vec![Journey::trivial(origin.clone(), departure)],
                ..PlanResult::empty()
            });
        }

        let state = self.run(origin, departure)?;
        let journeys = reconstruct::journeys(&state, origin, destination)?;

        debug!(
            origin = ?origin,
            destination = ?destination,
            journeys = journeys.len(),
            rounds = state.rounds(),
            routes_scanned = state.routes_scanned(),
            "planning complete"
        );

        Ok(PlanResult {
            journeys,
            rounds: state.rounds(),
            routes_scanned: state.routes_scanned(),
        })
    }

    /// Run rounds from `origin` until nothing improves, returning the full
    /// arrival table and ledger.
    pub fn run<S, R>(
        &self,
        origin: &S,
        departure: NaiveDateTime,
    ) -> Result<RoundState<S>, PlanError>
    where
        S: Clone + Eq + Hash + Debug,
        R: Clone + Eq + Hash + Debug,
        SP: StopProvider<S, R>,
        RP: RouteProvider<R, S>,
        TP: TripProvider<R, S>,
        XP: TransferProvider<S>,
    {
        let mut state = RoundState::new(self.stops.stops(), origin, departure);
        let mut marked = Frontier::single(origin.clone());

        while !marked.is_empty() {
            let round = state.arrivals().current_round() + 1;
            if !self.config.allows_round(round) {
                debug!(round, marked = marked.len(), "round limit reached");
                break;
            }
            let k = state.advance_round();
            debug!(round = k, marked = marked.len(), "starting round");

            let mut next = Frontier::new();

            let queue = build_queue(&marked, self.stops, self.routes);
            state.count_scanned_routes(queue.len());
            for (route, start) in &queue {
                scan_route(route, start, k, self.routes, self.trips, &mut state, &mut next)?;
            }

            relax_transfers(&marked, k, self.transfers, &mut state, &mut next);

            marked = next;
        }

        Ok(state)
    }

    fn find_stop<S, R>(&self, name: &str) -> Result<S, PlanError>
    where
        S: Display,
        SP: StopProvider<S, R>,
    {
        self.stops
            .stops()
            .into_iter()
            .find(|stop| stop.to_string() == name)
            .ok_or_else(|| PlanError::StopNotFound(name.to_string()))
    }
}
