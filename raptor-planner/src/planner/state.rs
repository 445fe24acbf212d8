//! Per-query labels: arrival table plus ledger.

use std::hash::Hash;

use chrono::NaiveDateTime;

use crate::domain::ArrivalTime;

use super::arrivals::ArrivalTable;
use super::ledger::{ConnectionLedger, ParentLink};

/// Everything one query learns while running rounds.
///
/// Owned by a single query and dropped once journeys are extracted.
#[derive(Debug, Clone)]
pub struct RoundState<S> {
    arrivals: ArrivalTable<S>,
    ledger: ConnectionLedger<S>,
    rounds: usize,
    routes_scanned: usize,
}

impl<S: Clone + Eq + Hash> RoundState<S> {
    pub(super) fn new(
        stops: impl IntoIterator<Item = S>,
        origin: &S,
        departure: NaiveDateTime,
    ) -> Self {
        Self {
            arrivals: ArrivalTable::initialize(stops, origin, departure),
            ledger: ConnectionLedger::new(),
            rounds: 0,
            routes_scanned: 0,
        }
    }

    /// Start the next round; returns its index.
    pub(super) fn advance_round(&mut self) -> usize {
        self.rounds = self.arrivals.advance_round();
        self.rounds
    }

    pub(super) fn count_scanned_routes(&mut self, n: usize) {
        self.routes_scanned += n;
    }

    /// Improve `stop` in round `k` and record how, only if `candidate` is
    /// strictly earlier. Returns whether anything changed.
    pub(super) fn relax(
        &mut self,
        k: usize,
        stop: &S,
        candidate: ArrivalTime,
        link: ParentLink<S>,
    ) -> bool {
        if !self.arrivals.improve(k, stop, candidate) {
            return false;
        }
        self.ledger.record(stop, k, link);
        true
    }

    /// The arrival table.
    pub fn arrivals(&self) -> &ArrivalTable<S> {
        &self.arrivals
    }

    /// The parent links.
    pub fn ledger(&self) -> &ConnectionLedger<S> {
        &self.ledger
    }

    /// Number of rounds run (round 0 not counted).
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Number of route scans performed across all rounds.
    pub fn routes_scanned(&self) -> usize {
        self.routes_scanned
    }
}
