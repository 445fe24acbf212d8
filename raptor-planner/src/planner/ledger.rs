//! Parent links for journey reconstruction.
//!
//! Whenever a stop's arrival improves in round `k`, the planner records how
//! it got there. Walking these links backwards from the destination yields
//! the journey.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::sync::Arc;

use crate::domain::{TransferLeg, Trip};

/// How a stop was reached in a given round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentLink<S> {
    /// Rode `trip` from path position `board_index` to `alight_index`.
    Board {
        trip: Arc<Trip<S>>,
        board_index: usize,
        alight_index: usize,
    },
    /// Walked.
    Transfer(TransferLeg<S>),
}

/// Per-stop, per-round parent links.
#[derive(Debug, Clone)]
pub struct ConnectionLedger<S> {
    links: HashMap<S, BTreeMap<usize, ParentLink<S>>>,
}

impl<S> Default for ConnectionLedger<S> {
    fn default() -> Self {
        Self {
            links: HashMap::new(),
        }
    }
}

impl<S: Clone + Eq + Hash> ConnectionLedger<S> {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the link for `stop` in round `k`, replacing any earlier one
    /// from the same round.
    pub fn record(&mut self, stop: &S, k: usize, link: ParentLink<S>) {
        self.links.entry(stop.clone()).or_default().insert(k, link);
    }

    /// The link recorded for `stop` in exactly round `k`.
    pub fn get(&self, stop: &S, k: usize) -> Option<&ParentLink<S>> {
        self.links.get(stop)?.get(&k)
    }

    /// The link from the latest round `<= k` that improved `stop`.
    ///
    /// This is the link behind `table[k][stop]`: later rounds only carry
    /// that value forward until a new improvement is recorded.
    pub fn latest(&self, stop: &S, k: usize) -> Option<(usize, &ParentLink<S>)> {
        self.links
            .get(stop)?
            .range(..=k)
            .next_back()
            .map(|(round, link)| (*round, link))
    }

    /// Rounds in which `stop` was improved, ascending.
    pub fn rounds_reaching(&self, stop: &S) -> impl Iterator<Item = usize> + '_ {
        self.links
            .get(stop)
            .into_iter()
            .flat_map(|rounds| rounds.keys().copied())
    }

    /// Total number of recorded links.
    pub fn len(&self) -> usize {
        self.links.values().map(BTreeMap::len).sum()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
