//! Walking transfers between stops.
//!
//! Some stops are close enough to walk between, enabling connections that
//! don't appear in any timetable. Walks are directed: a footpath may be
//! one-way, or slower uphill. Use [`TransferTable::add_both_ways`] for the
//! common symmetric case.

use std::collections::HashMap;
use std::hash::Hash;

use chrono::Duration;

use crate::domain::TransferLeg;
use crate::provider::TransferProvider;

/// Walking transfers keyed by origin stop.
#[derive(Debug, Clone)]
pub struct TransferTable<S> {
    outgoing: HashMap<S, Vec<TransferLeg<S>>>,
}

impl<S> Default for TransferTable<S> {
    fn default() -> Self {
        Self {
            outgoing: HashMap::new(),
        }
    }
}

impl<S: Clone + Eq + Hash> TransferTable<S> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a one-way walk.
    pub fn add(&mut self, leg: TransferLeg<S>) {
        self.outgoing
            .entry(leg.origin.clone())
            .or_default()
            .push(leg);
    }

    /// Add a walk in both directions with the same duration and distance.
    pub fn add_both_ways(&mut self, a: S, b: S, duration: Duration, distance: u32) {
        self.add(TransferLeg::new(a.clone(), b.clone(), duration, distance));
        self.add(TransferLeg::new(b, a, duration, distance));
    }

    /// Get the quickest walk from `from` to `to`, if walkable.
    pub fn get(&self, from: &S, to: &S) -> Option<&TransferLeg<S>> {
        self.walkable_from(from)
            .iter()
            .filter(|leg| &leg.destination == to)
            .min_by_key(|leg| leg.duration)
    }

    /// Check if there is a walk from `from` to `to`.
    pub fn is_walkable(&self, from: &S, to: &S) -> bool {
        self.get(from, to).is_some()
    }

    /// All walks starting at `from`, in insertion order.
    pub fn walkable_from(&self, from: &S) -> &[TransferLeg<S>] {
        self.outgoing.get(from).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the number of one-way walks.
    pub fn len(&self) -> usize {
        self.outgoing.values().map(Vec::len).sum()
    }

    /// Returns true if there are no walks.
    pub fn is_empty(&self) -> bool {
        self.outgoing.is_empty()
    }
}

impl<S: Clone + Eq + Hash> TransferProvider<S> for TransferTable<S> {
    fn transfers_from(&self, stop: &S) -> Vec<TransferLeg<S>> {
        self.walkable_from(stop).to_vec()
    }
}
