//! Marked stops.
//!
//! The frontier is the set of stops whose arrival improved in the round just
//! completed. Iteration follows insertion order so that a query against
//! deterministic providers always explores in the same order.

use std::collections::HashSet;
use std::hash::Hash;

/// Insertion-ordered set of marked stops.
#[derive(Debug, Clone)]
pub(crate) struct Frontier<S> {
    order: Vec<S>,
    members: HashSet<S>,
}

impl<S> Default for Frontier<S> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            members: HashSet::new(),
        }
    }
}

impl<S: Clone + Eq + Hash> Frontier<S> {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a frontier holding a single stop.
    pub fn single(stop: S) -> Self {
        let mut frontier = Self::new();
        frontier.mark(stop);
        frontier
    }

    /// Mark a stop. Returns false if it was already marked.
    pub fn mark(&mut self, stop: S) -> bool {
        if self.contains(&stop) {
            return false;
        }
        self.members.insert(stop.clone());
        self.order.push(stop);
        true
    }

    /// Returns true if `stop` is marked.
    pub fn contains(&self, stop: &S) -> bool {
        self.members.contains(stop)
    }

    /// Marked stops in the order they were first marked.
    pub fn iter(&self) -> impl Iterator<Item = &S> {
        self.order.iter()
    }

    /// Returns the number of marked stops.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if no stop is marked.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
