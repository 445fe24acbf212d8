//! Round-indexed earliest arrival table.
//!
//! `table[k][stop]` is the earliest known arrival at `stop` using at most `k`
//! rounds. Round `k` starts as a copy of round `k - 1` and is only ever
//! improved, so for every stop the values never increase with `k`.

use std::collections::HashMap;
use std::hash::Hash;

use chrono::NaiveDateTime;

use crate::domain::ArrivalTime;

/// Earliest arrival per stop, one snapshot per round.
#[derive(Debug, Clone)]
pub struct ArrivalTable<S> {
    rounds: Vec<HashMap<S, ArrivalTime>>,
}

impl<S: Clone + Eq + Hash> ArrivalTable<S> {
    /// Round 0: `origin` reached at `departure`, every other stop unreached.
    pub fn initialize(
        stops: impl IntoIterator<Item = S>,
        origin: &S,
        departure: NaiveDateTime,
    ) -> Self {
        let mut initial: HashMap<S, ArrivalTime> = stops
            .into_iter()
            .map(|stop| (stop, ArrivalTime::Unreached))
            .collect();
        initial.insert(origin.clone(), ArrivalTime::At(departure));

        Self {
            rounds: vec![initial],
        }
    }

    /// Start the next round as a copy of the latest one; returns its index.
    pub fn advance_round(&mut self) -> usize {
        let next = self.rounds.last().cloned().unwrap_or_default();
        self.rounds.push(next);
        self.rounds.len() - 1
    }

    /// Index of the latest round.
    pub fn current_round(&self) -> usize {
        self.rounds.len().saturating_sub(1)
    }

    /// Number of rounds held, round 0 included.
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    /// Arrival at `stop` in round `k`. Unknown stops and rounds are unreached.
    pub fn arrival(&self, k: usize, stop: &S) -> ArrivalTime {
        self.rounds
            .get(k)
            .and_then(|round| round.get(stop))
            .copied()
            .unwrap_or(ArrivalTime::Unreached)
    }

    /// Commit `candidate` into round `k` if it is strictly earlier than the
    /// current value. Returns whether it was committed.
    pub fn improve(&mut self, k: usize, stop: &S, candidate: ArrivalTime) -> bool {
        let Some(round) = self.rounds.get_mut(k) else {
            return false;
        };
        let current = round.get(stop).copied().unwrap_or(ArrivalTime::Unreached);
        if !candidate.is_before(&current) {
            return false;
        }
        round.insert(stop.clone(), candidate);
        true
    }

    /// Iterate over every stop known in round `k` with its arrival.
    pub fn round(&self, k: usize) -> impl Iterator<Item = (&S, &ArrivalTime)> {
        self.rounds.get(k).into_iter().flat_map(|round| round.iter())
    }
}
