//! Journey reconstruction.
//!
//! Every round that improved the destination yields one journey: follow
//! parent links backwards from the destination, one round per leg, until the
//! origin is reached.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use crate::domain::{Journey, Leg, TimetableLeg};

use super::ledger::ParentLink;
use super::raptor::PlanError;
use super::state::RoundState;

/// One journey per round in which `destination` improved, fewest rounds
/// first.
///
/// The result is neither sorted by arrival nor deduplicated.
pub(super) fn journeys<S>(
    state: &RoundState<S>,
    origin: &S,
    destination: &S,
) -> Result<Vec<Journey<S>>, PlanError>
where
    S: Clone + Eq + Hash + Debug,
{
    state
        .ledger()
        .rounds_reaching(destination)
        .map(|k| journey_from_round(state, origin, destination, k))
        .collect()
}

fn journey_from_round<S>(
    state: &RoundState<S>,
    origin: &S,
    destination: &S,
    k: usize,
) -> Result<Journey<S>, PlanError>
where
    S: Clone + Eq + Hash + Debug,
{
    let arrival = state
        .arrivals()
        .arrival(k, destination)
        .instant()
        .ok_or_else(|| {
            PlanError::ProviderInconsistency(format!(
                "{destination:?} has a parent link but no arrival in round {k}"
            ))
        })?;

    let mut legs: Vec<Leg<S>> = Vec::new();
    let mut stop = destination.clone();
    let mut round = k;

    while round > 0 && stop != *origin {
        // The link behind table[round][stop] may come from an earlier round.
        let Some((reached_in, link)) = state.ledger().latest(&stop, round) else {
            break;
        };

        let (leg, previous) = match link {
            ParentLink::Transfer(walk) => (Leg::Transfer(walk.clone()), walk.origin.clone()),
            ParentLink::Board {
                trip,
                board_index,
                alight_index,
            } => {
                let ride = TimetableLeg::new(Arc::clone(trip), *board_index, *alight_index)?;
                let boarded_at = ride.origin().clone();
                (Leg::Timetable(ride), boarded_at)
            }
        };

        legs.push(leg);
        stop = previous;
        round = reached_in.saturating_sub(1);
    }

    if stop != *origin {
        return Err(PlanError::ProviderInconsistency(format!(
            "no parent link leads from {destination:?} back to {origin:?}"
        )));
    }

    legs.reverse();
    Ok(Journey::new(legs, arrival)?)
}
