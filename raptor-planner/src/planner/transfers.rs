//! Transfer relax phase.
//!
//! Walks out of every stop marked before the round began. The walk starts
//! from the previous round's arrival, so a stop reached by a trip in this
//! round only gets its walks in the next one.

use std::fmt::Debug;
use std::hash::Hash;

use tracing::trace;

use crate::provider::TransferProvider;

use super::frontier::Frontier;
use super::ledger::ParentLink;
use super::state::RoundState;

/// Relax every outgoing transfer of the stops in `marked` into round `k`.
pub(super) fn relax_transfers<S, XP>(
    marked: &Frontier<S>,
    k: usize,
    transfers: &XP,
    state: &mut RoundState<S>,
    next: &mut Frontier<S>,
) where
    S: Clone + Eq + Hash + Debug,
    XP: TransferProvider<S> + ?Sized,
{
    for stop in marked.iter() {
        let base = state.arrivals().arrival(k - 1, stop);
        if base.is_unreached() {
            continue;
        }

        for leg in transfers.transfers_from(stop) {
            let candidate = base.saturating_add(leg.duration);
            let destination = leg.destination.clone();
            if state.relax(k, &destination, candidate, ParentLink::Transfer(leg)) {
                trace!(from = ?stop, to = ?destination, round = k, "walked");
                next.mark(destination);
            }
        }
    }
}
