//! Journey ranking for planner results.
//!
//! The planner returns one journey per round that improved the destination,
//! in round order. These helpers turn that into a presentation order and
//! prune journeys nobody would pick.

use std::cmp::Ordering;

use crate::domain::Journey;

/// Rank journeys by preference.
///
/// Journeys are ranked by:
/// 1. Arrival time (earlier is better)
/// 2. Number of legs (fewer is better)
/// 3. First departure (later is better, less waiting at the origin)
///
/// Returns journeys sorted best-first. The sort is stable.
pub fn rank_journeys<S>(mut journeys: Vec<Journey<S>>) -> Vec<Journey<S>> {
    journeys.sort_by(compare);
    journeys
}

fn compare<S>(a: &Journey<S>, b: &Journey<S>) -> Ordering {
    a.arrival_time()
        .cmp(&b.arrival_time())
        .then_with(|| a.leg_count().cmp(&b.leg_count()))
        .then_with(|| b.first_departure().cmp(&a.first_departure()))
}

/// Returns true if `a` is at least as good as `b` on arrival and leg count,
/// and strictly better on one of them.
fn dominates<S>(a: &Journey<S>, b: &Journey<S>) -> bool {
    a.arrival_time() <= b.arrival_time()
        && a.leg_count() <= b.leg_count()
        && (a.arrival_time() < b.arrival_time() || a.leg_count() < b.leg_count())
}

/// Remove dominated journeys.
///
/// A journey is dominated if another journey arrives no later with no more
/// legs, and is strictly better in one of the two. Surviving journeys keep
/// their relative order.
pub fn remove_dominated<S>(journeys: Vec<Journey<S>>) -> Vec<Journey<S>> {
    if journeys.len() <= 1 {
        return journeys;
    }

    let mut result: Vec<Journey<S>> = Vec::with_capacity(journeys.len());

    for journey in journeys {
        if result.iter().any(|existing| dominates(existing, &journey)) {
            continue;
        }
        result.retain(|existing| !dominates(&journey, existing));
        result.push(journey);
    }

    result
}

/// Collapse journeys with the same arrival time and leg count.
///
/// The best-ranked journey of each group is kept; the output is in rank
/// order.
pub fn deduplicate<S>(journeys: Vec<Journey<S>>) -> Vec<Journey<S>> {
    if journeys.len() <= 1 {
        return journeys;
    }

    let mut result: Vec<Journey<S>> = Vec::with_capacity(journeys.len());

    for journey in rank_journeys(journeys) {
        let duplicate = result.last().is_some_and(|last| {
            last.arrival_time() == journey.arrival_time() && last.leg_count() == journey.leg_count()
        });
        if !duplicate {
            result.push(journey);
        }
    }

    result
}
