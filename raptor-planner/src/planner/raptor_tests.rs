//! Tests for the round driver, end to end through reconstruction.

use super::*;
use crate::domain::{Journey, Leg, StopTime, TransferLeg, Trip};
use crate::network::{Network, NetworkBuilder, sample_network};
use crate::provider::{RouteProvider, StopProvider, TransferProvider, TripProvider};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::sync::Arc;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2019, 8, 27).unwrap()
}

fn time(hour: u32, minute: u32) -> NaiveDateTime {
    day().and_hms_opt(hour, minute, 0).unwrap()
}

/// Route R: A -> B -> C with one trip T at 08:00, 08:10, 08:20.
fn line() -> NetworkBuilder<&'static str, &'static str> {
    NetworkBuilder::new()
        .route("R", vec!["A", "B", "C"])
        .unwrap()
        .trip(
            &"R",
            Trip::new(
                "T",
                vec![
                    StopTime::at("A", time(8, 0)),
                    StopTime::at("B", time(8, 10)),
                    StopTime::at("C", time(8, 20)),
                ],
            ),
        )
        .unwrap()
}

/// The line plus a five minute walk from B to D.
fn line_with_walk() -> Network<&'static str, &'static str> {
    line()
        .transfer(TransferLeg::new("B", "D", Duration::minutes(5), 350))
        .unwrap()
        .build()
}

fn planner<'a>(
    network: &'a Network<&'static str, &'static str>,
) -> Raptor<
    'a,
    Network<&'static str, &'static str>,
    Network<&'static str, &'static str>,
    Network<&'static str, &'static str>,
    Network<&'static str, &'static str>,
> {
    Raptor::new(network, network, network, network)
}

// ============================================================================
// Single rides and walks
// ============================================================================

#[test]
fn single_ride() {
    let network = line().build();

    let journeys = planner(&network).plan(&"A", &"C", time(7, 50)).unwrap();

    assert_eq!(journeys.len(), 1);
    let journey = &journeys[0];
    assert_eq!(journey.leg_count(), 1);
    assert_eq!(journey.arrival_time(), time(8, 20));

    let ride = journey.legs()[0].as_timetable().unwrap();
    assert_eq!(ride.trip().id, "T");
    assert_eq!(*ride.origin(), "A");
    assert_eq!(*ride.destination(), "C");
    assert_eq!(ride.intermediate_stop_count(), 1);
}

#[test]
fn ride_then_walk() {
    let network = line_with_walk();

    let journeys = planner(&network).plan(&"A", &"D", time(7, 50)).unwrap();

    assert_eq!(journeys.len(), 1);
    let legs = journeys[0].legs();
    assert_eq!(legs.len(), 2);

    let ride = legs[0].as_timetable().unwrap();
    assert_eq!(ride.trip().id, "T");
    assert_eq!(*ride.origin(), "A");
    assert_eq!(*ride.destination(), "B");

    let walk = legs[1].as_transfer().unwrap();
    assert_eq!(walk.origin, "B");
    assert_eq!(walk.destination, "D");
    assert_eq!(walk.duration, Duration::minutes(5));
    assert_eq!(walk.distance, 350);

    assert_eq!(journeys[0].arrival_time(), time(8, 15));
}

#[test]
fn origin_is_destination() {
    let network = line_with_walk();

    let result = planner(&network).search(&"B", &"B", time(12, 0)).unwrap();

    assert_eq!(result.journeys.len(), 1);
    assert!(result.journeys[0].is_trivial());
    assert_eq!(*result.journeys[0].origin(), "B");
    assert_eq!(result.journeys[0].arrival_time(), time(12, 0));
    assert_eq!(result.rounds, 0);
    assert_eq!(result.routes_scanned, 0);
}

#[test]
fn unreachable_destination() {
    let network = line_with_walk();

    // Nothing leads back to A.
    let journeys = planner(&network).plan(&"C", &"A", time(7, 50)).unwrap();
    assert!(journeys.is_empty());

    // Missed the only trip.
    let journeys = planner(&network).plan(&"A", &"C", time(8, 1)).unwrap();
    assert!(journeys.is_empty());
}

#[test]
fn unknown_origin_reaches_nothing() {
    let network = line().build();
    let journeys = planner(&network).plan(&"Z", &"C", time(7, 50)).unwrap();
    assert!(journeys.is_empty());
}

#[test]
fn boards_at_exact_departure_time() {
    let network = line().build();
    let journeys = planner(&network).plan(&"A", &"C", time(8, 0)).unwrap();
    assert_eq!(journeys.len(), 1);
}

// ============================================================================
// Rounds
// ============================================================================

#[test]
fn walk_only_counts_as_a_round() {
    let network = line_with_walk();

    let result = planner(&network).search(&"B", &"D", time(9, 0)).unwrap();

    assert_eq!(result.journeys.len(), 1);
    assert!(result.journeys[0].legs()[0].is_transfer());
    assert_eq!(result.journeys[0].arrival_time(), time(9, 5));
    // Round 1 walks to D, round 2 finds nothing new.
    assert_eq!(result.rounds, 2);
}

#[test]
fn walk_after_ride_needs_another_round() {
    let network = line_with_walk();
    let state = planner(&network).run(&"A", time(7, 50)).unwrap();

    assert_eq!(state.arrivals().arrival(1, &"B"), time(8, 10).into());
    assert!(state.arrivals().arrival(1, &"D").is_unreached());
    assert_eq!(state.arrivals().arrival(2, &"D"), time(8, 15).into());
}

#[test]
fn round_cap_stops_early() {
    let network = line_with_walk();
    let config = RaptorConfig::with_max_rounds(1);
    let capped = Raptor::with_config(&network, &network, &network, &network, config);

    let result = capped.search(&"A", &"D", time(7, 50)).unwrap();

    assert!(result.journeys.is_empty());
    assert_eq!(result.rounds, 1);
    assert_eq!(capped.config().max_rounds, Some(1));
}

#[test]
fn one_journey_per_improving_round() {
    // Direct slow trip A -> C, or a fast trip from B after a short ride.
    let network = NetworkBuilder::new()
        .route("slow", vec!["A", "C"])
        .unwrap()
        .route("feeder", vec!["A", "B"])
        .unwrap()
        .route("fast", vec!["B", "C"])
        .unwrap()
        .trip(
            &"slow",
            Trip::new("S", vec![StopTime::at("A", time(8, 0)), StopTime::at("C", time(9, 0))]),
        )
        .unwrap()
        .trip(
            &"feeder",
            Trip::new("F", vec![StopTime::at("A", time(8, 0)), StopTime::at("B", time(8, 10))]),
        )
        .unwrap()
        .trip(
            &"fast",
            Trip::new("X", vec![StopTime::at("B", time(8, 15)), StopTime::at("C", time(8, 30))]),
        )
        .unwrap()
        .build();

    let result = planner(&network).search(&"A", &"C", time(7, 55)).unwrap();

    assert_eq!(result.journeys.len(), 2);
    assert_eq!(result.journeys[0].leg_count(), 1);
    assert_eq!(result.journeys[0].arrival_time(), time(9, 0));
    assert_eq!(result.journeys[1].leg_count(), 2);
    assert_eq!(result.journeys[1].arrival_time(), time(8, 30));
    assert!(result.routes_scanned >= 3);

    let ranked = rank_journeys(result.journeys);
    assert_eq!(ranked[0].arrival_time(), time(8, 30));
}

#[test]
fn transfers_from_pre_round_frontier_only() {
    // A -(walk)-> B -(walk)-> C: each walk takes its own round.
    let network: Network<&str, &str> = NetworkBuilder::new()
        .transfer(TransferLeg::new("A", "B", Duration::minutes(3), 200))
        .unwrap()
        .transfer(TransferLeg::new("B", "C", Duration::minutes(4), 300))
        .unwrap()
        .build();

    let state = planner(&network).run(&"A", time(10, 0)).unwrap();

    assert_eq!(state.arrivals().arrival(1, &"B"), time(10, 3).into());
    assert!(state.arrivals().arrival(1, &"C").is_unreached());
    assert_eq!(state.arrivals().arrival(2, &"C"), time(10, 7).into());

    let journeys = planner(&network).plan(&"A", &"C", time(10, 0)).unwrap();
    assert_eq!(journeys.len(), 1);
    assert_eq!(journeys[0].leg_count(), 2);
    assert_eq!(journeys[0].total_walk_distance(), 500);
}

// ============================================================================
// Name lookup and the sample network
// ============================================================================

#[test]
fn plan_by_name_on_sample_network() {
    let network = sample_network(day()).unwrap();
    let planner = Raptor::new(&network, &network, &network, &network);

    let journeys = planner
        .plan_by_name("Amsterdam", "Rotterdam", time(7, 0))
        .unwrap();

    // Straight through on the intercity, or change at Leiden for the
    // sprinter which overtakes it.
    assert_eq!(journeys.len(), 2);
    assert_eq!(journeys[0].leg_count(), 1);
    assert_eq!(journeys[0].arrival_time(), time(8, 15));
    assert_eq!(journeys[1].leg_count(), 2);
    assert_eq!(journeys[1].arrival_time(), time(8, 12));

    let change = journeys[1].legs()[1].as_timetable().unwrap();
    assert_eq!(change.trip().id, "SPR1");
    assert_eq!(change.origin().name(), "Leiden");
}

#[test]
fn plan_by_name_unknown_stop() {
    let network = sample_network(day()).unwrap();
    let planner = Raptor::new(&network, &network, &network, &network);

    let err = planner
        .plan_by_name("Atlantis", "Rotterdam", time(7, 0))
        .unwrap_err();
    assert_eq!(err, PlanError::StopNotFound("Atlantis".to_string()));

    let err = planner
        .plan_by_name("Amsterdam", "atlantis", time(7, 0))
        .unwrap_err();
    assert_eq!(err, PlanError::StopNotFound("atlantis".to_string()));
}

#[test]
fn planning_is_repeatable() {
    let network = sample_network(day()).unwrap();
    let planner = Raptor::new(&network, &network, &network, &network);

    let first = planner.plan_by_name("Haarlem", "Schiphol", time(7, 0)).unwrap();
    let second = planner.plan_by_name("Haarlem", "Schiphol", time(7, 0)).unwrap();

    assert_eq!(first, second);
}

// ============================================================================
// Provider inconsistencies
// ============================================================================

/// Claims route R serves A, but knows no path for it.
struct Broken;

impl StopProvider<&'static str, &'static str> for Broken {
    fn stops(&self) -> Vec<&'static str> {
        vec!["A", "B"]
    }

    fn routes_serving(&self, stop: &&'static str) -> Vec<&'static str> {
        if *stop == "A" { vec!["R"] } else { Vec::new() }
    }
}

impl RouteProvider<&'static str, &'static str> for Broken {
    fn route_path(&self, _route: &&'static str) -> Option<&[&'static str]> {
        None
    }

    fn stop_index(&self, _route: &&'static str, _stop: &&'static str) -> Option<usize> {
        None
    }
}

impl TripProvider<&'static str, &'static str> for Broken {
    fn earliest_trip(
        &self,
        _route: &&'static str,
        _index: usize,
        _not_before: NaiveDateTime,
    ) -> Option<Arc<Trip<&'static str>>> {
        None
    }
}

impl TransferProvider<&'static str> for Broken {
    fn transfers_from(&self, _stop: &&'static str) -> Vec<TransferLeg<&'static str>> {
        Vec::new()
    }
}

#[test]
fn inconsistent_providers_fail_the_call() {
    let broken = Broken;
    let planner = Raptor::new(&broken, &broken, &broken, &broken);

    let err = planner.plan(&"A", &"B", time(8, 0)).unwrap_err();
    assert!(matches!(err, PlanError::ProviderInconsistency(_)));
}

// ============================================================================
// Properties over random networks
// ============================================================================

mod proptests {
    use super::*;
    use proptest::prelude::*;

    const STOPS: usize = 7;

    type Net = Network<usize, usize>;

    /// One route: its raw path, a hop and dwell pattern shared by all of
    /// its trips, and the trips' start times. Sharing the pattern keeps trips
    /// on a route from overtaking each other.
    #[derive(Debug, Clone)]
    struct RouteSpec {
        path: Vec<usize>,
        pattern: Vec<(u32, u32)>,
        starts: Vec<u32>,
    }

    #[derive(Debug, Clone)]
    struct NetSpec {
        routes: Vec<RouteSpec>,
        walks: Vec<(usize, usize, u32)>,
    }

    fn base() -> NaiveDateTime {
        day().and_hms_opt(6, 0, 0).unwrap()
    }

    fn at(minutes: u32) -> NaiveDateTime {
        base() + Duration::minutes(i64::from(minutes))
    }

    fn route_spec() -> impl Strategy<Value = RouteSpec> {
        (
            prop::collection::vec(0..STOPS, 2..6),
            prop::collection::vec((1u32..30, 0u32..3), STOPS),
            prop::collection::vec(0u32..180, 1..4),
        )
            .prop_map(|(path, pattern, starts)| RouteSpec {
                path,
                pattern,
                starts,
            })
    }

    fn net_spec() -> impl Strategy<Value = NetSpec> {
        (
            prop::collection::vec(route_spec(), 1..5),
            prop::collection::vec((0..STOPS, 0..STOPS, 1u32..30), 0..6),
        )
            .prop_map(|(routes, walks)| NetSpec { routes, walks })
    }

    fn build(spec: &NetSpec) -> Net {
        let mut builder = NetworkBuilder::new();
        for stop in 0..STOPS {
            builder = builder.stop(stop);
        }

        for (id, route) in spec.routes.iter().enumerate() {
            let mut path: Vec<usize> = Vec::new();
            for stop in &route.path {
                if !path.contains(stop) {
                    path.push(*stop);
                }
            }
            if path.len() < 2 {
                continue;
            }

            builder = builder.route(id, path.clone()).unwrap();
            for (n, start) in route.starts.iter().enumerate() {
                let mut clock = *start;
                let stop_times = path
                    .iter()
                    .zip(&route.pattern)
                    .map(|(stop, (hop, dwell))| {
                        let arrival = clock;
                        let departure = arrival + dwell;
                        clock = departure + hop;
                        StopTime::new(*stop, at(arrival), at(departure))
                    })
                    .collect();
                builder = builder
                    .trip(&id, Trip::new(format!("{id}-{n}"), stop_times))
                    .unwrap();
            }
        }

        for (from, to, minutes) in &spec.walks {
            if from != to {
                builder = builder
                    .transfer(TransferLeg::new(
                        *from,
                        *to,
                        Duration::minutes(i64::from(*minutes)),
                        minutes * 80,
                    ))
                    .unwrap();
            }
        }

        builder.build()
    }

    fn planner(network: &Net) -> Raptor<'_, Net, Net, Net, Net> {
        Raptor::new(network, network, network, network)
    }

    /// Replays a journey's legs from the departure time.
    fn replay(journey: &Journey<usize>, departure: NaiveDateTime) -> Result<NaiveDateTime, String> {
        let mut clock = departure;
        for leg in journey.legs() {
            match leg {
                Leg::Timetable(ride) => {
                    if ride.departure_time() < clock {
                        return Err(format!("boarded {} before arriving", ride.trip().id));
                    }
                    clock = ride.arrival_time();
                }
                Leg::Transfer(walk) => clock += walk.duration,
            }
        }
        Ok(clock)
    }

    proptest! {
        /// Arrivals never get later from one round to the next.
        #[test]
        fn arrivals_are_monotone(
            spec in net_spec(),
            origin in 0..STOPS,
            start in 0u32..180,
        ) {
            let network = build(&spec);
            let state = planner(&network).run(&origin, at(start)).unwrap();

            for k in 1..state.arrivals().round_count() {
                for stop in 0..STOPS {
                    let now = state.arrivals().arrival(k, &stop);
                    let before = state.arrivals().arrival(k - 1, &stop);
                    prop_assert!(now <= before);
                }
            }
        }

        /// Never more rounds than stops.
        #[test]
        fn terminates_within_stop_count(
            spec in net_spec(),
            origin in 0..STOPS,
            start in 0u32..180,
        ) {
            let network = build(&spec);
            let state = planner(&network).run(&origin, at(start)).unwrap();
            prop_assert!(state.rounds() >= 1);
            prop_assert!(state.rounds() <= network.stop_count());
        }

        /// A parent link exists only where the arrival strictly improved.
        #[test]
        fn ledger_only_on_strict_improvement(
            spec in net_spec(),
            origin in 0..STOPS,
            start in 0u32..180,
        ) {
            let network = build(&spec);
            let state = planner(&network).run(&origin, at(start)).unwrap();

            for stop in 0..STOPS {
                for k in state.ledger().rounds_reaching(&stop) {
                    prop_assert!(k >= 1);
                    let now = state.arrivals().arrival(k, &stop);
                    let before = state.arrivals().arrival(k - 1, &stop);
                    prop_assert!(now.is_before(&before));
                }
            }
        }

        /// Every journey starts at the origin, ends at the destination, is
        /// rideable in order, and arrives when the table says it does.
        #[test]
        fn journeys_are_consistent(
            spec in net_spec(),
            origin in 0..STOPS,
            destination in 0..STOPS,
            start in 0u32..180,
        ) {
            prop_assume!(origin != destination);
            let network = build(&spec);
            let journeys = planner(&network).plan(&origin, &destination, at(start)).unwrap();

            for journey in &journeys {
                prop_assert_eq!(*journey.origin(), origin);
                prop_assert_eq!(*journey.destination(), destination);
                prop_assert!(journey.leg_count() >= 1);
                prop_assert_eq!(replay(journey, at(start)), Ok(journey.arrival_time()));
            }

            // Later rounds only appear when they arrive strictly earlier.
            for pair in journeys.windows(2) {
                prop_assert!(pair[1].arrival_time() < pair[0].arrival_time());
            }
        }

        /// Reachability agrees with the final arrival table.
        #[test]
        fn journeys_exist_iff_reached(
            spec in net_spec(),
            origin in 0..STOPS,
            destination in 0..STOPS,
            start in 0u32..180,
        ) {
            prop_assume!(origin != destination);
            let network = build(&spec);
            let raptor = planner(&network);
            let state = raptor.run(&origin, at(start)).unwrap();
            let journeys = raptor.plan(&origin, &destination, at(start)).unwrap();

            let last = state.arrivals().current_round();
            let reached = state.arrivals().arrival(last, &destination);
            prop_assert_eq!(journeys.is_empty(), reached.is_unreached());
            if let Some(best) = journeys.last() {
                prop_assert_eq!(Some(best.arrival_time()), reached.instant());
            }
        }

        /// Same query, same answer.
        #[test]
        fn planning_is_idempotent(
            spec in net_spec(),
            origin in 0..STOPS,
            destination in 0..STOPS,
            start in 0u32..180,
        ) {
            let network = build(&spec);
            let raptor = planner(&network);
            let first = raptor.search(&origin, &destination, at(start)).unwrap();
            let second = raptor.search(&origin, &destination, at(start)).unwrap();

            prop_assert_eq!(first.journeys, second.journeys);
            prop_assert_eq!(first.rounds, second.rounds);
            prop_assert_eq!(first.routes_scanned, second.routes_scanned);
        }
    }
}
