use std::process::ExitCode;

use chrono::{NaiveDate, NaiveTime};
use tracing::info;
use tracing_subscriber::EnvFilter;

use raptor_planner::dto::PlanResponse;
use raptor_planner::network::sample_network;
use raptor_planner::planner::{Raptor, rank_journeys};

const USAGE: &str = "usage: raptor-planner <origin> <destination> [HH:MM]";

/// Day the sample timetable runs on.
fn service_day() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2019, 8, 27)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (origin, destination, time) = match args.as_slice() {
        [origin, destination] => (origin, destination, "07:00"),
        [origin, destination, time] => (origin, destination, time.as_str()),
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    let Ok(time) = NaiveTime::parse_from_str(time, "%H:%M") else {
        eprintln!("invalid departure time {time:?}, expected HH:MM");
        return ExitCode::from(2);
    };
    let Some(day) = service_day() else {
        eprintln!("invalid service day");
        return ExitCode::FAILURE;
    };
    let departure = day.and_time(time);

    let network = match sample_network(day) {
        Ok(network) => network,
        Err(e) => {
            eprintln!("failed to build sample network: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!(
        stops = network.stop_count(),
        routes = network.route_count(),
        trips = network.trip_count(),
        "loaded sample network"
    );

    let planner = Raptor::new(&network, &network, &network, &network);
    let mut result = match planner.search_by_name(origin, destination, departure) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("planning failed: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!(
        journeys = result.journeys.len(),
        rounds = result.rounds,
        routes_scanned = result.routes_scanned,
        %departure,
        "planned"
    );

    result.journeys = rank_journeys(result.journeys);
    match serde_json::to_string_pretty(&PlanResponse::from_result(&result)) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("failed to serialize result: {e}");
            ExitCode::FAILURE
        }
    }
}
