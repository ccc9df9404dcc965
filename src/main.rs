use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use transitmap::{
    framelog::FrameLog,
    geo::Coordinate,
    locate::{DeniedLocationProvider, FixedLocationProvider, FALLBACK_COORDINATE},
    notify::LogNotifier,
    scenario::ScenarioLoader,
    session::SessionBuilder,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "TransitMap tracking session runner")]
struct Cli {
    /// Path to the scenario YAML file
    #[arg(long, default_value = "scenarios/moscow.yaml")]
    scenario: PathBuf,

    /// Override tick count (uses scenario default when omitted)
    #[arg(long)]
    ticks: Option<u64>,

    /// Override the scenario's random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Report this "lat,lng" pair as the device position
    #[arg(long)]
    position: Option<String>,

    /// Simulate a denied geolocation permission
    #[arg(long)]
    deny_location: bool,

    /// Select this vehicle id once the fleet is seeded
    #[arg(long)]
    select: Option<u32>,

    /// Directory for frame recordings (disabled when omitted)
    #[arg(long)]
    frame_dir: Option<PathBuf>,

    /// Record every Nth frame
    #[arg(long, default_value_t = 10)]
    frame_interval: u64,
}

fn parse_position(text: &str) -> Result<Coordinate> {
    let (lat, lng) = text
        .split_once(',')
        .ok_or_else(|| anyhow!("expected \"lat,lng\", got '{text}'"))?;
    let lat: f64 = lat.trim().parse().context("latitude is not a number")?;
    let lng: f64 = lng.trim().parse().context("longitude is not a number")?;
    Coordinate::new(lat, lng).ok_or_else(|| anyhow!("({lat}, {lng}) is out of range"))
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let loader = ScenarioLoader::new(".");
    let mut scenario = loader.load(&cli.scenario)?;
    if let Some(seed) = cli.seed {
        scenario.seed = seed;
    }
    let ticks = scenario.ticks(cli.ticks);
    let name = scenario.name.clone();

    let frame_log = match &cli.frame_dir {
        Some(dir) => FrameLog::new(dir, cli.frame_interval)?,
        None => FrameLog::disabled(),
    };

    let mut session = SessionBuilder::new(scenario)
        .with_notifier(LogNotifier)
        .with_frame_log(frame_log)
        .build();

    if cli.deny_location {
        session.resolve_location(&DeniedLocationProvider).await;
    } else {
        let position = match &cli.position {
            Some(text) => parse_position(text)?,
            None => FALLBACK_COORDINATE,
        };
        session
            .resolve_location(&FixedLocationProvider(position))
            .await;
    }

    if let Some(id) = cli.select {
        if let Ok(route) = session.select(id) {
            println!(
                "Selected {} ({}): {:.2} km away",
                route.vehicle.route_label, id, route.distance_km
            );
        }
    }

    session.run(ticks)?;

    let fleet_size = session.fleet().map(|f| f.len()).unwrap_or(0);
    println!(
        "Scenario '{}' completed for {} ticks over a fleet of {} vehicles",
        name, ticks, fleet_size
    );
    if let Some(route) = session.current_route() {
        println!(
            "Live route to {}: {:.2} km",
            route.vehicle.route_label, route.distance_km
        );
    }
    Ok(())
}
