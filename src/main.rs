use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use glam::Vec2;
use log::info;

use murmuration::{
    engine::{Engine, EngineSettings, InputState},
    scenario::ScenarioLoader,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Headless flocking simulation runner")]
struct Cli {
    /// Path to the scenario YAML file
    #[arg(long, default_value = "scenarios/meadow.yaml")]
    scenario: PathBuf,

    /// Override tick count (uses scenario default when omitted)
    #[arg(long)]
    ticks: Option<u64>,

    /// Override the scenario's random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override snapshot interval in ticks (0 disables snapshots)
    #[arg(long)]
    snapshot_interval: Option<u64>,

    /// Directory for snapshots
    #[arg(long, default_value = "snapshots")]
    snapshot_dir: PathBuf,

    /// Override the seek target, e.g. --target 512,384
    #[arg(long, value_parser = parse_point)]
    target: Option<Vec2>,
}

fn parse_point(raw: &str) -> Result<Vec2, String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{raw}'"))?;
    let x: f32 = x.trim().parse().map_err(|_| format!("bad x in '{raw}'"))?;
    let y: f32 = y.trim().parse().map_err(|_| format!("bad y in '{raw}'"))?;
    Ok(Vec2::new(x, y))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let loader = ScenarioLoader::new(".");
    let mut scenario = loader.load(&cli.scenario)?;
    if let Some(seed) = cli.seed {
        scenario.seed = seed;
    }
    let ticks = scenario.ticks(cli.ticks);
    let snapshot_interval = cli
        .snapshot_interval
        .unwrap_or(scenario.snapshot_interval_ticks);
    let target = cli.target.unwrap_or(scenario.target);

    let mut world = scenario.build_world();
    info!(
        "scenario '{}': {} entities, seed {}, target ({}, {})",
        scenario.name,
        world.entity_count(),
        scenario.seed,
        target.x,
        target.y
    );

    let settings = EngineSettings::new(scenario.name.clone(), scenario.seed)
        .with_snapshots(snapshot_interval, cli.snapshot_dir);
    let mut engine = Engine::with_default_systems(settings);

    let input = InputState::pointer_at(target);
    let report = engine.run(&mut world, &input, ticks)?;

    println!(
        "Scenario '{}' completed for {} ticks. {} collision events, {} deaths, {} entities.",
        scenario.name,
        report.ticks,
        report.collisions,
        report.deaths,
        world.entity_count()
    );
    Ok(())
}
