//! Simulation engine: system trait, fixed-order tick pipeline, render query
//!
//! The engine itself is stateless between ticks apart from the tick counter
//! and RNG bookkeeping; all simulation state lives in the world it is handed.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use glam::Vec2;

use crate::events::SimEvent;
use crate::render::{collect_poses, RenderPose};
use crate::rng::{RngManager, SystemRng};
use crate::snapshot::SnapshotWriter;
use crate::systems::{
    CollisionSystem, HealthSystem, MovementSystem, PlayerInputSystem, SteeringSystem, WanderSystem,
};
use crate::world::World;

/// Read-only input sampled by the external collaborator once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputState {
    /// Pointer position in world space; the flock's seek target.
    pub pointer: Vec2,
    /// Movement axis for player-controlled entities, components in [-1, 1].
    pub axis: Vec2,
}

impl InputState {
    pub fn pointer_at(pointer: Vec2) -> Self {
        Self {
            pointer,
            axis: Vec2::ZERO,
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            pointer: Vec2::ZERO,
            axis: Vec2::ZERO,
        }
    }
}

pub struct SystemContext<'a> {
    pub tick: u64,
    pub dt: f32,
    pub input: &'a InputState,
}

pub trait System {
    fn name(&self) -> &'static str;
    fn run(&mut self, ctx: &SystemContext, world: &mut World, rng: &mut SystemRng<'_>)
        -> Result<()>;
}

pub struct EngineSettings {
    pub scenario_name: String,
    pub seed: u64,
    pub fixed_dt: f32,
    pub snapshot_interval_ticks: u64,
    pub snapshot_dir: PathBuf,
}

impl EngineSettings {
    pub fn new(scenario_name: impl Into<String>, seed: u64) -> Self {
        Self {
            scenario_name: scenario_name.into(),
            seed,
            fixed_dt: 1.0 / 60.0,
            snapshot_interval_ticks: 0,
            snapshot_dir: PathBuf::from("snapshots"),
        }
    }

    pub fn with_snapshots(mut self, interval_ticks: u64, dir: PathBuf) -> Self {
        self.snapshot_interval_ticks = interval_ticks;
        self.snapshot_dir = dir;
        self
    }
}

pub struct EngineBuilder {
    settings: EngineSettings,
    systems: Vec<Box<dyn System>>,
}

impl EngineBuilder {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            systems: Vec::new(),
        }
    }

    pub fn with_system(mut self, system: impl System + 'static) -> Self {
        self.systems.push(Box::new(system));
        self
    }

    pub fn build(self) -> Engine {
        Engine {
            rng: RngManager::new(self.settings.seed),
            systems: self.systems,
            snapshot_writer: SnapshotWriter::new(
                &self.settings.snapshot_dir,
                self.settings.snapshot_interval_ticks,
            ),
            tick: 0,
            settings: self.settings,
        }
    }
}

pub struct Engine {
    rng: RngManager,
    systems: Vec<Box<dyn System>>,
    snapshot_writer: SnapshotWriter,
    tick: u64,
    settings: EngineSettings,
}

impl Engine {
    /// Engine with the fixed update pipeline: movement integrates first,
    /// steering and the control systems then produce next-tick forces, and
    /// collision and health observe the settled state. The order is part of
    /// the simulation contract and is not reorderable.
    pub fn with_default_systems(settings: EngineSettings) -> Self {
        EngineBuilder::new(settings)
            .with_system(MovementSystem::new())
            .with_system(SteeringSystem::new())
            .with_system(PlayerInputSystem::new())
            .with_system(WanderSystem::new())
            .with_system(CollisionSystem::new())
            .with_system(HealthSystem::new())
            .build()
    }

    /// Runs every system once against the world and drains the events they
    /// raised.
    pub fn tick(&mut self, world: &mut World, input: &InputState) -> Result<TickSummary> {
        self.tick += 1;
        let ctx = SystemContext {
            tick: self.tick,
            dt: self.settings.fixed_dt,
            input,
        };
        let mut system_reports = Vec::with_capacity(self.systems.len());
        for system in &mut self.systems {
            let mut stream = self.rng.stream(system.name());
            let start = Instant::now();
            system.run(&ctx, world, &mut stream)?;
            system_reports.push(SystemRunReport {
                name: system.name(),
                duration_ms: start.elapsed().as_secs_f64() * 1_000.0,
            });
        }
        let events = world.drain_events();
        let snapshot_path =
            self.snapshot_writer
                .maybe_write(self.tick, &self.settings.scenario_name, world)?;
        Ok(TickSummary {
            tick: self.tick,
            events,
            system_reports,
            snapshot_path,
        })
    }

    /// Drives `ticks` updates with a constant input, aggregating event
    /// counts. The headless runner's main loop.
    pub fn run(&mut self, world: &mut World, input: &InputState, ticks: u64) -> Result<RunReport> {
        let mut report = RunReport::default();
        for _ in 0..ticks {
            let summary = self.tick(world, input)?;
            for event in &summary.events {
                match event {
                    SimEvent::Collision { .. } => report.collisions += 1,
                    SimEvent::Died { .. } => report.deaths += 1,
                }
            }
            report.ticks += 1;
        }
        Ok(report)
    }

    /// Render-phase entry point. Pure read: repeated calls without an
    /// intervening tick return identical poses.
    pub fn render_frame(&self, world: &World) -> Vec<RenderPose> {
        collect_poses(world)
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn fixed_dt(&self) -> f32 {
        self.settings.fixed_dt
    }

    pub fn scenario_name(&self) -> &str {
        &self.settings.scenario_name
    }
}

#[derive(Debug, Clone)]
pub struct SystemRunReport {
    pub name: &'static str,
    pub duration_ms: f64,
}

#[derive(Debug, Clone)]
pub struct TickSummary {
    pub tick: u64,
    pub events: Vec<SimEvent>,
    pub system_reports: Vec<SystemRunReport>,
    pub snapshot_path: Option<PathBuf>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub ticks: u64,
    pub collisions: u64,
    pub deaths: u64,
}

/// Fixed-timestep accumulator for the external main loop: feed it real
/// elapsed time, drain it in constant-size steps.
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(step: f32) -> Self {
        Self {
            step,
            accumulator: 0.0,
        }
    }

    pub fn accumulate(&mut self, elapsed: f32) {
        self.accumulator += elapsed.max(0.0);
    }

    /// Consumes one step if enough time has accumulated.
    pub fn consume(&mut self) -> bool {
        if self.accumulator >= self.step {
            self.accumulator -= self.step;
            true
        } else {
            false
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }
}
