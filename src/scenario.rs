//! Scenario configuration and world setup
//!
//! Scenarios are YAML files describing the initial population: flock size
//! and tuning, spawn bounds, initial speed range, optional obstacles, an
//! optional player, and optional wandering critters. World construction is
//! seeded, so the same scenario always builds the same world.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use thiserror::Error;

use crate::components::{
    AiControlled, Boid, Collider, Health, Motion, PlayerControlled, Transform, Wander,
};
use crate::world::World;

fn default_snapshot_interval_ticks() -> u64 {
    0
}

fn default_target() -> Vec2 {
    Vec2::new(512.0, 384.0)
}

fn default_spawn_min() -> Vec2 {
    Vec2::new(50.0, 50.0)
}

fn default_spawn_max() -> Vec2 {
    Vec2::new(974.0, 718.0)
}

fn default_speed_min() -> f32 {
    20.0
}

fn default_speed_max() -> f32 {
    80.0
}

fn default_wander_interval() -> f32 {
    2.0
}

fn default_player_health() -> i32 {
    100
}

fn default_player_size() -> Vec2 {
    Vec2::new(16.0, 16.0)
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    pub seed: u64,
    #[serde(default)]
    pub ticks: Option<u64>,
    #[serde(default = "default_snapshot_interval_ticks")]
    pub snapshot_interval_ticks: u64,
    /// Seek target standing in for the pointer in headless runs.
    #[serde(default = "default_target")]
    pub target: Vec2,
    pub flock: FlockConfig,
    #[serde(default)]
    pub obstacles: Vec<ObstacleConfig>,
    #[serde(default)]
    pub wanderers: Option<WandererConfig>,
    #[serde(default)]
    pub player: Option<PlayerConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlockConfig {
    pub count: u32,
    #[serde(default = "default_spawn_min")]
    pub spawn_min: Vec2,
    #[serde(default = "default_spawn_max")]
    pub spawn_max: Vec2,
    #[serde(default = "default_speed_min")]
    pub speed_min: f32,
    #[serde(default = "default_speed_max")]
    pub speed_max: f32,
    #[serde(default)]
    pub tuning: Boid,
    /// When set, flock members also carry a collider of this size.
    #[serde(default)]
    pub collider_size: Option<Vec2>,
    /// When set, flock members also carry this much health.
    #[serde(default)]
    pub health: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObstacleConfig {
    pub name: Option<String>,
    pub position: Vec2,
    pub size: Vec2,
    #[serde(default)]
    pub is_trigger: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WandererConfig {
    pub count: u32,
    #[serde(default = "default_wander_interval")]
    pub interval: f32,
    #[serde(default = "default_spawn_min")]
    pub spawn_min: Vec2,
    #[serde(default = "default_spawn_max")]
    pub spawn_max: Vec2,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerConfig {
    pub position: Vec2,
    #[serde(default = "default_player_health")]
    pub health: i32,
    #[serde(default = "default_player_size")]
    pub size: Vec2,
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario needs at least one flock member")]
    EmptyFlock,
    #[error("spawn bounds are inverted: min {min:?} exceeds max {max:?}")]
    InvertedSpawnBounds { min: Vec2, max: Vec2 },
    #[error("speed range is inverted: {min} exceeds {max}")]
    InvertedSpeedRange { min: f32, max: f32 },
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed to read scenario file {}", path.display()))?;
        let scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        scenario
            .validate()
            .with_context(|| format!("invalid scenario {}", path.display()))?;
        Ok(scenario)
    }
}

impl Scenario {
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.flock.count == 0 {
            return Err(ScenarioError::EmptyFlock);
        }
        if self.flock.spawn_min.x > self.flock.spawn_max.x
            || self.flock.spawn_min.y > self.flock.spawn_max.y
        {
            return Err(ScenarioError::InvertedSpawnBounds {
                min: self.flock.spawn_min,
                max: self.flock.spawn_max,
            });
        }
        if self.flock.speed_min > self.flock.speed_max {
            return Err(ScenarioError::InvertedSpeedRange {
                min: self.flock.speed_min,
                max: self.flock.speed_max,
            });
        }
        Ok(())
    }

    pub fn build_world(&self) -> World {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut world = World::new();

        for (i, obstacle) in self.obstacles.iter().enumerate() {
            let label = obstacle
                .name
                .clone()
                .unwrap_or_else(|| format!("obstacle_{i}"));
            let id = world.create_entity(label);
            world.transforms.add(id, Transform::at(obstacle.position));
            world.colliders.add(
                id,
                Collider {
                    is_trigger: obstacle.is_trigger,
                    ..Collider::boxed(obstacle.size)
                },
            );
        }

        let flock = &self.flock;
        for i in 0..flock.count {
            let id = world.create_entity(format!("boid_{i}"));
            let position = Vec2::new(
                rng.gen_range(flock.spawn_min.x..=flock.spawn_max.x),
                rng.gen_range(flock.spawn_min.y..=flock.spawn_max.y),
            );
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let speed = rng.gen_range(flock.speed_min..=flock.speed_max);
            let velocity = Vec2::new(angle.cos(), angle.sin()) * speed;

            world.transforms.add(id, Transform::at(position));
            world.motions.add(id, Motion::with_velocity(velocity));
            world.boids.add(id, flock.tuning);
            if let Some(size) = flock.collider_size {
                world.colliders.add(id, Collider::boxed(size));
            }
            if let Some(health) = flock.health {
                world.healths.add(id, Health::new(health));
            }
        }

        if let Some(wanderers) = &self.wanderers {
            for i in 0..wanderers.count {
                let id = world.create_entity(format!("wanderer_{i}"));
                let position = Vec2::new(
                    rng.gen_range(wanderers.spawn_min.x..=wanderers.spawn_max.x),
                    rng.gen_range(wanderers.spawn_min.y..=wanderers.spawn_max.y),
                );
                world.transforms.add(id, Transform::at(position));
                world.motions.add(id, Motion::default());
                world.ai.add(id, AiControlled);
                world.wanderers.add(id, Wander::every(wanderers.interval));
            }
        }

        if let Some(player) = &self.player {
            let id = world.create_entity("player");
            world.transforms.add(id, Transform::at(player.position));
            world.motions.add(id, Motion::default());
            world.players.add(id, PlayerControlled);
            world.colliders.add(id, Collider::boxed(player.size));
            world.healths.add(id, Health::new(player.health));
        }

        world
    }

    pub fn ticks(&self, override_ticks: Option<u64>) -> u64 {
        override_ticks.or(self.ticks).unwrap_or(600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = "\
name: minimal
seed: 3
flock:
  count: 4
";

    #[test]
    fn minimal_yaml_fills_in_defaults() {
        let scenario: Scenario = serde_yaml::from_str(MINIMAL).unwrap();
        scenario.validate().unwrap();

        assert_eq!(scenario.name, "minimal");
        assert_eq!(scenario.flock.count, 4);
        assert_eq!(scenario.flock.tuning, Boid::default());
        assert_eq!(scenario.target, default_target());
        assert_eq!(scenario.snapshot_interval_ticks, 0);
        assert_eq!(scenario.ticks(None), 600);
        assert_eq!(scenario.ticks(Some(42)), 42);
    }

    #[test]
    fn empty_flock_is_rejected() {
        let mut scenario: Scenario = serde_yaml::from_str(MINIMAL).unwrap();
        scenario.flock.count = 0;
        assert!(matches!(
            scenario.validate(),
            Err(ScenarioError::EmptyFlock)
        ));
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let mut scenario: Scenario = serde_yaml::from_str(MINIMAL).unwrap();
        scenario.flock.spawn_min = Vec2::new(500.0, 0.0);
        scenario.flock.spawn_max = Vec2::new(100.0, 100.0);
        assert!(matches!(
            scenario.validate(),
            Err(ScenarioError::InvertedSpawnBounds { .. })
        ));

        let mut scenario: Scenario = serde_yaml::from_str(MINIMAL).unwrap();
        scenario.flock.speed_min = 90.0;
        scenario.flock.speed_max = 10.0;
        assert!(matches!(
            scenario.validate(),
            Err(ScenarioError::InvertedSpeedRange { .. })
        ));
    }

    #[test]
    fn build_world_is_deterministic_for_a_seed() {
        let scenario: Scenario = serde_yaml::from_str(MINIMAL).unwrap();

        let a = scenario.build_world();
        let b = scenario.build_world();
        assert_eq!(a.entity_count(), b.entity_count());
        for (id, transform) in a.transforms.iter() {
            assert_eq!(b.transforms.get(id), Some(transform));
        }
        for (id, motion) in a.motions.iter() {
            assert_eq!(b.motions.get(id), Some(motion));
        }
    }

    #[test]
    fn optional_population_sections_spawn() {
        let yaml = "\
name: full
seed: 9
flock:
  count: 2
  collider_size: [8.0, 8.0]
  health: 50
obstacles:
  - position: [100.0, 100.0]
    size: [32.0, 32.0]
wanderers:
  count: 3
player:
  position: [10.0, 10.0]
";
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        scenario.validate().unwrap();
        let world = scenario.build_world();

        assert_eq!(world.entity_count(), 7);
        assert_eq!(world.boids.len(), 2);
        // Two flock members, one obstacle, one player carry colliders.
        assert_eq!(world.colliders.len(), 4);
        assert_eq!(world.healths.len(), 3);
        assert_eq!(world.wanderers.len(), 3);
        assert_eq!(world.players.len(), 1);
    }
}
