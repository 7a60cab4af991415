//! Periodic JSON snapshots of world poses
//!
//! Write-only observability for the headless runner; snapshots are never
//! read back into a world.

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::Serialize;
use thiserror::Error;

use crate::world::World;

#[derive(Debug, Serialize)]
pub struct EntityRow {
    pub id: u64,
    pub name: Option<String>,
    pub position: Vec2,
    pub velocity: Option<Vec2>,
    pub health: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct WorldSnapshot {
    pub scenario: String,
    pub tick: u64,
    pub entities: usize,
    pub rows: Vec<EntityRow>,
}

impl WorldSnapshot {
    pub fn capture(tick: u64, scenario: &str, world: &World) -> Self {
        let mut rows: Vec<EntityRow> = world
            .transforms
            .iter()
            .map(|(id, transform)| EntityRow {
                id: id.raw(),
                name: world.name_of(id).map(str::to_owned),
                position: transform.position,
                velocity: world.motions.get(id).map(|m| m.velocity),
                health: world.healths.get(id).map(|h| h.current),
            })
            .collect();
        rows.sort_by_key(|row| row.id);
        Self {
            scenario: scenario.to_string(),
            tick,
            entities: world.entity_count(),
            rows,
        }
    }
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub struct SnapshotWriter {
    dir: PathBuf,
    interval_ticks: u64,
}

impl SnapshotWriter {
    pub fn new(dir: impl AsRef<Path>, interval_ticks: u64) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            interval_ticks,
        }
    }

    /// Writes a snapshot when the tick lands on the interval; an interval
    /// of zero disables writing entirely.
    pub fn maybe_write(
        &self,
        tick: u64,
        scenario: &str,
        world: &World,
    ) -> Result<Option<PathBuf>, SnapshotError> {
        if self.interval_ticks == 0 || tick % self.interval_ticks != 0 {
            return Ok(None);
        }

        let dir = self.dir.join(scenario);
        fs::create_dir_all(&dir)?;
        let path = dir.join(format!("tick_{tick:06}.json"));
        let snapshot = WorldSnapshot::capture(tick, scenario, world);
        fs::write(&path, serde_json::to_string_pretty(&snapshot)?)?;
        Ok(Some(path))
    }
}
