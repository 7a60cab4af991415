//! Render-phase query
//!
//! Pure read over the world: yields one pose per spatially-posed entity for
//! the external rendering collaborator. Never mutates, so repeated calls
//! without an intervening update return identical data.

use glam::Vec2;
use serde::Serialize;

use crate::ecs::EntityId;
use crate::world::World;

/// Agents below this speed face the default direction instead of their
/// velocity.
const FACING_SPEED_FLOOR: f32 = 0.1;

const DEFAULT_FACING: Vec2 = Vec2::new(0.0, -1.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RenderKind {
    /// Steering agent, drawn facing its heading.
    Agent,
    /// Static or non-flocking entity.
    Prop,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderPose {
    pub entity: EntityId,
    pub position: Vec2,
    pub rotation: f32,
    pub scale: Vec2,
    pub facing: Vec2,
    pub kind: RenderKind,
}

/// Unit heading derived from velocity, with a stable default when the
/// entity is effectively standing still.
pub fn facing_from_velocity(velocity: Vec2) -> Vec2 {
    let speed = velocity.length();
    if speed < FACING_SPEED_FLOOR {
        DEFAULT_FACING
    } else {
        velocity / speed
    }
}

pub fn collect_poses(world: &World) -> Vec<RenderPose> {
    let mut poses: Vec<RenderPose> = world
        .transforms
        .iter()
        .map(|(id, transform)| {
            let facing = world
                .motions
                .get(id)
                .map(|motion| facing_from_velocity(motion.velocity))
                .unwrap_or(DEFAULT_FACING);
            let kind = if world.boids.has(id) {
                RenderKind::Agent
            } else {
                RenderKind::Prop
            };
            RenderPose {
                entity: id,
                position: transform.position,
                rotation: transform.rotation,
                scale: transform.scale,
                facing,
                kind,
            }
        })
        .collect();
    poses.sort_by_key(|pose| pose.entity);
    poses
}
