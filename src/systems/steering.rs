//! Flocking steering: seek plus separation, alignment, and cohesion
//!
//! Forces are computed against a read-only copy of the flock taken once per
//! tick; the O(n²) neighbor search indexes into that snapshot rather than
//! re-querying the stores per agent.

use anyhow::Result;
use glam::Vec2;

use crate::{
    components::Boid,
    ecs::{EntityId, View3},
    engine::{System, SystemContext},
    rng::SystemRng,
    world::World,
};

const SEPARATION_WEIGHT: f32 = 1.5;
const ALIGNMENT_WEIGHT: f32 = 1.0;
const COHESION_WEIGHT: f32 = 1.0;
const SEEK_WEIGHT: f32 = 1.2;

/// Seek contributes nothing inside this distance of the target.
const TARGET_DEADZONE: f32 = 1.0;

const EPSILON: f32 = 1e-6;

/// Pose sample of one flock member, copied out before force computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockMember {
    pub id: EntityId,
    pub position: Vec2,
    pub velocity: Vec2,
}

/// The four steering contributions for one agent, pre-weighting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringForces {
    pub seek: Vec2,
    pub separation: Vec2,
    pub alignment: Vec2,
    pub cohesion: Vec2,
}

impl SteeringForces {
    pub fn combined(&self) -> Vec2 {
        self.separation * SEPARATION_WEIGHT
            + self.alignment * ALIGNMENT_WEIGHT
            + self.cohesion * COHESION_WEIGHT
            + self.seek * SEEK_WEIGHT
    }
}

/// Turns a desired direction into a steering force: scale to max speed,
/// subtract the current velocity, clamp to max force. A near-zero direction
/// contributes nothing rather than being normalized.
fn steer_toward(direction: Vec2, velocity: Vec2, params: &Boid) -> Vec2 {
    if direction.length_squared() <= EPSILON {
        return Vec2::ZERO;
    }
    let desired = direction.normalize() * params.max_speed;
    (desired - velocity).clamp_length_max(params.max_force)
}

/// Computes the steering forces for `flock[index]` against the rest of the
/// flock and the external target.
pub fn flock_forces(
    index: usize,
    flock: &[FlockMember],
    params: &Boid,
    target: Vec2,
) -> SteeringForces {
    let me = &flock[index];

    let to_target = target - me.position;
    let seek = if to_target.length() > TARGET_DEADZONE {
        steer_toward(to_target, me.velocity, params)
    } else {
        Vec2::ZERO
    };

    let mut separation_sum = Vec2::ZERO;
    let mut separation_count = 0u32;
    let mut velocity_sum = Vec2::ZERO;
    let mut position_sum = Vec2::ZERO;
    let mut neighbor_count = 0u32;

    for (j, other) in flock.iter().enumerate() {
        if j == index {
            continue;
        }
        let diff = me.position - other.position;
        let distance = diff.length();

        // Inverse-distance weighting; coincident agents carry no direction.
        if distance < params.separation_radius && distance > 0.0 {
            separation_sum += diff / (distance * distance);
            separation_count += 1;
        }

        if distance < params.neighbor_radius {
            velocity_sum += other.velocity;
            position_sum += other.position;
            neighbor_count += 1;
        }
    }

    let separation = if separation_count > 0 {
        steer_toward(
            separation_sum / separation_count as f32,
            me.velocity,
            params,
        )
    } else {
        Vec2::ZERO
    };

    let (alignment, cohesion) = if neighbor_count > 0 {
        let average_velocity = velocity_sum / neighbor_count as f32;
        let average_position = position_sum / neighbor_count as f32;
        (
            steer_toward(average_velocity, me.velocity, params),
            steer_toward(average_position - me.position, me.velocity, params),
        )
    } else {
        (Vec2::ZERO, Vec2::ZERO)
    };

    SteeringForces {
        seek,
        separation,
        alignment,
        cohesion,
    }
}

pub struct SteeringSystem;

impl SteeringSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SteeringSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for SteeringSystem {
    fn name(&self) -> &'static str {
        "steering"
    }

    fn run(
        &mut self,
        ctx: &SystemContext,
        world: &mut World,
        _rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        let target = ctx.input.pointer;
        let dt = ctx.dt;

        let mut view = View3::new(&mut world.transforms, &mut world.motions, &mut world.boids);

        let mut flock = Vec::with_capacity(view.len());
        view.for_each(|id, transform, motion, _| {
            flock.push(FlockMember {
                id,
                position: transform.position,
                velocity: motion.velocity,
            });
        });

        let mut index = 0;
        view.for_each(|_, _, motion, boid| {
            let acceleration = flock_forces(index, &flock, boid, target).combined();
            motion.acceleration = acceleration;
            motion.velocity += acceleration * dt;
            motion.velocity = motion.velocity.clamp_length_max(boid.max_speed);
            index += 1;
        });
        Ok(())
    }
}
