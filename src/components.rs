//! Component types for the flocking simulation

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::math::Rect;

/// Spatial pose: position, rotation in degrees, per-axis scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec2,
    pub rotation: f32,
    pub scale: Vec2,
}

impl Transform {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
        }
    }
}

/// Kinematic state integrated by the movement system.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    pub velocity: Vec2,
    pub acceleration: Vec2,
}

impl Motion {
    pub fn with_velocity(velocity: Vec2) -> Self {
        Self {
            velocity,
            acceleration: Vec2::ZERO,
        }
    }
}

/// Steering tuning parameters for a flock member.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Boid {
    pub max_speed: f32,
    pub max_force: f32,
    pub neighbor_radius: f32,
    pub separation_radius: f32,
}

impl Default for Boid {
    fn default() -> Self {
        Self {
            max_speed: 400.0,
            max_force: 100.0,
            neighbor_radius: 40.0,
            separation_radius: 20.0,
        }
    }
}

/// Spatial extent for overlap tests. `bounds.x/y` offset the box center
/// from the entity's position; `bounds.w/h` are its full extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub bounds: Rect,
    pub is_trigger: bool,
}

impl Collider {
    /// Solid box of the given size centered on the entity's position.
    pub fn boxed(size: Vec2) -> Self {
        Self {
            bounds: Rect::new(0.0, 0.0, size.x, size.y),
            is_trigger: false,
        }
    }
}

/// Bounded damage/regeneration resource.
///
/// Regeneration accrues fractionally between ticks in `regen_carry`; the
/// integer-valued `current` only moves by whole points. `depleted` arms the
/// terminal-state signal so it fires once per depletion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
    #[serde(default)]
    pub(crate) regen_carry: f32,
    #[serde(default)]
    pub(crate) depleted: bool,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self {
            current: max,
            max,
            regen_carry: 0.0,
            depleted: false,
        }
    }

    /// Clamps at exactly zero; `current` never goes negative.
    pub fn apply_damage(&mut self, amount: i32) {
        self.current = (self.current - amount.max(0)).max(0);
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }
}

/// Diagnostic label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name {
    pub value: String,
}

impl Name {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// Marker: this entity's motion is driven by player input.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerControlled;

/// Marker: this entity's motion is driven by the wander system.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiControlled;

/// Per-entity wander timer. Carrying the retarget countdown on the entity
/// keeps wandering reproducible; there is no shared timer across entities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wander {
    /// Seconds between random heading changes.
    pub interval: f32,
    /// Seconds until the next heading change.
    pub remaining: f32,
}

impl Wander {
    pub fn every(interval: f32) -> Self {
        Self {
            interval,
            remaining: 0.0,
        }
    }
}

impl Default for Wander {
    fn default() -> Self {
        Self::every(2.0)
    }
}
