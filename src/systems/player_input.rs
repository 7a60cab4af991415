use anyhow::Result;
use glam::Vec2;

use crate::{
    ecs::View3,
    engine::{System, SystemContext},
    rng::SystemRng,
    world::World,
};

const ACCELERATION: f32 = 200.0;
const IDLE_FRICTION: f32 = 0.99;

/// Drives `PlayerControlled` entities from the sampled input axis.
pub struct PlayerInputSystem;

impl PlayerInputSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlayerInputSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for PlayerInputSystem {
    fn name(&self) -> &'static str {
        "player_input"
    }

    fn run(
        &mut self,
        ctx: &SystemContext,
        world: &mut World,
        _rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        let axis = ctx.input.axis;
        let mut view = View3::new(&mut world.transforms, &mut world.motions, &mut world.players);
        view.for_each(|_, _, motion, _| {
            motion.acceleration = axis * ACCELERATION;
            if axis == Vec2::ZERO {
                motion.velocity *= IDLE_FRICTION;
            }
        });
        Ok(())
    }
}
