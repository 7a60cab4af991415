use anyhow::Result;
use glam::Vec2;
use rand::Rng;

use crate::{
    ecs::View3,
    engine::{System, SystemContext},
    rng::SystemRng,
    world::World,
};

const ACCELERATION: f32 = 100.0;
const FRICTION: f32 = 0.95;

/// Random-walk driver for `AiControlled` entities. Each entity counts down
/// its own `Wander` timer and redraws a heading from a per-entity RNG
/// stream, so behavior is reproducible and independent of visit order.
pub struct WanderSystem;

impl WanderSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WanderSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for WanderSystem {
    fn name(&self) -> &'static str {
        "wander"
    }

    fn run(
        &mut self,
        ctx: &SystemContext,
        world: &mut World,
        rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        let dt = ctx.dt;
        let tick = ctx.tick;
        let mut view = View3::new(&mut world.motions, &mut world.ai, &mut world.wanderers);
        view.for_each(|id, motion, _, wander| {
            wander.remaining -= dt;
            if wander.remaining <= 0.0 {
                wander.remaining = wander.interval;
                let mut entity_rng = rng.for_entity(id, tick);
                let angle = entity_rng.gen_range(0.0..std::f32::consts::TAU);
                motion.acceleration = Vec2::new(angle.cos(), angle.sin()) * ACCELERATION;
            }
            motion.velocity *= FRICTION;
        });
        Ok(())
    }
}
