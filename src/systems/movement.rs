use anyhow::Result;

use crate::{
    ecs::View2,
    engine::{System, SystemContext},
    rng::SystemRng,
    world::World,
};

/// Semi-implicit Euler integrator: acceleration feeds velocity, velocity
/// feeds position. Clamping is the producing system's responsibility.
pub struct MovementSystem;

impl MovementSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MovementSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for MovementSystem {
    fn name(&self) -> &'static str {
        "movement"
    }

    fn run(
        &mut self,
        ctx: &SystemContext,
        world: &mut World,
        _rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        let dt = ctx.dt;
        let mut view = View2::new(&mut world.transforms, &mut world.motions);
        view.for_each(|_, transform, motion| {
            motion.velocity += motion.acceleration * dt;
            transform.position += motion.velocity * dt;
        });
        Ok(())
    }
}
