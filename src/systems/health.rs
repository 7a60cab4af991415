use anyhow::Result;
use log::debug;

use crate::{
    ecs::View1,
    engine::{System, SystemContext},
    events::SimEvent,
    rng::SystemRng,
    world::World,
};

/// Whole points restored per second.
const REGEN_PER_SECOND: f32 = 10.0;

/// Regenerates health toward `max` and raises the terminal-state signal for
/// depleted entities. The signal fires once per depletion and re-arms if
/// regeneration brings the entity back; nothing is removed here.
pub struct HealthSystem;

impl HealthSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HealthSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for HealthSystem {
    fn name(&self) -> &'static str {
        "health"
    }

    fn run(
        &mut self,
        ctx: &SystemContext,
        world: &mut World,
        _rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        let dt = ctx.dt;
        let mut died = Vec::new();
        let mut view = View1::new(&mut world.healths);
        view.for_each(|id, health| {
            if health.current < health.max {
                // Sub-point amounts accrue in the carry so regeneration
                // still happens at small timesteps.
                health.regen_carry += REGEN_PER_SECOND * dt;
                let whole = health.regen_carry as i32;
                if whole > 0 {
                    health.current = (health.current + whole).min(health.max);
                    health.regen_carry -= whole as f32;
                }
            }

            if health.current <= 0 {
                if !health.depleted {
                    health.depleted = true;
                    died.push(id);
                }
            } else {
                health.depleted = false;
            }
        });
        for id in died {
            debug!("entity {} depleted its health", id.raw());
            world.push_event(SimEvent::Died { entity: id });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Health;
    use crate::ecs::EntityId;
    use crate::engine::InputState;
    use crate::rng::RngManager;

    const DT: f32 = 1.0 / 60.0;

    fn run_ticks(world: &mut World, ticks: u64) -> Vec<SimEvent> {
        let input = InputState::default();
        let mut rng_manager = RngManager::new(0);
        let mut events = Vec::new();
        for tick in 1..=ticks {
            let ctx = SystemContext {
                tick,
                dt: DT,
                input: &input,
            };
            HealthSystem::new()
                .run(&ctx, world, &mut rng_manager.stream("health"))
                .unwrap();
            events.extend(world.drain_events());
        }
        events
    }

    fn spawn_with_health(world: &mut World, current: i32, max: i32) -> EntityId {
        let e = world.create_entity("creature");
        let mut health = Health::new(max);
        health.apply_damage(max - current);
        world.healths.add(e, health);
        e
    }

    #[test]
    fn regeneration_accrues_across_small_timesteps() {
        let mut world = World::new();
        let e = spawn_with_health(&mut world, 50, 100);

        // One second of simulation at 60Hz restores ten points even though
        // a single step's worth is far below one point.
        run_ticks(&mut world, 60);
        assert_eq!(world.healths.get(e).unwrap().current, 60);
    }

    #[test]
    fn regeneration_clamps_at_max_and_stops_there() {
        let mut world = World::new();
        let e = spawn_with_health(&mut world, 99, 100);

        run_ticks(&mut world, 600);
        let health = world.healths.get(e).unwrap();
        assert_eq!(health.current, 100);

        // At max, further ticks change nothing.
        run_ticks(&mut world, 60);
        assert_eq!(world.healths.get(e).unwrap().current, 100);
    }

    #[test]
    fn depletion_signals_once() {
        let mut world = World::new();
        let e = spawn_with_health(&mut world, 0, 0);

        let events = run_ticks(&mut world, 5);
        assert_eq!(events, vec![SimEvent::Died { entity: e }]);
    }

    #[test]
    fn regenerating_back_re_arms_the_signal() {
        let mut world = World::new();
        let e = spawn_with_health(&mut world, 0, 100);

        // Depletes once, then regenerates above zero.
        let events = run_ticks(&mut world, 30);
        assert_eq!(events.len(), 1);
        assert!(world.healths.get(e).unwrap().current > 0);

        // A second depletion fires a second signal.
        world.healths.get_mut(e).unwrap().apply_damage(1_000);
        let events = run_ticks(&mut world, 5);
        assert_eq!(events, vec![SimEvent::Died { entity: e }]);
    }
}
