use anyhow::Result;
use glam::Vec2;
use log::debug;

use crate::{
    ecs::View2,
    engine::{System, SystemContext},
    events::SimEvent,
    math::Rect,
    rng::SystemRng,
    world::World,
};

/// Pairwise AABB overlap detection over every collider-carrying entity.
/// Detection only: each overlap becomes a `SimEvent::Collision`; resolution
/// is the caller's policy. O(n²) over the packed snapshot.
pub struct CollisionSystem;

impl CollisionSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CollisionSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn collider_rect(position: Vec2, bounds: &Rect) -> Rect {
    let center = position + Vec2::new(bounds.x, bounds.y);
    Rect::centered_at(center, Vec2::new(bounds.w, bounds.h))
}

impl System for CollisionSystem {
    fn name(&self) -> &'static str {
        "collision"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        world: &mut World,
        _rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        let packed = View2::new(&mut world.transforms, &mut world.colliders).into_packed();

        let mut events = Vec::new();
        for i in 0..packed.len() {
            let (id_a, transform_a, collider_a) = &packed[i];
            let rect_a = collider_rect(transform_a.position, &collider_a.bounds);
            for (id_b, transform_b, collider_b) in packed.iter().skip(i + 1) {
                let rect_b = collider_rect(transform_b.position, &collider_b.bounds);
                if let Some(overlap) = rect_a.intersection(&rect_b) {
                    debug!(
                        "collision between {} and {}",
                        id_a.raw(),
                        id_b.raw()
                    );
                    events.push(SimEvent::Collision {
                        a: *id_a,
                        b: *id_b,
                        overlap,
                    });
                }
            }
        }
        for event in events {
            world.push_event(event);
        }
        Ok(())
    }
}
