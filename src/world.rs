//! World: entity registry plus one store per component type
//!
//! The set of stores is fixed at compile time (no reflection, no archetype
//! bookkeeping); query membership is derived from store presence on every
//! view construction. The world is exclusively owned by the simulation core
//! and mutated only by the engine's systems in their fixed order.

use crate::components::{
    AiControlled, Boid, Collider, Health, Motion, Name, PlayerControlled, Transform, Wander,
};
use crate::ecs::{ComponentStore, EntityAllocator, EntityId};
use crate::events::SimEvent;

pub struct World {
    allocator: EntityAllocator,
    pub transforms: ComponentStore<Transform>,
    pub motions: ComponentStore<Motion>,
    pub boids: ComponentStore<Boid>,
    pub colliders: ComponentStore<Collider>,
    pub healths: ComponentStore<Health>,
    pub names: ComponentStore<Name>,
    pub players: ComponentStore<PlayerControlled>,
    pub ai: ComponentStore<AiControlled>,
    pub wanderers: ComponentStore<Wander>,
    pub(crate) events: Vec<SimEvent>,
}

impl World {
    pub fn new() -> Self {
        Self {
            allocator: EntityAllocator::new(),
            transforms: ComponentStore::new(),
            motions: ComponentStore::new(),
            boids: ComponentStore::new(),
            colliders: ComponentStore::new(),
            healths: ComponentStore::new(),
            names: ComponentStore::new(),
            players: ComponentStore::new(),
            ai: ComponentStore::new(),
            wanderers: ComponentStore::new(),
            events: Vec::new(),
        }
    }

    /// Allocates a fresh entity and records its label.
    pub fn create_entity(&mut self, label: impl Into<String>) -> EntityId {
        let id = self.allocator.allocate();
        self.names.add(id, Name::new(label));
        id
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.allocator.is_alive(id)
    }

    pub fn entity_count(&self) -> usize {
        self.allocator.count()
    }

    /// Destruction extension point. Not exercised by the simulation loop
    /// itself; terminal states are reported as events and the caller
    /// decides teardown policy.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        if !self.allocator.release(id) {
            return false;
        }
        self.transforms.remove(id);
        self.motions.remove(id);
        self.boids.remove(id);
        self.colliders.remove(id);
        self.healths.remove(id);
        self.names.remove(id);
        self.players.remove(id);
        self.ai.remove(id);
        self.wanderers.remove(id);
        true
    }

    pub fn name_of(&self, id: EntityId) -> Option<&str> {
        self.names.get(id).map(|n| n.value.as_str())
    }

    pub(crate) fn push_event(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    pub(crate) fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
