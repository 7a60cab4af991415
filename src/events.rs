//! Events raised by update-phase systems
//!
//! Systems report detections as structured events rather than acting on
//! them; the caller of the tick decides cleanup and resolution policy.

use crate::ecs::EntityId;
use crate::math::Rect;

#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    /// Two collider-carrying entities overlap. `a < b`, never self-pairs.
    Collision {
        a: EntityId,
        b: EntityId,
        overlap: Rect,
    },
    /// An entity's health reached zero. Emitted once per depletion; the
    /// entity and its components are left in place.
    Died { entity: EntityId },
}
