//! Entity-component storage core
//!
//! Entities are opaque ids, components live in per-type sparse stores, and
//! multi-component queries are computed as set intersections over those
//! stores. The set of component types is fixed at compile time; there is no
//! archetype bookkeeping and no per-access dynamic dispatch.

pub mod entity;
pub mod store;
pub mod view;

pub use entity::{EntityAllocator, EntityId};
pub use store::ComponentStore;
pub use view::{View1, View2, View3};
