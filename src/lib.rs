pub mod components;
pub mod ecs;
pub mod engine;
pub mod events;
pub mod math;
pub mod render;
pub mod rng;
pub mod scenario;
pub mod snapshot;
pub mod systems;
pub mod world;

pub use engine::{Engine, EngineBuilder, EngineSettings, FixedTimestep, InputState, TickSummary};
pub use scenario::{Scenario, ScenarioLoader};
pub use world::World;
