mod collision;
mod health;
mod movement;
mod player_input;
mod steering;
mod wander;

pub use collision::CollisionSystem;
pub use health::HealthSystem;
pub use movement::MovementSystem;
pub use player_input::PlayerInputSystem;
pub use steering::{flock_forces, FlockMember, SteeringForces, SteeringSystem};
pub use wander::WanderSystem;
