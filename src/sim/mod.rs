//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected, seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies beyond the collaborator traits

pub mod collision;
pub mod particle;
pub mod physics;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, CollisionDetector, aabb_overlap, circle_aabb_overlap};
pub use particle::{Particle, ParticleShape, ParticleSystem, ParticleVisual, Rgba};
pub use physics::PlayerPhysics;
pub use spawner::ObstacleSpawner;
pub use state::{Background, GamePhase, GameSession, Obstacle, Player};
pub use tick::{TickInput, TickOutcome, autopilot_input, tick};
