//! Dodge - a side-scrolling thrust-against-gravity arcade game
//!
//! Core modules:
//! - `math`: 2D vector and scalar helpers
//! - `sim`: Deterministic simulation (physics, collisions, particles, game state)
//! - `config`: Per-variant tuning
//! - `platform`: Clock, input, renderer, audio and RNG collaborators
//! - `render`: Session-to-renderer mapping

pub mod config;
pub mod error;
pub mod math;
pub mod platform;
pub mod render;
pub mod sim;

pub use config::{CollisionMethod, GameConfig, OpacityMode, Variant};
pub use error::{ConfigError, DodgeError};
pub use math::Vector2D;

/// Game configuration constants
pub mod consts {
    /// Seed used when none is given
    pub const DEFAULT_SEED: u64 = 0x00D0_D9E5;
    /// Default headless run length (one minute at 30 fps)
    pub const DEFAULT_TICKS: u64 = 30 * 60;
}
