//! Game state and core simulation types
//!
//! Everything one play-through needs lives in [`GameSession`]; tuning lives in
//! [`GameConfig`] and is passed alongside, never stored in globals.

use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::particle::ParticleSystem;
use crate::config::GameConfig;
use crate::math::Vector2D;

/// Where the session is, derived from `started` and `player.dead`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start input
    Waiting,
    /// Active gameplay
    Playing,
    /// Player died, waiting for restart input
    Dead,
}

/// The player-controlled sprite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub thrust: f64,
    pub width: f64,
    pub height: f64,
    pub dead: bool,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            position: config.player_start,
            velocity: Vector2D::ZERO,
            thrust: config.thrust,
            width: config.player_width,
            height: config.player_height,
            dead: false,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.position, self.width, self.height)
    }

    /// Sprite tilt in degrees: nose up while ascending, down while falling
    pub fn tilt_degrees(&self) -> f64 {
        if self.velocity.y < 0.0 {
            10.0
        } else if self.velocity.y > 0.0 {
            -10.0
        } else {
            crate::math::smooth_lerp(10.0, -10.0, self.velocity.y)
        }
    }
}

/// A scrolling obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Top-left corner
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub width: f64,
    pub height: f64,
    /// Cosmetic rotation, degrees
    pub rotation_angle: f64,
    /// Radius used by circle collision
    pub radius: f64,
}

impl Obstacle {
    /// Square obstacle of side `size` moving left at `speed` (negative)
    pub fn new(position: Vector2D, size: f64, speed: f64, rotation_angle: f64) -> Self {
        Self {
            position,
            velocity: Vector2D::new(speed, 0.0),
            width: size,
            height: size,
            rotation_angle,
            radius: size / 2.0,
        }
    }

    pub fn center(&self) -> Vector2D {
        Vector2D::new(
            self.position.x + self.width / 2.0,
            self.position.y + self.height / 2.0,
        )
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.position, self.width, self.height)
    }

    pub fn update(&mut self, dt: f64, rotates: bool) {
        if rotates {
            self.rotation_angle += self.velocity.x * dt;
        }
        self.position = self.position + self.velocity * dt;
    }

    /// True once the trailing edge has crossed the left boundary
    pub fn is_off_screen(&self) -> bool {
        self.position.x < -self.width
    }
}

/// Horizontally wrapping background
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Background {
    pub x: f64,
    pub speed: f64,
    pub tile_width: f64,
}

impl Background {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            x: 0.0,
            speed: config.background_speed,
            tile_width: config.background_tile_width,
        }
    }

    pub fn update(&mut self, dt: f64) {
        if self.x <= -self.tile_width {
            self.x = 0.0;
        }
        self.x -= self.speed * dt;
    }
}

/// One play-through: from start to death, and again after each restart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub started: bool,
    /// Seconds survived
    pub score: f64,
    pub player: Player,
    /// Live obstacles, in spawn order
    pub obstacles: Vec<Obstacle>,
    pub trail_particles: ParticleSystem,
    pub exhaust_particles: ParticleSystem,
    pub background: Background,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Deaths across restarts
    pub deaths: u32,
}

impl GameSession {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            started: false,
            score: 0.0,
            player: Player::new(config),
            obstacles: Vec::new(),
            trail_particles: ParticleSystem::new(),
            exhaust_particles: ParticleSystem::new(),
            background: Background::new(config),
            time_ticks: 0,
            deaths: 0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        match (self.started, self.player.dead) {
            (false, _) => GamePhase::Waiting,
            (true, false) => GamePhase::Playing,
            (true, true) => GamePhase::Dead,
        }
    }

    /// Score accumulates only while this holds
    pub fn is_live(&self) -> bool {
        self.started && !self.player.dead
    }

    /// Whole seconds survived, as shown on the HUD
    pub fn display_score(&self) -> u64 {
        self.score as u64
    }

    /// Begin the first play-through. Ignored unless waiting with a live player.
    pub fn start(&mut self) -> bool {
        if self.started || self.player.dead {
            return false;
        }
        self.started = true;
        log::info!("Session started");
        true
    }

    /// Reset after death and resume play immediately. Ignored unless dead.
    pub fn restart(&mut self, config: &GameConfig) -> bool {
        if !(self.started && self.player.dead) {
            return false;
        }
        log::info!("Restarting after score {}", self.display_score());
        self.obstacles.clear();
        self.trail_particles.clear();
        self.exhaust_particles.clear();
        self.player = Player::new(config);
        self.score = 0.0;
        self.started = true;
        true
    }
}
