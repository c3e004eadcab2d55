//! Game configuration
//!
//! One parameterized game instead of three copies: every constant that used to
//! differ between the variants lives in [`GameConfig`]. Presets come from
//! [`Variant`]; custom configs load from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::math::Vector2D;
use crate::sim::particle::{ParticleShape, Rgba};

/// Built-in game variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// 256x240 at 30 fps, circle collision, per-tick gravity
    #[default]
    Classic,
    /// 512x480 at 60 fps, circle collision, per-tick gravity
    Large,
    /// 256x240 at 60 fps, box collision, gravity scaled by dt
    Boxed,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Classic, Variant::Large, Variant::Boxed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::Large => "large",
            Variant::Boxed => "boxed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "dodge" => Some(Variant::Classic),
            "large" | "hd" => Some(Variant::Large),
            "boxed" | "aabb" => Some(Variant::Boxed),
            _ => None,
        }
    }
}

/// Narrow-phase test used between the player and obstacles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionMethod {
    /// Obstacle is a circle of radius `width / 2`
    CircleAabb,
    /// Obstacle is its bounding box
    Aabb,
}

/// How particle opacity is derived at render time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OpacityMode {
    /// Opacity is the raw remaining lifetime in seconds (not clamped to 0..1)
    #[default]
    RawRemaining,
    /// Opacity is `remaining / total`, clamped to 0..1
    NormalizedFraction,
}

/// Inclusive numeric range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> Span<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, v: T) -> bool {
        self.min <= v && v <= self.max
    }

    fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

/// Particles trailing behind each obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailSettings {
    /// Particles emitted per obstacle per tick
    pub count: u32,
    /// Emission x, as a fraction of obstacle width from its left edge
    pub x_fraction: f64,
    /// Vertical spread around the obstacle center, as a fraction of its height
    pub y_spread_fraction: f64,
    /// Per-tick displacement
    pub velocity: Vector2D,
    pub color_start: Rgba,
    pub color_end: Rgba,
    /// Start size, mapped linearly from the obstacle size range
    pub size_start: Span<f64>,
    pub size_end: f64,
    pub lifetime: f64,
    pub shape: ParticleShape,
}

/// Particles emitted below the player while thrusting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExhaustSettings {
    pub count: u32,
    /// Integer jitter around the player's x
    pub x_jitter: i64,
    /// Emission y below the player's top edge
    pub y_offset: f64,
    pub velocity_x: f64,
    pub velocity_y: Span<f64>,
    pub color_start: Rgba,
    pub color_end: Rgba,
    pub size_start: Span<f64>,
    /// End size is drawn uniformly from `[0, size_end_max)`
    pub size_end_max: f64,
    pub lifetime: f64,
    pub shape: ParticleShape,
}

/// Every tuning constant of a game variant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub variant: Variant,
    pub width: f64,
    pub height: f64,
    pub target_fps: f64,

    // === Player ===
    /// Added to vertical velocity every tick
    pub gravity: f64,
    /// Multiply gravity by dt before adding it
    pub gravity_scaled_by_dt: bool,
    pub thrust: f64,
    /// Extra thrust multiplier applied while already ascending
    pub ascend_boost: f64,
    pub min_velocity: f64,
    pub max_velocity: f64,
    /// Player y is clamped to `[0, upper_bound]`
    pub upper_bound: f64,
    /// Player dies once y reaches this
    pub death_threshold: f64,
    pub player_start: Vector2D,
    pub player_width: f64,
    pub player_height: f64,

    // === Obstacles ===
    /// Obstacles appear this far past the right edge
    pub obstacle_spawn_x_offset: f64,
    pub obstacle_size: Span<i64>,
    pub obstacle_y: Span<i64>,
    pub obstacle_speed: Span<i64>,
    pub obstacle_rotates: bool,
    /// Spawn only while the live count is at most this
    pub max_live_obstacles_before_spawn: usize,
    pub collision: CollisionMethod,

    // === Background ===
    pub background_speed: f64,
    pub background_tile_width: f64,
    pub background_tile_height: f64,

    // === Particles ===
    pub opacity_mode: OpacityMode,
    pub trail: TrailSettings,
    pub exhaust: ExhaustSettings,
    /// Exhaust particles only age while the player falls slower than this
    pub exhaust_age_velocity_cap: f64,

    // === Audio ===
    pub music_volume: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl GameConfig {
    /// Build the preset for a variant
    pub fn from_variant(variant: Variant) -> Self {
        match variant {
            Variant::Classic => Self::classic(),
            Variant::Large => Self::large(),
            Variant::Boxed => Self::boxed(),
        }
    }

    fn classic() -> Self {
        Self {
            variant: Variant::Classic,
            width: 256.0,
            height: 240.0,
            target_fps: 30.0,

            gravity: 190.0,
            gravity_scaled_by_dt: false,
            thrust: 200.0,
            ascend_boost: 1.25,
            min_velocity: -190.0,
            max_velocity: 200.0,
            upper_bound: 256.0 + 32.0,
            death_threshold: 256.0 + 28.0,
            player_start: Vector2D::new(50.0, 100.0),
            player_width: 18.0,
            player_height: 28.0,

            obstacle_spawn_x_offset: 100.0,
            obstacle_size: Span::new(16, 32),
            obstacle_y: Span::new(-8, 240 - 16),
            obstacle_speed: Span::new(-350, -50),
            obstacle_rotates: true,
            max_live_obstacles_before_spawn: 2,
            collision: CollisionMethod::CircleAabb,

            background_speed: 30.0,
            background_tile_width: 256.0,
            background_tile_height: 256.0,

            opacity_mode: OpacityMode::RawRemaining,
            trail: TrailSettings {
                count: 3,
                x_fraction: 0.25,
                y_spread_fraction: 0.25,
                velocity: Vector2D::new(2.5, 0.0),
                color_start: Rgba::new(0.67, 0.84, 0.96, 1.0),
                color_end: Rgba::new(0.14, 0.36, 0.53, 1.0),
                size_start: Span::new(6.0, 12.0),
                size_end: 2.0,
                lifetime: 0.5,
                shape: ParticleShape::Square,
            },
            exhaust: ExhaustSettings {
                count: 1,
                x_jitter: 1,
                y_offset: 30.0,
                velocity_x: -0.25,
                velocity_y: Span::new(0.5, 2.5),
                color_start: Rgba::new(0.52, 0.38, 0.68, 1.0),
                color_end: Rgba::new(0.77, 0.62, 0.84, 1.0),
                size_start: Span::new(2.0, 6.0),
                size_end_max: 2.0,
                lifetime: 0.5,
                shape: ParticleShape::Square,
            },
            exhaust_age_velocity_cap: 300.0,

            music_volume: 50.0,
        }
    }

    fn large() -> Self {
        let base = Self::classic();
        Self {
            variant: Variant::Large,
            width: 512.0,
            height: 480.0,
            target_fps: 60.0,

            gravity: 380.0,
            thrust: 400.0,
            min_velocity: -380.0,
            max_velocity: 400.0,
            upper_bound: 512.0 + 64.0,
            death_threshold: 512.0 + 56.0,
            player_start: Vector2D::new(100.0, 200.0),
            player_width: 36.0,
            player_height: 56.0,

            obstacle_spawn_x_offset: 200.0,
            obstacle_size: Span::new(32, 64),
            obstacle_y: Span::new(-16, 480 - 32),
            obstacle_speed: Span::new(-700, -100),

            background_speed: 60.0,
            background_tile_width: 512.0,
            background_tile_height: 512.0,

            trail: TrailSettings {
                velocity: Vector2D::new(5.0, 0.0),
                size_start: Span::new(12.0, 24.0),
                size_end: 4.0,
                ..base.trail.clone()
            },
            exhaust: ExhaustSettings {
                x_jitter: 2,
                y_offset: 60.0,
                velocity_y: Span::new(1.0, 5.0),
                size_start: Span::new(4.0, 12.0),
                size_end_max: 4.0,
                ..base.exhaust.clone()
            },
            exhaust_age_velocity_cap: 600.0,
            ..base
        }
    }

    fn boxed() -> Self {
        let base = Self::classic();
        Self {
            variant: Variant::Boxed,
            target_fps: 60.0,
            gravity: 190.0 * 30.0,
            gravity_scaled_by_dt: true,
            obstacle_rotates: false,
            collision: CollisionMethod::Aabb,
            ..base
        }
    }

    /// Fixed simulation step
    pub fn dt(&self) -> f64 {
        1.0 / self.target_fps
    }

    /// Check internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fail = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if !(self.target_fps > 0.0 && self.target_fps.is_finite()) {
            return fail("target_fps must be positive and finite");
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return fail("screen dimensions must be positive");
        }
        if self.min_velocity > self.max_velocity {
            return fail("min_velocity must not exceed max_velocity");
        }
        if self.upper_bound < 0.0 {
            return fail("upper_bound must be non-negative");
        }
        if self.player_width <= 0.0 || self.player_height <= 0.0 {
            return fail("player size must be positive");
        }
        if !self.obstacle_size.is_ordered() || self.obstacle_size.min <= 0 {
            return fail("obstacle_size must be a positive, ordered range");
        }
        if self.obstacle_size.min == self.obstacle_size.max {
            // Trail size is remapped from this range
            return fail("obstacle_size range must not be empty");
        }
        if !self.obstacle_y.is_ordered() {
            return fail("obstacle_y must be ordered");
        }
        if !self.obstacle_speed.is_ordered() || self.obstacle_speed.max >= 0 {
            return fail("obstacle_speed must be an ordered range of leftward speeds");
        }
        if self.background_tile_width <= 0.0 {
            return fail("background_tile_width must be positive");
        }
        if self.trail.lifetime <= 0.0 || self.exhaust.lifetime <= 0.0 {
            return fail("particle lifetimes must be positive");
        }
        if !self.exhaust.velocity_y.is_ordered() || !self.exhaust.size_start.is_ordered() {
            return fail("exhaust ranges must be ordered");
        }
        if self.exhaust.x_jitter < 0 || self.exhaust.size_end_max < 0.0 {
            return fail("exhaust jitter and end size must be non-negative");
        }
        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!(
            "Loaded {} config from {}",
            config.variant.as_str(),
            path.display()
        );
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
