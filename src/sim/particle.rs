//! Particle lifecycle
//!
//! A particle is Active until its remaining lifetime drops to zero, then
//! Expired and removed by its owning [`ParticleSystem`] in the same pass.
//! Size, colour and opacity are derived at render time, never stored.

use serde::{Deserialize, Serialize};

use crate::config::{ExhaustSettings, OpacityMode, TrailSettings};
use crate::error::DodgeError;
use crate::math::{Vector2D, remap};
use crate::platform::RandomSource;

use super::state::{Obstacle, Player};

/// RGBA colour, channels in `0..1`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Per-channel linear interpolation from `self` (t = 0) to `other` (t = 1)
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Self::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }
}

/// Drawn as a regular polygon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ParticleShape {
    #[default]
    Circle,
    Square,
    Triangle,
}

/// A short-lived visual effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vector2D,
    /// Per-tick displacement, not scaled by dt
    pub velocity: Vector2D,
    pub color_start: Rgba,
    pub color_end: Rgba,
    pub size_start: f64,
    pub size_end: f64,
    pub lifetime_total: f64,
    pub lifetime_remaining: f64,
    pub shape: ParticleShape,
    active: bool,
}

/// Render-time attributes of a particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleVisual {
    pub position: Vector2D,
    pub radius: f64,
    pub color: Rgba,
    pub opacity: f64,
    pub shape: ParticleShape,
}

impl Particle {
    /// New particle with the stock defaults: white, size 8 to 3, one second
    pub fn new(position: Vector2D, velocity: Vector2D) -> Self {
        Self {
            position,
            velocity,
            color_start: Rgba::WHITE,
            color_end: Rgba::WHITE,
            size_start: 8.0,
            size_end: 3.0,
            lifetime_total: 1.0,
            lifetime_remaining: 1.0,
            shape: ParticleShape::Circle,
            active: true,
        }
    }

    pub fn with_colors(mut self, start: Rgba, end: Rgba) -> Self {
        self.color_start = start;
        self.color_end = end;
        self
    }

    pub fn with_sizes(mut self, start: f64, end: f64) -> Self {
        self.size_start = start;
        self.size_end = end;
        self
    }

    /// Set total lifetime (seconds) and reset the remaining lifetime to it
    pub fn with_lifetime(mut self, lifetime: f64) -> Self {
        self.lifetime_total = lifetime;
        self.lifetime_remaining = lifetime;
        self
    }

    pub fn with_shape(mut self, shape: ParticleShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Age by `dt` and move by one velocity step
    pub fn update(&mut self, dt: f64) {
        self.lifetime_remaining -= dt;
        if self.lifetime_remaining <= 0.0 {
            self.active = false;
        }
        self.position = self.position + self.velocity;
    }

    /// Remaining fraction of the lifetime
    pub fn life(&self) -> Result<f64, DodgeError> {
        if self.lifetime_total == 0.0 {
            return Err(DodgeError::InvalidArgument(
                "particle lifetime_total is zero".to_string(),
            ));
        }
        Ok(self.lifetime_remaining / self.lifetime_total)
    }

    pub fn visual(&self, mode: OpacityMode) -> Result<ParticleVisual, DodgeError> {
        let life = self.life()?;
        let radius = remap(
            self.lifetime_remaining,
            0.0,
            self.lifetime_total,
            self.size_end,
            self.size_start,
        )?;
        let opacity = match mode {
            OpacityMode::RawRemaining => self.lifetime_remaining,
            OpacityMode::NormalizedFraction => life.clamp(0.0, 1.0),
        };
        Ok(ParticleVisual {
            position: self.position,
            radius,
            color: self.color_end.lerp(self.color_start, life),
            opacity,
            shape: self.shape,
        })
    }
}

/// Owns a set of particles and removes them as they expire
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Age every particle and drop the ones that expired. Returns how many
    /// were removed.
    pub fn update(&mut self, dt: f64) -> usize {
        let before = self.particles.len();
        self.particles.retain_mut(|p| {
            p.update(dt);
            p.is_active()
        });
        before - self.particles.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Emit trail particles behind an obstacle
    pub fn emit_trail(
        &mut self,
        obstacle: &Obstacle,
        settings: &TrailSettings,
        size_range: (f64, f64),
        rng: &mut impl RandomSource,
    ) -> Result<(), DodgeError> {
        let center_y = obstacle.position.y + obstacle.height / 2.0;
        let spread = obstacle.height * settings.y_spread_fraction;
        let x = obstacle.position.x + obstacle.width * settings.x_fraction;
        let size_start = remap(
            obstacle.width,
            size_range.0,
            size_range.1,
            settings.size_start.min,
            settings.size_start.max,
        )?;

        for _ in 0..settings.count {
            let y = rng.float_range(center_y - spread, center_y + spread);
            self.spawn(
                Particle::new(Vector2D::new(x, y), settings.velocity)
                    .with_colors(settings.color_start, settings.color_end)
                    .with_sizes(size_start, settings.size_end)
                    .with_lifetime(settings.lifetime)
                    .with_shape(settings.shape),
            );
        }
        Ok(())
    }

    /// Emit exhaust particles below the player
    pub fn emit_exhaust(
        &mut self,
        player: &Player,
        settings: &ExhaustSettings,
        rng: &mut impl RandomSource,
    ) {
        for _ in 0..settings.count {
            let jitter = rng.int_range(-settings.x_jitter, settings.x_jitter) as f64;
            let x = player.position.x + jitter;
            let y = player.position.y + settings.y_offset;
            let vy = rng.float_range(settings.velocity_y.min, settings.velocity_y.max);
            let size_start = rng.float_range(settings.size_start.min, settings.size_start.max);
            let size_end = rng.float_range(0.0, settings.size_end_max);
            self.spawn(
                Particle::new(Vector2D::new(x, y), Vector2D::new(settings.velocity_x, vy))
                    .with_colors(settings.color_start, settings.color_end)
                    .with_sizes(size_start, size_end)
                    .with_lifetime(settings.lifetime)
                    .with_shape(settings.shape),
            );
        }
    }
}
