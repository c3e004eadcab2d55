//! Obstacle generation and culling

use super::state::Obstacle;
use crate::config::{GameConfig, Span};
use crate::math::Vector2D;
use crate::platform::RandomSource;

#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleSpawner {
    spawn_x: f64,
    size: Span<i64>,
    y: Span<i64>,
    speed: Span<i64>,
    max_live_before_spawn: usize,
}

impl ObstacleSpawner {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            spawn_x: config.width + config.obstacle_spawn_x_offset,
            size: config.obstacle_size,
            y: config.obstacle_y,
            speed: config.obstacle_speed,
            max_live_before_spawn: config.max_live_obstacles_before_spawn,
        }
    }

    /// Spawn one obstacle past the right edge if few enough are live.
    /// Returns true if one was spawned.
    pub fn maybe_spawn(&self, obstacles: &mut Vec<Obstacle>, rng: &mut impl RandomSource) -> bool {
        if obstacles.len() > self.max_live_before_spawn {
            return false;
        }
        let size = rng.int_range(self.size.min, self.size.max) as f64;
        let y = rng.int_range(self.y.min, self.y.max) as f64;
        let speed = rng.int_range(self.speed.min, self.speed.max) as f64;
        let angle = rng.int_range(0, 360) as f64;

        let obstacle = Obstacle::new(Vector2D::new(self.spawn_x, y), size, speed, angle);
        log::debug!(
            "Spawned obstacle size={} at y={} speed={}",
            size,
            y,
            speed
        );
        obstacles.push(obstacle);
        true
    }

    /// Drop obstacles whose trailing edge passed the left boundary.
    /// Returns how many were removed.
    pub fn cull(&self, obstacles: &mut Vec<Obstacle>) -> usize {
        let before = obstacles.len();
        obstacles.retain(|o| !o.is_off_screen());
        let removed = before - obstacles.len();
        if removed > 0 {
            log::debug!("Culled {} obstacle(s)", removed);
        }
        removed
    }
}
