//! Player integration: gravity, thrust, clamping and the death line

use super::state::Player;
use crate::config::GameConfig;
use crate::math::constrain;

/// Player tuning pulled out of a [`GameConfig`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerPhysics {
    pub gravity: f64,
    pub gravity_scaled_by_dt: bool,
    pub ascend_boost: f64,
    pub min_velocity: f64,
    pub max_velocity: f64,
    pub upper_bound: f64,
    pub death_threshold: f64,
}

impl PlayerPhysics {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            gravity: config.gravity,
            gravity_scaled_by_dt: config.gravity_scaled_by_dt,
            ascend_boost: config.ascend_boost,
            min_velocity: config.min_velocity,
            max_velocity: config.max_velocity,
            upper_bound: config.upper_bound,
            death_threshold: config.death_threshold,
        }
    }

    /// Push the player up. Once the push leaves the player moving upward, an
    /// extra `thrust * ascend_boost` is applied on top.
    pub fn apply_thrust(&self, player: &mut Player) {
        if player.dead {
            return;
        }
        player.velocity.y -= player.thrust;
        if player.velocity.y < 0.0 {
            player.velocity.y -= player.thrust * self.ascend_boost;
        }
    }

    /// Advance one tick. Returns true if the player died this tick.
    pub fn integrate(&self, player: &mut Player, dt: f64) -> bool {
        if player.dead {
            return false;
        }

        let gravity = if self.gravity_scaled_by_dt {
            self.gravity * dt
        } else {
            self.gravity
        };
        player.velocity.y += gravity;
        player.velocity.y = constrain(player.velocity.y, self.min_velocity, self.max_velocity);

        player.position = player.position + player.velocity * dt;
        player.position.y = constrain(player.position.y, 0.0, self.upper_bound);

        if player.position.y >= self.death_threshold {
            player.dead = true;
            return true;
        }
        false
    }
}
