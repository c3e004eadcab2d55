//! Narrow-phase collision between the player and obstacles
//!
//! Two interchangeable tests: obstacle-as-circle against the player's box, or
//! box against box. Both are pure predicates; only [`CollisionDetector::apply`]
//! mutates, and only to kill the player.

use serde::{Deserialize, Serialize};

use super::state::{Obstacle, Player};
use crate::config::CollisionMethod;
use crate::math::{Vector2D, constrain};

/// Axis-aligned rectangle, y down
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Aabb {
    /// Box with top-left corner `pos` and the given size
    pub fn new(pos: Vector2D, width: f64, height: f64) -> Self {
        Self {
            left: pos.x,
            top: pos.y,
            right: pos.x + width,
            bottom: pos.y + height,
        }
    }

    /// Closest point inside the box to `p`
    pub fn closest_point(&self, p: Vector2D) -> Vector2D {
        Vector2D::new(
            constrain(p.x, self.left, self.right),
            constrain(p.y, self.top, self.bottom),
        )
    }
}

/// Circle against box: hit iff the distance from the circle center to the
/// nearest point of the box is at most `radius`
pub fn circle_aabb_overlap(center: Vector2D, radius: f64, rect: &Aabb) -> bool {
    center.distance(rect.closest_point(center)) <= radius
}

/// Box against box. Touching edges do not count.
pub fn aabb_overlap(a: &Aabb, b: &Aabb) -> bool {
    a.left < b.right && a.right > b.left && a.top < b.bottom && a.bottom > b.top
}

/// Player-vs-obstacle test with a fixed method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionDetector {
    pub method: CollisionMethod,
}

impl CollisionDetector {
    pub fn new(method: CollisionMethod) -> Self {
        Self { method }
    }

    pub fn hits(&self, player: &Player, obstacle: &Obstacle) -> bool {
        let player_box = player.aabb();
        match self.method {
            CollisionMethod::CircleAabb => {
                circle_aabb_overlap(obstacle.center(), obstacle.radius, &player_box)
            }
            CollisionMethod::Aabb => aabb_overlap(&player_box, &obstacle.aabb()),
        }
    }

    /// Kill the player on a hit. Returns true only on the alive-to-dead
    /// transition; a dead player stays dead.
    pub fn apply(&self, player: &mut Player, obstacle: &Obstacle) -> bool {
        if player.dead || !self.hits(player, obstacle) {
            return false;
        }
        player.dead = true;
        true
    }
}
