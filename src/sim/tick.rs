//! Fixed timestep simulation tick
//!
//! Per-tick order: start/restart, spawn, score, background, trail particles,
//! each obstacle (emit trail, integrate, collide), cull, thrust and player
//! integration, exhaust. Collision uses the obstacle's new position and the
//! player's previous one. Thrust only lands on a tick the player survives the
//! obstacles, so the velocity clamp always follows it.

use super::collision::CollisionDetector;
use super::physics::PlayerPhysics;
use super::spawner::ObstacleSpawner;
use super::state::{GamePhase, GameSession};
use crate::config::GameConfig;
use crate::error::DodgeError;
use crate::platform::{InputSource, Key, RandomSource};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Start or restart (edge-triggered)
    pub start: bool,
    /// Thrust (level-triggered, applied every tick while held)
    pub thrust: bool,
    /// Leave the game (handled by the caller)
    pub quit: bool,
}

impl TickInput {
    /// Sample one tick of input at the tick boundary
    pub fn sample(source: &mut impl InputSource) -> Self {
        Self {
            start: source.take_key_down(Key::Space),
            thrust: source.is_key_held(Key::Space),
            quit: source.take_key_down(Key::Escape),
        }
    }
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub started: bool,
    pub restarted: bool,
    pub spawned: bool,
    pub culled: usize,
    pub died: bool,
}

/// Advance the session by one fixed step of `dt` seconds
pub fn tick(
    session: &mut GameSession,
    config: &GameConfig,
    input: &TickInput,
    dt: f64,
    rng: &mut impl RandomSource,
) -> Result<TickOutcome, DodgeError> {
    let physics = PlayerPhysics::from_config(config);
    let spawner = ObstacleSpawner::from_config(config);
    let detector = CollisionDetector::new(config.collision);
    let mut outcome = TickOutcome::default();

    if input.start {
        match session.phase() {
            GamePhase::Waiting => outcome.started = session.start(),
            GamePhase::Dead => outcome.restarted = session.restart(config),
            GamePhase::Playing => {}
        }
    }
    session.time_ticks += 1;

    if session.started {
        outcome.spawned = spawner.maybe_spawn(&mut session.obstacles, rng);
    }

    if session.is_live() {
        session.score += dt;
    }

    if session.is_live() {
        session.background.update(dt);
    }

    session.trail_particles.update(dt);

    let size_range = (
        config.obstacle_size.min as f64,
        config.obstacle_size.max as f64,
    );
    for obstacle in session.obstacles.iter_mut() {
        session
            .trail_particles
            .emit_trail(obstacle, &config.trail, size_range, rng)?;
        if session.started {
            obstacle.update(dt, config.obstacle_rotates);
        }
        if detector.apply(&mut session.player, obstacle) {
            outcome.died = true;
        }
    }
    outcome.culled = spawner.cull(&mut session.obstacles);

    if session.is_live() {
        if input.thrust {
            physics.apply_thrust(&mut session.player);
        }
        if physics.integrate(&mut session.player, dt) {
            outcome.died = true;
        }
    }

    if session.is_live() {
        session
            .exhaust_particles
            .emit_exhaust(&session.player, &config.exhaust, rng);
        if session.player.velocity.y < config.exhaust_age_velocity_cap {
            session.exhaust_particles.update(dt);
        }
    }

    if outcome.died {
        session.deaths += 1;
        log::info!(
            "Player died at tick {} with score {}",
            session.time_ticks,
            session.display_score()
        );
    }
    log::trace!(
        "tick {}: obstacles={} trail={} exhaust={}",
        session.time_ticks,
        session.obstacles.len(),
        session.trail_particles.len(),
        session.exhaust_particles.len()
    );

    Ok(outcome)
}

/// Demo-mode input: start and restart on its own, thrust whenever the player
/// sinks below the middle of the screen
pub fn autopilot_input(session: &GameSession, config: &GameConfig) -> TickInput {
    match session.phase() {
        GamePhase::Waiting | GamePhase::Dead => TickInput {
            start: true,
            ..Default::default()
        },
        GamePhase::Playing => {
            let player = &session.player;
            let target = config.height / 2.0 - player.height / 2.0;
            TickInput {
                thrust: player.position.y > target && player.velocity.y > 0.0,
                ..Default::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CollisionMethod, Variant};
    use crate::math::Vector2D;
    use crate::platform::SeededRandom;
    use crate::sim::state::Obstacle;

    fn setup() -> (GameConfig, GameSession, SeededRandom) {
        let config = GameConfig::from_variant(Variant::Classic);
        let session = GameSession::new(&config);
        (config, session, SeededRandom::new(12345))
    }

    const START: TickInput = TickInput {
        start: true,
        thrust: false,
        quit: false,
    };

    #[test]
    fn test_waiting_session_is_idle() {
        let (config, mut session, mut rng) = setup();
        for _ in 0..10 {
            tick(&mut session, &config, &TickInput::default(), config.dt(), &mut rng).unwrap();
        }
        assert_eq!(session.phase(), GamePhase::Waiting);
        assert!(session.obstacles.is_empty());
        assert_eq!(session.score, 0.0);
        assert_eq!(session.player.position, config.player_start);
        assert!(session.exhaust_particles.is_empty());
    }

    #[test]
    fn test_start_spawns_and_scores() {
        let (config, mut session, mut rng) = setup();
        let outcome = tick(&mut session, &config, &START, config.dt(), &mut rng).unwrap();
        assert!(outcome.started);
        assert!(outcome.spawned);
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.obstacles.len(), 1);
        assert_eq!(session.trail_particles.len(), 3);
        assert_eq!(session.exhaust_particles.len(), 1);
        assert!((session.score - config.dt()).abs() < 1e-12);
    }

    #[test]
    fn test_obstacle_cap_at_tick_start() {
        let (config, mut session, mut rng) = setup();
        tick(&mut session, &config, &START, config.dt(), &mut rng).unwrap();
        for _ in 0..200 {
            assert!(session.obstacles.len() <= 3);
            let thrust = autopilot_input(&session, &config);
            tick(&mut session, &config, &thrust, config.dt(), &mut rng).unwrap();
        }
    }

    #[test]
    fn test_collision_kills_and_stops_score() {
        let (mut config, mut session, mut rng) = setup();
        config.collision = CollisionMethod::Aabb;
        tick(&mut session, &config, &START, config.dt(), &mut rng).unwrap();

        // Park an obstacle right on top of the player
        session.obstacles.clear();
        let pos = session.player.position;
        session
            .obstacles
            .push(Obstacle::new(Vector2D::new(pos.x + 5.0, pos.y), 20.0, -1.0, 0.0));
        let outcome = tick(&mut session, &config, &TickInput::default(), config.dt(), &mut rng)
            .unwrap();
        assert!(outcome.died);
        assert_eq!(session.phase(), GamePhase::Dead);
        assert_eq!(session.deaths, 1);

        let score = session.score;
        let frozen = session.player.clone();
        let thrust = TickInput {
            thrust: true,
            ..Default::default()
        };
        tick(&mut session, &config, &thrust, config.dt(), &mut rng).unwrap();
        assert_eq!(session.score, score);
        assert_eq!(session.player, frozen);
    }

    #[test]
    fn test_restart_resets_immediately() {
        let (config, mut session, mut rng) = setup();
        tick(&mut session, &config, &START, config.dt(), &mut rng).unwrap();
        session.player.dead = true;
        session.score = 42.0;

        let outcome = tick(&mut session, &config, &START, config.dt(), &mut rng).unwrap();
        assert!(outcome.restarted);
        assert_eq!(session.phase(), GamePhase::Playing);
        assert!(!session.player.dead);
        // Score restarts from zero and the restart tick already counts
        assert!((session.score - config.dt()).abs() < 1e-12);
        assert_eq!(session.obstacles.len(), 1);
    }

    #[test]
    fn test_collision_uses_previous_player_position() {
        let (mut config, mut session, mut rng) = setup();
        config.collision = CollisionMethod::Aabb;
        config.gravity = 0.0;
        tick(&mut session, &config, &START, config.dt(), &mut rng).unwrap();
        session.obstacles.clear();
        session.player.velocity = Vector2D::ZERO;

        // Obstacle sits just below the player; the player will move into it
        // this tick, but collision runs before the player integrates.
        let p = session.player.position;
        session.obstacles.push(Obstacle::new(
            Vector2D::new(p.x, p.y + session.player.height + 1.0),
            20.0,
            -0.000_001,
            0.0,
        ));
        session.player.velocity.y = 60.0;
        let outcome = tick(&mut session, &config, &TickInput::default(), config.dt(), &mut rng)
            .unwrap();
        assert!(!outcome.died);
        let outcome = tick(&mut session, &config, &TickInput::default(), config.dt(), &mut rng)
            .unwrap();
        assert!(outcome.died);
    }

    #[test]
    fn test_thrust_into_fatal_obstacle_keeps_velocity_clamped() {
        let (mut config, mut session, mut rng) = setup();
        config.collision = CollisionMethod::Aabb;
        tick(&mut session, &config, &START, config.dt(), &mut rng).unwrap();

        let thrust = TickInput {
            thrust: true,
            ..Default::default()
        };
        // Climb until the player is pinned at the upward velocity limit
        for _ in 0..3 {
            tick(&mut session, &config, &thrust, config.dt(), &mut rng).unwrap();
        }
        assert_eq!(session.player.velocity.y, config.min_velocity);

        session.obstacles.clear();
        let pos = session.player.position;
        session
            .obstacles
            .push(Obstacle::new(Vector2D::new(pos.x, pos.y), 20.0, -1.0, 0.0));
        let outcome = tick(&mut session, &config, &thrust, config.dt(), &mut rng).unwrap();

        assert!(outcome.died);
        let vy = session.player.velocity.y;
        assert!(vy >= config.min_velocity && vy <= config.max_velocity);
    }

    #[test]
    fn test_exhaust_ages_only_below_velocity_cap() {
        let (mut config, mut session, mut rng) = setup();
        config.exhaust_age_velocity_cap = -1e9;
        for i in 0..6 {
            let input = if i == 0 { START } else { TickInput::default() };
            tick(&mut session, &config, &input, config.dt(), &mut rng).unwrap();
        }
        assert_eq!(session.exhaust_particles.len(), 6);
        assert!(
            session
                .exhaust_particles
                .iter()
                .all(|p| p.lifetime_remaining == config.exhaust.lifetime)
        );

        // Under the default cap the same run ages every particle
        let (config, mut session, mut rng) = setup();
        for i in 0..6 {
            let input = if i == 0 { START } else { TickInput::default() };
            tick(&mut session, &config, &input, config.dt(), &mut rng).unwrap();
        }
        assert!(
            session
                .exhaust_particles
                .iter()
                .all(|p| p.lifetime_remaining < config.exhaust.lifetime)
        );
    }

    #[test]
    fn test_sample_from_input_source() {
        use crate::platform::{InputFrame, ScriptedInput};
        let mut source = ScriptedInput::new([InputFrame {
            space_down: true,
            space_held: true,
            escape_down: false,
        }]);
        let input = TickInput::sample(&mut source);
        assert!(input.start && input.thrust && !input.quit);
        let again = TickInput::sample(&mut source);
        assert!(!again.start && again.thrust);
    }

    #[test]
    fn test_determinism() {
        let config = GameConfig::from_variant(Variant::Classic);
        let mut a = GameSession::new(&config);
        let mut b = GameSession::new(&config);
        let mut rng_a = SeededRandom::new(99999);
        let mut rng_b = SeededRandom::new(99999);

        for _ in 0..300 {
            let input_a = autopilot_input(&a, &config);
            let input_b = autopilot_input(&b, &config);
            tick(&mut a, &config, &input_a, config.dt(), &mut rng_a).unwrap();
            tick(&mut b, &config, &input_b, config.dt(), &mut rng_b).unwrap();
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.player, b.player);
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.score, b.score);
    }
}
