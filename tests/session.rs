use dodge::platform::{InputFrame, InputSource, ScriptedInput, SeededRandom};
use dodge::sim::{GamePhase, GameSession, Obstacle, TickInput, autopilot_input, tick};
use dodge::{CollisionMethod, GameConfig, Variant, Vector2D};

fn start() -> TickInput {
    TickInput {
        start: true,
        ..Default::default()
    }
}

fn idle() -> TickInput {
    TickInput::default()
}

#[test]
fn start_die_restart_flow() {
    let config = GameConfig::from_variant(Variant::Classic);
    let mut session = GameSession::new(&config);
    let mut rng = SeededRandom::new(2024);

    tick(&mut session, &config, &start(), config.dt(), &mut rng).unwrap();
    assert_eq!(session.phase(), GamePhase::Playing);

    // No thrust: the player falls through the death line
    let mut guard = 0;
    while session.phase() == GamePhase::Playing {
        tick(&mut session, &config, &idle(), config.dt(), &mut rng).unwrap();
        guard += 1;
        assert!(guard < 500, "player should have died by now");
    }
    assert_eq!(session.phase(), GamePhase::Dead);
    assert!(session.score > 0.0);
    assert_eq!(session.deaths, 1);

    // Holding thrust while dead does nothing; score is frozen
    let score = session.score;
    let thrust = TickInput {
        thrust: true,
        ..Default::default()
    };
    tick(&mut session, &config, &thrust, config.dt(), &mut rng).unwrap();
    assert_eq!(session.score, score);
    assert!(session.player.dead);

    // Restart goes straight back to playing
    let outcome = tick(&mut session, &config, &start(), config.dt(), &mut rng).unwrap();
    assert!(outcome.restarted);
    assert_eq!(session.phase(), GamePhase::Playing);
    assert!(!session.player.dead);
    assert!(session.score <= config.dt() + 1e-12);
    assert!(session.exhaust_particles.len() <= 1);
}

#[test]
fn obstacle_count_never_exceeds_three_at_tick_start() {
    for variant in Variant::ALL {
        let config = GameConfig::from_variant(variant);
        let mut session = GameSession::new(&config);
        let mut rng = SeededRandom::new(7);
        for _ in 0..2_000 {
            assert!(session.obstacles.len() <= 3);
            let input = autopilot_input(&session, &config);
            tick(&mut session, &config, &input, config.dt(), &mut rng).unwrap();
        }
    }
}

#[test]
fn velocity_stays_clamped_under_scripted_input() {
    let config = GameConfig::from_variant(Variant::Large);
    let mut session = GameSession::new(&config);
    let mut rng = SeededRandom::new(31);
    let mut source = ScriptedInput::new((0..600).map(|i| InputFrame {
        space_down: i == 0,
        space_held: (i / 7) % 3 != 0,
        escape_down: false,
    }));

    for _ in 0..600 {
        let input = TickInput::sample(&mut source);
        source.advance();
        tick(&mut session, &config, &input, config.dt(), &mut rng).unwrap();
        let vy = session.player.velocity.y;
        assert!(vy >= config.min_velocity && vy <= config.max_velocity);
    }
}

#[test]
fn same_seed_same_run() {
    let config = GameConfig::from_variant(Variant::Boxed);
    let run = |seed: u64| {
        let mut session = GameSession::new(&config);
        let mut rng = SeededRandom::new(seed);
        for _ in 0..900 {
            let input = autopilot_input(&session, &config);
            tick(&mut session, &config, &input, config.dt(), &mut rng).unwrap();
        }
        session
    };

    let a = run(555);
    let b = run(555);
    assert_eq!(a.player, b.player);
    assert_eq!(a.obstacles, b.obstacles);
    assert_eq!(a.deaths, b.deaths);
    assert_eq!(a.score, b.score);
    assert_eq!(a.trail_particles.len(), b.trail_particles.len());
}

#[test]
fn circle_and_box_methods_disagree_on_corners() {
    // Obstacle whose box clips the player's corner but whose circle does not
    let make = |method: CollisionMethod| {
        let mut config = GameConfig::from_variant(Variant::Classic);
        config.collision = method;
        config.gravity = 0.0;
        let mut session = GameSession::new(&config);
        let mut rng = SeededRandom::new(1);
        tick(&mut session, &config, &start(), config.dt(), &mut rng).unwrap();
        session.obstacles.clear();
        session.player.velocity = Vector2D::ZERO;

        let p = session.player.position;
        let corner = Vector2D::new(p.x + session.player.width, p.y + session.player.height);
        session.obstacles.push(Obstacle::new(
            Vector2D::new(corner.x - 2.0, corner.y - 2.0),
            32.0,
            -0.000_001,
            0.0,
        ));
        tick(&mut session, &config, &idle(), config.dt(), &mut rng).unwrap();
        session.player.dead
    };

    assert!(make(CollisionMethod::Aabb));
    assert!(!make(CollisionMethod::CircleAabb));
}

#[test]
fn config_loads_from_json_file() {
    let config = GameConfig::from_variant(Variant::Large);
    let path = std::env::temp_dir().join(format!("dodge-config-{}.json", std::process::id()));
    std::fs::write(&path, config.to_json().unwrap()).unwrap();

    let loaded = GameConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(loaded.variant, Variant::Large);
    assert_eq!(loaded.width, 512.0);
    assert_eq!(loaded.collision, CollisionMethod::CircleAabb);
}
