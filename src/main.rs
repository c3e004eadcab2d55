//! Dodge headless runner
//!
//! Drives the simulation at its fixed rate without a window: scripted or
//! autopilot input, a counting renderer, and a summary at the end.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};

use dodge::consts::{DEFAULT_SEED, DEFAULT_TICKS};
use dodge::platform::{
    Asset, AudioSink, FixedClock, FrameClock, InputFrame, InputSource, Renderer,
    ScriptedInput, SeededRandom, TextColor,
};
use dodge::render::{draw_session, start_soundtrack};
use dodge::sim::{GameSession, ParticleShape, Rgba, TickInput, autopilot_input, tick};
use dodge::{GameConfig, Variant};

#[derive(Parser, Debug)]
#[command(name = "dodge")]
#[command(about = "Headless runner for the Dodge simulation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a session and print a summary
    Run {
        #[arg(long, default_value = "classic")]
        variant: String,
        /// JSON config file (overrides --variant)
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
        #[arg(long, default_value_t = DEFAULT_TICKS)]
        ticks: u64,
        /// Let the demo pilot play instead of the built-in script
        #[arg(long)]
        autopilot: bool,
    },
    /// Print a preset as JSON
    Config {
        #[arg(long, default_value = "classic")]
        variant: String,
    },
}

/// Renderer that only counts draw calls
#[derive(Debug, Default)]
struct FrameStats {
    frames: u64,
    sprites: u64,
    texts: u64,
    shapes: u64,
}

impl Renderer for FrameStats {
    fn clear(&mut self) {
        self.frames += 1;
    }

    fn draw_sprite(&mut self, _: Asset, _: f64, _: f64, _: f64, _: f64, _: f64) {
        self.sprites += 1;
    }

    fn draw_text(&mut self, _: &str, _: f64, _: f64, _: f64, _: Asset, _: TextColor) {
        self.texts += 1;
    }

    fn draw_shape(&mut self, _: ParticleShape, _: f64, _: f64, _: f64, _: Rgba, _: f64) {
        self.shapes += 1;
    }
}

struct LogAudio;

impl AudioSink for LogAudio {
    fn play_looping(&mut self, asset: Asset, volume: f64) {
        log::info!("Playing {} (looping, volume {})", asset.path(), volume);
    }
}

fn parse_variant(name: &str) -> Result<Variant> {
    Variant::from_str(name).ok_or_else(|| anyhow!("unknown variant: {name}"))
}

/// Press space once, then pulse thrust: held for 4 ticks out of every 10
fn default_script(ticks: u64) -> ScriptedInput {
    ScriptedInput::new((0..ticks).map(|i| InputFrame {
        space_down: i == 0,
        space_held: i % 10 < 4,
        escape_down: false,
    }))
}

fn run(config: GameConfig, seed: u64, ticks: u64, autopilot: bool) -> Result<()> {
    let clock = FixedClock::new(config.target_fps);
    let mut rng = SeededRandom::new(seed);
    let mut input = default_script(ticks);
    let mut session = GameSession::new(&config);
    let mut stats = FrameStats::default();
    let mut best = 0u64;

    log::info!(
        "Running {} for {} ticks at {} fps (seed {})",
        config.variant.as_str(),
        ticks,
        clock.target_fps(),
        rng.seed()
    );
    start_soundtrack(&mut LogAudio, &config);

    for _ in 0..ticks {
        let sampled = TickInput::sample(&mut input);
        input.advance();
        if sampled.quit {
            break;
        }
        let tick_input = if autopilot {
            autopilot_input(&session, &config)
        } else {
            sampled
        };

        let outcome = tick(&mut session, &config, &tick_input, clock.dt(), &mut rng)?;
        if outcome.died {
            best = best.max(session.display_score());
        }
        draw_session(&session, &config, &mut stats)?;
    }
    best = best.max(session.display_score());

    println!("variant:    {}", config.variant.as_str());
    println!("ticks:      {}", session.time_ticks);
    println!("phase:      {:?}", session.phase());
    println!("score:      {}", session.display_score());
    println!("best:       {}", best);
    println!("deaths:     {}", session.deaths);
    println!("obstacles:  {}", session.obstacles.len());
    println!(
        "particles:  {} trail, {} exhaust",
        session.trail_particles.len(),
        session.exhaust_particles.len()
    );
    println!(
        "draw calls: {} sprites, {} texts, {} shapes over {} frames",
        stats.sprites, stats.texts, stats.shapes, stats.frames
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            variant,
            config,
            seed,
            ticks,
            autopilot,
        } => {
            let config = match config {
                Some(path) => GameConfig::load(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => GameConfig::from_variant(parse_variant(&variant)?),
            };
            run(config, seed, ticks, autopilot)
        }
        Commands::Config { variant } => {
            let config = GameConfig::from_variant(parse_variant(&variant)?);
            println!("{}", config.to_json()?);
            Ok(())
        }
    }
}
