//! Platform abstraction layer
//!
//! The simulation never touches a window, a sound device or a global RNG.
//! Everything outside the core is reached through these traits:
//! - [`FrameClock`]: fixed tick rate
//! - [`InputSource`]: edge-triggered key-down and level-triggered key-held
//! - [`Renderer`] and [`AudioSink`]: presentation
//! - [`RandomSource`]: seedable uniform sampling

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::particle::{ParticleShape, Rgba};

/// Assets the presentation layer refers to. Paths are pass-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Asset {
    Background,
    Player,
    Obstacle,
    Font,
    Theme,
}

impl Asset {
    pub fn path(&self) -> &'static str {
        match self {
            Asset::Background => "assets/bg.png",
            Asset::Player => "assets/ziggy.png",
            Asset::Obstacle => "assets/asteroid.png",
            Asset::Font => "assets/PixelEmulator.ttf",
            Asset::Theme => "assets/theme.wav",
        }
    }
}

/// Named text colours used by the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColor {
    White,
    Orange,
}

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Escape,
}

/// Fixed-rate frame clock
pub trait FrameClock {
    fn target_fps(&self) -> f64;

    /// Simulation step: `1 / target_fps`, never measured wall-clock time
    fn dt(&self) -> f64 {
        1.0 / self.target_fps()
    }
}

/// A clock that always reports the same rate
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fps: f64,
}

impl FixedClock {
    pub fn new(fps: f64) -> Self {
        Self { fps }
    }
}

impl FrameClock for FixedClock {
    fn target_fps(&self) -> f64 {
        self.fps
    }
}

/// Input sampled at tick boundaries
pub trait InputSource {
    /// Consume a pending key-down event, if any (processed once per occurrence)
    fn take_key_down(&mut self, key: Key) -> bool;
    /// Whether the key is currently held (re-applied every tick)
    fn is_key_held(&self, key: Key) -> bool;
    /// Move to the next tick's input
    fn advance(&mut self) {}
}

/// One tick's worth of scripted input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFrame {
    pub space_down: bool,
    pub space_held: bool,
    pub escape_down: bool,
}

/// Replays a fixed list of input frames, then reports no input
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputFrame>,
    current: InputFrame,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputFrame>) -> Self {
        let mut frames: VecDeque<InputFrame> = frames.into_iter().collect();
        let current = frames.pop_front().unwrap_or_default();
        Self { frames, current }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn take_key_down(&mut self, key: Key) -> bool {
        let flag = match key {
            Key::Space => &mut self.current.space_down,
            Key::Escape => &mut self.current.escape_down,
        };
        std::mem::take(flag)
    }

    fn is_key_held(&self, key: Key) -> bool {
        match key {
            Key::Space => self.current.space_held,
            Key::Escape => false,
        }
    }

    fn advance(&mut self) {
        self.current = self.frames.pop_front().unwrap_or_default();
    }
}

/// Drawing collaborator. Coordinates are screen pixels, y down.
pub trait Renderer {
    fn clear(&mut self);
    fn draw_sprite(&mut self, asset: Asset, x: f64, y: f64, w: f64, h: f64, rotation_deg: f64);
    fn draw_text(&mut self, text: &str, x: f64, y: f64, size: f64, font: Asset, color: TextColor);
    /// Filled particle shape centred on `(x, y)`
    fn draw_shape(
        &mut self,
        shape: ParticleShape,
        x: f64,
        y: f64,
        radius: f64,
        color: Rgba,
        opacity: f64,
    );
}

/// Sound collaborator
pub trait AudioSink {
    fn play_looping(&mut self, asset: Asset, volume: f64);
}

/// Uniform sampling. Must be seedable so runs can be replayed.
pub trait RandomSource {
    /// Uniform integer in `[lo, hi]` (inclusive)
    fn int_range(&mut self, lo: i64, hi: i64) -> i64;
    /// Uniform float in `[lo, hi)`
    fn float_range(&mut self, lo: f64, hi: f64) -> f64;
}

/// PCG-backed [`RandomSource`]
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
    rng: Pcg32,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn int_range(&mut self, lo: i64, hi: i64) -> i64 {
        if hi <= lo {
            return lo;
        }
        self.rng.random_range(lo..=hi)
    }

    fn float_range(&mut self, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            return lo;
        }
        self.rng.random_range(lo..hi)
    }
}
