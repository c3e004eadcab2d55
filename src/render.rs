//! Presentation
//!
//! Maps a [`GameSession`] snapshot onto [`Renderer`] calls. Reads state only;
//! nothing here feeds back into the simulation.

use crate::config::GameConfig;
use crate::error::DodgeError;
use crate::platform::{Asset, AudioSink, Renderer, TextColor};
use crate::sim::particle::ParticleSystem;
use crate::sim::{GamePhase, GameSession};

/// Kick off the looping soundtrack
pub fn start_soundtrack(audio: &mut impl AudioSink, config: &GameConfig) {
    audio.play_looping(Asset::Theme, config.music_volume);
}

fn draw_particles(
    particles: &ParticleSystem,
    config: &GameConfig,
    renderer: &mut impl Renderer,
) -> Result<(), DodgeError> {
    for particle in particles.iter() {
        let v = particle.visual(config.opacity_mode)?;
        renderer.draw_shape(v.shape, v.position.x, v.position.y, v.radius, v.color, v.opacity);
    }
    Ok(())
}

/// Draw one frame
pub fn draw_session(
    session: &GameSession,
    config: &GameConfig,
    renderer: &mut impl Renderer,
) -> Result<(), DodgeError> {
    renderer.clear();

    let bg = &session.background;
    for offset in [0.0, bg.tile_width] {
        renderer.draw_sprite(
            Asset::Background,
            bg.x + offset,
            0.0,
            bg.tile_width,
            config.background_tile_height,
            0.0,
        );
    }

    draw_particles(&session.trail_particles, config, renderer)?;

    for obstacle in &session.obstacles {
        renderer.draw_sprite(
            Asset::Obstacle,
            obstacle.position.x,
            obstacle.position.y,
            obstacle.width,
            obstacle.height,
            obstacle.rotation_angle,
        );
    }

    let player = &session.player;
    renderer.draw_sprite(
        Asset::Player,
        player.position.x,
        player.position.y,
        player.width,
        player.height,
        player.tilt_degrees(),
    );

    // HUD text is laid out against the screen width
    let mid = config.width / 2.0;
    match session.phase() {
        GamePhase::Waiting => {
            renderer.draw_text("Press SPACE", 27.0, mid, 25.0, Asset::Font, TextColor::Orange);
        }
        GamePhase::Dead => {
            renderer.draw_text(
                "Press SPACE to RESTART",
                14.0,
                mid,
                14.0,
                Asset::Font,
                TextColor::Orange,
            );
            let summary = format!("Your score was {}", session.display_score());
            renderer.draw_text(
                &summary,
                mid - 60.0,
                mid + 20.0,
                10.0,
                Asset::Font,
                TextColor::Orange,
            );
        }
        GamePhase::Playing => {
            let score = session.display_score().to_string();
            renderer.draw_text(&score, mid - 10.0, 15.0, 15.0, Asset::Font, TextColor::White);
            draw_particles(&session.exhaust_particles, config, renderer)?;
        }
    }

    Ok(())
}
