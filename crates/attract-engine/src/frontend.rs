//! The seam to rendering, particles and audio.
//!
//! The engine tells a [`Frontend`] *when* to clear, draw and play; how any of
//! that looks or sounds is the host's business. Every method defaults to a
//! no-op so a headless host can implement only what it needs, or use
//! [`NullFrontend`].

use serde::{Deserialize, Serialize};

/// The fixed set of sound effects a game may trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    Coin,
    Laser,
    Explosion,
    PowerUp,
    Hit,
    Jump,
    Select,
    Lucky,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 8] = [
        SoundEffect::Coin,
        SoundEffect::Laser,
        SoundEffect::Explosion,
        SoundEffect::PowerUp,
        SoundEffect::Hit,
        SoundEffect::Jump,
        SoundEffect::Select,
        SoundEffect::Lucky,
    ];

    /// One-letter key used by sound synthesizers.
    pub fn key(self) -> char {
        match self {
            SoundEffect::Coin => 'c',
            SoundEffect::Laser => 'l',
            SoundEffect::Explosion => 'e',
            SoundEffect::PowerUp => 'p',
            SoundEffect::Hit => 'h',
            SoundEffect::Jump => 'j',
            SoundEffect::Select => 's',
            SoundEffect::Lucky => 'u',
        }
    }
}

/// Rendering, particle and audio collaborator.
pub trait Frontend {
    /// Clear the view before a frame is drawn.
    fn clear(&mut self) {}

    /// Step and draw live particles.
    fn update_particles(&mut self) {}

    /// Drop every live particle.
    fn reset_particles(&mut self) {}

    /// Draw the score line.
    fn draw_score(&mut self, _score: i64, _hi_score: i64) {}

    fn draw_title(&mut self, _title: &str) {}

    fn draw_description(&mut self, _description: &str) {}

    fn draw_game_over(&mut self, _text: &str) {}

    fn play(&mut self, _effect: SoundEffect) {}

    fn start_bgm(&mut self) {}

    fn stop_bgm(&mut self) {}
}

/// A frontend that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFrontend;

impl Frontend for NullFrontend {}
