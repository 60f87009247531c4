//! Top-level game phases and their timing constants.

use serde::{Deserialize, Serialize};

/// Game-over frames during which a press is ignored, so the press that ended
/// the game cannot immediately start the next one.
pub const GAME_OVER_GRACE_TICKS: i64 = 20;

/// Game-over frames before falling back to the title screen.
pub const GAME_OVER_TITLE_TICKS: i64 = 120;

/// Title-screen ticks at which the description is drawn.
pub const DESCRIPTION_TICKS: [i64; 2] = [30, 40];

/// Default text passed to the frontend on game over.
pub const DEFAULT_GAME_OVER_TEXT: &str = "GAME OVER";

/// The active phase. Exactly one is active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Title screen, silently replaying the last completed game when one
    /// exists.
    Title,
    /// Live play.
    InGame,
    /// The game has ended; waiting for a restart press or the title timeout.
    GameOver,
    /// Play is suspended and recent frames can be rewound.
    Rewind,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Title => "title",
            Phase::InGame => "in-game",
            Phase::GameOver => "game-over",
            Phase::Rewind => "rewind",
        };
        f.write_str(name)
    }
}
