//! Attract Engine -- the phase state machine around `attract-core`.
//!
//! An [`Engine`](engine::Engine) drives a [`Game`](engine::Game) through the
//! Title, InGame, GameOver and Rewind phases one frame at a time. Live games
//! are recorded; the title screen silently replays the most recent completed
//! game as an attract-mode demo; a soft end during play offers a bounded
//! rewind before the game is over.
//!
//! - [`config`]: [`EngineConfig`](config::EngineConfig) and its validation.
//! - [`session`]: the per-engine context handed to the game each frame,
//!   including [`capture_or_restore`](session::Session::capture_or_restore).
//! - [`phase`]: the [`Phase`](phase::Phase) enum and timing constants.
//! - [`frontend`]: the rendering / audio seam.
//! - [`engine`]: the frame loop.
//!
//! Nothing here is global. Every engine owns its own RNGs, ledger and replay
//! log, so tests build as many as they need.

#![deny(unsafe_code)]

pub mod config;
pub mod engine;
pub mod frontend;
pub mod phase;
pub mod session;

use attract_core::ReplayError;

pub use config::ConfigError;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced by engine construction and inspection.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The configuration was rejected.
    #[error("invalid engine config: {0}")]
    Config(#[from] ConfigError),

    /// A replay log operation failed.
    #[error("replay error: {0}")]
    Replay(#[from] ReplayError),
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use attract_core::prelude::*;

    pub use crate::config::{ConfigError, EngineConfig};
    pub use crate::engine::{Engine, Game};
    pub use crate::frontend::{Frontend, NullFrontend, SoundEffect};
    pub use crate::phase::Phase;
    pub use crate::session::{EngineDiagnostics, Session};
    pub use crate::EngineError;
}
