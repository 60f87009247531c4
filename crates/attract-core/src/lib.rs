//! Attract Core -- deterministic building blocks for record, replay and rewind.
//!
//! This crate holds the pieces of the runtime that carry no phase policy:
//!
//! - [`rng`]: seeded generator whose draw sequence is reproducible, plus the
//!   seed stream that mints one session seed per game.
//! - [`input`]: the per-frame [`InputSnapshot`](input::InputSnapshot).
//! - [`ledger`]: score / tick / high-score bookkeeping.
//! - [`frame`]: the [`FrameRecord`](frame::FrameRecord) stored by every log.
//! - [`rewind`]: the bounded rewind window.
//! - [`replay`]: the [`ReplayLog`](replay::ReplayLog) tying recording, replay
//!   and rewind together.
//!
//! The phase state machine that drives these lives in `attract-engine`.
//!
//! # Quick Start
//!
//! ```
//! use attract_core::prelude::*;
//!
//! let mut seeds = SeedStream::new(0);
//! let session = seeds.mint();
//!
//! let mut rng = Random::new(session.0);
//! let first = rng.get_int_to(100);
//!
//! rng.set_seed(session.0);
//! assert_eq!(rng.get_int_to(100), first);
//! ```

#![deny(unsafe_code)]

pub mod frame;
pub mod input;
pub mod ledger;
pub mod replay;
pub mod rewind;
pub mod rng;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced by replay log operations.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// Replay was requested but no completed recording exists.
    #[error("no completed recording is available to replay")]
    NothingRecorded,

    /// A recording could not be encoded for hashing.
    #[error("failed to encode recording: {0}")]
    Encode(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::frame::FrameRecord;
    pub use crate::input::{InputSnapshot, InputSource, Position, ScriptedInput};
    pub use crate::ledger::{Ledger, LedgerSnapshot};
    pub use crate::replay::{Recording, ReplayLog};
    pub use crate::rewind::{RewindWindow, DEFAULT_REWIND_CAPACITY};
    pub use crate::rng::{Random, RngState, SeedStream, SessionSeed};
    pub use crate::ReplayError;
}
