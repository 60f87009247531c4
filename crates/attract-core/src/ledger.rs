//! Score and tick bookkeeping.
//!
//! `ticks` counts frames since the current phase began. Phase entry resets it
//! to -1 and the end of every frame advances it, so the first update of a
//! phase observes `ticks == 0` exactly once.

use serde::{Deserialize, Serialize};

/// Frames per difficulty step (one minute at 60 Hz).
pub const TICKS_PER_DIFFICULTY_STEP: f64 = 3600.0;

/// The `{score, ticks}` pair captured into every frame record.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub score: f64,
    pub ticks: i64,
}

/// Score, high score and tick counter for the running phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    /// Accumulated score. Game logic reads and writes it directly.
    pub score: f64,
    /// Frames since the current phase began.
    pub ticks: i64,
    /// Best floored score of any archived session.
    pub hi_score: i64,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            score: 0.0,
            ticks: -1,
            hi_score: 0,
        }
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// `ticks = -1`, `score = 0`. The high score survives.
    pub fn reset(&mut self) {
        self.ticks = -1;
        self.score = 0.0;
    }

    /// Reset only the tick counter, keeping the score on display.
    pub fn reset_ticks(&mut self) {
        self.ticks = -1;
    }

    /// End-of-frame tick advance.
    pub fn advance(&mut self) {
        self.ticks += 1;
    }

    /// Fold the floored score into the high score. Returns `true` when the
    /// high score changed.
    pub fn archive_high_score(&mut self) -> bool {
        let floored = self.score.floor() as i64;
        if floored > self.hi_score {
            self.hi_score = floored;
            true
        } else {
            false
        }
    }

    /// Difficulty ramp: 1.0 at the start, +1.0 per minute of play.
    pub fn difficulty(&self) -> f64 {
        self.ticks as f64 / TICKS_PER_DIFFICULTY_STEP + 1.0
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            score: self.score,
            ticks: self.ticks,
        }
    }

    pub fn restore(&mut self, snapshot: LedgerSnapshot) {
        self.score = snapshot.score;
        self.ticks = snapshot.ticks;
    }
}
