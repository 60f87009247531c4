//! The unit of history shared by recordings and the rewind window.

use serde::{Deserialize, Serialize};

use crate::input::InputSnapshot;
use crate::ledger::LedgerSnapshot;
use crate::rng::RngState;

/// Everything needed to reproduce or restore one simulated frame.
///
/// `state` is the caller's custom state, moved in by value. The engine never
/// looks inside it; it only clones it back out on replay or rewind, so later
/// mutation of the caller's copy cannot reach the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord<S> {
    /// Index of the frame within its session, starting at 0.
    pub frame: u64,
    /// The input snapshot the frame ran with.
    pub input: InputSnapshot,
    /// Score and ticks at the start of the frame.
    pub ledger: LedgerSnapshot,
    /// Gameplay RNG state at the start of the frame.
    pub rng: RngState,
    /// Gameplay RNG draws consumed while the frame ran.
    pub rng_draws: u64,
    /// Custom state captured during the frame, if the game captured any.
    pub state: Option<S>,
}

impl<S> FrameRecord<S> {
    /// A record for frame `frame` with no custom state yet.
    pub fn new(frame: u64, input: InputSnapshot, ledger: LedgerSnapshot, rng: RngState) -> Self {
        Self {
            frame,
            input,
            ledger,
            rng,
            rng_draws: 0,
            state: None,
        }
    }

    /// Attach the captured custom state.
    pub fn with_state(mut self, state: S) -> Self {
        self.state = Some(state);
        self
    }
}
