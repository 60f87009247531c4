//! Session recording, attract-mode replay and the rewind window, behind one
//! log.
//!
//! A [`ReplayLog`] owns three pieces of history:
//!
//! - the *active* [`Recording`], appended to while a live session runs;
//! - the *completed* recording, frozen when a session ends and used as the
//!   attract-mode demo. Exactly one is retained; finishing a new recording
//!   replaces it, while a session still in progress leaves it untouched;
//! - the [`RewindWindow`] of recent frames.
//!
//! Replay does not log random outputs. [`ReplayLog::begin_replay`] reseeds the
//! gameplay RNG with the recorded session seed, and the game, fed the same
//! inputs in the same order, draws the same values.
//!
//! # Example
//!
//! ```
//! use attract_core::prelude::*;
//!
//! let mut rng = Random::default();
//! let mut log: ReplayLog<u32> = ReplayLog::new(16);
//!
//! log.begin_recording(SessionSeed(7));
//! for frame in 0..3 {
//!     let record = FrameRecord::new(frame, InputSnapshot::idle(), LedgerSnapshot::default(), rng.state());
//!     log.record(record.with_state(frame as u32));
//! }
//! log.finish_recording();
//! assert!(log.is_available());
//!
//! log.begin_replay(&mut rng).unwrap();
//! assert_eq!(rng.seed(), 7);
//! let states: Vec<_> = std::iter::from_fn(|| log.next_replay_frame().and_then(|r| r.state))
//!     .collect();
//! assert_eq!(states, vec![0, 1, 2]);
//! ```

use serde::{Deserialize, Serialize};

use crate::frame::FrameRecord;
use crate::rewind::RewindWindow;
use crate::rng::{Random, SessionSeed};
use crate::ReplayError;

// ---------------------------------------------------------------------------
// Recording
// ---------------------------------------------------------------------------

/// The full, ordered history of one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording<S> {
    seed: SessionSeed,
    frames: Vec<FrameRecord<S>>,
}

impl<S> Recording<S> {
    pub fn new(seed: SessionSeed) -> Self {
        Self {
            seed,
            frames: Vec::new(),
        }
    }

    /// The session seed that produced these frames.
    pub fn seed(&self) -> SessionSeed {
        self.seed
    }

    pub fn frames(&self) -> &[FrameRecord<S>] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    fn push(&mut self, record: FrameRecord<S>) {
        self.frames.push(record);
    }

    fn truncate(&mut self, len: usize) {
        self.frames.truncate(len);
    }
}

impl<S: Serialize> Recording<S> {
    /// BLAKE3 hex digest of the canonical JSON encoding.
    ///
    /// Two recordings of the same session with the same inputs and states have
    /// equal digests.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::Encode`] if the custom state cannot be encoded
    /// as JSON (for example a map with non-string keys).
    pub fn digest(&self) -> Result<String, ReplayError> {
        let bytes = serde_json::to_vec(self)?;
        Ok(blake3::hash(&bytes).to_hex().to_string())
    }
}

// ---------------------------------------------------------------------------
// ReplayLog
// ---------------------------------------------------------------------------

/// Recording, replay and rewind storage for one engine.
#[derive(Debug, Clone)]
pub struct ReplayLog<S> {
    active: Option<Recording<S>>,
    completed: Option<Recording<S>>,
    cursor: usize,
    rewind: RewindWindow<S>,
}

impl<S> Default for ReplayLog<S> {
    fn default() -> Self {
        Self {
            active: None,
            completed: None,
            cursor: 0,
            rewind: RewindWindow::default(),
        }
    }
}

impl<S> ReplayLog<S> {
    /// Create an empty log whose rewind window holds `rewind_capacity` frames.
    pub fn new(rewind_capacity: usize) -> Self {
        Self {
            rewind: RewindWindow::with_capacity(rewind_capacity),
            ..Self::default()
        }
    }

    // -- recording ------------------------------------------------------------

    /// Start a new recording tagged with `seed`, discarding any unfinished
    /// one. The completed recording is kept until this one finishes.
    pub fn begin_recording(&mut self, seed: SessionSeed) {
        if let Some(unfinished) = self.active.as_ref() {
            tracing::debug!(
                seed = %unfinished.seed(),
                frames = unfinished.len(),
                "discarding unfinished recording"
            );
        }
        self.active = Some(Recording::new(seed));
    }

    /// Append a frame to the active recording. No-op when not recording.
    pub fn record(&mut self, frame: FrameRecord<S>) {
        if let Some(active) = self.active.as_mut() {
            active.push(frame);
        }
    }

    /// Whether a recording is in progress.
    pub fn is_recording(&self) -> bool {
        self.active.is_some()
    }

    /// Frames in the active recording.
    pub fn recorded_len(&self) -> usize {
        self.active.as_ref().map_or(0, Recording::len)
    }

    /// Drop active-recording frames from index `len` on.
    pub fn truncate_recording(&mut self, len: usize) {
        if let Some(active) = self.active.as_mut() {
            active.truncate(len);
        }
    }

    /// Freeze the active recording.
    ///
    /// A recording with at least one frame replaces the completed one and is
    /// returned; an empty recording is dropped and the previous completed
    /// recording stays.
    pub fn finish_recording(&mut self) -> Option<&Recording<S>> {
        let active = self.active.take()?;
        if active.is_empty() {
            tracing::debug!(seed = %active.seed(), "dropping empty recording");
            return None;
        }
        self.cursor = 0;
        self.completed = Some(active);
        self.completed.as_ref()
    }

    /// Whether a completed, non-empty recording exists.
    pub fn is_available(&self) -> bool {
        self.completed.as_ref().is_some_and(|r| !r.is_empty())
    }

    /// The completed recording, if any.
    pub fn completed(&self) -> Option<&Recording<S>> {
        self.completed.as_ref()
    }

    // -- replay ---------------------------------------------------------------

    /// Reseed `rng` from the completed recording and rewind the cursor to its
    /// first frame.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::NothingRecorded`] when no completed recording
    /// exists; `rng` is untouched in that case.
    pub fn begin_replay(&mut self, rng: &mut Random) -> Result<SessionSeed, ReplayError> {
        let seed = match self.completed.as_ref() {
            Some(recording) if !recording.is_empty() => recording.seed(),
            _ => return Err(ReplayError::NothingRecorded),
        };
        rng.set_seed(seed.0);
        self.cursor = 0;
        Ok(seed)
    }

    /// The next replay frame, advancing the cursor. `None` once every frame
    /// has been returned; the cursor does not wrap.
    pub fn next_replay_frame(&mut self) -> Option<FrameRecord<S>>
    where
        S: Clone,
    {
        let record = self.completed.as_ref()?.frames().get(self.cursor)?.clone();
        self.cursor += 1;
        Some(record)
    }

    /// Whether the replay cursor has passed the last frame.
    pub fn is_replay_finished(&self) -> bool {
        self.completed
            .as_ref()
            .map_or(true, |r| self.cursor >= r.len())
    }

    /// Frames returned by [`next_replay_frame`](Self::next_replay_frame) since
    /// the last [`begin_replay`](Self::begin_replay).
    pub fn replay_position(&self) -> usize {
        self.cursor
    }

    // -- rewind ---------------------------------------------------------------

    /// Clear the rewind window and begin capturing.
    pub fn begin_rewind_window(&mut self) {
        self.rewind.begin();
    }

    /// Push onto the rewind window, evicting the oldest frame when full.
    pub fn push_rewind_frame(&mut self, frame: FrameRecord<S>) {
        self.rewind.push(frame);
    }

    /// Pop the most recently pushed frame.
    pub fn pop_rewind_frame(&mut self) -> Option<FrameRecord<S>> {
        self.rewind.pop()
    }

    pub fn is_rewind_window_empty(&self) -> bool {
        self.rewind.is_empty()
    }

    pub fn rewind_window(&self) -> &RewindWindow<S> {
        &self.rewind
    }
}
