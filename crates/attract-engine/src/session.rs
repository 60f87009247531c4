//! The per-engine session context handed to the game every frame.
//!
//! [`Session`] owns everything the runtime mutates while a game runs: the
//! seed stream and gameplay RNG, the [`Ledger`], the [`ReplayLog`], the
//! current input snapshot and the [`Frontend`]. Nothing here is global; a test
//! can build as many independent sessions as it likes.
//!
//! The game sees the session through [`Game::update`](crate::engine::Game):
//! it reads input, draws from [`random`](Session::random), adjusts the score,
//! and routes its custom state through
//! [`capture_or_restore`](Session::capture_or_restore) once per frame.

use attract_core::prelude::*;
use serde::Serialize;

use crate::config::EngineConfig;
use crate::frontend::{Frontend, SoundEffect};
use crate::phase::Phase;

// ---------------------------------------------------------------------------
// EngineDiagnostics
// ---------------------------------------------------------------------------

/// Counters describing what the engine has done so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EngineDiagnostics {
    /// Frames processed.
    pub frames: u64,
    /// Live sessions started.
    pub sessions_started: u64,
    /// Recordings frozen as the attract-mode demo.
    pub recordings_completed: u64,
    /// Attract-mode demos started on the title screen.
    pub replays_started: u64,
    /// Replayed frames whose RNG state or draw count disagreed with the
    /// recording.
    pub replay_divergences: u64,
    /// Frames restored from the rewind window.
    pub rewound_frames: u64,
    /// `capture_or_restore` calls ignored because the frame already captured.
    pub duplicate_captures: u64,
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// A phase change requested during a frame, applied once the game's update
/// has returned.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Request {
    /// Soft end: rewind if possible, otherwise game over.
    End(String),
    /// Hard end: straight to game over.
    GiveUp(String),
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Session context: RNGs, ledger, replay log, input and frontend.
pub struct Session<S> {
    config: EngineConfig,
    phase: Phase,
    input: InputSnapshot,
    random: Random,
    seeds: SeedStream,
    ledger: Ledger,
    log: ReplayLog<S>,
    replaying: bool,
    rewinding: bool,
    /// The record being built for the current live or rewinding frame.
    pending: Option<FrameRecord<S>>,
    /// The recorded frame driving the current replayed frame.
    replay_frame: Option<FrameRecord<S>>,
    /// Ledger values restored by the current rewinding frame.
    restored: Option<LedgerSnapshot>,
    captured: bool,
    session_frame: u64,
    request: Option<Request>,
    game_over_text: String,
    frontend: Box<dyn Frontend>,
    diagnostics: EngineDiagnostics,
}

impl<S> std::fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("phase", &self.phase)
            .field("ledger", &self.ledger)
            .field("replaying", &self.replaying)
            .field("rewinding", &self.rewinding)
            .field("session_frame", &self.session_frame)
            .field("rewind_window", &self.log.rewind_window().len())
            .finish_non_exhaustive()
    }
}

impl<S: Clone + Serialize> Session<S> {
    pub(crate) fn new(config: EngineConfig, frontend: Box<dyn Frontend>) -> Self {
        let seeds = SeedStream::new(config.effective_seed());
        let log = ReplayLog::new(config.rewind_capacity);
        Self {
            config,
            phase: Phase::Title,
            input: InputSnapshot::idle(),
            random: Random::default(),
            seeds,
            ledger: Ledger::new(),
            log,
            replaying: false,
            rewinding: false,
            pending: None,
            replay_frame: None,
            restored: None,
            captured: false,
            session_frame: 0,
            request: None,
            game_over_text: crate::phase::DEFAULT_GAME_OVER_TEXT.to_owned(),
            frontend,
            diagnostics: EngineDiagnostics::default(),
        }
    }

    // -- game-facing API ------------------------------------------------------

    /// The input snapshot for this frame. While replaying this is the
    /// recorded snapshot, not the live one.
    pub fn input(&self) -> &InputSnapshot {
        &self.input
    }

    /// The gameplay RNG.
    ///
    /// Replay reproduces a session only if the game makes the same sequence
    /// of calls on this generator in every run given the same inputs and
    /// custom state. Draw from it in a fixed order and never from host-side
    /// sources of entropy.
    pub fn random(&mut self) -> &mut Random {
        &mut self.random
    }

    pub fn score(&self) -> f64 {
        self.ledger.score
    }

    /// Overwrite the score. Changes made during replayed or rewound frames
    /// are discarded at the end of the frame.
    pub fn set_score(&mut self, score: f64) {
        self.ledger.score = score;
    }

    /// Add to the score. Ignored while replaying.
    pub fn add_score(&mut self, value: f64) {
        if self.replaying {
            return;
        }
        self.ledger.score += value;
    }

    pub fn hi_score(&self) -> i64 {
        self.ledger.hi_score
    }

    /// Frames since the current phase began.
    pub fn ticks(&self) -> i64 {
        self.ledger.ticks
    }

    pub fn difficulty(&self) -> f64 {
        self.ledger.difficulty()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether this frame is attract-mode playback.
    pub fn is_replaying(&self) -> bool {
        self.replaying
    }

    /// Whether this frame is being restored from the rewind window.
    pub fn is_rewinding(&self) -> bool {
        self.rewinding
    }

    /// Play a sound effect. Suppressed during replay and rewind.
    pub fn play(&mut self, effect: SoundEffect) {
        if self.replaying || self.rewinding {
            return;
        }
        self.frontend.play(effect);
    }

    /// Direct access to the frontend for game-specific drawing.
    pub fn frontend(&mut self) -> &mut dyn Frontend {
        self.frontend.as_mut()
    }

    /// Route the game's custom state through the record / replay / rewind
    /// machinery. Call at most once per frame, before drawing from
    /// [`random`](Self::random) if the frame must survive a rewind exactly.
    ///
    /// - Rewind disabled: returns `state` unchanged.
    /// - Rewinding: pops the newest frame off the rewind window, restores
    ///   score, ticks and the RNG from it, and returns its state in place of
    ///   `state`.
    /// - Replaying: returns the state recorded for the current replay frame.
    /// - Live play: pushes `state` onto the rewind window (and into the
    ///   recording at the end of the frame) and returns it unchanged.
    pub fn capture_or_restore(&mut self, state: S) -> S {
        if !self.config.is_rewind_enabled {
            return state;
        }
        if self.captured {
            self.diagnostics.duplicate_captures += 1;
            tracing::warn!(
                phase = %self.phase,
                "capture_or_restore called more than once in a frame; ignoring"
            );
            return state;
        }
        self.captured = true;

        if self.rewinding {
            return self.restore_from_rewind(state);
        }
        if self.replaying {
            return self
                .replay_frame
                .as_ref()
                .and_then(|record| record.state.clone())
                .unwrap_or(state);
        }
        if self.phase == Phase::InGame {
            if let Some(pending) = self.pending.as_mut() {
                pending.state = Some(state.clone());
                self.log.push_rewind_frame(pending.clone());
            }
        }
        state
    }

    /// Request the end of the game.
    ///
    /// During live play with rewind enabled and frames to rewind into, this
    /// suspends play in [`Phase::Rewind`]; otherwise it is a game over.
    /// Applied after the current update returns. Ignored while rewinding.
    pub fn end(&mut self, text: impl Into<String>) {
        self.request = Some(Request::End(text.into()));
    }

    /// Request a game over, skipping any chance to rewind.
    pub fn give_up(&mut self, text: impl Into<String>) {
        self.request = Some(Request::GiveUp(text.into()));
    }

    // -- host-facing accessors ------------------------------------------------

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn replay_log(&self) -> &ReplayLog<S> {
        &self.log
    }

    pub fn diagnostics(&self) -> &EngineDiagnostics {
        &self.diagnostics
    }

    /// Text shown by the most recent game over.
    pub fn game_over_text(&self) -> &str {
        &self.game_over_text
    }

    // -- frame bookkeeping ----------------------------------------------------

    pub(crate) fn begin_frame(&mut self, input: InputSnapshot) {
        self.input = input;
        self.captured = false;
        self.request = None;
        self.restored = None;
    }

    /// Advance ticks and apply the replay score pin.
    pub(crate) fn end_frame(&mut self, score_before: f64) {
        self.ledger.advance();
        if self.replaying {
            self.ledger.score = score_before;
        }
        self.diagnostics.frames += 1;
    }

    pub(crate) fn draws(&self) -> u64 {
        self.random.draws()
    }

    pub(crate) fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    pub(crate) fn take_request(&mut self) -> Option<Request> {
        self.request.take()
    }

    /// Open the record for a live frame.
    pub(crate) fn open_live_record(&mut self) {
        if !self.config.replay_enabled() {
            return;
        }
        self.pending = Some(FrameRecord::new(
            self.session_frame,
            self.input,
            self.ledger.snapshot(),
            self.random.state(),
        ));
    }

    /// Close the record opened for this frame (live or rewinding) and append
    /// it to the recording.
    pub(crate) fn close_record(&mut self, draws_before: u64) {
        let Some(mut record) = self.pending.take() else {
            return;
        };
        record.rng_draws = self.random.draws() - draws_before;
        self.session_frame = record.frame + 1;
        self.log.record(record);
    }

    /// Pull the next replay frame and substitute its input. Returns `false`
    /// once the demo has run out of frames.
    pub(crate) fn open_replay_frame(&mut self) -> bool {
        let Some(record) = self.log.next_replay_frame() else {
            self.replay_frame = None;
            return false;
        };
        if self.config.check_replay_divergence && record.rng != self.random.state() {
            self.diagnostics.replay_divergences += 1;
            tracing::warn!(
                frame = record.frame,
                "replay diverged: gameplay RNG state differs from the recording at frame start"
            );
        }
        self.input = record.input;
        self.replay_frame = Some(record);
        true
    }

    pub(crate) fn close_replay_frame(&mut self, draws_before: u64) {
        let Some(record) = self.replay_frame.take() else {
            return;
        };
        let draws = self.random.draws() - draws_before;
        if self.config.check_replay_divergence && draws != record.rng_draws {
            self.diagnostics.replay_divergences += 1;
            tracing::warn!(
                frame = record.frame,
                recorded = record.rng_draws,
                replayed = draws,
                "replay diverged: gameplay RNG draw count differs from the recording"
            );
        }
    }

    /// Pin the score to the value restored by this rewinding frame.
    pub(crate) fn pin_restored_score(&mut self) {
        if let Some(restored) = self.restored.take() {
            self.ledger.score = restored.score;
        }
    }

    pub(crate) fn draw_score(&mut self) {
        if self.config.is_showing_score {
            self.frontend
                .draw_score(self.ledger.score.floor() as i64, self.ledger.hi_score);
        }
    }

    fn restore_from_rewind(&mut self, state: S) -> S {
        let Some(record) = self.log.pop_rewind_frame() else {
            tracing::warn!("rewind window exhausted; keeping the caller's state");
            return state;
        };
        self.diagnostics.rewound_frames += 1;
        self.ledger.restore(record.ledger);
        self.random.restore_state(&record.rng);
        self.restored = Some(record.ledger);
        // The recording resumes from the restored frame.
        self.log.truncate_recording(record.frame as usize);

        let restored_state = record.state.clone().unwrap_or(state);
        let mut rerun = FrameRecord::new(record.frame, self.input, record.ledger, record.rng);
        rerun.state = Some(restored_state.clone());
        self.pending = Some(rerun);
        restored_state
    }

    // -- transitions ----------------------------------------------------------

    pub(crate) fn enter_title(&mut self) {
        self.phase = Phase::Title;
        self.rewinding = false;
        self.ledger.reset_ticks();
        self.frontend.reset_particles();
        self.frontend.clear();
        self.replaying = false;
        if self.log.is_available() {
            if let Ok(seed) = self.log.begin_replay(&mut self.random) {
                self.replaying = true;
                self.diagnostics.replays_started += 1;
                tracing::debug!(%seed, "title: starting attract-mode replay");
            }
        }
        tracing::debug!(replaying = self.replaying, "entered title");
    }

    pub(crate) fn enter_in_game(&mut self) {
        self.phase = Phase::InGame;
        self.ledger.reset_ticks();
        self.frontend.reset_particles();
        self.ledger.archive_high_score();
        self.ledger.score = 0.0;
        if self.config.is_playing_bgm {
            self.frontend.start_bgm();
        }

        let seed = self.seeds.mint();
        self.random.set_seed(seed.0);
        self.replaying = false;
        self.rewinding = false;
        self.replay_frame = None;
        self.pending = None;
        self.session_frame = 0;
        if self.config.replay_enabled() {
            self.log.begin_recording(seed);
        }
        if self.config.is_rewind_enabled {
            self.log.begin_rewind_window();
        }
        self.diagnostics.sessions_started += 1;
        tracing::debug!(%seed, hi_score = self.ledger.hi_score, "entered in-game");
    }

    pub(crate) fn enter_game_over(&mut self, text: String) {
        self.phase = Phase::GameOver;
        self.rewinding = false;
        self.pending = None;
        self.game_over_text = text;
        if !self.replaying {
            self.freeze_recording();
        }
        self.ledger.reset_ticks();
        if !self.replaying {
            self.frontend.draw_game_over(&self.game_over_text);
        }
        if self.config.is_playing_bgm {
            self.frontend.stop_bgm();
        }
        tracing::debug!(
            replaying = self.replaying,
            score = self.ledger.score,
            "entered game-over"
        );
    }

    /// Soft end: suspend into [`Phase::Rewind`] when a rewind is possible.
    pub(crate) fn request_end(&mut self, text: String) {
        let can_rewind = self.phase == Phase::InGame
            && self.config.is_rewind_enabled
            && !self.rewinding
            && !self.replaying
            && !self.log.is_rewind_window_empty();
        if can_rewind {
            self.enter_rewind();
        } else {
            self.enter_game_over(text);
        }
    }

    pub(crate) fn enter_rewind(&mut self) {
        self.phase = Phase::Rewind;
        self.rewinding = false;
        if self.config.is_playing_bgm {
            self.frontend.stop_bgm();
        }
        tracing::debug!(
            frames = self.log.rewind_window().len(),
            "entered rewind"
        );
    }

    pub(crate) fn begin_rewinding(&mut self) {
        self.rewinding = true;
    }

    pub(crate) fn stop_rewind(&mut self) {
        self.rewinding = false;
        self.phase = Phase::InGame;
        // `end_frame` advances this to the frame the next live record takes.
        self.ledger.ticks = self.session_frame as i64 - 1;
        self.frontend.reset_particles();
        if self.config.is_playing_bgm {
            self.frontend.start_bgm();
        }
        tracing::debug!(
            frames_left = self.log.rewind_window().len(),
            "rewind stopped; resuming play"
        );
    }

    fn freeze_recording(&mut self) {
        let Some(recording) = self.log.finish_recording() else {
            return;
        };
        let frames = recording.len();
        let seed = recording.seed();
        match recording.digest() {
            Ok(digest) => tracing::info!(%seed, frames, %digest, "recording frozen"),
            Err(e) => tracing::warn!(%seed, frames, error = %e, "recording frozen without digest"),
        }
        self.diagnostics.recordings_completed += 1;
    }

    pub(crate) fn draw_title_screen(&mut self) {
        let ticks = self.ledger.ticks;
        if ticks == 0 {
            self.draw_score();
            if let Some(title) = self.config.title.as_deref() {
                self.frontend.draw_title(title);
            }
        }
        if crate::phase::DESCRIPTION_TICKS.contains(&ticks) {
            if let Some(description) = self.config.description.as_deref() {
                self.frontend.draw_description(description);
            }
        }
    }
}
