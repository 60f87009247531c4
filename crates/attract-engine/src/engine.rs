//! The frame loop and phase state machine.
//!
//! [`Engine::frame`] runs exactly one frame: it installs the input snapshot,
//! dispatches to the active phase's update routine, applies any end request
//! the game raised, and advances the tick counter.
//!
//! ```text
//!            just pressed                 end() with rewind window
//!   Title ─────────────────▶ InGame ────────────────────────────▶ Rewind
//!     ▲                     ▲  │  ▲                                  │
//!     │ 120 ticks           │  │  └──── window empty / release ──────┘
//!     │                     │  │ end() / give_up()                   │
//!     └──────── GameOver ◀──┴──┴─────────────────────────────────────┘
//!                     press after 20 ticks
//! ```
//!
//! # Example
//!
//! ```
//! use attract_engine::prelude::*;
//!
//! struct Clicker;
//!
//! impl Game for Clicker {
//!     type State = u32;
//!
//!     fn update(&mut self, session: &mut Session<u32>) {
//!         if session.input().is_just_pressed {
//!             session.add_score(1.0);
//!         }
//!         if session.ticks() == 3 {
//!             session.end("DONE");
//!         }
//!     }
//! }
//!
//! let config = EngineConfig { is_replay_enabled: true, ..Default::default() };
//! let mut engine = Engine::new(config, Clicker).unwrap();
//! assert_eq!(engine.phase(), Phase::InGame);
//!
//! engine.frame(InputSnapshot::just_pressed());
//! for _ in 0..3 {
//!     engine.frame(InputSnapshot::idle());
//! }
//! assert_eq!(engine.phase(), Phase::GameOver);
//! assert_eq!(engine.session().score(), 1.0);
//! assert!(engine.session().replay_log().is_available());
//! ```

use attract_core::prelude::*;
use serde::Serialize;

use crate::config::EngineConfig;
use crate::frontend::{Frontend, NullFrontend};
use crate::phase::{
    Phase, DEFAULT_GAME_OVER_TEXT, GAME_OVER_GRACE_TICKS, GAME_OVER_TITLE_TICKS,
};
use crate::session::{EngineDiagnostics, Request, Session};
use crate::EngineError;

// ---------------------------------------------------------------------------
// Game
// ---------------------------------------------------------------------------

/// The game logic driven by the engine.
///
/// `update` is called once per frame while a game is live, while the title
/// screen replays the last completed game, and for every rewound frame.
///
/// # Determinism contract
///
/// Replay logs inputs and custom state, never random outputs. For a replay to
/// reproduce the recorded session the game must:
///
/// - draw randomness only from [`Session::random`], in the same order on every
///   run given the same inputs and state;
/// - (re)initialize its own state when [`Session::ticks`] is `0`, because the
///   title screen replays from the first frame with whatever state the game
///   object holds at that point;
/// - route any state that rewind must reconstruct through
///   [`Session::capture_or_restore`], at most once per frame.
///
/// With [`EngineConfig::check_replay_divergence`] enabled the engine warns
/// when a replayed frame draws a different number of values than it did when
/// recorded.
pub trait Game {
    /// Custom state stored in frame records.
    type State: Clone + Serialize;

    fn update(&mut self, session: &mut Session<Self::State>);
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Owns a [`Session`] and the [`Game`] it drives.
pub struct Engine<G: Game> {
    session: Session<G::State>,
    game: G,
}

impl<G: Game> std::fmt::Debug for Engine<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl<G: Game> Engine<G> {
    /// Create an engine with a [`NullFrontend`].
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] if `config` fails validation.
    pub fn new(config: EngineConfig, game: G) -> Result<Self, EngineError> {
        Self::with_frontend(config, game, Box::new(NullFrontend))
    }

    /// Create an engine drawing and playing sound through `frontend`.
    ///
    /// A configuration with a title or description starts on the title
    /// screen; one without starts directly in a live game.
    pub fn with_frontend(
        config: EngineConfig,
        game: G,
        frontend: Box<dyn Frontend>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let has_title = config.has_title();
        let mut session = Session::new(config, frontend);
        if has_title {
            session.enter_title();
        } else {
            session.enter_in_game();
            session.ledger_mut().ticks = 0;
        }
        tracing::debug!(phase = %session.phase(), "engine created");
        Ok(Self { session, game })
    }

    /// Run one frame with `input` and return the phase active afterwards.
    pub fn frame(&mut self, input: InputSnapshot) -> Phase {
        let score_before = self.session.score();
        self.session.begin_frame(input);
        match self.session.phase() {
            Phase::Title => self.update_title(),
            Phase::InGame => self.update_in_game(),
            Phase::GameOver => self.update_game_over(),
            Phase::Rewind => self.update_rewind(),
        }
        self.session.end_frame(score_before);
        self.session.phase()
    }

    /// Run one frame with input sampled from `source`.
    pub fn frame_from(&mut self, source: &mut impl InputSource) -> Phase {
        self.frame(source.sample())
    }

    /// Run `count` frames with input sampled from `source`.
    pub fn run_frames(&mut self, source: &mut impl InputSource, count: usize) -> Phase {
        for _ in 0..count {
            self.frame_from(source);
        }
        self.session.phase()
    }

    /// Abandon the current game, skipping any chance to rewind. Only takes
    /// effect in [`Phase::InGame`] and [`Phase::Rewind`].
    pub fn give_up(&mut self) {
        match self.session.phase() {
            Phase::InGame | Phase::Rewind => {
                self.session.enter_game_over(DEFAULT_GAME_OVER_TEXT.to_owned());
            }
            phase => tracing::debug!(%phase, "give_up ignored outside a game"),
        }
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn session(&self) -> &Session<G::State> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session<G::State> {
        &mut self.session
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn diagnostics(&self) -> &EngineDiagnostics {
        self.session.diagnostics()
    }

    /// Digest of the completed recording used as the attract-mode demo.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Replay`] if the recording cannot be encoded.
    pub fn demo_digest(&self) -> Result<Option<String>, EngineError> {
        let digest = self
            .session
            .replay_log()
            .completed()
            .map(Recording::digest)
            .transpose()?;
        Ok(digest)
    }

    // -- phase updates --------------------------------------------------------

    fn update_title(&mut self) {
        if self.session.input().is_just_pressed {
            self.session.enter_in_game();
            return;
        }
        self.session.frontend().clear();
        if self.session.is_replaying() {
            if !self.session.open_replay_frame() {
                tracing::debug!("attract-mode demo exhausted");
                self.session.enter_game_over(DEFAULT_GAME_OVER_TEXT.to_owned());
                return;
            }
            self.session.frontend().update_particles();
            let draws_before = self.session.draws();
            self.game.update(&mut self.session);
            self.session.close_replay_frame(draws_before);
            self.apply_request();
        }
        if self.session.phase() == Phase::Title {
            self.session.draw_title_screen();
        }
    }

    fn update_in_game(&mut self) {
        self.session.frontend().clear();
        self.session.frontend().update_particles();
        self.session.open_live_record();
        let draws_before = self.session.draws();
        self.game.update(&mut self.session);
        self.session.close_record(draws_before);
        self.session.draw_score();
        self.apply_request();
    }

    fn update_game_over(&mut self) {
        let ticks = self.session.ticks();
        let can_restart = self.session.is_replaying() || ticks >= GAME_OVER_GRACE_TICKS;
        if can_restart && self.session.input().is_just_pressed {
            self.session.enter_in_game();
        } else if ticks >= GAME_OVER_TITLE_TICKS && self.session.config().has_title() {
            self.session.enter_title();
        }
    }

    fn update_rewind(&mut self) {
        // A press still held from the frame that ended the game does not
        // start a rewind; the trigger must go down again.
        let input = *self.session.input();
        let triggered = if self.session.is_rewinding() {
            input.is_pressed
        } else {
            input.is_just_pressed
        };
        if triggered {
            self.session.frontend().clear();
            self.session.begin_rewinding();
            let draws_before = self.session.draws();
            self.game.update(&mut self.session);
            self.session.pin_restored_score();
            self.session.close_record(draws_before);
            self.session.draw_score();
            if let Some(request) = self.session.take_request() {
                tracing::debug!(?request, "end request ignored while rewinding");
            }
            if self.session.replay_log().is_rewind_window_empty() {
                self.session.stop_rewind();
            }
        } else if self.session.is_rewinding() {
            self.session.stop_rewind();
        }
    }

    fn apply_request(&mut self) {
        match self.session.take_request() {
            None => {}
            Some(Request::End(text)) => self.session.request_end(text),
            Some(Request::GiveUp(text)) => self.session.enter_game_over(text),
        }
    }
}
