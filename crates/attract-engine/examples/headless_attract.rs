//! Headless attract-mode demo -- a one-button dodging game driven by a
//! scripted input track.
//!
//! Run with:
//!   RUST_LOG=attract_engine=debug cargo run --example headless_attract -p attract-engine
//!
//! The script plays one game, rewinds part of it after the first crash,
//! gives up, then leaves the title screen replaying the recorded game.

use attract_engine::prelude::*;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Game
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
struct Dodge {
    player_y: f64,
    rocks: Vec<(f64, f64)>,
}

#[derive(Debug, Default)]
struct DodgeGame {
    state: Dodge,
}

impl Game for DodgeGame {
    type State = Dodge;

    fn update(&mut self, session: &mut Session<Dodge>) {
        if session.ticks() == 0 {
            self.state = Dodge {
                player_y: 50.0,
                rocks: Vec::new(),
            };
        }
        let mut state = session.capture_or_restore(self.state.clone());

        let difficulty = session.difficulty();
        if session.input().is_pressed {
            state.player_y = (state.player_y - 1.5).max(0.0);
        } else {
            state.player_y = (state.player_y + 1.0).min(99.0);
        }
        if session.random().get() < 0.08 * difficulty {
            let y = session.random().get_to(100.0);
            state.rocks.push((100.0, y));
        }
        for rock in &mut state.rocks {
            rock.0 -= difficulty;
        }
        let before = state.rocks.len();
        state.rocks.retain(|rock| rock.0 > 0.0);
        if state.rocks.len() < before {
            session.add_score((before - state.rocks.len()) as f64);
            session.play(SoundEffect::Coin);
        }

        let player_y = state.player_y;
        let hit = state
            .rocks
            .iter()
            .any(|&(x, y)| x < 6.0 && (y - player_y).abs() < 4.0);
        self.state = state;
        if hit {
            session.play(SoundEffect::Explosion);
            session.end("CRASH");
        }
    }
}

// ---------------------------------------------------------------------------
// Frontend
// ---------------------------------------------------------------------------

/// Prints the text a real frontend would draw.
struct ConsoleFrontend;

impl Frontend for ConsoleFrontend {
    fn draw_title(&mut self, title: &str) {
        println!("== {title} ==");
    }

    fn draw_description(&mut self, description: &str) {
        println!("   {description}");
    }

    fn draw_game_over(&mut self, text: &str) {
        println!("** {text} **");
    }

    fn play(&mut self, effect: SoundEffect) {
        tracing::trace!(?effect, key = %effect.key(), "sound");
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = EngineConfig::from_json_str(
        r#"{
            "seed": 2024,
            "title": "DODGE",
            "description": "[Hold] Rise",
            "is_rewind_enabled": true,
            "rewind_capacity": 240
        }"#,
    )?;
    let mut engine = Engine::with_frontend(config, DodgeGame::default(), Box::new(ConsoleFrontend))?;

    // Title, then a weaving game until the first crash.
    let mut input = ScriptedInput::default()
        .then(InputSnapshot::idle(), 45)
        .then(InputSnapshot::just_pressed(), 1);
    for _ in 0..40 {
        input = input
            .then(InputSnapshot::held(), 12)
            .then(InputSnapshot::just_released(), 1)
            .then(InputSnapshot::idle(), 14)
            .then(InputSnapshot::just_pressed(), 1);
    }
    let mut frames = 0;
    while engine.phase() != Phase::Rewind && input.remaining() > 0 {
        engine.frame_from(&mut input);
        frames += 1;
    }
    println!(
        "phase after {frames} frames: {} (score {})",
        engine.phase(),
        engine.session().score()
    );

    if engine.phase() == Phase::Rewind {
        // Press and hold for a second, then let go and keep playing.
        let mut rewind = ScriptedInput::default()
            .then(InputSnapshot::just_pressed(), 1)
            .then(InputSnapshot::held(), 59)
            .then(InputSnapshot::just_released(), 1);
        let count = rewind.remaining();
        engine.run_frames(&mut rewind, count);
        println!(
            "after rewind: {} (score {}, {} frames left in window)",
            engine.phase(),
            engine.session().score(),
            engine.session().replay_log().rewind_window().len()
        );
        engine.give_up();
    }

    // Wait out the game-over screen and watch part of the demo.
    let mut idle = || InputSnapshot::idle();
    engine.run_frames(&mut idle, 300);
    println!(
        "phase: {}, replaying: {}",
        engine.phase(),
        engine.session().is_replaying()
    );

    if let Some(digest) = engine.demo_digest()? {
        println!("demo digest: {digest}");
    }
    println!("{}", serde_json::to_string_pretty(engine.diagnostics())?);
    Ok(())
}
