//! Shared fixtures for engine integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use attract_engine::prelude::*;

/// One call made on a [`RecordingFrontend`].
#[derive(Debug, Clone, PartialEq)]
pub enum FrontendEvent {
    Clear,
    UpdateParticles,
    ResetParticles,
    Score(i64, i64),
    Title(String),
    Description(String),
    GameOver(String),
    Sound(SoundEffect),
    StartBgm,
    StopBgm,
}

/// A frontend that logs every call into a shared list.
#[derive(Debug, Clone, Default)]
pub struct RecordingFrontend {
    events: Rc<RefCell<Vec<FrontendEvent>>>,
}

impl RecordingFrontend {
    pub fn events(&self) -> Vec<FrontendEvent> {
        self.events.borrow().clone()
    }

    pub fn count(&self, predicate: impl Fn(&FrontendEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| predicate(e)).count()
    }

    pub fn sounds(&self) -> usize {
        self.count(|e| matches!(e, FrontendEvent::Sound(_)))
    }

    pub fn clear_log(&self) {
        self.events.borrow_mut().clear();
    }

    fn push(&self, event: FrontendEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl Frontend for RecordingFrontend {
    fn clear(&mut self) {
        self.push(FrontendEvent::Clear);
    }

    fn update_particles(&mut self) {
        self.push(FrontendEvent::UpdateParticles);
    }

    fn reset_particles(&mut self) {
        self.push(FrontendEvent::ResetParticles);
    }

    fn draw_score(&mut self, score: i64, hi_score: i64) {
        self.push(FrontendEvent::Score(score, hi_score));
    }

    fn draw_title(&mut self, title: &str) {
        self.push(FrontendEvent::Title(title.to_owned()));
    }

    fn draw_description(&mut self, description: &str) {
        self.push(FrontendEvent::Description(description.to_owned()));
    }

    fn draw_game_over(&mut self, text: &str) {
        self.push(FrontendEvent::GameOver(text.to_owned()));
    }

    fn play(&mut self, effect: SoundEffect) {
        self.push(FrontendEvent::Sound(effect));
    }

    fn start_bgm(&mut self) {
        self.push(FrontendEvent::StartBgm);
    }

    fn stop_bgm(&mut self) {
        self.push(FrontendEvent::StopBgm);
    }
}

/// A game that does nothing until told to end.
#[derive(Debug, Default)]
pub struct Idle {
    /// Push an empty state through `capture_or_restore` every frame.
    pub capture: bool,
    pub end_next: bool,
    pub give_up_next: bool,
    pub updates: usize,
}

impl Game for Idle {
    type State = ();

    fn update(&mut self, session: &mut Session<()>) {
        self.updates += 1;
        if self.capture {
            session.capture_or_restore(());
        }
        if std::mem::take(&mut self.end_next) {
            session.end("GAME OVER");
        }
        if std::mem::take(&mut self.give_up_next) {
            session.give_up("GAVE UP");
        }
    }
}

/// Run `count` idle frames.
pub fn idle_frames<G: Game>(engine: &mut Engine<G>, count: usize) -> Phase {
    for _ in 0..count {
        engine.frame(InputSnapshot::idle());
    }
    engine.phase()
}

pub fn titled(title: &str) -> EngineConfig {
    EngineConfig {
        title: Some(title.to_owned()),
        ..Default::default()
    }
}
