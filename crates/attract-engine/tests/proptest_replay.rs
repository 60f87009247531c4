//! Property tests for attract-mode replay.
//!
//! Generates seeds and button tracks, plays them live, lets the title screen
//! replay the recording, and checks the replayed run matches the live one.

use attract_engine::prelude::*;
use proptest::prelude::*;

#[derive(Debug, Default)]
struct Jitter {
    last_tick: i64,
    x: f64,
    trace: Vec<(bool, i64, u64)>,
}

impl Game for Jitter {
    type State = ();

    fn update(&mut self, session: &mut Session<()>) {
        if session.ticks() == 0 {
            self.x = 0.0;
        }
        let mut roll = session.random().get_int_to(6);
        if session.input().is_pressed {
            roll += session.random().get_int_range(10, 20);
            self.x += session.random().get_plus_or_minus() as f64;
        }
        self.trace.push((session.is_replaying(), roll, self.x.to_bits()));
        if session.ticks() == self.last_tick {
            session.give_up("DONE");
        }
    }
}

/// Turn a held/released track into snapshots with press edges.
fn snapshots(track: &[bool]) -> Vec<InputSnapshot> {
    let mut previous = false;
    track
        .iter()
        .map(|&down| {
            let snapshot = InputSnapshot {
                is_pressed: down,
                is_just_pressed: down && !previous,
                is_just_released: !down && previous,
                ..Default::default()
            };
            previous = down;
            snapshot
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn replay_matches_live_run(
        seed in any::<u64>(),
        track in prop::collection::vec(any::<bool>(), 1..80),
    ) {
        let config = EngineConfig {
            seed,
            title: Some("JITTER".to_owned()),
            is_replay_enabled: true,
            check_replay_divergence: true,
            ..Default::default()
        };
        let game = Jitter {
            last_tick: track.len() as i64 - 1,
            ..Default::default()
        };
        let mut engine = Engine::new(config, game).unwrap();
        engine.frame(InputSnapshot::just_pressed());

        let mut live = ScriptedInput::new(snapshots(&track));
        engine.run_frames(&mut live, track.len());
        prop_assert_eq!(engine.phase(), Phase::GameOver);

        let mut idle = || InputSnapshot::idle();
        prop_assert_eq!(engine.run_frames(&mut idle, 121), Phase::Title);
        prop_assert_eq!(engine.run_frames(&mut idle, track.len()), Phase::GameOver);

        let trace = &engine.game().trace;
        let (replayed, recorded): (Vec<&(bool, i64, u64)>, Vec<&(bool, i64, u64)>) =
            trace.iter().partition(|t| t.0);
        prop_assert_eq!(recorded.len(), track.len());
        let recorded: Vec<_> = recorded.iter().map(|t| (t.1, t.2)).collect();
        let replayed: Vec<_> = replayed.iter().map(|t| (t.1, t.2)).collect();
        prop_assert_eq!(recorded, replayed);
        prop_assert_eq!(engine.diagnostics().replay_divergences, 0);
    }
}
