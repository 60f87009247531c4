//! Per-frame input snapshots.
//!
//! The host normalizes pointer/keyboard state into one [`InputSnapshot`] per
//! frame. The engine treats a snapshot as a value: it reads it, copies it into
//! frame records, and substitutes recorded snapshots during replay, but never
//! mutates the host's copy.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Pointer position in view coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One frame of normalized input.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Pointer position.
    pub position: Position,
    /// Pointer or key is held down this frame.
    pub is_pressed: bool,
    /// Pointer or key went down this frame.
    pub is_just_pressed: bool,
    /// Pointer or key went up this frame.
    pub is_just_released: bool,
}

impl InputSnapshot {
    /// Nothing held, nothing changed.
    pub fn idle() -> Self {
        Self::default()
    }

    /// The first frame of a press.
    pub fn just_pressed() -> Self {
        Self {
            is_pressed: true,
            is_just_pressed: true,
            ..Self::default()
        }
    }

    /// A press continuing from an earlier frame.
    pub fn held() -> Self {
        Self {
            is_pressed: true,
            ..Self::default()
        }
    }

    /// The frame the press ends.
    pub fn just_released() -> Self {
        Self {
            is_just_released: true,
            ..Self::default()
        }
    }

    /// The same snapshot at another pointer position.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Position::new(x, y);
        self
    }
}

// ---------------------------------------------------------------------------
// InputSource
// ---------------------------------------------------------------------------

/// Anything that can produce one snapshot per frame.
pub trait InputSource {
    /// Sample the input for the coming frame.
    fn sample(&mut self) -> InputSnapshot;
}

impl<F> InputSource for F
where
    F: FnMut() -> InputSnapshot,
{
    fn sample(&mut self) -> InputSnapshot {
        self()
    }
}

/// A fixed script of snapshots, idle once exhausted.
///
/// Used by headless drivers and tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputSnapshot>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputSnapshot>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Append `count` copies of `snapshot`.
    pub fn then(mut self, snapshot: InputSnapshot, count: usize) -> Self {
        self.frames.extend(std::iter::repeat(snapshot).take(count));
        self
    }

    /// Snapshots not yet sampled.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn sample(&mut self) -> InputSnapshot {
        self.frames.pop_front().unwrap_or_default()
    }
}
