//! Bounded rewind window.
//!
//! A fixed-capacity stack of recent [`FrameRecord`]s. Pushing onto a full
//! window evicts the oldest record; popping returns the newest. Once a record
//! has been evicted it can never come back out.

use std::collections::VecDeque;

use crate::frame::FrameRecord;

/// Default window size: ten seconds at 60 Hz.
pub const DEFAULT_REWIND_CAPACITY: usize = 600;

#[derive(Debug, Clone)]
pub struct RewindWindow<S> {
    frames: VecDeque<FrameRecord<S>>,
    capacity: usize,
    evicted: u64,
}

impl<S> Default for RewindWindow<S> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_REWIND_CAPACITY)
    }
}

impl<S> RewindWindow<S> {
    /// Create an empty window holding at most `capacity` records.
    ///
    /// A zero capacity is allowed and keeps nothing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            frames: VecDeque::with_capacity(capacity.min(DEFAULT_REWIND_CAPACITY)),
            capacity,
            evicted: 0,
        }
    }

    /// Drop every record and start capturing afresh.
    pub fn begin(&mut self) {
        self.frames.clear();
        self.evicted = 0;
    }

    /// Push a record, evicting the oldest when the window is full.
    pub fn push(&mut self, record: FrameRecord<S>) {
        if self.capacity == 0 {
            self.evicted += 1;
            return;
        }
        if self.frames.len() == self.capacity {
            self.frames.pop_front();
            self.evicted += 1;
        }
        self.frames.push_back(record);
    }

    /// Remove and return the newest record.
    pub fn pop(&mut self) -> Option<FrameRecord<S>> {
        self.frames.pop_back()
    }

    /// The newest record, without removing it.
    pub fn peek(&self) -> Option<&FrameRecord<S>> {
        self.frames.back()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Records dropped off the old end since the last [`begin`](Self::begin).
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    /// Records oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &FrameRecord<S>> {
        self.frames.iter()
    }
}
