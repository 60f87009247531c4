//! Seeded pseudo-random generation with a reproducible draw sequence.
//!
//! [`Random`] wraps a PCG32 generator. Every public sampling method consumes
//! exactly one draw from the underlying generator, whatever its arguments, so
//! two instances seeded identically stay in lockstep for any fixed sequence of
//! calls -- including calls with malformed bounds. That property is what lets
//! an attract-mode replay reproduce a session from its seed alone, without
//! logging individual random outputs.
//!
//! Two instances are used by the engine: a *seed stream* ([`SeedStream`])
//! that mints one [`SessionSeed`] per game session, and a *gameplay* RNG that
//! is reseeded from that session seed.
//!
//! # Example
//!
//! ```
//! use attract_core::rng::Random;
//!
//! let mut a = Random::new(42);
//! let mut b = Random::new(42);
//! for _ in 0..100 {
//!     assert_eq!(a.get_range(-5.0, 5.0), b.get_range(-5.0, 5.0));
//!     assert_eq!(a.get_int_to(10), b.get_int_to(10));
//! }
//! ```

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Exclusive upper bound for minted session seeds.
pub const SESSION_SEED_LIMIT: i64 = 999_999_999;

/// 2^32 as a float, the divisor mapping a `u32` draw into `[0, 1)`.
const U32_RANGE: f64 = 4_294_967_296.0;

// ---------------------------------------------------------------------------
// SessionSeed
// ---------------------------------------------------------------------------

/// The seed that produced one game session.
///
/// Minted once when a session starts and never mutated. Reseeding a
/// [`Random`] with the same session seed always yields the same sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SessionSeed(pub u64);

impl std::fmt::Display for SessionSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// RngState
// ---------------------------------------------------------------------------

/// A captured generator state, restorable with [`Random::restore_state`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RngState(Pcg32);

// ---------------------------------------------------------------------------
// Random
// ---------------------------------------------------------------------------

/// Deterministic random generator.
#[derive(Debug, Clone)]
pub struct Random {
    generator: Pcg32,
    seed: u64,
    draws: u64,
}

impl Default for Random {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Random {
    /// Create a generator seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            generator: Pcg32::seed_from_u64(seed),
            seed,
            draws: 0,
        }
    }

    /// Reinitialize the generator from `seed`.
    ///
    /// The draw counter keeps running; it counts calls over the lifetime of
    /// the instance, not since the last reseed.
    pub fn set_seed(&mut self, seed: u64) {
        self.generator = Pcg32::seed_from_u64(seed);
        self.seed = seed;
    }

    /// The seed most recently passed to [`new`](Self::new) or
    /// [`set_seed`](Self::set_seed).
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Total number of sampling calls made on this instance.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Capture the generator state.
    pub fn state(&self) -> RngState {
        RngState(self.generator.clone())
    }

    /// Restore a state captured by [`state`](Self::state).
    pub fn restore_state(&mut self, state: &RngState) {
        self.generator = state.0.clone();
    }

    // -- reals ----------------------------------------------------------------

    /// A real number in `[0, 1)`.
    pub fn get(&mut self) -> f64 {
        self.get_range(0.0, 1.0)
    }

    /// A real number in `[0, high)`.
    pub fn get_to(&mut self, high: f64) -> f64 {
        self.get_range(0.0, high)
    }

    /// A real number in `[low, high)`.
    ///
    /// An empty or non-finite range returns `low`. A draw is consumed either
    /// way.
    pub fn get_range(&mut self, low: f64, high: f64) -> f64 {
        let unit = self.next_unit();
        let span = high - low;
        if !(span > 0.0) || !span.is_finite() || !low.is_finite() {
            return low;
        }
        // Rounding can land exactly on `high` when `span` dwarfs `low`.
        let value = unit * span + low;
        if value >= high {
            low
        } else {
            value
        }
    }

    /// `get_range(low, high)` multiplied by a random sign. Consumes two draws.
    pub fn get_signed_range(&mut self, low: f64, high: f64) -> f64 {
        self.get_range(low, high) * self.get_plus_or_minus() as f64
    }

    // -- integers -------------------------------------------------------------

    /// An integer in `[0, 2)`.
    pub fn get_int(&mut self) -> i64 {
        self.get_int_range(0, 2)
    }

    /// An integer in `[0, high)`.
    pub fn get_int_to(&mut self, high: i64) -> i64 {
        self.get_int_range(0, high)
    }

    /// An integer in `[low, high)`.
    ///
    /// `high <= low` returns `low`. A draw is consumed either way.
    pub fn get_int_range(&mut self, low: i64, high: i64) -> i64 {
        let raw = self.next_raw();
        if high <= low {
            return low;
        }
        let span = (high as i128 - low as i128) as u128;
        (low as i128 + (raw as u128 % span) as i128) as i64
    }

    /// `+1` or `-1` with equal probability.
    pub fn get_plus_or_minus(&mut self) -> i64 {
        self.get_int_to(2) * 2 - 1
    }

    // -- raw draws ------------------------------------------------------------

    fn next_unit(&mut self) -> f64 {
        self.draws += 1;
        self.generator.next_u32() as f64 / U32_RANGE
    }

    fn next_raw(&mut self) -> u64 {
        self.draws += 1;
        self.generator.next_u64()
    }
}

// ---------------------------------------------------------------------------
// SeedStream
// ---------------------------------------------------------------------------

/// The master seed stream: mints one [`SessionSeed`] per session.
///
/// Because the stream is itself a seeded [`Random`], the n-th session seed is
/// reproducible from the master seed.
#[derive(Debug, Clone, Default)]
pub struct SeedStream {
    random: Random,
}

impl SeedStream {
    /// Create a stream from the master seed.
    pub fn new(master_seed: u64) -> Self {
        Self {
            random: Random::new(master_seed),
        }
    }

    /// Mint the next session seed, in `[0, SESSION_SEED_LIMIT)`.
    pub fn mint(&mut self) -> SessionSeed {
        SessionSeed(self.random.get_int_to(SESSION_SEED_LIMIT) as u64)
    }

    /// Number of seeds minted so far.
    pub fn minted(&self) -> u64 {
        self.random.draws()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
