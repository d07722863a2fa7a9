//! Logistic-map chaos source.
//!
//! The optimizer draws every "random" decision from the fully chaotic
//! logistic map `x' = 4x(1 - x)`. The map has fixed points at 0 and 0.75,
//! and 0.5 and 0.25 fall onto them after one or two steps, so seeds are
//! validated with [`ChaosSeed`] and the running state lives in a
//! [`ChaosStream`] that is threaded explicitly through the algorithm.
//!
//! # Reference
//! May (1976), "Simple mathematical models with very complicated dynamics"

use log::warn;
use rand::Rng;

use crate::error::{CdeError, Result};

/// Values closer than this to 0 or 1 are treated as collapsed.
const EDGE_EPSILON: f64 = 1e-9;

/// Golden-ratio fraction used to push a value off a degenerate point.
const NUDGE: f64 = 0.618_033_988_749_894_9;

/// Steps a seed orbit is followed before it is accepted.
const PROBE_STEPS: usize = 64;

const NUDGE_ATTEMPTS: usize = 64;

/// Seed used when nudging cannot recover an input (non-finite values).
const FALLBACK_SEED: f64 = 0.37;

/// One step of the logistic map at r = 4.
///
/// Maps `[0, 1]` onto `[0, 1]`. Pure; degenerate inputs are the caller's
/// concern.
#[inline]
pub fn logistic_map(x: f64) -> f64 {
    4.0 * x * (1.0 - x)
}

/// Whether `x` is 0, 1, near either edge, or one of 0.25 / 0.5 / 0.75.
fn is_degenerate_point(x: f64) -> bool {
    x <= EDGE_EPSILON || x >= 1.0 - EDGE_EPSILON || x == 0.25 || x == 0.5 || x == 0.75
}

/// A validated starting point for a chaos stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChaosSeed(f64);

impl ChaosSeed {
    /// Validates a seed.
    ///
    /// Rejects non-finite values, values outside the open interval (0, 1),
    /// the fixed points and short cycles of the map, and seeds whose orbit
    /// collapses onto one within a short probe.
    pub fn new(seed: f64) -> Result<Self> {
        let reject = |reason| Err(CdeError::DegenerateSeed { seed, reason });

        if !seed.is_finite() {
            return reject("not a finite number");
        }
        if seed <= 0.0 || seed >= 1.0 {
            return reject("outside the open interval (0, 1)");
        }
        if is_degenerate_point(seed) {
            return reject("fixed point or short cycle of the logistic map");
        }

        let mut x = seed;
        for _ in 0..PROBE_STEPS {
            let next = logistic_map(x);
            if next == x || is_degenerate_point(next) {
                return reject("orbit collapses onto a fixed point");
            }
            x = next;
        }
        Ok(Self(seed))
    }

    /// Turns any value into a usable seed.
    ///
    /// Values outside (0, 1) are folded in by their fractional part; a
    /// degenerate value is rotated by the golden-ratio fraction until it
    /// validates.
    pub fn nudged(value: f64) -> Self {
        if !value.is_finite() {
            return Self(FALLBACK_SEED);
        }
        let mut x = value.abs().fract();
        for _ in 0..NUDGE_ATTEMPTS {
            if let Ok(seed) = Self::new(x) {
                return seed;
            }
            x = (x + NUDGE).fract();
        }
        Self(FALLBACK_SEED)
    }

    /// Draws a fresh seed from `rng`.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::nudged(rng.random::<f64>())
    }

    /// The seed value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for ChaosSeed {
    fn default() -> Self {
        Self(FALLBACK_SEED)
    }
}

impl TryFrom<f64> for ChaosSeed {
    type Error = CdeError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

/// Running logistic-map state.
///
/// Cloning a stream forks it: both copies produce the same continuation.
/// The optimizer relies on this to hand each trial its own slice of the
/// sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct ChaosStream {
    state: f64,
    nudges: usize,
}

impl ChaosStream {
    /// Starts a stream at `seed`. The seed itself is never emitted.
    pub fn new(seed: ChaosSeed) -> Self {
        Self {
            state: seed.value(),
            nudges: 0,
        }
    }

    /// Advances the map once and returns the new value in (0, 1).
    ///
    /// If floating-point rounding lands the orbit on or next to a
    /// degenerate point, the value is rotated off it.
    pub fn next_value(&mut self) -> f64 {
        let mut x = logistic_map(self.state);
        if is_degenerate_point(x) {
            let collapsed = x;
            while is_degenerate_point(x) {
                x = (x + NUDGE).fract();
            }
            self.nudges += 1;
            warn!("chaos stream collapsed to {collapsed}, nudged to {x}");
        }
        self.state = x;
        x
    }

    /// Advances the stream `n` times, discarding the values.
    pub fn discard(&mut self, n: usize) {
        for _ in 0..n {
            self.next_value();
        }
    }

    /// Current state (the last emitted value, or the seed).
    pub fn state(&self) -> f64 {
        self.state
    }

    /// How many times the stream had to be pushed off a degenerate point.
    pub fn nudges(&self) -> usize {
        self.nudges
    }
}

impl Iterator for ChaosStream {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_value())
    }
}
