//! Injectable randomness.
//!
//! Every coin flip the engine makes (naps, tantrums, tricks, backlash) goes
//! through [`RandomSource`], so callers decide where the entropy comes from.
//! Services wrap a `rand` generator in [`RngSource`]; tests pin outcomes
//! with [`FixedSource`].

use rand::Rng;

/// Source of the engine's random decisions.
pub trait RandomSource {
    /// Return `true` with a probability of `percent` in 100.
    ///
    /// `0` never succeeds, `100` or more always does.
    fn roll(&mut self, percent: u32) -> bool;

    /// Pick an index uniformly from `0..len`. Returns `0` when `len` is `0`.
    fn pick(&mut self, len: usize) -> usize;
}

/// [`RandomSource`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    /// Wrap a generator.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn roll(&mut self, percent: u32) -> bool {
        match percent {
            0 => false,
            p if p >= 100 => true,
            p => self.rng.random_range(0..100) < p,
        }
    }

    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            0
        } else {
            self.rng.random_range(0..len)
        }
    }
}

/// [`RandomSource`] with pinned outcomes.
///
/// Every roll returns `rolls`; every pick returns `pick`, capped to the last
/// valid index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSource {
    /// Result of every [`RandomSource::roll`].
    pub rolls: bool,
    /// Index returned by every [`RandomSource::pick`].
    pub pick: usize,
}

impl FixedSource {
    /// Every chance fires, picks take the first entry.
    pub const fn always() -> Self {
        Self {
            rolls: true,
            pick: 0,
        }
    }

    /// No chance ever fires, picks take the first entry.
    pub const fn never() -> Self {
        Self {
            rolls: false,
            pick: 0,
        }
    }
}

impl RandomSource for FixedSource {
    fn roll(&mut self, _percent: u32) -> bool {
        self.rolls
    }

    fn pick(&mut self, len: usize) -> usize {
        self.pick.min(len.saturating_sub(1))
    }
}
