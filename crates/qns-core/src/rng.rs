//! `VariateSource` — the run's single, seeded, draw-counted uniform RNG.
//!
//! # Determinism strategy
//!
//! One `SmallRng` per run, seeded once at build time.  All stochastic
//! decisions (inter-arrival gaps, service durations, routing picks) consume
//! variates from this single stream in a fixed order, so a run is fully
//! reproduced by its seed alone.
//!
//! # Draw counting
//!
//! Every unit draw increments a counter.  The counter feeds the draw-budget
//! termination policy and makes variate consumption auditable: two runs that
//! disagree on the count have diverged.  Statistical quality beyond
//! uniformity is explicitly out of scope.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seeded uniform variate generator with a draw counter.
pub struct VariateSource {
    rng:   SmallRng,
    draws: u64,
}

impl VariateSource {
    /// Seed deterministically.  The same seed always produces the same
    /// variate stream.
    pub fn new(seed: u64) -> Self {
        Self {
            rng:   SmallRng::seed_from_u64(seed),
            draws: 0,
        }
    }

    /// Resolve an optional configured seed into a concrete one.
    ///
    /// `None` picks a seed from OS entropy; callers must record the returned
    /// value (the driver reports it in the run statistics) so any run can be
    /// replayed exactly.
    pub fn resolve_seed(seed: Option<u64>) -> u64 {
        seed.unwrap_or_else(rand::random)
    }

    /// One counted draw from `[0, 1)`.
    #[inline]
    fn unit(&mut self) -> f64 {
        self.draws += 1;
        self.rng.r#gen::<f64>()
    }

    /// A uniform variate in `[min, max)`.
    ///
    /// `min == max` degenerates to the constant; the draw is still counted,
    /// keeping the variate stream identical whether or not a range happens to
    /// be degenerate.
    #[inline]
    pub fn next_uniform(&mut self, min: f64, max: f64) -> f64 {
        min + self.unit() * (max - min)
    }

    /// Number of unit draws consumed so far.
    #[inline]
    pub fn draws(&self) -> u64 {
        self.draws
    }
}
