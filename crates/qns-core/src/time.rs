//! Simulation time model.
//!
//! # Design
//!
//! Time is continuous: events carry `f64` timestamps and the clock advances in
//! irregular jumps from one event to the next.  A raw `f64` is not `Ord`, so
//! `SimTime` wraps [`ordered_float::OrderedFloat`] — this gives the total
//! order needed to key the event queue's `BTreeMap` while staying a plain
//! 8-byte value.
//!
//! Durations (inter-arrival gaps, service times, waits) are plain `f64`
//! seconds: `SimTime + f64 → SimTime` and `SimTime - SimTime → f64`.
//! Monotonicity of the clock is a driver invariant, not a type invariant.

use std::fmt;

use ordered_float::OrderedFloat;

/// An absolute point in simulated time, in seconds from the start of the run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct SimTime(OrderedFloat<f64>);

impl SimTime {
    pub const ZERO: SimTime = SimTime(OrderedFloat(0.0));

    #[inline]
    pub fn from_secs(secs: f64) -> SimTime {
        SimTime(OrderedFloat(secs))
    }

    #[inline]
    pub fn as_secs(self) -> f64 {
        self.0.into_inner()
    }

    /// Seconds elapsed from `earlier` to `self`.  Negative if `earlier` is
    /// actually later — callers that care must check.
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.as_secs() - earlier.as_secs()
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(OrderedFloat(self.as_secs() + rhs))
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.as_secs() - rhs.as_secs()
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.6}", self.as_secs())
    }
}
