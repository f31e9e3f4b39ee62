//! Run observer trait for progress reporting and data collection.

use qns_core::SimTime;

use crate::event::EventKind;
use crate::stats::RunStats;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// event loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — event counter
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct EventCounter(u64);
///
/// impl SimObserver for EventCounter {
///     fn on_event(&mut self, _time: SimTime, _kind: &EventKind) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called after the clock has advanced to `time`, just before the event
    /// is dispatched.
    fn on_event(&mut self, _time: SimTime, _kind: &EventKind) {}

    /// Called once with the finalized statistics after the run terminates.
    fn on_run_end(&mut self, _stats: &RunStats) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
