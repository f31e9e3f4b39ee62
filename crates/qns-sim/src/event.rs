//! `EventQueue` — the time-ordered collection of pending occurrences.
//!
//! # Ordering contract
//!
//! Events are totally ordered by timestamp; events scheduled for the *same*
//! timestamp dequeue in insertion order (stable FIFO tie-break).  That
//! stability is what makes runs reproducible: a completion and an arrival
//! landing on the same instant always dispatch in the order they were
//! scheduled.
//!
//! # Representation
//!
//! `BTreeMap<SimTime, VecDeque<Event>>` — O(log T) insert and pop where T is
//! the number of distinct pending timestamps.  With continuous-time draws,
//! ties are rare and buckets are almost always singletons; the map behaves
//! like a plain ordered list.  Events are immutable once scheduled and
//! cancellation is not supported — every scheduled completion is either
//! realized or the run terminates first.

use std::collections::{BTreeMap, VecDeque};

use qns_core::{CustomerId, ServerId, SimTime, StationId};

// ── Event ─────────────────────────────────────────────────────────────────────

/// What a scheduled occurrence does when dispatched.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EventKind {
    /// An external arrival.  The customer is materialized at dispatch, so an
    /// arrival that the customer cap suppresses never allocates an identity.
    Arrival,

    /// `server` at `station` finishes serving `customer`.
    Completion {
        station:  StationId,
        server:   ServerId,
        customer: CustomerId,
    },
}

/// A scheduled future occurrence.  Immutable after scheduling; the queue owns
/// it until dequeued, at which point ownership passes to the driver for
/// exactly one dispatch.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Event {
    pub time: SimTime,
    pub kind: EventKind,
}

// ── EventQueue ────────────────────────────────────────────────────────────────

/// Pending events ordered by time, FIFO among equal timestamps.
#[derive(Default)]
pub struct EventQueue {
    inner: BTreeMap<SimTime, VecDeque<Event>>,
    /// Cached total event count for O(1) `len()`.
    total: usize,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `event` at its timestamp.
    ///
    /// Callers are responsible for causally valid (non-past) timestamps —
    /// service and inter-arrival durations are non-negative, so correctly
    /// derived completion times never precede the clock.  The queue itself
    /// does not enforce this.
    pub fn schedule(&mut self, event: Event) {
        self.inner.entry(event.time).or_default().push_back(event);
        self.total += 1;
    }

    /// Remove and return the globally minimum-timestamp event, or `None` if
    /// nothing remains.
    pub fn pop_earliest(&mut self) -> Option<Event> {
        let (&time, bucket) = self.inner.iter_mut().next()?;
        let event = bucket.pop_front();
        if bucket.is_empty() {
            self.inner.remove(&time);
        }
        let event = event?;
        self.total -= 1;
        Some(event)
    }

    /// Timestamp of the earliest pending event, or `None` if empty.
    pub fn next_time(&self) -> Option<SimTime> {
        self.inner.keys().next().copied()
    }

    /// Total pending events across all timestamps.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
