//! Station state machine: bounded FIFO waiting line + parallel servers.
//!
//! A station owns its servers and waiting line outright; everything else it
//! touches (the customer table, the variate source, the event queue, its
//! statistics slot) is lent to each operation through [`ServiceCtx`], keeping
//! the borrow topology explicit.
//!
//! # Invariants
//!
//! - `waiting.len() <= capacity` at all times.
//! - A customer is never simultaneously in the waiting line and in a server.
//! - "Any idle server" always resolves to the lowest-indexed idle server —
//!   the tie-break that keeps seeded runs reproducible.

use std::collections::VecDeque;

use qns_core::{CustomerId, ServerId, SimTime, StationId, UniformRange, VariateSource};
use qns_core::config::StationConfig;

use crate::customer::{CustomerStatus, CustomerStore};
use crate::event::{Event, EventKind, EventQueue};
use crate::stats::StationStats;
use crate::{SimError, SimResult};

// ── Server ────────────────────────────────────────────────────────────────────

/// A customer in service and its scheduled completion time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Assignment {
    pub customer:   CustomerId,
    pub completion: SimTime,
}

/// One server slot.  `Some` is busy, `None` is idle; mutated only by the
/// owning station.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Server {
    pub assignment: Option<Assignment>,
}

impl Server {
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.assignment.is_some()
    }
}

// ── ServiceCtx ────────────────────────────────────────────────────────────────

/// Mutable collaborators lent to a station operation by the driver.
pub struct ServiceCtx<'a> {
    pub customers: &'a mut CustomerStore,
    pub rng:       &'a mut VariateSource,
    pub events:    &'a mut EventQueue,
    /// This station's statistics slot.
    pub stats:     &'a mut StationStats,
}

// ── Station ───────────────────────────────────────────────────────────────────

/// Outcome of [`Station::admit`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Admission {
    /// An idle server took the customer immediately.
    StartedService(ServerId),
    /// Appended to the waiting line.
    Enqueued,
    /// Waiting line full: the customer is lost (counted, then dropped).
    Rejected,
}

/// A waiting-line entry: who, and when they joined (for the waiting-time
/// accumulators).
#[derive(Copy, Clone, Debug, PartialEq)]
struct Waiting {
    customer: CustomerId,
    joined:   SimTime,
}

/// A service node: bounded FIFO waiting line plus a small fixed set of
/// parallel servers.
pub struct Station {
    pub id:              StationId,
    pub name:            String,
    pub capacity:        usize,
    pub service:         UniformRange,
    /// One weight per station plus a trailing exit weight.
    pub routing_weights: Vec<f64>,
    pub servers:         Vec<Server>,
    waiting:             VecDeque<Waiting>,
}

impl Station {
    pub fn new(id: StationId, config: &StationConfig) -> Self {
        Self {
            id,
            name:            config.name.clone(),
            capacity:        config.capacity,
            service:         config.service,
            routing_weights: config.routing_weights.clone(),
            servers:         vec![Server::default(); config.servers],
            waiting:         VecDeque::new(),
        }
    }

    /// Customers present (in service + waiting), clamped to `[0, capacity]`
    /// for occupancy-histogram bucketing.
    pub fn occupancy(&self) -> usize {
        let busy = self.servers.iter().filter(|s| s.is_busy()).count();
        (busy + self.waiting.len()).min(self.capacity)
    }

    /// Length of the waiting line.
    pub fn queue_len(&self) -> usize {
        self.waiting.len()
    }

    /// Customers currently in the waiting line, head first (for audits).
    pub fn waiting_customers(&self) -> impl Iterator<Item = CustomerId> + '_ {
        self.waiting.iter().map(|w| w.customer)
    }

    /// Lowest-indexed idle server, if any.
    fn idle_server(&self) -> Option<ServerId> {
        self.servers
            .iter()
            .position(|s| !s.is_busy())
            .map(|i| ServerId(i as u8))
    }

    /// Admit a customer arriving (or routed) here at `now`.
    ///
    /// Idle server → start service immediately.  Otherwise queue FIFO if the
    /// waiting line has room.  Otherwise reject: the loss is counted and the
    /// customer becomes terminal without being archived as served.
    pub fn admit(
        &mut self,
        customer: CustomerId,
        now:      SimTime,
        ctx:      &mut ServiceCtx<'_>,
    ) -> SimResult<Admission> {
        if let Some(server) = self.idle_server() {
            self.start_service(server, customer, now, ctx)?;
            return Ok(Admission::StartedService(server));
        }

        if self.waiting.len() < self.capacity {
            ctx.customers.get_mut(customer)?.station = Some(self.id);
            self.waiting.push_back(Waiting { customer, joined: now });
            return Ok(Admission::Enqueued);
        }

        ctx.stats.losses += 1;
        let c = ctx.customers.get_mut(customer)?;
        c.status = CustomerStatus::Lost;
        c.station = None;
        Ok(Admission::Rejected)
    }

    /// Handle a completion event on `server` at `now`.
    ///
    /// Returns the departing customer — routing it onward is the caller's
    /// job.  If the waiting line is non-empty, its head (earliest joiner)
    /// moves onto the freed server: the wait `now − joined` is accumulated
    /// into both the customer's and the station's waiting totals, then
    /// service starts exactly as in [`admit`][Self::admit].
    pub fn complete(
        &mut self,
        server: ServerId,
        now:    SimTime,
        ctx:    &mut ServiceCtx<'_>,
    ) -> SimResult<CustomerId> {
        let slot = self
            .servers
            .get_mut(server.index())
            .ok_or(SimError::UnknownServer { station: self.id, server })?;
        let assignment = slot
            .assignment
            .take()
            .ok_or(SimError::IdleCompletion { station: self.id, server })?;

        if let Some(next) = self.waiting.pop_front() {
            let wait = now - next.joined;
            ctx.customers.get_mut(next.customer)?.waiting[self.id.index()] += wait;
            ctx.stats.total_waiting += wait;
            self.start_service(server, next.customer, now, ctx)?;
        }

        Ok(assignment.customer)
    }

    /// Assign `customer` to `server`: draw a service duration, accumulate it
    /// into the customer's per-station total, and schedule the completion.
    fn start_service(
        &mut self,
        server:   ServerId,
        customer: CustomerId,
        now:      SimTime,
        ctx:      &mut ServiceCtx<'_>,
    ) -> SimResult<()> {
        let duration = ctx.rng.next_uniform(self.service.min, self.service.max);
        let completion = now + duration;

        let c = ctx.customers.get_mut(customer)?;
        c.station = Some(self.id);
        c.service[self.id.index()] += duration;
        c.visits[self.id.index()] += 1;

        self.servers[server.index()].assignment = Some(Assignment { customer, completion });
        ctx.events.schedule(Event {
            time: completion,
            kind: EventKind::Completion { station: self.id, server, customer },
        });
        Ok(())
    }
}
