//! Customers and the run's owned customer table.
//!
//! Components never hold references to customers — only [`CustomerId`]
//! indices into the [`CustomerStore`], resolved at the point of use.  A
//! customer that exits (or is lost) stays archived in the store for post-run
//! auditing but is never mutated again.

use qns_core::{CustomerId, SimTime, StationId};

use crate::{SimError, SimResult};

// ── Customer ──────────────────────────────────────────────────────────────────

/// Terminal disposition of a customer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CustomerStatus {
    /// Waiting or in service somewhere in the network.
    InSystem,
    /// Routed to exit; `total_system_time` is stamped.
    Served,
    /// Rejected by a full station and dropped from the network.
    Lost,
}

/// One customer's identity and per-station accumulators.
///
/// The `waiting`, `service`, and `visits` vectors are indexed by
/// [`StationId`] and sized to the network's station count at creation.
#[derive(Clone, Debug)]
pub struct Customer {
    pub id:           CustomerId,
    pub arrival_time: SimTime,
    /// The station currently holding this customer (in a server or waiting
    /// line), `None` once terminal.
    pub station:      Option<StationId>,
    pub status:       CustomerStatus,
    /// Cumulative time spent in each station's waiting line.
    pub waiting:      Vec<f64>,
    /// Cumulative service duration drawn at each station.
    pub service:      Vec<f64>,
    /// Service starts at each station.
    pub visits:       Vec<u32>,
    /// End-to-end system time, stamped exactly once on exit.
    pub total_system_time: Option<f64>,
}

// ── CustomerStore ─────────────────────────────────────────────────────────────

/// The run's owned customer table, indexed by [`CustomerId`].
#[derive(Default)]
pub struct CustomerStore {
    customers: Vec<Customer>,
}

impl CustomerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a customer arriving at `now` and return its identity.
    pub fn create(&mut self, now: SimTime, station_count: usize) -> CustomerId {
        let id = CustomerId(self.customers.len() as u32);
        self.customers.push(Customer {
            id,
            arrival_time: now,
            station: None,
            status: CustomerStatus::InSystem,
            waiting: vec![0.0; station_count],
            service: vec![0.0; station_count],
            visits: vec![0; station_count],
            total_system_time: None,
        });
        id
    }

    pub fn get(&self, id: CustomerId) -> SimResult<&Customer> {
        self.customers
            .get(id.index())
            .ok_or(SimError::UnknownCustomer(id))
    }

    pub fn get_mut(&mut self, id: CustomerId) -> SimResult<&mut Customer> {
        self.customers
            .get_mut(id.index())
            .ok_or(SimError::UnknownCustomer(id))
    }

    /// Customers created so far (arrived, including lost ones).
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Iterate the full table, e.g. for post-run audits.
    pub fn iter(&self) -> impl Iterator<Item = &Customer> {
        self.customers.iter()
    }
}
