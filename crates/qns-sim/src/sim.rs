//! The `Sim` struct and its event loop.

use qns_core::{CustomerId, NetworkConfig, ServerId, SimTime, StationId, TerminationPolicy,
               VariateSource};

use crate::customer::{CustomerStatus, CustomerStore};
use crate::event::{Event, EventKind, EventQueue};
use crate::observer::SimObserver;
use crate::routing::{RouteOutcome, pick_destination};
use crate::station::{Admission, ServiceCtx, Station};
use crate::stats::{RunStats, StationStats};
use crate::{SimError, SimResult};

/// The simulation driver: sole owner of the run's entire mutable state.
///
/// One `Sim` is one run.  Create via [`SimBuilder`][crate::SimBuilder],
/// which validates the configuration, resolves the seed, and schedules the
/// first external arrival.  After [`run`][Self::run] returns, the fields
/// remain inspectable for post-run audits (customer table, final station
/// state).
pub struct Sim {
    /// The validated configuration this run was built from.
    pub config: NetworkConfig,

    /// Simulated clock; advances monotonically from event to event.
    pub clock: SimTime,

    /// Pending events, FIFO among equal timestamps.
    pub events: EventQueue,

    /// Every customer created this run, including lost and served ones.
    pub customers: CustomerStore,

    /// Station state machines, indexed by [`StationId`].
    pub stations: Vec<Station>,

    /// The run's single variate stream.
    pub rng: VariateSource,

    /// Per-station accumulators, parallel to `stations`.
    pub station_stats: Vec<StationStats>,

    pub(crate) seed:              u64,
    pub(crate) served:            u64,
    pub(crate) total_system_time: f64,
    /// Customers created so far; arrivals stop at `config.max_customers`.
    pub(crate) arrivals:          u32,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Drive the event loop until the termination policy (or an empty event
    /// queue) stops it, then return the finalized statistics.
    ///
    /// Termination may leave servers busy and waiting lines non-empty; that
    /// in-flight work is simply unresolved and excluded from the "served"
    /// numbers.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunStats> {
        loop {
            if let TerminationPolicy::DrawBudget(budget) = self.config.termination {
                if self.rng.draws() >= budget {
                    break;
                }
            }

            let Some(event) = self.events.pop_earliest() else {
                break;
            };

            if let TerminationPolicy::Horizon(horizon) = self.config.termination {
                if event.time.as_secs() > horizon {
                    // Discard the event; account for the tail interval so
                    // every histogram still sums to the full horizon.
                    let horizon = SimTime::from_secs(horizon);
                    self.accrue_occupancy(horizon);
                    self.clock = horizon;
                    break;
                }
            }

            // Time-weighted occupancy must reflect the state during the
            // just-elapsed interval — accrue strictly before dispatch.
            self.accrue_occupancy(event.time);
            self.clock = event.time;

            observer.on_event(event.time, &event.kind);
            match event.kind {
                EventKind::Arrival => self.handle_arrival()?,
                EventKind::Completion { station, server, customer: _ } => {
                    self.handle_completion(station, server)?;
                }
            }
        }

        let stats = self.collect_stats();
        observer.on_run_end(&stats);
        Ok(stats)
    }

    /// The resolved seed for this run (reported in [`RunStats`] as well).
    pub fn seed(&self) -> u64 {
        self.seed
    }

    // ── Event handlers ────────────────────────────────────────────────────

    fn handle_arrival(&mut self) -> SimResult<()> {
        let now = self.clock;

        if self.arrivals < self.config.max_customers {
            let customer = self.customers.create(now, self.stations.len());
            self.arrivals += 1;
            self.admit_at(StationId(0), customer, now)?;
        }

        // Self-schedule the next external arrival while the network is still
        // accepting new customers.
        if self.arrivals < self.config.max_customers {
            let gap = self
                .rng
                .next_uniform(self.config.arrival.min, self.config.arrival.max);
            self.events.schedule(Event { time: now + gap, kind: EventKind::Arrival });
        }
        Ok(())
    }

    fn handle_completion(&mut self, station: StationId, server: ServerId) -> SimResult<()> {
        let now = self.clock;
        let departing = {
            let st = self
                .stations
                .get_mut(station.index())
                .ok_or(SimError::UnknownStation(station))?;
            let mut ctx = ServiceCtx {
                customers: &mut self.customers,
                rng:       &mut self.rng,
                events:    &mut self.events,
                stats:     &mut self.station_stats[station.index()],
            };
            st.complete(server, now, &mut ctx)?
        };
        self.route_customer(departing, station, now)
    }

    /// Route a customer departing `from` at `now`: exit stamps the system
    /// time and archives the customer; any other destination is a fresh
    /// admission there.
    fn route_customer(
        &mut self,
        customer: CustomerId,
        from:     StationId,
        now:      SimTime,
    ) -> SimResult<()> {
        self.station_stats[from.index()].processed += 1;

        let weights = &self.stations[from.index()].routing_weights;
        match pick_destination(weights, &mut self.rng) {
            RouteOutcome::Exit => {
                let c = self.customers.get_mut(customer)?;
                let total = now - c.arrival_time;
                c.total_system_time = Some(total);
                c.status = CustomerStatus::Served;
                c.station = None;
                self.total_system_time += total;
                self.served += 1;
                Ok(())
            }
            RouteOutcome::Station(dest) => {
                self.admit_at(dest, customer, now).map(|_| ())
            }
        }
    }

    fn admit_at(
        &mut self,
        station:  StationId,
        customer: CustomerId,
        now:      SimTime,
    ) -> SimResult<Admission> {
        let st = self
            .stations
            .get_mut(station.index())
            .ok_or(SimError::UnknownStation(station))?;
        let mut ctx = ServiceCtx {
            customers: &mut self.customers,
            rng:       &mut self.rng,
            events:    &mut self.events,
            stats:     &mut self.station_stats[station.index()],
        };
        st.admit(customer, now, &mut ctx)
    }

    // ── Statistics ────────────────────────────────────────────────────────

    /// Add the interval from `clock` to `upto` into every station's bucket
    /// for its current (pre-event) occupancy.
    fn accrue_occupancy(&mut self, upto: SimTime) {
        let dt = upto - self.clock;
        if dt <= 0.0 {
            return;
        }
        for (station, stats) in self.stations.iter().zip(self.station_stats.iter_mut()) {
            stats.occupancy_time[station.occupancy()] += dt;
        }
    }

    fn collect_stats(&self) -> RunStats {
        RunStats {
            seed:              self.seed,
            end_time:          self.clock,
            draws:             self.rng.draws(),
            served:            self.served,
            total_system_time: self.total_system_time,
            stations:          self.station_stats.clone(),
        }
    }
}
