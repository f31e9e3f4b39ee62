//! Builder for constructing a [`Sim`].

use qns_core::{NetworkConfig, SimTime, StationId, VariateSource};

use crate::customer::CustomerStore;
use crate::event::{Event, EventKind, EventQueue};
use crate::sim::Sim;
use crate::station::Station;
use crate::stats::StationStats;
use crate::SimResult;

/// Builder for [`Sim`].
///
/// `build()` validates the configuration (rejecting, never clamping),
/// resolves the seed, instantiates the stations and their statistics slots,
/// and schedules the first external arrival.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config)
///     .seed(42) // overrides any seed in the config
///     .build()?;
/// let stats = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:        NetworkConfig,
    seed_override: Option<u64>,
}

impl SimBuilder {
    pub fn new(config: NetworkConfig) -> Self {
        Self { config, seed_override: None }
    }

    /// Override the configuration's seed (e.g. from a CLI flag).
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed_override = Some(seed);
        self
    }

    /// Validate and assemble a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;

        let seed = VariateSource::resolve_seed(self.seed_override.or(self.config.seed));

        let stations: Vec<Station> = self
            .config
            .stations
            .iter()
            .enumerate()
            .map(|(i, sc)| Station::new(StationId(i as u16), sc))
            .collect();

        let station_stats: Vec<StationStats> = self
            .config
            .stations
            .iter()
            .map(|sc| StationStats::new(sc.capacity))
            .collect();

        let mut events = EventQueue::new();
        events.schedule(Event {
            time: SimTime::from_secs(self.config.first_arrival),
            kind: EventKind::Arrival,
        });

        Ok(Sim {
            clock: SimTime::ZERO,
            events,
            customers: CustomerStore::new(),
            stations,
            rng: VariateSource::new(seed),
            station_stats,
            seed,
            served: 0,
            total_system_time: 0.0,
            arrivals: 0,
            config: self.config,
        })
    }
}
