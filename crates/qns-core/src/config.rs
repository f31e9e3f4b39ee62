//! Network and run configuration.
//!
//! Configuration is assembled by the application (in code or from a JSON
//! file via the `serde` feature) and handed to the simulator builder, which
//! calls [`NetworkConfig::validate`] before anything else runs.
//!
//! # Validation, not clamping
//!
//! Out-of-range values (a server count of 0, a capacity beyond the
//! structural bound, inverted duration ranges) are rejected outright.
//! Silently clamping them would start a run whose statistics describe a
//! different network than the one configured.
//!
//! # Routing weights
//!
//! `StationConfig::routing_weights` holds one non-negative weight per
//! station in the network **plus a final "exit" weight**, in station order.
//! Weights need not sum to 1 — the routing policy normalizes implicitly by
//! scaling its draw by the sum.  Weight *order* is significant: the routing
//! walk accumulates them in this order.

use crate::error::{CoreError, CoreResult};

// ── Structural bounds ─────────────────────────────────────────────────────────

/// Hard upper bound on parallel servers per station.
pub const MAX_SERVERS: usize = 2;

/// Hard upper bound on a station's waiting-room capacity.
pub const MAX_WAITING_ROOM: usize = 100;

// ── UniformRange ──────────────────────────────────────────────────────────────

/// Inclusive-exclusive bounds of a uniform duration distribution, in seconds.
///
/// `min == max` is allowed and degenerates to a constant duration.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UniformRange {
    pub min: f64,
    pub max: f64,
}

impl UniformRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn validate(&self, what: &str) -> CoreResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(CoreError::Config(format!(
                "{what}: bounds must be finite, got [{}, {}]",
                self.min, self.max
            )));
        }
        if self.min < 0.0 {
            return Err(CoreError::Config(format!(
                "{what}: bounds must be non-negative, got min {}",
                self.min
            )));
        }
        if self.max < self.min {
            return Err(CoreError::Config(format!(
                "{what}: max {} is below min {}",
                self.max, self.min
            )));
        }
        Ok(())
    }
}

// ── StationConfig ─────────────────────────────────────────────────────────────

/// Configuration of one service station.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StationConfig {
    /// Display name used in reports.
    pub name: String,

    /// Number of parallel servers, `1..=MAX_SERVERS`.
    pub servers: usize,

    /// Waiting-room capacity (customers queued beyond the servers),
    /// `0..=MAX_WAITING_ROOM`.  0 means no waiting room at all.
    pub capacity: usize,

    /// Uniform service-duration bounds.
    pub service: UniformRange,

    /// One weight per station plus a trailing exit weight (see module docs).
    pub routing_weights: Vec<f64>,
}

// ── TerminationPolicy ─────────────────────────────────────────────────────────

/// The single stopping rule governing a run.
///
/// Exactly one policy is configured per run.  An empty event queue always
/// terminates a run regardless of policy — with no pending occurrence there
/// is nothing left to simulate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TerminationPolicy {
    /// Stop once the next event lies beyond this simulated time.  The event
    /// is discarded and the clock parks exactly at the horizon.
    Horizon(f64),

    /// Stop once this many uniform variate draws have been consumed.
    DrawBudget(u64),

    /// Run until the event queue drains: arrivals stop at
    /// [`NetworkConfig::max_customers`] and in-flight work is allowed to
    /// finish.
    Drain,
}

// ── NetworkConfig ─────────────────────────────────────────────────────────────

/// Full static configuration of a queueing network and one run of it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkConfig {
    /// The stations, in routing-weight order.  External arrivals enter at
    /// station 0.
    pub stations: Vec<StationConfig>,

    /// Uniform inter-arrival bounds for external arrivals.
    pub arrival: UniformRange,

    /// Simulated time of the first external arrival.
    pub first_arrival: f64,

    /// Master RNG seed.  `None` draws a seed from OS entropy; the resolved
    /// seed is reported in the run statistics so the run stays replayable.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: Option<u64>,

    /// Cap on customers created by external arrivals; once reached, no
    /// further arrivals are scheduled.
    #[cfg_attr(feature = "serde", serde(default = "default_max_customers"))]
    pub max_customers: u32,

    /// The run's stopping rule.
    pub termination: TerminationPolicy,
}

#[cfg(feature = "serde")]
fn default_max_customers() -> u32 {
    200_000
}

impl NetworkConfig {
    /// Number of stations in the network.
    #[inline]
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Check the whole configuration, rejecting anything out of range.
    ///
    /// Called by the simulator builder before a run starts; applications
    /// loading configs from files may also call it early for better error
    /// locality.
    pub fn validate(&self) -> CoreResult<()> {
        if self.stations.is_empty() {
            return Err(CoreError::Config("network has no stations".into()));
        }

        let expected_weights = self.stations.len() + 1;
        for (i, station) in self.stations.iter().enumerate() {
            let ctx = if station.name.is_empty() {
                format!("station {i}")
            } else {
                format!("station {i} ({})", station.name)
            };

            if station.name.is_empty() {
                return Err(CoreError::Config(format!("{ctx}: empty name")));
            }
            if station.servers == 0 || station.servers > MAX_SERVERS {
                return Err(CoreError::Config(format!(
                    "{ctx}: server count {} outside supported range 1..={MAX_SERVERS}",
                    station.servers
                )));
            }
            if station.capacity > MAX_WAITING_ROOM {
                return Err(CoreError::Config(format!(
                    "{ctx}: capacity {} exceeds structural bound {MAX_WAITING_ROOM}",
                    station.capacity
                )));
            }
            station
                .service
                .validate(&format!("{ctx}: service range"))?;
            if station.routing_weights.len() != expected_weights {
                return Err(CoreError::Config(format!(
                    "{ctx}: expected {expected_weights} routing weights ({} stations + exit), got {}",
                    self.stations.len(),
                    station.routing_weights.len()
                )));
            }
            if let Some(w) = station
                .routing_weights
                .iter()
                .find(|w| !w.is_finite() || **w < 0.0)
            {
                return Err(CoreError::Config(format!(
                    "{ctx}: routing weight {w} is not a finite non-negative number"
                )));
            }
        }

        self.arrival.validate("inter-arrival range")?;
        if !self.first_arrival.is_finite() || self.first_arrival < 0.0 {
            return Err(CoreError::Config(format!(
                "first arrival time {} must be finite and non-negative",
                self.first_arrival
            )));
        }
        if self.max_customers == 0 {
            return Err(CoreError::Config(
                "max_customers must be at least 1".into(),
            ));
        }

        match self.termination {
            TerminationPolicy::Horizon(h) if !h.is_finite() || h < 0.0 => {
                Err(CoreError::Config(format!(
                    "horizon {h} must be finite and non-negative"
                )))
            }
            TerminationPolicy::DrawBudget(0) => Err(CoreError::Config(
                "draw budget must be at least 1".into(),
            )),
            _ => Ok(()),
        }
    }
}
