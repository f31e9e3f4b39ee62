//! Time-weighted statistics accumulators.
//!
//! The accumulators are written to only by the driver and the stations; the
//! reporting collaborator consumes a finalized [`RunStats`] after the run.
//!
//! # The occupancy invariant
//!
//! For every station, the sum of its occupancy-bucket times equals the total
//! elapsed simulated time (within floating-point tolerance): the driver adds
//! each inter-event interval to exactly one bucket per station, using the
//! occupancy as it was *during* the interval, before the event is applied.

use qns_core::{SimTime, StationId};

// ── StationStats ──────────────────────────────────────────────────────────────

/// Per-station aggregates.
#[derive(Clone, Debug, PartialEq)]
pub struct StationStats {
    /// Departures routed out of this station (service completions), whether
    /// they went to another station or to exit.
    pub processed:      u64,
    /// Customers rejected by a full waiting line.
    pub losses:         u64,
    /// Sum of all waits accumulated when queued customers were promoted to a
    /// server.
    pub total_waiting:  f64,
    /// Simulated time spent at each occupancy level `0..=capacity`.
    pub occupancy_time: Vec<f64>,
}

impl StationStats {
    pub fn new(capacity: usize) -> Self {
        Self {
            processed:      0,
            losses:         0,
            total_waiting:  0.0,
            occupancy_time: vec![0.0; capacity + 1],
        }
    }

    /// Mean waiting time per processed customer; 0 when nothing was processed.
    pub fn mean_waiting(&self) -> f64 {
        if self.processed == 0 {
            0.0
        } else {
            self.total_waiting / self.processed as f64
        }
    }

    /// Total simulated time accumulated across all occupancy buckets.
    pub fn total_occupancy_time(&self) -> f64 {
        self.occupancy_time.iter().sum()
    }
}

// ── RunStats ──────────────────────────────────────────────────────────────────

/// One occupancy level of a station's time histogram.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OccupancyBucket {
    pub level:    usize,
    /// Accumulated simulated time at this level.
    pub time:     f64,
    /// `time` as a fraction of the station's total; the fractions of one
    /// station sum to 1 within floating-point tolerance.
    pub fraction: f64,
}

/// Finalized statistics of one run, handed to the reporting collaborator.
#[derive(Clone, Debug, PartialEq)]
pub struct RunStats {
    /// The resolved seed that reproduces this run exactly.
    pub seed:              u64,
    /// Final clock value — the total simulated time.
    pub end_time:          SimTime,
    /// Uniform variate draws consumed.
    pub draws:             u64,
    /// Customers that exited the network.
    pub served:            u64,
    /// Sum of end-to-end system times over served customers.
    pub total_system_time: f64,
    pub stations:          Vec<StationStats>,
}

impl RunStats {
    /// Mean end-to-end system time per served customer; 0 when none exited.
    pub fn mean_system_time(&self) -> f64 {
        if self.served == 0 {
            0.0
        } else {
            self.total_system_time / self.served as f64
        }
    }

    /// The full occupancy-time histogram of `station`, with fractions of the
    /// station's total accumulated time.
    pub fn occupancy_distribution(&self, station: StationId) -> Vec<OccupancyBucket> {
        let stats = &self.stations[station.index()];
        let total = stats.total_occupancy_time();
        stats
            .occupancy_time
            .iter()
            .enumerate()
            .map(|(level, &time)| OccupancyBucket {
                level,
                time,
                fraction: if total > 0.0 { time / total } else { 0.0 },
            })
            .collect()
    }
}
