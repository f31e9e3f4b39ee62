//! Plain data row types written by output backends, and the bridge that
//! flattens a [`RunStats`] into them.

use qns_core::{NetworkConfig, StationId};
use qns_sim::RunStats;

/// One station's end-of-run summary line.
#[derive(Debug, Clone, PartialEq)]
pub struct StationSummaryRow {
    pub station:      u16,
    pub name:         String,
    /// Customers routed out of the station (service completions).
    pub processed:    u64,
    pub mean_waiting: f64,
    pub losses:       u64,
}

/// One occupancy level of one station's time histogram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OccupancyRow {
    pub station:  u16,
    pub level:    usize,
    /// Accumulated simulated time at this level.
    pub time:     f64,
    /// Fraction of the station's total simulated time.
    pub fraction: f64,
}

/// One summary row per station, named from `config`.
pub fn summary_rows(stats: &RunStats, config: &NetworkConfig) -> Vec<StationSummaryRow> {
    stats
        .stations
        .iter()
        .zip(&config.stations)
        .enumerate()
        .map(|(i, (s, sc))| StationSummaryRow {
            station:      i as u16,
            name:         sc.name.clone(),
            processed:    s.processed,
            mean_waiting: s.mean_waiting(),
            losses:       s.losses,
        })
        .collect()
}

/// The full occupancy histograms of all stations, flattened in station order.
pub fn occupancy_rows(stats: &RunStats) -> Vec<OccupancyRow> {
    (0..stats.stations.len())
        .flat_map(|i| {
            stats
                .occupancy_distribution(StationId(i as u16))
                .into_iter()
                .map(move |bucket| OccupancyRow {
                    station:  i as u16,
                    level:    bucket.level,
                    time:     bucket.time,
                    fraction: bucket.fraction,
                })
        })
        .collect()
}
