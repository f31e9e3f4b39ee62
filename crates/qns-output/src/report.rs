//! Human-readable end-of-run report.
//!
//! Layout: run totals first, then one block per station with its summary
//! numbers and the full occupancy distribution as `level;time;fraction`
//! lines (semicolon-separated for painless spreadsheet import).

use std::io;

use qns_core::{NetworkConfig, StationId};
use qns_sim::RunStats;

/// Render the full report for one run into `out`.
pub fn write_report<W: io::Write>(
    out:    &mut W,
    stats:  &RunStats,
    config: &NetworkConfig,
) -> io::Result<()> {
    writeln!(out, "===== Simulation report =====")?;
    writeln!(out, "customers served:     {}", stats.served)?;
    writeln!(out, "mean system time:     {:.6}", stats.mean_system_time())?;
    writeln!(out, "total simulated time: {:.6}", stats.end_time.as_secs())?;
    writeln!(out, "variate draws:        {} (seed {})", stats.draws, stats.seed)?;

    for (i, (station, sc)) in stats.stations.iter().zip(&config.stations).enumerate() {
        writeln!(out)?;
        writeln!(out, "Station {} — {}", i + 1, sc.name)?;
        writeln!(out, "  processed:         {}", station.processed)?;
        writeln!(out, "  mean waiting time: {:.6}", station.mean_waiting())?;
        writeln!(out, "  losses:            {}", station.losses)?;
        writeln!(out, "  occupancy distribution (level;time;fraction):")?;
        for bucket in stats.occupancy_distribution(StationId(i as u16)) {
            writeln!(
                out,
                "    {};{:.6};{:.6}",
                bucket.level, bucket.time, bucket.fraction
            )?;
        }
    }
    Ok(())
}
