//! threenode — reference network for the rust_qns simulator.
//!
//! Simulates the classic three-station open network: a G/G/1 front station
//! feeding a G/G/2/5 and a G/G/2/10 station with stochastic feedback
//! routing, external arrivals uniform on [2, 4], and a draw budget of
//! 100 000 variates.  Pass a JSON config path to simulate a different
//! network, and an output directory to also get CSV exports:
//!
//! ```text
//! threenode [config.json] [output-dir]
//! ```

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use qns_core::{NetworkConfig, SimTime, StationConfig, TerminationPolicy, UniformRange};
use qns_output::{CsvWriter, OutputWriter, occupancy_rows, summary_rows, write_report};
use qns_sim::{EventKind, RunStats, SimBuilder, SimObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:          u64 = 42;
const DRAW_BUDGET:   u64 = 100_000;
const FIRST_ARRIVAL: f64 = 2.0;

// ── Default network ───────────────────────────────────────────────────────────

fn station(name: &str, servers: usize, capacity: usize, service: (f64, f64), weights: [f64; 4])
-> StationConfig {
    StationConfig {
        name:            name.into(),
        servers,
        capacity,
        service:         UniformRange::new(service.0, service.1),
        routing_weights: weights.to_vec(),
    }
}

fn default_config() -> NetworkConfig {
    NetworkConfig {
        stations:      vec![
            station("Node 1 (G/G/1)", 1, 100, (1.0, 2.0), [0.0, 0.8, 0.2, 0.0]),
            station("Node 2 (G/G/2/5)", 2, 5, (4.0, 6.0), [0.3, 0.0, 0.5, 0.2]),
            station("Node 3 (G/G/2/10)", 2, 10, (5.0, 15.0), [0.0, 0.7, 0.0, 0.3]),
        ],
        arrival:       UniformRange::new(2.0, 4.0),
        first_arrival: FIRST_ARRIVAL,
        seed:          Some(SEED),
        max_customers: 200_000,
        termination:   TerminationPolicy::DrawBudget(DRAW_BUDGET),
    }
}

// ── Progress observer ─────────────────────────────────────────────────────────

#[derive(Default)]
struct EventTally {
    arrivals:    u64,
    completions: u64,
}

impl SimObserver for EventTally {
    fn on_event(&mut self, _time: SimTime, kind: &EventKind) {
        match kind {
            EventKind::Arrival => self.arrivals += 1,
            EventKind::Completion { .. } => self.completions += 1,
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn load_config(path: &str) -> Result<NetworkConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {path}"))?;
    let config: NetworkConfig =
        serde_json::from_str(&text).with_context(|| format!("parsing config file {path}"))?;
    config.validate()?;
    Ok(config)
}

fn export_csv(dir: &str, stats: &RunStats, config: &NetworkConfig) -> Result<()> {
    let dir = Path::new(dir);
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let mut writer = CsvWriter::new(dir)?;
    writer.write_station_summaries(&summary_rows(stats, config))?;
    writer.write_occupancy(&occupancy_rows(stats))?;
    writer.finish()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => load_config(&path)?,
        None => default_config(),
    };

    let mut sim = SimBuilder::new(config.clone()).build()?;
    let mut tally = EventTally::default();
    let stats = sim.run(&mut tally)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, &stats, &config)?;
    writeln!(
        out,
        "\ndispatched {} arrivals and {} completions",
        tally.arrivals, tally.completions
    )?;

    if let Some(dir) = args.next() {
        export_csv(&dir, &stats, &config)?;
        writeln!(out, "CSV exports written to {dir}")?;
    }

    Ok(())
}
