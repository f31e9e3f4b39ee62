//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `station_summaries.csv`
//! - `occupancy.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::row::{OccupancyRow, StationSummaryRow};
use crate::writer::OutputWriter;
use crate::OutputResult;

/// Writes run statistics to two CSV files.
pub struct CsvWriter {
    summaries: Writer<File>,
    occupancy: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut summaries = Writer::from_path(dir.join("station_summaries.csv"))?;
        summaries.write_record(["station", "name", "processed", "mean_waiting", "losses"])?;

        let mut occupancy = Writer::from_path(dir.join("occupancy.csv"))?;
        occupancy.write_record(["station", "level", "time", "fraction"])?;

        Ok(Self {
            summaries,
            occupancy,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_station_summaries(&mut self, rows: &[StationSummaryRow]) -> OutputResult<()> {
        for row in rows {
            self.summaries.write_record(&[
                row.station.to_string(),
                row.name.clone(),
                row.processed.to_string(),
                format!("{:.6}", row.mean_waiting),
                row.losses.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_occupancy(&mut self, rows: &[OccupancyRow]) -> OutputResult<()> {
        for row in rows {
            self.occupancy.write_record(&[
                row.station.to_string(),
                row.level.to_string(),
                format!("{:.6}", row.time),
                format!("{:.6}", row.fraction),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        self.occupancy.flush()?;
        Ok(())
    }
}
