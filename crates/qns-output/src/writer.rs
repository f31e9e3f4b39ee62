//! Output backend trait.

use crate::OutputResult;
use crate::row::{OccupancyRow, StationSummaryRow};

/// A sink for flattened run statistics (CSV today; the trait keeps the door
/// open for other tabular backends without touching the callers).
pub trait OutputWriter {
    fn write_station_summaries(&mut self, rows: &[StationSummaryRow]) -> OutputResult<()>;

    fn write_occupancy(&mut self, rows: &[OccupancyRow]) -> OutputResult<()>;

    /// Flush and close.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
