//! `qns-output` — turns a finalized [`RunStats`](qns_sim::RunStats) into
//! something a human or a downstream tool can read.
//!
//! The simulation core hands over statistics as an in-process value; this
//! crate owns every externally visible representation of them:
//!
//! | Module        | Contents                                            |
//! |---------------|-----------------------------------------------------|
//! | [`row`]       | Plain row structs + bridging from `RunStats`        |
//! | [`writer`]    | `OutputWriter` backend trait                        |
//! | [`csv_out`]   | CSV backend (`station_summaries.csv`, `occupancy.csv`) |
//! | [`report`]    | Human-readable end-of-run text report               |

pub mod csv_out;
pub mod error;
pub mod report;
pub mod row;
pub mod writer;


pub use csv_out::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use report::write_report;
pub use row::{OccupancyRow, StationSummaryRow, occupancy_rows, summary_rows};
pub use writer::OutputWriter;
