//! `qns-sim` — the discrete-event loop for the rust_qns queueing-network
//! simulator.
//!
//! # Event loop
//!
//! ```text
//! loop:
//!   ① Budget    — under DrawBudget, stop once the variate counter hits it.
//!   ② Pop       — earliest event from the queue; empty queue ends the run.
//!   ③ Horizon   — under Horizon, an event beyond it is discarded; occupancy
//!                 is accrued up to the horizon and the clock parks there.
//!   ④ Accrue    — add (event.time − clock) to every station's occupancy
//!                 bucket at its PRE-event occupancy, then advance the clock.
//!   ⑤ Dispatch  — Arrival:    create a customer, admit at station 0,
//!                             schedule the next arrival while below the cap.
//!                 Completion: free the server, promote the waiting-line
//!                             head, route the departing customer onward.
//! ```
//!
//! The whole run is one logical thread of control: stations, customers, and
//! statistics are owned outright by [`Sim`], and "parallel" servers are
//! parallel only in simulated time.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use qns_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(config).build()?;
//! let stats = sim.run(&mut NoopObserver)?;
//! println!("served {} customers", stats.served);
//! ```

pub mod builder;
pub mod customer;
pub mod error;
pub mod event;
pub mod observer;
pub mod routing;
pub mod sim;
pub mod station;
pub mod stats;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use customer::{Customer, CustomerStatus, CustomerStore};
pub use error::{SimError, SimResult};
pub use event::{Event, EventKind, EventQueue};
pub use observer::{NoopObserver, SimObserver};
pub use routing::{RouteOutcome, pick_destination};
pub use sim::Sim;
pub use station::{Admission, Assignment, Server, ServiceCtx, Station};
pub use stats::{OccupancyBucket, RunStats, StationStats};
