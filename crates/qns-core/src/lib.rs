//! `qns-core` — foundational types for the `rust_qns` queueing-network simulator.
//!
//! This crate is a dependency of every other `qns-*` crate.  It intentionally
//! has no `qns-*` dependencies and minimal external ones (only `rand`,
//! `ordered-float`, and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `CustomerId`, `StationId`, `ServerId`                 |
//! | [`time`]        | `SimTime` — totally ordered continuous sim time       |
//! | [`rng`]         | `VariateSource` — seeded, draw-counted uniform RNG    |
//! | [`config`]      | `NetworkConfig`, `StationConfig`, `TerminationPolicy` |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all configuration types. |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    MAX_SERVERS, MAX_WAITING_ROOM, NetworkConfig, StationConfig, TerminationPolicy, UniformRange,
};
pub use error::{CoreError, CoreResult};
pub use ids::{CustomerId, ServerId, StationId};
pub use rng::VariateSource;
pub use time::SimTime;
