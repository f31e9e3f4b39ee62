//! Simulation error type.

use qns_core::{CoreError, CustomerId, ServerId, StationId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("customer {0} not found")]
    UnknownCustomer(CustomerId),

    #[error("station {0} not found")]
    UnknownStation(StationId),

    #[error("server {server} not found at station {station}")]
    UnknownServer { station: StationId, server: ServerId },

    /// A completion event fired for a server with no assignment.  Completions
    /// are never cancelled, so this indicates corrupted scheduling.
    #[error("completion for idle server {server} at station {station}")]
    IdleCompletion { station: StationId, server: ServerId },
}

pub type SimResult<T> = Result<T, SimError>;
