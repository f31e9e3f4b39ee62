//! Core error type.
//!
//! Sub-crates define their own error enums and either convert `CoreError`
//! via `From` impls or wrap it as one variant.  Both patterns are acceptable;
//! prefer whichever keeps error sites clean.

use thiserror::Error;

/// The top-level error type for `qns-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A configuration was rejected by [`crate::NetworkConfig::validate`].
    /// Invalid configurations are never clamped into range; a run must not
    /// start with ambiguous semantics.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `qns-core`.
pub type CoreResult<T> = Result<T, CoreError>;
