//! Crate-wide error types.
//!
//! Simulation actions are total and never fail. Errors only arise when a
//! caller hands in a string key that does not name a known variant, or a
//! configuration that cannot be honoured.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("Unknown {kind}: {value:?}")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("Invalid reply delay: min {min_ms}ms exceeds max {max_ms}ms")]
    InvalidDelay { min_ms: u64, max_ms: u64 },
}

pub type Result<T> = std::result::Result<T, SimError>;
