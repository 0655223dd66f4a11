//! Core error type.
//!
//! Sub-crates define their own error enums.  `CoreError` covers the few
//! failures that can happen while constructing core value types.

use thiserror::Error;

use crate::Tick;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("delivery window is inverted: start {start} is after end {end}")]
    InvertedInterval { start: Tick, end: Tick },

    #[error("cargo weight must be finite and non-negative, got {0}")]
    InvalidWeight(f64),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `fleet-core`.
pub type CoreResult<T> = Result<T, CoreError>;
