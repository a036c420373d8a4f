//! Engine errors.
//!
//! Record-store failures keep their own type ([`store::StoreError`]) and are
//! either recovered into a degraded account or propagated for the caller to
//! turn into a plain-text reply. The only error born here is a rejected tier
//! configuration, which aborts startup instead of a running command.

use thiserror::Error;

/// An invalid configured tier table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TierTableError {
    #[error("tier table is empty")]
    Empty,
    #[error("tier thresholds must be strictly descending ({upper} then {lower})")]
    NotDescending { upper: i64, lower: i64 },
    #[error("last tier threshold must be 0 to cover every total, found {0}")]
    MissingFloor(i64),
}
