//! Error taxonomy: whole-pass failures, single-process failures, and
//! rejected configuration. None of these ever reach `latest()` readers.

use thiserror::Error;

use crate::config::{INTERVAL_MAX_SECS, INTERVAL_MIN_SECS, TOP_N_MAX};

/// The whole process-table query failed. The sampling pass is skipped, the
/// previous result stays in place, and the schedule keeps running.
#[derive(Debug, Error)]
pub enum EnumerationError {
    #[error("process table query failed: {0}")]
    QueryFailed(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A single process could not be read. It is dropped from the pass; the
/// pass itself still succeeds.
#[derive(Debug, Error)]
#[error("process {pid}: {kind}")]
pub struct ProcessAccessError {
    pub pid: u32,
    pub kind: AccessErrorKind,
}

#[derive(Debug, Error)]
pub enum AccessErrorKind {
    #[error("permission denied")]
    Denied,
    #[error("exited during enumeration")]
    Exited,
    #[error("{0}")]
    Unreadable(String),
}

/// Rejected configuration value; the previously set value stays in effect.
#[derive(Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("refresh interval {0}s outside {min}..={max}s", min = INTERVAL_MIN_SECS, max = INTERVAL_MAX_SECS)]
    IntervalOutOfRange(f64),
    #[error("top process count {0} exceeds {max}", max = TOP_N_MAX)]
    TopNOutOfRange(usize),
}
