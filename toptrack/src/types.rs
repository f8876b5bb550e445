//! Consumer-facing sample and snapshot types.
//! Keep this module minimal and stable — it is what the display layer reads.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One process observed during a single enumeration pass of an absolute
/// metric (resident memory). A pid identifies a process only for its
/// lifetime, so sample sets are disposable per pass and never keyed across
/// passes without a liveness check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessSample {
    pub pid: u32,
    pub name: String,
    /// Resident bytes at enumeration time.
    pub bytes: u64,
}

/// Cumulative in/out byte counters for one process (network traffic, disk
/// transfer). Monotonic for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CounterSample {
    pub pid: u32,
    pub name: String,
    pub bytes_in: u64,
    pub bytes_out: u64,
}

/// Per-second throughput derived from two [`CounterSample`]s of the same
/// pid taken one pass apart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatedSample {
    pub pid: u32,
    pub name: String,
    pub bytes_in_per_sec: f64,
    pub bytes_out_per_sec: f64,
}

/// The latest completed top-N result.
///
/// `seq` is assigned by the store and strictly increases across commits;
/// readers comparing snapshots order by it. `taken_at` is wall-clock and
/// informational only.
#[derive(Debug, Clone, Serialize)]
pub struct TopSnapshot<T> {
    pub seq: u64,
    pub taken_at: DateTime<Utc>,
    pub entries: Vec<T>,
}
