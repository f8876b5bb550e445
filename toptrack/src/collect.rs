//! Process enumeration. Sources produce per-item results so one unreadable
//! or mid-exit process never fails the whole pass.

use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System};
use tracing::debug;

use crate::error::{EnumerationError, ProcessAccessError};
use crate::types::{CounterSample, ProcessSample};

/// Outcome for a single process within one enumeration pass.
pub type PerProcess<T> = Result<T, ProcessAccessError>;

/// Lists processes with one absolute byte figure each (resident memory).
///
/// Implementations must not let a single slow or unreadable process stall
/// the scan — emit a `ProcessAccessError` item and move on. Partial results
/// beat a missed pass.
pub trait SampleSource: Send + 'static {
    fn snapshot(&mut self) -> Result<Vec<PerProcess<ProcessSample>>, EnumerationError>;
}

/// Lists processes with cumulative in/out byte counters (network traffic,
/// disk transfer). Counters must be monotonic per process lifetime.
pub trait CounterSource: Send + 'static {
    fn snapshot(&mut self) -> Result<Vec<PerProcess<CounterSample>>, EnumerationError>;
}

/// Best-effort aggregation: keep readable processes, count the rest.
pub(crate) fn drain_ok<T>(items: Vec<PerProcess<T>>) -> Vec<T> {
    let total = items.len();
    let kept: Vec<T> = items.into_iter().filter_map(Result::ok).collect();
    let skipped = total - kept.len();
    if skipped > 0 {
        debug!(skipped, "processes dropped from enumeration pass");
    }
    kept
}

/// Resident memory per process via a persistent sysinfo handle.
pub struct SysinfoMemory {
    sys: System,
}

impl SysinfoMemory {
    pub fn new() -> Self {
        Self { sys: System::new() }
    }
}

impl Default for SysinfoMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleSource for SysinfoMemory {
    fn snapshot(&mut self) -> Result<Vec<PerProcess<ProcessSample>>, EnumerationError> {
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );
        Ok(self
            .sys
            .processes()
            .values()
            .map(|p| {
                Ok(ProcessSample {
                    pid: p.pid().as_u32(),
                    name: p.name().to_string_lossy().into_owned(),
                    bytes: p.memory(),
                })
            })
            .collect())
    }
}

/// Cumulative disk read/write bytes per process.
///
/// A portable in/out counter pair for the rate pipeline; per-process
/// *network* accounting has no portable primitive and comes from a
/// platform-specific [`CounterSource`] instead.
pub struct SysinfoDiskIo {
    sys: System,
}

impl SysinfoDiskIo {
    pub fn new() -> Self {
        Self { sys: System::new() }
    }
}

impl Default for SysinfoDiskIo {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterSource for SysinfoDiskIo {
    fn snapshot(&mut self) -> Result<Vec<PerProcess<CounterSample>>, EnumerationError> {
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_disk_usage(),
        );
        Ok(self
            .sys
            .processes()
            .values()
            .map(|p| {
                let du = p.disk_usage();
                Ok(CounterSample {
                    pid: p.pid().as_u32(),
                    name: p.name().to_string_lossy().into_owned(),
                    bytes_in: du.total_read_bytes,
                    bytes_out: du.total_written_bytes,
                })
            })
            .collect())
    }
}
