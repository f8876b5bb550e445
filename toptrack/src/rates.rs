//! Converts successive cumulative counter passes into per-second rates.

use std::collections::HashMap;

use crate::types::{CounterSample, RatedSample};

/// Rates for every process in `current`.
///
/// A pid missing from `previous`, a counter that went backwards (pid reuse
/// after a restart), and a non-positive `elapsed_secs` all yield 0 rather
/// than a guess. Processes present only in `previous` have exited and are
/// dropped.
pub fn compute_rates(
    previous: &HashMap<u32, CounterSample>,
    current: Vec<CounterSample>,
    elapsed_secs: f64,
) -> Vec<RatedSample> {
    current
        .into_iter()
        .map(|cur| {
            let (bytes_in_per_sec, bytes_out_per_sec) = match previous.get(&cur.pid) {
                Some(prev) if elapsed_secs > 0.0 => (
                    cur.bytes_in.saturating_sub(prev.bytes_in) as f64 / elapsed_secs,
                    cur.bytes_out.saturating_sub(prev.bytes_out) as f64 / elapsed_secs,
                ),
                _ => (0.0, 0.0),
            };
            RatedSample {
                pid: cur.pid,
                name: cur.name,
                bytes_in_per_sec,
                bytes_out_per_sec,
            }
        })
        .collect()
}

/// Index a counter pass by pid for the next delta.
pub fn index_by_pid(samples: Vec<CounterSample>) -> HashMap<u32, CounterSample> {
    samples.into_iter().map(|s| (s.pid, s)).collect()
}
