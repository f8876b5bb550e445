//! Per-resource readers: one collect pass per tick.

use std::collections::HashMap;
use std::time::Duration;

use crate::collect::{drain_ok, CounterSource, SampleSource};
use crate::error::EnumerationError;
use crate::rates::{compute_rates, index_by_pid};
use crate::topn::Ranked;
use crate::types::{CounterSample, ProcessSample, RatedSample};

/// One resource reader driven by the sampler.
///
/// `collect` runs once per tick on the sampling task. `elapsed` is the time
/// since the previous completed pass, `None` on the first pass after a
/// (re)start.
pub trait Probe: Send + 'static {
    type Entry: Ranked + Send + Sync + 'static;

    fn collect(&mut self, elapsed: Option<Duration>)
        -> Result<Vec<Self::Entry>, EnumerationError>;

    /// Drop any carried state. Called on every sampler start, so a restart
    /// never rates against counters from before the stop.
    fn reset(&mut self) {}
}

/// Absolute metric (resident memory): values pass straight through.
pub struct AbsoluteProbe<S> {
    source: S,
}

impl<S: SampleSource> AbsoluteProbe<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S: SampleSource> Probe for AbsoluteProbe<S> {
    type Entry = ProcessSample;

    fn collect(
        &mut self,
        _elapsed: Option<Duration>,
    ) -> Result<Vec<ProcessSample>, EnumerationError> {
        Ok(drain_ok(self.source.snapshot()?))
    }
}

/// Cumulative counters diffed into per-second rates. Owns the previous pass
/// keyed by pid, replaced wholesale each cycle so exited pids fall out.
pub struct RateProbe<S> {
    source: S,
    prev: HashMap<u32, CounterSample>,
}

impl<S: CounterSource> RateProbe<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            prev: HashMap::new(),
        }
    }
}

impl<S: CounterSource> Probe for RateProbe<S> {
    type Entry = RatedSample;

    fn collect(&mut self, elapsed: Option<Duration>) -> Result<Vec<RatedSample>, EnumerationError> {
        let current = drain_ok(self.source.snapshot()?);
        let elapsed_secs = elapsed.map(|d| d.as_secs_f64()).unwrap_or(0.0);
        let rated = compute_rates(&self.prev, current.clone(), elapsed_secs);
        self.prev = index_by_pid(current);
        Ok(rated)
    }

    fn reset(&mut self) {
        self.prev.clear();
    }
}
