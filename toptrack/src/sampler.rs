//! Background sampling schedule: enumerate, rate, rank, commit.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio::sync::Notify;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::collect::{SysinfoDiskIo, SysinfoMemory};
use crate::config::{check_interval, check_top_n, SamplerConfig};
use crate::error::ConfigError;
use crate::probe::{AbsoluteProbe, Probe, RateProbe};
use crate::store::SnapshotStore;
use crate::topn::select_top;
use crate::types::TopSnapshot;

struct RunState {
    running: bool,
    generation: u64,
}

struct Shared<T> {
    store: SnapshotStore<T>,
    run: Mutex<RunState>,
    interval_ms: AtomicU64,
    top_n: AtomicUsize,
    /// Interrupts the inter-tick sleep so `stop()` takes effect promptly.
    wake: Notify,
}

impl<T> Shared<T> {
    fn is_current(&self, generation: u64) -> bool {
        let run = self.run.lock().unwrap();
        run.running && run.generation == generation
    }

    /// Commit gate, taken under the same lock as `stop()`: once `stop()`
    /// has returned, no in-flight pass can land a result, and a pass
    /// spawned before a restart can never commit into the new run.
    fn commit_if_current(&self, generation: u64, entries: Vec<T>) -> bool {
        let run = self.run.lock().unwrap();
        if run.running && run.generation == generation {
            self.store.commit(entries);
            true
        } else {
            false
        }
    }
}

/// Periodic top-N resource sampler.
///
/// One background Tokio task per sampler enumerates, rates, ranks and
/// commits on a fixed interval; readers on any thread use
/// [`latest`](Sampler::latest) and [`changed`](Sampler::changed) and never
/// wait on a pass in flight.
pub struct Sampler<P: Probe> {
    probe: Arc<tokio::sync::Mutex<P>>,
    shared: Arc<Shared<P::Entry>>,
}

impl Sampler<AbsoluteProbe<SysinfoMemory>> {
    /// Top processes by resident memory.
    pub fn memory(config: SamplerConfig) -> Result<Self, ConfigError> {
        Self::with_probe(AbsoluteProbe::new(SysinfoMemory::new()), config)
    }
}

impl Sampler<RateProbe<SysinfoDiskIo>> {
    /// Top processes by disk transfer rate.
    pub fn disk_io(config: SamplerConfig) -> Result<Self, ConfigError> {
        Self::with_probe(RateProbe::new(SysinfoDiskIo::new()), config)
    }
}

impl<P: Probe> Sampler<P> {
    /// Sampler over any probe, e.g. a [`RateProbe`] wrapping a platform
    /// network counter source.
    pub fn with_probe(probe: P, config: SamplerConfig) -> Result<Self, ConfigError> {
        let interval = check_interval(config.interval_secs)?;
        let top_n = check_top_n(config.top_n)?;
        Ok(Self {
            probe: Arc::new(tokio::sync::Mutex::new(probe)),
            shared: Arc::new(Shared {
                store: SnapshotStore::new(),
                run: Mutex::new(RunState {
                    running: false,
                    generation: 0,
                }),
                interval_ms: AtomicU64::new(interval.as_millis() as u64),
                top_n: AtomicUsize::new(top_n),
                wake: Notify::new(),
            }),
        })
    }

    /// Begin periodic sampling. No-op while already running. Must be called
    /// from within a Tokio runtime.
    pub fn start(&self) {
        let generation = {
            let mut run = self.shared.run.lock().unwrap();
            if run.running {
                return;
            }
            run.generation += 1;
            run.running = true;
            run.generation
        };
        info!(generation, "sampler started");
        tokio::spawn(run_loop(
            Arc::clone(&self.probe),
            Arc::clone(&self.shared),
            generation,
        ));
    }

    /// Stop sampling. Effective before return: a pass already in flight may
    /// finish, but its result is discarded. No-op while already stopped.
    pub fn stop(&self) {
        {
            let mut run = self.shared.run.lock().unwrap();
            if !run.running {
                return;
            }
            run.running = false;
        }
        self.shared.wake.notify_waiters();
        info!("sampler stopped");
    }

    /// Seconds between passes.
    pub fn interval_secs(&self) -> f64 {
        self.shared.interval_ms.load(Ordering::Relaxed) as f64 / 1000.0
    }

    /// Change the pass interval. Takes effect on the next scheduled tick,
    /// no restart needed; out-of-range values are rejected and the prior
    /// interval stays in effect.
    pub fn set_interval(&self, secs: f64) -> Result<(), ConfigError> {
        let interval = check_interval(secs)?;
        self.shared
            .interval_ms
            .store(interval.as_millis() as u64, Ordering::Relaxed);
        Ok(())
    }

    /// Entries kept per snapshot.
    pub fn top_n(&self) -> usize {
        self.shared.top_n.load(Ordering::Relaxed)
    }

    /// Change the entry count; 0 yields empty snapshots ("disabled").
    /// Out-of-range values are rejected and the prior count stays.
    pub fn set_top_n(&self, n: usize) -> Result<(), ConfigError> {
        let n = check_top_n(n)?;
        self.shared.top_n.store(n, Ordering::Relaxed);
        Ok(())
    }

    /// Latest committed snapshot, `None` until the first pass completes.
    /// Never blocks on the sampling task.
    pub fn latest(&self) -> Option<Arc<TopSnapshot<P::Entry>>> {
        self.shared.store.latest()
    }

    /// Resolves when the next snapshot is committed.
    pub async fn changed(&self) {
        self.shared.store.changed().await;
    }
}

impl<P: Probe> Drop for Sampler<P> {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_loop<P: Probe>(
    probe: Arc<tokio::sync::Mutex<P>>,
    shared: Arc<Shared<P::Entry>>,
    generation: u64,
) {
    probe.lock().await.reset();
    let mut last_pass: Option<Instant> = None;
    while shared.is_current(generation) {
        let started = Instant::now();
        let elapsed = last_pass.map(|t| started.duration_since(t));
        let outcome = probe.lock().await.collect(elapsed);
        last_pass = Some(started);
        match outcome {
            Ok(entries) => {
                let n = shared.top_n.load(Ordering::Relaxed);
                let top = select_top(entries, n);
                if !shared.commit_if_current(generation, top) {
                    debug!("pass discarded, sampler no longer running");
                    break;
                }
            }
            Err(e) => {
                warn!("sampling pass failed, keeping previous result: {e}");
            }
        }
        let period = Duration::from_millis(shared.interval_ms.load(Ordering::Relaxed));
        tokio::select! {
            _ = sleep(period) => {}
            _ = shared.wake.notified() => {}
        }
    }
}
