//! Periodic top-N process resource sampling with a producer/consumer
//! snapshot handoff.
//!
//! A background task enumerates processes on a fixed interval, turns
//! cumulative counters into per-second rates, keeps the N highest-ranked
//! entries, and commits the result into a store any thread can read without
//! blocking:
//!
//! ```no_run
//! use toptrack::{Sampler, SamplerConfig};
//!
//! # async fn demo() {
//! let sampler = Sampler::memory(SamplerConfig::default()).unwrap();
//! sampler.start();
//! sampler.changed().await;
//! for entry in &sampler.latest().unwrap().entries {
//!     println!("{:>8} {:>14} {}", entry.pid, entry.bytes, entry.name);
//! }
//! sampler.stop();
//! # }
//! ```
//!
//! Sampling failures never reach readers: a failed pass is logged and the
//! previous snapshot stays available, and a single unreadable process is
//! skipped rather than failing its pass.

pub mod collect;
pub mod config;
pub mod error;
pub mod probe;
pub mod rates;
pub mod sampler;
pub mod store;
pub mod topn;
pub mod types;

pub use collect::{CounterSource, PerProcess, SampleSource, SysinfoDiskIo, SysinfoMemory};
pub use config::SamplerConfig;
pub use error::{AccessErrorKind, ConfigError, EnumerationError, ProcessAccessError};
pub use probe::{AbsoluteProbe, Probe, RateProbe};
pub use sampler::Sampler;
pub use store::SnapshotStore;
pub use topn::{select_top, select_top_by, Ranked};
pub use types::{CounterSample, ProcessSample, RatedSample, TopSnapshot};
