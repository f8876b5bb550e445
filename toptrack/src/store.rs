//! Latest-result handoff between the sampling task and any number of
//! readers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use chrono::Utc;
use tokio::sync::Notify;

use crate::types::TopSnapshot;

/// Single-writer/multi-reader store for the last completed top-N pass.
///
/// Readers clone an `Arc` under a briefly-held read lock, so they never see
/// a torn result and never wait on a pass in flight (the writer builds the
/// snapshot outside the lock and holds it only for the pointer swap).
pub struct SnapshotStore<T> {
    latest: RwLock<Option<Arc<TopSnapshot<T>>>>,
    next_seq: AtomicU64,
    notify: Notify,
}

impl<T> SnapshotStore<T> {
    pub fn new() -> Self {
        Self {
            latest: RwLock::new(None),
            next_seq: AtomicU64::new(1),
            notify: Notify::new(),
        }
    }

    /// Last committed result, or `None` before the first pass completes.
    /// Never errors.
    pub fn latest(&self) -> Option<Arc<TopSnapshot<T>>> {
        self.latest.read().unwrap().clone()
    }

    /// Replace the stored result and wake `changed()` waiters. The sequence
    /// number is assigned under the write lock, so the order readers
    /// observe matches commit order.
    pub fn commit(&self, entries: Vec<T>) -> u64 {
        let mut slot = self.latest.write().unwrap();
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        *slot = Some(Arc::new(TopSnapshot {
            seq,
            taken_at: Utc::now(),
            entries,
        }));
        drop(slot);
        self.notify.notify_waiters();
        seq
    }

    /// Resolves when the next commit lands.
    pub async fn changed(&self) {
        self.notify.notified().await;
    }
}

impl<T> Default for SnapshotStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
