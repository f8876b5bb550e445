//! Deterministic top-N selection.

use std::cmp::Ordering;

use crate::types::{ProcessSample, RatedSample};

/// Anything the selector can rank. Ties on `rank` are broken by ascending
/// pid so equal ranks order the same way on every run.
pub trait Ranked {
    fn rank(&self) -> f64;
    fn pid(&self) -> u32;
}

impl Ranked for ProcessSample {
    fn rank(&self) -> f64 {
        self.bytes as f64
    }

    fn pid(&self) -> u32 {
        self.pid
    }
}

impl Ranked for RatedSample {
    fn rank(&self) -> f64 {
        self.bytes_in_per_sec + self.bytes_out_per_sec
    }

    fn pid(&self) -> u32 {
        self.pid
    }
}

/// Highest-ranked `n` entries, rank descending, pid ascending on ties.
/// `n == 0` is the "disabled" mode and yields an empty list.
pub fn select_top<T: Ranked>(items: Vec<T>, n: usize) -> Vec<T> {
    select_top_by(items, n, T::rank)
}

/// Same selection under a caller-chosen ranking key.
pub fn select_top_by<T: Ranked>(mut items: Vec<T>, n: usize, rank: impl Fn(&T) -> f64) -> Vec<T> {
    if n == 0 {
        return Vec::new();
    }
    // NaN ranks compare as equal and fall through to the pid tie-break.
    items.sort_by(|a, b| {
        rank(b)
            .partial_cmp(&rank(a))
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.pid().cmp(&b.pid()))
    });
    items.truncate(n);
    items
}
