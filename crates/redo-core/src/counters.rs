// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-wide monotonic counters, read by the Monitor.
//!
//! Owned by the Supervisor, shared via `Arc`, never global mutable state.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counters mutated by workers and read by the Monitor.
#[derive(Debug, Default)]
pub struct Counters {
    redo_records_from_engine: AtomicU64,
    received_from_redo_queue: AtomicU64,
    sent_to_redo_queue: AtomicU64,
    processed_redo_records: AtomicU64,
    sent_to_info_queue: AtomicU64,
    sent_to_failure_queue: AtomicU64,
}

/// A point-in-time read of every counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountersSnapshot {
    pub redo_records_from_engine: u64,
    pub received_from_redo_queue: u64,
    pub sent_to_redo_queue: u64,
    pub processed_redo_records: u64,
    pub sent_to_info_queue: u64,
    pub sent_to_failure_queue: u64,
}

impl CountersSnapshot {
    /// Per-counter deltas since an earlier snapshot. Saturating: a counter
    /// can only grow, but a snapshot pair can be passed in either order by
    /// a caller and this must never panic.
    pub fn delta_since(&self, previous: &CountersSnapshot) -> CountersSnapshot {
        CountersSnapshot {
            redo_records_from_engine: self
                .redo_records_from_engine
                .saturating_sub(previous.redo_records_from_engine),
            received_from_redo_queue: self
                .received_from_redo_queue
                .saturating_sub(previous.received_from_redo_queue),
            sent_to_redo_queue: self
                .sent_to_redo_queue
                .saturating_sub(previous.sent_to_redo_queue),
            processed_redo_records: self
                .processed_redo_records
                .saturating_sub(previous.processed_redo_records),
            sent_to_info_queue: self
                .sent_to_info_queue
                .saturating_sub(previous.sent_to_info_queue),
            sent_to_failure_queue: self
                .sent_to_failure_queue
                .saturating_sub(previous.sent_to_failure_queue),
        }
    }
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc_redo_records_from_engine(&self) {
        self.redo_records_from_engine.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_received_from_redo_queue(&self) {
        self.received_from_redo_queue.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_sent_to_redo_queue(&self) {
        self.sent_to_redo_queue.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_processed_redo_records(&self) {
        self.processed_redo_records.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_sent_to_info_queue(&self) {
        self.sent_to_info_queue.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_sent_to_failure_queue(&self) {
        self.sent_to_failure_queue.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CountersSnapshot {
        CountersSnapshot {
            redo_records_from_engine: self.redo_records_from_engine.load(Ordering::Relaxed),
            received_from_redo_queue: self.received_from_redo_queue.load(Ordering::Relaxed),
            sent_to_redo_queue: self.sent_to_redo_queue.load(Ordering::Relaxed),
            processed_redo_records: self.processed_redo_records.load(Ordering::Relaxed),
            sent_to_info_queue: self.sent_to_info_queue.load(Ordering::Relaxed),
            sent_to_failure_queue: self.sent_to_failure_queue.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
#[path = "counters_tests.rs"]
mod tests;
