//! This module contains the tracker for static storage accesses.

use std::collections::BTreeMap;

/// Counts of the `SLOAD` and `SSTORE` opcodes seen for each storage slot.
///
/// Slots are whatever value the abstract stack could provide as the key at
/// the time of the access, which is the sentinel `0` whenever the key was not
/// a constant.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StorageTracker {
    reads:             BTreeMap<u64, usize>,
    writes:            BTreeMap<u64, usize>,
    current_store_run: usize,
    longest_store_run: usize,
}

impl StorageTracker {
    /// Creates a new tracker that has seen no accesses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a read of `slot`.
    pub fn record_read(&mut self, slot: u64) {
        *self.reads.entry(slot).or_default() += 1;
    }

    /// Records a write to `slot`.
    pub fn record_write(&mut self, slot: u64) {
        *self.writes.entry(slot).or_default() += 1;
    }

    /// Updates the run of consecutive stores, which is extended when
    /// `is_store` is set and broken otherwise.
    pub fn observe_store_run(&mut self, is_store: bool) {
        if is_store {
            self.current_store_run += 1;
            self.longest_store_run = self.longest_store_run.max(self.current_store_run);
        } else {
            self.current_store_run = 0;
        }
    }

    /// Gets the read counts for each slot.
    #[must_use]
    pub fn reads(&self) -> &BTreeMap<u64, usize> {
        &self.reads
    }

    /// Gets the write counts for each slot.
    #[must_use]
    pub fn writes(&self) -> &BTreeMap<u64, usize> {
        &self.writes
    }

    /// Gets the length of the longest run of consecutive `SSTORE` opcodes.
    #[must_use]
    pub fn longest_store_run(&self) -> usize {
        self.longest_store_run
    }

    /// Consumes the tracker, returning the read counts, write counts and the
    /// longest store run in that order.
    #[must_use]
    pub fn into_parts(self) -> (BTreeMap<u64, usize>, BTreeMap<u64, usize>, usize) {
        (self.reads, self.writes, self.longest_store_run)
    }
}
