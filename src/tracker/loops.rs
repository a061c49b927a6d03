//! This module contains the tracker for backward jumps, the walker's proxy for
//! loops.

use serde::{Deserialize, Serialize};

/// A backward jump seen in the bytecode.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct LoopRecord {
    /// The offset that the jump targets.
    pub target_pc: usize,

    /// The offset of the jump itself.
    pub jump_pc: usize,

    /// The number of times this `(target_pc, jump_pc)` pair was recorded.
    ///
    /// As the walker visits each offset exactly once, this counts static
    /// occurrences in a single pass. It is not a runtime iteration count.
    pub count: usize,
}

/// An ordered collection of [`LoopRecord`]s, keyed by their target and jump
/// offsets.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LoopTracker {
    loops: Vec<LoopRecord>,
}

impl LoopTracker {
    /// Creates a new tracker with no loops recorded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a jump at `jump_pc` back to `target_pc`.
    ///
    /// If the pair has been recorded before its count is incremented,
    /// otherwise a new record is appended with a count of one.
    pub fn record(&mut self, target_pc: usize, jump_pc: usize) {
        match self
            .loops
            .iter_mut()
            .find(|l| l.target_pc == target_pc && l.jump_pc == jump_pc)
        {
            Some(existing) => existing.count += 1,
            None => self.loops.push(LoopRecord {
                target_pc,
                jump_pc,
                count: 1,
            }),
        }
    }

    /// Gets the recorded loops in the order they were first seen.
    #[must_use]
    pub fn loops(&self) -> &[LoopRecord] {
        &self.loops
    }

    /// Checks whether no loops have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loops.is_empty()
    }

    /// Consumes the tracker, returning its records.
    #[must_use]
    pub fn into_loops(self) -> Vec<LoopRecord> {
        self.loops
    }
}
