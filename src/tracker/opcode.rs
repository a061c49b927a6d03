//! This module contains the per-opcode frequency and gas tally.

use crate::opcode::Opcode;

/// How many times each opcode was decoded, and how much gas it accounted for.
///
/// The tally remembers the order in which opcodes were first encountered so
/// that rankings over it can break ties deterministically.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OpcodeTally {
    first_seen: Vec<Opcode>,
    counts:     [usize; 256],
    gas:        [u64; 256],
}

impl OpcodeTally {
    /// Creates a new, empty tally.
    #[must_use]
    pub fn new() -> Self {
        Self {
            first_seen: Vec::new(),
            counts:     [0; 256],
            gas:        [0; 256],
        }
    }

    /// Records one occurrence of `opcode` costing `gas`.
    pub fn record(&mut self, opcode: Opcode, gas: u64) {
        let index = usize::from(opcode.as_byte());
        if self.counts[index] == 0 {
            self.first_seen.push(opcode);
        }
        self.counts[index] += 1;
        self.gas[index] += gas;
    }

    /// Gets the number of times `opcode` was recorded.
    #[must_use]
    pub fn count(&self, opcode: Opcode) -> usize {
        self.counts[usize::from(opcode.as_byte())]
    }

    /// Gets the total gas recorded against `opcode`.
    #[must_use]
    pub fn gas(&self, opcode: Opcode) -> u64 {
        self.gas[usize::from(opcode.as_byte())]
    }

    /// Gets the distinct opcodes recorded, in the order they were first
    /// encountered.
    #[must_use]
    pub fn opcodes(&self) -> &[Opcode] {
        &self.first_seen
    }

    /// Gets the total number of opcodes recorded.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Gets the total gas recorded across all opcodes.
    #[must_use]
    pub fn total_gas(&self) -> u64 {
        self.gas.iter().sum()
    }
}

impl Default for OpcodeTally {
    fn default() -> Self {
        Self::new()
    }
}
