//! This module contains the [`AnalysisReport`], the final output of an
//! analysis, and the aggregation that builds it from the results of a walk.
//!
//! # Determinism
//!
//! All maps in the report are ordered, and every ranking breaks ties by the
//! order in which things were first encountered in the bytecode. Two analyses
//! of the same bytecode with the same configuration therefore produce equal
//! reports, and render identically.

pub mod suggestion;

use std::collections::BTreeMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    analyzer::Config,
    constant::{STORAGE_READ_HOTSPOT_THRESHOLD, STORAGE_WRITE_HOTSPOT_THRESHOLD},
    tracker::{FunctionRecord, LoopRecord},
    walker::WalkResult,
};

/// Builds the report from the results of a finished `walk`, using `config` to
/// decide how many opcodes to rank.
#[must_use]
pub fn aggregate(walk: WalkResult, config: &Config) -> AnalysisReport {
    let WalkResult {
        total_gas,
        bytes_analysed,
        instructions_decoded,
        tally,
        storage,
        loops,
        functions,
    } = walk;

    let optimization_suggestions = suggestion::suggest(&tally, &storage, &loops);

    let opcode_frequency = tally
        .opcodes()
        .iter()
        .map(|op| (op.to_string(), tally.count(*op)))
        .collect();
    let opcode_gas = tally
        .opcodes()
        .iter()
        .map(|op| (op.to_string(), tally.gas(*op)))
        .collect();

    // The sort is stable, so equal gas keeps first-seen order.
    let top_expensive_opcodes = tally
        .opcodes()
        .iter()
        .map(|op| OpcodeGas {
            opcode: op.to_string(),
            gas:    tally.gas(*op),
        })
        .sorted_by(|a, b| b.gas.cmp(&a.gas))
        .take(config.top_opcodes)
        .collect();

    let (storage_reads, storage_writes, longest_store_run) = storage.into_parts();
    let storage_hotspots = StorageHotspots::new(&storage_reads, &storage_writes);

    AnalysisReport {
        total_gas,
        bytes_analysed,
        instructions_decoded,
        opcode_frequency,
        opcode_gas,
        storage_reads,
        storage_writes,
        longest_store_run,
        storage_hotspots,
        loops: loops.into_loops(),
        functions: functions.into_functions(),
        top_expensive_opcodes,
        optimization_suggestions,
    }
}

/// The result of analysing a contract's bytecode.
///
/// The report is built once per analysis and is immutable thereafter. It can
/// be serialized for export, and deserialized again for later comparison.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct AnalysisReport {
    total_gas:                u64,
    bytes_analysed:           usize,
    instructions_decoded:     usize,
    opcode_frequency:         BTreeMap<String, usize>,
    opcode_gas:               BTreeMap<String, u64>,
    storage_reads:            BTreeMap<u64, usize>,
    storage_writes:           BTreeMap<u64, usize>,
    longest_store_run:        usize,
    storage_hotspots:         StorageHotspots,
    loops:                    Vec<LoopRecord>,
    functions:                Vec<FunctionRecord>,
    top_expensive_opcodes:    Vec<OpcodeGas>,
    optimization_suggestions: Vec<String>,
}

impl AnalysisReport {
    /// Gets the total estimated gas of every decoded opcode.
    #[must_use]
    pub fn total_gas(&self) -> u64 {
        self.total_gas
    }

    /// Gets the length of the analysed bytecode.
    #[must_use]
    pub fn bytes_analysed(&self) -> usize {
        self.bytes_analysed
    }

    /// Gets the number of opcodes that were decoded.
    #[must_use]
    pub fn instructions_decoded(&self) -> usize {
        self.instructions_decoded
    }

    /// Gets the number of times each opcode occurs, keyed by mnemonic.
    #[must_use]
    pub fn opcode_frequency(&self) -> &BTreeMap<String, usize> {
        &self.opcode_frequency
    }

    /// Gets the total gas of each opcode, keyed by mnemonic.
    #[must_use]
    pub fn opcode_gas(&self) -> &BTreeMap<String, u64> {
        &self.opcode_gas
    }

    /// Gets the number of reads of each storage slot.
    #[must_use]
    pub fn storage_reads(&self) -> &BTreeMap<u64, usize> {
        &self.storage_reads
    }

    /// Gets the number of writes to each storage slot.
    #[must_use]
    pub fn storage_writes(&self) -> &BTreeMap<u64, usize> {
        &self.storage_writes
    }

    /// Gets the length of the longest run of consecutive `SSTORE` opcodes.
    #[must_use]
    pub fn longest_store_run(&self) -> usize {
        self.longest_store_run
    }

    /// Gets the storage slots that are accessed often enough to be worth
    /// attention.
    #[must_use]
    pub fn storage_hotspots(&self) -> &StorageHotspots {
        &self.storage_hotspots
    }

    /// Gets the backward jumps found in the bytecode.
    #[must_use]
    pub fn loops(&self) -> &[LoopRecord] {
        &self.loops
    }

    /// Gets the candidate functions found in the bytecode, in the order they
    /// were found.
    #[must_use]
    pub fn functions(&self) -> &[FunctionRecord] {
        &self.functions
    }

    /// Gets the most expensive opcodes, most expensive first.
    #[must_use]
    pub fn top_expensive_opcodes(&self) -> &[OpcodeGas] {
        &self.top_expensive_opcodes
    }

    /// Gets the suggestions for reducing the gas cost of the contract.
    #[must_use]
    pub fn optimization_suggestions(&self) -> &[String] {
        &self.optimization_suggestions
    }

    /// Gets up to `count` functions with the most attributed gas, most
    /// expensive first. Functions with equal gas stay in the order they were
    /// found.
    #[must_use]
    pub fn top_functions(&self, count: usize) -> Vec<&FunctionRecord> {
        self.functions
            .iter()
            .sorted_by(|a, b| b.gas.cmp(&a.gas))
            .take(count)
            .collect()
    }

    /// Gets the total number of storage reads across all slots.
    #[must_use]
    pub fn total_storage_reads(&self) -> usize {
        self.storage_reads.values().sum()
    }

    /// Gets the total number of storage writes across all slots.
    #[must_use]
    pub fn total_storage_writes(&self) -> usize {
        self.storage_writes.values().sum()
    }
}

/// An opcode, by mnemonic, and the total gas it accounted for.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct OpcodeGas {
    pub opcode: String,
    pub gas:    u64,
}

/// A storage slot and a number of accesses to it.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct SlotCount {
    pub slot:  u64,
    pub count: usize,
}

/// The storage slots that are written or read more often than is usually
/// necessary.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct StorageHotspots {
    /// Slots written more than [`STORAGE_WRITE_HOTSPOT_THRESHOLD`] times, in
    /// ascending slot order.
    pub writes: Vec<SlotCount>,

    /// Slots read more than [`STORAGE_READ_HOTSPOT_THRESHOLD`] times, in
    /// ascending slot order.
    pub reads: Vec<SlotCount>,
}

impl StorageHotspots {
    /// Selects the hotspots from the per-slot `reads` and `writes`.
    #[must_use]
    pub fn new(reads: &BTreeMap<u64, usize>, writes: &BTreeMap<u64, usize>) -> Self {
        let above = |counts: &BTreeMap<u64, usize>, threshold: usize| {
            counts
                .iter()
                .filter(|(_, count)| **count > threshold)
                .map(|(slot, count)| SlotCount {
                    slot:  *slot,
                    count: *count,
                })
                .collect()
        };

        Self {
            writes: above(writes, STORAGE_WRITE_HOTSPOT_THRESHOLD),
            reads:  above(reads, STORAGE_READ_HOTSPOT_THRESHOLD),
        }
    }

    /// Checks whether there are no hotspots at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty() && self.reads.is_empty()
    }
}
