//! This module contains the heuristic optimization suggestions derived from
//! the finished trackers.

use crate::{
    constant::{
        CONSECUTIVE_STORE_THRESHOLD,
        LOAD_GAS_SUGGESTION_THRESHOLD,
        LOOP_OCCURRENCE_THRESHOLD,
        STORAGE_READ_CACHE_THRESHOLD,
        STORE_GAS_SUGGESTION_THRESHOLD,
    },
    opcode::Opcode,
    tracker::{LoopTracker, OpcodeTally, StorageTracker},
};

/// The suggestion made whenever any loop is found.
pub const LOOP_GAS_LIMIT_SUGGESTION: &str =
    "Consider gas limits for loops to prevent out-of-gas errors";

/// The suggestion made when `SSTORE` accounts for a lot of gas.
pub const HIGH_STORE_SUGGESTION: &str = "High SSTORE usage detected - consider struct packing";

/// The suggestion made when `SLOAD` accounts for a lot of gas.
pub const HIGH_LOAD_SUGGESTION: &str =
    "High SLOAD usage detected - cache frequently accessed storage";

/// Generates the optimization suggestions for a finished walk.
///
/// Suggestions are produced in a fixed order: slot caching (in ascending slot
/// order), store packing, loops, and finally the totals for `SSTORE` and
/// `SLOAD`.
#[must_use]
pub fn suggest(tally: &OpcodeTally, storage: &StorageTracker, loops: &LoopTracker) -> Vec<String> {
    let mut suggestions = Vec::new();

    suggestions.extend(
        storage
            .reads()
            .iter()
            .filter(|(_, count)| **count > STORAGE_READ_CACHE_THRESHOLD)
            .map(|(slot, count)| format!("Cache storage slot {slot} in memory (read {count} times)")),
    );

    let run = storage.longest_store_run();
    if run > CONSECUTIVE_STORE_THRESHOLD {
        suggestions.push(format!(
            "Detected {run} consecutive SSTORE instructions - consider packing variables"
        ));
    }

    if !loops.is_empty() {
        suggestions.push(LOOP_GAS_LIMIT_SUGGESTION.to_string());
        suggestions.extend(
            loops
                .loops()
                .iter()
                .filter(|l| l.count > LOOP_OCCURRENCE_THRESHOLD)
                .map(|l| {
                    format!(
                        "Loop at PC {}-{} executed {} times - consider optimization",
                        l.target_pc, l.jump_pc, l.count
                    )
                }),
        );
    }

    if tally.gas(Opcode::SSTORE) > STORE_GAS_SUGGESTION_THRESHOLD {
        suggestions.push(HIGH_STORE_SUGGESTION.to_string());
    }

    if tally.gas(Opcode::SLOAD) > LOAD_GAS_SUGGESTION_THRESHOLD {
        suggestions.push(HIGH_LOAD_SUGGESTION.to_string());
    }

    suggestions
}
