//! This module contains the walker, which makes the single forward pass over
//! the disassembled bytecode that gathers all of the evidence for the
//! analysis.
//!
//! # Abstract Interpretation
//!
//! The walker is not a virtual machine. It never follows jumps and never
//! evaluates arithmetic, instead visiting each instruction exactly once in
//! the order it appears in the bytecode. It simulates only as much of the
//! stack as is needed to recover constant storage slots, using the
//! [`AbstractStack`].
//!
//! # Heuristics
//!
//! Two of the facts gathered by the walker are heuristic, and should be
//! treated as such:
//!
//! - Every `PUSH4` is registered as the entry point of a function, with the
//!   pushed value as its selector.
//! - A `JUMP` or `JUMPI` is recorded as a loop when the bytes directly before
//!   it can be read as the immediate of a `PUSHN` whose value is a smaller
//!   offset. This looks only at bytecode positions and never at the stack, so
//!   it will both miss loops and invent them.

pub mod stack;

pub use stack::AbstractStack;

use crate::{
    analyzer::Config,
    constant::SELECTOR_SIZE_BYTES,
    disassembly::{disassemble, word_from_be_bytes, Instruction},
    opcode::Opcode,
    tracker::{
        function::format_selector,
        FunctionTracker,
        LoopTracker,
        OpcodeTally,
        StorageTracker,
    },
};

/// Walks the provided `bytes` once from start to finish, using `config` to
/// decide how gas is costed and attributed.
///
/// This never fails. Malformed bytecode, including a truncated trailing
/// `PUSHN`, simply ends the walk.
#[must_use]
pub fn walk(bytes: &[u8], config: &Config) -> WalkResult {
    Walker::new(bytes, config).run()
}

/// The state of a single walk over some bytecode.
///
/// A walker is consumed by [`Walker::run`], so its trackers can never be
/// shared between analyses.
#[derive(Debug)]
pub struct Walker<'a> {
    bytes:  &'a [u8],
    config: &'a Config,
    stack:  AbstractStack,
    result: WalkResult,
}

impl<'a> Walker<'a> {
    /// Creates a new walker over `bytes` that has not yet visited any
    /// instructions.
    #[must_use]
    pub fn new(bytes: &'a [u8], config: &'a Config) -> Self {
        let stack = AbstractStack::new();
        let result = WalkResult {
            total_gas:            0,
            bytes_analysed:       bytes.len(),
            instructions_decoded: 0,
            tally:                OpcodeTally::new(),
            storage:              StorageTracker::new(),
            loops:                LoopTracker::new(),
            functions:            FunctionTracker::new(config.function_gas_attribution),
        };
        Self {
            bytes,
            config,
            stack,
            result,
        }
    }

    /// Visits every instruction in the bytecode, returning the gathered
    /// results.
    #[must_use]
    pub fn run(mut self) -> WalkResult {
        for instruction in disassemble(self.bytes) {
            self.step(&instruction);
        }

        tracing::debug!(
            bytes = self.result.bytes_analysed,
            instructions = self.result.instructions_decoded,
            total_gas = self.result.total_gas,
            functions = self.result.functions.functions().len(),
            loops = self.result.loops.loops().len(),
            "Finished walking bytecode"
        );

        self.result
    }

    /// Processes a single instruction.
    fn step(&mut self, instruction: &Instruction) {
        let Instruction {
            pc,
            opcode,
            immediate,
            truncated,
        } = *instruction;

        if opcode == Opcode::PUSH4 && pc + 1 + SELECTOR_SIZE_BYTES <= self.bytes.len() {
            let selector = format_selector(immediate);
            tracing::trace!(pc, %selector, "Registering candidate function");
            self.result.functions.add_function(selector, pc);
        }

        self.apply_stack_effect(instruction);

        let gas = self.config.cost_table.cost(opcode);
        self.result.instructions_decoded += 1;
        self.result.total_gas += gas;
        self.result.tally.record(opcode, gas);
        self.result.functions.add_gas(pc, gas);
        self.result.storage.observe_store_run(opcode == Opcode::SSTORE);

        if opcode.is_jump() {
            if let Some(target) = backward_jump_target(self.bytes, pc) {
                tracing::trace!(pc, target, "Recording backward jump");
                self.result.loops.record(target, pc);
            }
        }

        tracing::trace!(pc, opcode = %opcode, gas, "Walked instruction");

        if truncated {
            tracing::debug!(
                pc,
                opcode = %opcode,
                available = immediate.len(),
                "Bytecode ends inside push data"
            );
        }
    }

    /// Applies the effect of `instruction` to the abstract stack and records
    /// any storage accesses that it makes.
    fn apply_stack_effect(&mut self, instruction: &Instruction) {
        let opcode = instruction.opcode;

        if opcode.is_push() {
            if !instruction.truncated {
                self.stack.push(instruction.immediate_value());
            }
        } else if opcode == Opcode::POP {
            self.stack.pop();
        } else if let Some(n) = opcode.dup_depth() {
            self.stack.dup(n);
        } else if let Some(n) = opcode.swap_depth() {
            self.stack.swap(n);
        } else if opcode == Opcode::SLOAD {
            let slot = self.stack.pop();
            self.result.storage.record_read(slot);
            self.stack.push(0);
        } else if opcode == Opcode::SSTORE {
            let slot = self.stack.pop();
            let _value = self.stack.pop();
            self.result.storage.record_write(slot);
        }
    }
}

/// Gets the target of the jump at `jump_pc` if it looks like a backward jump.
///
/// The byte before the jump is read as the opcode of a `PUSHN`, and the `N`
/// bytes directly before the jump as its immediate. The stack is never
/// consulted.
#[must_use]
pub fn backward_jump_target(bytes: &[u8], jump_pc: usize) -> Option<usize> {
    let previous = Opcode::new(*bytes.get(jump_pc.checked_sub(1)?)?);
    if !previous.is_push() {
        return None;
    }

    let start = jump_pc.checked_sub(previous.push_size())?;
    let target = word_from_be_bytes(&bytes[start..jump_pc]);

    usize::try_from(target).ok().filter(|&target| target < jump_pc)
}

/// Everything gathered by a single walk over some bytecode.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct WalkResult {
    /// The sum of the cost of every decoded opcode.
    pub total_gas: u64,

    /// The length of the bytecode that was walked.
    pub bytes_analysed: usize,

    /// The number of opcodes decoded, which excludes push data.
    pub instructions_decoded: usize,

    /// The count and gas of each opcode.
    pub tally: OpcodeTally,

    /// The storage accesses that were seen.
    pub storage: StorageTracker,

    /// The backward jumps that were seen.
    pub loops: LoopTracker,

    /// The candidate functions and the gas attributed to them.
    pub functions: FunctionTracker,
}

#[cfg(test)]
mod test {
    use crate::{
        analyzer::Config,
        opcode::Opcode,
        tracker::FunctionGasAttribution,
        walker::{backward_jump_target, walk},
    };

    #[test]
    fn sums_gas_over_decoded_opcodes() {
        let result = walk(&[0x60, 0x01, 0x60, 0x02, 0x01], &Config::default());

        assert_eq!(result.total_gas, 9);
        assert_eq!(result.instructions_decoded, 3);
        assert_eq!(result.bytes_analysed, 5);
        assert_eq!(result.tally.count(Opcode::PUSH1), 2);
        assert_eq!(result.tally.count(Opcode::ADD), 1);
    }

    #[test]
    fn empty_bytecode_produces_empty_result() {
        let result = walk(&[], &Config::default());
        assert_eq!(result.total_gas, 0);
        assert_eq!(result.instructions_decoded, 0);
        assert!(result.tally.opcodes().is_empty());
    }

    #[test]
    fn pop_on_empty_stack_is_fine() {
        let result = walk(&[0x50], &Config::default());
        assert_eq!(result.total_gas, 2);
        assert_eq!(result.instructions_decoded, 1);
    }

    #[test]
    fn resolves_constant_storage_slots() {
        // PUSH1 0x2a, PUSH1 0x07, SSTORE, PUSH1 0x07, SLOAD, PUSH1 0x07, SLOAD
        let bytes = [0x60, 0x2a, 0x60, 0x07, 0x55, 0x60, 0x07, 0x54, 0x60, 0x07, 0x54];
        let result = walk(&bytes, &Config::default());

        assert_eq!(result.storage.writes().get(&7), Some(&1));
        assert_eq!(result.storage.reads().get(&7), Some(&2));
        assert_eq!(result.storage.writes().get(&0x2a), None);
    }

    #[test]
    fn unknown_slots_fall_back_to_the_sentinel() {
        // CALLDATALOAD leaves the stack untouched, so SLOAD pops from empty.
        let result = walk(&[0x35, 0x54], &Config::default());
        assert_eq!(result.storage.reads().get(&0), Some(&1));
    }

    #[test]
    fn dup_and_swap_move_slots_around() {
        // PUSH1 0x01, PUSH1 0x02, SWAP1, SLOAD, DUP1, SLOAD
        let bytes = [0x60, 0x01, 0x60, 0x02, 0x90, 0x54, 0x80, 0x54];
        let result = walk(&bytes, &Config::default());

        // SWAP1 brings slot 1 to the top, SLOAD replaces it with 0, and DUP1
        // copies that 0.
        assert_eq!(result.storage.reads().get(&1), Some(&1));
        assert_eq!(result.storage.reads().get(&0), Some(&1));
    }

    #[test]
    fn tracks_consecutive_stores() {
        // Three SSTOREs in a row, then STOP, then one more.
        let bytes = [0x55, 0x55, 0x55, 0x00, 0x55];
        let result = walk(&bytes, &Config::default());
        assert_eq!(result.storage.longest_store_run(), 3);
    }

    #[test]
    fn registers_every_complete_push4() {
        // PUSH4 0xa9059cbb, PUSH4 0x70a08231
        let bytes = [0x63, 0xa9, 0x05, 0x9c, 0xbb, 0x63, 0x70, 0xa0, 0x82, 0x31];
        let result = walk(&bytes, &Config::default());

        let functions = result.functions.functions();
        assert_eq!(functions.len(), 2);
        assert_eq!(functions[0].selector, "0xa9059cbb");
        assert_eq!(functions[0].entry_pc, 0);
        assert_eq!(functions[1].selector, "0x70a08231");
        assert_eq!(functions[1].entry_pc, 5);
    }

    #[test]
    fn truncated_push4_is_charged_but_not_registered() {
        let bytes = [0x00, 0x63, 0xaa, 0xbb];
        let result = walk(&bytes, &Config::default());

        assert!(result.functions.functions().is_empty());
        assert_eq!(result.instructions_decoded, 2);
        assert_eq!(result.total_gas, 3);
    }

    #[test]
    fn cumulative_attribution_double_counts() {
        // PUSH4 sel, PUSH4 sel, SSTORE
        let bytes = [0x63, 0, 0, 0, 1, 0x63, 0, 0, 0, 2, 0x55];
        let result = walk(&bytes, &Config::default());

        let gas: Vec<u64> = result.functions.functions().iter().map(|f| f.gas).collect();
        assert_eq!(gas, vec![20_006, 20_003]);
    }

    #[test]
    fn range_scoped_attribution_partitions() {
        let bytes = [0x63, 0, 0, 0, 1, 0x63, 0, 0, 0, 2, 0x55];
        let config =
            Config::default().with_function_gas_attribution(FunctionGasAttribution::RangeScoped);
        let result = walk(&bytes, &config);

        let gas: Vec<u64> = result.functions.functions().iter().map(|f| f.gas).collect();
        assert_eq!(gas, vec![3, 20_003]);
    }

    #[test]
    fn jump_after_small_push_is_not_a_loop() {
        // PUSH1 0x00, JUMPDEST, PUSH1 0x02, JUMP
        let bytes = [0x60, 0x00, 0x5b, 0x60, 0x02, 0x56];
        let result = walk(&bytes, &Config::default());

        assert!(result.loops.is_empty());
        assert_eq!(result.total_gas, 3 + 1 + 3 + 8);
    }

    #[test]
    fn jump_after_push_range_byte_is_a_loop() {
        // PUSH1 0x60 then JUMP at 0x61. The immediate byte 0x60 is itself read
        // as a `PUSH1` opcode whose one byte of data is the target 0x60.
        let mut bytes = vec![0x5b; 0x5f];
        bytes.extend_from_slice(&[0x60, 0x60, 0x56]);
        let result = walk(&bytes, &Config::default());

        let loops = result.loops.loops();
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].target_pc, 0x60);
        assert_eq!(loops[0].jump_pc, 0x61);
        assert_eq!(loops[0].count, 1);
    }

    #[test]
    fn backward_jump_target_respects_bounds() {
        assert_eq!(backward_jump_target(&[0x56], 0), None);
        // PUSH2 opcode before the jump, but only one byte precedes it.
        assert_eq!(backward_jump_target(&[0x61, 0x56], 1), None);
        // Target would be at or after the jump.
        assert_eq!(backward_jump_target(&[0x00, 0x7f, 0x56], 2), None);
        assert_eq!(backward_jump_target(&[0x00, 0x60, 0x56], 2), None);
    }
}
