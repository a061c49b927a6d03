//! This module contains the flat, per-opcode gas cost table used to estimate
//! the cost of bytecode.
//!
//! The costs are the static base costs of each instruction. No attempt is
//! made to model dynamic costs such as memory expansion, cold and warm storage
//! access, refunds or value-transfer surcharges.

use crate::{
    constant::{PUSH_OPCODE_BASE_VALUE, SWAP_OPCODE_BASE_VALUE},
    opcode::Opcode,
};

/// The standard cost table, shared by every analysis that does not supply its
/// own.
pub static STANDARD_COST_TABLE: CostTable = CostTable::standard();

/// A mapping from each [`Opcode`] to a fixed, non-negative cost in gas.
///
/// Opcodes that have no entry in the table cost nothing. This is a silent
/// default rather than an error, as unknown bytes are common in the metadata
/// appended to deployed bytecode.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CostTable {
    costs: [Option<u64>; 256],
}

impl CostTable {
    /// Creates a table with no entries, in which every opcode costs nothing.
    #[must_use]
    pub const fn empty() -> Self {
        Self { costs: [None; 256] }
    }

    /// Creates the standard table of approximate base costs.
    #[must_use]
    pub const fn standard() -> Self {
        let mut table = Self::empty();

        table = table.with_cost(0x00, 0); // STOP
        table = table.with_cost(0x01, 3); // ADD
        table = table.with_cost(0x02, 5); // MUL
        table = table.with_cost(0x03, 3); // SUB
        table = table.with_cost(0x04, 5); // DIV
        table = table.with_cost(0x05, 5); // SDIV
        table = table.with_cost(0x06, 5); // MOD
        table = table.with_cost(0x07, 5); // SMOD
        table = table.with_cost(0x08, 8); // ADDMOD
        table = table.with_cost(0x09, 8); // MULMOD
        table = table.with_cost(0x0a, 10); // EXP
        table = table.with_cost(0x0b, 5); // SIGNEXTEND

        // Comparison and bitwise logic all share a cost.
        let mut byte = 0x10;
        while byte <= 0x1d {
            table = table.with_cost(byte, 3);
            byte += 1;
        }

        table = table.with_cost(0x20, 30); // KECCAK256
        table = table.with_cost(0x30, 2); // ADDRESS
        table = table.with_cost(0x31, 100); // BALANCE
        table = table.with_cost(0x32, 2); // ORIGIN
        table = table.with_cost(0x33, 2); // CALLER
        table = table.with_cost(0x34, 2); // CALLVALUE
        table = table.with_cost(0x35, 3); // CALLDATALOAD
        table = table.with_cost(0x36, 2); // CALLDATASIZE
        table = table.with_cost(0x37, 3); // CALLDATACOPY
        table = table.with_cost(0x38, 2); // CODESIZE
        table = table.with_cost(0x39, 3); // CODECOPY
        table = table.with_cost(0x3a, 2); // GASPRICE
        table = table.with_cost(0x3b, 100); // EXTCODESIZE
        table = table.with_cost(0x3c, 100); // EXTCODECOPY
        table = table.with_cost(0x3d, 2); // RETURNDATASIZE
        table = table.with_cost(0x3e, 3); // RETURNDATACOPY
        table = table.with_cost(0x40, 20); // BLOCKHASH
        table = table.with_cost(0x41, 2); // COINBASE
        table = table.with_cost(0x42, 2); // TIMESTAMP
        table = table.with_cost(0x43, 2); // NUMBER
        table = table.with_cost(0x44, 2); // DIFFICULTY
        table = table.with_cost(0x45, 2); // GASLIMIT
        table = table.with_cost(0x50, 2); // POP
        table = table.with_cost(0x51, 3); // MLOAD
        table = table.with_cost(0x52, 3); // MSTORE
        table = table.with_cost(0x53, 3); // MSTORE8
        table = table.with_cost(0x54, 100); // SLOAD
        table = table.with_cost(0x55, 20_000); // SSTORE
        table = table.with_cost(0x56, 8); // JUMP
        table = table.with_cost(0x57, 10); // JUMPI
        table = table.with_cost(0x58, 2); // PC
        table = table.with_cost(0x59, 2); // MSIZE
        table = table.with_cost(0x5a, 2); // GAS
        table = table.with_cost(0x5b, 1); // JUMPDEST

        let mut byte = PUSH_OPCODE_BASE_VALUE + 1;
        while byte <= SWAP_OPCODE_BASE_VALUE + 16 {
            // PUSH1..=PUSH32, DUP1..=DUP16 and SWAP1..=SWAP16 are contiguous.
            table = table.with_cost(byte, 3);
            byte += 1;
        }

        table = table.with_cost(0xa0, 375); // LOG0
        table = table.with_cost(0xa1, 750); // LOG1
        table = table.with_cost(0xa2, 1_125); // LOG2
        table = table.with_cost(0xa3, 1_500); // LOG3
        table = table.with_cost(0xa4, 1_875); // LOG4
        table = table.with_cost(0xf0, 32_000); // CREATE
        table = table.with_cost(0xf1, 700); // CALL
        table = table.with_cost(0xf2, 700); // CALLCODE
        table = table.with_cost(0xf3, 0); // RETURN
        table = table.with_cost(0xf4, 700); // DELEGATECALL
        table = table.with_cost(0xfa, 700); // STATICCALL
        table = table.with_cost(0xfd, 0); // REVERT
        table = table.with_cost(0xff, 5_000); // SELFDESTRUCT

        table
    }

    /// Sets the cost of the opcode with byte value `byte` to `cost`.
    #[must_use]
    pub const fn with_cost(mut self, byte: u8, cost: u64) -> Self {
        self.costs[byte as usize] = Some(cost);
        self
    }

    /// Gets the cost of `opcode`, which is zero if the table has no entry for
    /// it.
    #[must_use]
    pub const fn cost(&self, opcode: Opcode) -> u64 {
        match self.costs[opcode.as_byte() as usize] {
            Some(cost) => cost,
            None => 0,
        }
    }

    /// Checks whether the table has an explicit entry for `opcode`.
    #[must_use]
    pub const fn contains(&self, opcode: Opcode) -> bool {
        self.costs[opcode.as_byte() as usize].is_some()
    }
}

impl Default for CostTable {
    fn default() -> Self {
        STANDARD_COST_TABLE.clone()
    }
}
