//! This module contains the implementation of the [`Instruction`], a type
//! that represents a single decoded opcode in a bytecode stream, and the
//! [`Disassembler`] that produces them.
//!
//! # Byte-Instruction Correspondence
//!
//! Where most opcodes occupy a single byte, the `PUSHN` opcodes are followed
//! in the bytecode by the `N` bytes of data that they push onto the stack.
//! Those bytes are carried by the instruction as its
//! [`immediate`](Instruction::immediate) data and are never decoded as
//! opcodes in their own right.

mod disassembler;

pub use disassembler::{disassemble, Disassembler};

use crate::opcode::Opcode;

/// A single decoded opcode and the immediate data that follows it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Instruction<'a> {
    /// The byte offset of the opcode in the bytecode.
    pub pc: usize,

    /// The decoded opcode.
    pub opcode: Opcode,

    /// The immediate data of a `PUSHN` opcode, in big-endian order. Empty for
    /// every other opcode.
    pub immediate: &'a [u8],

    /// Whether the opcode is a `PUSHN` with fewer than `N` bytes of data left
    /// in the bytecode. A truncated instruction is always the last one
    /// yielded.
    pub truncated: bool,
}

impl Instruction<'_> {
    /// Interprets the immediate data as a big-endian unsigned integer.
    ///
    /// Only the low 64 bits are kept, so for pushes wider than eight bytes the
    /// upper bytes are discarded.
    #[must_use]
    pub fn immediate_value(&self) -> u64 {
        word_from_be_bytes(self.immediate)
    }

    /// Gets the byte offset at which the next instruction starts.
    #[must_use]
    pub fn next_pc(&self) -> usize {
        self.pc + 1 + self.immediate.len()
    }
}

/// Reads `bytes` as a big-endian unsigned integer, keeping only the low 64
/// bits.
#[must_use]
pub fn word_from_be_bytes(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(0u64, |value, byte| (value << 8) | u64::from(*byte))
}
