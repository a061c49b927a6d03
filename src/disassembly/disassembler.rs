//! This module contains the iterator that turns a stream of bytes into a
//! sequence of [`Instruction`]s.

use std::iter::FusedIterator;

use crate::{disassembly::Instruction, opcode::Opcode};

/// Disassembles the input `bytes` lazily, yielding one [`Instruction`] per
/// decoded opcode.
///
/// Disassembly never fails. Any byte is accepted as an opcode, and a `PUSH`
/// whose immediate data runs past the end of `bytes` is yielded as a
/// [truncated](Instruction::truncated) instruction that ends the stream.
#[must_use]
pub fn disassemble(bytes: &[u8]) -> Disassembler<'_> {
    Disassembler {
        bytes,
        pc: 0,
        finished: false,
    }
}

/// An iterator over the instructions in a bytecode buffer.
///
/// # Progress
///
/// Each call to [`Iterator::next`] advances the program counter by at least
/// one byte, so the iterator yields at most `bytes.len()` instructions for any
/// input.
#[derive(Clone, Debug)]
pub struct Disassembler<'a> {
    /// The bytecode being disassembled.
    bytes: &'a [u8],

    /// The offset of the next opcode in `bytes`.
    pc: usize,

    /// Set once a truncated `PUSH` has been yielded.
    finished: bool,
}

impl<'a> Disassembler<'a> {
    /// Gets the offset of the next opcode to be decoded.
    #[must_use]
    pub fn pc(&self) -> usize {
        self.pc
    }
}

impl<'a> Iterator for Disassembler<'a> {
    type Item = Instruction<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let pc = self.pc;
        let opcode = Opcode::new(*self.bytes.get(pc)?);
        let data_start = pc + 1;
        let data_end = data_start + opcode.push_size();

        if data_end > self.bytes.len() {
            // The push runs off the end of the bytecode, so there is nothing
            // left to decode after it.
            self.finished = true;
            self.pc = self.bytes.len();
            let immediate = &self.bytes[data_start.min(self.bytes.len())..];
            return Some(Instruction {
                pc,
                opcode,
                immediate,
                truncated: true,
            });
        }

        self.pc = data_end;
        Some(Instruction {
            pc,
            opcode,
            immediate: &self.bytes[data_start..data_end],
            truncated: false,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            (0, Some(0))
        } else {
            let remaining = self.bytes.len().saturating_sub(self.pc);
            (usize::from(remaining > 0), Some(remaining))
        }
    }
}

impl FusedIterator for Disassembler<'_> {}
