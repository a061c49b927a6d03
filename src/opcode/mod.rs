//! This module contains the [`Opcode`] type, a lightweight view of a single
//! byte of EVM bytecode, along with the tables needed to name and classify
//! it.
//!
//! Unlike a full disassembler, the analysis in this library only needs to
//! distinguish a handful of opcode families (`PUSH`, `DUP`, `SWAP`, storage
//! access and jumps). Every other byte is treated generically, so the opcode
//! is represented as a transparent wrapper around its byte rather than as a
//! type per instruction.

pub mod macros;

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{
    constant::{
        DUP_OPCODE_BASE_VALUE,
        LOG_OPCODE_BASE_VALUE,
        PUSH_OPCODE_BASE_VALUE,
        PUSH_OPCODE_MAX_BYTES,
        STACK_ACCESS_MAX_DEPTH,
        SWAP_OPCODE_BASE_VALUE,
    },
    error::OpcodeError,
};

/// A single EVM opcode, identified by its byte value.
///
/// Any byte is a valid `Opcode`. Bytes that are not assigned to an instruction
/// have no mnemonic and are displayed as `UNKNOWN(0x..)`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Opcode(u8);

impl Opcode {
    pub const ADD: Self = Self(0x01);
    pub const CALL: Self = Self(0xf1);
    pub const CREATE: Self = Self(0xf0);
    pub const DUP1: Self = Self(0x80);
    pub const DUP16: Self = Self(0x8f);
    pub const INVALID: Self = Self(0xfe);
    pub const JUMP: Self = Self(0x56);
    pub const JUMPDEST: Self = Self(0x5b);
    pub const JUMPI: Self = Self(0x57);
    pub const MSTORE: Self = Self(0x52);
    pub const POP: Self = Self(0x50);
    pub const PUSH0: Self = Self(0x5f);
    pub const PUSH1: Self = Self(0x60);
    pub const PUSH2: Self = Self(0x61);
    pub const PUSH4: Self = Self(0x63);
    pub const PUSH32: Self = Self(0x7f);
    pub const RETURN: Self = Self(0xf3);
    pub const SLOAD: Self = Self(0x54);
    pub const SSTORE: Self = Self(0x55);
    pub const STOP: Self = Self(0x00);
    pub const SWAP1: Self = Self(0x90);
    pub const SWAP16: Self = Self(0x9f);

    /// Wraps the provided `byte` as an opcode.
    #[must_use]
    pub const fn new(byte: u8) -> Self {
        Self(byte)
    }

    /// Gets the byte representation of the opcode.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self.0
    }

    /// Gets the mnemonic for the opcode, or [`None`] if the byte is not
    /// assigned to an instruction.
    #[must_use]
    pub const fn mnemonic(self) -> Option<&'static str> {
        mnemonic(self.0)
    }

    /// Checks whether the opcode is one of `PUSH1..=PUSH32`.
    ///
    /// `PUSH0` is not included, as it carries no immediate data.
    #[must_use]
    pub const fn is_push(self) -> bool {
        self.0 >= Self::PUSH1.0 && self.0 <= Self::PUSH32.0
    }

    /// Gets the number of immediate bytes that follow the opcode in the
    /// bytecode, which is `N` for `PUSHN` and zero for everything else.
    #[must_use]
    pub const fn push_size(self) -> usize {
        if self.is_push() {
            (self.0 - PUSH_OPCODE_BASE_VALUE) as usize
        } else {
            0
        }
    }

    /// Gets `N` if the opcode is `DUPN`.
    #[must_use]
    pub const fn dup_depth(self) -> Option<usize> {
        if self.0 >= Self::DUP1.0 && self.0 <= Self::DUP16.0 {
            Some((self.0 - DUP_OPCODE_BASE_VALUE) as usize)
        } else {
            None
        }
    }

    /// Gets `N` if the opcode is `SWAPN`.
    #[must_use]
    pub const fn swap_depth(self) -> Option<usize> {
        if self.0 >= Self::SWAP1.0 && self.0 <= Self::SWAP16.0 {
            Some((self.0 - SWAP_OPCODE_BASE_VALUE) as usize)
        } else {
            None
        }
    }

    /// Checks whether the opcode is `JUMP` or `JUMPI`.
    #[must_use]
    pub const fn is_jump(self) -> bool {
        self.0 == Self::JUMP.0 || self.0 == Self::JUMPI.0
    }
}

impl From<u8> for Opcode {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl From<Opcode> for u8 {
    fn from(value: Opcode) -> Self {
        value.0
    }
}

impl Display for Opcode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.mnemonic() {
            Some(name) => f.pad(name),
            None => f.pad(&format!("UNKNOWN(0x{:02x})", self.0)),
        }
    }
}

/// A trait for things that can be written out as raw bytecode.
///
/// It exists so that test fixtures can be written as sequences of opcodes
/// using the [`crate::bytecode`] macro.
pub trait Encode {
    /// Gets the bytecode representation of `self`.
    fn encode(&self) -> Vec<u8>;
}

impl Encode for Opcode {
    fn encode(&self) -> Vec<u8> {
        vec![self.0]
    }
}

/// A `PUSHN` opcode together with the `N` bytes of immediate data that follow
/// it in the bytecode.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PushN {
    byte_count: u8,
    bytes:      Vec<u8>,
}

impl PushN {
    /// Constructs a new instance of the `PUSHN` opcode for some `n`.
    ///
    /// The `bytes` are in big-endian order, exactly as they appear in the
    /// bytecode.
    ///
    /// # Errors
    ///
    /// If `n` is not in `1..=32`, or if `bytes` does not contain exactly `n`
    /// bytes.
    pub fn new(n: u8, bytes: impl Into<Vec<u8>>) -> Result<Self, OpcodeError> {
        let bytes = bytes.into();
        if n == 0 || n > PUSH_OPCODE_MAX_BYTES {
            return Err(OpcodeError::InvalidPushSize(n));
        }
        if bytes.len() != n as usize {
            return Err(OpcodeError::PushDataMismatch {
                size:     n,
                provided: bytes.len(),
            });
        }

        Ok(Self {
            byte_count: n,
            bytes,
        })
    }

    /// Gets the opcode that this push is encoded with.
    #[must_use]
    pub fn opcode(&self) -> Opcode {
        Opcode(PUSH_OPCODE_BASE_VALUE + self.byte_count)
    }
}

impl Encode for PushN {
    fn encode(&self) -> Vec<u8> {
        let mut data = vec![self.opcode().as_byte()];
        data.extend_from_slice(&self.bytes);
        data
    }
}

/// Names of the `PUSH1..=PUSH32` opcodes.
const PUSH_MNEMONICS: [&str; PUSH_OPCODE_MAX_BYTES as usize] = [
    "PUSH1", "PUSH2", "PUSH3", "PUSH4", "PUSH5", "PUSH6", "PUSH7", "PUSH8", "PUSH9", "PUSH10",
    "PUSH11", "PUSH12", "PUSH13", "PUSH14", "PUSH15", "PUSH16", "PUSH17", "PUSH18", "PUSH19",
    "PUSH20", "PUSH21", "PUSH22", "PUSH23", "PUSH24", "PUSH25", "PUSH26", "PUSH27", "PUSH28",
    "PUSH29", "PUSH30", "PUSH31", "PUSH32",
];

/// Names of the `DUP1..=DUP16` opcodes.
const DUP_MNEMONICS: [&str; STACK_ACCESS_MAX_DEPTH as usize] = [
    "DUP1", "DUP2", "DUP3", "DUP4", "DUP5", "DUP6", "DUP7", "DUP8", "DUP9", "DUP10", "DUP11",
    "DUP12", "DUP13", "DUP14", "DUP15", "DUP16",
];

/// Names of the `SWAP1..=SWAP16` opcodes.
const SWAP_MNEMONICS: [&str; STACK_ACCESS_MAX_DEPTH as usize] = [
    "SWAP1", "SWAP2", "SWAP3", "SWAP4", "SWAP5", "SWAP6", "SWAP7", "SWAP8", "SWAP9", "SWAP10",
    "SWAP11", "SWAP12", "SWAP13", "SWAP14", "SWAP15", "SWAP16",
];

/// Names of the `LOG0..=LOG4` opcodes.
const LOG_MNEMONICS: [&str; 5] = ["LOG0", "LOG1", "LOG2", "LOG3", "LOG4"];

/// Gets the mnemonic for the provided opcode `byte`.
///
/// The names follow the instruction table that the gas costs in
/// [`crate::cost`] were taken from, so `0x20` is `KECCAK256` and `0x44` is
/// `DIFFICULTY`.
const fn mnemonic(byte: u8) -> Option<&'static str> {
    let name = match byte {
        0x00 => "STOP",
        0x01 => "ADD",
        0x02 => "MUL",
        0x03 => "SUB",
        0x04 => "DIV",
        0x05 => "SDIV",
        0x06 => "MOD",
        0x07 => "SMOD",
        0x08 => "ADDMOD",
        0x09 => "MULMOD",
        0x0a => "EXP",
        0x0b => "SIGNEXTEND",
        0x10 => "LT",
        0x11 => "GT",
        0x12 => "SLT",
        0x13 => "SGT",
        0x14 => "EQ",
        0x15 => "ISZERO",
        0x16 => "AND",
        0x17 => "OR",
        0x18 => "XOR",
        0x19 => "NOT",
        0x1a => "BYTE",
        0x1b => "SHL",
        0x1c => "SHR",
        0x1d => "SAR",
        0x20 => "KECCAK256",
        0x30 => "ADDRESS",
        0x31 => "BALANCE",
        0x32 => "ORIGIN",
        0x33 => "CALLER",
        0x34 => "CALLVALUE",
        0x35 => "CALLDATALOAD",
        0x36 => "CALLDATASIZE",
        0x37 => "CALLDATACOPY",
        0x38 => "CODESIZE",
        0x39 => "CODECOPY",
        0x3a => "GASPRICE",
        0x3b => "EXTCODESIZE",
        0x3c => "EXTCODECOPY",
        0x3d => "RETURNDATASIZE",
        0x3e => "RETURNDATACOPY",
        0x3f => "EXTCODEHASH",
        0x40 => "BLOCKHASH",
        0x41 => "COINBASE",
        0x42 => "TIMESTAMP",
        0x43 => "NUMBER",
        0x44 => "DIFFICULTY",
        0x45 => "GASLIMIT",
        0x46 => "CHAINID",
        0x47 => "SELFBALANCE",
        0x48 => "BASEFEE",
        0x49 => "BLOBHASH",
        0x4a => "BLOBBASEFEE",
        0x50 => "POP",
        0x51 => "MLOAD",
        0x52 => "MSTORE",
        0x53 => "MSTORE8",
        0x54 => "SLOAD",
        0x55 => "SSTORE",
        0x56 => "JUMP",
        0x57 => "JUMPI",
        0x58 => "PC",
        0x59 => "MSIZE",
        0x5a => "GAS",
        0x5b => "JUMPDEST",
        0x5c => "TLOAD",
        0x5d => "TSTORE",
        0x5e => "MCOPY",
        0x5f => "PUSH0",
        0x60..=0x7f => PUSH_MNEMONICS[(byte - 0x60) as usize],
        0x80..=0x8f => DUP_MNEMONICS[(byte - 0x80) as usize],
        0x90..=0x9f => SWAP_MNEMONICS[(byte - 0x90) as usize],
        0xa0..=0xa4 => LOG_MNEMONICS[(byte - LOG_OPCODE_BASE_VALUE) as usize],
        0xf0 => "CREATE",
        0xf1 => "CALL",
        0xf2 => "CALLCODE",
        0xf3 => "RETURN",
        0xf4 => "DELEGATECALL",
        0xf5 => "CREATE2",
        0xfa => "STATICCALL",
        0xfd => "REVERT",
        0xfe => "INVALID",
        0xff => "SELFDESTRUCT",
        _ => return None,
    };

    Some(name)
}

#[cfg(test)]
mod test {
    use crate::{
        constant::{DUP_OPCODE_BASE_VALUE, PUSH_OPCODE_BASE_VALUE, SWAP_OPCODE_BASE_VALUE},
        error::OpcodeError,
        opcode::{Encode, Opcode, PushN},
    };

    #[test]
    fn every_push_opcode_has_its_size() {
        for n in 1..=32u8 {
            let op = Opcode::new(PUSH_OPCODE_BASE_VALUE + n);
            assert!(op.is_push());
            assert_eq!(op.push_size(), n as usize);
            assert_eq!(op.to_string(), format!("PUSH{n}"));
        }
    }

    #[test]
    fn push_zero_carries_no_data() {
        assert!(!Opcode::PUSH0.is_push());
        assert_eq!(Opcode::PUSH0.push_size(), 0);
        assert_eq!(Opcode::PUSH0.to_string(), "PUSH0");
    }

    #[test]
    fn dup_and_swap_depths_are_decoded() {
        for n in 1..=16u8 {
            let dup = Opcode::new(DUP_OPCODE_BASE_VALUE + n);
            let swap = Opcode::new(SWAP_OPCODE_BASE_VALUE + n);
            assert_eq!(dup.dup_depth(), Some(n as usize));
            assert_eq!(swap.swap_depth(), Some(n as usize));
            assert_eq!(dup.to_string(), format!("DUP{n}"));
            assert_eq!(swap.to_string(), format!("SWAP{n}"));
        }

        assert_eq!(Opcode::ADD.dup_depth(), None);
        assert_eq!(Opcode::ADD.swap_depth(), None);
    }

    #[test]
    fn unassigned_bytes_are_unknown() {
        let op = Opcode::new(0x0c);
        assert_eq!(op.mnemonic(), None);
        assert_eq!(op.to_string(), "UNKNOWN(0x0c)");

        // The designated invalid opcode is still a named instruction.
        assert_eq!(Opcode::INVALID.to_string(), "INVALID");
    }

    #[test]
    fn jumps_are_recognised() {
        assert!(Opcode::JUMP.is_jump());
        assert!(Opcode::JUMPI.is_jump());
        assert!(!Opcode::JUMPDEST.is_jump());
    }

    #[test]
    fn can_encode_push() -> anyhow::Result<()> {
        let push = PushN::new(2, vec![0xbe, 0xef])?;
        assert_eq!(push.encode(), vec![0x61, 0xbe, 0xef]);
        assert_eq!(push.opcode(), Opcode::PUSH2);

        Ok(())
    }

    #[test]
    fn rejects_invalid_push_sizes() {
        assert_eq!(
            PushN::new(0, vec![]).expect_err("PUSH0 accepted as PUSHN"),
            OpcodeError::InvalidPushSize(0)
        );
        assert_eq!(
            PushN::new(33, vec![0; 33]).expect_err("PUSH33 accepted"),
            OpcodeError::InvalidPushSize(33)
        );
        assert_eq!(
            PushN::new(2, vec![0x01]).expect_err("Short push data accepted"),
            OpcodeError::PushDataMismatch {
                size:     2,
                provided: 1,
            }
        );
    }
}
