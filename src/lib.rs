//! This library implements a static analysis of [EVM](https://ethereum.org/en/developers/docs/evm/)
//! bytecode that estimates its gas cost and points out likely inefficiencies.
//! It is a _best effort_ analysis: the bytecode is never executed, and every
//! figure it produces is an estimate.
//!
//! Note that this library is not intended to be nor expected to evolve into a
//! gas profiler. It uses a flat cost per opcode, and so does not model memory
//! expansion, cold and warm accesses, refunds or any other dynamic costs.
//!
//! # How it Works
//!
//! From a very high level, the analysis is performed as follows:
//!
//! 1. Bytecode is ingested by the [`disassembly::Disassembler`], which turns it
//!    into a sequence of [`disassembly::Instruction`]s without ever decoding
//!    push data as opcodes.
//! 2. The [`walker::Walker`] visits each instruction exactly once, in order.
//!    It costs each opcode using a [`cost::CostTable`], simulates just enough
//!    of the stack to resolve constant storage slots, and feeds the
//!    [`tracker`]s that count storage accesses, candidate functions and
//!    backward jumps.
//! 3. The finished trackers are aggregated into an [`AnalysisReport`], along
//!    with a ranking of the most expensive opcodes and a set of optimization
//!    suggestions.
//! 4. The report can be written out by any of the [`render`]ers.
//!
//! # Basic Usage
//!
//! For the most basic usage of the library, it is sufficient to call
//! [`analyze`] with the bytecode of your contract.
//!
//! ```
//! use gaslens::{
//!     bytecode,
//!     opcode::{Opcode, PushN},
//! };
//!
//! let bytes = bytecode![
//!     PushN::new(4, vec![0xa9, 0x05, 0x9c, 0xbb]).unwrap(), // A function selector
//!     PushN::new(1, vec![0x2a]).unwrap(),                   // The value to store
//!     PushN::new(1, vec![0x00]).unwrap(),                   // The slot to store it in
//!     Opcode::SSTORE,                                       // Storage
//!     Opcode::STOP                                          // Stop execution
//! ];
//!
//! let report = gaslens::analyze(bytes);
//!
//! assert_eq!(report.total_gas(), 20_009);
//! assert_eq!(report.storage_writes().get(&0), Some(&1));
//! assert_eq!(report.functions()[0].selector, "0xa9059cbb");
//! ```
//!
//! For more control, construct an [`analyzer::Analyzer`] with [`new`] and an
//! [`analyzer::Config`].

#![warn(clippy::all, clippy::cargo, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // Allows for better API naming

pub mod analyzer;
pub mod constant;
pub mod contract;
pub mod cost;
pub mod disassembly;
pub mod error;
pub mod opcode;
pub mod render;
pub mod report;
pub mod source;
pub mod tracker;
pub mod walker;

// Re-exports to provide the library interface.
pub use analyzer::new;
pub use report::AnalysisReport;

/// Analyzes the provided `bytecode` from start to finish using the default
/// configuration.
#[must_use]
pub fn analyze(bytecode: impl Into<Vec<u8>>) -> AnalysisReport {
    new(contract::Contract::new(bytecode.into()), analyzer::Config::default()).analyze()
}
