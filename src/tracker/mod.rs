//! This module contains the independent counters that the
//! [`crate::walker::Walker`] feeds with opcode-level events as it walks the
//! bytecode.
//!
//! Each tracker is a plain data aggregate. A fresh set is created for every
//! analysis run and is moved through the walker into the report, so nothing
//! is ever shared between runs.

pub mod function;
pub mod loops;
pub mod opcode;
pub mod storage;

pub use self::{
    function::{FunctionGasAttribution, FunctionRecord, FunctionTracker},
    loops::{LoopRecord, LoopTracker},
    opcode::OpcodeTally,
    storage::StorageTracker,
};
