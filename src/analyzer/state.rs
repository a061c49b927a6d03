//! This module contains the state tracking functionality for the analyzer.

use std::fmt::Debug;

use crate::walker::WalkResult;

/// A marker trait that says that the type implementing it is an analyzer state.
pub trait State
where
    Self: Clone + Debug + Sized,
{
}

/// The initial state for the analyzer.
#[derive(Clone, Debug)]
pub struct HasContract;
impl State for HasContract {}

/// The analyzer has walked the bytecode and gathered everything it needs to
/// produce a report.
#[derive(Clone, Debug)]
pub struct WalkComplete {
    /// The results from walking the bytecode.
    pub walk_result: WalkResult,
}
impl State for WalkComplete {}
