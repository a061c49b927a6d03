//! This module contains the tracker that discovers candidate functions from
//! their selectors and attributes gas to them.
//!
//! # Heuristic Nature
//!
//! Any `PUSH4` is taken to be a function selector, whether or not the pushed
//! value is ever compared against the selector in the call data. This will
//! produce false positives for 4-byte constants.

use serde::{Deserialize, Serialize};

/// A candidate function discovered from a `PUSH4` in the bytecode.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct FunctionRecord {
    /// The four bytes of the selector, as `0x`-prefixed lowercase hex.
    pub selector: String,

    /// The offset of the `PUSH4` that pushed the selector.
    pub entry_pc: usize,

    /// The gas attributed to the function.
    pub gas: u64,
}

/// The rule used to decide which functions are charged for an opcode.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum FunctionGasAttribution {
    /// Charges every function whose entry point is at or before the opcode.
    ///
    /// Gas spent after a later function's entry point is therefore also
    /// charged to every earlier function, so function totals overlap and do
    /// not sum to the total gas.
    #[default]
    Cumulative,

    /// Charges only the function with the closest entry point at or before
    /// the opcode, so that function totals partition the gas spent after the
    /// first entry point.
    RangeScoped,
}

/// An ordered collection of [`FunctionRecord`]s along with the rule used to
/// attribute gas to them.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FunctionTracker {
    functions:   Vec<FunctionRecord>,
    attribution: FunctionGasAttribution,
}

impl FunctionTracker {
    /// Creates a new tracker with no functions, that attributes gas using
    /// `attribution`.
    #[must_use]
    pub fn new(attribution: FunctionGasAttribution) -> Self {
        let functions = Vec::new();
        Self {
            functions,
            attribution,
        }
    }

    /// Registers a function with `selector` whose entry point is at `pc`.
    pub fn add_function(&mut self, selector: impl Into<String>, pc: usize) {
        self.functions.push(FunctionRecord {
            selector: selector.into(),
            entry_pc: pc,
            gas:      0,
        });
    }

    /// Attributes `gas` spent by the opcode at `pc` to the registered
    /// functions, according to the tracker's [`FunctionGasAttribution`].
    pub fn add_gas(&mut self, pc: usize, gas: u64) {
        match self.attribution {
            FunctionGasAttribution::Cumulative => self
                .functions
                .iter_mut()
                .filter(|f| f.entry_pc <= pc)
                .for_each(|f| f.gas += gas),
            FunctionGasAttribution::RangeScoped => {
                // `max_by_key` keeps the last of equal keys, so ties go to the
                // most recently registered function.
                let closest = self
                    .functions
                    .iter_mut()
                    .filter(|f| f.entry_pc <= pc)
                    .max_by_key(|f| f.entry_pc);
                if let Some(function) = closest {
                    function.gas += gas;
                }
            }
        }
    }

    /// Gets the registered functions in the order they were discovered.
    #[must_use]
    pub fn functions(&self) -> &[FunctionRecord] {
        &self.functions
    }

    /// Gets the attribution rule in use.
    #[must_use]
    pub fn attribution(&self) -> FunctionGasAttribution {
        self.attribution
    }

    /// Consumes the tracker, returning its records.
    #[must_use]
    pub fn into_functions(self) -> Vec<FunctionRecord> {
        self.functions
    }
}

/// Renders the provided selector `bytes` in the form used by
/// [`FunctionRecord::selector`].
#[must_use]
pub fn format_selector(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

#[cfg(test)]
mod test {
    use crate::tracker::function::{format_selector, FunctionGasAttribution, FunctionTracker};

    #[test]
    fn selectors_are_lowercase_hex() {
        assert_eq!(format_selector(&[0xA9, 0x05, 0x9C, 0xBB]), "0xa9059cbb");
    }

    #[test]
    fn functions_start_with_no_gas() {
        let mut tracker = FunctionTracker::new(FunctionGasAttribution::Cumulative);
        tracker.add_function("0x12345678", 4);

        assert_eq!(tracker.functions().len(), 1);
        assert_eq!(tracker.functions()[0].entry_pc, 4);
        assert_eq!(tracker.functions()[0].gas, 0);
    }

    #[test]
    fn gas_before_entry_is_not_attributed() {
        let mut tracker = FunctionTracker::new(FunctionGasAttribution::Cumulative);
        tracker.add_function("0x12345678", 10);
        tracker.add_gas(9, 100);

        assert_eq!(tracker.functions()[0].gas, 0);
    }

    #[test]
    fn cumulative_attribution_charges_every_earlier_function() {
        let mut tracker = FunctionTracker::new(FunctionGasAttribution::Cumulative);
        tracker.add_function("0x11111111", 0);
        tracker.add_gas(0, 3);
        tracker.add_function("0x22222222", 5);
        tracker.add_gas(5, 3);
        tracker.add_gas(10, 20_000);

        let gas: Vec<u64> = tracker.functions().iter().map(|f| f.gas).collect();
        assert_eq!(gas, vec![20_006, 20_003]);
    }

    #[test]
    fn range_scoped_attribution_charges_only_the_closest_function() {
        let mut tracker = FunctionTracker::new(FunctionGasAttribution::RangeScoped);
        tracker.add_function("0x11111111", 0);
        tracker.add_gas(0, 3);
        tracker.add_function("0x22222222", 5);
        tracker.add_gas(5, 3);
        tracker.add_gas(10, 20_000);

        let gas: Vec<u64> = tracker.functions().iter().map(|f| f.gas).collect();
        assert_eq!(gas, vec![3, 20_003]);
    }

    #[test]
    fn range_scoped_ties_go_to_the_latest_registration() {
        let mut tracker = FunctionTracker::new(FunctionGasAttribution::RangeScoped);
        tracker.add_function("0x11111111", 4);
        tracker.add_function("0x22222222", 4);
        tracker.add_gas(6, 7);

        let gas: Vec<u64> = tracker.functions().iter().map(|f| f.gas).collect();
        assert_eq!(gas, vec![0, 7]);
    }
}
