//! This module contains the definition of the analyzer itself.

pub mod state;

use derivative::Derivative;

pub use crate::tracker::FunctionGasAttribution;
use crate::{
    analyzer::state::State,
    constant::DEFAULT_TOP_OPCODES,
    contract::Contract,
    cost::{CostTable, STANDARD_COST_TABLE},
    report::{self, AnalysisReport},
    walker,
};

/// Creates a new analyzer wrapping the provided `contract`, that will analyze
/// it according to `config`.
#[must_use]
pub fn new(contract: Contract, config: Config) -> Analyzer<state::HasContract> {
    let state = state::HasContract;
    Analyzer {
        contract,
        config,
        state,
    }
}

/// The core of the gas analysis, the `Analyzer` is responsible for ingesting
/// a contract and outputting an [`AnalysisReport`].
///
/// # Basic Usage
///
/// For the most basic usage of the library, it is sufficient to construct an
/// `Analyzer` and call the `.analyze` method.
///
/// ```
/// use gaslens::{analyzer::Config, contract::Contract};
///
/// let contract = Contract::new(vec![0x60, 0x01, 0x60, 0x02, 0x01]);
/// let report = gaslens::new(contract, Config::default()).analyze();
///
/// assert_eq!(report.total_gas(), 9);
/// ```
///
/// # Enforcing Valid State Transitions
///
/// The analyzer enforces that only correct state transitions can occur through
/// use of structs that implement the exact state required by it at any given
/// point.
///
/// There is the [`Self::state`] function that provides access to the state data
/// of whichever state it is in.
#[derive(Clone, Debug)]
pub struct Analyzer<S: State> {
    /// The contract that is being analyzed.
    contract: Contract,

    /// The configuration for the analysis.
    config: Config,

    /// The internal state of the analyzer.
    state: S,
}

/// Operations available in all states.
impl<S: State> Analyzer<S> {
    /// Gets a reference to the contract being analyzed.
    #[must_use]
    pub fn contract(&self) -> &Contract {
        &self.contract
    }

    /// Gets a reference to the configuration of the analysis.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Gets a reference to the current state of the analyzer.
    #[must_use]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Moves the analyzer into the state `NS`, with the value of the state
    /// created by applying `transform` to the analyzer's current state.
    fn transform_state<NS: State>(
        self,
        transform: impl FnOnce(&Contract, &Config, S) -> NS,
    ) -> Analyzer<NS> {
        let Self {
            contract,
            config,
            state,
        } = self;
        let state = transform(&contract, &config, state);

        Analyzer {
            contract,
            config,
            state,
        }
    }
}

/// Operations available on a newly-created analyzer.
impl Analyzer<state::HasContract> {
    /// Executes the analysis process from beginning to end, performing all the
    /// intermediate steps automatically.
    #[must_use]
    pub fn analyze(self) -> AnalysisReport {
        self.walk().aggregate()
    }

    /// Walks the contract's bytecode once, gathering the gas, storage, loop
    /// and function evidence for the report.
    #[must_use]
    pub fn walk(self) -> Analyzer<state::WalkComplete> {
        self.transform_state(|contract, config, _| {
            let walk_result = walker::walk(contract.bytecode(), config);
            state::WalkComplete { walk_result }
        })
    }
}

/// Operations available on an analyzer that has walked the bytecode.
impl Analyzer<state::WalkComplete> {
    /// Aggregates the results of the walk into the final report.
    #[must_use]
    pub fn aggregate(self) -> AnalysisReport {
        report::aggregate(self.state.walk_result, &self.config)
    }
}

/// The configuration for an analysis.
#[derive(Clone, Derivative, Eq, PartialEq)]
#[derivative(Debug)]
pub struct Config {
    /// The number of opcodes to include in the report's ranking of the most
    /// expensive opcodes.
    ///
    /// Defaults to [`DEFAULT_TOP_OPCODES`].
    pub top_opcodes: usize,

    /// The rule used to attribute the gas of each opcode to the candidate
    /// functions.
    ///
    /// Defaults to [`FunctionGasAttribution::Cumulative`].
    pub function_gas_attribution: FunctionGasAttribution,

    /// The table used to look up the cost of each opcode.
    ///
    /// Defaults to [`STANDARD_COST_TABLE`].
    #[derivative(Debug = "ignore")]
    pub cost_table: &'static CostTable,
}

impl Config {
    /// Sets the `top_opcodes` config parameter to `value`.
    #[must_use]
    pub fn with_top_opcodes(mut self, value: usize) -> Self {
        self.top_opcodes = value;
        self
    }

    /// Sets the `function_gas_attribution` config parameter to `value`.
    #[must_use]
    pub fn with_function_gas_attribution(mut self, value: FunctionGasAttribution) -> Self {
        self.function_gas_attribution = value;
        self
    }

    /// Sets the `cost_table` config parameter to `value`.
    #[must_use]
    pub fn with_cost_table(mut self, value: &'static CostTable) -> Self {
        self.cost_table = value;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            top_opcodes:              DEFAULT_TOP_OPCODES,
            function_gas_attribution: FunctionGasAttribution::default(),
            cost_table:               &STANDARD_COST_TABLE,
        }
    }
}
