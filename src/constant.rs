//! This module contains constants that are needed throughout the codebase.

use std::time::Duration;

/// The base byte value for the `PUSH` opcode, for `N > 0`.
///
/// This is constructed such that for `PUSHN`, `PUSH_OPCODE_BASE_VALUE` + `N`
/// equals the byte value for the corresponding `PUSH` opcode.
pub const PUSH_OPCODE_BASE_VALUE: u8 = 0x5f;

/// The base byte value for the `DUP` opcode.
///
/// This is constructed such that for `DUPN`, `DUP_OPCODE_BASE_VALUE` + `N`
/// equals the byte value for the corresponding `DUP` opcode.
pub const DUP_OPCODE_BASE_VALUE: u8 = 0x7f;

/// The base byte value for the `SWAP` opcode.
///
/// This is constructed such that for `SWAPN`, `SWAP_OPCODE_BASE_VALUE` + `N`
/// equals the byte value for the corresponding `SWAP` opcode.
pub const SWAP_OPCODE_BASE_VALUE: u8 = 0x8f;

/// The base byte value for the `LOG` opcode.
///
/// This is constructed such that for `LOGN`, `LOG_OPCODE_BASE_VALUE` + `N`
/// equals the byte value for the corresponding `LOG` opcode.
pub const LOG_OPCODE_BASE_VALUE: u8 = 0xa0;

/// The maximum number of bytes that can be pushed at once using the `PUSH`
/// opcode.
pub const PUSH_OPCODE_MAX_BYTES: u8 = 32;

/// The maximum number of stack items reachable by the `DUP` and `SWAP`
/// opcodes.
pub const STACK_ACCESS_MAX_DEPTH: u8 = 16;

/// The number of bytes in a function selector.
pub const SELECTOR_SIZE_BYTES: usize = 4;

/// The value that the abstract stack produces whenever it cannot supply a
/// simulated value.
pub const STACK_SENTINEL_VALUE: u64 = 0;

/// The default number of opcodes reported in the ranking by gas.
pub const DEFAULT_TOP_OPCODES: usize = 5;

/// The number of items shown in each section of the simple report.
pub const SIMPLE_REPORT_TOP_ITEMS: usize = 3;

/// A slot written more than this many times is reported as a write hotspot.
pub const STORAGE_WRITE_HOTSPOT_THRESHOLD: usize = 1;

/// A slot read more than this many times is reported as a read hotspot.
pub const STORAGE_READ_HOTSPOT_THRESHOLD: usize = 2;

/// A slot read more than this many times produces a caching suggestion.
pub const STORAGE_READ_CACHE_THRESHOLD: usize = 3;

/// A run of consecutive `SSTORE` opcodes longer than this produces a packing
/// suggestion.
pub const CONSECUTIVE_STORE_THRESHOLD: usize = 1;

/// A loop record seen more than this many times produces a loop-specific
/// suggestion.
pub const LOOP_OCCURRENCE_THRESHOLD: usize = 5;

/// Total `SSTORE` gas above which a struct-packing suggestion is made.
pub const STORE_GAS_SUGGESTION_THRESHOLD: u64 = 100_000;

/// Total `SLOAD` gas above which a caching suggestion is made.
pub const LOAD_GAS_SUGGESTION_THRESHOLD: u64 = 50_000;

/// Total gas below which a contract is rated [`Excellent`].
///
/// [`Excellent`]: crate::render::simple::EfficiencyTier::Excellent
pub const TIER_EXCELLENT_BELOW: u64 = 50_000;

/// Total gas below which a contract is rated `Good`.
pub const TIER_GOOD_BELOW: u64 = 100_000;

/// Total gas below which a contract is rated `Fair`.
pub const TIER_FAIR_BELOW: u64 = 200_000;

/// Function gas above which a function is considered moderately expensive.
pub const FUNCTION_MODERATE_ABOVE: u64 = 50_000;

/// Function gas above which a function is considered expensive.
pub const FUNCTION_EXPENSIVE_ABOVE: u64 = 100_000;

/// Total storage writes above which the simple report warns about batching.
pub const SIMPLE_REPORT_WRITE_WARNING: usize = 5;

/// Total storage reads above which the simple report warns about caching.
pub const SIMPLE_REPORT_READ_WARNING: usize = 10;

/// The gas price, in gwei, used for the rough cost estimate.
pub const ESTIMATE_GAS_PRICE_GWEI: f64 = 20.0;

/// The ether price, in US dollars, used for the rough cost estimate.
pub const ESTIMATE_ETHER_PRICE_USD: f64 = 3_000.0;

/// The width, in characters, of the longest bar in the console bar chart.
pub const BAR_CHART_WIDTH: u64 = 50;

/// The default endpoint for the Etherscan API.
pub const DEFAULT_ETHERSCAN_URL: &str = "https://api.etherscan.io/v2/api";

/// The default chain queried through the Etherscan API (Ethereum mainnet).
pub const DEFAULT_ETHERSCAN_CHAIN_ID: u64 = 1;

/// The default timeout for requests to the Etherscan API.
pub const DEFAULT_ETHERSCAN_TIMEOUT: Duration = Duration::from_secs(30);

/// The environment variable that holds the Etherscan API key.
pub const ETHERSCAN_API_KEY_VAR: &str = "ETHERSCAN_API_KEY";
