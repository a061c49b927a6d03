//! This module contains common utilities for simplifying the writing of
//! integration tests for this library.

#![cfg(test)]

use anyhow::anyhow;
use gaslens::{analyzer::Config, contract::Contract, AnalysisReport};

/// The runtime bytecode of a small proxy contract, including the metadata
/// that the compiler appends to it.
///
/// It exposes three functions: `0x5c60da1b`, `0xb06cb899` and `0xe8e834a9`.
#[allow(unused)] // It is actually
pub const PROXY_CONTRACT: &str = "0x608060405234801561001057600080fd5b50600436106100415760003560e01c80635c60da1b14610046578063b06cb8991461006a578063e8e834a91461007e575b600080fd5b61004e610090565b6040516001600160a01b03909116815260200160405180910390f35b61007c6100783660046100bf565b9055565b005b61004e61008c3660046100fb565b5490565b60006100ba7f360894a13ba1a3210667c828492db98dca3e2076cc3735a920a3ca505d382bbc5490565b905090565b600080604083850312156100d257600080fd5b8235915060208301356001600160a01b03811681146100f057600080fd5b809150509250929050565b60006020828403121561010d57600080fd5b503591905056fea2646970667358221220d65a69a7da4e10e131d4d9d13cf5abd64991e0201c1d86b2c4cb0c4aef279e1764736f6c63430008090033";

/// Gets the contract bytecode from the provided hex-encoded string `code`.
///
/// This hex-encoded string may or may not start with the `0x` prefix. Both
/// cases will be handled.
pub fn get_bytecode_from_string(code: impl Into<String>) -> anyhow::Result<Vec<u8>> {
    let bytecode_string = code.into();
    // Remove the 0x if it is present
    let no_0x_prefix = match bytecode_string.strip_prefix("0x") {
        Some(no_0x_prefix) => no_0x_prefix,
        None => &bytecode_string,
    };

    let bytecode = hex::decode(no_0x_prefix).map_err(|_| anyhow!("Could not decode hex"))?;
    Ok(bytecode)
}

/// Analyzes the hex-encoded contract bytecode provided in `code` using the
/// provided `config`.
#[allow(unused)] // It is actually
pub fn analyze_hex_with(code: impl Into<String>, config: Config) -> anyhow::Result<AnalysisReport> {
    let bytecode = get_bytecode_from_string(code)?;
    Ok(gaslens::new(Contract::new(bytecode), config).analyze())
}

/// Analyzes the hex-encoded contract bytecode provided in `code` using the
/// default configuration.
#[allow(unused)] // It is actually
pub fn analyze_hex(code: impl Into<String>) -> anyhow::Result<AnalysisReport> {
    analyze_hex_with(code, Config::default())
}
