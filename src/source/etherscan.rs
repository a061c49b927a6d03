//! This module contains the loader that fetches the deployed bytecode of a
//! contract from the Etherscan API.
//!
//! The request is made with a blocking client, as the rest of the analysis is
//! synchronous and only ever needs a single response.

use std::time::Duration;

use serde_json::Value;

use crate::{
    constant::{
        DEFAULT_ETHERSCAN_CHAIN_ID,
        DEFAULT_ETHERSCAN_TIMEOUT,
        DEFAULT_ETHERSCAN_URL,
        ETHERSCAN_API_KEY_VAR,
    },
    error::source::{Result, SourceError},
    source::decode_hex,
};

/// The configuration for requests to the Etherscan API.
#[derive(Clone, Eq, PartialEq)]
pub struct EtherscanConfig {
    /// The key used to authenticate with the API.
    pub api_key: String,

    /// The URL of the API endpoint.
    ///
    /// Defaults to [`DEFAULT_ETHERSCAN_URL`].
    pub base_url: String,

    /// The ID of the chain on which the contract is deployed.
    ///
    /// Defaults to [`DEFAULT_ETHERSCAN_CHAIN_ID`].
    pub chain_id: u64,

    /// How long to wait for the whole request to complete.
    ///
    /// Defaults to [`DEFAULT_ETHERSCAN_TIMEOUT`].
    pub timeout: Duration,
}

impl EtherscanConfig {
    /// Creates a new configuration using `api_key` and the default values for
    /// everything else.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key:  api_key.into(),
            base_url: DEFAULT_ETHERSCAN_URL.to_string(),
            chain_id: DEFAULT_ETHERSCAN_CHAIN_ID,
            timeout:  DEFAULT_ETHERSCAN_TIMEOUT,
        }
    }

    /// Creates a new configuration with the API key taken from the
    /// [`ETHERSCAN_API_KEY_VAR`] environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::MissingApiKey`] if the variable is unset or
    /// empty.
    pub fn from_env() -> Result<Self> {
        match std::env::var(ETHERSCAN_API_KEY_VAR) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key)),
            _ => Err(SourceError::MissingApiKey),
        }
    }

    /// Sets the `base_url` config parameter to `value`.
    #[must_use]
    pub fn with_base_url(mut self, value: impl Into<String>) -> Self {
        self.base_url = value.into();
        self
    }

    /// Sets the `chain_id` config parameter to `value`.
    #[must_use]
    pub fn with_chain_id(mut self, value: u64) -> Self {
        self.chain_id = value;
        self
    }

    /// Sets the `timeout` config parameter to `value`.
    #[must_use]
    pub fn with_timeout(mut self, value: Duration) -> Self {
        self.timeout = value;
        self
    }
}

// Written by hand so that the API key never ends up in logs.
impl std::fmt::Debug for EtherscanConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EtherscanConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("chain_id", &self.chain_id)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Fetches the deployed bytecode of the contract at `address` using the
/// `eth_getCode` proxy of the Etherscan API.
///
/// # Errors
///
/// Returns [`Err`] if the request fails, if the response is not JSON, or if
/// the response does not contain any bytecode for `address`.
pub fn fetch_bytecode(config: &EtherscanConfig, address: &str) -> Result<Vec<u8>> {
    if config.api_key.trim().is_empty() {
        return Err(SourceError::MissingApiKey);
    }

    tracing::debug!(
        address,
        chain_id = config.chain_id,
        base_url = %config.base_url,
        "Fetching bytecode from Etherscan"
    );

    let client = reqwest::blocking::Client::builder()
        .timeout(config.timeout)
        .build()?;
    let chain_id = config.chain_id.to_string();
    let body = client
        .get(&config.base_url)
        .query(&[
            ("chainid", chain_id.as_str()),
            ("module", "proxy"),
            ("action", "eth_getCode"),
            ("address", address),
            ("tag", "latest"),
            ("apikey", config.api_key.as_str()),
        ])
        .send()?
        .error_for_status()?
        .text()?;

    let bytes = bytecode_from_response(&body, address)?;
    tracing::debug!(address, bytes = bytes.len(), "Fetched bytecode");

    Ok(bytes)
}

/// Extracts the bytecode from the JSON `body` of an `eth_getCode` response.
///
/// # Errors
///
/// Returns [`Err`] if `body` is not JSON, or if its `result` is missing, not
/// a string or empty.
pub fn bytecode_from_response(body: &str, address: &str) -> Result<Vec<u8>> {
    let response: Value = serde_json::from_str(body)?;
    let no_bytecode = || SourceError::NoBytecode {
        address: address.to_string(),
    };

    let code = response
        .get("result")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|code| *code != "0x" && !code.is_empty())
        .ok_or_else(no_bytecode)?;

    match decode_hex(code) {
        Err(SourceError::EmptyInput) => Err(no_bytecode()),
        result => result,
    }
}
