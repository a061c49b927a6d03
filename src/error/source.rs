//! This module contains the error type that pertains to loading bytecode from
//! files, strings and the remote lookup service.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that occur while obtaining the bytes of a contract.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Could not read {}: {source}", .path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("The input is not valid hexadecimal: {_0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Bytecode cannot be empty")]
    EmptyInput,

    #[error("The bytecode lookup request failed: {_0}")]
    Http(#[from] reqwest::Error),

    #[error("The bytecode lookup service returned a malformed response: {_0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("No bytecode was found for address {address}")]
    NoBytecode { address: String },

    #[error("No Etherscan API key was provided; set {} or pass one explicitly", crate::constant::ETHERSCAN_API_KEY_VAR)]
    MissingApiKey,
}

/// The result type for functions that may return source errors.
pub type Result<T> = std::result::Result<T, SourceError>;
