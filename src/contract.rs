//! This module contains types useful for dealing with concrete contracts that
//! you want to analyze.

use std::path::Path;

use crate::{error::source::Result, source};

/// A representation of a contract that is passed to the library.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Contract {
    bytecode: Vec<u8>,
}

impl Contract {
    /// Creates a new contract from the provided `bytecode`.
    ///
    /// This should be the deployed (runtime) bytecode of the contract. Any
    /// metadata appended by the compiler is walked like any other bytes.
    #[must_use]
    pub fn new(bytecode: Vec<u8>) -> Self {
        Self { bytecode }
    }

    /// Creates a new contract from `text` containing its bytecode as hex.
    ///
    /// See [`source::decode_hex`] for the accepted formats.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if `text` is not valid hex or contains no bytecode.
    pub fn from_hex(text: &str) -> Result<Self> {
        source::decode_hex(text).map(Self::new)
    }

    /// Creates a new contract from the file at the provided `path`, which
    /// must contain the bytecode as hex.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if the file cannot be read, or if its contents are not
    /// valid hex.
    pub fn from_hex_file(path: impl AsRef<Path>) -> Result<Self> {
        source::read_hex_file(path).map(Self::new)
    }

    /// Gets a reference to the bytecode of the contract.
    #[must_use]
    pub fn bytecode(&self) -> &[u8] {
        &self.bytecode
    }
}

impl From<Vec<u8>> for Contract {
    fn from(bytecode: Vec<u8>) -> Self {
        Self::new(bytecode)
    }
}

#[cfg(test)]
mod test {
    use crate::{contract::Contract, error::SourceError};

    #[test]
    fn can_create_from_hex() -> anyhow::Result<()> {
        let contract = Contract::from_hex("0x6001600201")?;
        assert_eq!(contract.bytecode(), &[0x60, 0x01, 0x60, 0x02, 0x01]);
        Ok(())
    }

    #[test]
    fn rejects_empty_hex() {
        assert!(matches!(
            Contract::from_hex("  0x  "),
            Err(SourceError::EmptyInput)
        ));
    }
}
