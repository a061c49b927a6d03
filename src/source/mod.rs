//! This module contains the loaders that turn the various forms in which
//! bytecode is found into the raw bytes that the analyzer walks.

pub mod etherscan;

use std::{fs, path::Path};

use crate::error::source::{Result, SourceError};

/// Decodes `text` containing bytecode as hex.
///
/// Surrounding whitespace and a single `0x` or `0X` prefix are removed, as is
/// any whitespace within the hex itself, so that bytecode wrapped over many
/// lines is accepted.
///
/// # Errors
///
/// Returns [`Err`] if the text is not valid hex, or if it contains no bytes
/// at all.
pub fn decode_hex(text: &str) -> Result<Vec<u8>> {
    let trimmed = text.trim();
    let unprefixed = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let digits: String = unprefixed.chars().filter(|c| !c.is_whitespace()).collect();

    let bytes = hex::decode(digits)?;
    if bytes.is_empty() {
        return Err(SourceError::EmptyInput);
    }

    Ok(bytes)
}

/// Reads the file at `path` and decodes its contents as hex using
/// [`decode_hex`].
///
/// # Errors
///
/// Returns [`Err`] if the file cannot be read or its contents cannot be
/// decoded.
pub fn read_hex_file(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let bytes = decode_hex(&text)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Read bytecode from file");

    Ok(bytes)
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use crate::{
        error::SourceError,
        source::{decode_hex, read_hex_file},
    };

    #[test]
    fn decodes_with_and_without_prefix() -> anyhow::Result<()> {
        assert_eq!(decode_hex("6001")?, vec![0x60, 0x01]);
        assert_eq!(decode_hex("0x6001")?, vec![0x60, 0x01]);
        assert_eq!(decode_hex("0X6001")?, vec![0x60, 0x01]);
        assert_eq!(decode_hex("0xABcd")?, vec![0xab, 0xcd]);
        Ok(())
    }

    #[test]
    fn strips_whitespace_everywhere() -> anyhow::Result<()> {
        let text = "  0x60 01\n60\t02\r\n01  \n";
        assert_eq!(decode_hex(text)?, vec![0x60, 0x01, 0x60, 0x02, 0x01]);
        Ok(())
    }

    #[test]
    fn only_one_prefix_is_stripped() {
        assert!(matches!(decode_hex("0x0x60"), Err(SourceError::InvalidHex(_))));
    }

    #[test]
    fn rejects_odd_length_and_bad_digits() {
        assert!(matches!(decode_hex("0x601"), Err(SourceError::InvalidHex(_))));
        assert!(matches!(decode_hex("zz"), Err(SourceError::InvalidHex(_))));
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(decode_hex(""), Err(SourceError::EmptyInput)));
        assert!(matches!(decode_hex("0x"), Err(SourceError::EmptyInput)));
        assert!(matches!(decode_hex(" \n "), Err(SourceError::EmptyInput)));
    }

    #[test]
    fn reads_hex_files() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "0x6001\n6002\n01")?;

        assert_eq!(read_hex_file(file.path())?, vec![0x60, 0x01, 0x60, 0x02, 0x01]);
        Ok(())
    }

    #[test]
    fn missing_files_report_their_path() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("missing.hex");

        match read_hex_file(&path) {
            Err(SourceError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected an I/O error, got {other:?}"),
        }
        Ok(())
    }
}
