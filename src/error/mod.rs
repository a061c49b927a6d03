//! This module contains error types for the library, split into a number of
//! enums by subsystem.
//!
//! The analysis core itself never fails: malformed bytecode degrades to
//! defined defaults. Errors only arise at the edges of the library, when
//! loading bytecode or when rendering a report.
//!
//! All of the errors implement [`std::error::Error`], and hence can be used
//! with [`anyhow::Error`].

pub mod render;
pub mod source;

use thiserror::Error;

pub use self::{render::RenderError, source::SourceError};

/// The interface result type for the library.
pub type Result<T> = std::result::Result<T, Error>;

/// The interface error type for the library.
///
/// All errors returned from the library interface (and hence encountered by the
/// clients of the library) should be members of this enum.
#[derive(Debug, Error)]
pub enum Error {
    /// Errors that come from loading bytecode.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Errors that come from rendering or exporting a report.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Errors that come from constructing opcodes by hand.
    #[error(transparent)]
    Opcode(#[from] OpcodeError),
}

/// Errors from the [`crate::opcode`] subsystem of the library.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum OpcodeError {
    #[error("Invalid size {_0:?} provided to the `PUSH` opcode")]
    InvalidPushSize(u8),

    #[error("The `PUSH{size}` opcode requires {size} bytes but {provided} were provided")]
    PushDataMismatch { size: u8, provided: usize },
}
