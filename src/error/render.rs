//! This module contains the error type that pertains to rendering and
//! exporting reports.

use thiserror::Error;

/// Errors that occur while writing a report to its destination.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Could not write the report: {_0}")]
    Io(#[from] std::io::Error),

    #[error("Could not serialize the report: {_0}")]
    Json(#[from] serde_json::Error),
}

/// The result type for functions that may return render errors.
pub type Result<T> = std::result::Result<T, RenderError>;
