//! This module contains the JSON export of a report.

use std::io::Write;

use crate::{error::render::Result, report::AnalysisReport};

/// Writes `report` to `writer` as pretty-printed JSON, followed by a newline.
///
/// # Errors
///
/// Returns [`Err`] if the report cannot be serialized or written.
pub fn write_report(report: &AnalysisReport, mut writer: impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
