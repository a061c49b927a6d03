//! This module contains the CSV export of a report.
//!
//! Every row has four columns: `Category,Item,Value,Details`. Opcodes come
//! first in mnemonic order, then storage reads and writes in slot order, and
//! finally the candidate functions in the order they were found.

use std::{borrow::Cow, io::Write};

use crate::{error::render::Result, report::AnalysisReport};

/// The header row of the export.
pub const HEADER: [&str; 4] = ["Category", "Item", "Value", "Details"];

/// Writes `report` to `writer` as CSV.
///
/// # Errors
///
/// Returns [`Err`] if writing fails.
pub fn write_report(report: &AnalysisReport, mut writer: impl Write) -> Result<()> {
    write_row(&mut writer, HEADER)?;

    for (opcode, count) in report.opcode_frequency() {
        let gas = report.opcode_gas().get(opcode).copied().unwrap_or_default();
        write_row(
            &mut writer,
            ["Opcode", opcode.as_str(), &count.to_string(), &format!("Gas: {gas}")],
        )?;
    }

    for (category, counts) in [
        ("Storage Read", report.storage_reads()),
        ("Storage Write", report.storage_writes()),
    ] {
        for (slot, count) in counts {
            write_row(
                &mut writer,
                [category, &format!("Slot {slot}"), &count.to_string(), ""],
            )?;
        }
    }

    for function in report.functions() {
        write_row(
            &mut writer,
            [
                "Function",
                function.selector.as_str(),
                &function.gas.to_string(),
                &format!("Entry PC: {}", function.entry_pc),
            ],
        )?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes a single row of `fields`, terminated by a newline.
fn write_row(writer: &mut impl Write, fields: [&str; 4]) -> Result<()> {
    let line = fields.iter().map(|f| escape(f)).collect::<Vec<_>>().join(",");
    writeln!(writer, "{line}")?;
    Ok(())
}

/// Quotes `field` if it contains a separator, a quote or a line break,
/// doubling any quotes inside it.
#[must_use]
pub fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

#[cfg(test)]
mod test {
    use crate::render::csv::{escape, write_report};

    #[test]
    fn escapes_only_when_needed() {
        assert_eq!(escape("PUSH1"), "PUSH1");
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn writes_all_categories() -> anyhow::Result<()> {
        // PUSH4 selector, PUSH1 0x05, SLOAD, PUSH1 0x06, SSTORE
        let bytes = vec![0x63, 0xa9, 0x05, 0x9c, 0xbb, 0x60, 0x05, 0x54, 0x60, 0x06, 0x55];
        let report = crate::analyze(bytes);

        let mut out = Vec::new();
        write_report(&report, &mut out)?;
        let text = String::from_utf8(out)?;
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines,
            vec![
                "Category,Item,Value,Details",
                "Opcode,PUSH1,2,Gas: 6",
                "Opcode,PUSH4,1,Gas: 3",
                "Opcode,SLOAD,1,Gas: 100",
                "Opcode,SSTORE,1,Gas: 20000",
                "Storage Read,Slot 5,1,",
                "Storage Write,Slot 6,1,",
                "Function,0xa9059cbb,20109,Entry PC: 0",
            ]
        );
        Ok(())
    }
}
