//! This module contains the detailed plain-text report, intended for the
//! console.

use std::io::Write;

use itertools::Itertools;

use crate::{
    constant::BAR_CHART_WIDTH,
    cost::CostTable,
    disassembly::disassemble,
    error::render::Result,
    report::AnalysisReport,
};

/// The title of the bar chart section.
const CHART_TITLE: &str = "Top Gas-Consuming Opcodes";

/// The character that bars are drawn with.
const BAR_CHARACTER: char = '█';

/// Writes the per-instruction listing of `bytes` to `writer`, costing each
/// opcode with `cost_table`.
///
/// Each opcode is written as `pc: mnemonic Gas: cost`, and the data of each
/// complete `PUSHN` is written on the line after it.
///
/// # Errors
///
/// Returns [`Err`] if writing fails.
pub fn write_listing(bytes: &[u8], cost_table: &CostTable, mut writer: impl Write) -> Result<()> {
    for instruction in disassemble(bytes) {
        writeln!(
            writer,
            "{:04}: {:<10} Gas: {}",
            instruction.pc,
            instruction.opcode,
            cost_table.cost(instruction.opcode)
        )?;

        if instruction.opcode.is_push() && !instruction.truncated {
            writeln!(writer, "      PUSH Data: 0x{}", hex::encode(instruction.immediate))?;
        }
    }

    Ok(())
}

/// Writes the full text `report` to `writer`.
///
/// # Errors
///
/// Returns [`Err`] if writing fails.
pub fn write_report(report: &AnalysisReport, mut writer: impl Write) -> Result<()> {
    let w = &mut writer;

    writeln!(w, "\n=== Opcode Frequency Summary ===")?;
    for (opcode, count) in report.opcode_frequency() {
        let gas = report.opcode_gas().get(opcode).copied().unwrap_or_default();
        writeln!(w, "{opcode:<10} : {count} times, approx gas: {gas}")?;
    }

    let top = report.top_expensive_opcodes();
    writeln!(w, "\n=== Top {} Expensive Opcodes ===", top.len())?;
    for (index, entry) in top.iter().enumerate() {
        writeln!(w, "{}. {:<10} : {} gas", index + 1, entry.opcode, entry.gas)?;
    }

    writeln!(w, "\nTotal Approximate Gas Cost: {}", report.total_gas())?;

    write_bar_chart(w, report)?;

    let hotspots = report.storage_hotspots();
    writeln!(w, "\n=== Storage Write Hotspots ===")?;
    for entry in &hotspots.writes {
        writeln!(
            w,
            "Slot {} written {} times - consider packing or caching",
            entry.slot, entry.count
        )?;
    }

    writeln!(w, "\n=== Repeated Storage Reads ===")?;
    for entry in &hotspots.reads {
        writeln!(
            w,
            "Slot {} read {} times - cache in memory variable",
            entry.slot, entry.count
        )?;
    }

    writeln!(w, "\n=== Loop Detection ===")?;
    if report.loops().is_empty() {
        writeln!(w, "No backward jumps detected (no loops found)")?;
    }
    for record in report.loops() {
        writeln!(
            w,
            "Loop detected: PC {} -> {} (seen {} times) - consider optimizing or limiting \
             iterations",
            record.target_pc, record.jump_pc, record.count
        )?;
    }

    writeln!(w, "\n=== Function Gas Usage ===")?;
    if report.functions().is_empty() {
        writeln!(w, "No function selectors detected")?;
    }
    for function in report.functions() {
        writeln!(
            w,
            "Function {} at PC {} used approx {} gas",
            function.selector, function.entry_pc, function.gas
        )?;
    }

    writeln!(w, "\n=== Optimization Suggestions ===")?;
    if report.optimization_suggestions().is_empty() {
        writeln!(w, "No suggestions")?;
    }
    for suggestion in report.optimization_suggestions() {
        writeln!(w, "- {suggestion}")?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes a horizontal bar chart of the gas used by each opcode, most
/// expensive first.
fn write_bar_chart(w: &mut impl Write, report: &AnalysisReport) -> Result<()> {
    let max = report.opcode_gas().values().copied().max().unwrap_or_default();
    if max == 0 {
        writeln!(w, "\nNo data for {CHART_TITLE}")?;
        return Ok(());
    }

    writeln!(w, "\n=== {CHART_TITLE} ===")?;
    let width = usize::try_from(BAR_CHART_WIDTH).unwrap_or(usize::MAX);
    for (opcode, gas) in report.opcode_gas().iter().sorted_by(|a, b| b.1.cmp(a.1)) {
        let bar = bar(*gas, max);
        writeln!(w, "{opcode:<10} |{bar:<width$} {gas}")?;
    }

    Ok(())
}

/// Draws the bar for `value`, scaled so that `max` fills the chart's width.
#[must_use]
pub fn bar(value: u64, max: u64) -> String {
    let length = u128::from(value) * u128::from(BAR_CHART_WIDTH) / u128::from(max.max(1));
    std::iter::repeat(BAR_CHARACTER)
        .take(usize::try_from(length).unwrap_or_default())
        .collect()
}

#[cfg(test)]
mod test {
    use crate::{
        cost::STANDARD_COST_TABLE,
        render::text::{bar, write_listing, write_report},
    };

    #[test]
    fn bars_scale_to_the_maximum() {
        assert_eq!(bar(100, 100).chars().count(), 50);
        assert_eq!(bar(50, 100).chars().count(), 25);
        assert_eq!(bar(1, 100).chars().count(), 0);
        assert!(bar(0, 0).is_empty());
    }

    #[test]
    fn listing_shows_offsets_and_push_data() -> anyhow::Result<()> {
        let mut out = Vec::new();
        write_listing(&[0x60, 0x2a, 0x55, 0x61, 0xff], &STANDARD_COST_TABLE, &mut out)?;
        let text = String::from_utf8(out)?;
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines,
            vec![
                "0000: PUSH1      Gas: 3",
                "      PUSH Data: 0x2a",
                "0002: SSTORE     Gas: 20000",
                "0003: PUSH2      Gas: 3",
            ]
        );
        Ok(())
    }

    #[test]
    fn report_has_every_section() -> anyhow::Result<()> {
        // Four PUSH1 0x01, then two SSTOREs to slot 1.
        let report = crate::analyze(vec![
            0x60, 0x01, 0x60, 0x01, 0x60, 0x01, 0x60, 0x01, 0x55, 0x55,
        ]);
        let mut out = Vec::new();
        write_report(&report, &mut out)?;
        let text = String::from_utf8(out)?;

        for heading in [
            "=== Opcode Frequency Summary ===",
            "=== Top 2 Expensive Opcodes ===",
            "Total Approximate Gas Cost: 40012",
            "=== Top Gas-Consuming Opcodes ===",
            "=== Storage Write Hotspots ===",
            "Slot 1 written 2 times",
            "=== Repeated Storage Reads ===",
            "No backward jumps detected",
            "No function selectors detected",
            "- Detected 2 consecutive SSTORE instructions",
        ] {
            assert!(text.contains(heading), "missing {heading:?} in:\n{text}");
        }
        Ok(())
    }

    #[test]
    fn chart_lists_most_expensive_first() -> anyhow::Result<()> {
        let report = crate::analyze(vec![0x60, 0x01, 0x55]);
        let mut out = Vec::new();
        write_report(&report, &mut out)?;
        let text = String::from_utf8(out)?;

        let chart = text
            .split("=== Top Gas-Consuming Opcodes ===")
            .nth(1)
            .unwrap_or_default();
        let sstore = chart.find("SSTORE").unwrap_or(usize::MAX);
        let push = chart.find("PUSH1").unwrap_or(usize::MAX);
        assert!(sstore < push);
        Ok(())
    }
}
