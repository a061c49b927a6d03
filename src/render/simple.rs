//! This module contains the simplified report, which summarises an analysis
//! for readers who are not familiar with the EVM's instruction set.

use std::{fmt, io::Write};

use crate::{
    constant::{
        ESTIMATE_ETHER_PRICE_USD,
        ESTIMATE_GAS_PRICE_GWEI,
        FUNCTION_EXPENSIVE_ABOVE,
        FUNCTION_MODERATE_ABOVE,
        SIMPLE_REPORT_READ_WARNING,
        SIMPLE_REPORT_TOP_ITEMS,
        SIMPLE_REPORT_WRITE_WARNING,
        TIER_EXCELLENT_BELOW,
        TIER_FAIR_BELOW,
        TIER_GOOD_BELOW,
    },
    error::render::Result,
    report::AnalysisReport,
};

/// The number of gwei in one ether.
const GWEI_PER_ETHER: f64 = 1e9;

/// The friendly tips, keyed by the prefix of the suggestion they simplify.
///
/// Suggestions about loops map to the same tip whichever of the two loop
/// suggestions they come from.
const TIPS: [(&str, &str); 6] = [
    (
        "Cache storage",
        "💡 Store frequently used data in memory instead of storage",
    ),
    (
        "High SSTORE",
        "💡 Group related variables together to save storage costs",
    ),
    (
        "High SLOAD",
        "💡 Read storage values once and reuse them from memory",
    ),
    (
        "Detected",
        "💡 Pack variables that are written together into a single slot",
    ),
    (
        "Consider gas limits",
        "💡 Add gas limits to loops to prevent failures",
    ),
    ("Loop at", "💡 Add gas limits to loops to prevent failures"),
];

/// A coarse rating of how expensive a contract is overall.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum EfficiencyTier {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl EfficiencyTier {
    /// Rates a contract whose total estimated gas is `gas`.
    #[must_use]
    pub fn for_gas(gas: u64) -> Self {
        match gas {
            g if g < TIER_EXCELLENT_BELOW => Self::Excellent,
            g if g < TIER_GOOD_BELOW => Self::Good,
            g if g < TIER_FAIR_BELOW => Self::Fair,
            _ => Self::Poor,
        }
    }
}

impl fmt::Display for EfficiencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Excellent => "🟢 EXCELLENT (Very efficient)",
            Self::Good => "🟡 GOOD (Moderately efficient)",
            Self::Fair => "🟠 FAIR (Could be optimized)",
            Self::Poor => "🔴 POOR (Needs optimization)",
        };
        f.write_str(label)
    }
}

/// A coarse rating of how expensive a single function is.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum CostLevel {
    Cheap,
    Moderate,
    Expensive,
}

impl CostLevel {
    /// Rates a function that has been attributed `gas`.
    #[must_use]
    pub fn for_gas(gas: u64) -> Self {
        if gas > FUNCTION_EXPENSIVE_ABOVE {
            Self::Expensive
        } else if gas > FUNCTION_MODERATE_ABOVE {
            Self::Moderate
        } else {
            Self::Cheap
        }
    }
}

impl fmt::Display for CostLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Cheap => "💚 Cheap",
            Self::Moderate => "💛 Moderate",
            Self::Expensive => "❤️ Expensive",
        };
        f.write_str(label)
    }
}

/// Estimates the cost in US dollars of spending `gas`, at a fixed gas price
/// and ether price.
#[must_use]
#[allow(clippy::cast_precision_loss)] // Only an estimate
pub fn estimate_usd(gas: u64) -> f64 {
    gas as f64 * ESTIMATE_GAS_PRICE_GWEI / GWEI_PER_ETHER * ESTIMATE_ETHER_PRICE_USD
}

/// Describes the opcode with `mnemonic` in plain terms.
#[must_use]
pub fn describe_operation(mnemonic: &str) -> String {
    let description = match mnemonic {
        "SSTORE" => "💾 Storage Write (expensive!)",
        "SLOAD" => "📖 Storage Read",
        "CALL" => "📞 External Call",
        "CREATE" => "🏗️  Contract Creation",
        "JUMPI" => "🔀 Conditional Logic",
        "JUMP" => "➡️  Code Navigation",
        "PUSH1" | "PUSH2" => "📥 Data Loading",
        "PUSH4" => "📥 Function Selector",
        other => return format!("⚙️  {other} Operation"),
    };
    description.to_string()
}

/// Simplifies `suggestions` into at most [`SIMPLE_REPORT_TOP_ITEMS`] friendly
/// tips, without repeating any tip.
#[must_use]
pub fn simplify_suggestions(suggestions: &[String]) -> Vec<&'static str> {
    let mut tips: Vec<&'static str> = Vec::new();

    for suggestion in suggestions {
        let tip = TIPS
            .iter()
            .find(|(prefix, _)| suggestion.starts_with(*prefix))
            .map(|(_, tip)| *tip);
        if let Some(tip) = tip {
            if !tips.contains(&tip) {
                tips.push(tip);
            }
        }
        if tips.len() == SIMPLE_REPORT_TOP_ITEMS {
            break;
        }
    }

    tips
}

/// Writes the simplified `report` to `writer`.
///
/// # Errors
///
/// Returns [`Err`] if writing fails.
pub fn write_report(report: &AnalysisReport, mut writer: impl Write) -> Result<()> {
    let w = &mut writer;
    let total_gas = report.total_gas();

    writeln!(w, "\n🔍 SMART CONTRACT GAS ANALYSIS")?;
    writeln!(w, "================================")?;
    writeln!(w, "💰 Estimated Total Gas Cost: {total_gas} gas")?;
    writeln!(
        w,
        "💵 Approximate Cost ({ESTIMATE_GAS_PRICE_GWEI} gwei): ${:.4} USD",
        estimate_usd(total_gas)
    )?;
    writeln!(w, "⭐ Gas Efficiency Rating: {}\n", EfficiencyTier::for_gas(total_gas))?;

    writeln!(w, "🔥 TOP GAS CONSUMERS:")?;
    let top = report.top_expensive_opcodes();
    if top.is_empty() {
        writeln!(w, "   No expensive operations found")?;
    }
    for (index, entry) in top.iter().take(SIMPLE_REPORT_TOP_ITEMS).enumerate() {
        writeln!(
            w,
            "   {}. {} - {} gas",
            index + 1,
            describe_operation(&entry.opcode),
            entry.gas
        )?;
    }

    writeln!(w, "\n💾 STORAGE USAGE:")?;
    let reads = report.total_storage_reads();
    let writes = report.total_storage_writes();
    if reads == 0 && writes == 0 {
        writeln!(w, "   📊 No storage operations detected")?;
    } else {
        writeln!(w, "   📖 Storage Reads: {reads}")?;
        writeln!(w, "   💾 Storage Writes: {writes}")?;
        if writes > SIMPLE_REPORT_WRITE_WARNING {
            writeln!(w, "   ⚠️  High storage writes - consider batching")?;
        }
        if reads > SIMPLE_REPORT_READ_WARNING {
            writeln!(w, "   ⚠️  Many storage reads - consider caching")?;
        }
    }

    writeln!(w, "\n💡 OPTIMIZATION TIPS:")?;
    let tips = simplify_suggestions(report.optimization_suggestions());
    if tips.is_empty() {
        writeln!(w, "   ✅ No obvious optimizations needed!")?;
    }
    for (index, tip) in tips.iter().enumerate() {
        writeln!(w, "   {}. {tip}", index + 1)?;
    }

    if !report.functions().is_empty() {
        writeln!(w, "\n🎯 FUNCTION COSTS:")?;
        for (index, function) in report
            .top_functions(SIMPLE_REPORT_TOP_ITEMS)
            .into_iter()
            .enumerate()
        {
            writeln!(
                w,
                "   {}. Function {} - {} gas ({})",
                index + 1,
                function.selector,
                function.gas,
                CostLevel::for_gas(function.gas)
            )?;
        }
    }

    writer.flush()?;
    Ok(())
}
