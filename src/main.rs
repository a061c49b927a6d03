//! The command-line interface to the gas analysis.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use clap::{ArgGroup, Parser};
use gaslens::{
    analyzer::{Config, FunctionGasAttribution},
    constant::{DEFAULT_ETHERSCAN_CHAIN_ID, DEFAULT_TOP_OPCODES, ETHERSCAN_API_KEY_VAR},
    contract::Contract,
    error::RenderError,
    render,
    report::AnalysisReport,
    source::etherscan::{self, EtherscanConfig},
};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args);

    let contract = load_contract(&args)?;
    let config = build_config(&args);
    let analyzer = gaslens::new(contract, config).walk();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.detailed {
        render::text::write_listing(
            analyzer.contract().bytecode(),
            analyzer.config().cost_table,
            &mut out,
        )?;
    }

    let report = analyzer.aggregate();

    if args.detailed {
        render::text::write_report(&report, &mut out)?;
    } else {
        render::simple::write_report(&report, &mut out)?;
    }
    out.flush()?;

    if let Some(path) = &args.json {
        export(path, &report, render::json::write_report)?;
        tracing::info!(path = %path.display(), "Exported report as JSON");
    }
    if let Some(path) = &args.csv {
        export(path, &report, render::csv::write_report)?;
        tracing::info!(path = %path.display(), "Exported report as CSV");
    }

    Ok(())
}

/// Estimate the gas cost of EVM bytecode and point out likely inefficiencies.
#[derive(Debug, Parser)]
#[command(name = "gaslens", version, about)]
#[command(group(ArgGroup::new("input").required(true).args(["file", "address"])))]
#[command(group(ArgGroup::new("style").args(["detailed", "simple"])))]
struct Args {
    /// A file containing the contract's bytecode as hex.
    file: Option<PathBuf>,

    /// The address of a deployed contract to fetch from Etherscan.
    #[arg(long)]
    address: Option<String>,

    /// Print the per-instruction listing and the full technical report.
    #[arg(long)]
    detailed: bool,

    /// Print the simplified report (the default).
    #[arg(long)]
    simple: bool,

    /// Also write the report as JSON to this path.
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// Also write the report as CSV to this path.
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// The number of opcodes to rank by gas.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_TOP_OPCODES)]
    top: usize,

    /// Charge each opcode only to the closest preceding function, instead of
    /// to every preceding function.
    #[arg(long)]
    range_scoped_gas: bool,

    /// The Etherscan API key used with `--address`.
    #[arg(long, env = ETHERSCAN_API_KEY_VAR, hide_env_values = true)]
    api_key: Option<String>,

    /// The chain on which the contract at `--address` is deployed.
    #[arg(long, default_value_t = DEFAULT_ETHERSCAN_CHAIN_ID)]
    chain_id: u64,

    /// Log more detail. Can be repeated.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log less detail. Can be repeated.
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "verbose")]
    quiet: u8,
}

/// Sets up logging to stderr, preferring `RUST_LOG` when it is set and valid.
fn init_logging(args: &Args) {
    let level = match i16::from(args.verbose) - i16::from(args.quiet) {
        i16::MIN..=-2 => "off",
        -1 => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Loads the contract from whichever input was given on the command line.
fn load_contract(args: &Args) -> anyhow::Result<Contract> {
    if let Some(address) = &args.address {
        let api_key = match &args.api_key {
            Some(key) if !key.trim().is_empty() => key.clone(),
            _ => bail!("{ETHERSCAN_API_KEY_VAR} is not set; set it or pass --api-key"),
        };
        let config = EtherscanConfig::new(api_key).with_chain_id(args.chain_id);
        let bytes = etherscan::fetch_bytecode(&config, address)
            .with_context(|| format!("Could not fetch the bytecode of {address}"))?;
        return Ok(Contract::new(bytes));
    }

    match &args.file {
        Some(path) => Contract::from_hex_file(path)
            .with_context(|| format!("Could not load bytecode from {}", path.display())),
        None => bail!("Either a bytecode file or --address must be provided"),
    }
}

/// Builds the analysis configuration from the command line.
fn build_config(args: &Args) -> Config {
    let attribution = if args.range_scoped_gas {
        FunctionGasAttribution::RangeScoped
    } else {
        FunctionGasAttribution::Cumulative
    };

    Config::default()
        .with_top_opcodes(args.top)
        .with_function_gas_attribution(attribution)
}

/// Writes `report` to the file at `path` using `render`.
fn export(
    path: &Path,
    report: &AnalysisReport,
    render: impl FnOnce(&AnalysisReport, BufWriter<File>) -> Result<(), RenderError>,
) -> anyhow::Result<()> {
    let file =
        File::create(path).with_context(|| format!("Could not create {}", path.display()))?;
    render(report, BufWriter::new(file))
        .with_context(|| format!("Could not write the report to {}", path.display()))
}
