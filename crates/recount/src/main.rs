//! Import a ledger file into an in-memory store and report the result.
//!
//! ```bash
//! recount transactions.ledger
//! recount transactions.ledger --balances
//! recount transactions.ledger --format json
//! ```
//!
//! The file path is resolved here, at the call site; the import pipeline
//! itself never consults configuration.

#![forbid(unsafe_code)]

use anyhow::Result;
use clap::{Parser, ValueEnum};
use recount_core::{AccountKind, DEFAULT_CURRENCY};
use recount_import::{ImportError, ImportReport, Importer, MemoryStore};
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

/// Output format for the import report.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// JSON output for tooling
    Json,
}

/// Reconcile a plain-text ledger file and report what was imported.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The ledger file to import
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Print per-account display balances after the import
    #[arg(short, long)]
    balances: bool,

    /// Output format (text or json)
    #[arg(long, short = 'f', value_enum, default_value = "text")]
    format: OutputFormat,

    /// Show verbose output including inferred amounts
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output (just use the exit code)
    #[arg(short, long)]
    quiet: bool,
}

/// One row of the balances table, display sign already applied.
#[derive(Debug, Serialize)]
struct BalanceLine {
    account: String,
    balance: Decimal,
    currency: String,
}

#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    report: &'a ImportReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    balances: Option<Vec<BalanceLine>>,
}

fn collect_balances(store: &MemoryStore) -> Vec<BalanceLine> {
    let mut accounts = store.account_rows().to_vec();
    accounts.sort_by(|a, b| a.full_path.cmp(&b.full_path));

    accounts
        .iter()
        .map(|account| {
            let (raw, currency) = store.balance(account.id).map_or_else(
                || (Decimal::ZERO, DEFAULT_CURRENCY.to_string()),
                |record| (record.balance, record.currency.clone()),
            );
            BalanceLine {
                balance: AccountKind::of_path(&account.full_path).display_balance(raw),
                account: account.full_path.clone(),
                currency,
            }
        })
        .collect()
}

fn print_balances(lines: &[BalanceLine], out: &mut impl Write) -> Result<()> {
    let width = lines
        .iter()
        .map(|line| line.account.len())
        .max()
        .unwrap_or(0);
    for line in lines {
        writeln!(
            out,
            "{:width$}  {:>14} {}",
            line.account,
            line.balance.to_string(),
            line.currency
        )?;
    }
    Ok(())
}

fn run(args: &Args) -> Result<ExitCode> {
    let mut stdout = io::stdout().lock();

    let mut importer = Importer::new(MemoryStore::new());
    let report = match importer.import_file(&args.file) {
        Ok(report) => report,
        Err(error @ ImportError::SourceUnavailable { .. }) => {
            if !args.quiet {
                eprintln!("error: {error}");
            }
            return Ok(ExitCode::from(1));
        }
        Err(error) => return Err(error.into()),
    };

    let store = importer.into_store();
    let balances = args.balances.then(|| collect_balances(&store));

    match args.format {
        OutputFormat::Json => {
            let output = JsonOutput {
                report: &report,
                balances,
            };
            writeln!(stdout, "{}", serde_json::to_string_pretty(&output)?)?;
        }
        OutputFormat::Text => {
            if !args.quiet {
                writeln!(
                    stdout,
                    "Imported {} of {} parsed transactions ({} skipped)",
                    report.imported, report.total_parsed, report.skipped
                )?;
                for skip in &report.skips {
                    writeln!(
                        stdout,
                        "  skipped {} \"{}\": {}",
                        skip.date, skip.payee, skip.reason
                    )?;
                }
                if let Some(balances) = &balances {
                    writeln!(stdout)?;
                    print_balances(balances, &mut stdout)?;
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.verbose {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .init();
    } else if !args.quiet {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::builder()
                    .with_default_directive(LevelFilter::WARN.into())
                    .from_env_lossy(),
            )
            .init();
    }

    match run(&args) {
        Ok(exit_code) => exit_code,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(2)
        }
    }
}
