//! Command implementations for the tabrecon CLI

use crate::cli::{Commands, OutputFormat};
use crate::compare::{compare, ComparisonSummary, ReconcileStatus};
use crate::error::{Result, TabreconError};
use crate::ingest;
use crate::output::{JsonFormatter, PrettyPrinter};
use crate::report;
use log::warn;
use std::path::Path;

/// Execute a command
pub fn execute_command(command: Commands) -> Result<()> {
    match command {
        Commands::Compare {
            before,
            after,
            format,
            output,
            diff_only,
        } => compare_command(&before, &after, &format, output.as_deref(), diff_only),
        Commands::Parse {
            input,
            format,
            limit,
        } => parse_command(&input, &format, limit),
    }
}

/// Compare two report files
fn compare_command(
    before: &Path,
    after: &Path,
    format: &str,
    output: Option<&Path>,
    diff_only: bool,
) -> Result<()> {
    let output_format = OutputFormat::parse(format).map_err(|e| TabreconError::invalid_input(e))?;

    let before_inventory = ingest::load_inventory(before)?;
    let after_inventory = ingest::load_inventory(after)?;

    // Zero entries is a valid (degenerate) input, not an error
    if before_inventory.is_empty() {
        warn!("no tables parsed from '{}'", before.display());
    }
    if after_inventory.is_empty() {
        warn!("no tables parsed from '{}'", after.display());
    }

    let rows = compare(&before_inventory, &after_inventory);

    match output_format {
        OutputFormat::Pretty => {
            let summary = ComparisonSummary::from_rows(&rows);
            PrettyPrinter::print_summary(&summary);
            println!();
            if diff_only {
                let differences: Vec<_> = rows
                    .iter()
                    .filter(|r| r.status != ReconcileStatus::Match)
                    .cloned()
                    .collect();
                if differences.is_empty() {
                    println!("All tables match - no differences found.");
                } else {
                    PrettyPrinter::print_rows(&differences);
                }
            } else {
                PrettyPrinter::print_rows(&rows);
            }
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::format_comparison(&rows)?);
        }
    }

    if let Some(path) = output {
        report::export(&rows, path)?;
        println!("\n💾 Report saved to: {}", path.display());
    }

    Ok(())
}

/// Parse one report file and show the extracted inventory
fn parse_command(input: &Path, format: &str, limit: usize) -> Result<()> {
    let output_format = OutputFormat::parse(format).map_err(|e| TabreconError::invalid_input(e))?;

    let inventory = ingest::load_inventory(input)?;

    match output_format {
        OutputFormat::Pretty => PrettyPrinter::print_inventory(&inventory, limit),
        OutputFormat::Json => println!("{}", JsonFormatter::format_inventory(&inventory)?),
    }

    Ok(())
}
