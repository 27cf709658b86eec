use std::path::PathBuf;

use clap::Args;

use crate::cli::{OutputFormat, TableArgs};
use crate::consensus::reporter::{run as run_pipeline, ConsensusReport, ReportConfig, RowErrorPolicy};
use crate::core::types::ConsensusStatus;
use crate::report::{write_report, ArtifactPaths};
use crate::utils::date::current_month_and_year;

#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Prefix for every artifact file name
    #[arg(short, long, default_value = "consensus_")]
    pub prefix: String,

    /// Directory the artifacts are written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// What to do with rows that cannot be processed
    #[arg(long, value_enum, default_value = "skip")]
    pub on_error: RowErrorPolicy,

    /// Label for the opposites report, e.g. `october_2026` (defaults to the current month)
    #[arg(long)]
    pub month_year: Option<String>,
}

/// Execute report subcommand
///
/// # Errors
///
/// Returns an error if the table cannot be read, a row fails under
/// `--on-error abort`, or an artifact cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ReportArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let table = args.table.read()?;
    if verbose {
        eprintln!("Read {} variants from {}", table.len(), args.table.input.display());
    }

    let config = ReportConfig::new(&args.table.labs).with_policy(args.on_error);
    let report = run_pipeline(config, &table)?;

    let month_year = args
        .month_year
        .clone()
        .unwrap_or_else(current_month_and_year);
    let paths = ArtifactPaths::new(&args.output_dir, &args.prefix, &month_year)?;
    write_report(&report, &paths)?;

    match format {
        OutputFormat::Text => print_text_summary(&report, &paths, verbose),
        OutputFormat::Json => print_json_summary(&report, &paths)?,
        OutputFormat::Tsv => print_tsv_summary(&report),
    }

    Ok(())
}

fn print_text_summary(report: &ConsensusReport, paths: &ArtifactPaths, verbose: bool) {
    println!("Consensus Report");
    println!("{}", "=".repeat(60));
    println!("Labs:            {}", report.labs.join(", "));
    println!("Variants:        {}", report.rows_processed);
    if report.rows_without_calls > 0 {
        println!("Without calls:   {}", report.rows_without_calls);
    }
    if report.rows_skipped > 0 {
        println!("Skipped:         {}", report.rows_skipped);
    }

    println!("\nDecisions:");
    for status in ConsensusStatus::ALL {
        println!("  {:<26}{}", status.description(), report.status_count(status));
    }

    if !report.opposites.is_empty() {
        println!(
            "\n{} variants have opposite classifications and need review",
            report.opposites.len()
        );
    }

    if verbose && !report.anomalies.is_empty() {
        println!("\nAnomalies:");
        for anomaly in &report.anomalies {
            println!("  {anomaly}");
        }
    }

    println!("\nWritten:");
    for path in paths.all() {
        println!("  {}", path.display());
    }
}

fn print_json_summary(report: &ConsensusReport, paths: &ArtifactPaths) -> anyhow::Result<()> {
    let decisions: serde_json::Map<String, serde_json::Value> = ConsensusStatus::ALL
        .iter()
        .map(|status| (status.as_str().to_string(), report.status_count(*status).into()))
        .collect();

    let output = serde_json::json!({
        "labs": report.labs,
        "rows_processed": report.rows_processed,
        "rows_without_calls": report.rows_without_calls,
        "rows_skipped": report.rows_skipped,
        "decisions": decisions,
        "types": report.types,
        "classifications": report.classifications,
        "anomalies": report.anomalies,
        "artifacts": paths.all().iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_summary(report: &ConsensusReport) {
    println!("status\tcount");
    for status in ConsensusStatus::ALL {
        println!("{}\t{}", status.as_str(), report.status_count(status));
    }
}
