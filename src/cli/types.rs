use clap::Args;

use crate::cli::{OutputFormat, TableArgs};
use crate::consensus::reporter::{run as run_pipeline, ReportConfig, RowErrorPolicy};
use crate::consensus::tally::TypeTally;
use crate::core::types::VariantType;

#[derive(Args)]
pub struct TypesArgs {
    #[command(flatten)]
    pub table: TableArgs,
}

/// Execute types subcommand
///
/// # Errors
///
/// Returns an error if the table cannot be read or lacks a configured column.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: TypesArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let table = args.table.read()?;
    if verbose {
        eprintln!("Read {} variants from {}", table.len(), args.table.input.display());
    }

    let config = ReportConfig::new(&args.table.labs).with_policy(RowErrorPolicy::Skip);
    let report = run_pipeline(config, &table)?;

    if verbose && report.rows_skipped > 0 {
        eprintln!("Skipped {} rows", report.rows_skipped);
    }

    match format {
        OutputFormat::Text => print_text_types(&report.types),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report.types)?),
        OutputFormat::Tsv => print_tsv_types(&report.types),
    }

    Ok(())
}

fn print_text_types(types: &TypeTally) {
    println!("Variant Types");
    println!("{}", "=".repeat(60));

    for lab in types.labs() {
        println!("\n{lab}: {} variants", types.lab_total(lab));
        for vt in VariantType::ALL {
            println!("  {:<8}{}", vt.as_str(), types.count(lab, vt));
        }
    }
}

fn print_tsv_types(types: &TypeTally) {
    println!("lab\tsnp\tins\tdel\tdelins");
    for lab in types.labs() {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            lab,
            types.count(lab, VariantType::Snp),
            types.count(lab, VariantType::Ins),
            types.count(lab, VariantType::Del),
            types.count(lab, VariantType::Delins),
        );
    }
}
