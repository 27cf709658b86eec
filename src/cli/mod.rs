//! Command-line interface for consensus-reporter.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **report**: Reconcile a lab classification table and write all report artifacts
//! - **types**: Print per-lab variant type counts for a table
//! - **normalize**: Show how classification text is normalized
//!
//! ## Usage
//!
//! ```text
//! # Full consensus report for three labs
//! consensus-reporter report consensus.csv --labs amc,erasmus,umcg --prefix vkgl_
//!
//! # Stop on the first malformed row instead of skipping it
//! consensus-reporter report consensus.csv --labs amc,umcg --on-error abort
//!
//! # Type counts as JSON
//! consensus-reporter types consensus.tsv --labs amc,umcg --format json
//!
//! # Check normalization
//! consensus-reporter normalize "(Likely) benign" "Pathogenic"
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::parsing::table::{read_variant_table, VariantTable};

pub mod normalize;
pub mod report;
pub mod types;

#[derive(Parser)]
#[command(name = "consensus-reporter")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Reconcile variant classifications from multiple diagnostic labs")]
#[command(
    long_about = "consensus-reporter compares the classifications that several diagnostic labs made for the same variants.\n\nFor every variant it decides whether:\n- Only one lab classified it\n- The labs agree (consensus)\n- The labs disagree on benign vs. pathogenic (opposite, needs manual review)\n- The labs disagree otherwise (no consensus)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reconcile lab classifications and write report artifacts
    Report(report::ReportArgs),

    /// Count variant types per lab
    Types(types::TypesArgs),

    /// Normalize classification text
    Normalize(normalize::NormalizeArgs),
}

/// Input table and lab columns shared by commands that read a table
#[derive(clap::Args)]
pub struct TableArgs {
    /// Input table (CSV or TSV) with one column per lab plus `ref` and `alt`
    #[arg(required = true)]
    pub input: PathBuf,

    /// Lab columns, comma separated, in report order
    #[arg(short, long, required = true, value_delimiter = ',')]
    pub labs: Vec<String>,

    /// Field delimiter (detected from the file extension by default)
    #[arg(long)]
    pub delimiter: Option<char>,
}

impl TableArgs {
    /// Read the input table
    ///
    /// # Errors
    ///
    /// Returns an error if the delimiter is not a single-byte character or
    /// the table cannot be read.
    pub fn read(&self) -> anyhow::Result<VariantTable> {
        let delimiter = match self.delimiter {
            Some(c) => parse_delimiter(c)?,
            None => detect_delimiter(&self.input),
        };
        Ok(read_variant_table(&self.input, delimiter)?)
    }
}

/// Explicit delimiters must be ASCII; the reader splits on raw bytes
fn parse_delimiter(c: char) -> anyhow::Result<u8> {
    if !c.is_ascii() {
        anyhow::bail!("Delimiter must be an ASCII character, got '{c}'");
    }
    Ok(c as u8)
}

/// Tab for `.tsv`/`.txt`, comma otherwise
fn detect_delimiter(path: &Path) -> u8 {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match ext.as_deref() {
        Some("tsv" | "txt") => b'\t',
        _ => b',',
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
