use clap::Args;

use crate::cli::OutputFormat;
use crate::core::classification::normalize;

#[derive(Args)]
pub struct NormalizeArgs {
    /// Classification text as exported by a lab
    #[arg(required = true)]
    pub text: Vec<String>,
}

/// Execute normalize subcommand
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: NormalizeArgs, format: OutputFormat, _verbose: bool) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for text in &args.text {
                match normalize(text) {
                    Some(c) => println!("{text}: {c} (tier {})", c.tier()),
                    None => println!("{text}: no call"),
                }
            }
        }
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = args
                .text
                .iter()
                .map(|text| {
                    let classification = normalize(text);
                    serde_json::json!({
                        "input": text,
                        "classification": classification,
                        "tier": classification.map(|c| c.tier()),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("input\tclassification\ttier");
            for text in &args.text {
                let classification = normalize(text);
                println!(
                    "{}\t{}\t{}",
                    text,
                    classification.map_or("", |c| c.code()),
                    classification.map_or("", |c| c.tier().code()),
                );
            }
        }
    }

    Ok(())
}
