//! # consensus-reporter
//!
//! A library for reconciling the variant classifications of multiple
//! diagnostic labs.
//!
//! Labs that share their variant classifications export them in one table:
//! one row per variant with its reference and alternate alleles, and one
//! column per lab holding that lab's call. Calls are written in whatever form
//! the lab's system produces ("Likely pathogenic", "(Likely) benign", "VUS",
//! "Uncertain significance", ...), so they are first normalized to a fixed
//! vocabulary before being compared.
//!
//! `consensus-reporter` then decides for every variant whether it was
//! classified by one lab only, whether the labs agree, whether they
//! disagree on benign vs. pathogenic, or whether they simply lack consensus.
//!
//! ## Features
//!
//! - **Classification normalization**: Maps free-text calls to B/LB/VUS/LP/P
//! - **Variant typing**: Classifies alleles as snp, ins, del or delins
//! - **Per-lab tallies**: Counts variant types and classification tiers per lab
//! - **Consensus resolution**: Detects opposite calls that need manual review
//! - **Report artifacts**: Writes opposites, public, delins, type, count and log files
//!
//! ## Example
//!
//! ```rust
//! use consensus_reporter::{ConsensusReporter, ConsensusStatus, ReportConfig};
//!
//! let config = ReportConfig::new(&["amc", "umcg"]);
//! let header = ["chrom", "pos", "ref", "alt", "amc", "umcg"];
//! let mut reporter = ConsensusReporter::new(config, &header).unwrap();
//!
//! reporter
//!     .process_row(2, &["1", "100", "A", "G", "Benign", "Pathogenic"])
//!     .unwrap();
//!
//! let report = reporter.finish();
//! assert_eq!(report.status_count(ConsensusStatus::Opposite), 1);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Classification vocabulary, variant types and allele typing
//! - [`parsing`]: Table reading and column resolution
//! - [`consensus`]: Tallies, consensus resolution and the report pipeline
//! - [`report`]: Writers for the report artifacts
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod consensus;
pub mod core;
pub mod parsing;
pub mod report;
pub mod utils;

// Re-export commonly used types for convenience
pub use consensus::reporter::{ConsensusReport, ConsensusReporter, ReportConfig, RowErrorPolicy};
pub use consensus::resolver::{get_single_lab_classification, resolve_consensus, ConsensusDecision};
pub use consensus::tally::{ClassificationTally, LabTally, TypeTally};
pub use core::allele::classify_type;
pub use core::classification::{normalize, Classification, ClassificationTier};
pub use core::types::*;
pub use parsing::columns::{resolve, ColumnMap, VariantSchema};
pub use parsing::table::{read_variant_table, VariantRow, VariantTable};
