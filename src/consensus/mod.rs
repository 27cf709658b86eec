//! Consensus computation over lab classification tables.
//!
//! This module provides the core reconciliation functionality:
//!
//! - [`TypeTally`](tally::TypeTally): Per-lab, per-variant-type counters
//! - [`resolve_consensus`](resolver::resolve_consensus): Decision for one variant
//! - [`ConsensusReporter`](reporter::ConsensusReporter): Drives the row pipeline
//!
//! ## Pipeline
//!
//! Each row is processed to completion before the next one:
//!
//! 1. **Normalize**: every lab cell is mapped to a classification
//! 2. **Classify type**: `ref`/`alt` give snp, ins, del or delins
//! 3. **Tally**: every lab that called the variant gets one count for that type
//! 4. **Resolve**: single lab, consensus, opposite or ambiguous
//!
//! ## Decisions
//!
//! | Calls | Families present | Decision |
//! |-------|------------------|----------|
//! | 1     | any              | single lab |
//! | > 1   | one tier only    | consensus |
//! | > 1   | benign and pathogenic | opposite |
//! | > 1   | VUS and one other family | ambiguous |
//!
//! ## Example
//!
//! ```rust
//! use consensus_reporter::consensus::reporter::{ConsensusReporter, ReportConfig};
//! use consensus_reporter::{ConsensusStatus, VariantType};
//!
//! let config = ReportConfig::new(&["lab1", "lab2"]);
//! let mut reporter = ConsensusReporter::new(config, &["lab1", "lab2", "ref", "alt"]).unwrap();
//! reporter.process_row(2, &["Likely benign", "Pathogenic", "A", "G"]).unwrap();
//!
//! let report = reporter.finish();
//! assert_eq!(report.status_count(ConsensusStatus::Opposite), 1);
//! assert_eq!(report.types.count("lab2", VariantType::Snp), 1);
//! ```

pub mod reporter;
pub mod resolver;
pub mod tally;

pub use reporter::{ConsensusReport, ConsensusReporter, ReportConfig, RowErrorPolicy};
pub use resolver::{get_single_lab_classification, resolve_consensus, ConsensusDecision};
pub use tally::{ClassificationTally, TypeTally};
