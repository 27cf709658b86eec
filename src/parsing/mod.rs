//! Readers for tabular variant classification exports.
//!
//! This module provides:
//!
//! - **Delimited tables**: CSV/TSV files with one variant per row ([`table`])
//! - **Column resolution**: header → position mapping and a validated
//!   [`VariantSchema`](columns::VariantSchema) ([`columns`])
//!
//! ## Example
//!
//! ```rust,no_run
//! use consensus_reporter::parsing::columns::{resolve, VariantSchema};
//! use consensus_reporter::parsing::table::read_variant_table;
//! use std::path::Path;
//!
//! let table = read_variant_table(Path::new("consensus.csv"), b',').unwrap();
//! let columns = resolve(&table.header).unwrap();
//! let schema = VariantSchema::new(&columns, &["lab1", "lab2", "lab3"]).unwrap();
//! ```
//!
//! ## Expected Columns
//!
//! | Column           | Description | Required |
//! |------------------|-------------|----------|
//! | one per lab      | Free-text classification, empty if the lab made no call | Yes |
//! | `ref`            | Reference allele (`.` or `-` for empty) | Yes |
//! | `alt`            | Alternate allele (`.` or `-` for empty) | Yes |
//! | `classification` | Pre-computed combined status | No |
//!
//! Any other column is carried through to the public export unchanged.

pub mod columns;
pub mod table;
