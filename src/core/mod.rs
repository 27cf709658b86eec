//! Core data types for variant classification reconciliation.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`Classification`](classification::Classification): A lab's clinical significance call
//! - [`ClassificationTier`](classification::ClassificationTier): The three-tier reporting view
//! - [`VariantType`](types::VariantType): snp, ins, del or delins
//! - [`ConsensusStatus`](types::ConsensusStatus): Outcome of reconciling one variant
//!
//! ## Classification Vocabulary
//!
//! Labs export free text. Normalization maps it onto five calls, which are
//! collapsed into three tiers for publication:
//!
//! | Lab text              | Classification | Tier |
//! |-----------------------|----------------|------|
//! | Benign                | B              | LB   |
//! | Likely benign         | LB             | LB   |
//! | (Likely) benign       | LB             | LB   |
//! | VUS                   | VUS            | VUS  |
//! | Likely pathogenic     | LP             | LP   |
//! | Pathogenic            | P              | LP   |
//!
//! Benign-family and pathogenic-family calls are **opposite**; VUS is never
//! opposite to anything.

pub mod allele;
pub mod classification;
pub mod types;
