//! Property-based tests for variant typing and tallying
//!
//! Covers the allele rules on generated sequences and checks that tallies are
//! deterministic and can be built in shards and merged.

use consensus_reporter::{
    classify_type, normalize, ClassificationTier, ConsensusReport, ConsensusReporter,
    ConsensusStatus, ReportConfig, VariantType,
};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

const LABS: [&str; 3] = ["lab1", "lab2", "lab3"];
const HEADER: [&str; 5] = ["lab1", "lab2", "lab3", "ref", "alt"];

// =============================================================================
// Strategies
// =============================================================================

fn nucleotide() -> impl Strategy<Value = char> {
    prop_oneof![Just('A'), Just('C'), Just('G'), Just('T'),]
}

fn sequence(max: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(nucleotide(), 1..=max).prop_map(|bases| bases.into_iter().collect())
}

/// A lab cell: no call, a recognized call, or text no lab vocabulary matches
fn lab_cell() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        3 => Just(""),
        1 => Just("Benign"),
        1 => Just("Likely benign"),
        1 => Just("(Likely) benign"),
        1 => Just("VUS"),
        1 => Just("Likely pathogenic"),
        1 => Just("Pathogenic"),
        1 => Just("conflicting"),
    ]
}

/// A row with three lab cells and two distinct, valid alleles
fn variant_row() -> impl Strategy<Value = Vec<String>> {
    (
        prop::collection::vec(lab_cell(), 3),
        sequence(6),
        sequence(6),
    )
        .prop_filter("alleles must differ", |(_, r, a)| r != a)
        .prop_map(|(cells, reference, alternate)| {
            let mut row: Vec<String> = cells.into_iter().map(str::to_string).collect();
            row.push(reference);
            row.push(alternate);
            row
        })
}

fn tally(rows: &[Vec<String>]) -> ConsensusReport {
    let mut reporter = ConsensusReporter::new(ReportConfig::new(&LABS), &HEADER).unwrap();
    for (i, row) in rows.iter().enumerate() {
        reporter.process_row(i as u64 + 2, row).unwrap();
    }
    reporter.finish()
}

// =============================================================================
// Property tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Equal-length alleles differing at one position are an snp
    #[test]
    fn test_single_substitution_is_snp(
        reference in sequence(20),
        pos in any::<prop::sample::Index>(),
        base in nucleotide(),
    ) {
        let i = pos.index(reference.len());
        prop_assume!(reference.as_bytes()[i] != base as u8);

        let mut alternate = reference.clone();
        alternate.replace_range(i..=i, &base.to_string());
        prop_assert_eq!(classify_type(&reference, &alternate).unwrap(), VariantType::Snp);
    }

    /// Inserting a block anywhere yields ins; removing it again yields del
    #[test]
    fn test_block_insertion_and_deletion(
        reference in sequence(20),
        pos in any::<prop::sample::Index>(),
        block in sequence(5),
    ) {
        let i = pos.index(reference.len() + 1);
        let mut alternate = reference.clone();
        alternate.insert_str(i, &block);

        prop_assert_eq!(classify_type(&reference, &alternate).unwrap(), VariantType::Ins);
        prop_assert_eq!(classify_type(&alternate, &reference).unwrap(), VariantType::Del);
    }

    /// Allele case does not change the type
    #[test]
    fn test_type_ignores_case(reference in sequence(8), alternate in sequence(8)) {
        prop_assume!(reference != alternate);
        prop_assert_eq!(
            classify_type(&reference, &alternate).unwrap(),
            classify_type(&reference.to_lowercase(), &alternate.to_lowercase()).unwrap()
        );
    }

    /// Qualified calls normalize to the same tier whatever their case
    #[test]
    fn test_normalize_ignores_case(
        text in prop_oneof![
            Just("Likely benign"),
            Just("(Likely) benign"),
            Just("Likely pathogenic"),
            Just("(Likely) pathogenic"),
            Just("VUS"),
        ],
        mask in prop::collection::vec(any::<bool>(), 20),
    ) {
        let mixed: String = text
            .chars()
            .zip(mask.iter().cycle())
            .map(|(c, &upper)| if upper { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
            .collect();

        let tier = normalize(text).map(|c| c.tier());
        prop_assert!(matches!(
            tier,
            Some(ClassificationTier::LikelyBenign | ClassificationTier::Vus | ClassificationTier::LikelyPathogenic)
        ));
        prop_assert_eq!(tier, normalize(&text.to_uppercase()).map(|c| c.tier()));
        prop_assert_eq!(tier, normalize(&text.to_lowercase()).map(|c| c.tier()));
        prop_assert_eq!(tier, normalize(&mixed).map(|c| c.tier()));
    }

    /// Each non-empty lab cell adds exactly one to that lab's type total
    #[test]
    fn test_one_count_per_call(rows in prop::collection::vec(variant_row(), 0..40)) {
        let report = tally(&rows);

        for (i, lab) in LABS.iter().enumerate() {
            let calls = rows.iter().filter(|row| !row[i].is_empty()).count() as u64;
            prop_assert_eq!(report.types.lab_total(lab), calls);
        }
    }

    /// Every called row gets exactly one decision
    #[test]
    fn test_one_decision_per_row(rows in prop::collection::vec(variant_row(), 0..40)) {
        let report = tally(&rows);

        let called = rows
            .iter()
            .filter(|row| row[..LABS.len()].iter().any(|cell| !cell.is_empty()))
            .count();
        let decided: u64 = ConsensusStatus::ALL.iter().map(|s| report.status_count(*s)).sum();

        prop_assert_eq!(report.rows_processed, called);
        prop_assert_eq!(decided, called as u64);
        prop_assert_eq!(report.public.len() + report.opposites.len(), called);
    }

    /// Tallying the same rows twice gives the same result
    #[test]
    fn test_determinism(rows in prop::collection::vec(variant_row(), 0..40)) {
        let first = tally(&rows);
        let second = tally(&rows);

        prop_assert_eq!(first.types, second.types);
        prop_assert_eq!(first.classifications, second.classifications);
        prop_assert_eq!(first.status_counts, second.status_counts);
    }

    /// Tallies of two shards merge into the tally of the whole
    #[test]
    fn test_merge_is_additive(
        rows in prop::collection::vec(variant_row(), 0..40),
        split in any::<prop::sample::Index>(),
    ) {
        let at = split.index(rows.len() + 1);
        let (left, right) = rows.split_at(at);
        let whole = tally(&rows);

        let mut types = tally(left).types;
        types.merge(&tally(right).types);
        prop_assert_eq!(&types, &whole.types);

        let mut reversed = tally(right).classifications;
        reversed.merge(&tally(left).classifications);
        prop_assert_eq!(&reversed, &whole.classifications);
    }
}
