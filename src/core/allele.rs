//! Variant type classification from reference/alternate alleles.

use thiserror::Error;

use crate::core::types::VariantType;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlleleError {
    #[error("Invalid {field} allele: '{value}'")]
    InvalidAllele { field: &'static str, value: String },

    #[error("Reference '{reference}' and alternate '{alternate}' describe no change")]
    NoChange { reference: String, alternate: String },
}

/// Placeholders some lab exports use for an empty allele
const EMPTY_ALLELES: [&str; 2] = [".", "-"];

/// Classify a variant by comparing its reference and alternate alleles.
///
/// The shared prefix is trimmed first, then the shared suffix of what remains.
/// The leftover alleles decide the type:
///
/// | reference | alternate | type   |
/// |-----------|-----------|--------|
/// | 1 base    | 1 base    | snp    |
/// | empty     | non-empty | ins    |
/// | non-empty | empty     | del    |
/// | otherwise |           | delins |
///
/// `.` and `-` are read as empty alleles.
///
/// # Errors
///
/// Returns `AlleleError::InvalidAllele` if an allele is blank or contains
/// anything other than IUPAC nucleotide codes, or `AlleleError::NoChange` if
/// the alleles are identical.
///
/// # Examples
///
/// ```
/// use consensus_reporter::core::allele::classify_type;
/// use consensus_reporter::VariantType;
///
/// assert_eq!(classify_type("GAGA", "GAGG").unwrap(), VariantType::Snp);
/// assert_eq!(classify_type(".", "G").unwrap(), VariantType::Ins);
/// assert_eq!(classify_type("CACAC", "ACAC").unwrap(), VariantType::Del);
/// assert_eq!(classify_type("GAGA", "AGCG").unwrap(), VariantType::Delins);
/// ```
pub fn classify_type(reference: &str, alternate: &str) -> Result<VariantType, AlleleError> {
    let ref_bases = parse_allele("reference", reference)?;
    let alt_bases = parse_allele("alternate", alternate)?;

    let (ref_core, alt_core) = trim_shared(&ref_bases, &alt_bases);

    match (ref_core.len(), alt_core.len()) {
        (0, 0) => Err(AlleleError::NoChange {
            reference: reference.to_string(),
            alternate: alternate.to_string(),
        }),
        (1, 1) => Ok(VariantType::Snp),
        (0, _) => Ok(VariantType::Ins),
        (_, 0) => Ok(VariantType::Del),
        _ => Ok(VariantType::Delins),
    }
}

/// Validate an allele and return its upper-cased bases
fn parse_allele(field: &'static str, value: &str) -> Result<Vec<u8>, AlleleError> {
    let trimmed = value.trim();
    if EMPTY_ALLELES.contains(&trimmed) {
        return Ok(Vec::new());
    }

    if trimmed.is_empty() || !trimmed.bytes().all(is_iupac_base) {
        return Err(AlleleError::InvalidAllele {
            field,
            value: value.to_string(),
        });
    }

    Ok(trimmed.bytes().map(|b| b.to_ascii_uppercase()).collect())
}

fn is_iupac_base(b: u8) -> bool {
    matches!(
        b.to_ascii_uppercase(),
        b'A' | b'C'
            | b'G'
            | b'T'
            | b'U'
            | b'N'
            | b'R'
            | b'Y'
            | b'S'
            | b'W'
            | b'K'
            | b'M'
            | b'B'
            | b'D'
            | b'H'
            | b'V'
    )
}

/// Strip the common prefix, then the common suffix of the remainder
fn trim_shared<'a>(reference: &'a [u8], alternate: &'a [u8]) -> (&'a [u8], &'a [u8]) {
    let prefix = reference
        .iter()
        .zip(alternate)
        .take_while(|(r, a)| r == a)
        .count();
    let (reference, alternate) = (&reference[prefix..], &alternate[prefix..]);

    let suffix = reference
        .iter()
        .rev()
        .zip(alternate.iter().rev())
        .take_while(|(r, a)| r == a)
        .count();

    (
        &reference[..reference.len() - suffix],
        &alternate[..alternate.len() - suffix],
    )
}
