use serde::Serialize;
use thiserror::Error;

use crate::core::classification::{normalize, Classification, ClassificationTier};
use crate::core::types::ConsensusStatus;
use crate::parsing::columns::VariantSchema;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Expected {expected} lab call(s), found {found}")]
    InvalidCallCount { expected: &'static str, found: usize },
}

/// One lab's call on a variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabCall {
    pub lab: String,

    /// Cell text as exported by the lab
    pub raw: String,

    /// `None` when the text is not a recognized classification
    pub classification: Option<Classification>,
}

/// Reconciled outcome for one variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsensusDecision {
    pub status: ConsensusStatus,

    /// Agreed tier for single-lab and consensus decisions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<ClassificationTier>,

    /// Calls the decision was computed from, in configured lab order
    pub calls: Vec<LabCall>,
}

impl ConsensusDecision {
    /// Whether the variant may be published. Opposites are held back for review.
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.status != ConsensusStatus::Opposite
    }

    /// Call made by `lab`, if any
    #[must_use]
    pub fn call_for(&self, lab: &str) -> Option<&LabCall> {
        self.calls.iter().find(|call| call.lab == lab)
    }
}

/// Raw classification of the only lab that called this variant.
///
/// Callers must check [`VariantSchema::call_count`] first; this is only
/// meaningful for variants classified by exactly one lab.
///
/// # Errors
///
/// Returns `ResolveError::InvalidCallCount` unless exactly one lab cell is non-empty.
pub fn get_single_lab_classification<'r, S: AsRef<str>>(
    row: &'r [S],
    schema: &VariantSchema,
) -> Result<&'r str, ResolveError> {
    let mut calls = schema
        .labs
        .iter()
        .map(|lab| VariantSchema::field(row, lab.index))
        .filter(|raw| !raw.is_empty());

    match (calls.next(), calls.count()) {
        (Some(raw), 0) => Ok(raw),
        (first, rest) => Err(ResolveError::InvalidCallCount {
            expected: "exactly 1",
            found: usize::from(first.is_some()) + rest,
        }),
    }
}

/// Reconcile every lab call on a variant row.
///
/// - one call: [`ConsensusStatus::SingleLab`]
/// - a benign-family call alongside a pathogenic-family call: [`ConsensusStatus::Opposite`]
/// - all calls in the same tier (including all VUS): [`ConsensusStatus::Consensus`]
/// - anything else, such as VUS next to a benign call or an unrecognized
///   call: [`ConsensusStatus::Ambiguous`]
///
/// # Errors
///
/// Returns `ResolveError::InvalidCallCount` if no lab called the variant.
pub fn resolve_consensus<S: AsRef<str>>(
    row: &[S],
    schema: &VariantSchema,
) -> Result<ConsensusDecision, ResolveError> {
    let calls: Vec<LabCall> = schema
        .lab_calls(row)
        .map(|(lab, raw)| LabCall {
            lab: lab.to_string(),
            raw: raw.to_string(),
            classification: normalize(raw),
        })
        .collect();

    let (status, classification) = decide(&calls)?;

    Ok(ConsensusDecision {
        status,
        classification,
        calls,
    })
}

fn decide(
    calls: &[LabCall],
) -> Result<(ConsensusStatus, Option<ClassificationTier>), ResolveError> {
    let classifications: Vec<Classification> =
        calls.iter().filter_map(|call| call.classification).collect();

    match calls {
        [] => Err(ResolveError::InvalidCallCount {
            expected: "at least 1",
            found: 0,
        }),
        [only] => Ok((
            ConsensusStatus::SingleLab,
            only.classification.map(|c| c.tier()),
        )),
        _ => {
            let opposite = classifications.iter().enumerate().any(|(i, a)| {
                classifications[i + 1..]
                    .iter()
                    .any(|b| a.is_opposite_to(b))
            });
            if opposite {
                return Ok((ConsensusStatus::Opposite, None));
            }

            if classifications.len() < calls.len() {
                return Ok((ConsensusStatus::Ambiguous, None));
            }

            let first = classifications[0].tier();
            if classifications.iter().all(|c| c.tier() == first) {
                Ok((ConsensusStatus::Consensus, Some(first)))
            } else {
                Ok((ConsensusStatus::Ambiguous, None))
            }
        }
    }
}
