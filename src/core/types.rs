use serde::{Deserialize, Serialize};

/// Structural type of a variant, derived from its reference and alternate alleles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantType {
    /// Single-nucleotide substitution
    Snp,
    /// Insertion
    Ins,
    /// Deletion
    Del,
    /// Complex deletion-insertion
    Delins,
}

impl VariantType {
    /// All variant types in report order
    pub const ALL: [VariantType; 4] = [Self::Snp, Self::Ins, Self::Del, Self::Delins];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Snp => "snp",
            Self::Ins => "ins",
            Self::Del => "del",
            Self::Delins => "delins",
        }
    }
}

impl std::fmt::Display for VariantType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of reconciling all lab calls for one variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsensusStatus {
    /// Exactly one lab classified the variant
    SingleLab,
    /// Several labs classified the variant into the same tier
    Consensus,
    /// Benign-family and pathogenic-family calls for the same variant
    Opposite,
    /// Several labs called the variant but no consensus was reached
    /// (VUS mixed with another family, or an unrecognized call)
    Ambiguous,
}

impl ConsensusStatus {
    /// All statuses in report order
    pub const ALL: [ConsensusStatus; 4] = [
        Self::SingleLab,
        Self::Consensus,
        Self::Opposite,
        Self::Ambiguous,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SingleLab => "single_lab",
            Self::Consensus => "consensus",
            Self::Opposite => "opposite",
            Self::Ambiguous => "ambiguous",
        }
    }

    /// Human-readable description used in reports
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::SingleLab => "Classified by one lab",
            Self::Consensus => "Consensus",
            Self::Opposite => "Opposite classifications",
            Self::Ambiguous => "No consensus",
        }
    }
}

impl std::fmt::Display for ConsensusStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
