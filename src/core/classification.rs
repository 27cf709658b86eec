use serde::{Deserialize, Serialize};

/// Clinical significance call made by a single lab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Classification {
    /// Benign
    #[serde(rename = "B")]
    Benign,
    /// Likely benign
    #[serde(rename = "LB")]
    LikelyBenign,
    /// Variant of uncertain significance
    #[serde(rename = "VUS")]
    Vus,
    /// Likely pathogenic
    #[serde(rename = "LP")]
    LikelyPathogenic,
    /// Pathogenic
    #[serde(rename = "P")]
    Pathogenic,
}

/// Three-tier view of a classification used in published reports.
///
/// Benign and likely benign calls share the `LB` tier, pathogenic and likely
/// pathogenic calls share the `LP` tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ClassificationTier {
    #[serde(rename = "LB")]
    LikelyBenign,
    #[serde(rename = "VUS")]
    Vus,
    #[serde(rename = "LP")]
    LikelyPathogenic,
}

/// A keyword rule: every keyword must be present for the rule to match.
struct Rule {
    keywords: &'static [&'static str],
    classification: Classification,
}

/// Normalization rules, checked in order. Qualified terms come before their
/// unqualified forms so "likely benign" never falls through to "benign".
const RULES: &[Rule] = &[
    Rule {
        keywords: &["vus"],
        classification: Classification::Vus,
    },
    Rule {
        keywords: &["uncertain"],
        classification: Classification::Vus,
    },
    Rule {
        keywords: &["likely", "benign"],
        classification: Classification::LikelyBenign,
    },
    Rule {
        keywords: &["benign"],
        classification: Classification::Benign,
    },
    Rule {
        keywords: &["likely", "pathogenic"],
        classification: Classification::LikelyPathogenic,
    },
    Rule {
        keywords: &["pathogenic"],
        classification: Classification::Pathogenic,
    },
];

/// Terms that make a cell unusable as a single call
const NO_CALL_TERMS: &[&str] = &["conflicting", "unlikely"];

/// Family keywords; a cell naming more than one family is not a call
const FAMILY_TERMS: &[&[&str]] = &[&["benign"], &["pathogenic"], &["vus", "uncertain"]];

/// Normalize free-text lab classification to a canonical [`Classification`].
///
/// Matching is case-insensitive and keywords must start a word; parentheses,
/// underscores, hyphens, slashes, commas and semicolons separate words, so
/// `"Likely benign"`, `"(Likely) benign"` and `"likely_benign"` all resolve
/// to [`Classification::LikelyBenign`].
///
/// Returns `None` for empty or unrecognized text (no call), and for text that
/// reports a conflict: more than one family (`"Benign/Pathogenic"`), or a
/// term such as "conflicting" or "unlikely".
///
/// # Examples
///
/// ```
/// use consensus_reporter::core::classification::{normalize, Classification};
///
/// assert_eq!(normalize("(Likely) benign"), Some(Classification::LikelyBenign));
/// assert_eq!(normalize("Pathogenic"), Some(Classification::Pathogenic));
/// assert_eq!(normalize("vus"), Some(Classification::Vus));
/// assert_eq!(normalize("not provided"), None);
/// assert_eq!(normalize("Benign/Pathogenic"), None);
/// ```
#[must_use]
pub fn normalize(raw: &str) -> Option<Classification> {
    let cleaned = clean(raw);
    let words: Vec<&str> = cleaned.split(' ').filter(|w| !w.is_empty()).collect();
    if words.is_empty() {
        return None;
    }

    let has = |kw: &str| words.iter().any(|w| w.starts_with(kw));

    if NO_CALL_TERMS.iter().any(|&kw| has(kw)) {
        return None;
    }
    let families = FAMILY_TERMS
        .iter()
        .filter(|terms| terms.iter().any(|&kw| has(kw)))
        .count();
    if families > 1 {
        return None;
    }

    RULES
        .iter()
        .find(|rule| rule.keywords.iter().all(|&kw| has(kw)))
        .map(|rule| rule.classification)
}

/// Lower-case, drop qualifier punctuation and collapse whitespace
fn clean(raw: &str) -> String {
    let lowered: String = raw
        .chars()
        .map(|c| match c {
            '(' | ')' | '_' | '-' | '/' | ',' | ';' => ' ',
            c => c.to_ascii_lowercase(),
        })
        .collect();

    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl Classification {
    /// Short code used in reports (`B`, `LB`, `VUS`, `LP`, `P`)
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Benign => "B",
            Self::LikelyBenign => "LB",
            Self::Vus => "VUS",
            Self::LikelyPathogenic => "LP",
            Self::Pathogenic => "P",
        }
    }

    /// Collapse to the three-tier reporting vocabulary
    #[must_use]
    pub fn tier(&self) -> ClassificationTier {
        match self {
            Self::Benign | Self::LikelyBenign => ClassificationTier::LikelyBenign,
            Self::Vus => ClassificationTier::Vus,
            Self::LikelyPathogenic | Self::Pathogenic => ClassificationTier::LikelyPathogenic,
        }
    }

    #[must_use]
    pub fn is_benign(&self) -> bool {
        matches!(self, Self::Benign | Self::LikelyBenign)
    }

    #[must_use]
    pub fn is_pathogenic(&self) -> bool {
        matches!(self, Self::Pathogenic | Self::LikelyPathogenic)
    }

    /// Two calls are opposite when one is benign-family and the other is
    /// pathogenic-family. VUS is never opposite to anything.
    #[must_use]
    pub fn is_opposite_to(&self, other: &Classification) -> bool {
        (self.is_benign() && other.is_pathogenic()) || (self.is_pathogenic() && other.is_benign())
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl ClassificationTier {
    /// All tiers in report order
    pub const ALL: [ClassificationTier; 3] = [Self::LikelyBenign, Self::Vus, Self::LikelyPathogenic];

    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::LikelyBenign => "LB",
            Self::Vus => "VUS",
            Self::LikelyPathogenic => "LP",
        }
    }

    /// Label used in the public export
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::LikelyBenign => "(Likely) benign",
            Self::Vus => "VUS",
            Self::LikelyPathogenic => "(Likely) pathogenic",
        }
    }
}

impl std::fmt::Display for ClassificationTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
