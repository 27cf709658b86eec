use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::allele::{classify_type, AlleleError};
use crate::core::classification::{normalize, ClassificationTier};
use crate::core::types::VariantType;
use crate::parsing::columns::VariantSchema;

/// Per-lab counters keyed by a category (variant type, classification tier, ...).
///
/// Counters only ever go up. Every lab passed to [`LabTally::new`] starts with
/// a zero counter for each category in `categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabTally<K: Ord> {
    /// Labs in configured order
    labs: Vec<String>,

    counts: BTreeMap<String, BTreeMap<K, u64>>,
}

/// Per-lab, per-variant-type counters
pub type TypeTally = LabTally<VariantType>;

/// Per-lab, per-classification-tier counters
pub type ClassificationTally = LabTally<ClassificationTier>;

impl<K: Ord + Copy> LabTally<K> {
    pub fn new<S: AsRef<str>>(labs: &[S], categories: &[K]) -> Self {
        let mut tally = Self {
            labs: Vec::with_capacity(labs.len()),
            counts: BTreeMap::new(),
        };
        for lab in labs {
            tally.ensure_lab(lab.as_ref(), categories);
        }
        tally
    }

    fn ensure_lab(&mut self, lab: &str, categories: &[K]) -> &mut BTreeMap<K, u64> {
        if !self.counts.contains_key(lab) {
            self.labs.push(lab.to_string());
        }
        self.counts
            .entry(lab.to_string())
            .or_insert_with(|| categories.iter().map(|&k| (k, 0)).collect())
    }

    fn increment(&mut self, lab: &str, key: K) {
        *self.ensure_lab(lab, &[]).entry(key).or_insert(0) += 1;
    }

    /// Counter for one lab and category; unknown labs read as zero
    #[must_use]
    pub fn count(&self, lab: &str, key: K) -> u64 {
        self.counts
            .get(lab)
            .and_then(|by_key| by_key.get(&key))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of one category across all labs
    #[must_use]
    pub fn total(&self, key: K) -> u64 {
        self.counts
            .values()
            .filter_map(|by_key| by_key.get(&key))
            .sum()
    }

    /// Sum of all categories for one lab
    #[must_use]
    pub fn lab_total(&self, lab: &str) -> u64 {
        self.counts
            .get(lab)
            .map_or(0, |by_key| by_key.values().sum())
    }

    #[must_use]
    pub fn labs(&self) -> &[String] {
        &self.labs
    }

    /// Add every counter of `other` into this tally.
    ///
    /// Merging is commutative and associative, so tallies built by separate
    /// workers over disjoint rows can be combined in any order.
    pub fn merge(&mut self, other: &Self) {
        for lab in &other.labs {
            let Some(theirs) = other.counts.get(lab) else {
                continue;
            };
            let ours = self.ensure_lab(lab, &[]);
            for (&key, &n) in theirs {
                *ours.entry(key).or_insert(0) += n;
            }
        }
    }
}

impl LabTally<VariantType> {
    /// Empty type tally with a zero counter for every lab and variant type
    pub fn for_labs<S: AsRef<str>>(labs: &[S]) -> Self {
        Self::new(labs, &VariantType::ALL)
    }

    /// Tally one variant row.
    ///
    /// The variant type is computed once from the row's `ref`/`alt` fields,
    /// then the counter for that type is incremented for every lab whose cell
    /// is non-empty. Rows no lab called are ignored and return `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns the `AlleleError` for malformed alleles. The tally is left
    /// untouched in that case.
    pub fn count_type<S: AsRef<str>>(
        &mut self,
        row: &[S],
        schema: &VariantSchema,
    ) -> Result<Option<VariantType>, AlleleError> {
        let callers: Vec<&str> = schema.lab_calls(row).map(|(lab, _)| lab).collect();
        if callers.is_empty() {
            return Ok(None);
        }

        let variant_type = classify_type(schema.reference(row), schema.alternate(row))?;
        for lab in callers {
            self.increment(lab, variant_type);
        }

        Ok(Some(variant_type))
    }
}

impl LabTally<ClassificationTier> {
    /// Empty tier tally with a zero counter for every lab and tier
    pub fn for_labs<S: AsRef<str>>(labs: &[S]) -> Self {
        Self::new(labs, &ClassificationTier::ALL)
    }

    /// Tally the tier of every recognizable lab call on a row.
    ///
    /// Returns the labs whose non-empty cell did not normalize to a classification.
    pub fn count_calls<'s, S: AsRef<str>>(
        &mut self,
        row: &[S],
        schema: &'s VariantSchema,
    ) -> Vec<&'s str> {
        let mut unrecognized = Vec::new();
        for lab in &schema.labs {
            let raw = VariantSchema::field(row, lab.index);
            if raw.is_empty() {
                continue;
            }
            match normalize(raw) {
                Some(classification) => self.increment(&lab.name, classification.tier()),
                None => unrecognized.push(lab.name.as_str()),
            }
        }
        unrecognized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::columns::resolve;

    const LABS: [&str; 3] = ["lab1", "lab2", "lab3"];

    fn schema() -> VariantSchema {
        let columns = resolve(&["lab1", "lab2", "lab3", "ref", "alt"]).unwrap();
        VariantSchema::new(&columns, &LABS).unwrap()
    }

    #[test]
    fn test_new_tally_is_zeroed() {
        let tally = TypeTally::for_labs(&LABS);
        for lab in LABS {
            for vt in VariantType::ALL {
                assert_eq!(tally.count(lab, vt), 0);
            }
        }
        assert_eq!(tally.labs(), LABS);
    }

    #[test]
    fn test_count_type_only_calling_labs() {
        let schema = schema();
        let mut tally = TypeTally::for_labs(&LABS);

        let vt = tally
            .count_type(&["Benign", "", "VUS", "A", "G"], &schema)
            .unwrap();
        assert_eq!(vt, Some(VariantType::Snp));
        assert_eq!(tally.count("lab1", VariantType::Snp), 1);
        assert_eq!(tally.count("lab2", VariantType::Snp), 0);
        assert_eq!(tally.count("lab3", VariantType::Snp), 1);
        assert_eq!(tally.total(VariantType::Snp), 2);
    }

    #[test]
    fn test_count_type_no_calls_skips_type() {
        let schema = schema();
        let mut tally = TypeTally::for_labs(&LABS);

        // Alleles are not even inspected when nobody called the variant
        let vt = tally.count_type(&["", "", "", "", ""], &schema).unwrap();
        assert_eq!(vt, None);
        assert_eq!(tally.lab_total("lab1"), 0);
    }

    #[test]
    fn test_count_type_error_leaves_tally_untouched() {
        let schema = schema();
        let mut tally = TypeTally::for_labs(&LABS);
        tally
            .count_type(&["Benign", "VUS", "", "GA", "G"], &schema)
            .unwrap();
        let before = tally.clone();

        let result = tally.count_type(&["Benign", "VUS", "", "", "G"], &schema);
        assert!(result.is_err());
        assert_eq!(tally, before);
    }

    #[test]
    fn test_unknown_lab_reads_zero() {
        let tally = TypeTally::for_labs(&LABS);
        assert_eq!(tally.count("lab9", VariantType::Del), 0);
        assert_eq!(tally.lab_total("lab9"), 0);
    }

    #[test]
    fn test_merge_sums_counters() {
        let schema = schema();
        let mut a = TypeTally::for_labs(&LABS);
        let mut b = TypeTally::for_labs(&LABS);
        a.count_type(&["Benign", "", "", "A", "G"], &schema).unwrap();
        b.count_type(&["VUS", "VUS", "", "A", "AG"], &schema).unwrap();
        b.count_type(&["VUS", "", "", "A", "T"], &schema).unwrap();

        a.merge(&b);
        assert_eq!(a.count("lab1", VariantType::Snp), 2);
        assert_eq!(a.count("lab1", VariantType::Ins), 1);
        assert_eq!(a.count("lab2", VariantType::Ins), 1);
        assert_eq!(a.labs(), LABS);
    }

    #[test]
    fn test_merge_adds_new_labs() {
        let mut a = TypeTally::for_labs(&["lab1"]);
        let b = TypeTally::for_labs(&["lab2"]);
        a.merge(&b);
        assert_eq!(a.labs(), ["lab1", "lab2"]);
    }

    #[test]
    fn test_classification_tally() {
        let schema = schema();
        let mut tally = ClassificationTally::for_labs(&LABS);

        let unrecognized = tally.count_calls(&["Benign", "Likely pathogenic", "n/a", "A", "G"], &schema);
        assert_eq!(unrecognized, ["lab3"]);
        assert_eq!(tally.count("lab1", ClassificationTier::LikelyBenign), 1);
        assert_eq!(tally.count("lab2", ClassificationTier::LikelyPathogenic), 1);
        assert_eq!(tally.lab_total("lab3"), 0);
    }

    #[test]
    fn test_serializes_with_type_keys() {
        let tally = TypeTally::for_labs(&["lab1"]);
        let json = serde_json::to_value(&tally).unwrap();
        assert_eq!(json["counts"]["lab1"]["delins"], 0);
        assert_eq!(json["labs"][0], "lab1");
    }
}
