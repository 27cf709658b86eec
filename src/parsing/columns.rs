use std::collections::HashMap;

use thiserror::Error;

/// Column holding the reference allele
pub const REF_COLUMN: &str = "ref";

/// Column holding the alternate allele
pub const ALT_COLUMN: &str = "alt";

/// Optional column holding a combined, pre-computed classification status
pub const CLASSIFICATION_COLUMN: &str = "classification";

const UTF8_BOM: char = '\u{feff}';

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColumnError {
    #[error("Missing required column '{column}'")]
    Missing { column: String },

    #[error("Duplicate column '{column}' at positions {first} and {second}")]
    Duplicate {
        column: String,
        first: usize,
        second: usize,
    },

    #[error("Lab column '{column}' is also a reserved column")]
    ReservedLab { column: String },
}

/// Mapping from header text to zero-based column position
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    positions: HashMap<String, usize>,
    order: Vec<String>,
}

impl ColumnMap {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Position of a column that must exist
    ///
    /// # Errors
    ///
    /// Returns `ColumnError::Missing` naming the column if it is absent.
    pub fn require(&self, name: &str) -> Result<usize, ColumnError> {
        self.get(name).ok_or_else(|| ColumnError::Missing {
            column: name.to_string(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Column names in header order
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.order
    }

    /// Name to position mapping
    #[must_use]
    pub fn positions(&self) -> &HashMap<String, usize> {
        &self.positions
    }
}

/// Build a [`ColumnMap`] from a header row.
///
/// Names are taken verbatim, except that a UTF-8 byte order mark on the first
/// cell is dropped.
///
/// # Errors
///
/// Returns `ColumnError::Duplicate` if a name occurs more than once.
///
/// # Examples
///
/// ```
/// use consensus_reporter::parsing::columns::resolve;
///
/// let map = resolve(&["col1", "col2", "col3"]).unwrap();
/// assert_eq!(map.get("col1"), Some(0));
/// assert_eq!(map.get("col3"), Some(2));
/// ```
pub fn resolve<S: AsRef<str>>(header: &[S]) -> Result<ColumnMap, ColumnError> {
    let mut map = ColumnMap::default();

    for (i, cell) in header.iter().enumerate() {
        let mut name = cell.as_ref();
        if i == 0 {
            name = name.trim_start_matches(UTF8_BOM);
        }

        if let Some(&first) = map.positions.get(name) {
            return Err(ColumnError::Duplicate {
                column: name.to_string(),
                first,
                second: i,
            });
        }

        map.positions.insert(name.to_string(), i);
        map.order.push(name.to_string());
    }

    Ok(map)
}

/// A lab classification column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabColumn {
    pub name: String,
    pub index: usize,
}

/// Validated layout of a variant table.
///
/// Built once per file; every column the pipeline reads is resolved up front
/// so row processing never looks names up again.
#[derive(Debug, Clone)]
pub struct VariantSchema {
    /// Lab columns in configured order
    pub labs: Vec<LabColumn>,

    pub reference: usize,

    pub alternate: usize,

    /// Combined classification column, if the file has one
    pub classification: Option<usize>,

    /// Columns that are neither labs nor the combined classification, in header order
    pub passthrough: Vec<(String, usize)>,
}

impl VariantSchema {
    /// Validate a column map against the configured labs.
    ///
    /// # Errors
    ///
    /// Returns `ColumnError::Missing` for the first absent lab, `ref` or `alt`
    /// column, or `ColumnError::ReservedLab` if a lab shares a reserved name.
    pub fn new<S: AsRef<str>>(columns: &ColumnMap, labs: &[S]) -> Result<Self, ColumnError> {
        let mut lab_columns = Vec::with_capacity(labs.len());
        for lab in labs {
            let name = lab.as_ref();
            if [REF_COLUMN, ALT_COLUMN, CLASSIFICATION_COLUMN].contains(&name) {
                return Err(ColumnError::ReservedLab {
                    column: name.to_string(),
                });
            }
            lab_columns.push(LabColumn {
                name: name.to_string(),
                index: columns.require(name)?,
            });
        }

        let reference = columns.require(REF_COLUMN)?;
        let alternate = columns.require(ALT_COLUMN)?;
        let classification = columns.get(CLASSIFICATION_COLUMN);

        let passthrough = columns
            .names()
            .iter()
            .enumerate()
            .filter(|(i, _)| {
                Some(*i) != classification && !lab_columns.iter().any(|lab| lab.index == *i)
            })
            .map(|(i, name)| (name.clone(), i))
            .collect();

        Ok(Self {
            labs: lab_columns,
            reference,
            alternate,
            classification,
            passthrough,
        })
    }

    /// Field at `index`; short rows read as empty
    #[must_use]
    pub fn field<'r, S: AsRef<str>>(row: &'r [S], index: usize) -> &'r str {
        row.get(index).map_or("", |s| s.as_ref().trim())
    }

    #[must_use]
    pub fn reference<'r, S: AsRef<str>>(&self, row: &'r [S]) -> &'r str {
        Self::field(row, self.reference)
    }

    #[must_use]
    pub fn alternate<'r, S: AsRef<str>>(&self, row: &'r [S]) -> &'r str {
        Self::field(row, self.alternate)
    }

    /// Labs with a non-empty cell, paired with the raw (trimmed) cell text
    pub fn lab_calls<'a, S: AsRef<str>>(
        &'a self,
        row: &'a [S],
    ) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.labs
            .iter()
            .map(move |lab| (lab.name.as_str(), Self::field(row, lab.index)))
            .filter(|(_, raw)| !raw.is_empty())
    }

    /// Number of labs that made a call on this row
    #[must_use]
    pub fn call_count<S: AsRef<str>>(&self, row: &[S]) -> usize {
        self.lab_calls(row).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(header: &[&str], labs: &[&str]) -> VariantSchema {
        VariantSchema::new(&resolve(header).unwrap(), labs).unwrap()
    }

    #[test]
    fn test_resolve_positions() {
        let map = resolve(&["col1", "col2", "col3"]).unwrap();

        let expected: HashMap<String, usize> = [("col1", 0), ("col2", 1), ("col3", 2)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        assert_eq!(map.positions(), &expected);
        assert_eq!(map.len(), 3);
        assert_eq!(map.names(), ["col1", "col2", "col3"]);
    }

    #[test]
    fn test_resolve_empty_header() {
        let map = resolve::<&str>(&[]).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_resolve_strips_bom() {
        let map = resolve(&["\u{feff}lab1", "ref"]).unwrap();
        assert_eq!(map.get("lab1"), Some(0));
    }

    #[test]
    fn test_resolve_duplicate_fails() {
        let err = resolve(&["lab1", "ref", "lab1"]).unwrap_err();
        assert_eq!(
            err,
            ColumnError::Duplicate {
                column: "lab1".to_string(),
                first: 0,
                second: 2,
            }
        );
    }

    #[test]
    fn test_require_missing_names_column() {
        let map = resolve(&["lab1"]).unwrap();
        let err = map.require("alt").unwrap_err();
        assert_eq!(err.to_string(), "Missing required column 'alt'");
    }

    #[test]
    fn test_schema_fails_fast_on_missing_lab() {
        let map = resolve(&["lab1", "ref", "alt"]).unwrap();
        let err = VariantSchema::new(&map, &["lab1", "lab2"]).unwrap_err();
        assert_eq!(
            err,
            ColumnError::Missing {
                column: "lab2".to_string()
            }
        );
    }

    #[test]
    fn test_schema_requires_ref_and_alt() {
        let map = resolve(&["lab1", "ref"]).unwrap();
        assert!(matches!(
            VariantSchema::new(&map, &["lab1"]),
            Err(ColumnError::Missing { column }) if column == "alt"
        ));
    }

    #[test]
    fn test_schema_rejects_reserved_lab() {
        let map = resolve(&["ref", "alt"]).unwrap();
        assert!(matches!(
            VariantSchema::new(&map, &["ref"]),
            Err(ColumnError::ReservedLab { .. })
        ));
    }

    #[test]
    fn test_schema_passthrough() {
        let s = schema(
            &["chromosome", "lab1", "ref", "lab2", "alt", "classification"],
            &["lab1", "lab2"],
        );
        let names: Vec<&str> = s.passthrough.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["chromosome", "ref", "alt"]);
        assert_eq!(s.classification, Some(5));
    }

    #[test]
    fn test_lab_calls_skip_empty() {
        let s = schema(&["lab1", "lab2", "lab3", "ref", "alt"], &["lab1", "lab2", "lab3"]);
        let row = ["Benign", "  ", "VUS", "A", "G"];

        let calls: Vec<_> = s.lab_calls(&row).collect();
        assert_eq!(calls, [("lab1", "Benign"), ("lab3", "VUS")]);
        assert_eq!(s.call_count(&row), 2);
        assert_eq!(s.reference(&row), "A");
        assert_eq!(s.alternate(&row), "G");
    }

    #[test]
    fn test_short_row_reads_empty() {
        let s = schema(&["lab1", "ref", "alt", "lab2"], &["lab1", "lab2"]);
        let row = ["Benign", "A", "G"];
        assert_eq!(s.call_count(&row), 1);
    }
}
