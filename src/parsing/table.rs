use std::io::Read;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

/// Maximum number of variant rows accepted from a single file (DOS protection)
pub const MAX_ROWS: usize = 5_000_000;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Variant table has no header row")]
    MissingHeader,

    #[error("Too many rows: more than the maximum of {0}")]
    TooManyRows(usize),
}

/// One data row together with its 1-based line number in the source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRow {
    pub line: u64,
    pub fields: Vec<String>,
}

/// A delimited variant table: header plus data rows, in file order
#[derive(Debug, Clone, Default)]
pub struct VariantTable {
    pub header: Vec<String>,
    pub rows: Vec<VariantRow>,
}

impl VariantTable {
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Read a delimited variant table from a file
///
/// # Errors
///
/// Returns `TableError::Io` if the file cannot be opened, or other table
/// errors if the content is invalid.
pub fn read_variant_table(path: &Path, delimiter: u8) -> Result<VariantTable, TableError> {
    let file = std::fs::File::open(path)?;
    let table = read_variant_table_from(file, delimiter)?;
    debug!(
        "Read {} variant rows with {} columns from {}",
        table.len(),
        table.header.len(),
        path.display()
    );
    Ok(table)
}

/// Parse delimited variant text
///
/// # Errors
///
/// Returns `TableError::MissingHeader` for empty input, `TableError::Csv` for
/// malformed records, or `TableError::TooManyRows` if the limit is exceeded.
pub fn parse_variant_text(text: &str, delimiter: u8) -> Result<VariantTable, TableError> {
    read_variant_table_from(text.as_bytes(), delimiter)
}

/// Read a variant table from any reader.
///
/// Rows may be shorter than the header; missing trailing fields read as empty.
/// Blank lines are skipped.
///
/// # Errors
///
/// See [`parse_variant_text`].
pub fn read_variant_table_from<R: Read>(
    reader: R,
    delimiter: u8,
) -> Result<VariantTable, TableError> {
    read_rows(reader, delimiter, MAX_ROWS)
}

fn read_rows<R: Read>(
    reader: R,
    delimiter: u8,
    max_rows: usize,
) -> Result<VariantTable, TableError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = reader.records();

    let header = match records.next() {
        Some(record) => record?.iter().map(str::to_string).collect::<Vec<_>>(),
        None => return Err(TableError::MissingHeader),
    };

    let mut rows = Vec::new();
    for result in records {
        let record = result?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        if rows.len() >= max_rows {
            return Err(TableError::TooManyRows(max_rows));
        }

        // Line numbers are 1-based for user friendliness
        let line = record.position().map_or(0, csv::Position::line);
        rows.push(VariantRow {
            line,
            fields: record.iter().map(str::to_string).collect(),
        });
    }

    Ok(VariantTable { header, rows })
}
