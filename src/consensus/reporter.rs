use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::consensus::resolver::{resolve_consensus, ConsensusDecision, ResolveError};
use crate::consensus::tally::{ClassificationTally, TypeTally};
use crate::core::allele::AlleleError;
use crate::core::types::{ConsensusStatus, VariantType};
use crate::parsing::columns::{resolve, ColumnError, VariantSchema};
use crate::parsing::table::{TableError, VariantRow, VariantTable};
use crate::report::WriteError;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Column(#[from] ColumnError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Row(#[from] RowError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

/// A variant row that could not be processed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("Line {line}: {source}")]
    Allele {
        line: u64,
        #[source]
        source: AlleleError,
    },

    #[error("Line {line}: {source}")]
    Resolve {
        line: u64,
        #[source]
        source: ResolveError,
    },
}

/// What to do with a row that fails to process
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum RowErrorPolicy {
    /// Log the row as an anomaly and continue with the next one
    #[default]
    Skip,
    /// Stop the run with the row's error
    Abort,
}

/// Configuration for one report run
#[derive(Debug, Clone, Default)]
pub struct ReportConfig {
    /// Lab classification columns, in report order
    pub labs: Vec<String>,

    /// Handling of rows with malformed alleles
    pub on_error: RowErrorPolicy,
}

impl ReportConfig {
    pub fn new<S: AsRef<str>>(labs: &[S]) -> Self {
        Self {
            labs: labs.iter().map(|lab| lab.as_ref().to_string()).collect(),
            on_error: RowErrorPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, on_error: RowErrorPolicy) -> Self {
        self.on_error = on_error;
        self
    }

    /// # Errors
    ///
    /// Returns `ReportError::Config` if no labs are configured, a lab name is
    /// blank, or a lab is listed twice.
    pub fn validate(&self) -> Result<(), ReportError> {
        if self.labs.is_empty() {
            return Err(ReportError::Config("at least one lab is required".to_string()));
        }
        for (i, lab) in self.labs.iter().enumerate() {
            if lab.trim().is_empty() {
                return Err(ReportError::Config("lab names must not be blank".to_string()));
            }
            if self.labs[..i].contains(lab) {
                return Err(ReportError::Config(format!("lab '{lab}' is listed twice")));
            }
        }
        Ok(())
    }
}

/// Something odd about a row that did not stop the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Anomaly {
    /// A lab cell that does not name a known classification
    UnrecognizedClassification { line: u64, lab: String, raw: String },
    /// A row with no lab calls at all
    NoCalls { line: u64 },
    /// A row dropped under [`RowErrorPolicy::Skip`]
    SkippedRow { line: u64, reason: String },
}

impl std::fmt::Display for Anomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnrecognizedClassification { line, lab, raw } => {
                write!(f, "line {line}: unrecognized classification '{raw}' from {lab}")
            }
            Self::NoCalls { line } => write!(f, "line {line}: no lab classified this variant"),
            Self::SkippedRow { line, reason } => write!(f, "line {line}: skipped: {reason}"),
        }
    }
}

/// A processed variant row
#[derive(Debug, Clone, Serialize)]
pub struct VariantRecord {
    pub line: u64,

    /// Row fields as read
    pub fields: Vec<String>,

    pub variant_type: VariantType,

    pub decision: ConsensusDecision,
}

/// Everything one run produced; read-only input for the report writers
#[derive(Debug, Clone, Serialize)]
pub struct ConsensusReport {
    pub labs: Vec<String>,

    pub header: Vec<String>,

    /// Non-lab columns carried into the public export, with their positions
    pub passthrough: Vec<(String, usize)>,

    /// Position of the combined classification column, if present
    pub classification_column: Option<usize>,

    pub types: TypeTally,

    pub classifications: ClassificationTally,

    pub status_counts: BTreeMap<ConsensusStatus, u64>,

    /// Variants with benign-family and pathogenic-family calls
    pub opposites: Vec<VariantRecord>,

    /// Variants safe to publish (everything but opposites)
    pub public: Vec<VariantRecord>,

    /// Variants typed as delins, regardless of decision
    pub delins: Vec<VariantRecord>,

    pub anomalies: Vec<Anomaly>,

    pub rows_processed: usize,

    /// Rows no lab called
    pub rows_without_calls: usize,

    /// Rows dropped under [`RowErrorPolicy::Skip`]
    pub rows_skipped: usize,
}

impl ConsensusReport {
    #[must_use]
    pub fn status_count(&self, status: ConsensusStatus) -> u64 {
        self.status_counts.get(&status).copied().unwrap_or(0)
    }
}

/// Drives the per-row pipeline: normalize, classify type, tally, resolve.
///
/// One reporter owns the tallies for one run; nothing is shared between runs.
#[derive(Debug)]
pub struct ConsensusReporter {
    config: ReportConfig,
    schema: VariantSchema,
    report: ConsensusReport,
}

impl ConsensusReporter {
    /// Create a reporter for a file with the given header.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Config` for an invalid configuration, or
    /// `ReportError::Column` if the header lacks a lab, `ref` or `alt` column
    /// or repeats a column name.
    pub fn new<S: AsRef<str>>(config: ReportConfig, header: &[S]) -> Result<Self, ReportError> {
        config.validate()?;

        let columns = resolve(header)?;
        let schema = VariantSchema::new(&columns, &config.labs)?;
        debug!(
            "Resolved {} lab columns and {} passthrough columns",
            schema.labs.len(),
            schema.passthrough.len()
        );

        let report = ConsensusReport {
            labs: config.labs.clone(),
            header: columns.names().to_vec(),
            passthrough: schema.passthrough.clone(),
            classification_column: schema.classification,
            types: TypeTally::for_labs(&config.labs),
            classifications: ClassificationTally::for_labs(&config.labs),
            status_counts: ConsensusStatus::ALL.iter().map(|&s| (s, 0)).collect(),
            opposites: Vec::new(),
            public: Vec::new(),
            delins: Vec::new(),
            anomalies: Vec::new(),
            rows_processed: 0,
            rows_without_calls: 0,
            rows_skipped: 0,
        };

        Ok(Self {
            config,
            schema,
            report,
        })
    }

    /// Report accumulated so far
    #[must_use]
    pub fn report(&self) -> &ConsensusReport {
        &self.report
    }

    /// Process one row, applying the configured [`RowErrorPolicy`] on failure.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Row` only under [`RowErrorPolicy::Abort`].
    pub fn process(&mut self, row: &VariantRow) -> Result<(), ReportError> {
        match self.process_row(row.line, &row.fields) {
            Ok(()) => Ok(()),
            Err(e) => match self.config.on_error {
                RowErrorPolicy::Abort => Err(e.into()),
                RowErrorPolicy::Skip => {
                    warn!("Skipping row: {e}");
                    self.report.rows_skipped += 1;
                    self.report.anomalies.push(Anomaly::SkippedRow {
                        line: row.line,
                        reason: e.to_string(),
                    });
                    Ok(())
                }
            },
        }
    }

    /// Process one row.
    ///
    /// Counters are only touched once the row is known to be valid, so a
    /// failing row never leaves a partial update behind.
    ///
    /// # Errors
    ///
    /// Returns `RowError::Allele` for malformed `ref`/`alt` values.
    pub fn process_row<S: AsRef<str>>(&mut self, line: u64, fields: &[S]) -> Result<(), RowError> {
        if self.schema.call_count(fields) == 0 {
            debug!("Line {line}: no lab calls");
            self.report.anomalies.push(Anomaly::NoCalls { line });
            self.report.rows_without_calls += 1;
            return Ok(());
        }

        let decision = resolve_consensus(fields, &self.schema)
            .map_err(|source| RowError::Resolve { line, source })?;

        let variant_type = self
            .report
            .types
            .count_type(fields, &self.schema)
            .map_err(|source| RowError::Allele { line, source })?
            .ok_or(RowError::Resolve {
                line,
                source: ResolveError::InvalidCallCount {
                    expected: "at least 1",
                    found: 0,
                },
            })?;

        for lab in self.report.classifications.count_calls(fields, &self.schema) {
            let raw = decision.call_for(lab).map(|c| c.raw.clone()).unwrap_or_default();
            warn!("Line {line}: unrecognized classification '{raw}' from {lab}");
            self.report.anomalies.push(Anomaly::UnrecognizedClassification {
                line,
                lab: lab.to_string(),
                raw,
            });
        }

        *self.report.status_counts.entry(decision.status).or_insert(0) += 1;
        self.report.rows_processed += 1;

        let record = VariantRecord {
            line,
            fields: fields.iter().map(|f| f.as_ref().to_string()).collect(),
            variant_type,
            decision,
        };

        if variant_type == VariantType::Delins {
            self.report.delins.push(record.clone());
        }
        if record.decision.is_public() {
            self.report.public.push(record);
        } else {
            debug!("Line {line}: opposite classifications");
            self.report.opposites.push(record);
        }

        Ok(())
    }

    #[must_use]
    pub fn finish(self) -> ConsensusReport {
        debug!(
            "Processed {} rows ({} without calls, {} skipped, {} opposites)",
            self.report.rows_processed,
            self.report.rows_without_calls,
            self.report.rows_skipped,
            self.report.opposites.len()
        );
        self.report
    }
}

/// Run the whole pipeline over a table in one pass.
///
/// # Errors
///
/// Returns configuration and column errors up front, or the first row error
/// under [`RowErrorPolicy::Abort`].
pub fn run(config: ReportConfig, table: &VariantTable) -> Result<ConsensusReport, ReportError> {
    let mut reporter = ConsensusReporter::new(config, &table.header)?;
    for row in &table.rows {
        reporter.process(row)?;
    }
    Ok(reporter.finish())
}
