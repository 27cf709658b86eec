//! Writers for the artifacts of a consensus run.
//!
//! The following files are written into the output directory:
//!
//! | File | Contents |
//! |------|----------|
//! | `<prefix>opposites_report_<month>_<year>.txt` | Variants with opposite calls, for manual review |
//! | `<prefix>public.csv` | Every other variant with its tier and decision |
//! | `<prefix>delins.csv` | Full rows of variants typed as delins |
//! | `<prefix>types.txt` | Per-lab variant type counts |
//! | `<prefix>counts.html` | Per-lab classification counts and decision totals |
//! | `<prefix>log.txt` | Anomalies encountered while processing |
//!
//! The writers take any [`std::io::Write`] so the formats can be produced in
//! memory.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::consensus::reporter::ConsensusReport;
use crate::utils::validation::{validate_prefix, ValidationError};

pub mod html;
pub mod tables;
pub mod text;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Prefix(#[from] ValidationError),
}

/// Locations of every artifact of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub opposites: PathBuf,
    pub public: PathBuf,
    pub delins: PathBuf,
    pub types: PathBuf,
    pub counts: PathBuf,
    pub log: PathBuf,
}

impl ArtifactPaths {
    /// Artifact paths for `prefix` in `output_dir`; `month_year` labels the
    /// opposites report (see [`crate::utils::date::month_and_year`]).
    ///
    /// # Errors
    ///
    /// Returns `WriteError::Prefix` if the prefix or label could escape the directory.
    pub fn new(output_dir: &Path, prefix: &str, month_year: &str) -> Result<Self, WriteError> {
        let prefix = validate_prefix(prefix)?;
        let month_year = validate_prefix(month_year)?;
        let path = |name: String| output_dir.join(format!("{prefix}{name}"));

        Ok(Self {
            opposites: path(format!("opposites_report_{month_year}.txt")),
            public: path("public.csv".to_string()),
            delins: path("delins.csv".to_string()),
            types: path("types.txt".to_string()),
            counts: path("counts.html".to_string()),
            log: path("log.txt".to_string()),
        })
    }

    /// All paths in write order
    #[must_use]
    pub fn all(&self) -> [&Path; 6] {
        [
            self.opposites.as_path(),
            self.public.as_path(),
            self.delins.as_path(),
            self.types.as_path(),
            self.counts.as_path(),
            self.log.as_path(),
        ]
    }
}

/// Write every artifact of a finished run
///
/// # Errors
///
/// Returns `WriteError` if any file cannot be created or written.
pub fn write_report(report: &ConsensusReport, paths: &ArtifactPaths) -> Result<(), WriteError> {
    write_file(&paths.opposites, |w| text::write_opposites(report, w))?;
    write_file(&paths.public, |w| tables::write_public(report, w))?;
    write_file(&paths.delins, |w| tables::write_delins(report, w))?;
    write_file(&paths.types, |w| text::write_types(report, w))?;
    write_file(&paths.counts, |w| html::write_counts(report, w))?;
    write_file(&paths.log, |w| text::write_log(report, w))?;
    Ok(())
}

fn write_file<F>(path: &Path, write: F) -> Result<(), WriteError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), WriteError>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    write(&mut writer)?;
    writer.flush()?;
    info!("Wrote {}", path.display());
    Ok(())
}
