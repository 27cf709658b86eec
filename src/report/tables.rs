use std::io::Write;

use crate::consensus::reporter::ConsensusReport;
use crate::parsing::columns::VariantSchema;
use crate::report::WriteError;

/// Columns appended to the passthrough columns of the public export
pub const PUBLIC_COLUMNS: [&str; 3] = ["classification", "status", "lab_count"];

/// Publishable variants: passthrough columns plus tier, decision and number of
/// calling labs. Lab columns are left out; opposites are never included.
///
/// # Errors
///
/// Returns `WriteError::Csv` if writing fails.
pub fn write_public<W: Write>(report: &ConsensusReport, w: &mut W) -> Result<(), WriteError> {
    let mut writer = csv::Writer::from_writer(w);

    let header = report
        .passthrough
        .iter()
        .map(|(name, _)| name.as_str())
        .chain(PUBLIC_COLUMNS);
    writer.write_record(header)?;

    for record in &report.public {
        let mut out: Vec<String> = report
            .passthrough
            .iter()
            .map(|(_, index)| VariantSchema::field(&record.fields, *index).to_string())
            .collect();
        out.push(
            record
                .decision
                .classification
                .map(|tier| tier.label().to_string())
                .unwrap_or_default(),
        );
        out.push(record.decision.status.to_string());
        out.push(record.decision.calls.len().to_string());
        writer.write_record(&out)?;
    }

    writer.flush()?;
    Ok(())
}

/// Full rows of every delins variant, under the input header
///
/// # Errors
///
/// Returns `WriteError::Csv` if writing fails.
pub fn write_delins<W: Write>(report: &ConsensusReport, w: &mut W) -> Result<(), WriteError> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(w);

    writer.write_record(&report.header)?;
    for record in &report.delins {
        let mut fields = record.fields.clone();
        if fields.len() < report.header.len() {
            fields.resize(report.header.len(), String::new());
        }
        writer.write_record(&fields)?;
    }

    writer.flush()?;
    Ok(())
}
