use std::io::Write;

use crate::consensus::reporter::ConsensusReport;
use crate::core::types::VariantType;
use crate::parsing::columns::VariantSchema;
use crate::report::WriteError;

/// Opposite classifications, one block per variant, for manual review
///
/// # Errors
///
/// Returns `WriteError::Io` if writing fails.
pub fn write_opposites<W: Write>(report: &ConsensusReport, w: &mut W) -> Result<(), WriteError> {
    writeln!(
        w,
        "Opposite classifications ({} variants)",
        report.opposites.len()
    )?;
    writeln!(w, "{}", "=".repeat(60))?;

    for record in &report.opposites {
        writeln!(w, "\nLine {} ({})", record.line, record.variant_type)?;
        for (name, index) in &report.passthrough {
            writeln!(w, "  {name}: {}", VariantSchema::field(&record.fields, *index))?;
        }
        if let Some(index) = report.classification_column {
            let reported = VariantSchema::field(&record.fields, index);
            if !reported.is_empty() {
                writeln!(w, "  Reported status: {reported}")?;
            }
        }
        for call in &record.decision.calls {
            match call.classification {
                Some(c) => writeln!(w, "  {}: {} ({c})", call.lab, call.raw)?,
                None => writeln!(w, "  {}: {} (unrecognized)", call.lab, call.raw)?,
            }
        }
    }

    Ok(())
}

/// Tab-separated variant type counts per lab, with a total row
///
/// # Errors
///
/// Returns `WriteError::Io` if writing fails.
pub fn write_types<W: Write>(report: &ConsensusReport, w: &mut W) -> Result<(), WriteError> {
    let types = &report.types;

    write!(w, "lab")?;
    for vt in VariantType::ALL {
        write!(w, "\t{vt}")?;
    }
    writeln!(w, "\ttotal")?;

    for lab in types.labs() {
        write!(w, "{lab}")?;
        for vt in VariantType::ALL {
            write!(w, "\t{}", types.count(lab, vt))?;
        }
        writeln!(w, "\t{}", types.lab_total(lab))?;
    }

    write!(w, "total")?;
    let mut grand_total = 0;
    for vt in VariantType::ALL {
        let total = types.total(vt);
        grand_total += total;
        write!(w, "\t{total}")?;
    }
    writeln!(w, "\t{grand_total}")?;

    Ok(())
}

/// Run summary followed by one line per anomaly
///
/// # Errors
///
/// Returns `WriteError::Io` if writing fails.
pub fn write_log<W: Write>(report: &ConsensusReport, w: &mut W) -> Result<(), WriteError> {
    writeln!(
        w,
        "Processed {} variants, {} without calls, skipped {}, {} anomalies",
        report.rows_processed,
        report.rows_without_calls,
        report.rows_skipped,
        report.anomalies.len()
    )?;
    for anomaly in &report.anomalies {
        writeln!(w, "{anomaly}")?;
    }
    Ok(())
}
