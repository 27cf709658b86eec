use std::io::Write;

use crate::consensus::reporter::ConsensusReport;
use crate::core::classification::ClassificationTier;
use crate::core::types::{ConsensusStatus, VariantType};
use crate::report::WriteError;

/// Stand-alone HTML page with per-lab classification counts, variant type
/// counts and decision totals
///
/// # Errors
///
/// Returns `WriteError::Io` if writing fails.
pub fn write_counts<W: Write>(report: &ConsensusReport, w: &mut W) -> Result<(), WriteError> {
    writeln!(w, "<!DOCTYPE html>")?;
    writeln!(w, "<html>\n<head>\n<meta charset=\"utf-8\">")?;
    writeln!(w, "<title>Consensus counts</title>\n</head>\n<body>")?;

    writeln!(w, "<h1>Classifications per lab</h1>")?;
    writeln!(w, "<table>")?;
    write!(w, "<tr><th>Lab</th>")?;
    for tier in ClassificationTier::ALL {
        write!(w, "<th>{}</th>", escape(tier.label()))?;
    }
    writeln!(w, "<th>Total</th></tr>")?;
    for lab in report.classifications.labs() {
        write!(w, "<tr><td>{}</td>", escape(lab))?;
        for tier in ClassificationTier::ALL {
            write!(w, "<td>{}</td>", report.classifications.count(lab, tier))?;
        }
        writeln!(w, "<td>{}</td></tr>", report.classifications.lab_total(lab))?;
    }
    writeln!(w, "</table>")?;

    writeln!(w, "<h1>Variant types per lab</h1>")?;
    writeln!(w, "<table>")?;
    write!(w, "<tr><th>Lab</th>")?;
    for vt in VariantType::ALL {
        write!(w, "<th>{vt}</th>")?;
    }
    writeln!(w, "</tr>")?;
    for lab in report.types.labs() {
        write!(w, "<tr><td>{}</td>", escape(lab))?;
        for vt in VariantType::ALL {
            write!(w, "<td>{}</td>", report.types.count(lab, vt))?;
        }
        writeln!(w, "</tr>")?;
    }
    writeln!(w, "</table>")?;

    writeln!(w, "<h1>Decisions</h1>")?;
    writeln!(w, "<table>")?;
    for status in ConsensusStatus::ALL {
        writeln!(
            w,
            "<tr><td>{}</td><td>{}</td></tr>",
            status.description(),
            report.status_count(status)
        )?;
    }
    writeln!(
        w,
        "<tr><td>Total</td><td>{}</td></tr>",
        report.rows_processed
    )?;
    writeln!(w, "</table>")?;

    writeln!(w, "</body>\n</html>")?;
    Ok(())
}

/// Escape text for HTML element content
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
