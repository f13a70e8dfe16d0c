use std::io::{self, Write};

use crate::aircraft::CgEnvelope;
use crate::calc::LoadPathPoint;

/// Write the load path in CSV format.
///
/// Columns: step, label, weight_lbs, cg_mm
pub fn write_load_path<W: Write>(writer: &mut W, path: &[LoadPathPoint]) -> io::Result<()> {
    writeln!(writer, "step,label,weight_lbs,cg_mm")?;
    for (i, p) in path.iter().enumerate() {
        writeln!(writer, "{},\"{}\",{:.2},{:.2}", i, p.label.replace('"', "\"\""), p.weight_lbs, p.cg_mm)?;
    }
    Ok(())
}

/// Write the envelope outline in CSV format, closed back onto its first vertex.
///
/// Columns: weight_lbs, cg_mm
pub fn write_envelope<W: Write>(writer: &mut W, envelope: &CgEnvelope) -> io::Result<()> {
    writeln!(writer, "weight_lbs,cg_mm")?;
    let outline = envelope.polyline();
    for p in outline.iter().chain(outline.first()) {
        writeln!(writer, "{:.2},{:.2}", p.weight_lbs, p.cg_mm)?;
    }
    Ok(())
}
