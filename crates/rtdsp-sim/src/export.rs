//! Trace export.

use crate::error::SimResult;
use crate::run::Trace;
use std::io::Write;

/// One row per step: `step,setpoint,error,control,output`, raw words.
pub fn write_csv<W: Write>(trace: &Trace, mut out: W) -> SimResult<()> {
    writeln!(out, "step,setpoint,error,control,output")?;
    for s in &trace.samples {
        writeln!(
            out,
            "{},{},{},{},{}",
            s.step, s.setpoint, s.error, s.control, s.output
        )?;
    }
    Ok(())
}

/// Two-column `input_value,output_value` form used for plotting sequences.
pub fn write_sequence_csv<W, I>(rows: I, mut out: W) -> SimResult<()>
where
    W: Write,
    I: IntoIterator<Item = (i64, i64)>,
{
    writeln!(out, "input_value,output_value")?;
    for (input, output) in rows {
        writeln!(out, "{input},{output}")?;
    }
    Ok(())
}

pub fn write_json<W: Write>(trace: &Trace, out: W) -> SimResult<()> {
    serde_json::to_writer_pretty(out, trace)?;
    Ok(())
}
