use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use super::Error;
use crate::core::ExecutionLogEntry;

pub const HEADER: &str = "pid,start_time,end_time";

/// Render the execution log as CSV, one row per dispatch cycle.
pub fn write_log<W: Write>(mut out: W, log: &[ExecutionLogEntry]) -> io::Result<()> {
    writeln!(out, "{HEADER}")?;
    for entry in log {
        writeln!(out, "{},{},{}", entry.pid, entry.start_time, entry.end_time)?;
    }
    out.flush()
}

pub fn save_log(path: &Path, log: &[ExecutionLogEntry]) -> Result<(), Error> {
    let wrap = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(wrap)?;
    write_log(BufWriter::new(file), log).map_err(wrap)?;
    tracing::info!(path = %path.display(), rows = log.len(), "wrote execution log");
    Ok(())
}
