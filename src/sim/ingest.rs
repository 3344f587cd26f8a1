use rustc_hash::FxHashSet;
use std::{
    fs::File,
    io::{BufReader, Read},
    ops::RangeInclusive,
    path::Path,
};

use super::{Error, record::ProcessRecord};
use crate::core::{Process, ProcessNature};

/// Accepted priorities: the Linux nice range.
pub const PRIORITY_RANGE: RangeInclusive<i32> = -20..=19;

/// Parse a JSON array of process descriptors. Every record is validated
/// before any of them is handed back.
pub fn parse_processes<R: Read>(reader: R) -> Result<Vec<Process>, Error> {
    let records: Vec<ProcessRecord> = serde_json::from_reader(reader)?;
    let mut seen = FxHashSet::default();

    records
        .into_iter()
        .map(|record| {
            let process = validate(record)?;
            if !seen.insert(process.pid) {
                tracing::warn!(pid = process.pid, "duplicate pid in process list");
            }
            Ok(process)
        })
        .collect()
}

pub fn load_processes(path: &Path) -> Result<Vec<Process>, Error> {
    let file = File::open(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let processes = parse_processes(BufReader::new(file))?;
    tracing::debug!(path = %path.display(), count = processes.len(), "loaded process list");
    Ok(processes)
}

fn validate(record: ProcessRecord) -> Result<Process, Error> {
    let pid = record.pid;
    let nature: ProcessNature = record
        .process_nature
        .parse()
        .map_err(|source| Error::Nature { pid, source })?;

    if record.cpu_burst_time < 0 {
        return Err(Error::NegativeBurst {
            pid,
            value: record.cpu_burst_time,
        });
    }
    if !PRIORITY_RANGE.contains(&record.priority) {
        return Err(Error::PriorityOutOfRange {
            pid,
            value: record.priority,
            min: *PRIORITY_RANGE.start(),
            max: *PRIORITY_RANGE.end(),
        });
    }

    Ok(record.into_process(nature))
}
