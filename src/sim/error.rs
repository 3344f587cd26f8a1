use std::{io, path::PathBuf};

use crate::core::{Pid, UnknownNature};

/// Failures at the edges of a run: reading descriptors, writing the log.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed process list")]
    Parse(#[from] serde_json::Error),
    #[error("process {pid}: {source}")]
    Nature {
        pid: Pid,
        #[source]
        source: UnknownNature,
    },
    #[error("process {pid}: cpu_burst_time {value} is negative")]
    NegativeBurst { pid: Pid, value: i64 },
    #[error("process {pid}: priority {value} outside {min}..={max}")]
    PriorityOutOfRange {
        pid: Pid,
        value: i32,
        min: i32,
        max: i32,
    },
}
