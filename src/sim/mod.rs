//! Everything around a scheduling run: reading process descriptors, writing
//! the execution log, summarising it, and generating synthetic workloads.

pub mod error;
pub mod ingest;
pub mod metrics;
pub mod record;
pub mod sink;
pub mod workload;

pub use error::Error;
pub use ingest::{PRIORITY_RANGE, load_processes, parse_processes};
pub use metrics::{ProcessMetrics, ScheduleMetrics, analyze};
pub use record::{ProcessRecord, ProcessStateRecord};
pub use sink::{save_log, write_log};
pub use workload::{WorkloadSpec, generate};
