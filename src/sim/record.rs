use serde::{Deserialize, Serialize};

use crate::core::{Pid, Process, ProcessNature, ProcessState, RunState, Vruntime};

/// On-disk shape of a process descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    pub pid: Pid,
    pub vruntime: Vruntime,
    pub cpu_burst_time: i64,
    pub priority: i32,
    #[serde(rename = "processState")]
    pub process_state: ProcessStateRecord,
    #[serde(rename = "processNature")]
    pub process_nature: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProcessStateRecord {
    pub counter: i64,
}

impl ProcessRecord {
    // Nature is parsed separately so a bad value can be reported with its pid
    pub(crate) fn into_process(self, nature: ProcessNature) -> Process {
        Process {
            pid: self.pid,
            vruntime: self.vruntime,
            cpu_burst_time: self.cpu_burst_time,
            priority: self.priority,
            process_state: ProcessState {
                counter: self.process_state.counter,
            },
            nature,
            run_state: RunState::Queued,
        }
    }
}

impl From<&Process> for ProcessRecord {
    fn from(p: &Process) -> Self {
        Self {
            pid: p.pid,
            vruntime: p.vruntime,
            cpu_burst_time: p.cpu_burst_time,
            priority: p.priority,
            process_state: ProcessStateRecord {
                counter: p.process_state.counter,
            },
            process_nature: p.nature.as_str().to_owned(),
        }
    }
}
