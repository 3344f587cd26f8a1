use crate::core::{Pid, RunState, Vruntime};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedEvent {
    StateChange {
        pid: Pid,
        from: RunState,
        to: RunState,
    },
    // One per dispatch cycle, after the handler has charged the process
    Accounted {
        pid: Pid,
        vruntime_before: Vruntime,
        vruntime_after: Vruntime,
        remaining: i64,
    },
}
