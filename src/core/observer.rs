use slotmap::SecondaryMap;

use super::{
    clock::Clock,
    state::{ProcId, RunCtx, RunState, Vruntime},
};

/// Cross-checks the process a dispatch cycle just handled. A cycle only ever
/// mutates that one process, so nothing else needs looking at.
#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
    last_vruntime: SecondaryMap<ProcId, Vruntime>,
}

impl Observer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    // Processes seen so far
    pub fn tracked(&self) -> usize {
        self.last_vruntime.len()
    }

    pub fn observe<C: Clock>(&mut self, ctx: &RunCtx<C>, id: ProcId) {
        self.step += 1;

        let process = ctx.proc(id);
        let pid = process.pid;
        debug_assert!(
            matches!(process.run_state, RunState::Queued | RunState::Terminated),
            "pid {pid} left in {:?} after its cycle",
            process.run_state
        );

        let queued = ctx.queue.contains(id);
        debug_assert_eq!(
            queued,
            process.run_state == RunState::Queued,
            "pid {pid} queue membership disagrees with state {:?}",
            process.run_state
        );
        debug_assert!(
            !queued || process.has_work(),
            "pid {pid} queued with burst {}",
            process.cpu_burst_time
        );

        if let Some(previous) = self.last_vruntime.insert(id, process.vruntime) {
            debug_assert!(
                process.vruntime >= previous,
                "pid {pid} vruntime went backwards: {previous} -> {}",
                process.vruntime
            );
        }
    }
}
