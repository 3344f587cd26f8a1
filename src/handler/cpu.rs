use super::{ExecutionHandler, Outcome, requeue_or_terminate};
use crate::core::{Clock, ProcId, RunCtx, weight::vruntime_delta};

pub const DEFAULT_TIME_SLICE: i64 = 1;

/// Runs a process for at most one time slice. Slices below one unit are
/// treated as one so every dispatch makes progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuBoundHandler {
    pub time_slice: i64,
}

impl Default for CpuBoundHandler {
    fn default() -> Self {
        Self {
            time_slice: DEFAULT_TIME_SLICE,
        }
    }
}

impl ExecutionHandler for CpuBoundHandler {
    fn execute<C: Clock>(&self, ctx: &mut RunCtx<C>, id: ProcId) -> Outcome {
        let process = ctx.proc(id);
        let priority = process.priority;
        // Clamped so an exhausted burst never hands vruntime back
        let executed = self.time_slice.max(1).min(process.cpu_burst_time).max(0);

        let busy = ctx.ticks(executed);
        ctx.clock.advance(busy);

        let process = ctx.proc_mut(id);
        process.cpu_burst_time = process.cpu_burst_time.saturating_sub(executed);
        ctx.charge(id, vruntime_delta(executed, priority));

        tracing::trace!(
            pid = ctx.proc(id).pid,
            executed,
            remaining = ctx.proc(id).cpu_burst_time,
            "cpu slice"
        );

        requeue_or_terminate(ctx, id)
    }
}
