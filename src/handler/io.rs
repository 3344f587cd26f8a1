use super::{ExecutionHandler, Outcome, requeue_or_terminate};
use crate::core::{Clock, ProcId, RunCtx, RunState, weight::vruntime_delta};

pub const DEFAULT_IO_WAIT: i64 = 10;

// CPU work done once the wait completes
const POST_IO_UNITS: i64 = 1;

/// Waits out a fixed IO delay, then runs a single unit of work. The wait is
/// charged to vruntime as if it were CPU time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IoBoundHandler {
    pub io_wait: i64,
}

impl Default for IoBoundHandler {
    fn default() -> Self {
        Self {
            io_wait: DEFAULT_IO_WAIT,
        }
    }
}

impl ExecutionHandler for IoBoundHandler {
    fn execute<C: Clock>(&self, ctx: &mut RunCtx<C>, id: ProcId) -> Outcome {
        let priority = ctx.proc(id).priority;

        ctx.set_state(id, RunState::Waiting);
        let wait = ctx.ticks(self.io_wait);
        ctx.clock.block(wait);
        ctx.charge(id, vruntime_delta(self.io_wait, priority));
        ctx.set_state(id, RunState::Running);

        let busy = ctx.ticks(POST_IO_UNITS);
        ctx.clock.advance(busy);
        let process = ctx.proc_mut(id);
        process.cpu_burst_time = process.cpu_burst_time.saturating_sub(POST_IO_UNITS);
        ctx.charge(id, vruntime_delta(POST_IO_UNITS, priority));

        tracing::trace!(
            pid = ctx.proc(id).pid,
            io_wait = self.io_wait,
            remaining = ctx.proc(id).cpu_burst_time,
            "io cycle"
        );

        requeue_or_terminate(ctx, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Process, ProcessNature, SchedEvent, VirtualClock};
    use std::time::Duration;

    #[test]
    fn single_cycle_charges_wait_plus_one_unit() {
        let mut ctx = RunCtx::new(VirtualClock::default(), Duration::from_millis(1));
        let id = ctx.insert(Process::new(2, 1, 0, ProcessNature::IoBound));
        ctx.enqueue(id);
        ctx.dequeue();
        ctx.drain_events();

        let outcome = IoBoundHandler::default().execute(&mut ctx, id);

        assert_eq!(outcome, Outcome::Terminated);
        assert_eq!(ctx.proc(id).cpu_burst_time, 0);
        assert_eq!(ctx.proc(id).vruntime, 11 * 1024);
        assert_eq!(ctx.now(), 11_000_000);

        let states: Vec<_> = ctx
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                SchedEvent::StateChange { to, .. } => Some(to),
                _ => None,
            })
            .collect();
        assert_eq!(
            states,
            vec![RunState::Waiting, RunState::Running, RunState::Terminated]
        );
    }

    #[test]
    fn requeues_while_burst_remains() {
        let mut ctx = RunCtx::new(VirtualClock::default(), Duration::from_millis(1));
        let id = ctx.insert(Process::new(3, 4, 1, ProcessNature::IoBound));
        ctx.enqueue(id);
        ctx.dequeue();

        let handler = IoBoundHandler { io_wait: 2 };
        assert_eq!(handler.execute(&mut ctx, id), Outcome::Requeued);
        assert_eq!(ctx.proc(id).cpu_burst_time, 3);
        // 2 * 1280 for the wait, 1280 for the unit of work
        assert_eq!(ctx.proc(id).vruntime, 3 * 1280);
        assert_eq!(ctx.peek_key().map(|k| k.vruntime), Some(3 * 1280));
    }
}
