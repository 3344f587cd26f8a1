//! Per-nature execution strategies. A handler runs one dispatch cycle for a
//! process that the driver has just popped, then either puts it back on the
//! run queue or retires it.

pub mod cpu;
pub mod io;

use crate::core::{Clock, ProcId, RunCtx, RunState};
pub use cpu::CpuBoundHandler;
pub use io::IoBoundHandler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Requeued,
    Terminated,
}

pub trait ExecutionHandler {
    fn execute<C: Clock>(&self, ctx: &mut RunCtx<C>, id: ProcId) -> Outcome;
}

// Shared tail of both handlers
fn requeue_or_terminate<C: Clock>(ctx: &mut RunCtx<C>, id: ProcId) -> Outcome {
    if ctx.proc(id).has_work() {
        ctx.enqueue(id);
        Outcome::Requeued
    } else {
        ctx.set_state(id, RunState::Terminated);
        Outcome::Terminated
    }
}
