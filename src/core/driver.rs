use std::time::Duration;

use super::{
    clock::{Clock, VirtualClock},
    event::SchedEvent,
    observer::Observer,
    state::{Nanos, Pid, Process, ProcessNature, RunCtx, RunState},
};
use crate::handler::{
    CpuBoundHandler, ExecutionHandler, IoBoundHandler, Outcome, cpu::DEFAULT_TIME_SLICE,
    io::DEFAULT_IO_WAIT,
};

pub const DEFAULT_TICK: Duration = Duration::from_millis(1);

/// One dispatch cycle as seen from outside the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionLogEntry {
    pub pid: Pid,
    pub start_time: Nanos,
    pub end_time: Nanos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedConfig {
    /// Units a CPU-bound process runs per dispatch
    pub time_slice: i64,
    /// Units an IO-bound process waits per dispatch
    pub io_wait: i64,
    /// Real or logical duration of one unit
    pub tick: Duration,
}

impl SchedConfig {
    /// Smallest values that still guarantee every dispatch consumes burst.
    pub fn normalized(self) -> Self {
        Self {
            time_slice: self.time_slice.max(1),
            io_wait: self.io_wait.max(0),
            ..self
        }
    }
}

impl Default for SchedConfig {
    fn default() -> Self {
        Self {
            time_slice: DEFAULT_TIME_SLICE,
            io_wait: DEFAULT_IO_WAIT,
            tick: DEFAULT_TICK,
        }
    }
}

/// Result of a complete run.
#[derive(Debug, Clone)]
pub struct Schedule {
    pub log: Vec<ExecutionLogEntry>,
    /// Final process records, in input order
    pub processes: Vec<Process>,
    pub events: Vec<SchedEvent>,
}

pub struct SchedCore<C: Clock> {
    pub ctx: RunCtx<C>,
    cpu: CpuBoundHandler,
    io: IoBoundHandler,
    observer: Observer,
}

impl<C: Clock> SchedCore<C> {
    pub fn new(config: SchedConfig, clock: C) -> Self {
        let normalized = config.normalized();
        if normalized != config {
            tracing::warn!(?config, ?normalized, "scheduler config out of range, clamped");
        }
        let config = normalized;

        Self {
            ctx: RunCtx::new(clock, config.tick),
            cpu: CpuBoundHandler {
                time_slice: config.time_slice,
            },
            io: IoBoundHandler {
                io_wait: config.io_wait,
            },
            observer: Observer::new(),
        }
    }

    /// Put every process on the run queue, in input order. A process with no
    /// burst left is retired on the spot and never dispatched.
    pub fn admit(&mut self, processes: impl IntoIterator<Item = Process>) {
        for process in processes {
            let id = self.ctx.insert(process);
            if self.ctx.proc(id).has_work() {
                self.ctx.enqueue(id);
            } else {
                tracing::debug!(pid = self.ctx.proc(id).pid, "admitted with empty burst");
                self.ctx.set_state(id, RunState::Terminated);
            }
        }
    }

    /// Run one dispatch cycle. Returns `None` once the run queue is empty.
    pub fn step(&mut self) -> Option<ExecutionLogEntry> {
        let id = self.ctx.dequeue()?;
        let process = self.ctx.proc(id);
        let (pid, nature, vruntime_before) = (process.pid, process.nature, process.vruntime);

        let start_time = self.ctx.now();
        let outcome = match nature {
            ProcessNature::CpuBound => self.cpu.execute(&mut self.ctx, id),
            ProcessNature::IoBound => self.io.execute(&mut self.ctx, id),
        };
        let end_time = self.ctx.now();

        let process = self.ctx.proc(id);
        let (vruntime_after, remaining) = (process.vruntime, process.cpu_burst_time);
        self.ctx.record(SchedEvent::Accounted {
            pid,
            vruntime_before,
            vruntime_after,
            remaining,
        });
        self.observer.observe(&self.ctx, id);

        tracing::debug!(
            pid,
            ?nature,
            vruntime = vruntime_after,
            remaining,
            terminated = outcome == Outcome::Terminated,
            "dispatch"
        );

        Some(ExecutionLogEntry {
            pid,
            start_time,
            end_time,
        })
    }

    /// Drive the loop until nothing is runnable.
    pub fn run(&mut self) -> Vec<ExecutionLogEntry> {
        std::iter::from_fn(|| self.step()).collect()
    }

    pub fn steps(&self) -> u64 {
        self.observer.steps()
    }

    pub fn drain_events(&mut self) -> Vec<SchedEvent> {
        self.ctx.drain_events()
    }

    pub fn into_processes(self) -> Vec<Process> {
        self.ctx.into_processes()
    }
}

/// Schedule `processes` with the default configuration on a logical clock.
pub fn schedule(processes: Vec<Process>) -> Vec<ExecutionLogEntry> {
    schedule_with(SchedConfig::default(), VirtualClock::default(), processes).log
}

pub fn schedule_with<C: Clock>(
    config: SchedConfig,
    clock: C,
    processes: Vec<Process>,
) -> Schedule {
    let count = processes.len();
    let mut core = SchedCore::new(config, clock);
    core.admit(processes);
    let log = core.run();
    let events = core.drain_events();

    tracing::info!(processes = count, cycles = log.len(), "schedule complete");

    Schedule {
        log,
        processes: core.into_processes(),
        events,
    }
}
