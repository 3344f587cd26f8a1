use slotmap::{SlotMap, new_key_type};
use std::{str::FromStr, time::Duration};

use super::{
    clock::Clock,
    event::SchedEvent,
    queue::{RunQueue, VruntimeKey},
};

// User-visible process identifier; not required to be unique
pub type Pid = i32;
pub type Vruntime = i64;
pub type Nanos = u64;
new_key_type! {
    pub struct ProcId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessNature {
    CpuBound,
    IoBound,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown process nature {0:?}")]
pub struct UnknownNature(pub String);

impl FromStr for ProcessNature {
    type Err = UnknownNature;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CPU_BOUND" => Ok(Self::CpuBound),
            "IO_BOUND" => Ok(Self::IoBound),
            other => Err(UnknownNature(other.to_owned())),
        }
    }
}

impl ProcessNature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CpuBound => "CPU_BOUND",
            Self::IoBound => "IO_BOUND",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProcessState {
    pub counter: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Queued,
    Running,
    Waiting,
    Terminated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pub pid: Pid,
    pub vruntime: Vruntime,
    pub cpu_burst_time: i64,
    pub priority: i32,
    pub process_state: ProcessState,
    pub nature: ProcessNature,
    pub run_state: RunState,
}

impl Process {
    pub fn new(pid: Pid, cpu_burst_time: i64, priority: i32, nature: ProcessNature) -> Self {
        Self {
            pid,
            vruntime: 0,
            cpu_burst_time,
            priority,
            process_state: ProcessState::default(),
            nature,
            run_state: RunState::Queued,
        }
    }

    pub fn with_vruntime(mut self, vruntime: Vruntime) -> Self {
        self.vruntime = vruntime;
        self
    }

    pub fn has_work(&self) -> bool {
        self.cpu_burst_time > 0
    }
}

/// Everything a dispatch cycle may touch: the process table, the run queue
/// and the time source.
#[derive(Debug)]
pub struct RunCtx<C: Clock> {
    pub procs: SlotMap<ProcId, Process>,
    pub queue: RunQueue,
    pub clock: C,
    pub tick: Duration,

    // Filled during a cycle, drained by the driver
    events: Vec<SchedEvent>,
    // Admission order, so results come back the way they went in
    order: Vec<ProcId>,
}

impl<C: Clock> RunCtx<C> {
    pub fn new(clock: C, tick: Duration) -> Self {
        Self {
            procs: SlotMap::with_key(),
            queue: RunQueue::new(),
            clock,
            tick,
            events: Vec::new(),
            order: Vec::new(),
        }
    }

    pub fn insert(&mut self, process: Process) -> ProcId {
        let id = self.procs.insert(process);
        self.order.push(id);
        id
    }

    pub fn proc(&self, id: ProcId) -> &Process {
        &self.procs[id]
    }

    pub fn proc_mut(&mut self, id: ProcId) -> &mut Process {
        &mut self.procs[id]
    }

    pub fn enqueue(&mut self, id: ProcId) {
        let vruntime = self.proc(id).vruntime;
        debug_assert!(
            self.proc(id).has_work(),
            "pid {} enqueued without remaining burst",
            self.proc(id).pid
        );
        self.queue.push(id, vruntime);
        self.set_state(id, RunState::Queued);
    }

    pub fn dequeue(&mut self) -> Option<ProcId> {
        let id = self.queue.pop()?;
        self.set_state(id, RunState::Running);
        Some(id)
    }

    pub fn peek_key(&self) -> Option<VruntimeKey> {
        self.queue.peek().map(|(_, key)| key)
    }

    pub fn set_state(&mut self, id: ProcId, to: RunState) {
        let process = self.proc_mut(id);
        let from = process.run_state;
        process.run_state = to;
        let pid = process.pid;
        if from != to {
            self.events.push(SchedEvent::StateChange { pid, from, to });
        }
    }

    /// Charge `delta` virtual runtime to `id`. Negative charges are ignored so
    /// vruntime never moves backwards.
    pub fn charge(&mut self, id: ProcId, delta: Vruntime) {
        let process = self.proc_mut(id);
        process.vruntime = process.vruntime.saturating_add(delta.max(0));
    }

    pub fn record(&mut self, event: SchedEvent) {
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<SchedEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn now(&self) -> Nanos {
        self.clock.now()
    }

    pub fn ticks(&self, units: i64) -> Duration {
        self.tick
            .saturating_mul(u32::try_from(units.max(0)).unwrap_or(u32::MAX))
    }

    pub fn admission_order(&self) -> &[ProcId] {
        &self.order
    }

    /// Consume the context, returning processes in admission order.
    pub fn into_processes(mut self) -> Vec<Process> {
        self.order
            .iter()
            .filter_map(|id| self.procs.remove(*id))
            .collect()
    }
}
