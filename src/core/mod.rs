pub mod clock;
pub mod driver;
pub mod event;
pub mod observer;
pub mod queue;
pub mod state;
pub mod weight;

pub use clock::{AnyClock, Clock, VirtualClock, WallClock};
pub use driver::{ExecutionLogEntry, SchedConfig, SchedCore, Schedule, schedule, schedule_with};
pub use event::SchedEvent;
pub use queue::{RunQueue, VruntimeKey};
pub use state::{
    Nanos, Pid, ProcId, Process, ProcessNature, ProcessState, RunCtx, RunState, UnknownNature,
    Vruntime,
};
pub use weight::{NICE_0_LOAD, vruntime_delta, weight};
