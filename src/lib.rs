pub mod config;
pub mod core;
pub mod handler;
pub mod logging;
pub mod sim;

pub use crate::core::{
    ExecutionLogEntry, Process, ProcessNature, SchedConfig, schedule, schedule_with,
};
pub use handler::ExecutionHandler;
