use average::{Estimate, Mean};
use rustc_hash::FxHashMap;
use std::fmt;

use crate::core::{ExecutionLogEntry, Nanos, Pid};

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessMetrics {
    pub pid: Pid,
    /// Dispatch cycles, i.e. context switches onto the CPU
    pub dispatches: u64,
    pub total_time: Nanos,
    pub mean_time: f64,
    /// First start, relative to the start of the run
    pub response_time: Nanos,
    /// Last end, relative to the start of the run
    pub turnaround_time: Nanos,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleMetrics {
    /// Sorted by pid
    pub per_process: Vec<ProcessMetrics>,
    pub makespan: Nanos,
    pub mean_response_time: f64,
    pub mean_turnaround_time: f64,
}

#[derive(Default)]
struct Acc {
    dispatches: u64,
    total: Nanos,
    mean: Mean,
    first_start: Nanos,
    last_end: Nanos,
}

pub fn analyze(log: &[ExecutionLogEntry]) -> ScheduleMetrics {
    let origin = log.iter().map(|e| e.start_time).min().unwrap_or(0);
    let end = log.iter().map(|e| e.end_time).max().unwrap_or(origin);

    let mut by_pid: FxHashMap<Pid, Acc> = FxHashMap::default();
    for entry in log {
        let spent = entry.end_time.saturating_sub(entry.start_time);
        let acc = by_pid.entry(entry.pid).or_insert_with(|| Acc {
            first_start: entry.start_time,
            ..Acc::default()
        });
        acc.dispatches += 1;
        acc.total += spent;
        acc.mean.add(spent as f64);
        acc.first_start = acc.first_start.min(entry.start_time);
        acc.last_end = acc.last_end.max(entry.end_time);
    }

    let mut per_process: Vec<_> = by_pid
        .into_iter()
        .map(|(pid, acc)| ProcessMetrics {
            pid,
            dispatches: acc.dispatches,
            total_time: acc.total,
            mean_time: acc.mean.mean(),
            response_time: acc.first_start - origin,
            turnaround_time: acc.last_end - origin,
        })
        .collect();
    per_process.sort_by_key(|m| m.pid);

    let mean_response_time = avg(per_process.iter().map(|m| m.response_time as f64));
    let mean_turnaround_time = avg(per_process.iter().map(|m| m.turnaround_time as f64));

    ScheduleMetrics {
        per_process,
        makespan: end - origin,
        mean_response_time,
        mean_turnaround_time,
    }
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<Mean>().estimate()
}

fn ms(nanos: f64) -> f64 {
    nanos / 1e6
}

impl fmt::Display for ScheduleMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>6} {:>10} {:>12} {:>12} {:>12} {:>12}",
            "pid", "dispatches", "total ms", "mean ms", "response ms", "turnaround ms"
        )?;
        for m in &self.per_process {
            writeln!(
                f,
                "{:>6} {:>10} {:>12.3} {:>12.3} {:>12.3} {:>12.3}",
                m.pid,
                m.dispatches,
                ms(m.total_time as f64),
                ms(m.mean_time),
                ms(m.response_time as f64),
                ms(m.turnaround_time as f64),
            )?;
        }
        writeln!(f, "Makespan: {:.3} ms", ms(self.makespan as f64))?;
        writeln!(f, "Average response time: {:.3} ms", ms(self.mean_response_time))?;
        write!(f, "Average turnaround time: {:.3} ms", ms(self.mean_turnaround_time))
    }
}
