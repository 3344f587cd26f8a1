use rand::prelude::*;

use super::{
    ingest::PRIORITY_RANGE,
    record::{ProcessRecord, ProcessStateRecord},
};
use crate::core::{Pid, ProcessNature};

#[derive(Debug, Clone, PartialEq)]
pub struct WorkloadSpec {
    pub count: usize,
    /// Probability that a process is IO-bound
    pub p_io: f64,
    pub min_burst: i64,
    pub max_burst: i64,
    pub min_priority: i32,
    pub max_priority: i32,
    pub seed: u64,
}

impl Default for WorkloadSpec {
    fn default() -> Self {
        Self {
            count: 10,
            p_io: 0.3,
            min_burst: 1,
            max_burst: 10,
            min_priority: 0,
            max_priority: 5,
            seed: 0,
        }
    }
}

/// Random process list; equal `WorkloadSpec`s yield equal lists. Pids are
/// assigned 1..=count and every process starts at vruntime 0.
///
/// Ranges are clamped to what ingestion accepts: bursts to `>= 0`,
/// priorities to [`PRIORITY_RANGE`], and the count to the largest pid.
pub fn generate(spec: &WorkloadSpec) -> Vec<ProcessRecord> {
    let mut rng = StdRng::seed_from_u64(spec.seed);
    let (lo_burst, hi_burst) = ordered(spec.min_burst.max(0), spec.max_burst.max(0));
    let (lo_prio, hi_prio) = ordered(
        clamp_priority(spec.min_priority),
        clamp_priority(spec.max_priority),
    );

    let last_pid = pid_limit(spec.count);
    if usize::try_from(last_pid).ok() != Some(spec.count) {
        tracing::warn!(count = spec.count, last_pid, "workload truncated to pid range");
    }

    (1..=last_pid)
        .map(|pid| {
            let nature = if rng.random::<f64>() < spec.p_io {
                ProcessNature::IoBound
            } else {
                ProcessNature::CpuBound
            };

            ProcessRecord {
                pid,
                vruntime: 0,
                cpu_burst_time: rng.random_range(lo_burst..=hi_burst),
                priority: rng.random_range(lo_prio..=hi_prio),
                process_state: ProcessStateRecord {
                    counter: rng.random_range(0..1000),
                },
                process_nature: nature.as_str().to_owned(),
            }
        })
        .collect()
}

fn clamp_priority(priority: i32) -> i32 {
    priority.clamp(*PRIORITY_RANGE.start(), *PRIORITY_RANGE.end())
}

// Highest pid a workload of `count` processes gets
fn pid_limit(count: usize) -> Pid {
    Pid::try_from(count).unwrap_or(Pid::MAX)
}

fn ordered<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::parse_processes;

    #[test]
    fn same_seed_same_workload() {
        let spec = WorkloadSpec::default();
        assert_eq!(generate(&spec), generate(&spec));
        assert_ne!(
            generate(&spec),
            generate(&WorkloadSpec {
                seed: 1,
                ..spec.clone()
            })
        );
    }

    #[test]
    fn respects_ranges() {
        let spec = WorkloadSpec {
            count: 200,
            min_burst: 3,
            max_burst: 4,
            min_priority: -2,
            max_priority: 2,
            ..WorkloadSpec::default()
        };
        let records = generate(&spec);
        assert_eq!(records.len(), 200);
        assert!(records.iter().all(|r| (3..=4).contains(&r.cpu_burst_time)));
        assert!(records.iter().all(|r| (-2..=2).contains(&r.priority)));
        assert_eq!(records.last().map(|r| r.pid), Some(200));
    }

    #[test]
    fn io_probability_extremes() {
        let all_io = generate(&WorkloadSpec {
            p_io: 1.0,
            ..WorkloadSpec::default()
        });
        assert!(all_io.iter().all(|r| r.process_nature == "IO_BOUND"));

        let no_io = generate(&WorkloadSpec {
            p_io: 0.0,
            ..WorkloadSpec::default()
        });
        assert!(no_io.iter().all(|r| r.process_nature == "CPU_BOUND"));
    }

    #[test]
    fn out_of_range_bounds_are_clamped() {
        let spec = WorkloadSpec {
            count: 100,
            min_burst: -5,
            max_burst: -1,
            min_priority: -30,
            max_priority: 40,
            ..WorkloadSpec::default()
        };
        let records = generate(&spec);
        assert!(records.iter().all(|r| r.cpu_burst_time == 0));
        assert!(records.iter().all(|r| PRIORITY_RANGE.contains(&r.priority)));

        let json = serde_json::to_string(&records).unwrap();
        assert_eq!(parse_processes(json.as_bytes()).unwrap().len(), 100);
    }

    #[test]
    fn count_is_bounded_by_pid_range() {
        assert_eq!(pid_limit(0), 0);
        assert_eq!(pid_limit(12), 12);
        assert_eq!(pid_limit(usize::MAX), Pid::MAX);
    }

    #[test]
    fn output_feeds_ingestion() {
        let json = serde_json::to_string(&generate(&WorkloadSpec::default())).unwrap();
        let processes = parse_processes(json.as_bytes()).unwrap();
        assert_eq!(processes.len(), 10);
    }
}
