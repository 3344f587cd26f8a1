use std::{path::PathBuf, time::Duration};

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::core::{AnyClock, SchedConfig, VirtualClock, WallClock};
use crate::sim::WorkloadSpec;

/// Simulate a CFS-style scheduler over a static process list
#[derive(Parser)]
#[command(about, long_about, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Schedule a process list and write the execution log
    Run(RunArgs),
    /// Write a random process list
    Generate(GenerateArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockKind {
    /// Logical time; IO wait is bookkeeping only
    Virtual,
    /// Monotonic wall time; IO wait sleeps
    Wall,
}

impl ClockKind {
    pub fn build(self) -> AnyClock {
        match self {
            Self::Virtual => AnyClock::Virtual(VirtualClock::default()),
            Self::Wall => AnyClock::Wall(WallClock::new()),
        }
    }
}

/// Arguments for a scheduling run
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Process descriptors (JSON array)
    #[arg(short, long, default_value = "resources/process.json")]
    pub input: PathBuf,

    /// Execution log destination (CSV)
    #[arg(short, long, default_value = "process_schedule.csv")]
    pub output: PathBuf,

    /// Units a CPU-bound process runs per dispatch
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(i64).range(1..))]
    pub time_slice: i64,

    /// Units an IO-bound process waits per dispatch
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(i64).range(0..))]
    pub io_wait: i64,

    /// Length of one unit in microseconds
    #[arg(long, default_value_t = 1000)]
    pub tick_us: u64,

    /// Time source
    #[arg(long, value_enum, default_value_t = ClockKind::Virtual, env = "CFS_MODEL_CLOCK")]
    pub clock: ClockKind,

    /// Print per-process statistics after the run
    #[arg(short, long)]
    pub summary: bool,
}

impl From<&RunArgs> for SchedConfig {
    fn from(args: &RunArgs) -> Self {
        Self {
            time_slice: args.time_slice,
            io_wait: args.io_wait,
            tick: Duration::from_micros(args.tick_us),
        }
    }
}

/// Arguments for workload generation
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Number of processes
    #[arg(short = 'n', long, default_value_t = 10)]
    pub count: usize,

    /// Probability that a process is IO-bound (0.0 to 1.0)
    #[arg(long, default_value_t = 0.3)]
    pub io_ratio: f64,

    #[arg(long, default_value_t = 1)]
    pub min_burst: i64,

    #[arg(long, default_value_t = 10)]
    pub max_burst: i64,

    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub min_priority: i32,

    #[arg(long, default_value_t = 5, allow_negative_numbers = true)]
    pub max_priority: i32,

    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Destination file; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl From<&GenerateArgs> for WorkloadSpec {
    fn from(args: &GenerateArgs) -> Self {
        Self {
            count: args.count,
            p_io: args.io_ratio.clamp(0.0, 1.0),
            min_burst: args.min_burst,
            max_burst: args.max_burst,
            min_priority: args.min_priority,
            max_priority: args.max_priority,
            seed: args.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_defaults_match_sched_defaults() {
        let cli = Cli::try_parse_from(["cfs-model", "run"]).unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(SchedConfig::from(&args), SchedConfig::default());
        assert_eq!(args.clock, ClockKind::Virtual);
        assert_eq!(args.input, PathBuf::from("resources/process.json"));
    }

    #[test]
    fn run_args_to_config_conversion() {
        let cli = Cli::try_parse_from([
            "cfs-model",
            "run",
            "--time-slice",
            "3",
            "--io-wait",
            "0",
            "--tick-us",
            "10",
            "--clock",
            "wall",
        ])
        .unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        let config = SchedConfig::from(&args);
        assert_eq!(config.time_slice, 3);
        assert_eq!(config.io_wait, 0);
        assert_eq!(config.tick, Duration::from_micros(10));
        assert!(matches!(args.clock.build(), AnyClock::Wall(_)));
    }

    #[test]
    fn zero_time_slice_is_rejected() {
        assert!(Cli::try_parse_from(["cfs-model", "run", "--time-slice", "0"]).is_err());
    }

    #[test]
    fn generate_args_to_spec_conversion() {
        let cli = Cli::try_parse_from([
            "cfs-model",
            "generate",
            "-n",
            "4",
            "--io-ratio",
            "2.5",
            "--min-priority",
            "-3",
            "--seed",
            "9",
        ])
        .unwrap();
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        let spec = WorkloadSpec::from(&args);
        assert_eq!(spec.count, 4);
        assert_eq!(spec.p_io, 1.0);
        assert_eq!(spec.min_priority, -3);
        assert_eq!(spec.seed, 9);
        assert!(args.output.is_none());
    }
}
