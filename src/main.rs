use std::fs;

use anyhow::{Context, Result};
use cfs_model::{
    config::{Cli, Commands, GenerateArgs, RunArgs},
    logging, schedule_with,
    sim::{self, WorkloadSpec},
};
use clap::Parser;

// Panics also go through tracing so they land next to the run's log lines
fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        previous(info);
        tracing::error!(%info, "scheduler panicked");
    }));
}

fn main() -> Result<()> {
    logging::init();
    install_panic_hook();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run(args),
        Commands::Generate(args) => generate(args),
    }
}

fn run(args: RunArgs) -> Result<()> {
    let processes = sim::load_processes(&args.input)
        .with_context(|| format!("loading processes from {}", args.input.display()))?;
    tracing::info!(
        count = processes.len(),
        clock = ?args.clock,
        "scheduling"
    );

    let schedule = schedule_with((&args).into(), args.clock.build(), processes);
    sim::save_log(&args.output, &schedule.log)?;

    if args.summary {
        println!("{}", sim::analyze(&schedule.log));
    }

    Ok(())
}

fn generate(args: GenerateArgs) -> Result<()> {
    let spec = WorkloadSpec::from(&args);
    let records = sim::generate(&spec);
    let json = serde_json::to_string_pretty(&records).context("serializing workload")?;

    match &args.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), count = records.len(), "wrote workload");
        }
        None => println!("{json}"),
    }

    Ok(())
}
